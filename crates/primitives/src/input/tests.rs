use super::*;

#[test]
fn test_parse_int_trims() {
	assert_eq!(parse_int(" 42 "), Some(42));
	assert_eq!(parse_int("-7"), Some(-7));
	assert_eq!(parse_int(""), None);
	assert_eq!(parse_int("4x"), None);
	assert_eq!(parse_int("1.5"), None);
}

#[test]
fn test_insert_front() {
	assert_eq!(InsertRequest::parse("0", "7", 6), Ok(InsertRequest { index: 0, value: 7 }));
}

#[test]
fn test_insert_minus_one_is_end() {
	assert_eq!(InsertRequest::parse("-1", "7", 6), Ok(InsertRequest { index: 6, value: 7 }));
	assert_eq!(InsertRequest::parse("-1", "7", 6), InsertRequest::parse("6", "7", 6));
}

#[test]
fn test_insert_into_empty() {
	assert_eq!(InsertRequest::parse("0", "1", 0), Ok(InsertRequest { index: 0, value: 1 }));
	assert_eq!(InsertRequest::parse("-1", "1", 0), Ok(InsertRequest { index: 0, value: 1 }));
}

#[test]
fn test_insert_out_of_range() {
	assert_eq!(
		InsertRequest::parse("10", "1", 6),
		Err(ValidationError::IndexOutOfRange { index: 10, len: 6 })
	);
	assert_eq!(
		InsertRequest::parse("7", "1", 6),
		Err(ValidationError::IndexOutOfRange { index: 7, len: 6 })
	);
	assert_eq!(
		InsertRequest::parse("-2", "1", 6),
		Err(ValidationError::IndexOutOfRange { index: -2, len: 6 })
	);
}

#[test]
fn test_insert_not_a_number() {
	assert_eq!(InsertRequest::parse("abc", "1", 6), Err(ValidationError::NotANumber));
	assert_eq!(InsertRequest::parse("0", "", 6), Err(ValidationError::NotANumber));
	assert_eq!(InsertRequest::parse("99", "x", 6), Err(ValidationError::NotANumber));
}

#[test]
fn test_error_messages() {
	assert_eq!(
		ValidationError::IndexOutOfRange { index: 10, len: 6 }.to_string(),
		"index 10 is out of bounds, use an index between -1 and 6"
	);
}
