use thiserror::Error;

/// Reasons a user-supplied operation is rejected before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// A field could not be parsed as an integer.
	#[error("please enter valid numbers for both value and index")]
	NotANumber,
	/// The insert index lies outside `[-1, len]`.
	#[error("index {index} is out of bounds, use an index between -1 and {len}")]
	IndexOutOfRange {
		/// The parsed index as entered.
		index: i64,
		/// Length of the sequence at validation time.
		len: usize,
	},
}

/// Parses a raw input field as an integer, ignoring surrounding whitespace.
pub fn parse_int(raw: &str) -> Option<i32> {
	raw.trim().parse().ok()
}

/// A validated insert: concrete position plus the value to place there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertRequest {
	/// Resolved insertion position, always `<= len`.
	pub index: usize,
	/// Value to insert.
	pub value: i32,
}

impl InsertRequest {
	/// Index meaning "insert at the end".
	pub const END: i64 = -1;

	/// Parses and validates both insert fields against a sequence of length `len`.
	///
	/// Both fields are parsed before the range check, so a bad value is reported
	/// as [`ValidationError::NotANumber`] even when the index is also out of range.
	pub fn parse(raw_index: &str, raw_value: &str, len: usize) -> Result<Self, ValidationError> {
		let index: i64 = raw_index.trim().parse().map_err(|_| ValidationError::NotANumber)?;
		let value = parse_int(raw_value).ok_or(ValidationError::NotANumber)?;
		let index = Self::resolve(index, len)?;
		Ok(Self { index, value })
	}

	/// Resolves a parsed index, mapping [`Self::END`] to `len`.
	pub fn resolve(index: i64, len: usize) -> Result<usize, ValidationError> {
		if index == Self::END {
			return Ok(len);
		}
		match usize::try_from(index) {
			Ok(resolved) if resolved <= len => Ok(resolved),
			_ => Err(ValidationError::IndexOutOfRange { index, len }),
		}
	}
}

#[cfg(test)]
mod tests;
