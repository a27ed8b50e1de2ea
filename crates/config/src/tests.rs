use std::io::Write;

use super::*;

#[test]
fn test_empty_is_default() {
	assert_eq!(Config::parse("").unwrap(), Config::default());
}

#[test]
fn test_defaults_match_widget() {
	let config = Config::default();
	assert_eq!(config.initial, vec![5, 2, 8, 1, 9, 3]);
	assert_eq!(config.pacing.step_ms, 300);
	assert_eq!(config.pacing.reveal_ms, 500);
	assert_eq!(config.pacing.settle_ms, 300);
	assert_eq!(config.pacing.traverse_ms, 500);
	assert_eq!(config.values, ValueRange { min: 0, max: 99 });
	assert!(config.log.dir.is_none());
}

#[test]
fn test_partial_sections() {
	let config = Config::parse(
		r#"
initial = []

[pacing]
step_ms = 10

[log]
filter = "arrayviz_runner=trace"
"#,
	)
	.unwrap();
	assert!(config.initial.is_empty());
	assert_eq!(config.pacing.step_ms, 10);
	assert_eq!(config.pacing.reveal_ms, 500);
	assert_eq!(config.log.filter.as_deref(), Some("arrayviz_runner=trace"));
}

#[test]
fn test_unknown_key_rejected() {
	let err = Config::parse("[pacing]\nstep = 10\n").unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_inverted_range_rejected() {
	let err = Config::parse("[values]\nmin = 10\nmax = 1\n").unwrap_err();
	assert!(matches!(err, ConfigError::InvalidRange { min: 10, max: 1 }));
}

#[test]
fn test_load_from_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "initial = [1, 2, 3]").unwrap();
	let config = Config::load(file.path()).unwrap();
	assert_eq!(config.initial, vec![1, 2, 3]);
}

#[test]
fn test_explicit_missing_file_is_error() {
	let dir = tempfile::tempdir().unwrap();
	let missing = dir.path().join("nope.toml");
	let err = Config::discover(Some(&missing)).unwrap_err();
	match err {
		ConfigError::Io { path, .. } => assert_eq!(path, missing),
		other => panic!("unexpected error: {other}"),
	}
}
