//! Configuration system for arrayviz.
//!
//! Configuration is written in TOML. Every key is optional; a missing file or
//! a missing section falls back to the defaults below.
//!
//! # Configuration Files
//!
//! arrayviz looks for configuration in these locations (in order):
//!
//! 1. The path passed with `--config`
//! 2. `$XDG_CONFIG_HOME/arrayviz/config.toml` (or the platform equivalent)
//! 3. Built-in defaults
//!
//! # Schema
//!
//! ```toml
//! # Sequence shown at startup
//! initial = [5, 2, 8, 1, 9, 3]
//!
//! # Animation pacing in milliseconds
//! [pacing]
//! step_ms = 300      # one scan step
//! reveal_ms = 500    # provisional or fading cell
//! settle_ms = 300    # hold after commit
//! traverse_ms = 500  # one traversal step
//!
//! # Range of values generated by append (inclusive)
//! [values]
//! min = 0
//! max = 99
//!
//! [log]
//! dir = "/tmp/arrayviz-logs"
//! filter = "arrayviz=debug,arrayviz_runner=debug"
//! ```

pub mod error;

use std::path::{Path, PathBuf};

pub use error::{ConfigError, Result};
use serde::Deserialize;

/// File name looked up inside the platform config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Sequence loaded into the runner at startup.
	pub initial: Vec<i32>,
	/// Animation pacing.
	pub pacing: PacingConfig,
	/// Range for generated append values.
	pub values: ValueRange,
	/// Logging destination and filter.
	pub log: LogConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			initial: vec![5, 2, 8, 1, 9, 3],
			pacing: PacingConfig::default(),
			values: ValueRange::default(),
			log: LogConfig::default(),
		}
	}
}

/// Pacing intervals in milliseconds. Zero disables the corresponding pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacingConfig {
	pub step_ms: u64,
	pub reveal_ms: u64,
	pub settle_ms: u64,
	pub traverse_ms: u64,
}

impl Default for PacingConfig {
	fn default() -> Self {
		Self {
			step_ms: 300,
			reveal_ms: 500,
			settle_ms: 300,
			traverse_ms: 500,
		}
	}
}

/// Inclusive range of values produced for append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValueRange {
	pub min: i32,
	pub max: i32,
}

impl Default for ValueRange {
	fn default() -> Self {
		Self { min: 0, max: 99 }
	}
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
	/// Directory for per-process log files. Overridden by `ARRAYVIZ_LOG_DIR`.
	pub dir: Option<PathBuf>,
	/// `EnvFilter` directive used when `RUST_LOG` is unset.
	pub filter: Option<String>,
}

impl Config {
	/// Parse a TOML string into a validated [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let config: Config = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Resolves the configuration for a run.
	///
	/// An explicit path must exist. Without one, the default location is used
	/// when present and built-in defaults otherwise.
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.is_file() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}

	fn validate(&self) -> Result<()> {
		if self.values.min > self.values.max {
			return Err(ConfigError::InvalidRange {
				min: self.values.min,
				max: self.values.max,
			});
		}
		Ok(())
	}
}

/// Returns the default config file location, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("arrayviz").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests;
