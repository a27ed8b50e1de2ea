use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "arrayviz")]
#[command(about = "Step-by-step animated array operations in the terminal")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to the platform config directory)
	#[arg(long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Multiply every pacing interval by F (0 disables pauses)
	#[arg(long, value_name = "F", value_parser = parse_scale, global = true)]
	pub pacing_scale: Option<f64>,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Run a `;`-separated script without the TUI and print every board change
	Play {
		/// Commands: append, pop, insert <index> <value>, search <value>, clear,
		/// traverse, stop, wait <ms>
		script: String,
	},
}

fn parse_scale(raw: &str) -> Result<f64, String> {
	let scale: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
	if !scale.is_finite() || scale < 0.0 {
		return Err(format!("pacing scale must be a finite number >= 0, got {raw}"));
	}
	Ok(scale)
}
