//! arrayviz terminal frontend.
//!
//! Without a subcommand the interactive TUI is started. `arrayviz play`
//! runs a script headlessly and prints every board change.

mod app;
mod cli;
mod script;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use arrayviz_config::{Config, LogConfig};
use arrayviz_runner::{Pacing, RandomValues, Runner};
use clap::Parser;
use cli::{Cli, Command};
use script::Script;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let config = Config::discover(cli.config.as_deref()).context("failed to load configuration")?;

	setup_tracing(&config.log, cli.verbose, cli.command.is_none());
	tracing::info!(config = ?cli.config, "starting arrayviz");

	let runner = build_runner(&config, cli.pacing_scale.unwrap_or(1.0));
	match cli.command {
		None => app::run(runner).await.context("terminal frontend failed")?,
		Some(Command::Play { script }) => {
			let script = Script::parse(&script)?;
			script::play(&runner, &script, io::stdout().lock()).await?;
		}
	}
	Ok(())
}

fn build_runner(config: &Config, scale: f64) -> Runner {
	let pacing = &config.pacing;
	let pacing =
		Pacing::from_millis(pacing.step_ms, pacing.reveal_ms, pacing.settle_ms, pacing.traverse_ms).scaled(scale);
	let values = RandomValues::new(config.values.min..=config.values.max);
	tracing::debug!(?pacing, min = config.values.min, max = config.values.max, "runner configured");
	Runner::new(config.initial.clone(), pacing, values)
}

fn setup_tracing(log: &LogConfig, verbose: bool, interactive: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::prelude::*;

	let log_dir = std::env::var("ARRAYVIZ_LOG_DIR")
		.ok()
		.map(PathBuf::from)
		.or_else(|| log.dir.clone());

	if let Some(log_dir) = log_dir
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let pid = std::process::id();
		let log_path = log_dir.join(format!("arrayviz.{pid}.log"));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match &log.filter {
				Some(directive) => EnvFilter::new(directive),
				None if verbose => EnvFilter::new("arrayviz_runner=trace,arrayviz=trace,debug"),
				None => EnvFilter::new("arrayviz_runner=debug,arrayviz=debug,info"),
			});

			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_span_events(FmtSpan::CLOSE)
				.with_target(true);

			tracing_subscriber::registry().with(filter).with(file_layer).init();

			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	// The TUI owns the terminal; without a log file it stays silent.
	if interactive {
		return;
	}

	tracing_subscriber::fmt()
		.with_writer(io::stderr)
		.with_max_level(if verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.init();
}
