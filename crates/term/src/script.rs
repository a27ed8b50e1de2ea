//! Headless script player.
//!
//! A script is a `;`-separated list of commands played against a runner.
//! Append, pop and insert wait for their run to finish before the next
//! command; traverse keeps running in the background until stopped or until
//! the script ends. Every distinct board state is printed as one line:
//!
//! ```text
//! [5 (2) 8]  append: scanning index 1
//! ```
//!
//! Cells are decorated by role: `(v)` scan cursor, `+v` incoming value,
//! `~v` element being removed, `<v>` traversal cursor, `*v*` search hit.

use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use arrayviz_primitives::{OpKind, Sequence};
use arrayviz_runner::{Board, CellRole, Launch, RunHandle, Runner, SearchOutcome, TraverseEnd};
use thiserror::Error;
use tokio::sync::watch;

use crate::ui::phase;

/// One script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	Append,
	Pop,
	/// Raw fields, validated by the runner.
	Insert {
		index: String,
		value: String,
	},
	Search(String),
	Clear,
	Traverse,
	Stop,
	Wait(Duration),
}

/// Errors from parsing a script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
	#[error("script contains no commands")]
	Empty,
	#[error("command {position}: unknown command `{name}`")]
	UnknownCommand { position: usize, name: String },
	#[error("command {position}: `{command}` expects {expected}")]
	Arity {
		position: usize,
		command: &'static str,
		expected: &'static str,
	},
	#[error("command {position}: `{raw}` is not a duration in milliseconds")]
	InvalidWait { position: usize, raw: String },
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
	pub steps: Vec<Step>,
}

impl Script {
	/// Parses a `;`-separated script. Empty commands are skipped.
	pub fn parse(source: &str) -> Result<Self, ScriptError> {
		let mut steps = Vec::new();
		let commands = source.split(';').map(str::trim).filter(|command| !command.is_empty());
		for (offset, command) in commands.enumerate() {
			let position = offset + 1;
			let words: Vec<&str> = command.split_whitespace().collect();
			let Some((&name, args)) = words.split_first() else {
				continue;
			};
			let step = match (name, args) {
				("append", []) => Step::Append,
				("pop", []) => Step::Pop,
				("insert", [index, value]) => Step::Insert {
					index: index.to_string(),
					value: value.to_string(),
				},
				("search", [value]) => Step::Search(value.to_string()),
				("clear", []) => Step::Clear,
				("traverse", []) => Step::Traverse,
				("stop", []) => Step::Stop,
				("wait", [raw]) => {
					let millis = raw.parse().map_err(|_| ScriptError::InvalidWait {
						position,
						raw: raw.to_string(),
					})?;
					Step::Wait(Duration::from_millis(millis))
				}
				(name, _) => return Err(misuse(position, name)),
			};
			steps.push(step);
		}
		if steps.is_empty() {
			return Err(ScriptError::Empty);
		}
		Ok(Self { steps })
	}
}

fn misuse(position: usize, name: &str) -> ScriptError {
	let (command, expected) = match name {
		"append" => ("append", "no arguments"),
		"pop" => ("pop", "no arguments"),
		"insert" => ("insert", "<index> <value>"),
		"search" => ("search", "<value>"),
		"clear" => ("clear", "no arguments"),
		"traverse" => ("traverse", "no arguments"),
		"stop" => ("stop", "no arguments"),
		"wait" => ("wait", "<ms>"),
		_ => {
			return ScriptError::UnknownCommand {
				position,
				name: name.to_string(),
			};
		}
	};
	ScriptError::Arity {
		position,
		command,
		expected,
	}
}

/// Renders a board as one text line.
pub fn snapshot_line(board: &Board) -> String {
	let cells: Vec<String> = board
		.cells()
		.iter()
		.map(|cell| {
			let value = cell.value;
			match cell.role {
				CellRole::Plain => value.to_string(),
				CellRole::Cursor => format!("({value})"),
				CellRole::Incoming => format!("+{value}"),
				CellRole::Fading => format!("~{value}"),
				CellRole::Traversal => format!("<{value}>"),
				CellRole::Highlight => format!("*{value}*"),
			}
		})
		.collect();
	let mut line = format!("[{}]", cells.join(" "));
	if let Some(phase) = phase(&board.run) {
		line.push_str("  ");
		line.push_str(&phase);
	}
	line
}

struct Player<'a, W> {
	runner: &'a Runner,
	board: watch::Receiver<Board>,
	out: W,
	last: Option<String>,
	traversal: Option<RunHandle<TraverseEnd>>,
}

impl<'a, W: Write> Player<'a, W> {
	fn new(runner: &'a Runner, out: W) -> Self {
		Self {
			runner,
			board: runner.subscribe(),
			out,
			last: None,
			traversal: None,
		}
	}

	fn snapshot(&mut self) -> io::Result<()> {
		let line = snapshot_line(&self.board.borrow_and_update());
		if self.last.as_deref() != Some(line.as_str()) {
			writeln!(self.out, "{line}")?;
			self.last = Some(line);
		}
		Ok(())
	}

	fn note(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
		writeln!(self.out, "> {text}")
	}

	/// Awaits `fut` while printing board changes.
	async fn drive<F: Future>(&mut self, fut: F) -> io::Result<F::Output> {
		tokio::pin!(fut);
		loop {
			tokio::select! {
				biased;
				output = &mut fut => {
					self.snapshot()?;
					return Ok(output);
				}
				_ = self.board.changed() => self.snapshot()?,
			}
		}
	}

	async fn run(&mut self, kind: OpKind, launch: Launch<Sequence>) -> io::Result<()> {
		match launch {
			Launch::Started(handle) => {
				self.drive(handle).await?;
				Ok(())
			}
			Launch::Refused(refusal) => self.note(format_args!("{kind} refused: {refusal}")),
		}
	}

	async fn step(&mut self, step: &Step) -> io::Result<()> {
		tracing::debug!(?step, "play.step");
		match step {
			Step::Append => {
				let launch = self.runner.append();
				self.run(OpKind::Append, launch).await
			}
			Step::Pop => {
				let launch = self.runner.pop();
				self.run(OpKind::Pop, launch).await
			}
			Step::Insert { index, value } => match self.runner.insert_at(index, value) {
				Ok(launch) => self.run(OpKind::InsertAt, launch).await,
				Err(error) => self.note(format_args!("insert {index} {value}: {error}")),
			},
			Step::Search(raw) => {
				let outcome = self.runner.search(raw);
				self.snapshot()?;
				match outcome {
					SearchOutcome::Found(index) => self.note(format_args!("search {raw}: found at index {index}")),
					SearchOutcome::NotFound => self.note(format_args!("search {raw}: not found (-1)")),
					SearchOutcome::Refused => self.note("search refused: another operation is running"),
				}
			}
			Step::Clear => {
				self.runner.clear_highlight();
				self.snapshot()
			}
			Step::Traverse => match self.runner.traverse() {
				Launch::Started(handle) => {
					self.traversal = Some(handle);
					self.snapshot()
				}
				Launch::Refused(refusal) => self.note(format_args!("traverse refused: {refusal}")),
			},
			Step::Stop => {
				if !self.runner.stop_traverse() {
					self.note("stop: no traversal running")?;
				}
				self.snapshot()
			}
			Step::Wait(duration) => self.drive(tokio::time::sleep(*duration)).await,
		}
	}
}

/// Plays `script` against `runner`, writing snapshots and notes to `out`.
///
/// Returns once the last command finished and any traversal ended.
pub async fn play<W: Write>(runner: &Runner, script: &Script, out: W) -> io::Result<()> {
	let mut player = Player::new(runner, out);
	player.snapshot()?;
	for step in &script.steps {
		player.step(step).await?;
	}
	if let Some(handle) = player.traversal.take() {
		let end = player.drive(handle).await?;
		tracing::debug!(?end, "play.traverse_end");
	}
	player.out.flush()
}

#[cfg(test)]
mod tests;
