use std::io;

use arrayviz_primitives::{OpKind, Sequence};
use arrayviz_runner::{InputField, Launch, Runner, SearchOutcome};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::ui::{self, View};

/// Interactive frontend state.
pub struct App {
	runner: Runner,
	view: View,
}

impl App {
	pub fn new(runner: Runner) -> Self {
		Self {
			runner,
			view: View::default(),
		}
	}

	/// Handles one key press. Returns true to quit.
	pub fn handle_key(&mut self, key: KeyEvent) -> bool {
		if key.modifiers.contains(KeyModifiers::CONTROL) {
			return key.code == KeyCode::Char('c');
		}
		match key.code {
			KeyCode::Char('q') | KeyCode::Esc => return true,
			KeyCode::Char('a') => {
				let launch = self.runner.append();
				self.launched(OpKind::Append, launch);
			}
			KeyCode::Char('p') => {
				let launch = self.runner.pop();
				self.launched(OpKind::Pop, launch);
			}
			KeyCode::Char('i') => self.insert(),
			KeyCode::Char('/') => self.search(),
			KeyCode::Char('c') => {
				self.runner.clear_highlight();
				self.view.status = None;
			}
			KeyCode::Char('t') => {
				let launch = self.runner.traverse();
				self.launched(OpKind::Traverse, launch);
			}
			KeyCode::Char('s') => {
				self.runner.stop_traverse();
			}
			KeyCode::Tab => self.view.focus = self.view.focus.next(),
			KeyCode::BackTab => self.view.focus = self.view.focus.prev(),
			KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
				self.runner.edit_input(self.view.focus, |text| text.push(c));
			}
			KeyCode::Backspace => {
				self.runner.edit_input(self.view.focus, |text| {
					text.pop();
				});
			}
			KeyCode::Enter => match self.view.focus {
				InputField::InsertValue | InputField::InsertIndex => self.insert(),
				InputField::Search => self.search(),
			},
			_ => {}
		}
		false
	}

	fn insert(&mut self) {
		let inputs = self.runner.board().inputs;
		match self.runner.insert_at(&inputs.insert_index, &inputs.insert_value) {
			Ok(launch) => self.launched(OpKind::InsertAt, launch),
			Err(error) => self.view.status = Some(error.to_string()),
		}
	}

	fn search(&mut self) {
		let raw = self.runner.board().inputs.search;
		if raw.trim().is_empty() {
			self.view.status = Some("enter a value to search".to_string());
			return;
		}
		self.view.status = match self.runner.search(&raw) {
			SearchOutcome::Found(_) => None,
			SearchOutcome::NotFound => Some(format!("{} not found", raw.trim())),
			SearchOutcome::Refused => Some("search: another operation is running".to_string()),
		};
	}

	/// Records a refusal in the status line. Started runs continue on their own.
	fn launched<T>(&mut self, kind: OpKind, launch: Launch<T>) {
		self.view.status = launch.refusal().map(|refusal| format!("{kind}: {refusal}"));
	}

	fn draw(&self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
		let board = self.runner.board();
		terminal.draw(|frame| ui::draw(frame, &board, &self.view))?;
		Ok(())
	}

	fn sequence(&self) -> Sequence {
		self.runner.sequence()
	}
}

/// Runs the interactive frontend until the user quits.
pub async fn run(runner: Runner) -> io::Result<()> {
	install_panic_hook();
	terminal::enable_raw_mode()?;
	let mut stdout = io::stdout();
	execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

	let result = match Terminal::new(CrosstermBackend::new(stdout)) {
		Ok(mut terminal) => {
			let mut app = App::new(runner);
			let result = event_loop(&mut terminal, &mut app).await;
			tracing::info!(sequence = %app.sequence(), "app.exit");
			app.runner.shutdown();
			result
		}
		Err(error) => Err(error),
	};

	let cleanup = restore_terminal();
	result.and(cleanup)
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
	let mut events = EventStream::new();
	let mut board = app.runner.subscribe();
	loop {
		board.mark_unchanged();
		app.draw(terminal)?;

		tokio::select! {
			event = events.next() => match event {
				Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
					if app.handle_key(key) {
						break;
					}
				}
				Some(Ok(_)) => {}
				Some(Err(error)) => return Err(error),
				None => break,
			},
			changed = board.changed() => {
				if changed.is_err() {
					break;
				}
			}
		}
	}
	Ok(())
}

fn restore_terminal() -> io::Result<()> {
	execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
	terminal::disable_raw_mode()
}

fn install_panic_hook() {
	let previous = std::panic::take_hook();
	std::panic::set_hook(Box::new(move |info| {
		let _ = restore_terminal();
		previous(info);
	}));
}
