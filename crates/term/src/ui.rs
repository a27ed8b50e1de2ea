//! Rendering of board snapshots.

use arrayviz_primitives::{COMPLEXITY_TABLE, OpKind};
use arrayviz_runner::{Board, CellRole, CellView, InputField, RunState};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Row, Table, Wrap};

/// Frontend state that is not part of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
	pub focus: InputField,
	/// Last validation error or refusal.
	pub status: Option<String>,
}

impl Default for View {
	fn default() -> Self {
		Self {
			focus: InputField::InsertValue,
			status: None,
		}
	}
}

const KEY_HINTS: &str = "a append  p pop  i insert  / search  c clear  t traverse  s stop  tab focus  q quit";

fn cell_style(role: CellRole) -> Style {
	match role {
		CellRole::Plain => Style::new().fg(Color::Black).bg(Color::Cyan),
		CellRole::Cursor => Style::new().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
		CellRole::Incoming => Style::new().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
		CellRole::Fading => Style::new()
			.fg(Color::DarkGray)
			.bg(Color::Black)
			.add_modifier(Modifier::CROSSED_OUT),
		CellRole::Traversal => Style::new().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
		CellRole::Highlight => Style::new().fg(Color::White).bg(Color::Magenta).add_modifier(Modifier::BOLD),
	}
}

/// Short description of the run phase, `None` when idle.
pub fn phase(run: &RunState) -> Option<String> {
	let label = match *run {
		RunState::Idle => return None,
		RunState::Scanning { kind, cursor } => format!("{kind}: scanning index {cursor}"),
		RunState::Pending { kind: OpKind::Pop, .. } => "pop: removing last element".to_string(),
		RunState::Pending { kind, cursor, .. } => format!("{kind}: placing value at {cursor}"),
		RunState::Committed { kind, .. } => format!("{kind}: done"),
		RunState::Traversing { cursor: Some(cursor) } => format!("traverse: visiting index {cursor}"),
		RunState::Traversing { cursor: None } => "traverse".to_string(),
	};
	Some(label)
}

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, board: &Board, view: &View) {
	let [cells, array, inputs, status, panels] = Layout::vertical([
		Constraint::Length(4),
		Constraint::Length(1),
		Constraint::Length(3),
		Constraint::Length(1),
		Constraint::Min(0),
	])
	.areas(frame.area());

	draw_cells(frame, cells, board);
	frame.render_widget(Paragraph::new(array_line(board)), array);
	draw_inputs(frame, inputs, board, view);
	frame.render_widget(Paragraph::new(status_line(board, view)), status);
	draw_panels(frame, panels, board.operation);
}

fn draw_cells(frame: &mut Frame, area: Rect, board: &Board) {
	let cells = board.cells();
	let values: Vec<Span> = cells
		.iter()
		.flat_map(|cell| [Span::styled(format!(" {:>3} ", cell.value), cell_style(cell.role)), Span::raw(" ")])
		.collect();
	let indices: Vec<Span> = cells
		.iter()
		.map(|cell: &CellView| match cell.index {
			Some(index) => Span::styled(format!(" {index:>3}  "), Style::new().fg(Color::DarkGray)),
			None => Span::styled("  new ", Style::new().fg(Color::Green)),
		})
		.collect();
	let title = phase(&board.run).unwrap_or_else(|| "array".to_string());
	let paragraph = Paragraph::new(vec![Line::from(values), Line::from(indices)]).block(Block::bordered().title(title));
	frame.render_widget(paragraph, area);
}

fn array_line(board: &Board) -> Line<'static> {
	Line::from(vec![
		Span::styled("Array: ", Style::new().add_modifier(Modifier::BOLD)),
		Span::raw(board.sequence.to_string()),
		Span::raw("   "),
		Span::styled("Length: ", Style::new().add_modifier(Modifier::BOLD)),
		Span::raw(board.sequence.len().to_string()),
	])
}

fn draw_inputs(frame: &mut Frame, area: Rect, board: &Board, view: &View) {
	let areas = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
	for (field, area) in InputField::ALL.into_iter().zip(areas.iter()) {
		let text = board.inputs.get(field);
		let content = if text.is_empty() {
			Span::styled(field.label(), Style::new().fg(Color::DarkGray))
		} else {
			Span::raw(text.to_string())
		};
		let border = if field == view.focus {
			Style::new().fg(Color::Yellow)
		} else {
			Style::new()
		};
		let block = Block::bordered().title(field.label()).border_style(border);
		frame.render_widget(Paragraph::new(content).block(block), *area);
	}
}

fn status_line(board: &Board, view: &View) -> Line<'static> {
	if let Some(status) = &view.status {
		return Line::styled(status.clone(), Style::new().fg(Color::Red));
	}
	if let Some(index) = board.highlight {
		return Line::styled(format!("found at index {index}"), Style::new().fg(Color::Magenta));
	}
	Line::styled(KEY_HINTS, Style::new().fg(Color::DarkGray))
}

fn draw_panels(frame: &mut Frame, area: Rect, operation: Option<OpKind>) {
	let [code, info] = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
	let [concept, table] = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(info);

	let (pseudocode, explanation) = match operation {
		Some(kind) => (kind.pseudocode(), kind.explanation()),
		None => ("", "Run an operation to see how it works."),
	};
	frame.render_widget(
		Paragraph::new(Text::from(pseudocode)).block(Block::bordered().title("Pseudocode")),
		code,
	);
	frame.render_widget(
		Paragraph::new(explanation)
			.wrap(Wrap { trim: true })
			.block(Block::bordered().title("Concept")),
		concept,
	);

	let header = Row::new(["Operation", "Best", "Average", "Worst"]).style(Style::new().add_modifier(Modifier::BOLD));
	let rows = COMPLEXITY_TABLE
		.iter()
		.map(|row| Row::new([row.operation, row.best, row.average, row.worst]));
	let widths = [
		Constraint::Length(10),
		Constraint::Length(6),
		Constraint::Length(8),
		Constraint::Length(6),
	];
	frame.render_widget(
		Table::new(rows, widths)
			.header(header)
			.block(Block::bordered().title("Time complexity")),
		table,
	);
}

#[cfg(test)]
mod tests {
	use arrayviz_primitives::Sequence;
	use arrayviz_runner::PendingCell;
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;

	fn render(board: &Board, view: &View) -> String {
		let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
		terminal.draw(|frame| draw(frame, board, view)).unwrap();
		let buffer = terminal.backend().buffer();
		let area = buffer.area;
		(0..area.height)
			.map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
			.collect::<Vec<_>>()
			.join("\n")
	}

	#[test]
	fn idle_screen() {
		let board = Board::new(Sequence::from([5, 2, 8]));
		let screen = render(&board, &View::default());
		assert!(screen.contains("Array: [5, 2, 8]"));
		assert!(screen.contains("Length: 3"));
		assert!(screen.contains("Index (-1 for end)"));
		assert!(screen.contains("Run an operation"));
		assert!(screen.contains("Insertion"));
		assert!(screen.contains("a append"));
	}

	#[test]
	fn pending_insert_screen() {
		let board = Board {
			run: RunState::Pending {
				kind: OpKind::InsertAt,
				cursor: 1,
				cell: PendingCell::Incoming { position: 1, value: 7 },
			},
			operation: Some(OpKind::InsertAt),
			..Board::new(Sequence::from([5, 2]))
		};
		let screen = render(&board, &View::default());
		assert!(screen.contains("insert: placing value at 1"));
		assert!(screen.contains("new"));
		assert!(screen.contains("ALGORITHM: Array Insert"));
		assert!(screen.contains("Length: 2"));
	}

	#[test]
	fn status_takes_priority() {
		let board = Board {
			highlight: Some(0),
			..Board::new(Sequence::from([5]))
		};
		let view = View {
			status: Some("array is empty".to_string()),
			..View::default()
		};
		let screen = render(&board, &view);
		assert!(screen.contains("array is empty"));
		assert!(!screen.contains("found at index"));
	}

	#[test]
	fn phase_labels() {
		assert_eq!(phase(&RunState::Idle), None);
		assert_eq!(
			phase(&RunState::Scanning { kind: OpKind::Append, cursor: 2 }).as_deref(),
			Some("append: scanning index 2")
		);
		assert_eq!(
			phase(&RunState::Traversing { cursor: None }).as_deref(),
			Some("traverse")
		);
	}
}
