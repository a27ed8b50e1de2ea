//! Observable snapshot of the visualizer: sequence, run state, highlight and inputs.

use arrayviz_primitives::{OpKind, Sequence};

/// A provisional cell shown while a run is pending its commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCell {
	/// A value about to be placed at `position`.
	Incoming { position: usize, value: i32 },
	/// The element at `index` fading out before removal.
	Fading { index: usize },
}

/// State of the single active run.
///
/// Everything except [`RunState::Idle`] counts as busy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
	#[default]
	Idle,
	/// Walking the cursor towards the target position.
	Scanning { kind: OpKind, cursor: usize },
	/// Showing the provisional change before it is committed.
	Pending { kind: OpKind, cursor: usize, cell: PendingCell },
	/// The change is in the sequence; holding before reset.
	Committed { kind: OpKind, cursor: usize },
	/// Visiting elements in order. `cursor` is `None` before the first step.
	Traversing { cursor: Option<usize> },
}

impl RunState {
	/// Returns true for every state except `Idle`.
	pub const fn is_busy(&self) -> bool {
		!matches!(self, Self::Idle)
	}

	/// Returns true while a traversal is running.
	pub const fn is_traversing(&self) -> bool {
		matches!(self, Self::Traversing { .. })
	}

	/// Operation kind of the run, if any.
	pub const fn kind(&self) -> Option<OpKind> {
		match *self {
			Self::Idle => None,
			Self::Scanning { kind, .. } | Self::Pending { kind, .. } | Self::Committed { kind, .. } => Some(kind),
			Self::Traversing { .. } => Some(OpKind::Traverse),
		}
	}

	/// Currently highlighted index of the scan or traversal cursor.
	pub const fn cursor(&self) -> Option<usize> {
		match *self {
			Self::Idle => None,
			Self::Scanning { cursor, .. } | Self::Pending { cursor, .. } | Self::Committed { cursor, .. } => Some(cursor),
			Self::Traversing { cursor } => cursor,
		}
	}

	/// Provisional cell, if one is shown.
	pub const fn pending(&self) -> Option<PendingCell> {
		match *self {
			Self::Pending { cell, .. } => Some(cell),
			_ => None,
		}
	}

	/// Value not yet committed to the sequence.
	pub const fn pending_value(&self) -> Option<i32> {
		match self.pending() {
			Some(PendingCell::Incoming { value, .. }) => Some(value),
			_ => None,
		}
	}

	/// Target position of a pending value.
	pub const fn pending_position(&self) -> Option<usize> {
		match self.pending() {
			Some(PendingCell::Incoming { position, .. }) => Some(position),
			_ => None,
		}
	}
}

/// One of the three text fields of the visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
	InsertValue,
	InsertIndex,
	Search,
}

impl InputField {
	/// All fields, in focus order.
	pub const ALL: [InputField; 3] = [Self::InsertValue, Self::InsertIndex, Self::Search];

	/// Placeholder label.
	pub const fn label(self) -> &'static str {
		match self {
			Self::InsertValue => "Value",
			Self::InsertIndex => "Index (-1 for end)",
			Self::Search => "Search value",
		}
	}

	/// Next field in focus order, wrapping.
	pub const fn next(self) -> Self {
		match self {
			Self::InsertValue => Self::InsertIndex,
			Self::InsertIndex => Self::Search,
			Self::Search => Self::InsertValue,
		}
	}

	/// Previous field in focus order, wrapping.
	pub const fn prev(self) -> Self {
		match self {
			Self::InsertValue => Self::Search,
			Self::InsertIndex => Self::InsertValue,
			Self::Search => Self::InsertIndex,
		}
	}
}

/// Raw text of the input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
	pub insert_value: String,
	pub insert_index: String,
	pub search: String,
}

impl Inputs {
	pub fn get(&self, field: InputField) -> &str {
		match field {
			InputField::InsertValue => &self.insert_value,
			InputField::InsertIndex => &self.insert_index,
			InputField::Search => &self.search,
		}
	}

	pub fn get_mut(&mut self, field: InputField) -> &mut String {
		match field {
			InputField::InsertValue => &mut self.insert_value,
			InputField::InsertIndex => &mut self.insert_index,
			InputField::Search => &mut self.search,
		}
	}
}

/// How a cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
	Plain,
	/// Under the scan cursor of append, pop or insert.
	Cursor,
	/// Provisional value not yet in the sequence.
	Incoming,
	/// Element about to be removed.
	Fading,
	/// Under the traversal cursor.
	Traversal,
	/// Search hit.
	Highlight,
}

/// A drawable cell. `index` is `None` for a provisional cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
	pub index: Option<usize>,
	pub value: i32,
	pub role: CellRole,
}

/// Everything a renderer needs, published as one consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
	pub sequence: Sequence,
	pub run: RunState,
	/// Index found by the last search.
	pub highlight: Option<usize>,
	/// Last operation triggered, drives the teaching panels.
	pub operation: Option<OpKind>,
	pub inputs: Inputs,
}

impl Board {
	/// Creates an idle board over `sequence`.
	pub fn new(sequence: Sequence) -> Self {
		Self {
			sequence,
			..Self::default()
		}
	}

	/// Role of the sequence element at `index`.
	///
	/// Scan cursor wins over traversal, which wins over the search highlight.
	pub fn role_of(&self, index: usize) -> CellRole {
		if let Some(PendingCell::Fading { index: fading }) = self.run.pending()
			&& fading == index
		{
			return CellRole::Fading;
		}
		match self.run {
			RunState::Scanning { cursor, .. } | RunState::Pending { cursor, .. } | RunState::Committed { cursor, .. }
				if cursor == index =>
			{
				CellRole::Cursor
			}
			RunState::Traversing { cursor: Some(cursor) } if cursor == index => CellRole::Traversal,
			_ if self.highlight == Some(index) => CellRole::Highlight,
			_ => CellRole::Plain,
		}
	}

	/// Cells in display order, with any provisional value placed at its target position.
	pub fn cells(&self) -> Vec<CellView> {
		let incoming = match self.run.pending() {
			Some(PendingCell::Incoming { position, value }) => Some((position, value)),
			_ => None,
		};
		let mut cells = Vec::with_capacity(self.sequence.len() + 1);
		for (index, &value) in self.sequence.iter().enumerate() {
			if let Some((position, pending)) = incoming
				&& position == index
			{
				cells.push(CellView {
					index: None,
					value: pending,
					role: CellRole::Incoming,
				});
			}
			cells.push(CellView {
				index: Some(index),
				value,
				role: self.role_of(index),
			});
		}
		if let Some((position, pending)) = incoming
			&& position >= self.sequence.len()
		{
			cells.push(CellView {
				index: None,
				value: pending,
				role: CellRole::Incoming,
			});
		}
		cells
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn board(values: &[i32], run: RunState) -> Board {
		Board {
			run,
			..Board::new(Sequence::from(values))
		}
	}

	#[test]
	fn test_idle_is_not_busy() {
		assert!(!RunState::Idle.is_busy());
		assert!(RunState::Traversing { cursor: None }.is_busy());
		assert_eq!(RunState::Traversing { cursor: None }.kind(), Some(OpKind::Traverse));
	}

	#[test]
	fn test_incoming_cell_at_end() {
		let b = board(
			&[1, 2],
			RunState::Pending {
				kind: OpKind::Append,
				cursor: 2,
				cell: PendingCell::Incoming { position: 2, value: 9 },
			},
		);
		let values: Vec<_> = b.cells().iter().map(|c| (c.value, c.role)).collect();
		assert_eq!(values, vec![(1, CellRole::Plain), (2, CellRole::Plain), (9, CellRole::Incoming)]);
	}

	#[test]
	fn test_incoming_cell_mid_sequence() {
		let b = board(
			&[1, 2, 3],
			RunState::Pending {
				kind: OpKind::InsertAt,
				cursor: 1,
				cell: PendingCell::Incoming { position: 1, value: 7 },
			},
		);
		let cells = b.cells();
		assert_eq!(cells.len(), 4);
		assert_eq!(cells[1], CellView { index: None, value: 7, role: CellRole::Incoming });
		assert_eq!(cells[2], CellView { index: Some(1), value: 2, role: CellRole::Cursor });
	}

	#[test]
	fn test_fading_wins_over_cursor() {
		let b = board(
			&[4, 5],
			RunState::Pending {
				kind: OpKind::Pop,
				cursor: 1,
				cell: PendingCell::Fading { index: 1 },
			},
		);
		assert_eq!(b.role_of(1), CellRole::Fading);
		assert_eq!(b.role_of(0), CellRole::Plain);
	}

	#[test]
	fn test_traversal_wins_over_highlight() {
		let mut b = board(&[4, 5], RunState::Traversing { cursor: Some(0) });
		b.highlight = Some(0);
		assert_eq!(b.role_of(0), CellRole::Traversal);
		b.run = RunState::Idle;
		assert_eq!(b.role_of(0), CellRole::Highlight);
	}

	#[test]
	fn test_input_focus_cycles() {
		for field in InputField::ALL {
			assert_eq!(field.next().prev(), field);
		}
		assert_eq!(InputField::Search.next(), InputField::InsertValue);
	}
}
