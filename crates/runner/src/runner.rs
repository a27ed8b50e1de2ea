use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use arrayviz_primitives::{InsertRequest, OpKind, Sequence, ValidationError, parse_int};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::board::{Board, InputField, RunState};
use crate::choreography::Choreography;
use crate::pacing::Pacing;
use crate::spawn::spawn_run;
use crate::token::{GenerationClock, RunToken};
use crate::values::ValueSource;

/// Why an animated operation did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
	/// Another run is active.
	Busy,
	/// Nothing to pop.
	Empty,
}

impl fmt::Display for Refusal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Busy => f.write_str("another operation is running"),
			Self::Empty => f.write_str("array is empty"),
		}
	}
}

/// Result of triggering an animated operation.
#[must_use = "a started run keeps going unless its handle is awaited or the runner is shut down"]
#[derive(Debug)]
pub enum Launch<T> {
	Started(RunHandle<T>),
	Refused(Refusal),
}

impl<T> Launch<T> {
	pub fn is_started(&self) -> bool {
		matches!(self, Self::Started(_))
	}

	pub fn refusal(&self) -> Option<Refusal> {
		match self {
			Self::Started(_) => None,
			Self::Refused(refusal) => Some(*refusal),
		}
	}

	pub fn into_handle(self) -> Option<RunHandle<T>> {
		match self {
			Self::Started(handle) => Some(handle),
			Self::Refused(_) => None,
		}
	}
}

/// Handle to a started run.
///
/// Awaiting it yields the run result. For append, pop and insert that is the
/// committed sequence, or `None` when the run was torn down before its
/// commit. Dropping the handle does not stop the run.
#[derive(Debug)]
pub struct RunHandle<T> {
	generation: u64,
	join: JoinHandle<Option<T>>,
}

impl<T> RunHandle<T> {
	/// Generation of the run.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true once the run task has exited.
	pub fn is_finished(&self) -> bool {
		self.join.is_finished()
	}
}

impl<T> Future for RunHandle<T> {
	type Output = Option<T>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		Pin::new(&mut self.get_mut().join).poll(cx).map(|joined| joined.ok().flatten())
	}
}

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraverseEnd {
	/// Every index was visited.
	Completed,
	/// Stopped or torn down part way.
	Cancelled,
}

/// Outcome of a synchronous search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
	/// Lowest index holding the value.
	Found(usize),
	NotFound,
	/// A run was active; nothing changed.
	Refused,
}

impl SearchOutcome {
	/// Index as a signed value, `-1` when not found.
	///
	/// Returns `None` for a refused search.
	pub fn as_sentinel(self) -> Option<i64> {
		match self {
			Self::Found(index) => Some(index as i64),
			Self::NotFound => Some(-1),
			Self::Refused => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finale {
	Completed,
	Interrupted { committed: bool },
}

impl Finale {
	fn committed(self) -> bool {
		matches!(self, Self::Completed | Self::Interrupted { committed: true })
	}
}

struct ActiveRun {
	token: RunToken,
	kind: OpKind,
}

struct Shared {
	board: watch::Sender<Board>,
	/// Slot of the single active run. Locked before the board channel.
	active: Mutex<Option<ActiveRun>>,
	clock: GenerationClock,
	pacing: Pacing,
	values: Mutex<Box<dyn ValueSource>>,
}

impl Shared {
	fn owns(active: &Option<ActiveRun>, token: &RunToken) -> bool {
		!token.is_cancelled() && active.as_ref().is_some_and(|run| run.token.generation() == token.generation())
	}

	/// Applies `apply` to the board if `token` still owns the active slot.
	fn publish(&self, token: &RunToken, apply: impl FnOnce(&mut Board)) -> bool {
		let active = self.active.lock();
		if !Self::owns(&active, token) {
			return false;
		}
		self.board.send_if_modified(|board| {
			let before = board.clone();
			apply(board);
			*board != before
		});
		true
	}

	/// Releases the active slot and resets transient state.
	fn finish(&self, token: &RunToken, kind: OpKind) -> bool {
		let mut active = self.active.lock();
		if !Self::owns(&active, token) {
			return false;
		}
		*active = None;
		self.board.send_modify(|board| {
			board.run = RunState::Idle;
			if kind == OpKind::InsertAt {
				board.inputs.insert_value.clear();
				board.inputs.insert_index.clear();
			}
		});
		tracing::debug!(op = kind.as_str(), generation = token.generation(), "runner.finish");
		true
	}

	fn teardown(&self) {
		let mut active = self.active.lock();
		let Some(run) = active.take() else {
			return;
		};
		run.token.cancel();
		self.board.send_modify(|board| board.run = RunState::Idle);
		tracing::debug!(op = run.kind.as_str(), generation = run.token.generation(), "runner.shutdown");
	}
}

async fn perform(shared: Arc<Shared>, token: RunToken, plan: Choreography) -> Finale {
	let Choreography { kind, beats, result } = plan;
	let mut committed = false;
	for beat in beats {
		let alive = shared.publish(&token, |board| {
			board.run = beat.state;
			if beat.commit {
				board.sequence = result.clone();
			}
		});
		if !alive {
			return Finale::Interrupted { committed };
		}
		if beat.commit {
			committed = true;
			tracing::debug!(op = kind.as_str(), generation = token.generation(), len = result.len(), "runner.commit");
		}
		if !beat.hold.is_zero() && token.pace(beat.hold).await.is_none() {
			return Finale::Interrupted { committed };
		}
	}
	if shared.finish(&token, kind) {
		Finale::Completed
	} else {
		Finale::Interrupted { committed }
	}
}

/// Drives the animated array operations over one shared sequence.
///
/// At most one run is active at a time. Every entry point returns at once;
/// animated operations continue on a spawned task and publish each step to
/// the [`Board`] channel. Dropping the runner tears down the active run.
pub struct Runner {
	shared: Arc<Shared>,
}

impl Runner {
	/// Creates an idle runner over `initial`.
	pub fn new(initial: impl Into<Sequence>, pacing: Pacing, values: impl ValueSource + 'static) -> Self {
		let (board, _) = watch::channel(Board::new(initial.into()));
		Self {
			shared: Arc::new(Shared {
				board,
				active: Mutex::new(None),
				clock: GenerationClock::new(),
				pacing,
				values: Mutex::new(Box::new(values)),
			}),
		}
	}

	/// Pacing used by every run.
	pub fn pacing(&self) -> Pacing {
		self.shared.pacing
	}

	/// Current snapshot.
	pub fn board(&self) -> Board {
		self.shared.board.borrow().clone()
	}

	/// Receiver notified on every board change.
	pub fn subscribe(&self) -> watch::Receiver<Board> {
		self.shared.board.subscribe()
	}

	/// Current sequence.
	pub fn sequence(&self) -> Sequence {
		self.shared.board.borrow().sequence.clone()
	}

	/// Returns true while a run is active.
	pub fn is_busy(&self) -> bool {
		self.shared.active.lock().is_some()
	}

	/// Replaces the text of an input field.
	pub fn set_input(&self, field: InputField, text: impl Into<String>) {
		let text = text.into();
		self.shared.board.send_if_modified(|board| {
			let slot = board.inputs.get_mut(field);
			if *slot == text {
				return false;
			}
			*slot = text;
			true
		});
	}

	/// Edits an input field in place.
	pub fn edit_input(&self, field: InputField, edit: impl FnOnce(&mut String)) {
		self.shared.board.send_if_modified(|board| {
			let slot = board.inputs.get_mut(field);
			let before = slot.clone();
			edit(slot);
			*slot != before
		});
	}

	/// Appends a generated value at the end.
	pub fn append(&self) -> Launch<Sequence> {
		let mut active = self.shared.active.lock();
		if active.is_some() {
			return refuse(OpKind::Append, Refusal::Busy);
		}
		let value = self.shared.values.lock().next_value();
		let plan = Choreography::append(&self.sequence(), value, &self.shared.pacing);
		tracing::debug!(value, "runner.append");
		Launch::Started(self.start(&mut active, plan, committed_sequence))
	}

	/// Removes the last element.
	pub fn pop(&self) -> Launch<Sequence> {
		let mut active = self.shared.active.lock();
		if active.is_some() {
			return refuse(OpKind::Pop, Refusal::Busy);
		}
		let Some(plan) = Choreography::pop(&self.sequence(), &self.shared.pacing) else {
			return refuse(OpKind::Pop, Refusal::Empty);
		};
		Launch::Started(self.start(&mut active, plan, committed_sequence))
	}

	/// Inserts `raw_value` at `raw_index`, where `-1` means the end.
	///
	/// A busy runner refuses before the fields are looked at.
	///
	/// # Errors
	///
	/// Returns a [`ValidationError`] when either field is not an integer or
	/// the index is outside `-1..=len`. Nothing changes in that case.
	pub fn insert_at(&self, raw_index: &str, raw_value: &str) -> Result<Launch<Sequence>, ValidationError> {
		let mut active = self.shared.active.lock();
		if active.is_some() {
			return Ok(refuse(OpKind::InsertAt, Refusal::Busy));
		}
		let sequence = self.sequence();
		let request = InsertRequest::parse(raw_index, raw_value, sequence.len()).inspect_err(|error| {
			tracing::debug!(%error, "runner.invalid");
		})?;
		let plan = Choreography::insert(&sequence, request, &self.shared.pacing);
		tracing::debug!(index = request.index, value = request.value, "runner.insert");
		Ok(Launch::Started(self.start(&mut active, plan, committed_sequence)))
	}

	/// Searches for `raw_value` and highlights the lowest matching index.
	///
	/// Input that is not an integer is reported as not found.
	pub fn search(&self, raw_value: &str) -> SearchOutcome {
		let active = self.shared.active.lock();
		if active.is_some() {
			tracing::debug!(reason = %Refusal::Busy, "runner.refuse");
			return SearchOutcome::Refused;
		}
		let found = parse_int(raw_value).and_then(|value| self.shared.board.borrow().sequence.position(value));
		self.shared.board.send_modify(|board| {
			board.highlight = found;
			board.operation = Some(OpKind::Search);
		});
		drop(active);
		tracing::debug!(?found, "runner.search");
		match found {
			Some(index) => SearchOutcome::Found(index),
			None => SearchOutcome::NotFound,
		}
	}

	/// Removes the search highlight and clears the search field.
	pub fn clear_highlight(&self) {
		self.shared.board.send_if_modified(|board| {
			let changed = board.highlight.is_some() || !board.inputs.search.is_empty();
			board.highlight = None;
			board.inputs.search.clear();
			changed
		});
	}

	/// Visits every element in order until completed or stopped.
	pub fn traverse(&self) -> Launch<TraverseEnd> {
		let mut active = self.shared.active.lock();
		if active.is_some() {
			return refuse(OpKind::Traverse, Refusal::Busy);
		}
		let plan = Choreography::traverse(&self.sequence(), &self.shared.pacing);
		Launch::Started(self.start(&mut active, plan, |finale, _| {
			Some(match finale {
				Finale::Completed => TraverseEnd::Completed,
				Finale::Interrupted { .. } => TraverseEnd::Cancelled,
			})
		}))
	}

	/// Stops an active traversal and resets its cursor at once.
	///
	/// Returns false when no traversal was running.
	pub fn stop_traverse(&self) -> bool {
		let mut active = self.shared.active.lock();
		let Some(run) = active.take_if(|run| run.kind == OpKind::Traverse) else {
			return false;
		};
		run.token.cancel();
		self.shared.board.send_modify(|board| board.run = RunState::Idle);
		tracing::debug!(generation = run.token.generation(), "runner.stop");
		true
	}

	/// Cancels the active run of any kind and resets to idle.
	///
	/// A run torn down after its commit keeps the committed sequence.
	pub fn shutdown(&self) {
		self.shared.teardown();
	}

	fn start<T: Send + 'static>(
		&self,
		active: &mut Option<ActiveRun>,
		plan: Choreography,
		outcome: fn(Finale, Sequence) -> Option<T>,
	) -> RunHandle<T> {
		let kind = plan.kind;
		let generation = self.shared.clock.next();
		let token = RunToken::new(generation);
		*active = Some(ActiveRun {
			token: token.clone(),
			kind,
		});
		let opening = plan.opening();
		self.shared.board.send_modify(|board| {
			board.run = opening;
			board.operation = Some(kind);
		});
		tracing::debug!(op = kind.as_str(), generation, steps = plan.beats.len(), "runner.launch");

		let shared = Arc::clone(&self.shared);
		let result = plan.result.clone();
		let join = spawn_run(kind, generation, async move {
			let finale = perform(shared, token, plan).await;
			outcome(finale, result)
		});
		RunHandle { generation, join }
	}
}

impl Drop for Runner {
	fn drop(&mut self) {
		self.shared.teardown();
	}
}

impl fmt::Debug for Runner {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Runner")
			.field("pacing", &self.shared.pacing)
			.field("busy", &self.is_busy())
			.finish_non_exhaustive()
	}
}

fn committed_sequence(finale: Finale, result: Sequence) -> Option<Sequence> {
	finale.committed().then_some(result)
}

fn refuse<T>(kind: OpKind, refusal: Refusal) -> Launch<T> {
	tracing::debug!(op = kind.as_str(), reason = %refusal, "runner.refuse");
	Launch::Refused(refusal)
}
