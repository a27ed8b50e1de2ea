//! Step plans for each animated operation.
//!
//! A [`Choreography`] is computed up front from the sequence at launch time.
//! While a run is active no other run can mutate the sequence, so the
//! committed result is known before the first step is shown.

use std::time::Duration;

use arrayviz_primitives::{InsertRequest, OpKind, Sequence};

use crate::board::{PendingCell, RunState};
use crate::pacing::Pacing;

/// One visual step of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Beat {
	/// State published when the beat starts.
	pub state: RunState,
	/// Suspension after publishing.
	pub hold: Duration,
	/// Whether the sequence is replaced by the run result on this beat.
	pub commit: bool,
}

impl Beat {
	fn show(state: RunState, hold: Duration) -> Self {
		Self {
			state,
			hold,
			commit: false,
		}
	}

	fn commit(state: RunState, hold: Duration) -> Self {
		Self { state, hold, commit: true }
	}
}

/// The full plan of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Choreography {
	pub kind: OpKind,
	pub beats: Vec<Beat>,
	/// Sequence after the run.
	pub result: Sequence,
}

impl Choreography {
	/// Scan to the end, reveal `value` past the last cell, commit, settle.
	pub fn append(sequence: &Sequence, value: i32, pacing: &Pacing) -> Self {
		let kind = OpKind::Append;
		let len = sequence.len();
		let mut beats = scan(kind, 0..len, pacing.step);
		beats.push(Beat::show(
			RunState::Pending {
				kind,
				cursor: len,
				cell: PendingCell::Incoming { position: len, value },
			},
			pacing.reveal,
		));
		beats.push(Beat::commit(RunState::Committed { kind, cursor: len }, pacing.settle));
		Self {
			kind,
			beats,
			result: sequence.appended(value),
		}
	}

	/// Scan to the end, fade the last cell, commit straight to idle.
	///
	/// Returns `None` for an empty sequence.
	pub fn pop(sequence: &Sequence, pacing: &Pacing) -> Option<Self> {
		let kind = OpKind::Pop;
		let (result, _) = sequence.popped()?;
		let last = sequence.len() - 1;
		let mut beats = scan(kind, 0..sequence.len(), pacing.step);
		beats.push(Beat::show(
			RunState::Pending {
				kind,
				cursor: last,
				cell: PendingCell::Fading { index: last },
			},
			pacing.reveal,
		));
		beats.push(Beat::commit(RunState::Idle, Duration::ZERO));
		Some(Self { kind, beats, result })
	}

	/// Scan to the target, hold on it, reveal the value there, commit, settle.
	pub fn insert(sequence: &Sequence, request: InsertRequest, pacing: &Pacing) -> Self {
		let kind = OpKind::InsertAt;
		let InsertRequest { index, value } = request;
		let mut beats = scan(kind, 0..index + 1, pacing.step);
		beats.push(Beat::show(
			RunState::Pending {
				kind,
				cursor: index,
				cell: PendingCell::Incoming { position: index, value },
			},
			pacing.reveal,
		));
		beats.push(Beat::commit(RunState::Committed { kind, cursor: index }, pacing.settle));
		Self {
			kind,
			beats,
			result: sequence.inserted(index, value),
		}
	}

	/// Visit every index once.
	pub fn traverse(sequence: &Sequence, pacing: &Pacing) -> Self {
		let beats = (0..sequence.len())
			.map(|cursor| Beat::show(RunState::Traversing { cursor: Some(cursor) }, pacing.traverse))
			.collect();
		Self {
			kind: OpKind::Traverse,
			beats,
			result: sequence.clone(),
		}
	}

	/// State published synchronously when the run is accepted.
	pub fn opening(&self) -> RunState {
		match self.beats.first() {
			Some(beat) => beat.state,
			None => RunState::Traversing { cursor: None },
		}
	}

	/// Sum of all holds.
	#[cfg(test)]
	pub fn duration(&self) -> Duration {
		self.beats.iter().map(|b| b.hold).sum()
	}

	#[cfg(test)]
	pub fn states(&self) -> Vec<RunState> {
		self.beats.iter().map(|b| b.state).collect()
	}
}

fn scan(kind: OpKind, indices: std::ops::Range<usize>, step: Duration) -> Vec<Beat> {
	indices
		.map(|cursor| Beat::show(RunState::Scanning { kind, cursor }, step))
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn ms(n: u64) -> Duration {
		Duration::from_millis(n)
	}

	#[test]
	fn test_append_plan() {
		let seq = Sequence::from([5, 2]);
		let plan = Choreography::append(&seq, 42, &Pacing::default());
		let kind = OpKind::Append;
		assert_eq!(
			plan.states(),
			vec![
				RunState::Scanning { kind, cursor: 0 },
				RunState::Scanning { kind, cursor: 1 },
				RunState::Pending {
					kind,
					cursor: 2,
					cell: PendingCell::Incoming { position: 2, value: 42 },
				},
				RunState::Committed { kind, cursor: 2 },
			]
		);
		assert_eq!(plan.duration(), ms(300 * 2 + 500 + 300));
		assert_eq!(plan.result, [5, 2, 42]);
		assert_eq!(plan.beats.iter().filter(|b| b.commit).count(), 1);
	}

	#[test]
	fn test_append_to_empty_opens_pending() {
		let plan = Choreography::append(&Sequence::default(), 1, &Pacing::default());
		assert!(matches!(plan.opening(), RunState::Pending { cursor: 0, .. }));
	}

	#[test]
	fn test_pop_plan_has_no_trailing_hold() {
		let seq = Sequence::from([1, 2, 3]);
		let plan = Choreography::pop(&seq, &Pacing::default()).unwrap();
		let last = plan.beats.last().unwrap();
		assert!(last.commit);
		assert_eq!(last.state, RunState::Idle);
		assert_eq!(last.hold, Duration::ZERO);
		assert_eq!(plan.duration(), ms(300 * 3 + 500));
		assert_eq!(plan.result, [1, 2]);
	}

	#[test]
	fn test_pop_empty() {
		assert!(Choreography::pop(&Sequence::default(), &Pacing::default()).is_none());
	}

	#[test]
	fn test_insert_plan_holds_on_target() {
		let seq = Sequence::from([5, 2, 8]);
		let plan = Choreography::insert(&seq, InsertRequest { index: 2, value: 7 }, &Pacing::default());
		let kind = OpKind::InsertAt;
		assert_eq!(
			plan.states()[..3].to_vec(),
			vec![
				RunState::Scanning { kind, cursor: 0 },
				RunState::Scanning { kind, cursor: 1 },
				RunState::Scanning { kind, cursor: 2 },
			]
		);
		assert_eq!(plan.duration(), ms(300 * 3 + 500 + 300));
		assert_eq!(plan.result, [5, 2, 7, 8]);
	}

	#[test]
	fn test_insert_front_still_holds_once() {
		let seq = Sequence::from([5, 2, 8]);
		let plan = Choreography::insert(&seq, InsertRequest { index: 0, value: 7 }, &Pacing::default());
		assert_eq!(plan.opening(), RunState::Scanning { kind: OpKind::InsertAt, cursor: 0 });
		assert_eq!(plan.duration(), ms(300 + 500 + 300));
	}

	#[test]
	fn test_traverse_plan() {
		let plan = Choreography::traverse(&Sequence::from([1, 2, 3]), &Pacing::default());
		assert_eq!(plan.beats.len(), 3);
		assert_eq!(plan.duration(), ms(1500));
		assert!(plan.beats.iter().all(|b| !b.commit));
		assert_eq!(
			Choreography::traverse(&Sequence::default(), &Pacing::default()).opening(),
			RunState::Traversing { cursor: None }
		);
	}
}
