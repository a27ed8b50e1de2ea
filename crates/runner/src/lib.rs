#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Animated operation runner.
//!
//! A [`Runner`] owns one integer [`Sequence`](arrayviz_primitives::Sequence)
//! and plays array operations against it as paced, step-by-step runs:
//!
//! ```text
//! append / pop / insert:  Idle -> Scanning(i) -> Pending -> Committed -> Idle
//! traverse:               Idle -> Traversing(i) -> Idle
//! ```
//!
//! Each run is one task on the Tokio runtime owning a generation-scoped
//! cancellation token. Board writes from a run are checked against the active
//! generation, so stopping a traversal or shutting the runner down takes
//! effect immediately and no stale step lands afterwards.
//!
//! Observers read [`Board`] snapshots through [`Runner::subscribe`].

mod board;
mod choreography;
mod pacing;
mod runner;
mod spawn;
mod token;
mod values;

pub use board::{Board, CellRole, CellView, InputField, Inputs, PendingCell, RunState};
pub use pacing::Pacing;
pub use runner::{Launch, Refusal, RunHandle, Runner, SearchOutcome, TraverseEnd};
pub use values::{RandomValues, ValueSource};
