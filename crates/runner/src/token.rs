use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Monotonic generation clock for run lifecycles.
#[derive(Debug, Default, Clone)]
pub(crate) struct GenerationClock {
	next: Arc<AtomicU64>,
}

impl GenerationClock {
	/// Creates a new generation clock starting at generation 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the next generation ID.
	pub fn next(&self) -> u64 {
		self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}
}

/// Generation-scoped cancellation token owned by one run.
///
/// State writes from a run are only accepted while its generation is the
/// active one, so a token that outlives its run can never touch the board.
#[derive(Debug, Clone)]
pub(crate) struct RunToken {
	generation: u64,
	cancel: CancellationToken,
}

impl RunToken {
	/// Creates a token for `generation`.
	pub(crate) fn new(generation: u64) -> Self {
		Self {
			generation,
			cancel: CancellationToken::new(),
		}
	}

	/// Returns generation ID.
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true when cancellation is requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Requests cancellation, waking any pending [`Self::pace`].
	pub(crate) fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Suspends for one pacing interval.
	///
	/// Returns `None` as soon as the token is cancelled, without waiting for
	/// the interval to elapse.
	pub async fn pace(&self, interval: Duration) -> Option<()> {
		tokio::select! {
			biased;
			_ = self.cancel.cancelled() => None,
			_ = tokio::time::sleep(interval) => Some(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generations_are_monotonic() {
		let clock = GenerationClock::new();
		assert_eq!(clock.next(), 1);
		assert_eq!(clock.next(), 2);
		let shared = clock.clone();
		assert_eq!(shared.next(), 3);
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn test_pace_elapses() {
		let token = RunToken::new(1);
		let start = tokio::time::Instant::now();
		assert_eq!(token.pace(Duration::from_millis(300)).await, Some(()));
		assert!(start.elapsed() >= Duration::from_millis(300));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn test_cancel_releases_pace_immediately() {
		let token = RunToken::new(1);
		let waiter = token.clone();
		let start = tokio::time::Instant::now();
		let pending = tokio::spawn(async move { waiter.pace(Duration::from_secs(60)).await });
		tokio::task::yield_now().await;
		token.cancel();
		assert_eq!(pending.await.unwrap(), None);
		assert!(start.elapsed() < Duration::from_secs(60));
	}
}
