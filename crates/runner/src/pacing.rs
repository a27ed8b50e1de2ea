use std::time::Duration;

/// Real-time delays inserted between the visual steps of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
	/// One scan step of append, pop and insert.
	pub step: Duration,
	/// How long a provisional or fading cell is shown before the commit.
	pub reveal: Duration,
	/// Hold after a commit before transient state is cleared.
	pub settle: Duration,
	/// One traversal step.
	pub traverse: Duration,
}

impl Pacing {
	/// No pauses at all; runs complete on their first poll.
	pub const INSTANT: Self = Self {
		step: Duration::ZERO,
		reveal: Duration::ZERO,
		settle: Duration::ZERO,
		traverse: Duration::ZERO,
	};

	/// Builds pacing from millisecond values.
	pub const fn from_millis(step: u64, reveal: u64, settle: u64, traverse: u64) -> Self {
		Self {
			step: Duration::from_millis(step),
			reveal: Duration::from_millis(reveal),
			settle: Duration::from_millis(settle),
			traverse: Duration::from_millis(traverse),
		}
	}

	/// Multiplies every interval by `factor`.
	///
	/// Negative or non-finite factors leave the pacing unchanged.
	pub fn scaled(self, factor: f64) -> Self {
		if !factor.is_finite() || factor < 0.0 {
			return self;
		}
		let scale = |interval: Duration| Duration::from_nanos((interval.as_nanos() as f64 * factor).round() as u64);
		Self {
			step: scale(self.step),
			reveal: scale(self.reveal),
			settle: scale(self.settle),
			traverse: scale(self.traverse),
		}
	}
}

impl Default for Pacing {
	fn default() -> Self {
		Self::from_millis(300, 500, 300, 500)
	}
}
