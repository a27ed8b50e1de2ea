use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the values pushed by append.
pub trait ValueSource: Send {
	/// Produces the next value.
	fn next_value(&mut self) -> i32;
}

impl<F> ValueSource for F
where
	F: FnMut() -> i32 + Send,
{
	fn next_value(&mut self) -> i32 {
		self()
	}
}

/// Uniformly random values from an inclusive range.
#[derive(Debug, Clone)]
pub struct RandomValues {
	rng: StdRng,
	range: RangeInclusive<i32>,
}

impl RandomValues {
	/// Default range of generated values.
	pub const DEFAULT_RANGE: RangeInclusive<i32> = 0..=99;

	/// Creates an OS-seeded generator.
	///
	/// # Panics
	///
	/// Panics if `range` is empty.
	pub fn new(range: RangeInclusive<i32>) -> Self {
		assert!(!range.is_empty(), "empty value range");
		Self {
			rng: StdRng::from_os_rng(),
			range,
		}
	}

	/// Creates a deterministic generator.
	///
	/// # Panics
	///
	/// Panics if `range` is empty.
	pub fn seeded(seed: u64, range: RangeInclusive<i32>) -> Self {
		assert!(!range.is_empty(), "empty value range");
		Self {
			rng: StdRng::seed_from_u64(seed),
			range,
		}
	}
}

impl Default for RandomValues {
	fn default() -> Self {
		Self::new(Self::DEFAULT_RANGE)
	}
}

impl ValueSource for RandomValues {
	fn next_value(&mut self) -> i32 {
		self.rng.random_range(self.range.clone())
	}
}
