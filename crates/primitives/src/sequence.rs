use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An ordered, immutable list of integers.
///
/// Every mutation produces a new `Sequence`; values already handed out to
/// renderers never change underneath them. Cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence(Arc<[i32]>);

impl Sequence {
	/// Creates a sequence from any list of values.
	pub fn new(values: impl Into<Vec<i32>>) -> Self {
		Self(values.into().into())
	}

	/// Returns the values as a slice.
	#[inline]
	pub fn as_slice(&self) -> &[i32] {
		&self.0
	}

	/// Returns a new sequence with `value` after the last element.
	pub fn appended(&self, value: i32) -> Self {
		let mut values = Vec::with_capacity(self.len() + 1);
		values.extend_from_slice(&self.0);
		values.push(value);
		Self::new(values)
	}

	/// Returns a new sequence without its last element, along with that element.
	///
	/// Returns `None` for an empty sequence.
	pub fn popped(&self) -> Option<(Self, i32)> {
		let (last, rest) = self.0.split_last()?;
		Some((Self::new(rest), *last))
	}

	/// Returns a new sequence with `value` at `index`, shifting later elements right.
	///
	/// # Panics
	///
	/// Panics if `index > len`, matching [`Vec::insert`].
	pub fn inserted(&self, index: usize, value: i32) -> Self {
		let mut values = self.0.to_vec();
		values.insert(index, value);
		Self::new(values)
	}

	/// Returns the lowest index holding `value`.
	pub fn position(&self, value: i32) -> Option<usize> {
		self.0.iter().position(|&v| v == value)
	}
}

impl Deref for Sequence {
	type Target = [i32];

	fn deref(&self) -> &[i32] {
		&self.0
	}
}

impl From<Vec<i32>> for Sequence {
	fn from(values: Vec<i32>) -> Self {
		Self::new(values)
	}
}

impl From<&[i32]> for Sequence {
	fn from(values: &[i32]) -> Self {
		Self::new(values)
	}
}

impl<const N: usize> From<[i32; N]> for Sequence {
	fn from(values: [i32; N]) -> Self {
		Self::new(values)
	}
}

impl FromIterator<i32> for Sequence {
	fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect::<Vec<_>>())
	}
}

impl PartialEq<[i32]> for Sequence {
	fn eq(&self, other: &[i32]) -> bool {
		self.as_slice() == other
	}
}

impl<const N: usize> PartialEq<[i32; N]> for Sequence {
	fn eq(&self, other: &[i32; N]) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl fmt::Display for Sequence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (i, value) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{value}")?;
		}
		f.write_str("]")
	}
}
