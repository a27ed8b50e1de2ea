//! Core value types for arrayviz: sequences, operation kinds and input parsing.

/// Raw input parsing and validation errors.
pub mod input;
/// Operation kinds and the static teaching text attached to them.
pub mod op;
/// Copy-on-write integer sequence.
pub mod sequence;

pub use input::{InsertRequest, ValidationError, parse_int};
pub use op::{COMPLEXITY_TABLE, ComplexityRow, OpKind};
pub use sequence::Sequence;
