use std::fmt;

/// The array operations the visualizer can demonstrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Push a generated value onto the end.
	Append,
	/// Remove the last element.
	Pop,
	/// Insert a value at a chosen index.
	InsertAt,
	/// Linear search for a value.
	Search,
	/// Visit every element in order.
	Traverse,
}

impl OpKind {
	/// All kinds, in menu order.
	pub const ALL: [OpKind; 5] = [Self::Append, Self::Pop, Self::InsertAt, Self::Search, Self::Traverse];

	/// Short stable name, used in logs and scripts.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Append => "append",
			Self::Pop => "pop",
			Self::InsertAt => "insert",
			Self::Search => "search",
			Self::Traverse => "traverse",
		}
	}

	/// Whether the operation runs as a paced animation.
	pub const fn is_animated(self) -> bool {
		!matches!(self, Self::Search)
	}

	/// One-line explanation of the concept behind the operation.
	pub const fn explanation(self) -> &'static str {
		match self {
			Self::Append => "Appending (O(1)): directly adds to the end without shifting elements",
			Self::Pop => "Popping (O(1)): removes the last element without index recalculation",
			Self::InsertAt => "Insertion (O(n)): requires shifting all subsequent elements",
			Self::Search => "Linear search (O(n)): checks elements sequentially until found",
			Self::Traverse => "Traversal (O(n)): visits every element exactly once",
		}
	}

	/// Pseudocode listing for the operation.
	pub const fn pseudocode(self) -> &'static str {
		match self {
			Self::Append => {
				"ALGORITHM: Array Push\n\
				 BEGIN\n\
				 \x20 arr[length] = newValue\n\
				 \x20 length = length + 1\n\
				 \x20 RETURN arr\n\
				 END"
			}
			Self::Pop => {
				"ALGORITHM: Array Pop\n\
				 BEGIN\n\
				 \x20 IF length > 0 THEN\n\
				 \x20   length = length - 1\n\
				 \x20   RETURN arr[length]\n\
				 \x20 END IF\n\
				 END"
			}
			Self::InsertAt => {
				"ALGORITHM: Array Insert\n\
				 BEGIN\n\
				 \x20 FOR i = length DOWN TO index DO\n\
				 \x20   arr[i+1] = arr[i]\n\
				 \x20 END FOR\n\
				 \x20 arr[index] = newValue\n\
				 \x20 length = length + 1\n\
				 END"
			}
			Self::Search => {
				"ALGORITHM: Linear Search\n\
				 BEGIN\n\
				 \x20 FOR i = 0 TO length-1 DO\n\
				 \x20   IF arr[i] = target THEN\n\
				 \x20     RETURN i\n\
				 \x20   END IF\n\
				 \x20 END FOR\n\
				 \x20 RETURN -1\n\
				 END"
			}
			Self::Traverse => {
				"ALGORITHM: Array Traversal\n\
				 BEGIN\n\
				 \x20 FOR i = 0 TO length-1 DO\n\
				 \x20   PROCESS arr[i]\n\
				 \x20 END FOR\n\
				 END"
			}
		}
	}
}

impl fmt::Display for OpKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One row of the array time-complexity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityRow {
	pub operation: &'static str,
	pub best: &'static str,
	pub average: &'static str,
	pub worst: &'static str,
}

/// Time complexities of the basic array operations.
pub const COMPLEXITY_TABLE: [ComplexityRow; 4] = [
	ComplexityRow {
		operation: "Access",
		best: "O(1)",
		average: "O(1)",
		worst: "O(1)",
	},
	ComplexityRow {
		operation: "Search",
		best: "O(1)",
		average: "O(n)",
		worst: "O(n)",
	},
	ComplexityRow {
		operation: "Insertion",
		best: "O(1)",
		average: "O(n)",
		worst: "O(n)",
	},
	ComplexityRow {
		operation: "Deletion",
		best: "O(1)",
		average: "O(n)",
		worst: "O(n)",
	},
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pseudocode_keeps_indentation() {
		let lines: Vec<_> = OpKind::Search.pseudocode().lines().collect();
		assert_eq!(lines[0], "ALGORITHM: Linear Search");
		assert_eq!(lines[2], "  FOR i = 0 TO length-1 DO");
		assert_eq!(lines[3], "    IF arr[i] = target THEN");
		assert_eq!(lines.last(), Some(&"END"));
	}

	#[test]
	fn test_only_search_is_synchronous() {
		let sync: Vec<_> = OpKind::ALL.into_iter().filter(|k| !k.is_animated()).collect();
		assert_eq!(sync, vec![OpKind::Search]);
	}
}
