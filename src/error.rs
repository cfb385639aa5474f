//! Crate-wide error type.

/// Result alias used throughout the crate.
pub type GraphResult<T> = Result<T, GraphError>;

/// Everything that can go wrong between a snapshot and a drawn frame.
#[derive(thiserror::Error, Debug)]
pub enum GraphError {
	/// A node carries a state value outside the fixed state table.
	#[error("unknown state `{value}` on node `{node}`")]
	UnknownState {
		/// Node carrying the state.
		node: String,
		/// The unrecognised state text.
		value: String,
	},

	/// An edge or label names a node that the active ordering does not know.
	#[error("node `{0}` is not part of the node ordering")]
	UnknownNode(String),

	/// An adjacency index points past the end of the node ordering.
	#[error("adjacency index {index} is out of range for {len} nodes")]
	IndexOutOfRange {
		/// Offending index.
		index: usize,
		/// Number of nodes in the ordering.
		len: usize,
	},

	/// A color string is not of the form `#rrggbb`.
	#[error("invalid color `{0}`, expected #rrggbb")]
	InvalidColor(String),

	/// A layout strategy could not place the graph.
	#[error("layout error: {0}")]
	Layout(String),

	/// A draw surface rejected the frame.
	#[error("draw error: {0}")]
	Draw(String),

	/// A snapshot or config document could not be decoded.
	#[error("decode error: {0}")]
	Decode(#[from] serde_json::Error),
}

impl GraphError {
	/// Shorthand for [`GraphError::UnknownNode`].
	pub fn unknown_node(name: impl Into<String>) -> Self {
		Self::UnknownNode(name.into())
	}

	/// Shorthand for [`GraphError::Layout`].
	pub fn layout(msg: impl Into<String>) -> Self {
		Self::Layout(msg.into())
	}

	/// Shorthand for [`GraphError::Draw`].
	pub fn draw(msg: impl Into<String>) -> Self {
		Self::Draw(msg.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_names_the_offender() {
		let err = GraphError::UnknownState {
			node: "qubit_freq".into(),
			value: "exploded".into(),
		};
		assert_eq!(err.to_string(), "unknown state `exploded` on node `qubit_freq`");
		assert!(GraphError::unknown_node("ghost").to_string().contains("`ghost`"));
		assert!(GraphError::layout("x").to_string().starts_with("layout error:"));
		assert!(GraphError::draw("x").to_string().starts_with("draw error:"));
	}

	#[test]
	fn decode_wraps_serde_errors() {
		let base = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let err = GraphError::from(base);
		assert!(matches!(err, GraphError::Decode(_)));
		assert!(err.to_string().starts_with("decode error:"));
	}
}
