//! Integer adjacency encoding for array-based drawing backends.

use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};
use crate::topology::Edge;

/// `[child_index, parent_index]`.
pub type AdjacencyPair = [usize; 2];

/// Fixed node order giving each name an array index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeOrdering {
	names: Vec<String>,
	index: HashMap<String, usize>,
}

impl NodeOrdering {
	/// Ordering over `names`. A repeated name keeps its first index.
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let names: Vec<String> = names.into_iter().map(Into::into).collect();
		let mut index = HashMap::with_capacity(names.len());
		for (i, name) in names.iter().enumerate() {
			index.entry(name.clone()).or_insert(i);
		}
		Self { names, index }
	}

	/// Index of `name`, or [`GraphError::UnknownNode`].
	pub fn index_of(&self, name: &str) -> GraphResult<usize> {
		self.index
			.get(name)
			.copied()
			.ok_or_else(|| GraphError::unknown_node(name))
	}

	/// Name at `index`, or [`GraphError::IndexOutOfRange`].
	pub fn name_at(&self, index: usize) -> GraphResult<&str> {
		self.names
			.get(index)
			.map(String::as_str)
			.ok_or(GraphError::IndexOutOfRange {
				index,
				len: self.names.len(),
			})
	}

	/// Names in index order.
	pub fn names(&self) -> &[String] {
		&self.names
	}

	/// Number of positions.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// True when empty.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

/// Encodes `edges` as index pairs over `ordering`, keeping edge order.
pub fn encode_adjacency(edges: &[Edge], ordering: &NodeOrdering) -> GraphResult<Vec<AdjacencyPair>> {
	edges
		.iter()
		.map(|edge| Ok([ordering.index_of(&edge.child)?, ordering.index_of(&edge.parent)?]))
		.collect()
}

/// Resolves index pairs back to edges.
pub fn decode_adjacency(adjacency: &[AdjacencyPair], ordering: &NodeOrdering) -> GraphResult<Vec<Edge>> {
	adjacency
		.iter()
		.map(|&[child, parent]| Ok(Edge::new(ordering.name_at(child)?, ordering.name_at(parent)?)))
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn encodes_against_supplied_order() {
		let ordering = NodeOrdering::new(["A", "B"]);
		let adj = encode_adjacency(&[Edge::new("B", "A")], &ordering).unwrap();
		assert_eq!(adj, vec![[1, 0]]);
	}

	#[test]
	fn ordering_decides_indices_not_edges() {
		let edges = [Edge::new("q", "r"), Edge::new("p", "r"), Edge::new("p", "q")];
		let forward = NodeOrdering::new(["p", "q", "r"]);
		let reverse = NodeOrdering::new(["r", "q", "p"]);
		assert_eq!(
			encode_adjacency(&edges, &forward).unwrap(),
			vec![[1, 2], [0, 2], [0, 1]]
		);
		assert_eq!(
			encode_adjacency(&edges, &reverse).unwrap(),
			vec![[1, 0], [2, 0], [2, 1]]
		);
	}

	#[test]
	fn round_trip_restores_names() {
		let edges = vec![
			Edge::new("readout", "resonator"),
			Edge::new("qubit", "resonator"),
			Edge::new("readout", "qubit"),
			Edge::new("qubit", "qubit"),
		];
		let ordering = NodeOrdering::new(["qubit", "readout", "resonator"]);
		let adj = encode_adjacency(&edges, &ordering).unwrap();
		assert_eq!(decode_adjacency(&adj, &ordering).unwrap(), edges);
	}

	#[test]
	fn missing_endpoint_is_unknown_node() {
		let ordering = NodeOrdering::new(["a"]);
		let err = encode_adjacency(&[Edge::new("a", "ghost")], &ordering).unwrap_err();
		assert!(matches!(err, GraphError::UnknownNode(n) if n == "ghost"));
	}

	#[test]
	fn repeated_name_keeps_first_index() {
		let ordering = NodeOrdering::new(["a", "b", "a"]);
		assert_eq!(ordering.index_of("a").unwrap(), 0);
		assert_eq!(ordering.len(), 3);
	}

	#[test]
	fn decode_rejects_out_of_range() {
		let ordering = NodeOrdering::new(["a"]);
		assert!(matches!(
			decode_adjacency(&[[0, 3]], &ordering),
			Err(GraphError::IndexOutOfRange { index: 3, len: 1 })
		));
	}

	#[test]
	fn no_edges_no_pairs() {
		assert!(encode_adjacency(&[], &NodeOrdering::default()).unwrap().is_empty());
	}
}
