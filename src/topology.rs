//! Directed dependency topology of a snapshot.

use std::collections::HashSet;

use crate::snapshot::Snapshot;

/// Directed edge from a dependent node to one of its dependencies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	/// The dependent node.
	pub child: String,
	/// The node it depends on.
	pub parent: String,
}

impl Edge {
	/// New edge `child -> parent`.
	pub fn new(child: impl Into<String>, parent: impl Into<String>) -> Self {
		Self {
			child: child.into(),
			parent: parent.into(),
		}
	}

	/// True when a node lists itself as parent.
	pub fn is_self_loop(&self) -> bool {
		self.child == self.parent
	}
}

/// Nodes and dependency edges, without positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphTopology {
	nodes: Vec<String>,
	edges: Vec<Edge>,
}

impl GraphTopology {
	/// Node names in snapshot order.
	pub fn nodes(&self) -> &[String] {
		&self.nodes
	}

	/// Edges in declaration order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Whether `name` is a node (not merely an edge endpoint).
	pub fn contains_node(&self, name: &str) -> bool {
		self.nodes.iter().any(|n| n == name)
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of distinct edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}
}

/// Builds the dependency topology of `snapshot`.
///
/// Parents are not checked against the node set: self-loops and dangling
/// parents come through as ordinary edges.
pub fn build_topology(snapshot: &Snapshot) -> GraphTopology {
	let nodes: Vec<String> = snapshot.nodes().map(|n| n.name.clone()).collect();
	let mut seen = HashSet::new();
	let mut edges = Vec::new();
	for node in snapshot.nodes() {
		for parent in &node.parents {
			let edge = Edge::new(node.name.as_str(), parent.as_str());
			if seen.insert(edge.clone()) {
				edges.push(edge);
			}
		}
	}
	GraphTopology { nodes, edges }
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::snapshot::{NodeRecord, NodeState};

	#[test]
	fn edges_follow_node_then_parent_order() {
		let snapshot = Snapshot::new([
			NodeRecord::new("readout", NodeState::Good).with_parents(["resonator", "qubit"]),
			NodeRecord::new("resonator", NodeState::Good),
			NodeRecord::new("qubit", NodeState::Good).with_parents(["resonator"]),
		]);
		let topology = build_topology(&snapshot);
		assert_eq!(topology.nodes(), ["readout", "resonator", "qubit"]);
		assert_eq!(
			topology.edges(),
			[
				Edge::new("readout", "resonator"),
				Edge::new("readout", "qubit"),
				Edge::new("qubit", "resonator"),
			]
		);
	}

	#[test]
	fn duplicate_parents_collapse() {
		let snapshot = Snapshot::new([
			NodeRecord::new("a", NodeState::Good),
			NodeRecord::new("b", NodeState::Good).with_parents(["a", "a", "a"]),
		]);
		let topology = build_topology(&snapshot);
		assert_eq!(topology.edges(), [Edge::new("b", "a")]);
	}

	#[test]
	fn self_loops_and_dangling_parents_pass_through() {
		let snapshot = Snapshot::new([
			NodeRecord::new("a", NodeState::Good).with_parents(["a", "ghost"]),
		]);
		let topology = build_topology(&snapshot);
		assert_eq!(topology.node_count(), 1);
		assert!(!topology.contains_node("ghost"));
		assert_eq!(
			topology.edges(),
			[Edge::new("a", "a"), Edge::new("a", "ghost")]
		);
		assert!(topology.edges()[0].is_self_loop());
	}

	#[test]
	fn building_twice_is_identical() {
		let snapshot = Snapshot::new([
			NodeRecord::new("x", NodeState::Active).with_parents(["y"]),
			NodeRecord::new("y", NodeState::Unknown),
		]);
		assert_eq!(build_topology(&snapshot), build_topology(&snapshot));
	}

	#[test]
	fn empty_snapshot() {
		let topology = build_topology(&Snapshot::default());
		assert_eq!(topology.node_count(), 0);
		assert_eq!(topology.edge_count(), 0);
	}
}
