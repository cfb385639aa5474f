//! Layout capability: topology in, 2D positions out.

mod force;
mod hierarchy;

pub use force::{ForceLayout, ForceLayoutParams};
pub use hierarchy::{HierarchicalLayout, HierarchyParams};

use std::collections::HashMap;

use crate::adjacency::NodeOrdering;
use crate::error::GraphResult;
use crate::topology::GraphTopology;

/// World-space coordinate. Y grows upward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// New point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Ordered mapping from node name to position.
///
/// The key order is the node ordering used for every array handed to a draw
/// surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Positions {
	entries: Vec<(String, Point)>,
	index: HashMap<String, usize>,
}

impl Positions {
	/// Sets the position of `name`, appending it if new.
	pub fn insert(&mut self, name: impl Into<String>, point: Point) {
		let name = name.into();
		match self.index.get(&name) {
			Some(&i) => self.entries[i].1 = point,
			None => {
				self.index.insert(name.clone(), self.entries.len());
				self.entries.push((name, point));
			}
		}
	}

	/// Position of `name`.
	pub fn get(&self, name: &str) -> Option<Point> {
		self.index.get(name).map(|&i| self.entries[i].1)
	}

	/// Entries in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
		self.entries.iter().map(|(n, p)| (n.as_str(), *p))
	}

	/// Names in key order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(n, _)| n.as_str())
	}

	/// Points in key order.
	pub fn points(&self) -> Vec<Point> {
		self.entries.iter().map(|(_, p)| *p).collect()
	}

	/// Node ordering fixed by the key order.
	pub fn ordering(&self) -> NodeOrdering {
		NodeOrdering::new(self.names())
	}

	/// Number of positioned nodes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when nothing is positioned.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<S: Into<String>> FromIterator<(S, Point)> for Positions {
	fn from_iter<T: IntoIterator<Item = (S, Point)>>(iter: T) -> Self {
		let mut positions = Positions::default();
		for (name, point) in iter {
			positions.insert(name, point);
		}
		positions
	}
}

/// Assigns a position to every node of a topology.
///
/// Implementations return positions in topology node order and ignore edges
/// whose endpoints are not nodes of the topology.
pub trait Layout {
	/// Places `topology`.
	fn layout(&self, topology: &GraphTopology) -> GraphResult<Positions>;
}

impl<L: Layout + ?Sized> Layout for Box<L> {
	fn layout(&self, topology: &GraphTopology) -> GraphResult<Positions> {
		(**self).layout(topology)
	}
}

impl<L: Layout + ?Sized> Layout for &L {
	fn layout(&self, topology: &GraphTopology) -> GraphResult<Positions> {
		(**self).layout(topology)
	}
}

/// Edges usable for placement, as index pairs into `topology.nodes()`.
///
/// Drops self-loops and edges that reach outside the node set.
fn placement_edges(topology: &GraphTopology) -> Vec<(usize, usize)> {
	let index: HashMap<&str, usize> = topology
		.nodes()
		.iter()
		.enumerate()
		.map(|(i, n)| (n.as_str(), i))
		.collect();
	topology
		.edges()
		.iter()
		.filter_map(|edge| {
			match (index.get(edge.child.as_str()), index.get(edge.parent.as_str())) {
				(Some(&c), Some(&p)) if c != p => Some((c, p)),
				(Some(_), Some(_)) => {
					log::debug!("layout ignores self-loop on `{}`", edge.child);
					None
				}
				_ => {
					log::warn!(
						"layout ignores edge `{}` -> `{}` with an endpoint outside the graph",
						edge.child,
						edge.parent
					);
					None
				}
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::snapshot::{NodeRecord, NodeState, Snapshot};
	use crate::topology::build_topology;

	#[test]
	fn positions_keep_insertion_order_and_overwrite_in_place() {
		let mut positions: Positions = [("b", Point::new(1.0, 1.0)), ("a", Point::new(0.0, 0.0))]
			.into_iter()
			.collect();
		positions.insert("b", Point::new(5.0, 5.0));
		assert_eq!(positions.names().collect::<Vec<_>>(), ["b", "a"]);
		assert_eq!(positions.get("b"), Some(Point::new(5.0, 5.0)));
		assert_eq!(positions.ordering().index_of("a").unwrap(), 1);
	}

	#[test]
	fn placement_edges_skip_loops_and_dangling() {
		let snapshot = Snapshot::new([
			NodeRecord::new("a", NodeState::Good).with_parents(["a", "ghost", "b"]),
			NodeRecord::new("b", NodeState::Good),
		]);
		let topology = build_topology(&snapshot);
		assert_eq!(placement_edges(&topology), [(0, 1)]);
	}
}
