use petgraph::Direction;
use petgraph::algo::{condensation, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use super::{Layout, Point, Positions, placement_edges};
use crate::error::{GraphError, GraphResult};
use crate::topology::GraphTopology;

/// Spacing and crossing-reduction settings of the layered layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyParams {
	/// Horizontal distance between neighbours in a rank.
	pub node_separation: f64,
	/// Vertical distance between ranks.
	pub rank_separation: f64,
	/// Barycenter passes (each pass is one down and one up sweep).
	pub sweeps: u32,
}

impl Default for HierarchyParams {
	fn default() -> Self {
		Self {
			node_separation: 72.0,
			rank_separation: 72.0,
			sweeps: 4,
		}
	}
}

/// Layered top-down layout in the manner of graphviz `dot`.
///
/// Dependents sit above their dependencies. Cycles are collapsed so every
/// member of a strongly connected component lands on the same rank.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HierarchicalLayout {
	/// Spacing and sweep settings.
	pub params: HierarchyParams,
}

impl HierarchicalLayout {
	/// Layout with the given settings.
	pub fn new(params: HierarchyParams) -> Self {
		Self { params }
	}
}

impl Layout for HierarchicalLayout {
	fn layout(&self, topology: &GraphTopology) -> GraphResult<Positions> {
		let count = topology.node_count();
		let edges = placement_edges(topology);
		let ranks = assign_ranks(count, &edges)?;
		let max_rank = ranks.iter().copied().max().unwrap_or(0);

		let mut layers: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
		for (node, &rank) in ranks.iter().enumerate() {
			layers[rank].push(node);
		}

		let mut neighbours = vec![Vec::new(); count];
		for &(child, parent) in &edges {
			neighbours[child].push(parent);
			neighbours[parent].push(child);
		}

		let mut x = vec![0.0; count];
		place_layers(&layers, &mut x);
		for _ in 0..self.params.sweeps {
			for r in 1..layers.len() {
				reorder(&mut layers[r], &neighbours, &ranks, &x, |other| other < r);
				place_layers(&layers, &mut x);
			}
			for r in (0..layers.len().saturating_sub(1)).rev() {
				reorder(&mut layers[r], &neighbours, &ranks, &x, |other| other > r);
				place_layers(&layers, &mut x);
			}
		}

		let p = &self.params;
		Ok(topology
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, name)| {
				let y = (max_rank - ranks[i]) as f64 * p.rank_separation;
				(name.clone(), Point::new(x[i] * p.node_separation, y))
			})
			.collect())
	}
}

/// Longest-path rank of every node; rank 0 holds nodes nothing depends on.
fn assign_ranks(count: usize, edges: &[(usize, usize)]) -> GraphResult<Vec<usize>> {
	let mut graph = DiGraph::<usize, ()>::with_capacity(count, edges.len());
	let nodes: Vec<NodeIndex> = (0..count).map(|i| graph.add_node(i)).collect();
	for &(child, parent) in edges {
		graph.update_edge(nodes[child], nodes[parent], ());
	}

	let condensed = condensation(graph, true);
	let order = toposort(&condensed, None)
		.map_err(|cycle| GraphError::layout(format!("cycle left after condensation at {:?}", cycle.node_id())))?;

	let mut component_rank = vec![0; condensed.node_count()];
	let mut ranks = vec![0; count];
	for component in order {
		let rank = condensed
			.neighbors_directed(component, Direction::Incoming)
			.map(|upper| component_rank[upper.index()] + 1)
			.max()
			.unwrap_or(0);
		component_rank[component.index()] = rank;
		for &member in &condensed[component] {
			ranks[member] = rank;
		}
	}
	Ok(ranks)
}

/// Centres each layer on x = 0 with unit spacing.
fn place_layers(layers: &[Vec<usize>], x: &mut [f64]) {
	for layer in layers {
		let offset = (layer.len() as f64 - 1.0) / 2.0;
		for (slot, &node) in layer.iter().enumerate() {
			x[node] = slot as f64 - offset;
		}
	}
}

/// Sorts `layer` by the mean x of neighbours on the ranks `toward` accepts.
fn reorder(
	layer: &mut [usize],
	neighbours: &[Vec<usize>],
	ranks: &[usize],
	x: &[f64],
	toward: impl Fn(usize) -> bool,
) {
	let barycenter = |node: usize| {
		let (sum, n) = neighbours[node]
			.iter()
			.filter(|&&other| toward(ranks[other]))
			.fold((0.0, 0usize), |(sum, n), &other| (sum + x[other], n + 1));
		if n == 0 { x[node] } else { sum / n as f64 }
	};
	let mut keyed: Vec<(f64, usize)> = layer.iter().map(|&node| (barycenter(node), node)).collect();
	keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
	for (slot, (_, node)) in layer.iter_mut().zip(keyed) {
		*slot = node;
	}
}
