use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::trace;
use serde::{Deserialize, Serialize};

use super::{Layout, Point, Positions, placement_edges};
use crate::error::{GraphError, GraphResult};
use crate::topology::GraphTopology;

/// Tuning of the force simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceLayoutParams {
	/// Number of simulation steps.
	pub iterations: u32,
	/// Simulated seconds per step.
	pub time_step: f32,
	/// Radius of the starting circle.
	pub initial_radius: f64,
	/// Node-node repulsion.
	pub force_charge: f32,
	/// Edge spring stiffness.
	pub force_spring: f32,
	/// Upper bound on any single force.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity kept between steps.
	pub damping_factor: f32,
}

impl Default for ForceLayoutParams {
	fn default() -> Self {
		Self {
			iterations: 500,
			time_step: 0.016,
			initial_radius: 100.0,
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// Spring-embedder layout driven by `force_graph`.
///
/// Starts every node on a circle, in topology order, so the result is
/// reproducible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForceLayout {
	/// Simulation tuning.
	pub params: ForceLayoutParams,
}

impl ForceLayout {
	/// Layout with the given tuning.
	pub fn new(params: ForceLayoutParams) -> Self {
		Self { params }
	}
}

impl Layout for ForceLayout {
	fn layout(&self, topology: &GraphTopology) -> GraphResult<Positions> {
		let p = &self.params;
		let mut graph = ForceGraph::<usize, ()>::new(SimulationParameters {
			force_charge: p.force_charge,
			force_spring: p.force_spring,
			force_max: p.force_max,
			node_speed: p.node_speed,
			damping_factor: p.damping_factor,
		});

		let count = topology.node_count();
		let mut indices = Vec::with_capacity(count);
		for i in 0..count {
			let angle = (i as f64) * 2.0 * PI / count as f64;
			let (x, y) = (
				(p.initial_radius * angle.cos()) as f32,
				(p.initial_radius * angle.sin()) as f32,
			);
			indices.push(graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			}));
		}
		for (child, parent) in placement_edges(topology) {
			graph.add_edge(indices[child], indices[parent], EdgeData::default());
		}

		for _ in 0..p.iterations {
			graph.update(p.time_step);
		}
		trace!("force layout ran {} steps over {count} nodes", p.iterations);

		let mut placed = vec![None; count];
		graph.visit_nodes(|node| {
			placed[node.data.user_data] = Some(Point::new(node.x() as f64, node.y() as f64));
		});

		topology
			.nodes()
			.iter()
			.zip(placed)
			.map(|(name, point)| match point {
				Some(point) if point.x.is_finite() && point.y.is_finite() => Ok((name.clone(), point)),
				_ => Err(GraphError::layout(format!(
					"force simulation lost node `{name}`"
				))),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::snapshot::{NodeRecord, NodeState, Snapshot};
	use crate::topology::build_topology;

	fn chain() -> GraphTopology {
		build_topology(&Snapshot::new([
			NodeRecord::new("readout", NodeState::Good).with_parents(["qubit"]),
			NodeRecord::new("qubit", NodeState::Good).with_parents(["resonator", "qubit"]),
			NodeRecord::new("resonator", NodeState::Good),
			NodeRecord::new("flux", NodeState::Unknown).with_parents(["ghost"]),
		]))
	}

	fn quick() -> ForceLayout {
		ForceLayout::new(ForceLayoutParams {
			iterations: 50,
			..Default::default()
		})
	}

	#[test]
	fn places_every_node_in_topology_order() {
		let topology = chain();
		let positions = quick().layout(&topology).unwrap();
		let names: Vec<_> = positions.names().collect();
		assert_eq!(names, ["readout", "qubit", "resonator", "flux"]);
		for (name, p) in positions.iter() {
			assert!(p.x.is_finite() && p.y.is_finite(), "{name} at {p:?}");
		}
	}

	#[test]
	fn is_deterministic() {
		let topology = chain();
		assert_eq!(
			quick().layout(&topology).unwrap(),
			quick().layout(&topology).unwrap()
		);
	}

	#[test]
	fn zero_iterations_keeps_the_start_circle() {
		let layout = ForceLayout::new(ForceLayoutParams {
			iterations: 0,
			initial_radius: 10.0,
			..Default::default()
		});
		let positions = layout.layout(&chain()).unwrap();
		let first = positions.get("readout").unwrap();
		assert!((first.x - 10.0).abs() < 1e-4);
		assert!(first.y.abs() < 1e-4);
	}

	#[test]
	fn empty_topology() {
		assert!(quick().layout(&GraphTopology::default()).unwrap().is_empty());
	}
}
