//! Calibration graph snapshots.
//!
//! The upstream producer wraps every node parameter in a `{"value": ..}`
//! object. That shape is decoded here, once, into flat [`NodeRecord`]s so the
//! rest of the crate never sees it.

use std::collections::HashMap;
use std::fmt;

use log::warn;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::{GraphError, GraphResult};

/// Calibrate function name carried by nodes that must be set by hand.
pub const MANUAL_CALIBRATION: &str = "NotImplementedCalibration";

/// Calibration health of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeState {
	/// Never checked.
	Unknown,
	/// Currently being calibrated.
	Active,
	/// Calibrated and within tolerance.
	Good,
	/// Drifted out of tolerance.
	NeedsCalibration,
	/// Calibration failed.
	Bad,
}

impl NodeState {
	/// All states, in table order.
	pub const ALL: [NodeState; 5] = [
		NodeState::Unknown,
		NodeState::Active,
		NodeState::Good,
		NodeState::NeedsCalibration,
		NodeState::Bad,
	];

	/// Canonical spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeState::Unknown => "unknown",
			NodeState::Active => "active",
			NodeState::Good => "good",
			NodeState::NeedsCalibration => "needs_calibration",
			NodeState::Bad => "bad",
		}
	}

	/// Parses a state for `node`, reporting the node on failure.
	pub fn parse_for(node: &str, value: &str) -> GraphResult<Self> {
		match value {
			"unknown" => Ok(NodeState::Unknown),
			"active" => Ok(NodeState::Active),
			"good" => Ok(NodeState::Good),
			// The producer writes this one with a space.
			"needs calibration" | "needs_calibration" => Ok(NodeState::NeedsCalibration),
			"bad" => Ok(NodeState::Bad),
			other => Err(GraphError::UnknownState {
				node: node.to_owned(),
				value: other.to_owned(),
			}),
		}
	}
}

impl fmt::Display for NodeState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One node of a snapshot, flattened out of the wire shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeRecord {
	/// Unique node name.
	pub name: String,
	/// Calibration health.
	pub state: NodeState,
	/// Name of the routine that calibrates this node.
	pub calibrate_function: String,
	/// Nodes this one depends on, in declaration order.
	pub parents: Vec<String>,
}

impl NodeRecord {
	/// A node with no parents and an empty calibrate function.
	pub fn new(name: impl Into<String>, state: NodeState) -> Self {
		Self {
			name: name.into(),
			state,
			calibrate_function: String::new(),
			parents: Vec::new(),
		}
	}

	/// Sets the calibrate function.
	pub fn with_calibrate_function(mut self, function: impl Into<String>) -> Self {
		self.calibrate_function = function.into();
		self
	}

	/// Marks the node as manually calibrated.
	pub fn manual(self) -> Self {
		self.with_calibrate_function(MANUAL_CALIBRATION)
	}

	/// Sets the parent list.
	pub fn with_parents<I, S>(mut self, parents: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.parents = parents.into_iter().map(Into::into).collect();
		self
	}

	/// True for nodes an operator has to set by hand.
	pub fn is_manual_calibration(&self) -> bool {
		self.calibrate_function == MANUAL_CALIBRATION
	}
}

/// Point-in-time capture of a calibration graph.
///
/// Keeps insertion order. Inserting an existing name replaces the record in
/// place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
	records: Vec<NodeRecord>,
	index: HashMap<String, usize>,
}

impl Snapshot {
	/// Builds a snapshot from records.
	pub fn new(records: impl IntoIterator<Item = NodeRecord>) -> Self {
		records.into_iter().collect()
	}

	/// Decodes the producer's JSON document.
	pub fn from_json(json: &str) -> GraphResult<Self> {
		let raw: RawSnapshot = serde_json::from_str(json)?;
		raw.into_snapshot()
	}

	/// Decodes an already parsed JSON document.
	pub fn from_value(value: serde_json::Value) -> GraphResult<Self> {
		let raw: RawSnapshot = serde_json::from_value(value)?;
		raw.into_snapshot()
	}

	/// Adds or replaces a record.
	pub fn insert(&mut self, record: NodeRecord) {
		match self.index.get(&record.name) {
			Some(&i) => self.records[i] = record,
			None => {
				self.index.insert(record.name.clone(), self.records.len());
				self.records.push(record);
			}
		}
	}

	/// Record by name.
	pub fn get(&self, name: &str) -> Option<&NodeRecord> {
		self.index.get(name).map(|&i| &self.records[i])
	}

	/// Whether `name` is a node of this snapshot.
	pub fn contains(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	/// Records in snapshot order.
	pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
		self.records.iter()
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// True when there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl FromIterator<NodeRecord> for Snapshot {
	fn from_iter<T: IntoIterator<Item = NodeRecord>>(iter: T) -> Self {
		let mut snapshot = Snapshot::default();
		for record in iter {
			snapshot.insert(record);
		}
		snapshot
	}
}

#[derive(Deserialize)]
struct RawSnapshot {
	#[serde(deserialize_with = "ordered_nodes")]
	nodes: Vec<(String, RawNode)>,
}

#[derive(Deserialize)]
struct RawNode {
	#[serde(default)]
	name: Option<String>,
	parameters: RawParameters,
}

#[derive(Deserialize)]
struct RawParameters {
	state: Valued<String>,
	calibrate_function: Valued<String>,
	parents: Valued<Vec<String>>,
}

#[derive(Deserialize)]
struct Valued<T> {
	value: T,
}

impl RawSnapshot {
	fn into_snapshot(self) -> GraphResult<Snapshot> {
		let mut snapshot = Snapshot::default();
		for (key, node) in self.nodes {
			if let Some(inner) = node.name.as_deref().filter(|inner| *inner != key) {
				warn!("snapshot node `{key}` carries name `{inner}`; using the key");
			}
			let state = NodeState::parse_for(&key, &node.parameters.state.value)?;
			snapshot.insert(NodeRecord {
				name: key,
				state,
				calibrate_function: node.parameters.calibrate_function.value,
				parents: node.parameters.parents.value,
			});
		}
		Ok(snapshot)
	}
}

// Collects a JSON object into a Vec so document order survives decoding.
fn ordered_nodes<'de, D>(deserializer: D) -> Result<Vec<(String, RawNode)>, D::Error>
where
	D: Deserializer<'de>,
{
	struct NodesVisitor;

	impl<'de> Visitor<'de> for NodesVisitor {
		type Value = Vec<(String, RawNode)>;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a map from node name to node")
		}

		fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
		where
			A: MapAccess<'de>,
		{
			let mut nodes = Vec::with_capacity(map.size_hint().unwrap_or(0));
			while let Some(entry) = map.next_entry()? {
				nodes.push(entry);
			}
			Ok(nodes)
		}
	}

	deserializer.deserialize_map(NodesVisitor)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn node(state: &str, function: &str, parents: &[&str]) -> serde_json::Value {
		json!({
			"parameters": {
				"state": { "value": state },
				"calibrate_function": { "value": function },
				"parents": { "value": parents },
			}
		})
	}

	#[test]
	fn decodes_nested_value_shape_in_document_order() {
		let doc = json!({
			"nodes": {
				"z_resonator": node("good", "find_resonator", &[]),
				"a_qubit": node("needs calibration", "find_qubit", &["z_resonator"]),
				"m_pulse": node("bad", MANUAL_CALIBRATION, &["a_qubit", "z_resonator"]),
			}
		});
		let snapshot = Snapshot::from_value(doc).unwrap();
		let names: Vec<_> = snapshot.nodes().map(|n| n.name.as_str()).collect();
		assert_eq!(names, ["z_resonator", "a_qubit", "m_pulse"]);

		let pulse = snapshot.get("m_pulse").unwrap();
		assert_eq!(pulse.state, NodeState::Bad);
		assert!(pulse.is_manual_calibration());
		assert_eq!(pulse.parents, ["a_qubit", "z_resonator"]);
		assert_eq!(
			snapshot.get("a_qubit").unwrap().state,
			NodeState::NeedsCalibration
		);
	}

	#[test]
	fn ignores_extra_parameters() {
		let doc = r#"{
			"nodes": {
				"q": {
					"name": "q",
					"parameters": {
						"state": {"value": "active", "unit": ""},
						"calibrate_function": {"value": "cal_q"},
						"parents": {"value": []},
						"calibration_timeout": {"value": 60}
					}
				}
			},
			"graph_name": "demo"
		}"#;
		let snapshot = Snapshot::from_json(doc).unwrap();
		assert_eq!(snapshot.len(), 1);
		assert_eq!(snapshot.get("q").unwrap().state, NodeState::Active);
	}

	#[test]
	fn unknown_state_names_node_and_value() {
		let doc = json!({ "nodes": { "q": node("on fire", "cal_q", &[]) } });
		match Snapshot::from_value(doc) {
			Err(GraphError::UnknownState { node, value }) => {
				assert_eq!(node, "q");
				assert_eq!(value, "on fire");
			}
			other => panic!("expected UnknownState, got {other:?}"),
		}
	}

	#[test]
	fn missing_parameter_is_a_decode_error() {
		let doc = json!({ "nodes": { "q": { "parameters": { "state": { "value": "good" } } } } });
		assert!(matches!(
			Snapshot::from_value(doc),
			Err(GraphError::Decode(_))
		));
	}

	#[test]
	fn state_spellings() {
		for state in NodeState::ALL {
			assert_eq!(NodeState::parse_for("q", state.as_str()).unwrap(), state);
		}
		assert_eq!(
			NodeState::parse_for("q", "needs calibration").unwrap(),
			NodeState::NeedsCalibration
		);
		let err = NodeState::parse_for("q", "Good").unwrap_err();
		assert_eq!(err.to_string(), "unknown state `Good` on node `q`");
	}

	#[test]
	fn reinserting_a_name_keeps_its_slot() {
		let snapshot = Snapshot::new([
			NodeRecord::new("a", NodeState::Unknown),
			NodeRecord::new("b", NodeState::Good),
			NodeRecord::new("a", NodeState::Bad),
		]);
		assert_eq!(snapshot.len(), 2);
		let first = snapshot.nodes().next().unwrap();
		assert_eq!(first.name, "a");
		assert_eq!(first.state, NodeState::Bad);
	}
}
