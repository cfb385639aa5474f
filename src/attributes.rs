//! Per-node visual attributes: color from state, symbol from node type.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::snapshot::{NodeRecord, NodeState, Snapshot};

/// 8-bit RGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	/// Hex form, e.g. `#2ca02c`.
	pub fn to_hex(self) -> String {
		self.to_string()
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
	}
}

impl FromStr for Rgb {
	type Err = GraphError;

	fn from_str(s: &str) -> GraphResult<Self> {
		let invalid = || GraphError::InvalidColor(s.to_owned());
		let hex = s.strip_prefix('#').ok_or_else(invalid)?;
		if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(invalid());
		}
		let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
		Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
	}
}

impl TryFrom<String> for Rgb {
	type Error = GraphError;

	fn try_from(value: String) -> GraphResult<Self> {
		value.parse()
	}
}

impl From<Rgb> for String {
	fn from(value: Rgb) -> Self {
		value.to_string()
	}
}

/// Node marker shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
	/// Normal, automatically calibrated node.
	Circle,
	/// Manually calibrated node.
	Hexagon,
}

impl Symbol {
	/// Single-character marker code used by plotting backends.
	pub fn marker(self) -> char {
		match self {
			Symbol::Circle => 'o',
			Symbol::Hexagon => 'h',
		}
	}
}

/// Visual attributes of a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeAttributes {
	/// Fill color.
	pub color: Rgb,
	/// Marker shape.
	pub symbol: Symbol,
}

/// Fill color for a state.
pub fn state_color(state: NodeState) -> Rgb {
	match state {
		NodeState::Unknown => Rgb(0x7f, 0x7f, 0x7f),
		NodeState::Active => Rgb(0x1f, 0x77, 0xb4),
		NodeState::Good => Rgb(0x2c, 0xa0, 0x2c),
		NodeState::NeedsCalibration => Rgb(0xff, 0x7f, 0x0e),
		NodeState::Bad => Rgb(0xd6, 0x27, 0x28),
	}
}

/// Marker for a node. Manual-calibration nodes are the only distinction drawn.
pub fn node_symbol(node: &NodeRecord) -> Symbol {
	if node.is_manual_calibration() {
		Symbol::Hexagon
	} else {
		Symbol::Circle
	}
}

/// Attributes keyed by node name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeMap(HashMap<String, NodeAttributes>);

impl AttributeMap {
	/// Attributes of `name`, if present.
	pub fn get(&self, name: &str) -> Option<&NodeAttributes> {
		self.0.get(name)
	}

	/// Attributes of `name`, or [`GraphError::UnknownNode`].
	pub fn lookup(&self, name: &str) -> GraphResult<&NodeAttributes> {
		self.get(name).ok_or_else(|| GraphError::unknown_node(name))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True when empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Entries in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeAttributes)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}
}

/// Derives color and symbol for every node of `snapshot`.
pub fn resolve_attributes(snapshot: &Snapshot) -> AttributeMap {
	AttributeMap(
		snapshot
			.nodes()
			.map(|node| {
				let attrs = NodeAttributes {
					color: state_color(node.state),
					symbol: node_symbol(node),
				};
				(node.name.clone(), attrs)
			})
			.collect(),
	)
}
