//! Draw capability: the per-call bundle handed to a drawing backend.

use serde::{Deserialize, Serialize};

use crate::adjacency::AdjacencyPair;
use crate::attributes::{AttributeMap, Rgb, Symbol};
use crate::error::GraphResult;
use crate::layout::{Point, Positions};

/// Backend-independent drawing settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
	/// Node diameter in world units.
	pub node_size: f64,
	/// Edge and node outline color.
	pub pen: Rgb,
	/// Label text color.
	pub label_color: Rgb,
	/// Canvas fill.
	pub background: Rgb,
	/// Label font size in screen pixels.
	pub font_px: f64,
}

impl Default for RenderStyle {
	fn default() -> Self {
		Self {
			node_size: 20.0,
			pen: Rgb(60, 60, 60),
			label_color: Rgb(20, 20, 20),
			background: Rgb(255, 255, 255),
			font_px: 11.0,
		}
	}
}

/// Everything one draw call needs. All per-node vectors share one ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawFrame {
	/// Node positions.
	pub positions: Vec<Point>,
	/// Node fill colors.
	pub colors: Vec<Rgb>,
	/// Node markers.
	pub symbols: Vec<Symbol>,
	/// Node labels; also the node ordering itself.
	pub labels: Vec<String>,
	/// Edges as `[child, parent]` indices into the vectors above.
	pub adjacency: Vec<AdjacencyPair>,
	/// Edge and outline color.
	pub pen: Rgb,
	/// Node diameter in world units.
	pub node_size: f64,
}

impl DrawFrame {
	/// Lines up positions and attributes in the key order of `positions`.
	///
	/// Fails with [`crate::GraphError::UnknownNode`] when a positioned node has
	/// no attributes.
	pub fn assemble(
		positions: &Positions,
		attributes: &AttributeMap,
		adjacency: Vec<AdjacencyPair>,
		style: &RenderStyle,
	) -> GraphResult<Self> {
		let mut colors = Vec::with_capacity(positions.len());
		let mut symbols = Vec::with_capacity(positions.len());
		for name in positions.names() {
			let attrs = attributes.lookup(name)?;
			colors.push(attrs.color);
			symbols.push(attrs.symbol);
		}
		Ok(Self {
			positions: positions.points(),
			colors,
			symbols,
			labels: positions.names().map(str::to_owned).collect(),
			adjacency,
			pen: style.pen,
			node_size: style.node_size,
		})
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.labels.len()
	}

	/// True when the frame has no nodes.
	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}

	/// Smallest box holding every node centre, as `(min, max)`.
	pub fn bounds(&self) -> Option<(Point, Point)> {
		let first = *self.positions.first()?;
		Some(self.positions.iter().fold((first, first), |(lo, hi), p| {
			(
				Point::new(lo.x.min(p.x), lo.y.min(p.y)),
				Point::new(hi.x.max(p.x), hi.y.max(p.y)),
			)
		}))
	}
}

/// A drawing backend. It receives one frame per render call.
pub trait DrawSurface {
	/// Draws `frame`, replacing whatever the surface showed before.
	fn draw(&mut self, frame: &DrawFrame) -> GraphResult<()>;
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
	fn draw(&mut self, frame: &DrawFrame) -> GraphResult<()> {
		(**self).draw(frame)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::attributes::resolve_attributes;
	use crate::error::GraphError;
	use crate::snapshot::{NodeRecord, NodeState, Snapshot};

	fn snapshot() -> Snapshot {
		Snapshot::new([
			NodeRecord::new("A", NodeState::Good),
			NodeRecord::new("B", NodeState::Bad).manual().with_parents(["A"]),
		])
	}

	#[test]
	fn vectors_follow_position_order() {
		let positions: Positions = [("B", Point::new(0.0, 1.0)), ("A", Point::new(2.0, -1.0))]
			.into_iter()
			.collect();
		let frame = DrawFrame::assemble(
			&positions,
			&resolve_attributes(&snapshot()),
			vec![[0, 1]],
			&RenderStyle::default(),
		)
		.unwrap();
		assert_eq!(frame.labels, ["B", "A"]);
		assert_eq!(frame.colors, [Rgb(0xd6, 0x27, 0x28), Rgb(0x2c, 0xa0, 0x2c)]);
		assert_eq!(frame.symbols, [Symbol::Hexagon, Symbol::Circle]);
		assert_eq!(frame.pen, Rgb(60, 60, 60));
		assert_eq!(frame.node_size, 20.0);
		assert_eq!(
			frame.bounds(),
			Some((Point::new(0.0, -1.0), Point::new(2.0, 1.0)))
		);
	}

	#[test]
	fn label_without_attributes_is_unknown_node() {
		let positions: Positions = [("A", Point::default()), ("Z", Point::default())]
			.into_iter()
			.collect();
		let err = DrawFrame::assemble(
			&positions,
			&resolve_attributes(&snapshot()),
			Vec::new(),
			&RenderStyle::default(),
		)
		.unwrap_err();
		assert!(matches!(err, GraphError::UnknownNode(n) if n == "Z"));
	}

	#[test]
	fn style_fills_missing_fields_from_defaults() {
		let style: RenderStyle = serde_json::from_str(r##"{"node_size": 30.0, "pen": "#000000"}"##).unwrap();
		assert_eq!(style.node_size, 30.0);
		assert_eq!(style.pen, Rgb(0, 0, 0));
		assert_eq!(style.font_px, RenderStyle::default().font_px);
	}
}
