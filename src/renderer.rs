//! Snapshot in, draw call out.

use log::debug;

use crate::adjacency::encode_adjacency;
use crate::attributes::resolve_attributes;
use crate::draw::{DrawFrame, DrawSurface, RenderStyle};
use crate::error::GraphResult;
use crate::layout::{Layout, Positions};
use crate::snapshot::Snapshot;
use crate::topology::build_topology;

/// Result of a render call: the positions used and the surface, handed back
/// so the next snapshot can reuse both.
#[derive(Debug)]
pub struct Rendered<S> {
	/// Positions the frame was drawn with.
	pub positions: Positions,
	/// The surface that drew it.
	pub surface: S,
}

/// Composes topology, attributes, layout and adjacency into a draw call.
///
/// Holds configuration only; every call starts from scratch.
pub struct Renderer {
	layout: Box<dyn Layout>,
	style: RenderStyle,
}

impl Renderer {
	/// Renderer with a layout strategy and drawing style.
	pub fn new(layout: impl Layout + 'static, style: RenderStyle) -> Self {
		Self {
			layout: Box::new(layout),
			style,
		}
	}

	/// Drawing style.
	pub fn style(&self) -> &RenderStyle {
		&self.style
	}

	/// Builds the frame for `snapshot`.
	///
	/// `positions`, when given, are used as-is and fix the node ordering;
	/// otherwise the layout runs on the snapshot topology. Every snapshot node
	/// must have a position, or the call fails with
	/// [`GraphError::UnknownNode`](crate::error::GraphError::UnknownNode).
	pub fn frame(
		&self,
		snapshot: &Snapshot,
		positions: Option<Positions>,
	) -> GraphResult<(Positions, DrawFrame)> {
		let topology = build_topology(snapshot);
		let reused = positions.is_some();
		let positions = match positions {
			Some(positions) => positions,
			None => self.layout.layout(&topology)?,
		};
		debug!(
			"rendering {} nodes, {} edges ({} positions)",
			topology.node_count(),
			topology.edge_count(),
			if reused { "reused" } else { "fresh" }
		);

		let ordering = positions.ordering();
		for name in topology.nodes() {
			ordering.index_of(name)?;
		}
		let attributes = resolve_attributes(snapshot);
		let adjacency = encode_adjacency(topology.edges(), &ordering)?;
		let frame = DrawFrame::assemble(&positions, &attributes, adjacency, &self.style)?;
		Ok((positions, frame))
	}

	/// Builds the frame for `snapshot` and draws it on `surface`.
	pub fn render<S: DrawSurface>(
		&self,
		snapshot: &Snapshot,
		positions: Option<Positions>,
		mut surface: S,
	) -> GraphResult<Rendered<S>> {
		let (positions, frame) = self.frame(snapshot, positions)?;
		surface.draw(&frame)?;
		Ok(Rendered { positions, surface })
	}
}

impl std::fmt::Debug for Renderer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Renderer")
			.field("style", &self.style)
			.finish_non_exhaustive()
	}
}
