//! Calibration dependency graphs, from snapshot to drawn frame.
//!
//! A [`Snapshot`] becomes a [`GraphTopology`], an [`AttributeMap`] and an
//! integer adjacency list; a [`Layout`] places the nodes and a [`DrawSurface`]
//! paints them. [`Renderer`] runs the whole chain.

use log::{Level, info};

pub mod adjacency;
pub mod attributes;
pub mod components;
pub mod config;
pub mod draw;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod snapshot;
pub mod topology;

pub use adjacency::{AdjacencyPair, NodeOrdering, decode_adjacency, encode_adjacency};
pub use attributes::{AttributeMap, NodeAttributes, Rgb, Symbol, resolve_attributes};
pub use components::graph_view::{CanvasSurface, GraphView, LiveView};
pub use config::{LayoutKind, RenderConfig};
pub use draw::{DrawFrame, DrawSurface, RenderStyle};
pub use error::{GraphError, GraphResult};
pub use layout::{
	ForceLayout, ForceLayoutParams, HierarchicalLayout, HierarchyParams, Layout, Point, Positions,
};
pub use renderer::{Rendered, Renderer};
pub use snapshot::{MANUAL_CALIBRATION, NodeRecord, NodeState, Snapshot};
pub use topology::{Edge, GraphTopology, build_topology};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}
