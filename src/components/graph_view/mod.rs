//! Canvas and live-window renderings of a [`DrawFrame`](crate::DrawFrame).

mod component;
mod render;
mod state;
mod surface;

pub use component::GraphView;
pub use surface::{CanvasSurface, LiveView};
