//! Browser drawing surfaces.

pub mod graph_view;
