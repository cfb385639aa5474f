//! Renderer configuration, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::draw::RenderStyle;
use crate::error::GraphResult;
use crate::layout::{ForceLayout, ForceLayoutParams, HierarchicalLayout, HierarchyParams, Layout};
use crate::renderer::Renderer;

/// Which layout strategy to run when no positions are supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
	/// Layered, dependents above dependencies.
	#[default]
	Hierarchical,
	/// Spring embedder.
	Force,
}

/// Full renderer setup. Every field falls back to its default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
	/// Layout strategy.
	pub layout: LayoutKind,
	/// Drawing style.
	pub style: RenderStyle,
	/// Force layout tuning, used when `layout` is `force`.
	pub force: ForceLayoutParams,
	/// Hierarchical layout settings, used when `layout` is `hierarchical`.
	pub hierarchy: HierarchyParams,
}

impl RenderConfig {
	/// Parses a JSON config document.
	pub fn from_json(json: &str) -> GraphResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// The configured layout strategy.
	pub fn build_layout(&self) -> Box<dyn Layout> {
		match self.layout {
			LayoutKind::Hierarchical => Box::new(HierarchicalLayout::new(self.hierarchy.clone())),
			LayoutKind::Force => Box::new(ForceLayout::new(self.force.clone())),
		}
	}

	/// A renderer with the configured layout and style.
	pub fn renderer(&self) -> Renderer {
		Renderer::new(self.build_layout(), self.style.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attributes::Rgb;
	use crate::error::GraphError;

	#[test]
	fn empty_document_is_all_defaults() {
		assert_eq!(RenderConfig::from_json("{}").unwrap(), RenderConfig::default());
	}

	#[test]
	fn partial_sections_merge_with_defaults() {
		let config = RenderConfig::from_json(
			r##"{
				"layout": "force",
				"style": { "pen": "#102030" },
				"force": { "iterations": 12 }
			}"##,
		)
		.unwrap();
		assert_eq!(config.layout, LayoutKind::Force);
		assert_eq!(config.style.pen, Rgb(0x10, 0x20, 0x30));
		assert_eq!(config.style.node_size, 20.0);
		assert_eq!(config.force.iterations, 12);
		assert_eq!(config.force.damping_factor, ForceLayoutParams::default().damping_factor);
	}

	#[test]
	fn bad_color_is_rejected() {
		let err = RenderConfig::from_json(r#"{ "style": { "pen": "grey" } }"#).unwrap_err();
		assert!(matches!(err, GraphError::Decode(_)));
		assert!(err.to_string().contains("grey"));
	}

	#[test]
	fn unknown_layout_is_rejected() {
		assert!(RenderConfig::from_json(r#"{ "layout": "circular" }"#).is_err());
	}
}
