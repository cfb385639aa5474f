use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::component::GraphView;
use super::render;
use super::state::ViewTransform;
use crate::draw::{DrawFrame, DrawSurface, RenderStyle};
use crate::error::{GraphError, GraphResult};

/// Static plot: paints each frame once onto a canvas, fitted to its size.
pub struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
	style: RenderStyle,
}

impl CanvasSurface {
	/// Surface over the 2D context of `canvas`.
	pub fn from_canvas(canvas: &HtmlCanvasElement, style: RenderStyle) -> GraphResult<Self> {
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| GraphError::draw(format!("canvas context: {e:?}")))?
			.ok_or_else(|| GraphError::draw("canvas has no 2d context"))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| GraphError::draw("2d context has an unexpected type"))?;
		Ok(Self {
			ctx,
			width: canvas.width() as f64,
			height: canvas.height() as f64,
			style,
		})
	}
}

impl DrawSurface for CanvasSurface {
	fn draw(&mut self, frame: &DrawFrame) -> GraphResult<()> {
		let transform = ViewTransform::fit(frame, self.width, self.height);
		render::render(frame, &self.style, &transform, self.width, self.height, &self.ctx);
		Ok(())
	}
}

/// Live window handle. Drawing replaces the frame shown by every mounted
/// [`GraphView`] bound to this handle; clones share the same view.
#[derive(Clone)]
pub struct LiveView {
	frame: RwSignal<Option<DrawFrame>>,
	title: Option<String>,
	style: RenderStyle,
}

impl LiveView {
	/// A view with nothing drawn yet.
	pub fn new(title: Option<String>, style: RenderStyle) -> Self {
		Self {
			frame: RwSignal::new(None),
			title,
			style,
		}
	}

	/// The frame currently shown, tracked.
	pub fn frame(&self) -> Signal<Option<DrawFrame>> {
		self.frame.into()
	}

	/// Window title.
	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	/// Mountable view bound to this handle.
	pub fn view(&self) -> impl IntoView + use<> {
		view! {
			<GraphView frame=self.frame() title=self.title.clone() style=self.style.clone() />
		}
	}
}

impl DrawSurface for LiveView {
	fn draw(&mut self, frame: &DrawFrame) -> GraphResult<()> {
		self.frame.set(Some(frame.clone()));
		Ok(())
	}
}
