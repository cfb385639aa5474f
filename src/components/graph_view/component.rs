use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ViewState;
use crate::draw::{DrawFrame, RenderStyle};

type SharedState = Rc<RefCell<ViewState>>;
type SharedContext = Rc<RefCell<Option<CanvasRenderingContext2d>>>;

/// Canvas that shows the latest frame of `frame` and redraws in place when it
/// changes. Wheel zooms, dragging pans.
#[component]
pub fn GraphView(
	#[prop(into)] frame: Signal<Option<DrawFrame>>,
	#[prop(default = None)] title: Option<String>,
	#[prop(default = RenderStyle::default())] style: RenderStyle,
	#[prop(default = 800.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(ViewState::new(width, height)));
	let ctx: SharedContext = Rc::new(RefCell::new(None));
	let style = Rc::new(style);

	let repaint = {
		let (state, ctx, style) = (state.clone(), ctx.clone(), style.clone());
		move || {
			let (s, ctx) = (state.borrow(), ctx.borrow());
			if let (Some(frame), Some(ctx)) = (&s.frame, ctx.as_ref()) {
				render::render(frame, &style, &s.transform, s.width, s.height, ctx);
			}
		}
	};

	{
		let (state, ctx, repaint) = (state.clone(), ctx.clone(), repaint.clone());
		Effect::new(move |_| {
			let next = frame.get();
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			if ctx.borrow().is_none() {
				let canvas: HtmlCanvasElement = canvas;
				canvas.set_width(width as u32);
				canvas.set_height(height as u32);
				match canvas.get_context("2d") {
					Ok(Some(obj)) => *ctx.borrow_mut() = obj.dyn_into().ok(),
					_ => warn!("graph view canvas has no 2d context"),
				}
			}
			if let Some(ref f) = next {
				debug!("graph view received {} nodes", f.len());
			}
			state.borrow_mut().set_frame(next);
			repaint();
		});
	}

	let local_point = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?;
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(&ev) {
			state_md.borrow_mut().begin_pan(x, y);
		}
	};

	let (state_mm, repaint_mm) = (state.clone(), repaint.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		let moved = state_mm.borrow_mut().drag_to(x, y);
		if moved {
			repaint_mm();
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| state_mu.borrow_mut().end_pan();

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| state_ml.borrow_mut().end_pan();

	let (state_wh, repaint_wh) = (state.clone(), repaint.clone());
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(&*ev) else {
			return;
		};
		state_wh.borrow_mut().zoom(x, y, ev.delta_y());
		repaint_wh();
	};

	view! {
		<figure class="graph-view">
			{title.map(|t| view! { <figcaption>{t}</figcaption> })}
			<canvas
				node_ref=canvas_ref
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
		</figure>
	}
}
