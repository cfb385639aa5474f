use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ViewTransform;
use crate::attributes::Symbol;
use crate::draw::{DrawFrame, RenderStyle};

pub fn render(
	frame: &DrawFrame,
	style: &RenderStyle,
	transform: &ViewTransform,
	width: f64,
	height: f64,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(&style.background.to_hex());
	ctx.fill_rect(0.0, 0.0, width, height);
	let radius = frame.node_size * transform.k / 2.0;
	draw_edges(frame, transform, radius, ctx);
	draw_nodes(frame, transform, radius, ctx);
	draw_labels(frame, style, transform, radius, ctx);
}

fn draw_edges(
	frame: &DrawFrame,
	transform: &ViewTransform,
	radius: f64,
	ctx: &CanvasRenderingContext2d,
) {
	let pen = frame.pen.to_hex();
	let arrow_size = (radius * 0.6).max(4.0);
	ctx.set_stroke_style_str(&pen);
	ctx.set_fill_style_str(&pen);
	ctx.set_line_width(1.5);

	for &[child, parent] in &frame.adjacency {
		let (Some(&from), Some(&to)) = (frame.positions.get(child), frame.positions.get(parent))
		else {
			continue;
		};
		let (x1, y1) = transform.to_screen(from);
		let (x2, y2) = transform.to_screen(to);

		if child == parent {
			// Loop above the node.
			ctx.begin_path();
			let _ = ctx.arc(x1, y1 - radius * 1.4, radius * 0.7, 0.0, 2.0 * PI);
			ctx.stroke();
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < radius * 2.0 {
			continue;
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * radius, y1 + uy * radius);
		ctx.line_to(x2 - ux * (radius + arrow_size), y2 - uy * (radius + arrow_size));
		ctx.stroke();

		let (tip_x, tip_y) = (x2 - ux * radius, y2 - uy * radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(
	frame: &DrawFrame,
	transform: &ViewTransform,
	radius: f64,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_stroke_style_str(&frame.pen.to_hex());
	ctx.set_line_width(1.0);
	for ((&pos, color), symbol) in frame.positions.iter().zip(&frame.colors).zip(&frame.symbols) {
		let (x, y) = transform.to_screen(pos);
		ctx.begin_path();
		match symbol {
			Symbol::Circle => {
				let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			}
			Symbol::Hexagon => {
				let corners = hexagon(x, y, radius);
				ctx.move_to(corners[0].0, corners[0].1);
				for &(cx, cy) in &corners[1..] {
					ctx.line_to(cx, cy);
				}
				ctx.close_path();
			}
		}
		ctx.set_fill_style_str(&color.to_hex());
		ctx.fill();
		ctx.stroke();
	}
}

fn draw_labels(
	frame: &DrawFrame,
	style: &RenderStyle,
	transform: &ViewTransform,
	radius: f64,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(&style.label_color.to_hex());
	ctx.set_font(&format!("{}px sans-serif", style.font_px));
	for (&pos, label) in frame.positions.iter().zip(&frame.labels) {
		let (x, y) = transform.to_screen(pos);
		let _ = ctx.fill_text(label, x + radius + 3.0, y + style.font_px / 3.0);
	}
}

/// Corners of a pointy-top hexagon inscribed in a circle of `radius`.
pub fn hexagon(x: f64, y: f64, radius: f64) -> [(f64, f64); 6] {
	std::array::from_fn(|i| {
		let angle = PI / 6.0 + i as f64 * PI / 3.0;
		(x + radius * angle.cos(), y + radius * angle.sin())
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hexagon_corners_sit_on_the_circle() {
		let corners = hexagon(10.0, -4.0, 3.0);
		for (cx, cy) in corners {
			let r = ((cx - 10.0).powi(2) + (cy + 4.0).powi(2)).sqrt();
			assert!((r - 3.0).abs() < 1e-9);
		}
		// Pointy top: one corner straight above or below the centre.
		assert!(corners.iter().any(|&(cx, _)| (cx - 10.0).abs() < 1e-9));
	}
}
