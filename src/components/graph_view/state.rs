use crate::draw::DrawFrame;
use crate::layout::Point;

/// Screen pixels per world unit is `k`; `(x, y)` is where world origin lands.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Transform that centres `frame` in a `width` x `height` canvas with a
	/// node-sized margin. World y points up, screen y points down.
	pub fn fit(frame: &DrawFrame, width: f64, height: f64) -> Self {
		let Some((lo, hi)) = frame.bounds() else {
			return Self {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			};
		};
		let margin = frame.node_size;
		let (span_x, span_y) = (hi.x - lo.x + 2.0 * margin, hi.y - lo.y + 2.0 * margin);
		let k = (width / span_x).min(height / span_y).clamp(MIN_ZOOM, MAX_ZOOM);
		let (cx, cy) = ((lo.x + hi.x) / 2.0, (lo.y + hi.y) / 2.0);
		Self {
			x: width / 2.0 - cx * k,
			y: height / 2.0 + cy * k,
			k,
		}
	}

	pub fn to_screen(&self, p: Point) -> (f64, f64) {
		(self.x + p.x * self.k, self.y - p.y * self.k)
	}

	/// Zooms by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 20.0;

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Per-canvas view state of a live graph view.
pub struct ViewState {
	pub frame: Option<DrawFrame>,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	/// Set once the user pans or zooms; new frames then keep the view.
	pub user_moved: bool,
}

impl ViewState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			frame: None,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			width,
			height,
			user_moved: false,
		}
	}

	/// Swaps in a new frame, refitting unless the user has moved the view.
	pub fn set_frame(&mut self, frame: Option<DrawFrame>) {
		if let Some(ref f) = frame {
			if !self.user_moved {
				self.transform = ViewTransform::fit(f, self.width, self.height);
			}
		}
		self.frame = frame;
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan.active = true;
		self.pan.start_x = x;
		self.pan.start_y = y;
		self.pan.transform_start_x = self.transform.x;
		self.pan.transform_start_y = self.transform.y;
	}

	/// Returns whether the view moved.
	pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
		if !self.pan.active {
			return false;
		}
		self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		self.user_moved = true;
		true
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.transform.zoom_at(x, y, factor);
		self.user_moved = true;
	}
}
