//! Renderer-owned interaction state.
//!
//! One [`GraphScene`] is built per dataset and mutated by the event handlers
//! and the animation loop. It owns the only mutable interaction state in the
//! renderer: the view transform, an in-progress pan, and hover lift
//! animations. Nothing here survives a re-render with new data.

use std::collections::HashMap;

use super::normalize::{NormalizedGraph, normalize};
use super::render::NODE_RADIUS;
use super::scale::{ViewportScale, resolve_dimensions};
use super::types::GraphPayload;

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.3;
/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Duration of the hover lift/grow animation, in seconds.
const HOVER_ANIMATION_SECS: f64 = 0.2;

/// Pan and zoom transform applied uniformly to the whole drawing group.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Zoom factor, clamped to [[`MIN_ZOOM`], [`MAX_ZOOM`]].
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
	/// Zoom by `factor` keeping the screen point `(cx, cy)` fixed.
	pub fn zoom_at(&mut self, cx: f64, cy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = cx - (cx - self.x) * ratio;
		self.y = cy - (cy - self.y) * ratio;
		self.k = new_k;
	}

	/// Screen pixels to canvas-space coordinates.
	pub fn screen_to_canvas(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

/// Tracks an in-progress background pan.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanState {
	/// Whether a drag is in progress.
	pub active: bool,
	/// Pointer position at drag start, screen pixels.
	pub start_x: f64,
	/// See `start_x`.
	pub start_y: f64,
	/// Transform translation at drag start.
	pub origin_x: f64,
	/// See `origin_x`.
	pub origin_y: f64,
	/// Total pointer travel since drag start, used to tell clicks from drags.
	pub travel: f64,
}

/// Hover target plus per-node lift animation progress.
///
/// Each node that is (or recently was) hovered has a lift value in [0, 1]
/// that ramps linearly over [`HOVER_ANIMATION_SECS`] toward 1 while hovered
/// and back toward 0 after the pointer leaves. Repeated enter/leave pairs just
/// retarget the ramp, so the handlers are idempotent.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	hovered: Option<usize>,
	lifts: HashMap<usize, f64>,
}

impl HoverState {
	/// Change the hovered node. No-op when the target is unchanged.
	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		if let Some(idx) = node {
			self.lifts.entry(idx).or_insert(0.0);
		}
	}

	/// Currently hovered node, if any.
	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}

	/// Advance lift animations by `dt` seconds; finished fade-outs are dropped.
	pub fn tick(&mut self, dt: f64) {
		let step = dt / HOVER_ANIMATION_SECS;
		let hovered = self.hovered;
		self.lifts.retain(|&idx, lift| {
			if hovered == Some(idx) {
				*lift = (*lift + step).min(1.0);
				true
			} else {
				*lift -= step;
				*lift > 0.0
			}
		});
	}

	/// Lift progress for a node: 0 at rest, 1 fully lifted.
	pub fn lift(&self, idx: usize) -> f64 {
		self.lifts.get(&idx).copied().unwrap_or(0.0)
	}

	/// True while any lift animation is mid-flight.
	pub fn animating(&self) -> bool {
		!self.lifts.is_empty()
	}
}

/// Complete per-dataset scene: normalized graph, fitted scales, canvas-space
/// node positions, and interaction state.
pub struct GraphScene {
	/// Normalized nodes and edges.
	pub graph: NormalizedGraph,
	/// Canvas-space node centers, indexed like `graph.nodes`.
	pub positions: Vec<(f64, f64)>,
	/// Pan/zoom transform.
	pub transform: ViewTransform,
	/// In-progress pan.
	pub pan: PanState,
	/// Hover target and lift animations.
	pub hover: HoverState,
	/// Canvas width in logical pixels.
	pub width: f64,
	/// Canvas height in logical pixels.
	pub height: f64,
}

impl GraphScene {
	/// Normalize the payload, fit the viewport scales, and precompute node
	/// positions. Zero or negative container dimensions fall back to 800x550.
	pub fn new(payload: &GraphPayload, width: f64, height: f64) -> Self {
		let (width, height) = resolve_dimensions(width, height);
		let graph = normalize(payload);
		let scale = ViewportScale::fit(&graph.nodes, width, height);
		let positions = graph.nodes.iter().map(|n| scale.map(n.x, n.y)).collect();

		Self {
			graph,
			positions,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
		}
	}

	/// Topmost node under the screen point, if any.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (cx, cy) = self.transform.screen_to_canvas(sx, sy);
		let mut found = None;
		for (idx, &(x, y)) in self.positions.iter().enumerate() {
			let (dx, dy) = (x - cx, y - cy);
			if dx * dx + dy * dy <= NODE_RADIUS * NODE_RADIUS {
				found = Some(idx);
			}
		}
		found
	}

	/// Advance hover animations.
	pub fn tick(&mut self, dt: f64) {
		self.hover.tick(dt);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_graph::types::GraphNode;

	fn two_node_payload() -> GraphPayload {
		let mut a = GraphNode::with_id("a");
		a.x = Some(0.0);
		a.y = Some(0.0);
		let mut b = GraphNode::with_id("b");
		b.x = Some(100.0);
		b.y = Some(100.0);
		GraphPayload {
			nodes: vec![a, b],
			edges: vec![],
		}
	}

	#[test]
	fn zoom_is_clamped_to_range() {
		let mut t = ViewTransform::default();
		for _ in 0..100 {
			t.zoom_at(400.0, 275.0, 1.1);
		}
		assert_eq!(t.k, MAX_ZOOM);
		for _ in 0..100 {
			t.zoom_at(400.0, 275.0, 0.9);
		}
		assert_eq!(t.k, MIN_ZOOM);
	}

	#[test]
	fn zoom_keeps_the_cursor_point_fixed() {
		let mut t = ViewTransform::default();
		let (before_x, before_y) = t.screen_to_canvas(200.0, 150.0);
		t.zoom_at(200.0, 150.0, 1.25);
		let (after_x, after_y) = t.screen_to_canvas(200.0, 150.0);

		assert!((before_x - after_x).abs() < 1e-9);
		assert!((before_y - after_y).abs() < 1e-9);
	}

	#[test]
	fn hover_ramps_up_and_back_down() {
		let mut hover = HoverState::default();
		hover.set_hover(Some(0));
		hover.tick(0.1);
		assert!((hover.lift(0) - 0.5).abs() < 1e-9);
		hover.tick(0.2);
		assert_eq!(hover.lift(0), 1.0);

		hover.set_hover(None);
		hover.tick(0.1);
		assert!((hover.lift(0) - 0.5).abs() < 1e-9);
		hover.tick(0.2);
		assert_eq!(hover.lift(0), 0.0);
		assert!(!hover.animating());
	}

	#[test]
	fn repeated_enter_leave_is_idempotent() {
		let mut hover = HoverState::default();
		hover.set_hover(Some(1));
		hover.set_hover(Some(1));
		hover.tick(0.05);
		let lift = hover.lift(1);
		hover.set_hover(None);
		hover.set_hover(None);
		hover.set_hover(Some(1));
		// Re-entering resumes from the current lift instead of restarting.
		assert_eq!(hover.lift(1), lift);
	}

	#[test]
	fn hit_testing_respects_the_transform() {
		let mut scene = GraphScene::new(&two_node_payload(), 800.0, 550.0);
		let (x, y) = scene.positions[0];
		assert_eq!(scene.node_at(x, y), Some(0));
		assert_eq!(scene.node_at(x + NODE_RADIUS + 2.0, y), None);

		// Pan the view and hit the node at its shifted screen position.
		scene.transform.x = 50.0;
		scene.transform.y = -20.0;
		assert_eq!(scene.node_at(x + 50.0, y - 20.0), Some(0));
	}

	#[test]
	fn zero_dimensions_fall_back_to_default_surface() {
		let scene = GraphScene::new(&two_node_payload(), 0.0, 0.0);
		assert_eq!((scene.width, scene.height), (800.0, 550.0));
	}
}
