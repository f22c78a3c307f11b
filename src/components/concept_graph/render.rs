//! Canvas rendering for the concept map.
//!
//! Drawing is a pure walk over a [`GraphScene`]: edges first (gradient lines
//! under the nodes), then node layers, with the hovered node drawn last so its
//! lift animation stays on top. The pan/zoom transform wraps the whole pass.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::GraphScene;
use super::theme::{Color, ClusterPalette};
use super::tooltip::truncate;

/// Main disc radius in canvas units.
pub const NODE_RADIUS: f64 = 18.0;
/// Radius the main disc grows to while hovered.
const NODE_RADIUS_HOVERED: f64 = 22.0;
/// Soft glow disc radius.
const GLOW_RADIUS: f64 = 28.0;
/// Highlight dot radius.
const DOT_RADIUS: f64 = 6.0;
/// Highlight dot offset toward the upper left.
const DOT_OFFSET: f64 = 6.0;
/// Vertical lift applied at full hover, in canvas units.
const HOVER_LIFT: f64 = 3.0;
/// Label baseline offset below the node center.
const LABEL_OFFSET: f64 = 38.0;
/// Max characters of the label under a node.
const LABEL_MAX: usize = 20;

/// Stroke width for a similarity edge: proportional to similarity with a
/// visible floor so weak connections never vanish.
pub fn edge_stroke_width(similarity: f64) -> f64 {
	(similarity * 4.0).max(1.5)
}

/// Label text under a node: truncated title or `"Untitled"`.
pub fn node_label(title: Option<&str>) -> String {
	truncate(title.unwrap_or("Untitled"), LABEL_MAX)
}

/// Draw the complete scene. Empty scenes only clear the surface.
pub fn render(scene: &GraphScene, ctx: &CanvasRenderingContext2d, palette: &ClusterPalette) {
	ctx.clear_rect(0.0, 0.0, scene.width, scene.height);
	if scene.graph.nodes.is_empty() {
		return;
	}

	ctx.save();
	let _ = ctx.translate(scene.transform.x, scene.transform.y);
	let _ = ctx.scale(scene.transform.k, scene.transform.k);

	draw_edges(scene, ctx, palette);

	// Hovered/lifting nodes last so they sit above their neighbors.
	for (idx, _) in scene.graph.nodes.iter().enumerate() {
		if scene.hover.lift(idx) == 0.0 {
			draw_node(scene, ctx, palette, idx);
		}
	}
	for (idx, _) in scene.graph.nodes.iter().enumerate() {
		if scene.hover.lift(idx) > 0.0 {
			draw_node(scene, ctx, palette, idx);
		}
	}

	ctx.restore();
}

fn draw_edges(scene: &GraphScene, ctx: &CanvasRenderingContext2d, palette: &ClusterPalette) {
	for edge in &scene.graph.edges {
		let (x1, y1) = scene.positions[edge.source];
		let (x2, y2) = scene.positions[edge.target];
		let source_color = palette
			.color_for(scene.graph.nodes[edge.source].cluster_id)
			.with_alpha(0.6);
		let target_color = palette
			.color_for(scene.graph.nodes[edge.target].cluster_id)
			.with_alpha(0.6);

		let gradient = ctx.create_linear_gradient(x1, y1, x2, y2);
		let _ = gradient.add_color_stop(0.0, &source_color.to_css());
		let _ = gradient.add_color_stop(1.0, &target_color.to_css());

		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.set_line_width(edge_stroke_width(edge.similarity));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_node(scene: &GraphScene, ctx: &CanvasRenderingContext2d, palette: &ClusterPalette, idx: usize) {
	let node = &scene.graph.nodes[idx];
	let (x, y) = scene.positions[idx];
	let lift = scene.hover.lift(idx);
	let y_lifted = y - HOVER_LIFT * lift;
	let color = palette.color_for(node.cluster_id);

	// Layer 1: soft glow disc.
	ctx.set_fill_style_str(&color.with_alpha(0.15).to_css());
	ctx.begin_path();
	let _ = ctx.arc(x, y_lifted, GLOW_RADIUS, 0.0, 2.0 * PI);
	ctx.fill();

	// Layer 2: main disc with white border and drop shadow.
	let radius = NODE_RADIUS + (NODE_RADIUS_HOVERED - NODE_RADIUS) * lift;
	ctx.set_shadow_color("rgba(60, 50, 40, 0.25)");
	ctx.set_shadow_blur(6.0);
	ctx.set_shadow_offset_y(2.0);
	ctx.set_fill_style_str(&color.to_css());
	ctx.begin_path();
	let _ = ctx.arc(x, y_lifted, radius, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.set_shadow_color("rgba(0, 0, 0, 0)");
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_offset_y(0.0);

	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(3.0);
	ctx.begin_path();
	let _ = ctx.arc(x, y_lifted, radius, 0.0, 2.0 * PI);
	ctx.stroke();

	// Layer 3: highlight dot, up and to the left.
	ctx.set_fill_style_str(&Color::rgb(255, 255, 255).with_alpha(0.4).to_css());
	ctx.begin_path();
	let _ = ctx.arc(x - DOT_OFFSET, y_lifted - DOT_OFFSET, DOT_RADIUS, 0.0, 2.0 * PI);
	ctx.fill();

	ctx.set_fill_style_str("#4a4440");
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&node_label(node.node.title.as_deref()), x, y + LABEL_OFFSET);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_width_is_bounded_below_and_monotonic() {
		assert_eq!(edge_stroke_width(0.0), 1.5);
		assert_eq!(edge_stroke_width(1.0), 4.0);
		assert_eq!(edge_stroke_width(0.2), 1.5);
		let mut last = 0.0;
		for step in 0..=10 {
			let width = edge_stroke_width(step as f64 / 10.0);
			assert!(width >= last);
			last = width;
		}
	}

	#[test]
	fn labels_truncate_past_twenty_characters() {
		assert_eq!(node_label(None), "Untitled");
		assert_eq!(node_label(Some("exactly twenty chars")), "exactly twenty chars");
		assert_eq!(
			node_label(Some("Attention Is All You Need")),
			"Attention Is All You..."
		);
	}
}
