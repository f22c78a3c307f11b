//! Coordinate scaling from payload space to canvas pixels.
//!
//! The backend emits positions in an arbitrary projection space (typically
//! 100..900 after its own normalization, but nothing is guaranteed). Each axis
//! is mapped linearly onto the canvas with a fixed 10%-of-range padding around
//! the data and a 100 px page margin, so node count and projection scale never
//! change the framing.

use super::normalize::LayoutNode;

/// Page margin in canvas pixels on every side.
const MARGIN: f64 = 100.0;
/// Extra domain padding as a fraction of the data range.
const PADDING_FRACTION: f64 = 0.1;
/// Minimum domain range per axis, guards single-point and collinear datasets.
const MIN_RANGE: f64 = 1.0;

/// Canvas width used when the container reports no usable size.
pub const FALLBACK_WIDTH: f64 = 800.0;
/// Canvas height used when the container reports no usable size.
pub const FALLBACK_HEIGHT: f64 = 550.0;

/// Replace unusable container dimensions with the fallback surface size so
/// the canvas is never degenerate.
pub fn resolve_dimensions(width: f64, height: f64) -> (f64, f64) {
	let width = if width > 0.0 { width } else { FALLBACK_WIDTH };
	let height = if height > 0.0 { height } else { FALLBACK_HEIGHT };
	(width, height)
}

/// Linear mapping of one axis domain onto a pixel range.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
	domain_min: f64,
	domain_max: f64,
	range_min: f64,
	range_max: f64,
}

impl LinearScale {
	/// Build a scale mapping `[domain_min, domain_max]` onto `[range_min, range_max]`.
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self {
			domain_min: domain.0,
			domain_max: domain.1,
			range_min: range.0,
			range_max: range.1,
		}
	}

	/// Map a domain value into the pixel range.
	pub fn map(&self, value: f64) -> f64 {
		let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
		self.range_min + t * (self.range_max - self.range_min)
	}
}

/// Per-axis scales fitted to one dataset and one canvas size.
#[derive(Clone, Copy, Debug)]
pub struct ViewportScale {
	/// Horizontal payload-to-pixel scale.
	pub x: LinearScale,
	/// Vertical payload-to-pixel scale.
	pub y: LinearScale,
}

impl ViewportScale {
	/// Fit scales to the bounding box of the (already normalized) nodes.
	///
	/// Ranges are clamped to at least [`MIN_RANGE`] so a single node or a
	/// collinear set never produces a degenerate division.
	pub fn fit(nodes: &[LayoutNode], width: f64, height: f64) -> Self {
		let mut x_min = f64::INFINITY;
		let mut x_max = f64::NEG_INFINITY;
		let mut y_min = f64::INFINITY;
		let mut y_max = f64::NEG_INFINITY;
		for node in nodes {
			x_min = x_min.min(node.x);
			x_max = x_max.max(node.x);
			y_min = y_min.min(node.y);
			y_max = y_max.max(node.y);
		}
		if nodes.is_empty() {
			x_min = 0.0;
			x_max = 0.0;
			y_min = 0.0;
			y_max = 0.0;
		}

		let x_range = (x_max - x_min).max(MIN_RANGE);
		let y_range = (y_max - y_min).max(MIN_RANGE);

		Self {
			x: LinearScale::new(
				(
					x_min - PADDING_FRACTION * x_range,
					x_max + PADDING_FRACTION * x_range,
				),
				(MARGIN, width - MARGIN),
			),
			y: LinearScale::new(
				(
					y_min - PADDING_FRACTION * y_range,
					y_max + PADDING_FRACTION * y_range,
				),
				(MARGIN, height - MARGIN),
			),
		}
	}

	/// Map a payload-space point to canvas pixels.
	pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
		(self.x.map(x), self.y.map(y))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_graph::normalize::normalize;
	use crate::components::concept_graph::types::{GraphNode, GraphPayload};

	fn node_at(id: &str, x: f64, y: f64) -> GraphNode {
		let mut node = GraphNode::with_id(id);
		node.x = Some(x);
		node.y = Some(y);
		node
	}

	#[test]
	fn maps_domain_endpoints_inside_the_margin() {
		let payload = GraphPayload {
			nodes: vec![node_at("a", 0.0, 0.0), node_at("b", 100.0, 100.0)],
			edges: vec![],
		};
		let graph = normalize(&payload);
		let scale = ViewportScale::fit(&graph.nodes, 800.0, 550.0);

		// Domain is padded by 10% of range, so data extremes land strictly
		// inside [100, width-100].
		let (x0, y0) = scale.map(0.0, 0.0);
		let (x1, y1) = scale.map(100.0, 100.0);
		assert!(x0 > 100.0 && x1 < 700.0);
		assert!(y0 > 100.0 && y1 < 450.0);
		// Padded endpoints hit the margins exactly.
		let (px, py) = scale.map(-10.0, 110.0);
		assert!((px - 100.0).abs() < 1e-9);
		assert!((py - 450.0).abs() < 1e-9);
	}

	#[test]
	fn single_node_does_not_divide_by_zero() {
		let payload = GraphPayload {
			nodes: vec![node_at("only", 5.0, 5.0)],
			edges: vec![],
		};
		let graph = normalize(&payload);
		let scale = ViewportScale::fit(&graph.nodes, 800.0, 550.0);
		let (x, y) = scale.map(graph.nodes[0].x, graph.nodes[0].y);

		assert!(x.is_finite() && y.is_finite());
		assert!((100.0..=700.0).contains(&x));
		assert!((100.0..=450.0).contains(&y));
	}

	#[test]
	fn unusable_dimensions_fall_back() {
		assert_eq!(resolve_dimensions(0.0, 0.0), (800.0, 550.0));
		assert_eq!(resolve_dimensions(-1.0, 400.0), (800.0, 400.0));
		assert_eq!(resolve_dimensions(1024.0, 768.0), (1024.0, 768.0));
	}

	#[test]
	fn collinear_nodes_keep_a_finite_cross_axis() {
		let payload = GraphPayload {
			nodes: vec![node_at("a", 0.0, 7.0), node_at("b", 50.0, 7.0)],
			edges: vec![],
		};
		let graph = normalize(&payload);
		let scale = ViewportScale::fit(&graph.nodes, 800.0, 550.0);

		let (_, ya) = scale.map(0.0, 7.0);
		let (_, yb) = scale.map(50.0, 7.0);
		assert!(ya.is_finite() && yb.is_finite());
		assert!((ya - yb).abs() < 1e-9);
	}
}
