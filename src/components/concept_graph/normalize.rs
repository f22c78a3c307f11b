//! Payload normalization: one place for all defaulting policy.
//!
//! The clustering backend can hand us nodes without positions, positions that
//! are NaN, missing cluster assignments, and edges whose endpoints were deleted
//! between clustering runs. Everything downstream (layout, rendering, hit
//! testing) assumes fully-defaulted data, so the whole edge-case policy is
//! applied here in a single pass and nowhere else.

use std::collections::HashMap;

use super::types::{GraphNode, GraphPayload};

/// Origin of the synthetic fallback grid, in payload units.
const GRID_ORIGIN: f64 = 100.0;
/// Spacing of the fallback grid.
const GRID_STEP: f64 = 180.0;
/// Columns in the fallback grid.
const GRID_COLUMNS: usize = 4;

/// A node with fully resolved position and cluster assignment.
#[derive(Clone, Debug)]
pub struct LayoutNode {
	/// The original node, kept intact for tooltips and click callbacks.
	pub node: GraphNode,
	/// Resolved x in payload units (never NaN).
	pub x: f64,
	/// Resolved y in payload units (never NaN).
	pub y: f64,
	/// Resolved cluster id (never absent).
	pub cluster_id: u32,
}

/// An edge with both endpoints resolved to node indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEdge {
	/// Index of the source node in the normalized node list.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
	/// Similarity score, passed through unchanged.
	pub similarity: f64,
}

/// Normalized graph ready for layout and drawing.
#[derive(Clone, Debug, Default)]
pub struct NormalizedGraph {
	/// Nodes in payload order.
	pub nodes: Vec<LayoutNode>,
	/// Edges with both endpoints present; dangling edges are dropped.
	pub edges: Vec<LayoutEdge>,
}

/// Resolve missing/NaN positions and absent cluster ids, and drop edges whose
/// endpoints are not in the payload.
///
/// Missing positions fall back to a deterministic 4-column grid so malformed
/// payloads still render a legible layout: node `i` lands at
/// `(100 + (i % 4) * 180, 100 + (i / 4) * 180)`.
pub fn normalize(payload: &GraphPayload) -> NormalizedGraph {
	let nodes: Vec<LayoutNode> = payload
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| LayoutNode {
			x: resolve_coord(node.x, GRID_ORIGIN + ((i % GRID_COLUMNS) as f64) * GRID_STEP),
			y: resolve_coord(node.y, GRID_ORIGIN + ((i / GRID_COLUMNS) as f64) * GRID_STEP),
			cluster_id: node.cluster_id.unwrap_or(0),
			node: node.clone(),
		})
		.collect();

	let index_of: HashMap<_, _> = nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (&n.node.id, i))
		.collect();

	let edges = payload
		.edges
		.iter()
		.filter_map(|edge| {
			let source = *index_of.get(&edge.source)?;
			let target = *index_of.get(&edge.target)?;
			Some(LayoutEdge {
				source,
				target,
				similarity: edge.similarity,
			})
		})
		.collect();

	NormalizedGraph { nodes, edges }
}

fn resolve_coord(value: Option<f64>, fallback: f64) -> f64 {
	match value {
		Some(v) if v.is_finite() => v,
		_ => fallback,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_graph::types::GraphEdge;

	fn payload(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> GraphPayload {
		GraphPayload { nodes, edges }
	}

	#[test]
	fn missing_positions_fall_back_to_grid() {
		let nodes = (0..6).map(|i| GraphNode::with_id(format!("n{}", i))).collect();
		let graph = normalize(&payload(nodes, vec![]));

		for (i, node) in graph.nodes.iter().enumerate() {
			assert_eq!(node.x, 100.0 + ((i % 4) as f64) * 180.0);
			assert_eq!(node.y, 100.0 + ((i / 4) as f64) * 180.0);
		}
		// Fifth node wraps to the second row.
		assert_eq!((graph.nodes[4].x, graph.nodes[4].y), (100.0, 280.0));
	}

	#[test]
	fn nan_positions_are_treated_as_missing() {
		let mut node = GraphNode::with_id("a");
		node.x = Some(f64::NAN);
		node.y = Some(42.0);
		let graph = normalize(&payload(vec![node], vec![]));

		assert_eq!(graph.nodes[0].x, 100.0);
		assert_eq!(graph.nodes[0].y, 42.0);
	}

	#[test]
	fn present_positions_are_kept() {
		let mut node = GraphNode::with_id("a");
		node.x = Some(-3.5);
		node.y = Some(7.25);
		let graph = normalize(&payload(vec![node], vec![]));

		assert_eq!((graph.nodes[0].x, graph.nodes[0].y), (-3.5, 7.25));
	}

	#[test]
	fn absent_cluster_defaults_to_zero() {
		let mut clustered = GraphNode::with_id("a");
		clustered.cluster_id = Some(3);
		let graph = normalize(&payload(vec![GraphNode::with_id("b"), clustered], vec![]));

		assert_eq!(graph.nodes[0].cluster_id, 0);
		assert_eq!(graph.nodes[1].cluster_id, 3);
	}

	#[test]
	fn dangling_edges_are_dropped_without_affecting_others() {
		let nodes = vec![GraphNode::with_id("a"), GraphNode::with_id("b")];
		let edges = vec![
			GraphEdge {
				source: "a".into(),
				target: "b".into(),
				similarity: 0.8,
			},
			GraphEdge {
				source: "a".into(),
				target: "missing".into(),
				similarity: 0.9,
			},
			GraphEdge {
				source: "ghost".into(),
				target: "b".into(),
				similarity: 0.1,
			},
		];
		let graph = normalize(&payload(nodes, edges));

		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].source, 0);
		assert_eq!(graph.edges[0].target, 1);
		assert_eq!(graph.edges[0].similarity, 0.8);
	}

	#[test]
	fn empty_payload_normalizes_to_empty_graph() {
		let graph = normalize(&GraphPayload::default());
		assert!(graph.nodes.is_empty());
		assert!(graph.edges.is_empty());
	}
}
