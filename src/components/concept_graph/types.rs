//! Graph payload structures as delivered by the clustering service.
//!
//! The backend is free to omit or null out almost every field, so everything
//! here is optional and tolerant. Defaulting policy lives in
//! [`super::normalize`], not in the types.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Node identifier. The backend emits UUID strings, but older payloads used
/// bare integers, so both are accepted and compared by value.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum NodeId {
	/// String identifier (UUIDs in current payloads).
	Text(String),
	/// Integer identifier (legacy payloads).
	Number(i64),
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Text(s) => f.write_str(s),
			NodeId::Number(n) => write!(f, "{}", n),
		}
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		NodeId::Text(s.to_string())
	}
}

impl From<String> for NodeId {
	fn from(s: String) -> Self {
		NodeId::Text(s)
	}
}

/// Publication year, emitted either as a string or a number.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Year {
	/// Year as free text ("2021", "ca. 1998").
	Text(String),
	/// Year as a plain number.
	Number(i64),
}

impl fmt::Display for Year {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Year::Text(s) => f.write_str(s),
			Year::Number(n) => write!(f, "{}", n),
		}
	}
}

/// One paper in the concept map.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Unique identifier within one payload. Edges reference this by value.
	pub id: NodeId,
	/// 2D position from the dimensionality reduction. May be absent or NaN.
	#[serde(default)]
	pub x: Option<f64>,
	/// See `x`.
	#[serde(default)]
	pub y: Option<f64>,
	/// Cluster assignment. Absent means unclustered (treated as cluster 0).
	#[serde(default)]
	pub cluster_id: Option<u32>,
	/// Paper title.
	#[serde(default)]
	pub title: Option<String>,
	/// Comma-separated author list.
	#[serde(default)]
	pub authors: Option<String>,
	/// Publication year.
	#[serde(default)]
	pub year: Option<Year>,
	/// Abstract text, carried through for the caller's detail view.
	#[serde(default, rename = "abstract")]
	pub abstract_text: Option<String>,
}

impl GraphNode {
	/// Minimal node for tests and synthetic data.
	pub fn with_id(id: impl Into<NodeId>) -> Self {
		Self {
			id: id.into(),
			x: None,
			y: None,
			cluster_id: None,
			title: None,
			authors: None,
			year: None,
			abstract_text: None,
		}
	}
}

/// A similarity relation between two papers.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphEdge {
	/// Source node id.
	pub source: NodeId,
	/// Target node id.
	pub target: NodeId,
	/// Similarity score in [0, 1], drives stroke width.
	#[serde(default)]
	pub similarity: f64,
}

/// Complete graph payload: nodes and similarity edges.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphPayload {
	/// All papers to draw.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Similarity edges; dangling references are tolerated and skipped.
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

/// Sparse cluster id (as decimal string) to human label mapping.
pub type ClusterNames = HashMap<String, String>;
