//! Concept-map visualization component.
//!
//! Renders a cluster-colored scatter/graph of research papers on an HTML
//! canvas with:
//! - Positions precomputed by the clustering backend (with a deterministic
//!   grid fallback for malformed payloads)
//! - Similarity edges drawn as cluster-color gradients
//! - Pan, zoom, hover tooltips, and click-through to a detail view
//!
//! The pipeline is deliberately layered: [`normalize`] applies all defaulting
//! policy once, [`scale`] fits the result to the canvas, [`state`] holds the
//! interaction state, and [`render`] walks the scene imperatively.
//!
//! # Example
//!
//! ```ignore
//! use paper_atlas::components::concept_graph::{ConceptGraph, GraphPayload};
//!
//! let data = Signal::derive(move || graph.get().unwrap_or_default());
//! view! {
//!     <ConceptGraph
//!         data=data
//!         cluster_names=names
//!         on_node_click=Callback::new(move |node| open_detail(node))
//!     />
//! }
//! ```

mod component;
pub mod normalize;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod tooltip;
mod types;

pub use component::ConceptGraph;
pub use theme::ClusterPalette;
pub use tooltip::{TOOLTIP_CLASS, truncate};
pub use types::{ClusterNames, GraphEdge, GraphNode, GraphPayload, NodeId, Year};
