//! Hover tooltip: content formatting and the floating overlay element.
//!
//! The overlay is a scoped resource. It is created at the start of a render
//! pass and destroyed either at the start of the next pass or on unmount, so
//! replacing the hosting view can never leak duplicate floating elements.
//! All text lands in the DOM via `set_text_content`, so interpolated titles
//! and author strings cannot inject markup.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::normalize::LayoutNode;
use super::theme::{ClusterPalette, cluster_label};
use super::types::ClusterNames;

/// Class name of the overlay element, one per mounted graph.
pub const TOOLTIP_CLASS: &str = "concept-graph-tooltip";

/// Horizontal offset from the pointer, in pixels.
const OFFSET_X: f64 = 15.0;
/// Vertical offset from the pointer (upward), in pixels.
const OFFSET_Y: f64 = -15.0;

/// Max characters of title shown in the tooltip.
const TITLE_MAX: usize = 60;
/// Max characters of the cluster badge label.
const CLUSTER_MAX: usize = 30;

/// Truncate to `max` characters, appending an ellipsis only when the text is
/// actually longer. A string of exactly `max` characters passes unmodified.
pub fn truncate(text: &str, max: usize) -> String {
	if text.chars().count() > max {
		let head: String = text.chars().take(max).collect();
		format!("{}...", head)
	} else {
		text.to_string()
	}
}

/// First author of a comma- or semicolon-separated list, with `" et al."`
/// appended when more than one author is present.
pub fn first_author(authors: &str) -> String {
	let mut parts = authors.split([',', ';']).map(str::trim).filter(|p| !p.is_empty());
	let first = parts.next().unwrap_or("").to_string();
	if parts.next().is_some() {
		format!("{} et al.", first)
	} else {
		first
	}
}

/// Pure tooltip content for one node, computed before any DOM work.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
	/// Truncated title, `"Untitled"` when absent.
	pub title: String,
	/// First author with `et al.` marker, when authors are present.
	pub byline: Option<String>,
	/// Publication year, when present.
	pub year: Option<String>,
	/// Cluster badge label, truncated.
	pub cluster: String,
	/// Badge background as a CSS color.
	pub cluster_color: String,
}

impl TooltipContent {
	/// Build tooltip content for a normalized node.
	pub fn for_node(node: &LayoutNode, palette: &ClusterPalette, names: &ClusterNames) -> Self {
		let title = node.node.title.as_deref().unwrap_or("Untitled");
		Self {
			title: truncate(title, TITLE_MAX),
			byline: node.node.authors.as_deref().map(first_author),
			year: node.node.year.as_ref().map(|y| y.to_string()),
			cluster: truncate(&cluster_label(names, node.cluster_id), CLUSTER_MAX),
			cluster_color: palette.color_for(node.cluster_id).to_css(),
		}
	}
}

/// The floating overlay element, owned for the duration of one render pass.
pub struct Tooltip {
	root: HtmlElement,
}

impl Tooltip {
	/// Create the overlay (hidden) and attach it to the document body.
	pub fn mount(document: &Document) -> Option<Self> {
		let root: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
		root.set_class_name(TOOLTIP_CLASS);
		let style = root.style();
		let _ = style.set_property("position", "fixed");
		let _ = style.set_property("display", "none");
		let _ = style.set_property("pointer-events", "none");
		let _ = style.set_property("z-index", "1000");
		let _ = style.set_property("max-width", "260px");
		let _ = style.set_property("padding", "10px 12px");
		let _ = style.set_property("border-radius", "8px");
		let _ = style.set_property("background", "rgba(255, 255, 255, 0.97)");
		let _ = style.set_property("box-shadow", "0 4px 16px rgba(0, 0, 0, 0.18)");
		let _ = style.set_property("font-size", "13px");
		let _ = style.set_property("line-height", "1.4");
		document.body()?.append_child(&root).ok()?;
		Some(Self { root })
	}

	/// Fill in content and show the tooltip anchored at the pointer.
	pub fn show(&self, content: &TooltipContent, pointer_x: f64, pointer_y: f64) {
		let Some(document) = self.root.owner_document() else {
			return;
		};
		self.root.set_text_content(None);

		if let Ok(title) = document.create_element("div") {
			title.set_text_content(Some(&content.title));
			if let Ok(title) = title.dyn_into::<HtmlElement>() {
				let _ = title.style().set_property("font-weight", "600");
				let _ = self.root.append_child(&title);
			}
		}
		if let Some(byline) = &content.byline {
			if let Ok(el) = document.create_element("div") {
				el.set_text_content(Some(byline));
				let _ = self.root.append_child(&el);
			}
		}
		if let Some(year) = &content.year {
			if let Ok(el) = document.create_element("div") {
				el.set_text_content(Some(year));
				if let Ok(el) = el.dyn_into::<HtmlElement>() {
					let _ = el.style().set_property("color", "#888");
					let _ = self.root.append_child(&el);
				}
			}
		}
		if let Ok(badge) = document.create_element("span") {
			badge.set_text_content(Some(&content.cluster));
			if let Ok(badge) = badge.dyn_into::<HtmlElement>() {
				let style = badge.style();
				let _ = style.set_property("display", "inline-block");
				let _ = style.set_property("margin-top", "6px");
				let _ = style.set_property("padding", "2px 8px");
				let _ = style.set_property("border-radius", "10px");
				let _ = style.set_property("color", "#fff");
				let _ = style.set_property("font-size", "11px");
				let _ = style.set_property("background", &content.cluster_color);
				let _ = self.root.append_child(&badge);
			}
		}

		self.move_to(pointer_x, pointer_y);
		let _ = self.root.style().set_property("display", "block");
	}

	/// Reposition the tooltip while the pointer moves over a node.
	pub fn move_to(&self, pointer_x: f64, pointer_y: f64) {
		let style = self.root.style();
		let _ = style.set_property("left", &format!("{}px", pointer_x + OFFSET_X));
		let _ = style.set_property("top", &format!("{}px", pointer_y + OFFSET_Y));
	}

	/// Hide without destroying. Safe to call repeatedly.
	pub fn hide(&self) {
		let _ = self.root.style().set_property("display", "none");
	}

	/// Remove the overlay from the document. Consumes the tooltip so a
	/// disposed overlay cannot be shown again.
	pub fn dispose(self) {
		self.root.remove();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_graph::normalize::normalize;
	use crate::components::concept_graph::types::{GraphNode, GraphPayload, Year};

	fn layout_node(node: GraphNode) -> LayoutNode {
		normalize(&GraphPayload {
			nodes: vec![node],
			edges: vec![],
		})
		.nodes
		.remove(0)
	}

	#[test]
	fn truncation_appends_ellipsis_only_past_the_limit() {
		assert_eq!(truncate("short", 20), "short");
		assert_eq!(truncate("exactly twenty chars", 20), "exactly twenty chars");
		assert_eq!(
			truncate("twenty-one characters", 20),
			"twenty-one character..."
		);
	}

	#[test]
	fn single_author_is_shown_verbatim() {
		assert_eq!(first_author("Ada Lovelace"), "Ada Lovelace");
	}

	#[test]
	fn multiple_authors_collapse_to_et_al() {
		assert_eq!(first_author("A. Smith, B. Jones"), "A. Smith et al.");
		assert_eq!(first_author("A. Smith; B. Jones; C. Wu"), "A. Smith et al.");
	}

	#[test]
	fn content_defaults_untitled_and_numbered_cluster() {
		let content = TooltipContent::for_node(
			&layout_node(GraphNode::with_id("a")),
			&ClusterPalette::default(),
			&ClusterNames::new(),
		);

		assert_eq!(content.title, "Untitled");
		assert_eq!(content.byline, None);
		assert_eq!(content.year, None);
		assert_eq!(content.cluster, "Cluster 1");
	}

	#[test]
	fn content_truncates_title_and_cluster_name() {
		let mut node = GraphNode::with_id("a");
		node.title = Some("x".repeat(80));
		node.cluster_id = Some(1);
		node.year = Some(Year::Number(2021));
		let mut names = ClusterNames::new();
		names.insert("1".to_string(), "y".repeat(40));

		let content = TooltipContent::for_node(
			&layout_node(node),
			&ClusterPalette::default(),
			&names,
		);

		assert_eq!(content.title.chars().count(), 63);
		assert!(content.title.ends_with("..."));
		assert_eq!(content.cluster.chars().count(), 33);
		assert_eq!(content.year.as_deref(), Some("2021"));
	}
}
