//! Cluster colors and labels.
//!
//! Clusters are identified by small integers assigned by the backend. The
//! color table is an ordered sequence and selection wraps via modulo, so a
//! payload with more clusters than colors reuses them deliberately rather than
//! falling off the end.

use super::types::ClusterNames;

/// RGBA color used for canvas fills and gradient stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color from RGB channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Copy of this color with a different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS representation: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parse `#RRGGBB` hex notation. Anything else comes back mid-gray.
	pub fn parse(css: &str) -> Color {
		if let Some(hex) = css.strip_prefix('#') {
			if hex.len() == 6 {
				let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(128);
				let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(128);
				let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(128);
				return Color::rgb(r, g, b);
			}
		}
		Color::rgb(128, 128, 128)
	}
}

/// Ordered cluster color table with modulo wrap-around.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterPalette {
	colors: Vec<Color>,
}

impl ClusterPalette {
	/// Palette from explicit colors. Empty input falls back to the default.
	pub fn new(colors: Vec<Color>) -> Self {
		if colors.is_empty() {
			Self::default()
		} else {
			Self { colors }
		}
	}

	/// Color for a cluster id, wrapping past the table length.
	pub fn color_for(&self, cluster_id: u32) -> Color {
		self.colors[cluster_id as usize % self.colors.len()]
	}
}

impl Default for ClusterPalette {
	/// Muted earth-and-slate palette used for paper clusters.
	fn default() -> Self {
		Self {
			colors: vec![
				Color::rgb(0xc4, 0xa7, 0x7d), // Tan
				Color::rgb(0x7a, 0x9e, 0x7e), // Sage
				Color::rgb(0x9b, 0x8a, 0xa6), // Heather
				Color::rgb(0xc4, 0x9a, 0x6c), // Camel
				Color::rgb(0x6b, 0x8e, 0x9f), // Slate blue
				Color::rgb(0xb8, 0x87, 0x7a), // Clay
				Color::rgb(0x8f, 0xa8, 0x7a), // Moss
				Color::rgb(0xa6, 0x8b, 0x7a), // Mocha
			],
		}
	}
}

/// Human label for a cluster, falling back to `"Cluster {id+1}"` when the
/// (possibly sparse) name table has no entry.
pub fn cluster_label(names: &ClusterNames, cluster_id: u32) -> String {
	names
		.get(&cluster_id.to_string())
		.cloned()
		.unwrap_or_else(|| format!("Cluster {}", cluster_id + 1))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn color_selection_is_periodic_in_table_length() {
		let palette = ClusterPalette::default();
		for k in 0..8u32 {
			assert_eq!(palette.color_for(k), palette.color_for(k + 8));
			assert_eq!(palette.color_for(k), palette.color_for(k + 16));
		}
	}

	#[test]
	fn empty_palette_falls_back_to_default() {
		let palette = ClusterPalette::new(vec![]);
		assert_eq!(palette.color_for(0), ClusterPalette::default().color_for(0));
	}

	#[test]
	fn label_falls_back_to_numbered_cluster() {
		let mut names = ClusterNames::new();
		names.insert("0".to_string(), "Graph Neural Networks".to_string());

		assert_eq!(cluster_label(&names, 0), "Graph Neural Networks");
		assert_eq!(cluster_label(&names, 2), "Cluster 3");
	}

	#[test]
	fn css_round_trip() {
		assert_eq!(Color::parse("#c4a77d").to_css(), "#c4a77d");
		assert_eq!(
			Color::rgb(255, 0, 0).with_alpha(0.6).to_css(),
			"rgba(255, 0, 0, 0.6)"
		);
		// Unparseable input degrades to gray rather than erroring.
		assert_eq!(Color::parse("tomato"), Color::rgb(128, 128, 128));
	}
}
