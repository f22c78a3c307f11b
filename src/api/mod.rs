//! Session store and HTTP gateway for the clustering backend.

pub mod client;
pub mod session;
pub mod types;

pub use client::ApiError;
pub use session::Session;

/// Backend base URL. Overridable at compile time via `PAPER_ATLAS_API_URL`.
pub fn base_url() -> &'static str {
	option_env!("PAPER_ATLAS_API_URL").unwrap_or("http://localhost:8000")
}
