//! Wire types for the backend API.
//!
//! Response envelopes mirror the backend exactly: collections and single
//! records arrive wrapped (`{"projects": [...]}`, `{"project": {...}}`), and
//! error bodies carry a human-readable `detail` field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::components::concept_graph::Year;

/// Signed-in user identity, also persisted to local storage.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct User {
	/// Backend user id.
	pub id: String,
	/// Account email.
	pub email: String,
}

/// Request body for sign-in and sign-up.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
}

/// Response from sign-in/sign-up. Sign-up may omit the token pair when the
/// account still needs email confirmation.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
	/// Backend user id.
	pub user_id: String,
	/// Account email.
	pub email: String,
	/// Access token, absent when no session was started.
	#[serde(default)]
	pub access_token: Option<String>,
	/// Refresh token, absent when no session was started.
	#[serde(default)]
	pub refresh_token: Option<String>,
	/// Informational message (e.g. "check your email").
	#[serde(default)]
	pub message: Option<String>,
}

/// Response from the token refresh endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct RefreshResponse {
	/// New access token.
	pub access_token: String,
	/// New refresh token.
	pub refresh_token: String,
}

/// A research project grouping papers.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Project {
	/// Project id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Optional free-text description.
	#[serde(default)]
	pub description: Option<String>,
	/// Creation timestamp as reported by the backend.
	#[serde(default)]
	pub created_at: Option<String>,
}

/// `{"projects": [...]}` envelope.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectList {
	/// Projects, newest first.
	#[serde(default)]
	pub projects: Vec<Project>,
}

/// `{"project": {...}}` envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct ProjectEnvelope {
	/// The wrapped project.
	pub project: Project,
}

/// Request body for project creation.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectDraft {
	/// Display name.
	pub name: String,
	/// Optional description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Partial update for a project; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProjectUpdate {
	/// New display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// An uploaded paper.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Paper {
	/// Paper id.
	pub id: String,
	/// Title extracted from the PDF or supplied manually.
	#[serde(default)]
	pub title: Option<String>,
	/// Comma-separated author list.
	#[serde(default)]
	pub authors: Option<String>,
	/// Publication year.
	#[serde(default)]
	pub year: Option<Year>,
	/// Abstract text.
	#[serde(default, rename = "abstract")]
	pub abstract_text: Option<String>,
	/// Cluster assignment after the last clustering run.
	#[serde(default)]
	pub cluster_id: Option<u32>,
}

/// `{"papers": [...]}` envelope.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaperList {
	/// Papers, newest first.
	#[serde(default)]
	pub papers: Vec<Paper>,
}

/// `{"paper": {...}}` envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct PaperEnvelope {
	/// The wrapped paper.
	pub paper: Paper,
}

/// Result of a clustering run.
#[derive(Clone, Debug, Deserialize)]
pub struct ClusterOutcome {
	/// Number of clusters found.
	pub n_clusters: u32,
	/// Generated summary per cluster id (as decimal string).
	#[serde(default)]
	pub cluster_summaries: HashMap<String, String>,
}

/// Generic acknowledgement body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Acknowledgement {
	/// Optional informational message.
	#[serde(default)]
	pub message: Option<String>,
}

/// Error body shape used by the backend.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
	/// Human-readable failure description.
	#[serde(default)]
	pub detail: Option<String>,
}
