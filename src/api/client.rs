//! HTTP gateway: bearer auth, JSON envelopes, and single-retry token refresh.
//!
//! Every authorized call attaches the current access token. A 401 response
//! triggers exactly one refresh attempt followed by one retry of the original
//! request; a failed refresh clears the persisted session and surfaces
//! [`ApiError::SessionExpired`]. Requests are rebuilt per attempt so the
//! retry picks up the freshly stored token.

use gloo_net::http::{Request, Response};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::FormData;

use super::base_url;
use super::session;
use super::types::{
	Acknowledgement, AuthResponse, ClusterOutcome, Credentials, ErrorBody, Paper, PaperEnvelope,
	PaperList, Project, ProjectDraft, ProjectEnvelope, ProjectList, ProjectUpdate,
	RefreshResponse,
};
use crate::components::concept_graph::GraphPayload;

/// Gateway failure. Everything carries a human-readable message.
#[derive(Clone, Debug, Error)]
pub enum ApiError {
	/// Backend rejected the request; message from its `detail` field.
	#[error("{0}")]
	Api(String),
	/// Transport-level failure before a response arrived.
	#[error("network error: {0}")]
	Network(String),
	/// Token refresh failed; the stored session has been cleared.
	#[error("Session expired. Please sign in again.")]
	SessionExpired,
	/// Response body did not match the expected shape.
	#[error("unexpected response body: {0}")]
	Decode(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		ApiError::Network(err.to_string())
	}
}

fn url(path: &str) -> String {
	format!("{}{}", base_url(), path)
}

fn bearer() -> Option<String> {
	session::access_token().map(|token| format!("Bearer {}", token))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
	if !response.ok() {
		let detail = response
			.json::<ErrorBody>()
			.await
			.ok()
			.and_then(|body| body.detail)
			.unwrap_or_else(|| format!("request failed with status {}", response.status()));
		return Err(ApiError::Api(detail));
	}
	response
		.json::<T>()
		.await
		.map_err(|err| ApiError::Decode(err.to_string()))
}

/// Send a request built by `build`; on 401, refresh the token once and retry
/// once with a freshly built request.
async fn send<T, F>(build: F) -> Result<T, ApiError>
where
	T: DeserializeOwned,
	F: Fn() -> Result<Request, ApiError>,
{
	let response = build()?.send().await?;
	if response.status() == 401 {
		debug!("gateway: 401, refreshing token and retrying once");
		refresh_session().await?;
		let retry = build()?.send().await?;
		return decode(retry).await;
	}
	decode(response).await
}

async fn refresh_session() -> Result<(), ApiError> {
	let Some(token) = session::refresh_token() else {
		session::clear_persisted();
		return Err(ApiError::SessionExpired);
	};
	let encoded = String::from(js_sys::encode_uri_component(&token));
	let path = format!("/api/auth/refresh?refresh_token={}", encoded);
	let refreshed: Result<RefreshResponse, ApiError> = async {
		let response = Request::post(&url(&path)).build()?.send().await?;
		decode(response).await
	}
	.await;
	match refreshed {
		Ok(tokens) => {
			session::store_tokens(&tokens.access_token, &tokens.refresh_token);
			Ok(())
		}
		Err(_) => {
			session::clear_persisted();
			Err(ApiError::SessionExpired)
		}
	}
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
	send(|| {
		let mut request = Request::get(&url(path));
		if let Some(auth) = bearer() {
			request = request.header("Authorization", &auth);
		}
		request.build().map_err(ApiError::from)
	})
	.await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
	send(|| {
		let mut request = Request::post(&url(path));
		if let Some(auth) = bearer() {
			request = request.header("Authorization", &auth);
		}
		request.json(body).map_err(ApiError::from)
	})
	.await
}

async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
	send(|| {
		let mut request = Request::post(&url(path));
		if let Some(auth) = bearer() {
			request = request.header("Authorization", &auth);
		}
		request.build().map_err(ApiError::from)
	})
	.await
}

async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
	send(|| {
		let mut request = Request::put(&url(path));
		if let Some(auth) = bearer() {
			request = request.header("Authorization", &auth);
		}
		request.json(body).map_err(ApiError::from)
	})
	.await
}

async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
	send(|| {
		let mut request = Request::delete(&url(path));
		if let Some(auth) = bearer() {
			request = request.header("Authorization", &auth);
		}
		request.build().map_err(ApiError::from)
	})
	.await
}

async fn post_form<T: DeserializeOwned>(path: &str, form: &FormData) -> Result<T, ApiError> {
	send(|| {
		let mut request = Request::post(&url(path));
		if let Some(auth) = bearer() {
			request = request.header("Authorization", &auth);
		}
		request.body(form.clone()).map_err(ApiError::from)
	})
	.await
}

/// Sign in; no bearer attached and no refresh on failure.
pub(crate) async fn sign_in(credentials: &Credentials) -> Result<AuthResponse, ApiError> {
	let response = Request::post(&url("/api/auth/signin"))
		.json(credentials)?
		.send()
		.await?;
	decode(response).await
}

/// Create an account; no bearer attached and no refresh on failure.
pub(crate) async fn sign_up(credentials: &Credentials) -> Result<AuthResponse, ApiError> {
	let response = Request::post(&url("/api/auth/signup"))
		.json(credentials)?
		.send()
		.await?;
	decode(response).await
}

/// Project CRUD.
pub mod projects {
	use super::*;

	/// List the user's projects, newest first.
	pub async fn list() -> Result<Vec<Project>, ApiError> {
		get_json::<ProjectList>("/api/projects")
			.await
			.map(|list| list.projects)
	}

	/// Create a project.
	pub async fn create(name: &str, description: &str) -> Result<Project, ApiError> {
		let draft = ProjectDraft {
			name: name.to_string(),
			description: (!description.is_empty()).then(|| description.to_string()),
		};
		post_json::<_, ProjectEnvelope>("/api/projects", &draft)
			.await
			.map(|envelope| envelope.project)
	}

	/// Fetch one project.
	pub async fn get(project_id: &str) -> Result<Project, ApiError> {
		get_json::<ProjectEnvelope>(&format!("/api/projects/{}", project_id))
			.await
			.map(|envelope| envelope.project)
	}

	/// Update name and/or description.
	pub async fn update(project_id: &str, update: &ProjectUpdate) -> Result<Project, ApiError> {
		put_json::<_, ProjectEnvelope>(&format!("/api/projects/{}", project_id), update)
			.await
			.map(|envelope| envelope.project)
	}

	/// Delete a project and everything in it.
	pub async fn delete(project_id: &str) -> Result<(), ApiError> {
		delete_json::<Acknowledgement>(&format!("/api/projects/{}", project_id))
			.await
			.map(|_| ())
	}
}

/// Paper listing, upload, and deletion.
pub mod papers {
	use super::*;

	/// List papers in a project, newest first.
	pub async fn list(project_id: &str) -> Result<Vec<Paper>, ApiError> {
		get_json::<PaperList>(&format!("/api/papers/{}", project_id))
			.await
			.map(|list| list.papers)
	}

	/// Upload a paper as multipart form data (`project_id`, `input_type`,
	/// `file`, optional `title`).
	pub async fn upload(form: &FormData) -> Result<Paper, ApiError> {
		post_form::<PaperEnvelope>("/api/papers/upload", form)
			.await
			.map(|envelope| envelope.paper)
	}

	/// Delete a paper.
	pub async fn delete(paper_id: &str) -> Result<(), ApiError> {
		delete_json::<Acknowledgement>(&format!("/api/papers/{}", paper_id))
			.await
			.map(|_| ())
	}
}

/// Clustering runs and graph payloads.
pub mod clustering {
	use super::*;

	/// Run clustering over a project's papers.
	pub async fn cluster(project_id: &str) -> Result<ClusterOutcome, ApiError> {
		post_empty(&format!("/api/cluster/{}", project_id)).await
	}

	/// Fetch the concept-map payload for a project.
	pub async fn graph(project_id: &str) -> Result<GraphPayload, ApiError> {
		get_json(&format!("/api/graph/{}", project_id)).await
	}
}
