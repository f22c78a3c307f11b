//! Session store: token pair plus the signed-in user identity.
//!
//! Tokens and the user record live in `localStorage` so a reload keeps the
//! session; the user identity is mirrored into a reactive signal so views can
//! track authentication state. The gateway reads tokens straight from storage
//! on every request, which keeps a refresh performed mid-flight visible to
//! later requests without any extra plumbing.

use leptos::prelude::*;
use web_sys::Storage;

use super::client::{self, ApiError};
use super::types::{AuthResponse, Credentials, User};

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_KEY: &str = "user";

fn storage() -> Option<Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

/// Current access token, if any.
pub fn access_token() -> Option<String> {
	storage()?.get_item(ACCESS_TOKEN_KEY).ok().flatten()
}

/// Current refresh token, if any.
pub fn refresh_token() -> Option<String> {
	storage()?.get_item(REFRESH_TOKEN_KEY).ok().flatten()
}

/// Persist a new token pair.
pub(crate) fn store_tokens(access: &str, refresh: &str) {
	if let Some(storage) = storage() {
		let _ = storage.set_item(ACCESS_TOKEN_KEY, access);
		let _ = storage.set_item(REFRESH_TOKEN_KEY, refresh);
	}
}

/// Drop everything persisted for the session.
pub(crate) fn clear_persisted() {
	if let Some(storage) = storage() {
		let _ = storage.remove_item(ACCESS_TOKEN_KEY);
		let _ = storage.remove_item(REFRESH_TOKEN_KEY);
		let _ = storage.remove_item(USER_KEY);
	}
}

/// Outcome of a sign-up attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct SignUpOutcome {
	/// True when the backend issued a session immediately.
	pub session_started: bool,
	/// Informational message from the backend, if any.
	pub message: Option<String>,
}

/// Reactive session handle, provided as context at the app root.
#[derive(Clone, Copy)]
pub struct Session {
	user: RwSignal<Option<User>>,
}

impl Session {
	/// Restore the session from local storage, if one was persisted.
	pub fn restore() -> Self {
		let user = storage()
			.and_then(|s| s.get_item(USER_KEY).ok().flatten())
			.and_then(|json| serde_json::from_str(&json).ok());
		Self {
			user: RwSignal::new(user),
		}
	}

	/// Signed-in user, tracked reactively.
	pub fn user(&self) -> Option<User> {
		self.user.get()
	}

	/// Whether a usable session exists. Reactive through the user signal.
	pub fn is_authenticated(&self) -> bool {
		self.user.with(|u| u.is_some()) && access_token().is_some()
	}

	/// Sign in and persist the returned session.
	pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), ApiError> {
		let auth = client::sign_in(&Credentials {
			email: email.to_string(),
			password: password.to_string(),
		})
		.await?;
		self.install(auth)
	}

	/// Create an account. Depending on backend policy this either starts a
	/// session right away or asks for email confirmation first.
	pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ApiError> {
		let auth = client::sign_up(&Credentials {
			email: email.to_string(),
			password: password.to_string(),
		})
		.await?;
		let message = auth.message.clone();
		if auth.access_token.is_some() && auth.refresh_token.is_some() {
			self.install(auth)?;
			Ok(SignUpOutcome {
				session_started: true,
				message,
			})
		} else {
			Ok(SignUpOutcome {
				session_started: false,
				message,
			})
		}
	}

	/// Drop tokens and identity, both persisted and in-memory.
	pub fn sign_out(&self) {
		clear_persisted();
		self.user.set(None);
	}

	fn install(&self, auth: AuthResponse) -> Result<(), ApiError> {
		let (Some(access), Some(refresh)) = (&auth.access_token, &auth.refresh_token) else {
			return Err(ApiError::Api(
				"sign-in did not return a session".to_string(),
			));
		};
		store_tokens(access, refresh);
		let user = User {
			id: auth.user_id,
			email: auth.email,
		};
		if let (Some(storage), Ok(json)) = (storage(), serde_json::to_string(&user)) {
			let _ = storage.set_item(USER_KEY, &json);
		}
		self.user.set(Some(user));
		Ok(())
	}
}
