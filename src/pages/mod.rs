//! Top-level pages routed by the app shell.

pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod project;
