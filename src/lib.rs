//! paper-atlas: concept-map visualization for research paper collections.
//!
//! A WASM single-page app: sign in, organize papers into projects, run
//! server-side clustering, and explore the result as an interactive
//! cluster-colored concept map rendered on a canvas.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{A, Redirect, Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod pages;

use api::Session;
use pages::dashboard::Dashboard;
use pages::login::Login;
use pages::not_found::NotFound;
use pages::project::ProjectView;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("paper-atlas: logging initialized");
}

/// Root component: restores the persisted session, provides it as context,
/// and mounts the router.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let session = Session::restore();
	provide_context(session);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Paper Atlas" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<NavigationBar />
			<Routes fallback=NotFound>
				<Route path=path!("/") view=Home />
				<Route path=path!("/login") view=Login />
				<Route path=path!("/dashboard") view=Dashboard />
				<Route path=path!("/projects/:id") view=ProjectView />
			</Routes>
		</Router>
	}
}

/// Landing route: straight to the dashboard when signed in, otherwise to the
/// login page.
#[component]
fn Home() -> impl IntoView {
	let session = expect_context::<Session>();
	view! {
		{move || {
			if session.is_authenticated() {
				view! { <Redirect path="/dashboard" /> }
			} else {
				view! { <Redirect path="/login" /> }
			}
		}}
	}
}

/// Top navigation: brand link plus the signed-in user's email and a sign-out
/// button. Hidden while signed out.
#[component]
fn NavigationBar() -> impl IntoView {
	let session = expect_context::<Session>();
	let navigate = use_navigate();

	view! {
		{move || {
			session.user().map(|user| {
				let navigate = navigate.clone();
				let sign_out = move |_| {
					session.sign_out();
					navigate("/login", Default::default());
				};
				view! {
					<nav class="navbar">
						<A href="/dashboard">
							<span class="brand">"Paper Atlas"</span>
						</A>
						<div class="navbar-session">
							<span class="muted">{user.email.clone()}</span>
							<button on:click=sign_out>"Sign out"</button>
						</div>
					</nav>
				}
			})
		}}
	}
}
