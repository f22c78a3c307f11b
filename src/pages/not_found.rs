//! Fallback route.

use leptos::prelude::*;
use leptos_router::components::A;

/// Fallback page for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="page page-not-found">
			<h1>"Page not found"</h1>
			<p>
				"Nothing lives at this address. "
				<A href="/dashboard">"Back to your projects"</A>
			</p>
		</main>
	}
}
