//! Project dashboard: list, create, and delete research projects.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::{A, Redirect};
use wasm_bindgen_futures::spawn_local;

use crate::api::client::projects;
use crate::api::{Session, types::Project};

/// Lists the signed-in user's projects newest-first with an inline
/// create-project form. Unauthenticated visitors are redirected to the login
/// page.
#[component]
pub fn Dashboard() -> impl IntoView {
	let session = expect_context::<Session>();
	if !session.is_authenticated() {
		return view! { <Redirect path="/login" /> }.into_any();
	}

	let (project_list, set_project_list) = signal(Vec::<Project>::new());
	let (loading, set_loading) = signal(true);
	let (error, set_error) = signal(None::<String>);
	let (show_form, set_show_form) = signal(false);
	let (name, set_name) = signal(String::new());
	let (description, set_description) = signal(String::new());
	let (creating, set_creating) = signal(false);

	let load = move || {
		set_loading.set(true);
		spawn_local(async move {
			match projects::list().await {
				Ok(list) => set_project_list.set(list),
				Err(err) => set_error.set(Some(err.to_string())),
			}
			set_loading.set(false);
		});
	};
	load();

	let create = move |ev: SubmitEvent| {
		ev.prevent_default();
		let name_value = name.get_untracked();
		if name_value.trim().is_empty() {
			return;
		}
		let description_value = description.get_untracked();
		set_creating.set(true);
		spawn_local(async move {
			match projects::create(name_value.trim(), description_value.trim()).await {
				Ok(_) => {
					set_show_form.set(false);
					set_name.set(String::new());
					set_description.set(String::new());
					load();
				}
				Err(err) => set_error.set(Some(err.to_string())),
			}
			set_creating.set(false);
		});
	};

	let delete = move |project_id: String| {
		let confirmed = web_sys::window()
			.map(|w| {
				w.confirm_with_message(
					"Are you sure you want to delete this project? All papers will be permanently deleted.",
				)
				.unwrap_or(false)
			})
			.unwrap_or(false);
		if !confirmed {
			return;
		}
		spawn_local(async move {
			match projects::delete(&project_id).await {
				Ok(()) => load(),
				Err(err) => set_error.set(Some(err.to_string())),
			}
		});
	};

	view! {
		<main class="page page-dashboard">
			<header class="page-header">
				<div>
					<h1>"Your Research Projects"</h1>
					<p class="subtitle">
						{move || {
							session
								.user()
								.map(|user| {
									let name = user
										.email
										.split('@')
										.next()
										.unwrap_or("")
										.to_string();
									format!("Welcome back, {}", name)
								})
						}}
					</p>
				</div>
				<button on:click=move |_| set_show_form.set(true)>"+ New Project"</button>
			</header>

			{move || error.get().map(|msg| view! { <p class="alert alert-error">{msg}</p> })}

			{move || {
				show_form.get().then(|| view! {
					<form class="project-form" on:submit=create>
						<label>
							"Project name"
							<input
								type="text"
								prop:value=name
								on:input=move |ev| set_name.set(event_target_value(&ev))
								required
							/>
						</label>
						<label>
							"Description (optional)"
							<input
								type="text"
								prop:value=description
								on:input=move |ev| set_description.set(event_target_value(&ev))
							/>
						</label>
						<div class="form-actions">
							<button type="button" on:click=move |_| set_show_form.set(false)>
								"Cancel"
							</button>
							<button type="submit" disabled=creating>
								{move || if creating.get() { "Creating..." } else { "Create Project" }}
							</button>
						</div>
					</form>
				})
			}}

			{move || {
				if loading.get() {
					view! { <p class="muted">"Loading your projects..."</p> }.into_any()
				} else if project_list.with(Vec::is_empty) {
					view! {
						<div class="empty-state">
							<h2>"Create your first research project"</h2>
							<p class="muted">
								"Projects help you organize papers around a specific topic, thesis, or literature review."
							</p>
							<button on:click=move |_| set_show_form.set(true)>"Create Project"</button>
						</div>
					}
					.into_any()
				} else {
					view! {
						<ul class="project-grid">
							{project_list
								.get()
								.into_iter()
								.map(|project| {
									let href = format!("/projects/{}", project.id);
									let project_id = project.id.clone();
									view! {
										<li class="project-card">
											<A href=href>
												<h2>{project.name.clone()}</h2>
												{project
													.description
													.clone()
													.map(|d| view! { <p class="muted">{d}</p> })}
											</A>
											<button
												class="danger"
												on:click=move |_| delete(project_id.clone())
											>
												"Delete"
											</button>
										</li>
									}
								})
								.collect_view()}
						</ul>
					}
					.into_any()
				}
			}}
		</main>
	}
	.into_any()
}
