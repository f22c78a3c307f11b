//! Sign-in / sign-up page.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::Session;

/// Combined sign-in and sign-up form. Successful authentication navigates to
/// the dashboard; a sign-up that needs email confirmation flips back to the
/// sign-in tab with a notice instead.
#[component]
pub fn Login() -> impl IntoView {
	let session = expect_context::<Session>();
	let navigate = use_navigate();

	let (signup_mode, set_signup_mode) = signal(false);
	let (email, set_email) = signal(String::new());
	let (password, set_password) = signal(String::new());
	let (confirm, set_confirm) = signal(String::new());
	let (error, set_error) = signal(None::<String>);
	let (notice, set_notice) = signal(None::<String>);
	let (busy, set_busy) = signal(false);

	let submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		set_error.set(None);
		set_notice.set(None);

		let email_value = email.get_untracked();
		let password_value = password.get_untracked();
		let signing_up = signup_mode.get_untracked();
		if signing_up {
			if password_value != confirm.get_untracked() {
				set_error.set(Some("Passwords do not match".to_string()));
				return;
			}
			if password_value.chars().count() < 6 {
				set_error.set(Some("Password must be at least 6 characters".to_string()));
				return;
			}
		}

		set_busy.set(true);
		let navigate = navigate.clone();
		spawn_local(async move {
			if signing_up {
				match session.sign_up(&email_value, &password_value).await {
					Ok(outcome) if outcome.session_started => {
						navigate("/dashboard", Default::default());
					}
					Ok(outcome) => {
						set_notice.set(Some(outcome.message.unwrap_or_else(|| {
							"Account created! You can now sign in.".to_string()
						})));
						set_signup_mode.set(false);
					}
					Err(err) => set_error.set(Some(err.to_string())),
				}
			} else {
				match session.sign_in(&email_value, &password_value).await {
					Ok(()) => navigate("/dashboard", Default::default()),
					Err(err) => set_error.set(Some(err.to_string())),
				}
			}
			set_busy.set(false);
		});
	};

	view! {
		<main class="page page-login">
			<div class="login-card">
				<h1>"Paper Atlas"</h1>
				<p class="subtitle">"Organize your research, visually"</p>

				<div class="login-tabs">
					<button
						class:active=move || !signup_mode.get()
						on:click=move |_| set_signup_mode.set(false)
					>
						"Sign In"
					</button>
					<button
						class:active=move || signup_mode.get()
						on:click=move |_| set_signup_mode.set(true)
					>
						"Sign Up"
					</button>
				</div>

				{move || error.get().map(|msg| view! { <p class="alert alert-error">{msg}</p> })}
				{move || notice.get().map(|msg| view! { <p class="alert alert-success">{msg}</p> })}

				<form on:submit=submit>
					<label>
						"Email"
						<input
							type="email"
							prop:value=email
							on:input=move |ev| set_email.set(event_target_value(&ev))
							required
						/>
					</label>
					<label>
						"Password"
						<input
							type="password"
							prop:value=password
							on:input=move |ev| set_password.set(event_target_value(&ev))
							required
						/>
					</label>
					{move || {
						signup_mode.get().then(|| view! {
							<label>
								"Confirm password"
								<input
									type="password"
									prop:value=confirm
									on:input=move |ev| set_confirm.set(event_target_value(&ev))
									required
								/>
							</label>
						})
					}}
					<button type="submit" disabled=busy>
						{move || {
							match (busy.get(), signup_mode.get()) {
								(true, _) => "Working...",
								(false, true) => "Create account",
								(false, false) => "Sign in",
							}
						}}
					</button>
				</form>
			</div>
		</main>
	}
}
