//! Login page.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::net::credentials::CredentialStore;
use crate::net::transport::Transport;
use crate::routes;
use crate::state::session::{ConsoleSession, SessionContext};
use crate::util::task::spawn_browser_task;
use crate::util::validation::validate_login;

pub const MSG_LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Validate and sign in.
///
/// # Errors
///
/// Returns the inline message: a validation message (no request is made),
/// the server's message, or [`MSG_LOGIN_FAILED`].
pub async fn submit_login<S, T>(session: &SessionContext<S, T>, email: &str, password: &str) -> Result<(), String>
where
    S: CredentialStore,
    T: Transport,
{
    let form = validate_login(email, password).map_err(str::to_owned)?;
    match session.login(&form.email, &form.password).await {
        Ok(_) => Ok(()),
        Err(e) => {
            leptos::logging::warn!("login failed: {e}");
            Err(e.user_message(MSG_LOGIN_FAILED))
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        busy.set(true);
        let session = session.clone();
        let navigate = navigate.clone();
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        spawn_browser_task(async move {
            let outcome = submit_login(&session, &email_value, &password_value).await;
            busy.set(false);
            match outcome {
                Ok(()) => navigate(routes::DASHBOARD, NavigateOptions::default()),
                Err(message) => error.set(Some(message)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <p class="auth-card__subtitle">"Teamdesk administration console"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label" for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label class="auth-label" for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        class="auth-input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="btn btn--primary auth-submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "No account yet? "
                    <A href=routes::SIGNUP>"Create one"</A>
                </p>
            </div>
        </div>
    }
}
