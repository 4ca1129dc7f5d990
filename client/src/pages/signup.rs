//! Signup page.
//!
//! Registration does not sign in. After a successful submit the page shows a
//! confirmation and moves to `/login` after [`REDIRECT_DELAY_MS`].

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::net::credentials::CredentialStore;
use crate::net::transport::Transport;
use crate::routes;
use crate::state::session::{ConsoleSession, SessionContext};
use crate::util::task::{sleep_ms, spawn_browser_task};
use crate::util::validation::validate_signup;

pub const MSG_REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const MSG_REGISTERED: &str = "Account created successfully! Redirecting to login...";

/// Delay between the confirmation and the move to `/login`.
pub const REDIRECT_DELAY_MS: u32 = 2_000;

/// Validate and register.
///
/// # Errors
///
/// Returns the inline message: a validation message (no request is made),
/// the server's message, or [`MSG_REGISTRATION_FAILED`].
pub async fn submit_signup<S, T>(
    session: &SessionContext<S, T>,
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), String>
where
    S: CredentialStore,
    T: Transport,
{
    let form = validate_signup(name, email, password, confirm).map_err(str::to_owned)?;
    match session.register(&form.name, &form.email, &form.password).await {
        Ok(_) => Ok(()),
        Err(e) => {
            leptos::logging::warn!("registration failed: {e}");
            Err(e.user_message(MSG_REGISTRATION_FAILED))
        }
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let navigate = use_navigate();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || success.get_untracked() {
            return;
        }
        error.set(None);
        busy.set(true);
        let session = session.clone();
        let navigate = navigate.clone();
        let (name_value, email_value) = (name.get_untracked(), email.get_untracked());
        let (password_value, confirm_value) = (password.get_untracked(), confirm.get_untracked());
        spawn_browser_task(async move {
            let outcome = submit_signup(&session, &name_value, &email_value, &password_value, &confirm_value).await;
            busy.set(false);
            match outcome {
                Ok(()) => {
                    success.set(true);
                    sleep_ms(REDIRECT_DELAY_MS).await;
                    navigate(routes::LOGIN, NavigateOptions::default());
                }
                Err(message) => error.set(Some(message)),
            }
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="auth-label" for=id>{label}</label>
            <input
                id=id
                class="auth-input"
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    {field("signup-name", "Name", "text", name)}
                    {field("signup-email", "Email", "email", email)}
                    {field("signup-password", "Password", "password", password)}
                    {field("signup-confirm", "Confirm password", "password", confirm)}
                    <Show when=move || error.get().is_some()>
                        <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <Show when=move || success.get()>
                        <p class="auth-message auth-message--success">{MSG_REGISTERED}</p>
                    </Show>
                    <button
                        class="btn btn--primary auth-submit"
                        type="submit"
                        disabled=move || busy.get() || success.get()
                    >
                        {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already registered? "
                    <A href=routes::LOGIN>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
