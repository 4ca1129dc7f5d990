//! Team management: list and create.

#[cfg(test)]
#[path = "teams_test.rs"]
mod teams_test;

use leptos::prelude::*;

use super::settle;
use crate::net::credentials::CredentialStore;
use crate::net::transport::Transport;
use crate::state::session::{ConsoleSession, SessionContext};
use crate::state::teams::TeamsState;
use crate::util::task::spawn_browser_task;
use crate::util::time::format_date;
use crate::util::validation::{MSG_FILL_ALL_FIELDS, required_name};

pub const MSG_FETCH_TEAMS_FAILED: &str = "Failed to fetch teams";
pub const MSG_CREATE_TEAM_FAILED: &str = "Failed to create team";

pub async fn load_teams<S, T>(session: &SessionContext<S, T>) -> TeamsState
where
    S: CredentialStore,
    T: Transport,
{
    let result = session.api().list_teams().await;
    match settle(session, result, MSG_FETCH_TEAMS_FAILED) {
        Ok(teams) => TeamsState { teams, loading: false, error: None },
        Err(message) => TeamsState { error: Some(message), ..TeamsState::default() },
    }
}

/// Create a team named `name` (trimmed).
///
/// # Errors
///
/// Returns the inline message for a blank name (no request is made), the
/// server's message, or [`MSG_CREATE_TEAM_FAILED`].
pub async fn create_team<S, T>(session: &SessionContext<S, T>, name: &str) -> Result<(), String>
where
    S: CredentialStore,
    T: Transport,
{
    let name = required_name(name).ok_or_else(|| MSG_FILL_ALL_FIELDS.to_owned())?;
    let result = session.api().create_team(&name).await;
    settle(session, result, MSG_CREATE_TEAM_FAILED).map(drop)
}

#[component]
pub fn TeamsPage() -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let state = RwSignal::new(TeamsState { loading: true, ..TeamsState::default() });
    let show_create = RwSignal::new(false);
    let new_name = RwSignal::new(String::new());

    let load_session = session.clone();
    spawn_browser_task(async move {
        state.set(load_teams(&load_session).await);
    });

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        let name = new_name.get_untracked();
        state.update(|s| s.error = None);
        spawn_browser_task(async move {
            match create_team(&session, &name).await {
                Ok(()) => {
                    show_create.set(false);
                    new_name.set(String::new());
                    state.set(load_teams(&session).await);
                }
                Err(message) => state.update(|s| s.error = Some(message)),
            }
        });
    };

    let rows = move || {
        state
            .get()
            .teams
            .into_iter()
            .map(|team| {
                view! {
                    <tr>
                        <td>{team.name}</td>
                        <td>{format_date(team.created_at.as_deref())}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="page page--teams">
            <header class="page__header">
                <h1 class="page__title">"Team Management"</h1>
                <button class="btn btn--primary" on:click=move |_| show_create.set(true)>"Create Team"</button>
            </header>
            <Show when=move || state.get().error.is_some()>
                <p class="page__error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !state.get().loading
                fallback=|| view! { <div class="spinner" aria-label="Loading"></div> }
            >
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Created"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </Show>
            <Show when=move || show_create.get()>
                <div class="dialog-backdrop" on:click=move |_| show_create.set(false)>
                    <form class="dialog" on:click=move |ev| ev.stop_propagation() on:submit=on_create.clone()>
                        <h2>"Create Team"</h2>
                        <label class="dialog__label">
                            "Team name"
                            <input
                                class="dialog__input"
                                type="text"
                                prop:value=move || new_name.get()
                                on:input=move |ev| new_name.set(event_target_value(&ev))
                            />
                        </label>
                        <div class="dialog__actions">
                            <button class="btn" type="button" on:click=move |_| show_create.set(false)>"Cancel"</button>
                            <button class="btn btn--primary" type="submit">"Create"</button>
                        </div>
                    </form>
                </div>
            </Show>
        </section>
    }
}
