//! Dashboard home: the operator's profile and team.

#[cfg(test)]
#[path = "dashboard_home_test.rs"]
mod dashboard_home_test;

use leptos::prelude::*;

use super::{settle, settle_soft};
use crate::components::sidebar::role_label;
use crate::net::credentials::CredentialStore;
use crate::net::transport::Transport;
use crate::state::profile::{ProfileState, find_team};
use crate::state::session::{ConsoleSession, SessionContext};
use crate::util::task::spawn_browser_task;
use crate::util::time::format_date;

pub const MSG_LOAD_USER_FAILED: &str = "Failed to load user data";
pub const MSG_NO_TEAM: &str = "You are not currently assigned to any team.";

/// Fetch the operator, then their team when they have one.
///
/// A failed team fetch only hides the team card.
pub async fn load_profile<S, T>(session: &SessionContext<S, T>) -> ProfileState
where
    S: CredentialStore,
    T: Transport,
{
    let result = session.api().current_user().await;
    let user = match settle(session, result, MSG_LOAD_USER_FAILED) {
        Ok(user) => user,
        Err(message) => return ProfileState { error: Some(message), ..ProfileState::default() },
    };
    let team = if user.team_ref_id().is_some() {
        let teams = session.api().list_teams().await;
        settle_soft(session, teams, "teams").and_then(|teams| find_team(&user, &teams))
    } else {
        None
    };
    ProfileState { user: Some(user), team, loading: false, error: None }
}

#[component]
pub fn DashboardHome() -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let profile = RwSignal::new(ProfileState { loading: true, ..ProfileState::default() });

    spawn_browser_task(async move {
        profile.set(load_profile(&session).await);
    });

    view! {
        <section class="page page--home">
            <h1 class="page__title">"Dashboard"</h1>
            <Show when=move || profile.get().loading>
                <div class="spinner" aria-label="Loading"></div>
            </Show>
            <Show when=move || profile.get().error.is_some()>
                <p class="page__error">{move || profile.get().error.unwrap_or_default()}</p>
            </Show>
            {move || {
                profile.get().user.map(|user| {
                    let role = role_label(Some(&user));
                    view! {
                        <div class="card profile-card">
                            <span class="profile-card__avatar">{user.initial()}</span>
                            <div>
                                <h2 class="profile-card__name">{user.name.clone()}</h2>
                                <p class="profile-card__email">{user.email.clone()}</p>
                                <span class="badge">{role}</span>
                            </div>
                        </div>
                    }
                })
            }}
            <Show when=move || profile.get().user.is_some()>
                {move || match profile.get().team {
                    Some(team) => {
                        view! {
                            <div class="card team-card">
                                <h2 class="team-card__name">{team.name}</h2>
                                <p class="team-card__description">{team.description.unwrap_or_default()}</p>
                                <p class="team-card__meta">
                                    {format!("{} members", team.member_count)}
                                    " · created "
                                    {format_date(team.created_at.as_deref())}
                                </p>
                            </div>
                        }
                            .into_any()
                    }
                    None => view! { <p class="card team-card team-card--empty">{MSG_NO_TEAM}</p> }.into_any(),
                }}
            </Show>
        </section>
    }
}
