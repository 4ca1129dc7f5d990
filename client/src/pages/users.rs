//! User management: list, create, assign role/team, delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page needs four independent lists (users, roles, teams, current
//! operator). They are fetched in parallel and each one degrades to empty on
//! failure, so a 403 on one list never blanks the others. Every successful
//! action re-fetches everything.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use leptos::prelude::*;

use super::{settle, settle_soft};
use crate::net::credentials::CredentialStore;
use crate::net::transport::Transport;
use crate::net::types::{NewUser, User};
use crate::state::session::{ConsoleSession, SessionContext};
use crate::state::users::{UsersState, is_complete, selected_role_id, selected_team_id};
use crate::util::task::spawn_browser_task;
use crate::util::time::now_iso;
use crate::util::validation::MSG_FILL_ALL_FIELDS;

pub const MSG_CREATE_USER_FAILED: &str = "Failed to create user";
pub const MSG_ASSIGN_ROLE_FAILED: &str = "Failed to assign role";
pub const MSG_ASSIGN_TEAM_FAILED: &str = "Failed to assign team";
pub const MSG_DELETE_USER_FAILED: &str = "Failed to delete user";

/// A mutation issued from the user table or its dialogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    Create(NewUser),
    AssignRole { user_id: String, role_id: String },
    AssignTeam { user_id: String, team_id: String },
    Delete { user_id: String },
}

/// Fetch users, roles, teams and the current operator in parallel.
pub async fn load_users<S, T>(session: &SessionContext<S, T>) -> UsersState
where
    S: CredentialStore,
    T: Transport,
{
    let api = session.api();
    let (users, roles, teams, me) =
        futures::join!(api.list_users(), api.list_roles(), api.list_teams(), api.current_user());
    UsersState {
        users: settle_soft(session, users, "users").unwrap_or_default(),
        roles: settle_soft(session, roles, "roles").unwrap_or_default(),
        teams: settle_soft(session, teams, "teams").unwrap_or_default(),
        current_user: settle_soft(session, me, "current user"),
        loading: false,
        error: None,
    }
}

/// Run one mutation. Clearing a picker (empty id) is a no-op.
///
/// # Errors
///
/// Returns the inline message: the server's message or the action's fallback.
pub async fn apply_user_action<S, T>(session: &SessionContext<S, T>, action: &UserAction) -> Result<(), String>
where
    S: CredentialStore,
    T: Transport,
{
    let api = session.api();
    match action {
        UserAction::Create(draft) => {
            if !is_complete(draft) {
                return Err(MSG_FILL_ALL_FIELDS.to_owned());
            }
            let result = api.create_user(draft).await;
            settle(session, result, MSG_CREATE_USER_FAILED).map(drop)
        }
        UserAction::AssignRole { role_id: id, .. } | UserAction::AssignTeam { team_id: id, .. } if id.is_empty() => {
            Ok(())
        }
        UserAction::AssignRole { user_id, role_id } => {
            let valid_from = now_iso();
            let result = api.assign_role(user_id, role_id, valid_from.as_deref()).await;
            settle(session, result, MSG_ASSIGN_ROLE_FAILED).map(drop)
        }
        UserAction::AssignTeam { user_id, team_id } => {
            let result = api.assign_team(user_id, team_id).await;
            settle(session, result, MSG_ASSIGN_TEAM_FAILED).map(drop)
        }
        UserAction::Delete { user_id } => {
            let result = api.delete_user(user_id).await;
            settle(session, result, MSG_DELETE_USER_FAILED).map(drop)
        }
    }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let state = RwSignal::new(UsersState { loading: true, ..UsersState::default() });
    let show_create = RwSignal::new(false);
    let draft = RwSignal::new(NewUser::default());
    let pending_delete = RwSignal::new(None::<User>);

    let load_session = session.clone();
    spawn_browser_task(async move {
        state.set(load_users(&load_session).await);
    });

    let dispatch = move |action: UserAction| {
        let session = session.clone();
        state.update(|s| s.error = None);
        spawn_browser_task(async move {
            match apply_user_action(&session, &action).await {
                Ok(()) => {
                    if matches!(action, UserAction::Create(_)) {
                        show_create.set(false);
                        draft.set(NewUser::default());
                    }
                    state.set(load_users(&session).await);
                }
                Err(message) => state.update(|s| s.error = Some(message)),
            }
        });
    };

    let dispatch_create = dispatch.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        dispatch_create(UserAction::Create(draft.get_untracked()));
    };

    let dispatch_delete = dispatch.clone();
    let on_confirm_delete = move |_| {
        if let Some(user) = pending_delete.get_untracked() {
            pending_delete.set(None);
            dispatch_delete(UserAction::Delete { user_id: user.id });
        }
    };

    let rows = move || {
        let snapshot = state.get();
        snapshot
            .users
            .iter()
            .map(|user| {
                let user_id = user.id.clone();
                let role_id = selected_role_id(user).to_owned();
                let team_id = selected_team_id(user).to_owned();
                let deletable = snapshot.can_delete(&user.id);
                let on_role = {
                    let dispatch = dispatch.clone();
                    let user_id = user_id.clone();
                    move |ev: leptos::ev::Event| {
                        let role_id = event_target_value(&ev);
                        dispatch(UserAction::AssignRole { user_id: user_id.clone(), role_id });
                    }
                };
                let on_team = {
                    let dispatch = dispatch.clone();
                    let user_id = user_id.clone();
                    move |ev: leptos::ev::Event| {
                        let team_id = event_target_value(&ev);
                        dispatch(UserAction::AssignTeam { user_id: user_id.clone(), team_id });
                    }
                };
                let target = user.clone();
                view! {
                    <tr>
                        <td>{user.name.clone()}</td>
                        <td>{user.email.clone()}</td>
                        <td>
                            <select class="table-select" on:change=on_role>
                                <option value="" selected={role_id.is_empty()}>"No role"</option>
                                {snapshot
                                    .roles
                                    .iter()
                                    .map(|role| {
                                        view! {
                                            <option value=role.id.clone() selected={role.id == role_id}>
                                                {role.name.clone()}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </td>
                        <td>
                            <select class="table-select" on:change=on_team>
                                <option value="" selected={team_id.is_empty()}>"No team"</option>
                                {snapshot
                                    .teams
                                    .iter()
                                    .map(|team| {
                                        view! {
                                            <option value=team.id.clone() selected={team.id == team_id}>
                                                {team.name.clone()}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </td>
                        <td>
                            <button
                                class="btn btn--danger"
                                disabled={!deletable}
                                title={if deletable { "Delete user" } else { "You cannot delete yourself" }}
                                on:click=move |_| pending_delete.set(Some(target.clone()))
                            >
                                "Delete"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let draft_field = move |label: &'static str, kind: &'static str, get: fn(&NewUser) -> String, set: fn(&mut NewUser, String)| {
        view! {
            <label class="dialog__label">
                {label}
                <input
                    class="dialog__input"
                    type=kind
                    prop:value=move || get(&draft.get())
                    on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
                />
            </label>
        }
    };

    view! {
        <section class="page page--users">
            <header class="page__header">
                <h1 class="page__title">"User Management"</h1>
                <button class="btn btn--primary" on:click=move |_| show_create.set(true)>"Create User"</button>
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
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Team"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>{rows.clone()}</tbody>
                </table>
            </Show>

            <Show when=move || show_create.get()>
                <div class="dialog-backdrop" on:click=move |_| show_create.set(false)>
                    <form class="dialog" on:click=move |ev| ev.stop_propagation() on:submit=on_create.clone()>
                        <h2>"Create User"</h2>
                        {draft_field("Name", "text", |d| d.name.clone(), |d, v| d.name = v)}
                        {draft_field("Email", "email", |d| d.email.clone(), |d, v| d.email = v)}
                        {draft_field("Password", "password", |d| d.password.clone(), |d, v| d.password = v)}
                        <div class="dialog__actions">
                            <button class="btn" type="button" on:click=move |_| show_create.set(false)>"Cancel"</button>
                            <button class="btn btn--primary" type="submit">"Create"</button>
                        </div>
                    </form>
                </div>
            </Show>

            <Show when=move || pending_delete.get().is_some()>
                <div class="dialog-backdrop" on:click=move |_| pending_delete.set(None)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Delete user"</h2>
                        <p>
                            {move || {
                                let name = pending_delete.get().map(|u| u.name).unwrap_or_default();
                                format!("Delete {name}? This cannot be undone.")
                            }}
                        </p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| pending_delete.set(None)>"Cancel"</button>
                            <button class="btn btn--danger" on:click=on_confirm_delete.clone()>"Delete"</button>
                        </div>
                    </div>
                </div>
            </Show>
        </section>
    }
}
