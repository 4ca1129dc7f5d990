//! Role management: roles, their permissions, and the permission catalog.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every mutation re-fetches the role list and hands it to
//! `RolesState::apply_roles`, which also refreshes an open
//! manage-permissions view. The table and the detail view therefore always
//! show the same server copy of a role.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use leptos::prelude::*;

use super::settle;
use crate::net::credentials::CredentialStore;
use crate::net::transport::Transport;
use crate::net::types::Role;
use crate::state::roles::RolesState;
use crate::state::session::{ConsoleSession, SessionContext};
use crate::util::task::spawn_browser_task;
use crate::util::validation::{MSG_FILL_ALL_FIELDS, required_name};

pub const MSG_LOAD_ROLES_FAILED: &str = "Failed to load roles and permissions";
pub const MSG_CREATE_ROLE_FAILED: &str = "Failed to create role";
pub const MSG_ADD_PERMISSION_FAILED: &str = "Failed to add permission";
pub const MSG_REMOVE_PERMISSION_FAILED: &str = "Failed to remove permission";
pub const MSG_SELECT_PERMISSION: &str = "Please select a permission";

/// A mutation issued from the roles table or the detail view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleAction {
    Create { name: String },
    AddPermission { role_id: String, permission_key: String },
    RemovePermission { role_id: String, permission_key: String },
}

/// Fetch roles and the permission catalog into `state`.
pub async fn load_roles<S, T>(session: &SessionContext<S, T>, state: &mut RolesState)
where
    S: CredentialStore,
    T: Transport,
{
    let api = session.api();
    let (roles, permissions) = futures::join!(api.list_roles(), api.list_permissions());
    let loaded = settle(session, roles, MSG_LOAD_ROLES_FAILED)
        .and_then(|roles| settle(session, permissions, MSG_LOAD_ROLES_FAILED).map(|perms| (roles, perms)));
    state.loading = false;
    match loaded {
        Ok((roles, permissions)) => {
            state.apply_roles(roles);
            state.permissions = permissions;
            state.error = None;
        }
        Err(message) => state.error = Some(message),
    }
}

/// Run one mutation and return the re-fetched role list.
///
/// # Errors
///
/// Returns the inline message: a local validation message (no request is
/// made), the server's message, the action's fallback, or
/// [`MSG_LOAD_ROLES_FAILED`] when only the re-fetch failed.
pub async fn apply_role_action<S, T>(session: &SessionContext<S, T>, action: &RoleAction) -> Result<Vec<Role>, String>
where
    S: CredentialStore,
    T: Transport,
{
    let api = session.api();
    match action {
        RoleAction::Create { name } => {
            let name = required_name(name).ok_or_else(|| MSG_FILL_ALL_FIELDS.to_owned())?;
            let result = api.create_role(&name).await;
            settle(session, result, MSG_CREATE_ROLE_FAILED)?;
        }
        RoleAction::AddPermission { role_id, permission_key } => {
            if permission_key.is_empty() {
                return Err(MSG_SELECT_PERMISSION.to_owned());
            }
            let result = api.add_permission_to_role(role_id, permission_key).await;
            settle(session, result, MSG_ADD_PERMISSION_FAILED)?;
        }
        RoleAction::RemovePermission { role_id, permission_key } => {
            let result = api.remove_permission_from_role(role_id, permission_key).await;
            settle(session, result, MSG_REMOVE_PERMISSION_FAILED)?;
        }
    }
    let roles = api.list_roles().await;
    settle(session, roles, MSG_LOAD_ROLES_FAILED)
}

#[component]
pub fn RolesPage() -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let state = RwSignal::new(RolesState { loading: true, ..RolesState::default() });
    let show_create = RwSignal::new(false);
    let new_name = RwSignal::new(String::new());
    let picked_permission = RwSignal::new(String::new());
    let pending_removal = RwSignal::new(None::<String>);

    let load_session = session.clone();
    spawn_browser_task(async move {
        let mut next = state.get_untracked();
        load_roles(&load_session, &mut next).await;
        state.set(next);
    });

    let dispatch = move |action: RoleAction| {
        let session = session.clone();
        state.update(|s| s.error = None);
        spawn_browser_task(async move {
            match apply_role_action(&session, &action).await {
                Ok(roles) => {
                    match action {
                        RoleAction::Create { .. } => {
                            show_create.set(false);
                            new_name.set(String::new());
                        }
                        RoleAction::AddPermission { .. } => picked_permission.set(String::new()),
                        RoleAction::RemovePermission { .. } => {}
                    }
                    state.update(|s| s.apply_roles(roles));
                }
                Err(message) => state.update(|s| s.error = Some(message)),
            }
        });
    };

    let dispatch_create = dispatch.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        dispatch_create(RoleAction::Create { name: new_name.get_untracked() });
    };

    let dispatch_add = dispatch.clone();
    let on_add = move |_| {
        let Some(role) = state.get_untracked().selected else {
            return;
        };
        dispatch_add(RoleAction::AddPermission { role_id: role.id, permission_key: picked_permission.get_untracked() });
    };

    let dispatch_remove = dispatch;
    let on_confirm_remove = move |_| {
        let role = state.get_untracked().selected;
        if let (Some(role), Some(permission_key)) = (role, pending_removal.get_untracked()) {
            pending_removal.set(None);
            dispatch_remove(RoleAction::RemovePermission { role_id: role.id, permission_key });
        }
    };

    let rows = move || {
        state
            .get()
            .roles
            .into_iter()
            .map(|role| {
                let role_id = role.id.clone();
                let keys = role.permission_keys().map(str::to_owned).collect::<Vec<_>>();
                view! {
                    <tr>
                        <td>{role.name}</td>
                        <td class="chip-list">
                            {if keys.is_empty() {
                                view! { <span class="muted">"No permissions"</span> }.into_any()
                            } else {
                                keys.into_iter()
                                    .map(|key| view! { <span class="chip">{key}</span> })
                                    .collect_view()
                                    .into_any()
                            }}
                        </td>
                        <td>
                            <button
                                class="btn"
                                on:click=move |_| {
                                    picked_permission.set(String::new());
                                    state.update(|s| s.open_detail(&role_id));
                                }
                            >
                                "Manage Permissions"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let detail_permissions = move || {
        state.get().selected.map(|role| {
            role.permission_keys()
                .map(str::to_owned)
                .map(|key| {
                    let remove_key = key.clone();
                    view! {
                        <li class="permission-row">
                            <span class="chip">{key}</span>
                            <button
                                class="btn btn--danger btn--small"
                                on:click=move |_| pending_removal.set(Some(remove_key.clone()))
                            >
                                "Remove"
                            </button>
                        </li>
                    }
                })
                .collect_view()
        })
    };

    let catalog_options = move || {
        state
            .get()
            .permissions
            .into_iter()
            .map(|permission| {
                let label = if permission.description.is_empty() {
                    permission.key.clone()
                } else {
                    format!("{} ({})", permission.key, permission.description)
                };
                view! { <option value=permission.key>{label}</option> }
            })
            .collect_view()
    };

    view! {
        <section class="page page--roles">
            <header class="page__header">
                <h1 class="page__title">"Role Management"</h1>
                <button class="btn btn--primary" on:click=move |_| show_create.set(true)>"Create Role"</button>
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
                            <th>"Role"</th>
                            <th>"Permissions"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </Show>

            <Show when=move || state.get().selected.is_some()>
                <div class="dialog-backdrop" on:click=move |_| state.update(RolesState::close_detail)>
                    <div class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation()>
                        <h2>
                            {move || state.get().selected.map(|r| format!("Manage Permissions: {}", r.name)).unwrap_or_default()}
                        </h2>
                        <ul class="permission-list">{detail_permissions}</ul>
                        <div class="permission-picker">
                            <select
                                class="table-select"
                                prop:value=move || picked_permission.get()
                                on:change=move |ev| picked_permission.set(event_target_value(&ev))
                            >
                                <option value="">"Select permission"</option>
                                {catalog_options}
                            </select>
                            <button class="btn btn--primary" on:click=on_add.clone()>"Add Permission"</button>
                        </div>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| state.update(RolesState::close_detail)>"Close"</button>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || pending_removal.get().is_some()>
                <div class="dialog-backdrop" on:click=move |_| pending_removal.set(None)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Remove permission"</h2>
                        <p>
                            {move || {
                                let key = pending_removal.get().unwrap_or_default();
                                format!("Remove {key} from this role?")
                            }}
                        </p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| pending_removal.set(None)>"Cancel"</button>
                            <button class="btn btn--danger" on:click=on_confirm_remove.clone()>"Remove"</button>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || show_create.get()>
                <div class="dialog-backdrop" on:click=move |_| show_create.set(false)>
                    <form class="dialog" on:click=move |ev| ev.stop_propagation() on:submit=on_create.clone()>
                        <h2>"Create Role"</h2>
                        <label class="dialog__label">
                            "Role name"
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
