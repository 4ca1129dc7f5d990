//! Dashboard sidebar: operator identity, navigation and logout.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::net::types::User;
use crate::routes;
use crate::state::session::ConsoleSession;

/// Fallback label when the operator's primary role is unknown.
pub const DEFAULT_ROLE_LABEL: &str = "User";

/// Role label for the sidebar badge.
pub fn role_label(user: Option<&User>) -> String {
    user.and_then(User::primary_role_name)
        .unwrap_or(DEFAULT_ROLE_LABEL)
        .to_owned()
}

/// Sidebar for the dashboard layout. `user` is `None` until the profile loads.
#[component]
pub fn Sidebar(user: RwSignal<Option<User>>) -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let navigate = use_navigate();
    let on_logout = move |_| {
        session.logout();
        navigate(routes::LOGIN, NavigateOptions::default());
    };

    let name = move || user.get().map(|u| u.name).unwrap_or_default();
    let email = move || user.get().map(|u| u.email).unwrap_or_default();
    let initial = move || user.get().map(|u| u.initial()).unwrap_or_default();
    let role = move || role_label(user.get().as_ref());

    view! {
        <aside class="sidebar">
            <div class="sidebar__brand">"Teamdesk"</div>
            <div class="sidebar__profile">
                <span class="sidebar__avatar">{initial}</span>
                <div class="sidebar__identity">
                    <span class="sidebar__name">{name}</span>
                    <span class="sidebar__email">{email}</span>
                    <span class="sidebar__role">{role}</span>
                </div>
            </div>
            <nav class="sidebar__nav">
                <A href=routes::DASHBOARD exact=true>"Dashboard"</A>
                <A href=routes::USERS>"Users"</A>
                <A href=routes::TEAMS>"Teams"</A>
                <A href=routes::ROLES>"Roles"</A>
                <A href=routes::LOGS>"Audit Logs"</A>
            </nav>
            <button class="btn sidebar__logout" on:click=on_logout>
                "Logout"
            </button>
        </aside>
    }
}
