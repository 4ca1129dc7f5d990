//! Dashboard layout: sidebar plus the routed child page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Parent route of every protected screen. It fetches the signed-in
//! operator once for the sidebar; a failed fetch is logged and the layout
//! still renders with empty identity fields.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::Outlet;

use super::settle_soft;
use crate::components::sidebar::Sidebar;
use crate::net::credentials::CredentialStore;
use crate::net::transport::Transport;
use crate::net::types::User;
use crate::state::session::{ConsoleSession, SessionContext};
use crate::util::task::spawn_browser_task;

/// Fetch the signed-in operator, `None` on any failure.
pub async fn load_current_user<S, T>(session: &SessionContext<S, T>) -> Option<User>
where
    S: CredentialStore,
    T: Transport,
{
    let result = session.api().current_user().await;
    settle_soft(session, result, "current user")
}

#[component]
pub fn DashboardLayout() -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let user = RwSignal::new(None::<User>);

    spawn_browser_task(async move {
        user.set(load_current_user(&session).await);
    });

    view! {
        <div class="dashboard">
            <Sidebar user=user/>
            <main class="dashboard__content">
                <Outlet/>
            </main>
        </div>
    }
}
