//! Audit-log feed.

#[cfg(test)]
#[path = "audit_logs_test.rs"]
mod audit_logs_test;

use leptos::prelude::*;

use super::settle;
use crate::net::credentials::CredentialStore;
use crate::net::transport::Transport;
use crate::state::audit::AuditState;
use crate::state::session::{ConsoleSession, SessionContext};
use crate::util::task::spawn_browser_task;
use crate::util::time::format_timestamp;

pub const MSG_FETCH_LOGS_FAILED: &str = "Failed to fetch audit logs";

pub async fn load_audit_logs<S, T>(session: &SessionContext<S, T>) -> AuditState
where
    S: CredentialStore,
    T: Transport,
{
    let result = session.api().list_audit_logs().await;
    match settle(session, result, MSG_FETCH_LOGS_FAILED) {
        Ok(logs) => AuditState { logs, loading: false, error: None },
        Err(message) => AuditState { error: Some(message), ..AuditState::default() },
    }
}

#[component]
pub fn AuditLogsPage() -> impl IntoView {
    let session = expect_context::<ConsoleSession>();
    let state = RwSignal::new(AuditState { loading: true, ..AuditState::default() });

    spawn_browser_task(async move {
        state.set(load_audit_logs(&session).await);
    });

    let rows = move || {
        state
            .get()
            .logs
            .into_iter()
            .map(|log| {
                let actor = log.actor_name().to_owned();
                let actor_email = log.actor_email().map(str::to_owned);
                let target_type = log.target_type_label().to_owned();
                let target_name = log.target_name_label().to_owned();
                view! {
                    <tr>
                        <td class="mono">{format_timestamp(log.created_at.as_deref())}</td>
                        <td>
                            <div>{actor}</div>
                            {actor_email.map(|email| view! { <div class="muted">{email}</div> })}
                        </td>
                        <td><span class="badge">{log.action}</span></td>
                        <td>{target_type}</td>
                        <td>{target_name}</td>
                        <td class="mono">{log.target.unwrap_or_default()}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="page page--logs">
            <header class="page__header">
                <h1 class="page__title">"Audit Logs"</h1>
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
                            <th>"Timestamp"</th>
                            <th>"Actor"</th>
                            <th>"Action"</th>
                            <th>"Target Type"</th>
                            <th>"Target Name"</th>
                            <th>"Target ID"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </Show>
        </section>
    }
}
