//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Its network flows are plain
//! async functions over `SessionContext<S, T>` so they run natively in tests;
//! the `#[component]` only wires them to signals.

pub mod audit_logs;
pub mod dashboard;
pub mod dashboard_home;
pub mod login;
pub mod roles;
pub mod signup;
pub mod teams;
pub mod users;

use crate::net::credentials::CredentialStore;
use crate::net::error::ApiError;
use crate::net::transport::Transport;
use crate::state::session::SessionContext;

/// Report `result` to expiry detection and map failures to an inline message.
pub(crate) fn settle<S, T, R>(
    session: &SessionContext<S, T>,
    result: Result<R, ApiError>,
    fallback: &str,
) -> Result<R, String>
where
    S: CredentialStore,
    T: Transport,
{
    session.record_outcome(&result);
    result.map_err(|e| {
        leptos::logging::warn!("{fallback}: {e}");
        e.user_message(fallback)
    })
}

/// Like [`settle`], but a failure only gets logged.
pub(crate) fn settle_soft<S, T, R>(session: &SessionContext<S, T>, result: Result<R, ApiError>, what: &str) -> Option<R>
where
    S: CredentialStore,
    T: Transport,
{
    session.record_outcome(&result);
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            leptos::logging::warn!("{what} unavailable: {e}");
            None
        }
    }
}
