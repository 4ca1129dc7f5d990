//! Route-guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both guard components evaluate the same pure function on every session
//! change, so redirect behavior is identical across routes and testable
//! without a browser.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes;
use crate::state::session::SessionState;

/// Which side of the auth boundary a route lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    /// Requires a session; anonymous visitors go to `/login`.
    Protected,
    /// Login/signup; signed-in operators go to `/dashboard`.
    PublicOnly,
}

/// Outcome of evaluating a guard against the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not restored yet; render the placeholder.
    Loading,
    /// Render the wrapped content.
    Allow,
    /// Navigate away to the given path.
    Redirect(&'static str),
}

/// Decide whether a guard renders its content or redirects.
pub fn evaluate(kind: GuardKind, session: &SessionState) -> GuardDecision {
    if session.loading {
        return GuardDecision::Loading;
    }
    match (kind, session.is_authenticated()) {
        (GuardKind::Protected, false) => GuardDecision::Redirect(routes::LOGIN),
        (GuardKind::PublicOnly, true) => GuardDecision::Redirect(routes::DEFAULT_AUTHENTICATED),
        _ => GuardDecision::Allow,
    }
}

/// Re-evaluate `kind` on every session change and navigate when it redirects.
pub fn install_guard_redirect<F>(kind: GuardKind, session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(target) = evaluate(kind, &session.get()) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
