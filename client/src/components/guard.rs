//! Route guard components.
//!
//! Both wrap route content and defer to `util::guard::evaluate`; while the
//! session is still restoring they render a neutral placeholder instead of
//! the content or a redirect.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;
use crate::util::guard::{GuardDecision, GuardKind, evaluate, install_guard_redirect};

/// Renders `children` only for authenticated operators.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::Protected, children)
}

/// Renders `children` only for anonymous visitors (login, signup).
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::PublicOnly, children)
}

fn guarded(kind: GuardKind, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_guard_redirect(kind, session, use_navigate());

    let decision = move || evaluate(kind, &session.get());

    view! {
        <Show
            when=move || decision() == GuardDecision::Allow
            fallback=move || {
                view! {
                    <div class="guard-placeholder">
                        <Show when=move || decision() == GuardDecision::Loading>
                            <div class="spinner" aria-label="Loading"></div>
                        </Show>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
