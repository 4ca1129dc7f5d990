//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the one `ConsoleSession` of the running console and mirrors its
//! state into an `RwSignal<SessionState>` that guards, the sidebar and pages
//! read. Both are provided as context. The stored token is read in an effect,
//! so the server-rendered pass always sees the loading state and hydration
//! resolves it in the browser.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};

use crate::components::guard::{ProtectedRoute, PublicRoute};
use crate::pages::audit_logs::AuditLogsPage;
use crate::pages::dashboard::DashboardLayout;
use crate::pages::dashboard_home::DashboardHome;
use crate::pages::login::LoginPage;
use crate::pages::roles::RolesPage;
use crate::pages::signup::SignupPage;
use crate::pages::teams::TeamsPage;
use crate::pages::users::UsersPage;
use crate::routes;
use crate::state::session::{ConsoleSession, SessionState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = ConsoleSession::from_config();
    let session_state = RwSignal::new(SessionState::default());
    session.subscribe(move |state| session_state.set(state.clone()));

    provide_context(session.clone());
    provide_context(session_state);

    Effect::new(move || session.restore());

    view! {
        <Stylesheet id="leptos" href="/pkg/teamdesk.css"/>
        <Title text="Teamdesk"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path=routes::DASHBOARD/> }>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <PublicRoute><LoginPage/></PublicRoute> }
                />
                <Route
                    path=StaticSegment("signup")
                    view=|| view! { <PublicRoute><SignupPage/></PublicRoute> }
                />
                <ParentRoute
                    path=StaticSegment("dashboard")
                    view=|| view! { <ProtectedRoute><DashboardLayout/></ProtectedRoute> }
                >
                    <Route path=StaticSegment("") view=DashboardHome/>
                    <Route path=StaticSegment("users") view=UsersPage/>
                    <Route path=StaticSegment("teams") view=TeamsPage/>
                    <Route path=StaticSegment("roles") view=RolesPage/>
                    <Route path=StaticSegment("logs") view=AuditLogsPage/>
                </ParentRoute>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::DASHBOARD/> }/>
            </Routes>
        </Router>
    }
}
