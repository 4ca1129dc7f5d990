//! # teamdesk
//!
//! Leptos + WASM administrative console for a remote identity and access
//! API: sign in, manage users, teams, roles and permissions, and browse the
//! audit log.
//!
//! The session core (`state::session`), the credential store and API
//! gateway (`net`), and the route-guard decisions (`util::guard`) are plain
//! Rust and run natively in tests; `pages` and `components` wire them to the
//! Leptos view layer.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Browser entry point: attach the client app to the server-rendered HTML.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
