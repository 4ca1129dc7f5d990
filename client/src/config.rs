//! Build-time client configuration.
//!
//! The remote API origin is baked into the WASM bundle from
//! `TEAMDESK_API_BASE_URL` at compile time; without it the console talks to
//! `/api` on its own origin.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Fallback API base when `TEAMDESK_API_BASE_URL` is unset at build time.
pub const DEFAULT_API_BASE_URL: &str = "/api";

/// Configured API base URL.
pub fn api_base_url() -> &'static str {
    resolve_base_url(option_env!("TEAMDESK_API_BASE_URL"))
}

fn resolve_base_url(configured: Option<&'static str>) -> &'static str {
    configured
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
}

/// Join a base URL and an endpoint path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_owned();
    }
    format!("{base}/{path}")
}
