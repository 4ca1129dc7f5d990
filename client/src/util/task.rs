//! Browser-only async work.
//!
//! Page loads and form submissions talk to the remote API, which is only
//! reachable from the browser. During server rendering these helpers do
//! nothing, so the SSR pass renders loading placeholders.

use std::future::Future;

/// Spawn `task` on the browser's local executor; dropped when server rendering.
pub fn spawn_browser_task(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(task);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(task);
    }
}

/// Wait `millis` milliseconds in the browser; returns immediately elsewhere.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables, clippy::unused_async))]
pub async fn sleep_ms(millis: u32) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}
