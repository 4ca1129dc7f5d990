//! Durable bearer-token slot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is the only client state that survives a reload. The session
//! context is its only writer; the API gateway only reads it.
//!
//! TRADE-OFFS
//! ==========
//! Storage failures are not surfaced. An unreadable or unavailable
//! `localStorage` behaves exactly like a logged-out browser.

/// `localStorage` key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// A single-slot token store.
pub trait CredentialStore {
    /// Stored token, or `None` when absent, empty, or unreadable.
    fn load(&self) -> Option<String>;
    /// Overwrite the slot.
    fn save(&self, token: &str);
    /// Remove the slot. Safe to call when already empty.
    fn clear(&self);
}

/// Token slot backed by the browser's `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCredentialStore;

impl CredentialStore for BrowserCredentialStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage()?;
            match storage.get_item(TOKEN_STORAGE_KEY) {
                Ok(Some(token)) if !token.is_empty() => Some(token),
                Ok(_) => None,
                Err(e) => {
                    leptos::logging::warn!("token read failed: {e:?}");
                    None
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    fn save(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if let Err(e) = storage.set_item(TOKEN_STORAGE_KEY, token) {
                    leptos::logging::warn!("token write failed: {e:?}");
                }
            }
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if let Err(e) = storage.remove_item(TOKEN_STORAGE_KEY) {
                    leptos::logging::warn!("token clear failed: {e:?}");
                }
            }
        }
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    match web_sys::window().map(|w| w.local_storage()) {
        Some(Ok(Some(storage))) => Some(storage),
        _ => None,
    }
}
