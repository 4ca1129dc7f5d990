//! Session context: the single owner of authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards, the sidebar and every page read `SessionState`; only
//! `SessionContext` mutates it and only `SessionContext` writes the
//! credential store. Changes are broadcast to subscribers (the Leptos layer
//! mirrors them into an `RwSignal<SessionState>`).
//!
//! CONCURRENCY
//! ===========
//! Every mutation bumps an epoch. A login remembers the epoch it started at
//! and commits its token only if nothing else mutated the session while the
//! request was in flight, so a logout issued mid-login is never undone by a
//! late response.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::net::api::{ApiClient, BrowserApi};
use crate::net::credentials::{BrowserCredentialStore, CredentialStore};
use crate::net::error::ApiError;
use crate::net::transport::{BrowserTransport, Transport};
use crate::net::types::LoginResponse;

/// Consecutive 401 responses after which the session logs itself out.
pub const UNAUTHORIZED_LOGOUT_THRESHOLD: u32 = 2;

/// Session context used by the running console.
pub type ConsoleSession = SessionContext<BrowserCredentialStore, BrowserTransport>;

impl ConsoleSession {
    pub fn from_config() -> Self {
        Self::new(BrowserApi::from_config())
    }
}

/// Observable authentication state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Bearer token; its presence is the only signal of authentication.
    pub token: Option<String>,
    /// True until the credential store has been read.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { token: None, loading: true }
    }
}

impl SessionState {
    /// Presence check only; says nothing about server-side validity.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Failure of a session operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Another session mutation happened while this login was in flight.
    #[error("session changed while signing in")]
    Superseded,
}

impl SessionError {
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(e) => e.user_message(fallback),
            Self::Superseded => fallback.to_owned(),
        }
    }
}

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct Inner {
    state: SessionState,
    epoch: u64,
    unauthorized_streak: u32,
    listeners: Vec<Listener>,
}

/// Single writer of session state and the credential store.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct SessionContext<S, T> {
    api: ApiClient<S, T>,
    inner: Arc<Mutex<Inner>>,
}

impl<S: CredentialStore, T: Transport> SessionContext<S, T> {
    /// New context in the loading state; call [`restore`](Self::restore) to
    /// read the stored token.
    pub fn new(api: ApiClient<S, T>) -> Self {
        let inner = Inner {
            state: SessionState::default(),
            epoch: 0,
            unauthorized_streak: 0,
            listeners: Vec::new(),
        };
        Self { api, inner: Arc::new(Mutex::new(inner)) }
    }

    /// Gateway for page-level calls. Report their outcomes with
    /// [`record_outcome`](Self::record_outcome).
    pub fn api(&self) -> &ApiClient<S, T> {
        &self.api
    }

    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().state.is_authenticated()
    }

    /// Register a listener. It is called once with the current state, then on
    /// every change.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) {
        let listener: Listener = Arc::new(listener);
        let current = {
            let mut inner = self.lock();
            inner.listeners.push(Arc::clone(&listener));
            inner.state.clone()
        };
        listener(&current);
    }

    /// Load the stored token and leave the loading state.
    pub fn restore(&self) {
        let token = self.api.store().load();
        self.mutate(|inner| {
            inner.state = SessionState { token, loading: false };
        });
    }

    /// Sign in and persist the returned token.
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged, or `Superseded` when a logout or
    /// another login happened while the request was in flight (the token is
    /// then discarded).
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, SessionError> {
        let epoch = self.begin_mutation();
        let response = self.api.login(email, password).await?;
        if response.token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_owned()).into());
        }
        self.commit_login(epoch, &response.token)?;
        leptos::logging::log!("signed in");
        Ok(response)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Value, SessionError> {
        Ok(self.api.register(name, email, password).await?)
    }

    /// Drop the token from memory and storage. Idempotent.
    pub fn logout(&self) {
        let store = self.api.store();
        self.mutate(|inner| {
            inner.epoch += 1;
            inner.unauthorized_streak = 0;
            store.clear();
            inner.state = SessionState { token: None, loading: false };
        });
    }

    /// Feed a page-level call result into expiry detection.
    ///
    /// Consecutive 401s reaching [`UNAUTHORIZED_LOGOUT_THRESHOLD`] log the
    /// session out; any success resets the streak. Other failures (including
    /// 403) leave it unchanged. Returns `true` when this call logged out.
    pub fn record_outcome<R>(&self, result: &Result<R, ApiError>) -> bool {
        let expired = {
            let mut inner = self.lock();
            match result {
                Ok(_) => {
                    inner.unauthorized_streak = 0;
                    false
                }
                Err(e) if e.is_unauthorized() => {
                    inner.unauthorized_streak += 1;
                    inner.unauthorized_streak >= UNAUTHORIZED_LOGOUT_THRESHOLD && inner.state.is_authenticated()
                }
                Err(_) => false,
            }
        };
        if expired {
            leptos::logging::warn!("repeated 401 responses; signing out");
            self.logout();
        }
        expired
    }

    fn begin_mutation(&self) -> u64 {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.epoch
    }

    fn commit_login(&self, epoch: u64, token: &str) -> Result<(), SessionError> {
        let store = self.api.store();
        let mut committed = false;
        self.mutate(|inner| {
            if inner.epoch != epoch {
                return;
            }
            store.save(token);
            inner.unauthorized_streak = 0;
            inner.state = SessionState { token: Some(token.to_owned()), loading: false };
            committed = true;
        });
        if committed {
            Ok(())
        } else {
            leptos::logging::warn!("discarding login response superseded by a later session change");
            Err(SessionError::Superseded)
        }
    }

    /// Apply `f` under the lock and notify listeners if the state changed.
    fn mutate(&self, f: impl FnOnce(&mut Inner)) {
        let (changed, state, listeners) = {
            let mut inner = self.lock();
            let before = inner.state.clone();
            f(&mut inner);
            (before != inner.state, inner.state.clone(), inner.listeners.clone())
        };
        if changed {
            for listener in &listeners {
                listener(&state);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
