use std::future::Future;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::executor::block_on;
use futures::task::noop_waker;
use serde_json::json;

use super::*;
use crate::net::testing::{GatedTransport, MemoryCredentialStore, ScriptedTransport};

type TestSession = SessionContext<MemoryCredentialStore, ScriptedTransport>;

fn session_with(store: &MemoryCredentialStore, transport: &ScriptedTransport) -> TestSession {
    let session = SessionContext::new(ApiClient::new("/api", store.clone(), transport.clone()));
    session.restore();
    session
}

fn recorder(session: &TestSession) -> Arc<Mutex<Vec<SessionState>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    session.subscribe(move |state| sink.lock().unwrap().push(state.clone()));
    seen
}

// =============================================================
// SessionState
// =============================================================

#[test]
fn session_state_default_is_loading_without_token() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(state.token.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn empty_token_is_not_authenticated() {
    let state = SessionState { token: Some(String::new()), loading: false };
    assert!(!state.is_authenticated());
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn new_session_is_loading_until_restored() {
    let store = MemoryCredentialStore::with_token("abc");
    let session = SessionContext::new(ApiClient::new("/api", store, ScriptedTransport::default()));
    assert!(session.state().loading);
    assert!(!session.is_authenticated());

    session.restore();
    assert_eq!(session.state(), SessionState { token: Some("abc".to_owned()), loading: false });
    assert!(session.is_authenticated());
}

#[test]
fn restore_without_stored_token_is_logged_out() {
    let session = session_with(&MemoryCredentialStore::default(), &ScriptedTransport::default());
    assert_eq!(session.state(), SessionState { token: None, loading: false });
}

// =============================================================
// Login / logout
// =============================================================

#[test]
fn login_persists_exact_server_token() {
    let store = MemoryCredentialStore::default();
    let transport = ScriptedTransport::default();
    transport.respond(200, json!({ "token": "abc123" }));
    let session = session_with(&store, &transport);

    let resp = block_on(session.login("user@example.com", "secret1")).unwrap();

    assert_eq!(resp.token, "abc123");
    assert!(session.is_authenticated());
    assert_eq!(store.raw(), Some("abc123".to_owned()));
}

#[test]
fn login_then_fetch_current_user_carries_bearer() {
    let store = MemoryCredentialStore::default();
    let transport = ScriptedTransport::default();
    transport
        .respond(200, json!({ "token": "abc123" }))
        .respond(200, json!({ "_id": "u1", "name": "User", "email": "user@example.com" }));
    let session = session_with(&store, &transport);

    block_on(session.login("user@example.com", "secret1")).unwrap();
    let user = block_on(session.api().current_user()).unwrap();

    assert_eq!(user.id, "u1");
    let requests = transport.requests();
    assert_eq!(requests[0].header("Authorization"), None);
    assert_eq!(requests[1].url, "/api/users/me");
    assert_eq!(requests[1].header("Authorization"), Some("Bearer abc123"));
}

#[test]
fn failed_login_propagates_error_and_keeps_state() {
    let store = MemoryCredentialStore::default();
    let transport = ScriptedTransport::default();
    transport.respond(401, json!({ "message": "Invalid credentials" }));
    let session = session_with(&store, &transport);

    let err = block_on(session.login("user@example.com", "wrong")).unwrap_err();

    assert_eq!(
        err,
        SessionError::Api(ApiError::Status { status: 401, message: Some("Invalid credentials".to_owned()) })
    );
    assert_eq!(err.user_message("Login failed. Please try again."), "Invalid credentials");
    assert!(!session.is_authenticated());
    assert_eq!(store.raw(), None);
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn empty_token_from_server_is_rejected() {
    let store = MemoryCredentialStore::default();
    let transport = ScriptedTransport::default();
    transport.respond(200, json!({ "token": "" }));
    let session = session_with(&store, &transport);

    assert!(matches!(
        block_on(session.login("a@b.co", "pw")),
        Err(SessionError::Api(ApiError::Decode(_)))
    ));
    assert_eq!(store.raw(), None);
}

#[test]
fn logout_clears_memory_and_storage() {
    let store = MemoryCredentialStore::default();
    let transport = ScriptedTransport::default();
    transport.respond(200, json!({ "token": "abc123" }));
    let session = session_with(&store, &transport);
    block_on(session.login("user@example.com", "secret1")).unwrap();

    session.logout();

    assert!(!session.is_authenticated());
    assert_eq!(session.state(), SessionState { token: None, loading: false });
    assert_eq!(store.raw(), None);
}

#[test]
fn logout_twice_matches_logout_once() {
    let store = MemoryCredentialStore::with_token("abc");
    let session = session_with(&store, &ScriptedTransport::default());

    session.logout();
    let once = (session.state(), store.raw());
    session.logout();
    let twice = (session.state(), store.raw());

    assert_eq!(once, twice);
    assert!(!session.is_authenticated());
}

#[test]
fn logout_when_never_logged_in_is_harmless() {
    let store = MemoryCredentialStore::default();
    let session = session_with(&store, &ScriptedTransport::default());
    session.logout();
    assert_eq!(session.state(), SessionState { token: None, loading: false });
}

#[test]
fn register_does_not_sign_in() {
    let store = MemoryCredentialStore::default();
    let transport = ScriptedTransport::default();
    transport.respond(201, json!({ "_id": "u9", "name": "New" }));
    let session = session_with(&store, &transport);

    let payload = block_on(session.register("New", "new@example.com", "secret1")).unwrap();

    assert_eq!(payload["_id"], "u9");
    assert!(!session.is_authenticated());
    assert_eq!(store.raw(), None);
}

// =============================================================
// Stale login resolution
// =============================================================

#[test]
fn login_superseded_by_logout_is_discarded() {
    let store = MemoryCredentialStore::default();
    let session = session_with(&store, &ScriptedTransport::default());

    let epoch = session.begin_mutation();
    session.logout();
    let result = session.commit_login(epoch, "late-token");

    assert_eq!(result, Err(SessionError::Superseded));
    assert!(!session.is_authenticated());
    assert_eq!(store.raw(), None);
}

#[test]
fn logout_during_pending_login_discards_late_token() {
    let store = MemoryCredentialStore::default();
    let transport = GatedTransport::default();
    let session = SessionContext::new(ApiClient::new("/api", store.clone(), transport.clone()));
    session.restore();
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);

    let mut login = Box::pin(session.login("ann@example.com", "secret1"));
    assert!(login.as_mut().poll(&mut cx).is_pending());
    assert_eq!(transport.requests().len(), 1);

    session.logout();
    transport.release(200, json!({ "token": "late-token" }));

    let Poll::Ready(result) = login.as_mut().poll(&mut cx) else {
        panic!("login still pending after release");
    };
    assert_eq!(result.unwrap_err(), SessionError::Superseded);
    assert_eq!(store.raw(), None);
    assert!(!session.is_authenticated());
}

#[test]
fn pending_login_commits_when_nothing_intervenes() {
    let store = MemoryCredentialStore::default();
    let transport = GatedTransport::default();
    let session = SessionContext::new(ApiClient::new("/api", store.clone(), transport.clone()));
    session.restore();
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);

    let mut login = Box::pin(session.login("ann@example.com", "secret1"));
    assert!(login.as_mut().poll(&mut cx).is_pending());
    assert!(!session.is_authenticated());

    transport.release(200, json!({ "token": "fresh" }));

    let Poll::Ready(result) = login.as_mut().poll(&mut cx) else {
        panic!("login still pending after release");
    };
    assert_eq!(result.unwrap().token, "fresh");
    assert_eq!(store.raw(), Some("fresh".to_owned()));
    assert!(session.is_authenticated());
}

#[test]
fn newer_login_wins_over_older_one() {
    let store = MemoryCredentialStore::default();
    let session = session_with(&store, &ScriptedTransport::default());

    let first = session.begin_mutation();
    let second = session.begin_mutation();
    session.commit_login(second, "newer").unwrap();
    assert_eq!(session.commit_login(first, "older"), Err(SessionError::Superseded));

    assert_eq!(session.state().token.as_deref(), Some("newer"));
    assert_eq!(store.raw(), Some("newer".to_owned()));
}

#[test]
fn superseded_error_uses_fallback_message() {
    assert_eq!(SessionError::Superseded.user_message("Login failed. Please try again."), "Login failed. Please try again.");
}

// =============================================================
// Broadcast
// =============================================================

#[test]
fn subscriber_sees_current_state_then_changes() {
    let store = MemoryCredentialStore::default();
    let transport = ScriptedTransport::default();
    transport.respond(200, json!({ "token": "abc123" }));
    let session = SessionContext::new(ApiClient::new("/api", store, transport));
    let seen = recorder(&session);

    session.restore();
    block_on(session.login("user@example.com", "secret1")).unwrap();
    session.logout();
    session.logout();

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            SessionState { token: None, loading: true },
            SessionState { token: None, loading: false },
            SessionState { token: Some("abc123".to_owned()), loading: false },
            SessionState { token: None, loading: false },
        ]
    );
}

#[test]
fn clones_share_state() {
    let store = MemoryCredentialStore::with_token("abc");
    let session = session_with(&store, &ScriptedTransport::default());
    let other = session.clone();

    other.logout();
    assert!(!session.is_authenticated());
}

// =============================================================
// Expiry detection
// =============================================================

#[test]
fn repeated_unauthorized_logs_out() {
    let store = MemoryCredentialStore::with_token("stale");
    let session = session_with(&store, &ScriptedTransport::default());
    let unauthorized: Result<(), ApiError> = Err(ApiError::from_status(401, ""));

    assert!(!session.record_outcome(&unauthorized));
    assert!(session.is_authenticated());
    assert!(session.record_outcome(&unauthorized));
    assert!(!session.is_authenticated());
    assert_eq!(store.raw(), None);
}

#[test]
fn success_resets_unauthorized_streak() {
    let store = MemoryCredentialStore::with_token("tok");
    let session = session_with(&store, &ScriptedTransport::default());
    let unauthorized: Result<(), ApiError> = Err(ApiError::from_status(401, ""));

    session.record_outcome(&unauthorized);
    session.record_outcome(&Ok::<(), ApiError>(()));
    assert!(!session.record_outcome(&unauthorized));
    assert!(session.is_authenticated());
}

#[test]
fn forbidden_never_logs_out() {
    let store = MemoryCredentialStore::with_token("tok");
    let session = session_with(&store, &ScriptedTransport::default());
    let forbidden: Result<(), ApiError> = Err(ApiError::from_status(403, ""));

    for _ in 0..5 {
        assert!(!session.record_outcome(&forbidden));
    }
    assert!(session.is_authenticated());
}

#[test]
fn unauthorized_while_logged_out_reports_nothing() {
    let session = session_with(&MemoryCredentialStore::default(), &ScriptedTransport::default());
    let unauthorized: Result<(), ApiError> = Err(ApiError::from_status(401, ""));

    assert!(!session.record_outcome(&unauthorized));
    assert!(!session.record_outcome(&unauthorized));
}
