use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::api::ApiClient;
use crate::net::testing::{MemoryCredentialStore, ScriptedTransport};
use crate::net::transport::Method;

fn session(transport: &ScriptedTransport) -> SessionContext<MemoryCredentialStore, ScriptedTransport> {
    let store = MemoryCredentialStore::with_token("tok");
    let session = SessionContext::new(ApiClient::new("/api", store, transport.clone()));
    session.restore();
    session
}

fn body(request: &crate::net::transport::HttpRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
}

// =============================================================
// Loading
// =============================================================

#[test]
fn load_users_fetches_all_four_lists() {
    let transport = ScriptedTransport::default();
    transport
        .respond(200, json!([{ "_id": "u1", "name": "Ann" }, { "_id": "u2", "name": "Bob" }]))
        .respond(200, json!([{ "_id": "r1", "name": "Admin" }]))
        .respond(200, json!([{ "_id": "t1", "name": "Core" }]))
        .respond(200, json!({ "_id": "u1", "name": "Ann" }));
    let session = session(&transport);

    let state = block_on(load_users(&session));

    assert_eq!(state.users.len(), 2);
    assert_eq!(state.roles.len(), 1);
    assert_eq!(state.teams.len(), 1);
    assert_eq!(state.current_user.as_ref().map(|u| u.id.as_str()), Some("u1"));
    assert!(!state.can_delete("u1"));
    assert!(state.can_delete("u2"));

    let mut urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    urls.sort();
    assert_eq!(urls, vec!["/api/roles", "/api/teams", "/api/users", "/api/users/me"]);
}

#[test]
fn forbidden_lists_degrade_to_empty() {
    let transport = ScriptedTransport::default();
    transport
        .respond(200, json!([{ "_id": "u1", "name": "Ann" }]))
        .respond(403, json!({ "message": "Forbidden" }))
        .respond(403, json!({ "message": "Forbidden" }))
        .respond(500, json!({}));
    let session = session(&transport);

    let state = block_on(load_users(&session));

    assert_eq!(state.users.len(), 1);
    assert!(state.roles.is_empty());
    assert!(state.teams.is_empty());
    assert!(state.current_user.is_none());
    assert_eq!(state.error, None);
    assert!(session.is_authenticated());
}

// =============================================================
// Actions
// =============================================================

#[test]
fn create_user_posts_draft() {
    let transport = ScriptedTransport::default();
    transport.respond(201, json!({ "_id": "u9" }));
    let session = session(&transport);
    let draft = NewUser { name: "Ann".to_owned(), email: "ann@example.com".to_owned(), password: "pw1234".to_owned() };

    assert_eq!(block_on(apply_user_action(&session, &UserAction::Create(draft))), Ok(()));

    let request = transport.last_request().unwrap();
    assert_eq!((request.method, request.url.as_str()), (Method::Post, "/api/users"));
    assert_eq!(body(&request), json!({ "name": "Ann", "email": "ann@example.com", "password": "pw1234" }));
}

#[test]
fn incomplete_draft_is_rejected_locally() {
    let transport = ScriptedTransport::default();
    let session = session(&transport);

    let outcome = block_on(apply_user_action(&session, &UserAction::Create(NewUser::default())));

    assert_eq!(outcome, Err(MSG_FILL_ALL_FIELDS.to_owned()));
    assert!(transport.requests().is_empty());
}

#[test]
fn assign_role_posts_role_id() {
    let transport = ScriptedTransport::default();
    transport.respond(200, json!({}));
    let session = session(&transport);
    let action = UserAction::AssignRole { user_id: "u1".to_owned(), role_id: "r1".to_owned() };

    assert_eq!(block_on(apply_user_action(&session, &action)), Ok(()));

    let request = transport.last_request().unwrap();
    assert_eq!(request.url, "/api/users/u1/role");
    // No browser clock natively, so `validFrom` is omitted.
    assert_eq!(body(&request), json!({ "roleId": "r1" }));
}

#[test]
fn assign_team_posts_team_id() {
    let transport = ScriptedTransport::default();
    transport.respond(200, json!({}));
    let session = session(&transport);
    let action = UserAction::AssignTeam { user_id: "u1".to_owned(), team_id: "t1".to_owned() };

    assert_eq!(block_on(apply_user_action(&session, &action)), Ok(()));

    let request = transport.last_request().unwrap();
    assert_eq!(request.url, "/api/users/u1/team");
    assert_eq!(body(&request), json!({ "teamId": "t1" }));
}

#[test]
fn clearing_a_picker_sends_nothing() {
    let transport = ScriptedTransport::default();
    let session = session(&transport);

    let role = UserAction::AssignRole { user_id: "u1".to_owned(), role_id: String::new() };
    let team = UserAction::AssignTeam { user_id: "u1".to_owned(), team_id: String::new() };
    assert_eq!(block_on(apply_user_action(&session, &role)), Ok(()));
    assert_eq!(block_on(apply_user_action(&session, &team)), Ok(()));
    assert!(transport.requests().is_empty());
}

#[test]
fn delete_user_issues_delete() {
    let transport = ScriptedTransport::default();
    transport.respond_raw(204, "");
    let session = session(&transport);

    assert_eq!(block_on(apply_user_action(&session, &UserAction::Delete { user_id: "u2".to_owned() })), Ok(()));

    let request = transport.last_request().unwrap();
    assert_eq!((request.method, request.url.as_str()), (Method::Delete, "/api/users/u2"));
}

#[test]
fn action_failures_use_server_message_or_fallback() {
    let transport = ScriptedTransport::default();
    transport
        .respond(409, json!({ "message": "Email already in use" }))
        .respond_raw(500, "")
        .respond_raw(500, "")
        .respond(403, json!({}));
    let session = session(&transport);
    let draft = NewUser { name: "Ann".to_owned(), email: "ann@example.com".to_owned(), password: "pw".to_owned() };

    let outcomes = [
        block_on(apply_user_action(&session, &UserAction::Create(draft))),
        block_on(apply_user_action(&session, &UserAction::AssignRole { user_id: "u1".to_owned(), role_id: "r1".to_owned() })),
        block_on(apply_user_action(&session, &UserAction::AssignTeam { user_id: "u1".to_owned(), team_id: "t1".to_owned() })),
        block_on(apply_user_action(&session, &UserAction::Delete { user_id: "u1".to_owned() })),
    ];

    assert_eq!(
        outcomes,
        [
            Err("Email already in use".to_owned()),
            Err(MSG_ASSIGN_ROLE_FAILED.to_owned()),
            Err(MSG_ASSIGN_TEAM_FAILED.to_owned()),
            Err(MSG_DELETE_USER_FAILED.to_owned()),
        ]
    );
}
