use super::*;
use crate::net::types::RolePermission;

fn role(id: &str, keys: &[&str]) -> Role {
    Role {
        id: id.to_owned(),
        name: format!("role-{id}"),
        permissions: keys
            .iter()
            .map(|k| RolePermission { permission_key: (*k).to_owned() })
            .collect(),
    }
}

#[test]
fn roles_state_default_is_empty() {
    let state = RolesState::default();
    assert!(state.roles.is_empty());
    assert!(state.selected.is_none());
    assert!(!state.loading);
}

#[test]
fn apply_roles_refreshes_open_detail() {
    let mut state = RolesState::default();
    state.apply_roles(vec![role("r1", &["team.manage"]), role("r2", &[])]);
    state.open_detail("r1");

    state.apply_roles(vec![role("r1", &[]), role("r2", &[])]);

    let table = &state.roles[0];
    let detail = state.selected.as_ref().unwrap();
    assert!(table.permissions.is_empty());
    assert_eq!(table, detail);
}

#[test]
fn apply_roles_without_selection_keeps_detail_closed() {
    let mut state = RolesState::default();
    state.apply_roles(vec![role("r1", &[])]);
    assert!(state.selected.is_none());
}

#[test]
fn apply_roles_closes_detail_when_role_vanishes() {
    let mut state = RolesState::default();
    state.apply_roles(vec![role("r1", &[])]);
    state.open_detail("r1");

    state.apply_roles(vec![role("r2", &[])]);
    assert!(state.selected.is_none());
}

#[test]
fn open_detail_unknown_role() {
    let mut state = RolesState::default();
    state.apply_roles(vec![role("r1", &[])]);
    state.open_detail("r1");

    state.open_detail("nope");
    assert!(state.selected.is_none());
}

#[test]
fn close_detail_clears_selection() {
    let mut state = RolesState::default();
    state.apply_roles(vec![role("r1", &[])]);
    state.open_detail("r1");
    state.close_detail();
    assert!(state.selected.is_none());
}
