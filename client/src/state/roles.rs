//! Role-management view state.
//!
//! DESIGN
//! ======
//! The table and the manage-permissions detail view must never disagree.
//! Every role-list refresh goes through `apply_roles`, which also swaps the
//! open detail view for the fresh copy of the same role.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use crate::net::types::{Permission, Role};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RolesState {
    pub roles: Vec<Role>,
    /// Permission catalog offered in the add-permission picker.
    pub permissions: Vec<Permission>,
    /// Role shown in the manage-permissions detail view.
    pub selected: Option<Role>,
    pub loading: bool,
    pub error: Option<String>,
}

impl RolesState {
    /// Replace the role list and re-sync the detail view.
    ///
    /// A selected role that disappeared from the list closes the detail view.
    pub fn apply_roles(&mut self, roles: Vec<Role>) {
        if let Some(selected_id) = self.selected.as_ref().map(|role| role.id.clone()) {
            self.selected = roles.iter().find(|role| role.id == selected_id).cloned();
        }
        self.roles = roles;
    }

    /// Open the detail view for `role_id`. Unknown ids leave it closed.
    pub fn open_detail(&mut self, role_id: &str) {
        self.selected = self.roles.iter().find(|role| role.id == role_id).cloned();
        if self.selected.is_none() {
            leptos::logging::warn!("role {role_id} is not in the list; detail view stays closed");
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}
