//! User-management view state.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use crate::net::types::{NewUser, Ref, Role, Team, User};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub teams: Vec<Team>,
    /// Signed-in operator; `None` if it could not be fetched.
    pub current_user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UsersState {
    /// Operators cannot delete themselves.
    pub fn can_delete(&self, user_id: &str) -> bool {
        self.current_user.as_ref().is_none_or(|me| me.id != user_id)
    }
}

/// Role id shown as selected in a user's role picker (`""` for none).
pub fn selected_role_id(user: &User) -> &str {
    user.primary_role().map_or("", Ref::id)
}

/// Team id shown as selected in a user's team picker (`""` for none).
pub fn selected_team_id(user: &User) -> &str {
    user.team_ref_id().unwrap_or("")
}

/// Create-user dialog draft.
pub fn is_complete(draft: &NewUser) -> bool {
    !draft.name.trim().is_empty() && !draft.email.trim().is_empty() && !draft.password.is_empty()
}
