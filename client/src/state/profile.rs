//! Dashboard-home state: the signed-in operator and their team.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::net::types::{Team, User};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileState {
    pub user: Option<User>,
    /// Team of `user`; absent when unassigned or not visible to this operator.
    pub team: Option<Team>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Resolve a user's team from a team list.
pub fn find_team(user: &User, teams: &[Team]) -> Option<Team> {
    let team_id = user.team_ref_id()?;
    teams.iter().find(|team| team.id == team_id).cloned()
}
