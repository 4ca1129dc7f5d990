//! Team-management view state.

use crate::net::types::Team;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TeamsState {
    pub teams: Vec<Team>,
    pub loading: bool,
    pub error: Option<String>,
}
