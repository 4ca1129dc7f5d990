//! Client route paths.
//!
//! `/login` and `/signup` are public-only; `/dashboard` and its children are
//! protected; `/` and anything unknown land on `/dashboard`.

pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";
pub const DASHBOARD: &str = "/dashboard";
pub const USERS: &str = "/dashboard/users";
pub const TEAMS: &str = "/dashboard/teams";
pub const ROLES: &str = "/dashboard/roles";
pub const LOGS: &str = "/dashboard/logs";

/// Landing page for authenticated operators.
pub const DEFAULT_AUTHENTICATED: &str = DASHBOARD;
