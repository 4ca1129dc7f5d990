//! Wire DTOs for the remote identity/access API.
//!
//! DESIGN
//! ======
//! The API returns Mongo-style documents (`_id`, camelCase fields) and
//! sometimes populates references in place of bare ids. Every such field is
//! modeled as `Option<Ref<T>>` so absence and population are explicit in the
//! type instead of being probed ad hoc by views.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A document reference that the server may or may not have populated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    /// Populated document.
    Populated(T),
    /// Bare document id.
    Id(String),
}

/// Documents addressable by id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl<T: Identified> Ref<T> {
    /// Referenced id, whether or not the document was populated.
    pub fn id(&self) -> &str {
        match self {
            Self::Populated(doc) => doc.id(),
            Self::Id(id) => id,
        }
    }

    /// Populated document, if the server expanded the reference.
    pub fn populated(&self) -> Option<&T> {
        match self {
            Self::Populated(doc) => Some(doc),
            Self::Id(_) => None,
        }
    }
}

/// Response body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Any additional fields the server chose to include.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A user as returned by `/users` and `/users/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Role assignments; the first entry is treated as the primary role.
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,
    /// Team membership; absent when the user has no team.
    #[serde(rename = "teamId", default)]
    pub team_id: Option<Ref<TeamSummary>>,
}

impl User {
    /// Primary role reference, if the user has one.
    pub fn primary_role(&self) -> Option<&Ref<RoleSummary>> {
        self.roles.first().and_then(|assignment| assignment.role_id.as_ref())
    }

    /// Display name of the primary role when the server populated it.
    pub fn primary_role_name(&self) -> Option<&str> {
        self.primary_role()
            .and_then(Ref::populated)
            .map(|role| role.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Id of the team the user belongs to.
    pub fn team_ref_id(&self) -> Option<&str> {
        self.team_id.as_ref().map(Ref::id).filter(|id| !id.is_empty())
    }

    /// Uppercased first letter of the name, for avatar badges.
    pub fn initial(&self) -> String {
        self.name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
    }
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One role assignment on a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    #[serde(rename = "roleId", default)]
    pub role_id: Option<Ref<RoleSummary>>,
    #[serde(rename = "validFrom", default)]
    pub valid_from: Option<String>,
}

/// Populated role reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Identified for RoleSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Populated team reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Identified for TeamSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Populated user reference (audit-log actors).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Identified for UserSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A team as returned by `/teams`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "memberCount", default)]
    pub member_count: u32,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Identified for Team {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A role as returned by `/roles`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<RolePermission>,
}

impl Role {
    pub fn permission_keys(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(|p| p.permission_key.as_str())
    }
}

impl Identified for Role {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A permission granted to a role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    #[serde(rename = "permissionKey")]
    pub permission_key: String,
}

/// Catalog entry from `/roles/permissions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub key: String,
    #[serde(default)]
    pub description: String,
}

/// An audit-log entry from `/audit-logs`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    /// Acting user; absent for system-originated events.
    #[serde(rename = "actorUserId", default)]
    pub actor: Option<Ref<UserSummary>>,
    pub action: String,
    #[serde(rename = "targetType", default)]
    pub target_type: Option<String>,
    #[serde(rename = "targetName", default)]
    pub target_name: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

impl AuditLog {
    pub fn actor_name(&self) -> &str {
        self.actor
            .as_ref()
            .and_then(Ref::populated)
            .map(|actor| actor.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("System")
    }

    pub fn actor_email(&self) -> Option<&str> {
        self.actor
            .as_ref()
            .and_then(Ref::populated)
            .map(|actor| actor.email.as_str())
            .filter(|email| !email.is_empty())
    }

    pub fn target_type_label(&self) -> &str {
        self.target_type.as_deref().filter(|s| !s.is_empty()).unwrap_or("N/A")
    }

    pub fn target_name_label(&self) -> &str {
        self.target_name.as_deref().filter(|s| !s.is_empty()).unwrap_or("N/A")
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /users`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssignRoleRequest<'a> {
    #[serde(rename = "roleId")]
    pub role_id: &'a str,
    #[serde(rename = "validFrom", skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssignTeamRequest<'a> {
    #[serde(rename = "teamId")]
    pub team_id: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameRequest<'a> {
    pub name: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PermissionKeyRequest<'a> {
    #[serde(rename = "permissionKey")]
    pub permission_key: &'a str,
}
