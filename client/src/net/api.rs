//! REST gateway for the remote identity/access API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every remote call in the console passes through `ApiClient`, which reads
//! the bearer token from the credential store right before building each
//! request. Reading the store (not the session) keeps the gateway free of
//! any dependency on session state.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `ApiError::Status` carrying the server message
//! when present. 401/403 are passed through untouched; callers decide.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::credentials::{BrowserCredentialStore, CredentialStore};
use super::error::ApiError;
use super::transport::{BrowserTransport, HttpRequest, HttpResponse, Method, Transport};
use super::types::{
    AssignRoleRequest, AssignTeamRequest, AuditLog, LoginRequest, LoginResponse, NameRequest, NewUser,
    Permission, PermissionKeyRequest, RegisterRequest, Role, Team, User,
};
use crate::config;

/// Gateway used by the running console.
pub type BrowserApi = ApiClient<BrowserCredentialStore, BrowserTransport>;

impl BrowserApi {
    /// Gateway pointed at the build-time configured API origin.
    pub fn from_config() -> Self {
        Self::new(config::api_base_url(), BrowserCredentialStore, BrowserTransport)
    }
}

/// HTTP client that attaches the stored bearer token to every request.
#[derive(Clone, Debug)]
pub struct ApiClient<S, T> {
    base_url: String,
    store: S,
    transport: T,
}

impl<S: CredentialStore, T: Transport> ApiClient<S, T> {
    pub fn new(base_url: impl Into<String>, store: S, transport: T) -> Self {
        Self { base_url: base_url.into(), store, transport }
    }

    /// Credential slot this gateway reads from.
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// `Bearer <token>` for the stored token; `None` when no usable token exists.
    pub fn authorization(&self) -> Option<String> {
        self.store
            .load()
            .filter(|token| !token.is_empty())
            .map(|token| format!("Bearer {token}"))
    }

    /// Build the request exactly as it will be sent.
    pub fn build_request(&self, method: Method, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if let Some(authorization) = self.authorization() {
            headers.push(("Authorization".to_owned(), authorization));
        }
        HttpRequest { method, url: config::join_url(&self.base_url, path), headers, body }
    }

    async fn call<R: DeserializeOwned>(&self, method: Method, path: &str, body: Option<String>) -> Result<R, ApiError> {
        let request = self.build_request(method, path, body);
        let response = self.transport.send(request).await?;
        decode_response(response)
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.call(Method::Get, path, None).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.call(Method::Post, path, Some(body)).await
    }

    async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.call(Method::Delete, path, None).await
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Value, ApiError> {
        self.post("/auth/register", &RegisterRequest { name, email, password }).await
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged, or `Decode` if the
    /// response carries no token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post("/auth/login", &LoginRequest { email, password }).await
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// `GET /users/me`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/users/me").await
    }

    /// `GET /users`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users").await
    }

    /// `POST /users`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn create_user(&self, user: &NewUser) -> Result<Value, ApiError> {
        self.post("/users", user).await
    }

    /// `POST /users/{id}/role`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn assign_role(&self, user_id: &str, role_id: &str, valid_from: Option<&str>) -> Result<Value, ApiError> {
        let path = format!("/users/{}/role", encode_segment(user_id));
        self.post(&path, &AssignRoleRequest { role_id, valid_from }).await
    }

    /// `POST /users/{id}/team`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn assign_team(&self, user_id: &str, team_id: &str) -> Result<Value, ApiError> {
        let path = format!("/users/{}/team", encode_segment(user_id));
        self.post(&path, &AssignTeamRequest { team_id }).await
    }

    /// `DELETE /users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn delete_user(&self, user_id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/users/{}", encode_segment(user_id))).await
    }

    // =========================================================================
    // TEAMS
    // =========================================================================

    /// `GET /teams`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        self.get("/teams").await
    }

    /// `POST /teams`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn create_team(&self, name: &str) -> Result<Value, ApiError> {
        self.post("/teams", &NameRequest { name }).await
    }

    // =========================================================================
    // ROLES & PERMISSIONS
    // =========================================================================

    /// `GET /roles`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get("/roles").await
    }

    /// `POST /roles`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn create_role(&self, name: &str) -> Result<Value, ApiError> {
        self.post("/roles", &NameRequest { name }).await
    }

    /// `GET /roles/permissions`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn list_permissions(&self) -> Result<Vec<Permission>, ApiError> {
        self.get("/roles/permissions").await
    }

    /// `POST /roles/{id}/permissions`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn add_permission_to_role(&self, role_id: &str, permission_key: &str) -> Result<Value, ApiError> {
        let path = format!("/roles/{}/permissions", encode_segment(role_id));
        self.post(&path, &PermissionKeyRequest { permission_key }).await
    }

    /// `DELETE /roles/{id}/permissions/{key}`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn remove_permission_from_role(&self, role_id: &str, permission_key: &str) -> Result<Value, ApiError> {
        let path = format!("/roles/{}/permissions/{}", encode_segment(role_id), encode_segment(permission_key));
        self.delete(&path).await
    }

    // =========================================================================
    // AUDIT
    // =========================================================================

    /// `GET /audit-logs`.
    ///
    /// # Errors
    ///
    /// Returns the transport or server failure unchanged.
    pub async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, ApiError> {
        self.get("/audit-logs").await
    }
}

/// Map a raw response to the payload or a structured error.
fn decode_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_status(response.status, &response.body));
    }
    let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Percent-encode a single path segment (RFC 3986 unreserved set passes through).
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
