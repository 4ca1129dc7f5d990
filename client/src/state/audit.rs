//! Audit-log feed state.

use crate::net::types::AuditLog;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditState {
    pub logs: Vec<AuditLog>,
    pub loading: bool,
    pub error: Option<String>,
}
