//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome (route guards, sidebar) while reading
//! shared session state from Leptos context providers.

pub mod guard;
pub mod sidebar;
