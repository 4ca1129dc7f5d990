//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `users`, `roles`, etc.) so individual
//! pages can depend on small focused models. Only `session` outlives a page;
//! the rest reflect the last successful fetch of the page that owns them.

pub mod audit;
pub mod profile;
pub mod roles;
pub mod session;
pub mod teams;
pub mod users;
