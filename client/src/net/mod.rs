//! Networking modules for the remote identity/access API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the single gateway for REST calls, `credentials` owns the durable
//! token slot it reads, `transport` is the HTTP seam, and `types` defines the
//! wire schema.

pub mod api;
pub mod credentials;
pub mod error;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
