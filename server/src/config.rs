//! Host configuration from the environment.
//!
//! `PORT` (default 3000) and `HOST` (default `0.0.0.0`) choose the listen
//! address; `TEAMDESK_COMPRESSION` toggles gzip responses (default on).
//! Leptos reads its own `LEPTOS_*` variables in `routes::app`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::HostError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    pub host: String,
    pub port: u16,
    pub compression: bool,
}

impl HostConfig {
    /// Read the host settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnv` for a `PORT` that is not a valid port number.
    pub fn from_env() -> Result<Self, HostError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let host = std::env::var("HOST")
            .ok()
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let compression = env_bool("TEAMDESK_COMPRESSION").unwrap_or(true);
        Ok(Self { host, port, compression })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn parse_port(raw: Option<&str>) -> Result<u16, HostError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse()
            .map_err(|_| HostError::InvalidEnv { key: "PORT", value: value.to_owned() }),
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}
