//! HTTP listener settings.

use crate::{ConfigError, FromEnv, env_or_default, env_parse};
use std::net::Ipv4Addr;

pub const DEFAULT_PORT: u16 = 8080;

/// Where the products service listens.
///
/// `host` stays a string so hostnames such as `localhost` resolve at bind
/// time instead of failing config parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port`, ready for `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), DEFAULT_PORT)
    }
}

/// Environment variables:
/// - `HOST` (default: 0.0.0.0)
/// - `PORT` (default: 8080)
impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env_or_default("HOST", &defaults.host).trim().to_string();
        if host.is_empty() {
            return Err(ConfigError::parse("HOST", "must not be empty"));
        }

        let port = env_parse("PORT", &defaults.port.to_string())?;

        Ok(Self { host, port })
    }
}
