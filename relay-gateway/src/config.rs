//! Startup configuration read from the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use relay_client::{parse_base, DEFAULT_TIMEOUT};
use url::Url;

use crate::error::ConfigError;

/// Identity service base URI.
pub const ENV_IDENTITY: &str = "KRATOS";
/// Project service base URI.
pub const ENV_PROJECT: &str = "GATEWAY";
/// Config service base URI.
pub const ENV_CONFIG: &str = "CONFIG";
pub const ENV_LISTEN_ADDR: &str = "RELAY_LISTEN_ADDR";
pub const ENV_TIMEOUT_SECS: &str = "RELAY_REQUEST_TIMEOUT_SECS";
/// Optional cap on inbound request bodies. Unset means unbounded.
pub const ENV_MAX_BODY_BYTES: &str = "RELAY_MAX_BODY_BYTES";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:80";

/// Everything the gateway needs at startup. Built once and handed to the
/// router; nothing reads the environment after this.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GatewayConfig {
    pub identity_uri: Url,
    pub project_uri: Url,
    pub config_uri: Url,
    pub listen_addr: SocketAddr,
    /// Bound on each outbound call.
    pub request_timeout: Duration,
    /// Largest inbound body accepted on POST routes, if any.
    pub max_body_bytes: Option<usize>,
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] if one of the three base URIs is unset
    /// or empty, and [`ConfigError::Invalid`] if any value fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required_uri = |key: &'static str| -> Result<Url, ConfigError> {
            let raw = lookup(key).filter(|v| !v.is_empty()).ok_or(ConfigError::Missing(key))?;
            parse_base(&raw).map_err(|e| ConfigError::Invalid { key, reason: e.to_string() })
        };

        let identity_uri = required_uri(ENV_IDENTITY)?;
        let project_uri = required_uri(ENV_PROJECT)?;
        let config_uri = required_uri(ENV_CONFIG)?;

        let listen_addr = lookup(ENV_LISTEN_ADDR)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid { key: ENV_LISTEN_ADDR, reason: e.to_string() })?;

        let request_timeout = match lookup(ENV_TIMEOUT_SECS) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        key: ENV_TIMEOUT_SECS,
                        reason: "must be a positive number of seconds".to_owned(),
                    })
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => return Err(ConfigError::Invalid { key: ENV_TIMEOUT_SECS, reason: e.to_string() }),
            },
        };

        let max_body_bytes = match lookup(ENV_MAX_BODY_BYTES).filter(|v| !v.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        key: ENV_MAX_BODY_BYTES,
                        reason: "must be a positive number of bytes".to_owned(),
                    })
                }
                Ok(limit) => Some(limit),
                Err(e) => return Err(ConfigError::Invalid { key: ENV_MAX_BODY_BYTES, reason: e.to_string() }),
            },
        };

        Ok(Self { identity_uri, project_uri, config_uri, listen_addr, request_timeout, max_body_bytes })
    }
}
