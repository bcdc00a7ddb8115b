//! Error types for the client crate.

use std::time::Duration;

/// Errors raised while talking to the identity service or an upstream.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Connection, protocol or body-read failure.
    #[error("transport error calling {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The call did not finish within the configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// A base URI or composed URL could not be parsed.
    #[error("invalid URI {uri}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// The identity service refused the session token.
    #[error("identity service rejected session (HTTP {status})")]
    Rejected { status: u16 },

    /// The identity service answered with a status it should never send.
    #[error("identity service returned unexpected HTTP {status}")]
    UnexpectedStatus { status: u16 },

    /// A forwarded JSON body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The whoami body did not carry a usable `identity.id`.
    #[error("malformed identity response: {0}")]
    MalformedIdentity(String),
}

impl ClientError {
    /// Whether the error means the caller's token is not acceptable, as
    /// opposed to the identity service being unavailable.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected { .. } | ClientError::MalformedIdentity(_))
    }
}
