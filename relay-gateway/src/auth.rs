//! Session-token extraction and identity resolution for inbound requests.

use axum::http::HeaderMap;
use relay_client::IdentityResolver;
use relay_core::{SessionToken, UserId};

use crate::error::GatewayError;

/// Header carrying the caller's session token.
pub const SESSION_HEADER: &str = "identifier";

/// The inbound request carried no usable session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing 'identifier' header")]
pub struct MissingToken;

impl From<MissingToken> for GatewayError {
    fn from(_: MissingToken) -> Self {
        GatewayError::UnrecognizedUser
    }
}

/// Pull the session token out of `headers`.
///
/// An empty or non-ASCII header value counts as absent.
///
/// # Errors
/// Returns [`MissingToken`] when no usable token is present.
pub fn session_token(headers: &HeaderMap) -> Result<SessionToken, MissingToken> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(SessionToken::from_header)
        .ok_or(MissingToken)
}

/// Resolve the caller behind `headers`.
///
/// The resolver is not consulted when the header is missing.
///
/// # Errors
/// Returns [`GatewayError::UnrecognizedUser`] for a missing token or a
/// rejected one, and [`GatewayError::Client`] when the identity service
/// cannot be reached.
pub async fn authenticate(
    resolver: &dyn IdentityResolver,
    headers: &HeaderMap,
) -> Result<UserId, GatewayError> {
    let token = session_token(headers).inspect_err(|_| {
        tracing::warn!("request without session token");
    })?;

    match resolver.resolve(&token).await {
        Ok(user) => Ok(user),
        Err(e) if e.is_rejection() => {
            tracing::warn!(error = %e, "identity service rejected session");
            Err(GatewayError::UnrecognizedUser)
        }
        Err(e) => {
            tracing::warn!(error = %e, "identity lookup failed");
            Err(GatewayError::Client(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn session_token_reads_identifier_header() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("tok-1"));
        let token = session_token(&headers);
        assert_eq!(token.map(|t| t.expose().to_owned()), Ok("tok-1".to_owned()));
    }

    #[test]
    fn session_token_absent_or_empty_is_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), Err(MissingToken));

        headers.insert(SESSION_HEADER, HeaderValue::from_static(""));
        assert_eq!(session_token(&headers), Err(MissingToken));
    }

    #[test]
    fn session_token_ignores_authorization_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer tok-1"));
        assert_eq!(session_token(&headers), Err(MissingToken));
    }
}
