//! Session-token to user-id resolution.

use async_trait::async_trait;
use hyper::Method;
use relay_core::{SessionToken, UserId};
use serde::Deserialize;
use url::Url;

use crate::http::{compose_url, HttpClient};
use crate::ClientError;

/// Exchanges a caller's session token for a user identity.
///
/// Implementations must be `Send + Sync` so one resolver can serve every
/// request task.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve `token` to the user it belongs to.
    ///
    /// # Errors
    /// Returns [`ClientError::Rejected`] or [`ClientError::MalformedIdentity`]
    /// when the token is not acceptable, and transport-class errors when the
    /// identity service cannot be reached.
    async fn resolve(&self, token: &SessionToken) -> Result<UserId, ClientError>;
}

#[derive(Debug, Deserialize)]
struct WhoamiBody {
    identity: WhoamiIdentity,
}

#[derive(Debug, Deserialize)]
struct WhoamiIdentity {
    id: String,
}

/// Resolver backed by the identity service's `GET /sessions/whoami`.
#[derive(Debug, Clone)]
pub struct WhoamiResolver {
    client: HttpClient,
    whoami_url: Url,
}

impl WhoamiResolver {
    /// Build a resolver for the identity service rooted at `base`.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUri`] if `base` cannot carry a path.
    pub fn new(client: HttpClient, base: &Url) -> Result<Self, ClientError> {
        let whoami_url = compose_url(base, &["sessions", "whoami"], &[])?;
        Ok(Self { client, whoami_url })
    }
}

#[async_trait]
impl IdentityResolver for WhoamiResolver {
    async fn resolve(&self, token: &SessionToken) -> Result<UserId, ClientError> {
        let bearer = format!("Bearer {}", token.expose());
        let resp = self
            .client
            .send(
                Method::GET,
                &self.whoami_url,
                &[("Authorization", bearer.as_str()), ("Accept", "application/json")],
                None,
            )
            .await?;

        match resp.status {
            200..=299 => parse_identity(&resp.body),
            401 | 403 => Err(ClientError::Rejected { status: resp.status }),
            status => Err(ClientError::UnexpectedStatus { status }),
        }
    }
}

/// Extract `identity.id` from a whoami response body.
///
/// # Errors
/// Returns [`ClientError::MalformedIdentity`] if the body is not the expected
/// JSON shape or the id is empty.
pub fn parse_identity(body: &[u8]) -> Result<UserId, ClientError> {
    let whoami: WhoamiBody =
        serde_json::from_slice(body).map_err(|e| ClientError::MalformedIdentity(e.to_string()))?;
    UserId::new(whoami.identity.id).map_err(|e| ClientError::MalformedIdentity(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_identity_extracts_nested_id() {
        let body = br#"{"id":"sess-1","active":true,"identity":{"id":"8a1f","traits":{"email":"a@b.c"}}}"#;
        let user = match parse_identity(body) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(user.as_str(), "8a1f");
    }

    #[test]
    fn parse_identity_rejects_missing_identity() {
        let err = parse_identity(br#"{"id":"sess-1"}"#);
        assert!(matches!(err, Err(ClientError::MalformedIdentity(_))));
    }

    #[test]
    fn parse_identity_rejects_empty_id() {
        let err = parse_identity(br#"{"identity":{"id":""}}"#);
        assert!(matches!(err, Err(ClientError::MalformedIdentity(_))));
    }

    #[test]
    fn parse_identity_rejects_non_json() {
        let err = parse_identity(b"<html>login</html>");
        assert!(matches!(err, Err(ClientError::MalformedIdentity(_))));
    }
}
