//! Core types for the relay session-authenticating gateway.
//!
//! Defines the transport-free pieces of the gateway contract: session tokens
//! and user ids, the caller-facing error vocabulary, the route catalogue,
//! forwarded-request construction and upstream response translation.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod catalogue;
pub mod error;
pub mod error_code;
pub mod forward;
pub mod id;
pub mod route;
pub mod translate;

pub use error::CoreError;
pub use error_code::{ErrorBody, ErrorCode};
pub use forward::{ForwardRequest, Inbound, USER_ID_FIELD};
pub use id::{SessionToken, UserId};
pub use route::{IdentityPlacement, Method, QueryKind, QueryParam, RouteSpec, UpstreamTarget};
pub use translate::{translate, Translation, UpstreamResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_serializes_with_screaming_case() {
        let json = match serde_json::to_string(&ErrorCode::UnrecognizedUser.body()) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, r#"{"error_code":"UNRECOGNIZED_USER"}"#);
    }

    #[test]
    fn error_code_status_pairs() {
        assert_eq!(ErrorCode::UnrecognizedUser.status(), 401);
        assert_eq!(ErrorCode::ForbiddenUser.status(), 403);
        assert_eq!(ErrorCode::ProjectNotFound.status(), 404);
    }

    #[test]
    fn error_code_display_matches_wire_form() {
        for code in [ErrorCode::UnrecognizedUser, ErrorCode::ForbiddenUser, ErrorCode::ProjectNotFound] {
            let wire = match serde_json::to_value(code) {
                Ok(v) => v,
                Err(e) => panic!("serialization failed: {e}"),
            };
            assert_eq!(wire, serde_json::Value::String(code.to_string()));
        }
    }

    #[test]
    fn user_id_rejects_empty() {
        assert_eq!(UserId::new(""), Err(CoreError::EmptyIdentity));
        assert!(UserId::try_from("abc".to_owned()).is_ok());
    }

    #[test]
    fn session_token_empty_header_is_absent() {
        assert!(SessionToken::from_header("").is_none());
        let token = SessionToken::from_header("tok");
        assert_eq!(token.as_ref().map(SessionToken::expose), Some("tok"));
    }

    #[test]
    fn session_token_debug_is_redacted() {
        let token = match SessionToken::from_header("super-secret") {
            Some(t) => t,
            None => panic!("non-empty header must yield a token"),
        };
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret"), "token leaked into Debug: {rendered}");
    }
}
