//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_client::ClientError;
use relay_core::{CoreError, ErrorCode};
use serde_json::json;

/// Errors that end a request before an upstream reply can be relayed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The `identifier` header was absent, or the identity service did not
    /// accept the token.
    #[error("unrecognized user")]
    UnrecognizedUser,

    /// The inbound request is malformed for its route.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The inbound body exceeded the configured cap.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The inbound body or query failed route validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An outbound call failed below the HTTP status level.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl GatewayError {
    /// Status code the caller will see.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::UnrecognizedUser => StatusCode::UNAUTHORIZED,
            GatewayError::InvalidRequest(_) | GatewayError::Core(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Client(e) if e.is_rejection() => StatusCode::UNAUTHORIZED,
            GatewayError::Client(ClientError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Client(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            GatewayError::UnrecognizedUser => {
                (status, Json(ErrorCode::UnrecognizedUser.body())).into_response()
            }
            GatewayError::Client(ref e) if e.is_rejection() => {
                (status, Json(ErrorCode::UnrecognizedUser.body())).into_response()
            }
            other => (status, Json(json!({"error": other.to_string()}))).into_response(),
        }
    }
}

/// Errors raised while reading [`crate::config::GatewayConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = match axum::body::to_bytes(resp.into_body(), 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn unrecognized_user_renders_error_code() {
        let resp = GatewayError::UnrecognizedUser.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await, json!({"error_code": "UNRECOGNIZED_USER"}));
    }

    #[tokio::test]
    async fn resolver_rejection_renders_unrecognized_user() {
        let resp = GatewayError::Client(ClientError::Rejected { status: 401 }).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await, json!({"error_code": "UNRECOGNIZED_USER"}));
    }

    #[test]
    fn gateway_error_status_codes_map_correctly() {
        let missing = GatewayError::Core(CoreError::MissingField { field: "file_type" });
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let timeout = GatewayError::Client(ClientError::Timeout {
            url: "http://project/project/p1".to_owned(),
            timeout: Duration::from_secs(1),
        });
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);

        let too_large = GatewayError::PayloadTooLarge { limit: 1024 };
        assert_eq!(too_large.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let down = GatewayError::Client(ClientError::UnexpectedStatus { status: 503 });
        assert_eq!(down.status(), StatusCode::BAD_GATEWAY, "identity outages must not look like 401");
    }

    #[tokio::test]
    async fn client_errors_render_message() {
        let err = GatewayError::Core(CoreError::MissingField { field: "file_type" });
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        let msg = body["error"].as_str().unwrap_or_default();
        assert!(msg.contains("file_type"), "message must name the field, got {msg}");
    }
}
