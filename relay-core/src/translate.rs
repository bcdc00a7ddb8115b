//! Upstream-to-caller response translation.
//!
//! | upstream | caller                                   |
//! |----------|------------------------------------------|
//! | 200      | 200, upstream body unchanged             |
//! | 403      | 403, `{"error_code":"FORBIDDEN_USER"}`    |
//! | 404      | 404, `{"error_code":"PROJECT_NOT_FOUND"}` |
//! | other    | same status, upstream body unchanged     |
//!
//! Relayed replies keep the upstream `content-type` when it sent one.

use crate::error_code::ErrorCode;

/// Status, declared content type and raw body of an upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, content_type: None, body: body.into() }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// What the caller receives for a given upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Relay the upstream status, content type and body bytes as-is.
    Relay { status: u16, content_type: Option<String>, body: Vec<u8> },
    /// Replace the upstream body with a normalized error code.
    Error(ErrorCode),
}

impl Translation {
    /// Status code the caller will see.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Translation::Relay { status, .. } => *status,
            Translation::Error(code) => code.status(),
        }
    }
}

/// Applies the translation rule to an upstream reply, consuming it.
#[must_use]
pub fn translate(response: UpstreamResponse) -> Translation {
    match response.status {
        403 => Translation::Error(ErrorCode::ForbiddenUser),
        404 => Translation::Error(ErrorCode::ProjectNotFound),
        status => Translation::Relay { status, content_type: response.content_type, body: response.body },
    }
}
