use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbolic error codes returned to callers in `{"error_code": ...}` bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The session token was missing or the identity service refused it.
    UnrecognizedUser,
    /// The project service rejected the resolved identity for this project.
    ForbiddenUser,
    /// The project service reports the project does not exist.
    ProjectNotFound,
}

impl ErrorCode {
    /// HTTP status code paired with this error code.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            ErrorCode::UnrecognizedUser => 401,
            ErrorCode::ForbiddenUser => 403,
            ErrorCode::ProjectNotFound => 404,
        }
    }

    /// Wire spelling of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnrecognizedUser => "UNRECOGNIZED_USER",
            ErrorCode::ForbiddenUser => "FORBIDDEN_USER",
            ErrorCode::ProjectNotFound => "PROJECT_NOT_FOUND",
        }
    }

    /// The caller-facing JSON body for this code.
    #[must_use]
    pub const fn body(self) -> ErrorBody {
        ErrorBody { error_code: self }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{"error_code": "<CODE>"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_code: ErrorCode,
}
