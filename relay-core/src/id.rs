use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Opaque session credential presented by a caller in the `identifier` header.
///
/// The gateway never inspects the token; it is only handed to the identity
/// service as a bearer credential. `Debug` is redacted so tokens do not leak
/// into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw header value. Returns `None` for an empty value, which the
    /// gateway treats the same as an absent header.
    #[must_use]
    pub fn from_header(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Identity of the caller as reported by the identity service.
///
/// Lives for one request only and is never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a `UserId`, rejecting the empty string.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyIdentity`] if `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::EmptyIdentity);
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}
