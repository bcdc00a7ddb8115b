/// Errors produced by the `relay-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A body field the route requires was absent from the inbound JSON body.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// The route forwards a JSON body but the inbound body was not an object.
    #[error("request body must be a JSON object")]
    BodyNotObject,

    /// A query parameter was present but failed validation.
    #[error("invalid query parameter '{name}': {reason}")]
    InvalidQuery { name: &'static str, reason: String },

    /// The upstream path template names a parameter the caller did not supply.
    #[error("missing path parameter '{name}'")]
    MissingPathParam { name: String },

    /// The identity service resolved a session to an empty user id.
    #[error("resolved user identity is empty")]
    EmptyIdentity,
}
