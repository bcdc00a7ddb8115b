//! Outbound HTTP for the relay gateway.
//!
//! Resolves session tokens against the identity service and forwards built
//! requests to the project and config services over a shared `hyper` client.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod http;
pub mod identity;
pub mod upstream;

pub use error::ClientError;
pub use http::{compose_url, parse_base, HttpClient, DEFAULT_TIMEOUT};
pub use identity::{parse_identity, IdentityResolver, WhoamiResolver};
pub use upstream::{HttpUpstream, Upstream, UpstreamBases};
