//! Session-authenticating reverse gateway for the project service.
//!
//! Resolves each caller's `identifier` session token to a user id, injects
//! that id into the forwarded request and normalizes the upstream reply.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::{ConfigError, GatewayError};
pub use routes::create_router;
pub use state::AppState;
