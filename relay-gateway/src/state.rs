//! Shared, immutable per-process state handed to every handler.

use std::sync::Arc;

use relay_client::{
    ClientError, HttpClient, HttpUpstream, IdentityResolver, Upstream, UpstreamBases, WhoamiResolver,
};

use crate::config::GatewayConfig;

/// Collaborators the route handlers call out to.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn IdentityResolver>,
    pub upstream: Arc<dyn Upstream>,
    /// Cap on inbound POST bodies; `None` reads them whole.
    pub max_body_bytes: Option<usize>,
}

impl AppState {
    #[must_use]
    pub fn new(resolver: Arc<dyn IdentityResolver>, upstream: Arc<dyn Upstream>) -> Self {
        Self { resolver, upstream, max_body_bytes: None }
    }

    #[must_use]
    pub fn with_body_limit(mut self, max_body_bytes: Option<usize>) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Wire the HTTP-backed resolver and upstream from `config`. Both share
    /// one connection pool.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUri`] if the identity base URI cannot
    /// carry the whoami path.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ClientError> {
        let client = HttpClient::new(config.request_timeout);
        let resolver = WhoamiResolver::new(client.clone(), &config.identity_uri)?;
        let upstream = HttpUpstream::new(
            client,
            UpstreamBases { project: config.project_uri.clone(), config: config.config_uri.clone() },
        );
        Ok(Self::new(Arc::new(resolver), Arc::new(upstream)).with_body_limit(config.max_body_bytes))
    }
}
