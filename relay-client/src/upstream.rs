//! Forwarding of built requests to the project and config services.

use async_trait::async_trait;
use hyper::Method;
use relay_core::{ForwardRequest, UpstreamResponse, UpstreamTarget};
use url::Url;

use crate::http::{compose_url, HttpClient};
use crate::ClientError;

/// Sends a [`ForwardRequest`] to the service it targets.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Issue the call and return the raw upstream reply.
    ///
    /// # Errors
    /// Returns transport-class [`ClientError`]s; HTTP error statuses are
    /// returned as ordinary [`UpstreamResponse`]s.
    async fn forward(&self, request: ForwardRequest) -> Result<UpstreamResponse, ClientError>;
}

/// Base URIs of the services the gateway forwards to.
#[derive(Debug, Clone)]
pub struct UpstreamBases {
    pub project: Url,
    pub config: Url,
}

impl UpstreamBases {
    #[must_use]
    pub fn for_target(&self, target: UpstreamTarget) -> &Url {
        match target {
            UpstreamTarget::Project => &self.project,
            UpstreamTarget::Config => &self.config,
        }
    }
}

/// [`Upstream`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: HttpClient,
    bases: UpstreamBases,
}

impl HttpUpstream {
    #[must_use]
    pub fn new(client: HttpClient, bases: UpstreamBases) -> Self {
        Self { client, bases }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn forward(&self, request: ForwardRequest) -> Result<UpstreamResponse, ClientError> {
        let base = self.bases.for_target(request.target);
        let url = compose_url(base, &request.path_segments, &request.query)?;
        let method = match request.method {
            relay_core::Method::Get => Method::GET,
            relay_core::Method::Post => Method::POST,
        };
        let body = request
            .body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()?;

        self.client.send(method, &url, &[("Accept", "application/json")], body).await
    }
}
