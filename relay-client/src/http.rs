//! Pooled HTTP/1 client shared by the identity resolver and the upstream
//! forwarder.
//!
//! Each call is bounded by the configured timeout and never retried.

use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{header, Method, Request};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use relay_core::UpstreamResponse;
use url::Url;

use crate::ClientError;

/// Default per-call timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper over a `hyper-util` legacy client with a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client<HttpConnector, Full<Bytes>>,
    timeout: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl HttpClient {
    /// Create a client whose every call is bounded by `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let inner = Client::builder(TokioExecutor::new()).build_http();
        Self { inner, timeout }
    }

    /// The per-call timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one request and collect the full response body.
    ///
    /// Non-2xx statuses are returned as ordinary responses; interpreting them
    /// is the caller's job.
    ///
    /// # Errors
    /// - [`ClientError::InvalidUri`] if `url` cannot be turned into a request URI.
    /// - [`ClientError::Transport`] on connection, protocol or body-read errors.
    /// - [`ClientError::Timeout`] if the call exceeds the configured timeout.
    pub async fn send(
        &self,
        method: Method,
        url: &Url,
        headers: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<UpstreamResponse, ClientError> {
        let mut builder = Request::builder().method(method.clone()).uri(url.as_str());
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let body_bytes = match body {
            Some(bytes) => {
                builder = builder.header("Content-Type", "application/json");
                Bytes::from(bytes)
            }
            None => Bytes::new(),
        };
        let req = builder.body(Full::new(body_bytes)).map_err(|e| ClientError::InvalidUri {
            uri: url.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(%method, url = %url, "sending outbound request");

        let exchange = async {
            let resp = self.inner.request(req).await.map_err(|e| transport(url, &e))?;
            let status = resp.status().as_u16();
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let bytes = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| transport(url, &e))?
                .to_bytes();
            let mut reply = UpstreamResponse::new(status, bytes.to_vec());
            reply.content_type = content_type;
            Ok::<_, ClientError>(reply)
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout { url: url.to_string(), timeout: self.timeout }),
        }
    }
}

fn transport(url: &Url, err: &dyn std::fmt::Display) -> ClientError {
    ClientError::Transport { url: url.to_string(), reason: err.to_string() }
}

/// Parse a configured base URI.
///
/// # Errors
/// Returns [`ClientError::InvalidUri`] if `raw` is not an absolute URL that
/// can carry path segments.
pub fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|e| ClientError::InvalidUri { uri: raw.to_owned(), reason: e.to_string() })?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUri { uri: raw.to_owned(), reason: "not a base URL".to_owned() });
    }
    Ok(url)
}

/// Append percent-encoded `segments` and `query` pairs to `base`.
///
/// A trailing slash on `base` is tolerated.
///
/// # Errors
/// Returns [`ClientError::InvalidUri`] if `base` cannot carry path segments.
pub fn compose_url<S: AsRef<str>>(
    base: &Url,
    segments: &[S],
    query: &[(String, String)],
) -> Result<Url, ClientError> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|()| ClientError::InvalidUri {
            uri: base.to_string(),
            reason: "not a base URL".to_owned(),
        })?;
        path.pop_if_empty();
        path.extend(segments);
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(raw: &str) -> Url {
        match parse_base(raw) {
            Ok(u) => u,
            Err(e) => panic!("bad base: {e}"),
        }
    }

    #[test]
    fn compose_url_appends_segments_and_query() {
        let url = compose_url(
            &base("http://project:7000"),
            &["project", "p1", "export"],
            &[("user_id".to_owned(), "u-1".to_owned()), ("num_samples".to_owned(), "5".to_owned())],
        );
        let url = match url {
            Ok(u) => u,
            Err(e) => panic!("compose failed: {e}"),
        };
        assert_eq!(url.as_str(), "http://project:7000/project/p1/export?user_id=u-1&num_samples=5");
    }

    #[test]
    fn compose_url_tolerates_trailing_slash_and_prefix() {
        let url = match compose_url(&base("http://config/api/"), &["base_config"], &[]) {
            Ok(u) => u,
            Err(e) => panic!("compose failed: {e}"),
        };
        assert_eq!(url.as_str(), "http://config/api/base_config");
    }

    #[test]
    fn compose_url_encodes_segment_separators() {
        let url = match compose_url(&base("http://project"), &["project", "a/b c"], &[]) {
            Ok(u) => u,
            Err(e) => panic!("compose failed: {e}"),
        };
        assert_eq!(url.as_str(), "http://project/project/a%2Fb%20c");
    }

    #[test]
    fn parse_base_rejects_relative_and_opaque() {
        assert!(parse_base("not a url").is_err());
        assert!(parse_base("mailto:ops@example.com").is_err());
    }
}
