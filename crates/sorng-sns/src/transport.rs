//! HTTP transport seam.
//!
//! The client only ever issues signed GET requests and needs the status code
//! and body back. [`Transport`] captures exactly that so tests and embedding
//! applications can swap the network layer; [`ReqwestTransport`] is the
//! default implementation.

use crate::config::SnsConfig;
use crate::error::{SnsError, SnsResult};
use async_trait::async_trait;
use reqwest::Client;

/// Header carrying the SNS request ID.
pub const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// Raw response of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub request_id: Option<String>,
}

/// Issues one GET request per call. No retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`. Network-level failures map to [`SnsError::Transport`];
    /// any HTTP status, including errors, is returned as a response.
    async fn get(&self, url: &str) -> SnsResult<HttpResponse>;
}

/// [`Transport`] over a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Wrap a caller-configured client (timeouts, proxies, TLS roots...).
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Build a client using the timeouts from `config`, if any.
    pub fn from_config(config: &SnsConfig) -> SnsResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SnsError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> SnsResult<HttpResponse> {
        let resp = self.http.get(url).send().await.map_err(SnsError::from)?;

        let status = resp.status().as_u16();
        let request_id = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await.map_err(SnsError::from)?;

        Ok(HttpResponse {
            status,
            body,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Region;

    #[test]
    fn from_config_applies_timeouts() {
        let mut cfg = SnsConfig::new("AKID", "secret", Region::UsEast1);
        cfg.request_timeout_secs = Some(5);
        cfg.connect_timeout_secs = Some(2);
        assert!(ReqwestTransport::from_config(&cfg).is_ok());
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        // Bind then drop to get a port nobody is listening on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::default();
        let err = transport
            .get(&format!("http://{}/?Action=ListTopics", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, SnsError::Transport(_)), "got {:?}", err);
        assert_eq!(err.status(), None);
    }
}
