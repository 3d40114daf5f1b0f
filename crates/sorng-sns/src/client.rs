//! Signed request pipeline shared by every SNS operation.
//!
//! `request` runs the whole round trip:
//!
//! ```text
//! params ─► CanonicalRequest ─► sign_v2 ─► Transport::get ─► interpret ─► XmlElement
//! ```

use crate::canonical::CanonicalRequest;
use crate::config::{Credentials, Endpoint, Region, Scheme, SnsConfig};
use crate::error::SnsResult;
use crate::response;
use crate::transport::{ReqwestTransport, Transport};
use crate::xml::XmlElement;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// SNS client bound to one endpoint and one set of credentials.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct SnsClient {
    credentials: Credentials,
    endpoint: Endpoint,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for SnsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnsClient")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl SnsClient {
    /// HTTPS client for `region` with a default reqwest transport.
    pub fn new(credentials: Credentials, region: Region) -> Self {
        Self::with_transport(
            credentials,
            Endpoint::for_region(region, Scheme::Https),
            Arc::new(ReqwestTransport::default()),
        )
    }

    /// Validate `config` and build a client with its timeouts applied.
    pub fn from_config(config: &SnsConfig) -> SnsResult<Self> {
        let credentials = config.credentials()?;
        let endpoint = config.endpoint()?;
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::with_transport(credentials, endpoint, Arc::new(transport)))
    }

    pub fn with_transport(
        credentials: Credentials,
        endpoint: Endpoint,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            credentials,
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn access_key_id(&self) -> &str {
        self.credentials.access_key_id()
    }

    /// Sign and send `action`, returning the parsed success document.
    pub async fn request(
        &self,
        action: &str,
        params: BTreeMap<String, String>,
    ) -> SnsResult<XmlElement> {
        self.request_at(action, params, Utc::now()).await
    }

    /// [`SnsClient::request`] with an explicit signing timestamp.
    pub async fn request_at(
        &self,
        action: &str,
        params: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) -> SnsResult<XmlElement> {
        let canonical = CanonicalRequest::new(
            action,
            params,
            self.credentials.access_key_id(),
            timestamp,
        )?;
        let signed = canonical.sign(&self.endpoint, self.credentials.secret_access_key());

        log::debug!("SNS {} request to {}", action, self.endpoint.host());
        let response = self.transport.get(&signed.url).await?;
        log::debug!("SNS {} returned HTTP {}", action, response.status);

        response::interpret(&response).map_err(|err| {
            if err.status().is_some() {
                log::warn!("SNS {} failed: {}", action, err);
            }
            err
        })
    }
}
