//! Credentials, regions, endpoints and client configuration.
//!
//! A client is bound to one endpoint for its whole lifetime. The endpoint is
//! resolved once from the fixed region table below (or from an explicit URL
//! override when talking to a local emulator) and never changes afterwards.

use crate::error::{SnsError, SnsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// ── Regions ─────────────────────────────────────────────────────────────

/// Regions with a known SNS endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    #[serde(rename = "us-east-1")]
    UsEast1,
    #[serde(rename = "us-west-1")]
    UsWest1,
    #[serde(rename = "us-west-2")]
    UsWest2,
    #[serde(rename = "eu-west-1")]
    EuWest1,
    #[serde(rename = "eu-central-1")]
    EuCentral1,
    #[serde(rename = "ap-southeast-1")]
    ApSoutheast1,
    #[serde(rename = "ap-southeast-2")]
    ApSoutheast2,
    #[serde(rename = "ap-northeast-1")]
    ApNortheast1,
    #[serde(rename = "sa-east-1")]
    SaEast1,
}

impl Region {
    pub const ALL: [Region; 9] = [
        Region::UsEast1,
        Region::UsWest1,
        Region::UsWest2,
        Region::EuWest1,
        Region::EuCentral1,
        Region::ApSoutheast1,
        Region::ApSoutheast2,
        Region::ApNortheast1,
        Region::SaEast1,
    ];

    /// Region code, e.g. `us-east-1`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::UsEast1 => "us-east-1",
            Region::UsWest1 => "us-west-1",
            Region::UsWest2 => "us-west-2",
            Region::EuWest1 => "eu-west-1",
            Region::EuCentral1 => "eu-central-1",
            Region::ApSoutheast1 => "ap-southeast-1",
            Region::ApSoutheast2 => "ap-southeast-2",
            Region::ApNortheast1 => "ap-northeast-1",
            Region::SaEast1 => "sa-east-1",
        }
    }

    /// SNS hostname for this region.
    pub fn host(&self) -> &'static str {
        match self {
            Region::UsEast1 => "sns.us-east-1.amazonaws.com",
            Region::UsWest1 => "sns.us-west-1.amazonaws.com",
            Region::UsWest2 => "sns.us-west-2.amazonaws.com",
            Region::EuWest1 => "sns.eu-west-1.amazonaws.com",
            Region::EuCentral1 => "sns.eu-central-1.amazonaws.com",
            Region::ApSoutheast1 => "sns.ap-southeast-1.amazonaws.com",
            Region::ApSoutheast2 => "sns.ap-southeast-2.amazonaws.com",
            Region::ApNortheast1 => "sns.ap-northeast-1.amazonaws.com",
            Region::SaEast1 => "sns.sa-east-1.amazonaws.com",
        }
    }
}

impl FromStr for Region {
    type Err = SnsError;

    fn from_str(s: &str) -> SnsResult<Self> {
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| SnsError::validation(format!("Region unrecognised: '{}'", s)))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Credentials ─────────────────────────────────────────────────────────

/// Long-term access key pair used to sign every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    /// Both keys must be non-empty.
    pub fn new(access_key_id: &str, secret_access_key: &str) -> SnsResult<Self> {
        if access_key_id.is_empty() || secret_access_key.is_empty() {
            return Err(SnsError::validation(
                "Must define Amazon access key and secret key",
            ));
        }
        Ok(Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
        })
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

// ── Endpoint ────────────────────────────────────────────────────────────

/// URL scheme used for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Scheme and host a client sends its requests to.
///
/// The host is the exact string placed in the string to sign, so it must
/// match what the transport connects to, including a non-default port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    host: String,
}

impl Endpoint {
    pub fn for_region(region: Region, scheme: Scheme) -> Self {
        Self {
            scheme,
            host: region.host().to_string(),
        }
    }

    /// Parse an override such as `http://localhost:4566` (LocalStack etc.).
    pub fn from_url(endpoint_url: &str) -> SnsResult<Self> {
        let parsed = url::Url::parse(endpoint_url).map_err(|e| {
            SnsError::validation(format!("Invalid endpoint URL '{}': {}", endpoint_url, e))
        })?;
        let scheme = match parsed.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => {
                return Err(SnsError::validation(format!(
                    "Unsupported endpoint scheme '{}'",
                    other
                )))
            }
        };
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                SnsError::validation(format!("Endpoint URL '{}' has no host", endpoint_url))
            })?;
        if parsed.path() != "/" || parsed.query().is_some() {
            return Err(SnsError::validation(format!(
                "Endpoint URL '{}' must not carry a path or query",
                endpoint_url
            )));
        }
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        Ok(Self { scheme, host })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `scheme://host/`
    pub fn base_url(&self) -> String {
        format!("{}://{}/", self.scheme.as_str(), self.host)
    }
}

// ── Client configuration ────────────────────────────────────────────────

fn default_region() -> String {
    Region::default().as_str().to_string()
}

/// Serializable client settings, e.g. loaded from an application config
/// file or from the environment.
#[derive(Clone, Serialize, Deserialize)]
pub struct SnsConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub scheme: Scheme,
    /// Overrides the regional endpoint (LocalStack, moto, ...).
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Whole-request timeout in seconds; transport default when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl fmt::Debug for SnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnsConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("region", &self.region)
            .field("scheme", &self.scheme)
            .field("endpoint_url", &self.endpoint_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl SnsConfig {
    pub fn new(access_key_id: &str, secret_access_key: &str, region: Region) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            region: region.as_str().to_string(),
            scheme: Scheme::default(),
            endpoint_url: None,
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }

    /// Resolve settings from process environment variables.
    ///
    /// Keys come from `AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY`, falling
    /// back to `KEY`/`SECRET`. The region comes from `AWS_REGION` or
    /// `AWS_DEFAULT_REGION`, defaulting to `us-east-1`.
    pub fn from_environment() -> SnsResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SnsConfig::from_environment`] over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> SnsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| lookup(name).filter(|v| !v.is_empty()))
        };

        let access_key_id = first(&["AWS_ACCESS_KEY_ID", "KEY"]);
        let secret_access_key = first(&["AWS_SECRET_ACCESS_KEY", "SECRET"]);
        let (access_key_id, secret_access_key) = match (access_key_id, secret_access_key) {
            (Some(a), Some(s)) => (a, s),
            _ => {
                return Err(SnsError::validation(
                    "Must define Amazon access key and secret key",
                ))
            }
        };

        Ok(Self {
            access_key_id,
            secret_access_key,
            region: first(&["AWS_REGION", "AWS_DEFAULT_REGION"]).unwrap_or_else(default_region),
            scheme: Scheme::default(),
            endpoint_url: first(&["AWS_ENDPOINT_URL_SNS", "AWS_ENDPOINT_URL"]),
            request_timeout_secs: None,
            connect_timeout_secs: None,
        })
    }

    pub fn credentials(&self) -> SnsResult<Credentials> {
        Credentials::new(&self.access_key_id, &self.secret_access_key)
    }

    /// Validates the region even when an endpoint override is set.
    pub fn endpoint(&self) -> SnsResult<Endpoint> {
        let region: Region = self.region.parse()?;
        match self.endpoint_url {
            Some(ref url) => Endpoint::from_url(url),
            None => Ok(Endpoint::for_region(region, self.scheme)),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}
