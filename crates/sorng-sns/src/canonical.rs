//! Canonical query string and string to sign.
//!
//! Every request carries five mandatory parameters on top of the
//! action-specific ones. All parameters are sorted with [`natural_cmp`] and
//! the resulting query string is both signed and sent on the wire, so the
//! service sees exactly the byte sequence the signature was computed over.
//!
//! ```text
//! StringToSign = "GET" + "\n" +
//!                Host + "\n" +
//!                "/" + "\n" +
//!                key1=value1&key2=value2...
//! ```

use crate::config::Endpoint;
use crate::error::{SnsError, SnsResult};
use crate::signing::{self, SIGNATURE_METHOD, SIGNATURE_VERSION};
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// `Timestamp` parameter format (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Names callers may not supply themselves.
pub const RESERVED_PARAMS: &[&str] = &[
    "Action",
    "AWSAccessKeyId",
    "Timestamp",
    "SignatureVersion",
    "SignatureMethod",
    "Signature",
];

/// RFC 3986: everything but `A-Z a-z 0-9 - _ . ~` is escaped.
const RFC3986_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a query key or value (space becomes `%20`).
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, RFC3986_ENCODE_SET).to_string()
}

/// Numeric-aware string ordering.
///
/// Runs of ASCII digits compare by numeric value, so `member.2` sorts
/// before `member.10`; all other bytes compare as-is (case-sensitive).
/// Strings that only differ in leading zeros fall back to byte order, which
/// keeps the ordering total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (x, y) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);

    while i < x.len() && j < y.len() {
        if x[i].is_ascii_digit() && y[j].is_ascii_digit() {
            let start_x = i;
            while i < x.len() && x[i].is_ascii_digit() {
                i += 1;
            }
            let start_y = j;
            while j < y.len() && y[j].is_ascii_digit() {
                j += 1;
            }
            match cmp_digit_runs(&x[start_x..i], &y[start_y..j]) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        if x[i] != y[j] {
            return x[i].cmp(&y[j]);
        }
        i += 1;
        j += 1;
    }

    (x.len() - i)
        .cmp(&(y.len() - j))
        .then_with(|| x.cmp(y))
}

fn cmp_digit_runs(x: &[u8], y: &[u8]) -> Ordering {
    let strip = |run: &[u8]| {
        let zeros = run.iter().take_while(|&&d| d == b'0').count();
        run[zeros..].to_vec()
    };
    let (x, y) = (strip(x), strip(y));
    x.len().cmp(&y.len()).then_with(|| x.cmp(&y))
}

/// The full, sorted parameter set of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    params: Vec<(String, String)>,
}

impl CanonicalRequest {
    /// Merge the mandatory fields into `params` and sort.
    ///
    /// Fails when `action` is empty or a caller key collides with one of
    /// [`RESERVED_PARAMS`]. Empty values are kept.
    pub fn new(
        action: &str,
        params: BTreeMap<String, String>,
        access_key_id: &str,
        timestamp: DateTime<Utc>,
    ) -> SnsResult<Self> {
        if action.is_empty() {
            return Err(SnsError::validation("Action must not be empty"));
        }
        if let Some(key) = params.keys().find(|k| RESERVED_PARAMS.contains(&k.as_str())) {
            return Err(SnsError::validation(format!(
                "Parameter '{}' is set by the client and cannot be overridden",
                key
            )));
        }

        let mut all: Vec<(String, String)> = vec![
            ("Action".to_string(), action.to_string()),
            ("AWSAccessKeyId".to_string(), access_key_id.to_string()),
            (
                "Timestamp".to_string(),
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ),
            ("SignatureVersion".to_string(), SIGNATURE_VERSION.to_string()),
            ("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string()),
        ];
        all.extend(params);
        all.sort_by(|a, b| natural_cmp(&a.0, &b.0));

        Ok(Self { params: all })
    }

    /// Sorted `(name, value)` pairs, unencoded.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `key=value&...` with encoded values, in natural key order.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", k, uri_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn string_to_sign(&self, host: &str) -> String {
        format!("GET\n{}\n/\n{}", host, self.query_string())
    }

    /// Sign for `endpoint` and produce the final request URL.
    pub fn sign(&self, endpoint: &Endpoint, secret: &str) -> SignedRequest {
        let signature = signing::sign_v2(&self.string_to_sign(endpoint.host()), secret);
        let url = format!(
            "{}?{}&Signature={}",
            endpoint.base_url(),
            self.query_string(),
            uri_encode(&signature)
        );
        SignedRequest { url, signature }
    }
}

/// A request URL carrying exactly one signature.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub signature: String,
}

impl std::fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("url", &"** signed **")
            .finish()
    }
}
