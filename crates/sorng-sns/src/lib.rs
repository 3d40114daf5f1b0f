//! # sorng-sns – Amazon SNS Query API client
//!
//! Signs requests with AWS Signature Version 2 (HmacSHA256), sends them as
//! HTTP GET, and turns the XML replies into typed values or a typed
//! [`SnsError`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  SnsClient operations  (sns.rs)                  │
//! │  ├── topics: create · delete · attributes · list │
//! │  ├── publish                                     │
//! │  ├── subscriptions: subscribe · confirm · list   │
//! │  └── permissions: add · remove                   │
//! ├──────────────────────────────────────────────────┤
//! │  SnsClient::request  (client.rs)                 │
//! │  ├── CanonicalRequest  (canonical.rs)            │
//! │  ├── sign_v2           (signing.rs)              │
//! │  ├── Transport         (transport.rs)            │
//! │  └── interpret         (response.rs, xml.rs)     │
//! ├──────────────────────────────────────────────────┤
//! │  SnsConfig · Region · Credentials  (config.rs)   │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sorng_sns::{Credentials, Region, SnsClient};
//!
//! # async fn run() -> sorng_sns::SnsResult<()> {
//! let sns = SnsClient::new(Credentials::new("AKID", "secret")?, Region::UsEast1);
//! let arn = sns.create_topic("alerts").await?;
//! sns.publish(&arn, "disk full", Some("ops")).await?;
//! # Ok(())
//! # }
//! ```

// ── Sub-modules ─────────────────────────────────────────────────────────

pub mod error;
pub mod config;
pub mod signing;
pub mod canonical;
pub mod xml;
pub mod response;
pub mod transport;
pub mod client;
pub mod sns;

// ── Re-exports for ergonomic access ─────────────────────────────────────

pub use client::SnsClient;
pub use config::{Credentials, Endpoint, Region, Scheme, SnsConfig};
pub use error::{SnsError, SnsResult};
pub use response::{Member, MemberPage};
pub use sns::{flatten_members, flatten_permissions, Permissions};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
pub use xml::XmlElement;
