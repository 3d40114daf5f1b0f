//! SNS error types.
//!
//! Every failure surfaced by the client falls into one of a few buckets:
//! local validation, a structured error returned by the service, a bare
//! non-success HTTP status, a network failure, or a success response whose
//! body could not be understood.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level error type for all SNS operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnsError {
    /// Rejected locally before any request was sent.
    Validation(String),
    /// The service answered with a non-2xx status and an `<Error>` body.
    Remote {
        /// SNS error code (e.g. "AuthorizationError", "NotFound").
        code: String,
        /// Human-readable message from the service.
        message: String,
        /// HTTP status code.
        status: u16,
        /// Request ID from the body or the `x-amzn-RequestId` header.
        request_id: Option<String>,
    },
    /// Non-2xx status without a structured error body.
    Http { status: u16, message: String },
    /// DNS, connect, TLS, timeout or body read failure.
    Transport(String),
    /// 2xx status, but the XML was unparseable or lacked an expected field.
    MalformedResponse(String),
}

impl fmt::Display for SnsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "SNS validation error: {}", msg),
            Self::Remote {
                code,
                message,
                status,
                request_id,
            } => {
                write!(f, "SNS error [{}]: {} (HTTP {})", code, message, status)?;
                if let Some(id) = request_id {
                    write!(f, " [RequestId: {}]", id)?;
                }
                Ok(())
            }
            Self::Http { status, message } => write!(f, "{} (HTTP {})", message, status),
            Self::Transport(msg) => write!(f, "SNS transport error: {}", msg),
            Self::MalformedResponse(msg) => write!(f, "Malformed SNS response: {}", msg),
        }
    }
}

impl std::error::Error for SnsError {}

impl SnsError {
    /// Build a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status carried by the error, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Service error code, only present for [`SnsError::Remote`].
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Remote { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for SnsError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            "timed out"
        } else if err.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        Self::Transport(format!("{}: {}", kind, err))
    }
}

impl From<quick_xml::Error> for SnsError {
    fn from(err: quick_xml::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// Convenience result type for SNS operations.
pub type SnsResult<T> = Result<T, SnsError>;
