//! Transport failure classification
//!
//! [`classify`] is a pure, total mapping from how a call failed to the
//! [`ErpError`] callers see. Side effects (credential invalidation,
//! notification) live in the response interceptor.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use erpwire_domain::constants::DEFAULT_SERVER_ERROR_MESSAGE;
use erpwire_domain::{error_detail, ErpError};

/// How a call failed before a usable response was produced
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// A response arrived with a non-success status
    Status { status: u16, body: Option<Value> },
    /// The request was sent but no response arrived
    NoResponse { timed_out: bool, timeout: Duration, detail: String },
    /// The request could not be built or sent
    NotSent { detail: String },
    /// The caller cancelled the request
    Cancelled,
}

impl TransportFailure {
    /// Map a reqwest error raised while sending.
    pub fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_builder() {
            return Self::NotSent { detail: err.to_string() };
        }
        Self::NoResponse { timed_out: err.is_timeout(), timeout, detail: err.to_string() }
    }
}

pub fn classify(failure: TransportFailure) -> ErpError {
    match failure {
        TransportFailure::Status { status, body } => classify_status(status, body.as_ref()),
        TransportFailure::NoResponse { timed_out: true, timeout, .. } => ErpError::Timeout(timeout),
        TransportFailure::NoResponse { timed_out: false, detail, .. } => {
            ErpError::NetworkUnreachable(detail)
        }
        TransportFailure::NotSent { detail } => ErpError::RequestConfig { detail },
        TransportFailure::Cancelled => ErpError::Cancelled,
    }
}

fn classify_status(status: u16, body: Option<&Value>) -> ErpError {
    let detail = body.and_then(Value::as_object).and_then(error_detail);
    match status {
        401 => ErpError::Unauthorized,
        404 => ErpError::NotFound,
        500 => ErpError::Server {
            detail: detail.unwrap_or_else(|| DEFAULT_SERVER_ERROR_MESSAGE.to_string()),
        },
        other => ErpError::Http {
            status: other,
            detail: detail.unwrap_or_else(|| reason_phrase(other)),
        },
    }
}

fn reason_phrase(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_string)
}
