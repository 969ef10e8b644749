//! Error types used throughout the data-access layer
//!
//! The response interceptor classifies every failure exactly once into
//! [`ErpError`]; API modules and stores propagate it unchanged.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for erpwire
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ErpError {
    /// Business error reported by the backend inside the response envelope.
    #[error("Application error {code}: {message}")]
    Application { code: i64, message: String },

    /// Transport status 401. The credential has been invalidated.
    #[error("Unauthorized: session expired or missing credentials")]
    Unauthorized,

    /// Transport status 500.
    #[error("Server error: {detail}")]
    Server { detail: String },

    /// Transport status 404.
    #[error("Not found")]
    NotFound,

    /// Any other non-success transport status.
    #[error("HTTP error {status}: {detail}")]
    Http { status: u16, detail: String },

    /// The request was sent but no response arrived (refused, DNS, reset).
    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    /// The request could not be built or sent at all.
    #[error("Request configuration error: {detail}")]
    RequestConfig { detail: String },

    /// Client-side identifier normalization failed.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The transport timed out waiting for a response.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// The payload did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErpError {
    /// Only timeouts are eligible for retry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Application { .. } => "application",
            Self::Unauthorized => "unauthorized",
            Self::Server { .. } => "server",
            Self::NotFound => "not_found",
            Self::Http { .. } => "http",
            Self::NetworkUnreachable(_) => "network_unreachable",
            Self::RequestConfig { .. } => "request_config",
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::Timeout(_) => "timeout",
            Self::Cancelled => "cancelled",
            Self::Decode(_) => "decode",
            Self::Config(_) => "config",
        }
    }

    /// Message shown to the user on the notification channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Application { message, .. } => message.clone(),
            Self::Unauthorized => {
                "Your session has expired or you are not authorized. Please sign in again."
                    .to_string()
            }
            Self::Server { detail } => format!("Server error (500): {detail}"),
            Self::NotFound => "The requested resource does not exist (404).".to_string(),
            Self::Http { status, detail } => format!("Request error ({status}): {detail}"),
            Self::NetworkUnreachable(_) => {
                "Network error: unable to connect to the server.".to_string()
            }
            Self::RequestConfig { detail } => format!("Request error: {detail}"),
            Self::InvalidIdentifier(raw) => format!("Invalid identifier: {raw}"),
            Self::Timeout(after) => {
                format!("The server did not respond within {} ms.", after.as_millis())
            }
            Self::Cancelled => "The request was cancelled.".to_string(),
            Self::Decode(_) => "The server returned an unexpected response.".to_string(),
            Self::Config(detail) => format!("Client configuration error: {detail}"),
        }
    }
}

/// Result type alias for erpwire operations
pub type Result<T> = std::result::Result<T, ErpError>;
