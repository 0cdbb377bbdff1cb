//! Error types for the DNS-01 webhook
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for webhook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DNS-01 webhook
///
/// The taxonomy exists for logging and diagnostics. At the HTTP boundary
/// every variant collapses into the same generic 501 response; the caller
/// never sees which one occurred.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing request data (empty domain, FQDN not suffixed by domain)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network-level failure talking to the DNS provider
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-2xx HTTP status
    #[error("Provider returned HTTP status {status}")]
    ProviderHttp {
        /// HTTP status code from the provider
        status: u16,
    },

    /// Provider body could not be decoded
    #[error("Provider response error: {0}")]
    ProviderResponse(String),

    /// Anything unexpected
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a provider HTTP status error
    pub fn provider_http(status: u16) -> Self {
        Self::ProviderHttp { status }
    }

    /// Create a provider response error
    pub fn provider_response(msg: impl Into<String>) -> Self {
        Self::ProviderResponse(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ProviderResponse(err.to_string())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
