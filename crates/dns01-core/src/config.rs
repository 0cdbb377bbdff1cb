//! Configuration types for the DNS-01 webhook
//!
//! Configuration is built once at process start (the daemon reads the
//! environment) and passed down explicitly; core logic never performs
//! ambient env lookups.

use serde::{Deserialize, Serialize};

/// Main webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Dynadot API key (secret; never logged)
    pub api_key: String,

    /// TCP port the HTTP listener binds on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Verbosity toggles
    #[serde(default)]
    pub log: LogOptions,
}

impl WebhookConfig {
    /// Create a configuration with the given API key and defaults elsewhere
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            port: default_port(),
            log: LogOptions::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.api_key.is_empty() {
            return Err(crate::Error::validation("API key cannot be empty"));
        }
        Ok(())
    }
}

/// Independent verbosity toggles
///
/// Each maps to one environment variable and defaults to off; they exist so
/// operators can opt into logging payloads that may carry live challenge
/// values.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LogOptions {
    /// Log inbound request bodies (`LOG_REQ_BODY`)
    #[serde(default)]
    pub request_body: bool,

    /// Log fetched and reconciled record sets, TXT values included
    /// (`LOG_TXT_VALUES`)
    #[serde(default)]
    pub provider_state: bool,

    /// Log the outbound push URL (`LOG_API_URL`)
    #[serde(default)]
    pub api_url: bool,

    /// Log the outbound fetch URL (`LOG_DYNAREQ_URL`)
    #[serde(default)]
    pub provider_request_url: bool,
}

fn default_port() -> u16 {
    3000
}
