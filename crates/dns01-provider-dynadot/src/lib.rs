// # Dynadot DNS Provider
//
// Gateway to the Dynadot `api3.json` endpoint for the DNS-01 webhook.
//
// Dynadot exposes exactly two operations we need, both as GET requests
// against the same endpoint:
//
// - Fetch: `?key=..&command=get_dns&domain=..`
// - Push:  `?key=..&command=set_dns2&domain=..` plus the positional record
//   parameters produced by `dns01_core::codec::encode_record_set`
//
// The push is a full replace of the domain's record set. This crate stays
// single-shot and stateless: one HTTP call per method, errors propagate to
// the engine, no retry, no caching, no background tasks.
//
// ## Security
//
// The API key is a query parameter of every request, so the request URL is
// itself a secret. URL logging is off unless the operator opts in via the
// `LOG_API_URL` / `LOG_DYNAREQ_URL` toggles, and the Debug implementation
// never exposes the key.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use dns01_core::codec::{decode_record_set, encode_record_set};
use dns01_core::config::LogOptions;
use dns01_core::record::RecordSet;
use dns01_core::traits::DnsProvider;
use dns01_core::{Error, Result};

/// Dynadot API endpoint
const DYNADOT_API_BASE: &str = "https://api.dynadot.com/api3.json";

/// Default HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Dynadot DNS provider gateway
///
/// Both calls are synchronous single-shot GETs with no automatic retry; the
/// ACME client retries the whole webhook request on failure.
pub struct DynadotProvider {
    /// Dynadot API key; travels as a query parameter, never logged
    api_key: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Verbosity toggles for outbound URL logging
    log: LogOptions,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for DynadotProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynadotProvider")
            .field("api_key", &"<REDACTED>")
            .field("log", &self.log)
            .finish()
    }
}

impl DynadotProvider {
    /// Create a new Dynadot provider
    ///
    /// Errors with `Validation` if the API key is empty.
    pub fn new(api_key: impl Into<String>, log: LogOptions) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::validation("Dynadot API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { api_key, client, log })
    }

    fn base_params<'a>(&'a self, command: &'a str, domain: &'a str) -> [(&'a str, &'a str); 3] {
        [("key", self.api_key.as_str()), ("command", command), ("domain", domain)]
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::provider_http(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::provider_response(e.to_string()))
    }
}

#[async_trait]
impl DnsProvider for DynadotProvider {
    /// Fetch the domain's current record set via `get_dns`
    async fn fetch_records(&self, domain: &str) -> Result<RecordSet> {
        let request = self
            .client
            .get(DYNADOT_API_BASE)
            .query(&self.base_params("get_dns", domain));

        if self.log.provider_request_url
            && let Some(request) = request.try_clone()
            && let Ok(built) = request.build()
        {
            info!("Fetching existing records from: {}", built.url());
        }

        let body = self.get_json(request).await?;
        Ok(decode_record_set(&body))
    }

    /// Replace the domain's entire record set via `set_dns2`
    async fn push_records(&self, domain: &str, records: &RecordSet) -> Result<()> {
        let request = self
            .client
            .get(DYNADOT_API_BASE)
            .query(&self.base_params("set_dns2", domain))
            .query(&encode_record_set(records));

        if self.log.api_url
            && let Some(request) = request.try_clone()
            && let Ok(built) = request.build()
        {
            info!("Making request to: {}", built.url());
        }

        self.get_json(request).await?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "dynadot"
    }
}
