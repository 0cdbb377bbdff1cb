//! DNS provider trait
//!
//! Defines the interface to the authoritative DNS provider's API. The
//! provider's write primitive is a full replace: `push_records` overwrites
//! the domain's entire record set, which is why the engine always fetches a
//! fresh baseline first and mutates it surgically.
//!
//! Implementations perform single-shot HTTP calls with no retry, no caching
//! and no background tasks; the ACME client owns retrying the whole
//! present/cleanup request.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::RecordSet;

/// Trait for DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe; many webhook requests may be in
/// flight concurrently, each performing its own fetch-merge-push cycle.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Fetch the domain's current record set from the provider
    ///
    /// Errors with `Transport` on network failure, `ProviderHttp` on a
    /// non-2xx status and `ProviderResponse` on an undecodable body. A
    /// failed fetch must abort the whole reconciliation: pushing without a
    /// correct baseline would silently delete every unknown record.
    async fn fetch_records(&self, domain: &str) -> Result<RecordSet>;

    /// Replace the domain's entire record set at the provider
    ///
    /// Single call, no retry, no rollback. Nothing was mutated before this
    /// call, so a failure leaves the provider untouched.
    async fn push_records(&self, domain: &str, records: &RecordSet) -> Result<()>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
