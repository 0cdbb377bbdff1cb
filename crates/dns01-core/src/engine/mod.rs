//! Challenge reconciliation engine
//!
//! The engine runs one fetch-merge-push cycle per webhook request:
//!
//! 1. Strip trailing dots and sanitize the registrable domain
//! 2. Derive the subdomain label from the FQDN/domain pair
//! 3. Fetch the domain's live record set from the provider
//! 4. Apply the single present/cleanup mutation in memory
//! 5. Push the full record set back
//!
//! There is no caching and no cross-request locking: every request works
//! against the provider's live state. Two racing requests for the same
//! domain are last-writer-wins at whole-domain granularity; the design
//! assumes ACME clients serialize challenge requests per domain.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, error, info};

use crate::config::LogOptions;
use crate::error::Result;
use crate::name::{derive_subdomain, sanitize_domain, strip_trailing_dot};
use crate::traits::DnsProvider;

/// An inbound DNS-01 challenge mutation request
#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeRequest {
    /// The fully-qualified name being validated, e.g. "_acme-challenge.example.com."
    pub fqdn: String,

    /// The registrable domain as known to the provider, e.g. "example.com"
    pub domain: String,

    /// The TXT value to publish or retract
    pub value: String,
}

/// Which mutation a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Publish the challenge TXT record (upsert)
    Present,
    /// Retract the challenge TXT record (exact-match removal)
    Cleanup,
}

impl Operation {
    /// Past-tense description used in logs and the success response
    pub fn outcome(&self) -> &'static str {
        match self {
            Operation::Present => "added/updated",
            Operation::Cleanup => "removed",
        }
    }
}

/// Orchestrates one challenge mutation against the DNS provider
pub struct ChallengeEngine {
    provider: Arc<dyn DnsProvider>,
    log: LogOptions,
}

impl ChallengeEngine {
    /// Create a new engine on top of a provider
    pub fn new(provider: Arc<dyn DnsProvider>, log: LogOptions) -> Self {
        Self { provider, log }
    }

    /// Apply a single present/cleanup mutation
    ///
    /// A failed fetch aborts before any push is attempted. A failed push is
    /// terminal for the request; nothing was mutated at the provider, so
    /// there is nothing to roll back.
    pub async fn apply(&self, op: Operation, request: &ChallengeRequest) -> Result<()> {
        let fqdn = strip_trailing_dot(&request.fqdn);
        let domain = sanitize_domain(strip_trailing_dot(&request.domain));
        let subdomain = derive_subdomain(fqdn, &domain)?;

        let mut records = match self.provider.fetch_records(&domain).await {
            Ok(records) => records,
            Err(e) => {
                error!("Aborting because existing DNS records could not be fetched: {e}");
                return Err(e);
            }
        };

        info!(
            "Existing records count (subdomains): {}",
            records.sub_domains.len()
        );
        info!(
            "Existing records count (top-level): {}",
            records.top_domain.len()
        );
        if self.log.provider_state {
            debug!("Existing records: {records:?}");
        }

        match op {
            Operation::Present => records.upsert_txt(&subdomain, &request.value),
            Operation::Cleanup => records.remove_txt(&subdomain, &request.value),
        }

        if self.log.provider_state {
            debug!("New records: {records:?}");
        }

        self.provider.push_records(&domain, &records).await?;

        info!("TXT record {} successfully", op.outcome());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::{DnsRecord, RecordSet};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        current: RecordSet,
        fail_fetch: bool,
        pushed: Mutex<Option<RecordSet>>,
        push_calls: AtomicUsize,
    }

    impl FakeProvider {
        fn with_records(current: RecordSet) -> Self {
            Self {
                current,
                fail_fetch: false,
                pushed: Mutex::new(None),
                push_calls: AtomicUsize::new(0),
            }
        }

        fn failing_fetch() -> Self {
            Self {
                current: RecordSet::new(),
                fail_fetch: true,
                pushed: Mutex::new(None),
                push_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DnsProvider for FakeProvider {
        async fn fetch_records(&self, _domain: &str) -> Result<RecordSet> {
            if self.fail_fetch {
                Err(Error::provider_http(500))
            } else {
                Ok(self.current.clone())
            }
        }

        async fn push_records(&self, _domain: &str, records: &RecordSet) -> Result<()> {
            self.push_calls.fetch_add(1, Ordering::SeqCst);
            *self.pushed.lock().unwrap() = Some(records.clone());
            Ok(())
        }

        fn provider_name(&self) -> &'static str {
            "fake"
        }
    }

    fn request() -> ChallengeRequest {
        ChallengeRequest {
            fqdn: "_acme-challenge.example.com.".to_string(),
            domain: "example.com.".to_string(),
            value: "abc123".to_string(),
        }
    }

    #[tokio::test]
    async fn present_pushes_upserted_set() {
        let mut current = RecordSet::new();
        current.top_domain.push(DnsRecord {
            subhost: String::new(),
            record_type: "A".to_string(),
            value: "203.0.113.7".to_string(),
        });

        let provider = Arc::new(FakeProvider::with_records(current));
        let engine = ChallengeEngine::new(provider.clone(), LogOptions::default());

        engine.apply(Operation::Present, &request()).await.unwrap();

        let pushed = provider.pushed.lock().unwrap().clone().unwrap();
        assert_eq!(pushed.top_domain.len(), 1);
        assert_eq!(
            pushed.sub_domains,
            vec![DnsRecord::txt("_acme-challenge", "abc123")]
        );
    }

    #[tokio::test]
    async fn cleanup_pushes_set_without_matching_record() {
        let mut current = RecordSet::new();
        current.sub_domains.push(DnsRecord::txt("_acme-challenge", "abc123"));
        current.sub_domains.push(DnsRecord::txt("_acme-challenge", "other"));

        let provider = Arc::new(FakeProvider::with_records(current));
        let engine = ChallengeEngine::new(provider.clone(), LogOptions::default());

        engine.apply(Operation::Cleanup, &request()).await.unwrap();

        let pushed = provider.pushed.lock().unwrap().clone().unwrap();
        assert_eq!(
            pushed.sub_domains,
            vec![DnsRecord::txt("_acme-challenge", "other")]
        );
    }

    #[tokio::test]
    async fn failed_fetch_aborts_without_push() {
        let provider = Arc::new(FakeProvider::failing_fetch());
        let engine = ChallengeEngine::new(provider.clone(), LogOptions::default());

        let result = engine.apply(Operation::Present, &request()).await;

        assert!(matches!(result, Err(Error::ProviderHttp { status: 500 })));
        assert_eq!(provider.push_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn validation_failure_aborts_before_any_provider_call() {
        let provider = Arc::new(FakeProvider::with_records(RecordSet::new()));
        let engine = ChallengeEngine::new(provider.clone(), LogOptions::default());

        let bad = ChallengeRequest {
            fqdn: "_acme-challenge.example.org".to_string(),
            domain: "example.com".to_string(),
            value: "abc123".to_string(),
        };

        let result = engine.apply(Operation::Present, &bad).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(provider.push_calls.load(Ordering::SeqCst), 0);
    }
}
