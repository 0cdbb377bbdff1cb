//! DNS record model and reconciliation
//!
//! Dynadot manages a domain's DNS configuration as one atomic "replace all
//! records" call. There is no incremental-update primitive: every push
//! rewrites the entire record set, so any record dropped from the in-memory
//! [`RecordSet`] before the push is permanently deleted from production DNS.
//! The reconciliation operations here are therefore surgical: they touch
//! only the one TXT entry named by the challenge and pass every other
//! record through unchanged.

use serde::{Deserialize, Serialize};

/// Record type used for ACME DNS-01 challenges
pub const TXT: &str = "txt";

/// A single DNS record as Dynadot models it
///
/// `subhost` is empty for records on the bare registrable domain. Identity
/// for matching purposes is `(subhost, record_type)`: subhost compares
/// case-sensitively, record_type case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Subdomain label, e.g. "_acme-challenge" (empty on the apex)
    #[serde(rename = "Subhost", default)]
    pub subhost: String,

    /// Record type as the provider reports it ("TXT", "a", ...)
    ///
    /// Defaults to empty when the provider omits the field; a partially
    /// formed record must still ride through the next full-replace push.
    #[serde(rename = "RecordType", default)]
    pub record_type: String,

    /// Record value
    #[serde(rename = "Value", default)]
    pub value: String,
}

impl DnsRecord {
    /// Create a TXT record for a subhost
    pub fn txt(subhost: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            subhost: subhost.into(),
            record_type: TXT.to_string(),
            value: value.into(),
        }
    }

    /// Whether this record is a TXT record at the given subhost
    pub fn is_txt_at(&self, subhost: &str) -> bool {
        self.subhost == subhost && self.record_type.eq_ignore_ascii_case(TXT)
    }
}

/// The full DNS configuration of one registrable domain
///
/// Two disjoint collections mirroring the provider's distinction between
/// records on the bare domain and records on subdomains. Order is the
/// insertion order the provider returned; index positions become the
/// positional query parameters of the next push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    /// Records on the registrable domain itself
    pub top_domain: Vec<DnsRecord>,

    /// Records on subdomains
    pub sub_domains: Vec<DnsRecord>,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse structurally identical entries, keeping first occurrences
    ///
    /// The provider's feed may contain repeated entries; pushing them back
    /// verbatim would double them up again.
    pub fn dedup(&mut self) {
        dedup_preserving_order(&mut self.top_domain);
        dedup_preserving_order(&mut self.sub_domains);
    }

    /// Upsert the challenge TXT record for a subhost (the `present` operation)
    ///
    /// If a TXT entry for `subhost` exists its value is replaced in place,
    /// preserving its position; otherwise a new entry is appended. Calling
    /// this twice with the same arguments yields the same set as once.
    pub fn upsert_txt(&mut self, subhost: &str, value: &str) {
        match self.sub_domains.iter_mut().find(|r| r.is_txt_at(subhost)) {
            Some(existing) => existing.value = value.to_string(),
            None => self.sub_domains.push(DnsRecord::txt(subhost, value)),
        }
    }

    /// Remove the challenge TXT record for a subhost (the `cleanup` operation)
    ///
    /// Only entries matching `(subhost, txt, value)` exactly are removed.
    /// TXT entries at the same subhost with a different value survive, which
    /// keeps concurrent challenges (wildcard + apex validation) intact.
    /// Removing an absent record is a no-op, not an error.
    pub fn remove_txt(&mut self, subhost: &str, value: &str) {
        self.sub_domains
            .retain(|r| !(r.is_txt_at(subhost) && r.value == value));
    }
}

fn dedup_preserving_order(records: &mut Vec<DnsRecord>) {
    let mut seen: Vec<DnsRecord> = Vec::with_capacity(records.len());
    records.retain(|r| {
        if seen.contains(r) {
            false
        } else {
            seen.push(r.clone());
            true
        }
    });
}
