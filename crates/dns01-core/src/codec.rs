//! Record-set codec for the Dynadot wire formats
//!
//! The fetch side (`get_dns`) returns JSON whose envelope differs across
//! response variants, so decoding walks an explicit priority list of known
//! envelope paths and takes the first that resolves. The push side
//! (`set_dns2`) takes the whole record set as flat, positionally indexed
//! query parameters.

use serde::Deserialize;
use serde_json::Value;

use crate::record::{DnsRecord, RecordSet};

/// Known envelope paths to the name-server settings object, tried in order
///
/// Dynadot's API is inconsistent across response variants; keep this an
/// explicit priority list rather than ad hoc fallback chaining.
const ENVELOPE_PATHS: &[&[&str]] = &[
    &["GetDnsResponse", "GetDns", "NameServerSettings"],
    &["Response", "GetDns", "NameServerSettings"],
    &["GetDns", "NameServerSettings"],
];

#[derive(Debug, Default, Deserialize)]
struct NameServerSettings {
    #[serde(rename = "MainDomains", default)]
    main_domains: Vec<Value>,

    #[serde(rename = "SubDomains", default)]
    sub_domains: Vec<Value>,
}

/// Decode a `get_dns` response body into a deduplicated [`RecordSet`]
///
/// Missing or unrecognized envelopes and absent arrays decode to an empty
/// set; individual entries that do not look like records are skipped. Only
/// a body that is not JSON at all is an error, and that is caught by the
/// gateway before this function is reached.
pub fn decode_record_set(raw: &Value) -> RecordSet {
    let settings = ENVELOPE_PATHS
        .iter()
        .find_map(|path| lookup_path(raw, path))
        .and_then(|v| serde_json::from_value::<NameServerSettings>(v.clone()).ok())
        .unwrap_or_default();

    let mut set = RecordSet {
        top_domain: decode_records(settings.main_domains),
        sub_domains: decode_records(settings.sub_domains),
    };
    set.dedup();
    set
}

fn lookup_path<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(raw, |v, key| v.get(key))
}

fn decode_records(entries: Vec<Value>) -> Vec<DnsRecord> {
    entries
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}

/// Encode a [`RecordSet`] as the positional `set_dns2` query parameters
///
/// Index assignment is purely positional and re-derived every call. There
/// is no stable record identifier across requests; reordering between calls
/// is safe because `set_dns2` is a full replace, not a patch.
pub fn encode_record_set(set: &RecordSet) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(set.top_domain.len() * 2 + set.sub_domains.len() * 3);

    for (i, record) in set.top_domain.iter().enumerate() {
        params.push((format!("main_record_type{i}"), record.record_type.to_lowercase()));
        params.push((format!("main_record{i}"), record.value.clone()));
    }

    for (i, record) in set.sub_domains.iter().enumerate() {
        params.push((format!("subdomain{i}"), record.subhost.clone()));
        params.push((format!("sub_record_type{i}"), record.record_type.to_lowercase()));
        params.push((format!("sub_record{i}"), record.value.clone()));
    }

    params
}
