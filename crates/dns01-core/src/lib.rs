// # dns01-core
//
// Core library for the Dynadot ACME DNS-01 challenge webhook.
//
// ## Architecture Overview
//
// This library provides the whole reconciliation path for one challenge
// mutation:
// - **name**: derives the subdomain label from the FQDN/domain pair
// - **record**: in-memory record set with surgical present/cleanup merges
// - **codec**: decodes the provider's nested JSON, encodes the flat
//   positional query parameters of the full-replace push
// - **DnsProvider**: trait the provider gateway implements
// - **ChallengeEngine**: orchestrates fetch → reconcile → push
//
// ## Design Principles
//
// 1. **Surgical merge**: the provider only offers "replace all records", so
//    every record not carried through the in-memory set is lost; mutations
//    touch exactly one TXT entry
// 2. **Fresh state per request**: no caching, every request fetches the
//    live record set
// 3. **Library-first**: the daemon is a thin HTTP shell over this crate

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod name;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use config::{LogOptions, WebhookConfig};
pub use engine::{ChallengeEngine, ChallengeRequest, Operation};
pub use error::{Error, Result};
pub use record::{DnsRecord, RecordSet};
pub use traits::DnsProvider;
