//! Trait definitions for pluggable components

mod dns_provider;

pub use dns_provider::DnsProvider;
