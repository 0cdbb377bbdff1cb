//! HTTP shell for the Dynadot DNS-01 challenge webhook
//!
//! The daemon is a thin integration layer: all reconciliation logic lives
//! in `dns01-core`, the Dynadot wire contract in `dns01-provider-dynadot`.
//! This crate only routes requests, assigns correlation ids and maps
//! outcomes onto the fixed HTTP contract.

pub mod server;
