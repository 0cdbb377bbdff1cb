//! Shared test doubles for the core contract tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use dns01_core::record::RecordSet;
use dns01_core::traits::DnsProvider;
use dns01_core::{Error, Result};

/// Provider double that serves a canned record set and records every push
pub struct RecordingProvider {
    current: Mutex<RecordSet>,
    pushes: Mutex<Vec<RecordSet>>,
    fail_push: bool,
}

impl RecordingProvider {
    pub fn serving(current: RecordSet) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(current),
            pushes: Mutex::new(Vec::new()),
            fail_push: false,
        })
    }

    pub fn failing_push(current: RecordSet) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(current),
            pushes: Mutex::new(Vec::new()),
            fail_push: true,
        })
    }

    /// All record sets pushed so far, in order
    pub fn pushes(&self) -> Vec<RecordSet> {
        self.pushes.lock().unwrap().clone()
    }

    /// Make subsequent fetches serve the last pushed set, emulating the
    /// provider applying the full replace
    pub fn settle(&self) {
        if let Some(last) = self.pushes.lock().unwrap().last() {
            *self.current.lock().unwrap() = last.clone();
        }
    }
}

#[async_trait]
impl DnsProvider for RecordingProvider {
    async fn fetch_records(&self, _domain: &str) -> Result<RecordSet> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn push_records(&self, _domain: &str, records: &RecordSet) -> Result<()> {
        if self.fail_push {
            return Err(Error::transport("connection reset"));
        }
        self.pushes.lock().unwrap().push(records.clone());
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}
