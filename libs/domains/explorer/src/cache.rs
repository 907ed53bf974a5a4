use std::collections::HashMap;

use crate::models::{HttpMethod, ProbeResult};

/// Memoized probe results for one run, keyed by `METHOD:url`.
///
/// Entries never expire and are never evicted.
#[derive(Debug, Clone, Default)]
pub struct RequestCache {
    entries: HashMap<String, ProbeResult>,
    hits: usize,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(method: HttpMethod, url: &str) -> String {
        format!("{}:{}", method, url)
    }

    /// Look up a previous result, counting the hit
    pub fn get(&mut self, method: HttpMethod, url: &str) -> Option<ProbeResult> {
        let cached = self.entries.get(&Self::key(method, url)).cloned();
        if cached.is_some() {
            self.hits += 1;
        }
        cached
    }

    pub fn put(&mut self, method: HttpMethod, url: &str, result: ProbeResult) {
        self.entries.insert(Self::key(method, url), result);
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
