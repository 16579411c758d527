//! Per-run duplicate suppression

use super::fingerprint::Fingerprint;
use std::collections::HashSet;

/// Set of fingerprints seen during one run.
///
/// Grows monotonically; a fresh instance is created for every run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<Fingerprint>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `fingerprint` and return true if it had not been seen this run.
    /// A false return means the caller must suppress the record.
    pub fn offer(&mut self, fingerprint: Fingerprint) -> bool {
        self.seen.insert(fingerprint)
    }

    /// Number of distinct fingerprints seen
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
