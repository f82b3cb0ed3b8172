//! Earnings memoization.
//!
//! Earnings depend only on the [`EarningsRequest`], so a summary can be
//! reused whenever the exact same request comes back. The key is the whole
//! request: editing any period, rate or policy produces a different key.

use std::collections::HashMap;
use std::sync::Arc;

use super::pipeline::{EarningsRequest, calculate_earnings};
use crate::models::EarningsSummary;

/// Default number of entries kept before the cache is cleared.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// A bounded in-memory cache of earnings summaries.
///
/// When an insert would exceed capacity the cache is emptied first.
#[derive(Debug)]
pub struct EarningsCache {
    entries: HashMap<EarningsRequest, Arc<EarningsSummary>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl EarningsCache {
    /// Creates a cache holding at most `capacity` summaries (minimum one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached summary for `request`, calculating and storing it
    /// on a miss.
    pub fn get_or_calculate(&mut self, request: &EarningsRequest) -> Arc<EarningsSummary> {
        if let Some(summary) = self.entries.get(request) {
            self.hits += 1;
            tracing::debug!(
                periods = request.work_periods.len(),
                hits = self.hits,
                "earnings cache hit"
            );
            return Arc::clone(summary);
        }

        self.misses += 1;
        tracing::debug!(
            periods = request.work_periods.len(),
            misses = self.misses,
            "earnings cache miss"
        );

        if self.entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "earnings cache full, clearing");
            self.entries.clear();
        }

        let summary = Arc::new(calculate_earnings(request));
        self.entries.insert(request.clone(), Arc::clone(&summary));
        summary
    }

    /// Number of cached summaries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached summary. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that required a calculation.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for EarningsCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
