//! Application state for the Nurse Pay Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::calculation::{EarningsCache, EarningsRequest};
use crate::config::ConfigLoader;
use crate::models::EarningsSummary;

/// Shared application state.
///
/// Contains the loaded tax tables and the earnings cache shared by all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tax and rate configuration.
    config: Arc<ConfigLoader>,
    /// Memoized earnings, keyed by the full earnings input.
    cache: Arc<Mutex<EarningsCache>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader
    /// and a default-sized cache.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_cache(config, EarningsCache::default())
    }

    /// Creates a new application state with an explicit cache.
    pub fn with_cache(config: ConfigLoader, cache: EarningsCache) -> Self {
        Self {
            config: Arc::new(config),
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns earnings for the request, from the cache when possible.
    pub fn earnings(&self, request: &EarningsRequest) -> Arc<EarningsSummary> {
        // A panic while holding the lock cannot leave a half-written entry.
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get_or_calculate(request)
    }

    /// Cache (hits, misses) so far.
    pub fn cache_stats(&self) -> (u64, u64) {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        (cache.hits(), cache.misses())
    }
}
