use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of cache accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Percentage in `0.0..=100.0`; 0 before any lookup.
    pub hit_rate: f64,
    pub tokens_saved: u64,
    pub cost_saved: f64,
    /// Includes entries that are expired but not yet touched.
    pub entries_stored: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}

/// Cumulative counters. Never reset by `clear`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub tokens_saved: u64,
    pub cost_saved: f64,
}

impl Counters {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64 * 100.0
    }
}
