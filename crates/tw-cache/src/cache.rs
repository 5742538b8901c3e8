//! Bounded, TTL-expiring store of LLM results.
//!
//! Expiration is lazy: a stale entry stays in the map, counts toward
//! `max_size` and toward `entries_stored`, and is only dropped when a read
//! touches it or when capacity eviction picks it.

use crate::entry::{CacheEntry, ExportedEntry};
use crate::hasher;
use crate::key::build_key;
use crate::stats::{CacheStats, Counters};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, trace};
use tw_core::{CacheConfig, LlmResult, PricingConfig, Result, TaskType, TwError};

/// Outcome of a lookup. Every variant other than `Hit` looks like a miss to
/// the caller, but only `Missing` and `Expired` are counted as misses.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Disabled,
    /// Task type not in the allow-list.
    Filtered,
    Missing,
    Expired,
    Hit(CacheEntry),
}

impl Lookup {
    pub fn into_entry(self) -> Option<CacheEntry> {
        match self {
            Self::Hit(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Parameters identifying one LLM call.
#[derive(Debug, Clone, Copy)]
pub struct CacheRequest<'a> {
    pub content: &'a str,
    pub task_type: &'a TaskType,
    pub model: Option<&'a str>,
    pub temperature: Option<f64>,
}

impl<'a> CacheRequest<'a> {
    pub fn new(content: &'a str, task_type: &'a TaskType) -> Self {
        Self { content, task_type, model: None, temperature: None }
    }

    pub fn model(mut self, model: &'a str) -> Self {
        self.model = Some(model);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Result of [`ResultCache::get_or_compute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
    Hit(CacheEntry),
    Computed(LlmResult),
}

impl Cached {
    pub fn result(&self) -> &LlmResult {
        match self {
            Self::Hit(entry) => &entry.result,
            Self::Computed(result) => result,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// The result cache. No internal locking; see
/// [`SharedResultCache`](crate::SharedResultCache) for shared use.
pub struct ResultCache {
    config: CacheConfig,
    pricing: PricingConfig,
    entries: HashMap<String, CacheEntry>,
    counters: Counters,
}

impl ResultCache {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_pricing(config, PricingConfig::default())
    }

    pub fn with_pricing(config: CacheConfig, pricing: PricingConfig) -> Self {
        Self {
            config,
            pricing,
            entries: HashMap::new(),
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn accepts(&self, task_type: &TaskType) -> bool {
        self.config.enabled && self.config.allows(task_type)
    }

    /// Look up a prior result. `None` on miss, expiry, or when the cache does
    /// not handle this task type.
    pub fn get(
        &mut self,
        content: &str,
        task_type: &TaskType,
        model: Option<&str>,
        temperature: Option<f64>,
    ) -> Option<CacheEntry> {
        self.get_at(content, task_type, model, temperature, Utc::now())
    }

    pub fn get_at(
        &mut self,
        content: &str,
        task_type: &TaskType,
        model: Option<&str>,
        temperature: Option<f64>,
        now: DateTime<Utc>,
    ) -> Option<CacheEntry> {
        self.lookup_at(content, task_type, model, temperature, now).into_entry()
    }

    /// Like [`get_at`](Self::get_at) but reports why a lookup missed.
    pub fn lookup_at(
        &mut self,
        content: &str,
        task_type: &TaskType,
        model: Option<&str>,
        temperature: Option<f64>,
        now: DateTime<Utc>,
    ) -> Lookup {
        if !self.config.enabled {
            return Lookup::Disabled;
        }
        if !self.config.allows(task_type) {
            trace!(task_type = %task_type, "task type not cached");
            return Lookup::Filtered;
        }

        let key = build_key(&hasher::hash(content), task_type, model, temperature);
        let expired = match self.entries.get(&key) {
            None => {
                self.counters.misses += 1;
                debug!(%key, "cache miss");
                return Lookup::Missing;
            }
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            self.entries.remove(&key);
            self.counters.misses += 1;
            debug!(%key, "cache entry expired");
            return Lookup::Expired;
        }

        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.hit_count += 1;
                self.counters.hits += 1;
                debug!(%key, hit_count = entry.hit_count, "cache hit");
                Lookup::Hit(entry.clone())
            }
            None => Lookup::Missing,
        }
    }

    /// Store a result. No-op when the cache does not handle this task type.
    pub fn set(
        &mut self,
        content: &str,
        task_type: &TaskType,
        result: LlmResult,
        model: Option<&str>,
        temperature: Option<f64>,
    ) {
        self.set_at(content, task_type, result, model, temperature, Utc::now())
    }

    pub fn set_at(
        &mut self,
        content: &str,
        task_type: &TaskType,
        result: LlmResult,
        model: Option<&str>,
        temperature: Option<f64>,
        now: DateTime<Utc>,
    ) {
        if !self.accepts(task_type) {
            return;
        }

        if self.entries.len() >= self.config.max_size {
            self.evict_oldest();
        }

        let content_hash = hasher::hash(content);
        let key = build_key(&content_hash, task_type, model, temperature);
        let entry = CacheEntry::new(
            key.clone(),
            content_hash,
            task_type.clone(),
            result,
            now,
            self.config.ttl_ms,
        );
        trace!(%key, expires_at = %entry.expires_at, "cache set");
        self.entries.insert(key, entry);
    }

    /// Drop the entry with the earliest `created_at`, expired or not.
    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.created_at)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
            debug!(%key, "evicted oldest cache entry");
        }
    }

    /// Attribute a hit that avoided an LLM call of `input_tokens` on `model`.
    pub fn record_hit(&mut self, input_tokens: u64, model: &str) {
        self.counters.tokens_saved += input_tokens;
        self.counters.cost_saved += self.pricing.cost(input_tokens, model);
    }

    pub fn stats(&self) -> CacheStats {
        let oldest_entry = self.entries.values().map(|e| e.created_at).min();
        let newest_entry = self.entries.values().map(|e| e.created_at).max();
        CacheStats {
            hits: self.counters.hits,
            misses: self.counters.misses,
            hit_rate: self.counters.hit_rate(),
            tokens_saved: self.counters.tokens_saved,
            cost_saved: self.counters.cost_saved,
            entries_stored: self.entries.len(),
            oldest_entry,
            newest_entry,
        }
    }

    /// Drop all entries. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // ========== Persistence boundary ==========

    pub fn export(&self) -> Vec<ExportedEntry> {
        self.entries
            .iter()
            .map(|(key, entry)| ExportedEntry { key: key.clone(), entry: entry.clone() })
            .collect()
    }

    /// Load entries, skipping those already expired. Capacity is not
    /// enforced here; the next `set` evicts as usual. Returns how many
    /// entries were loaded.
    pub fn import(&mut self, entries: Vec<ExportedEntry>) -> usize {
        self.import_at(entries, Utc::now())
    }

    pub fn import_at(&mut self, entries: Vec<ExportedEntry>, now: DateTime<Utc>) -> usize {
        let total = entries.len();
        let mut loaded = 0;
        for ExportedEntry { key, entry } in entries {
            if entry.is_expired_at(now) {
                continue;
            }
            self.entries.insert(key, entry);
            loaded += 1;
        }
        debug!(loaded, skipped = total - loaded, "imported cache entries");
        loaded
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.export())?)
    }

    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let entries: Vec<ExportedEntry> = serde_json::from_str(json)?;
        Ok(self.import(entries))
    }

    // ========== Analysis helpers ==========

    pub fn entries_by_task(&self, task_type: &TaskType) -> Vec<CacheEntry> {
        self.entries
            .values()
            .filter(|e| &e.task_type == task_type)
            .cloned()
            .collect()
    }

    /// Entries with the most hits first.
    pub fn top_hits(&self, limit: usize) -> Vec<CacheEntry> {
        let mut all: Vec<CacheEntry> = self.entries.values().cloned().collect();
        all.sort_by(|a, b| b.hit_count.cmp(&a.hit_count));
        all.truncate(limit);
        all
    }

    // ========== Call-site helper ==========

    /// Return the cached result for `request`, or run `compute` and cache
    /// what it returns. A hit is attributed via [`record_hit`](Self::record_hit)
    /// using the cached result's input tokens and model.
    pub fn get_or_compute<F>(&mut self, request: &CacheRequest<'_>, compute: F) -> Result<Cached>
    where
        F: FnOnce(&str) -> anyhow::Result<LlmResult>,
    {
        let CacheRequest { content, task_type, model, temperature } = *request;
        if let Some(entry) = self.get(content, task_type, model, temperature) {
            self.record_hit(entry.result.tokens.input, &entry.result.model);
            return Ok(Cached::Hit(entry));
        }

        let result = compute(content).map_err(TwError::Compute)?;
        self.set(content, task_type, result.clone(), model, temperature);
        Ok(Cached::Computed(result))
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
