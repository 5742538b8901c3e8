//! Cloneable handle for using one cache from several workers.

use crate::cache::{CacheRequest, Cached, ResultCache};
use crate::entry::{CacheEntry, ExportedEntry};
use crate::stats::CacheStats;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tw_core::{CacheConfig, LlmResult, Result, TaskType, TwError};

/// `ResultCache` behind a mutex. Each call holds the lock for the whole
/// operation, so `get` and `set` from different workers never interleave.
/// [`get_or_compute`](Self::get_or_compute) is the exception: the lock is
/// released while the result is computed.
#[derive(Clone)]
pub struct SharedResultCache {
    inner: Arc<Mutex<ResultCache>>,
}

impl SharedResultCache {
    pub fn new(config: CacheConfig) -> Self {
        Self::from_cache(ResultCache::new(config))
    }

    pub fn from_cache(cache: ResultCache) -> Self {
        Self { inner: Arc::new(Mutex::new(cache)) }
    }

    fn lock(&self) -> MutexGuard<'_, ResultCache> {
        // Cache state stays consistent across a panicking caller: every
        // mutation is a single map or counter update.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(
        &self,
        content: &str,
        task_type: &TaskType,
        model: Option<&str>,
        temperature: Option<f64>,
    ) -> Option<CacheEntry> {
        self.lock().get(content, task_type, model, temperature)
    }

    pub fn set(
        &self,
        content: &str,
        task_type: &TaskType,
        result: LlmResult,
        model: Option<&str>,
        temperature: Option<f64>,
    ) {
        self.lock().set(content, task_type, result, model, temperature)
    }

    pub fn record_hit(&self, input_tokens: u64, model: &str) {
        self.lock().record_hit(input_tokens, model)
    }

    /// Lookup and store each take the lock; `compute` runs unlocked. Two
    /// workers missing on the same key may both compute, and the later
    /// `set` wins.
    pub fn get_or_compute<F>(&self, request: &CacheRequest<'_>, compute: F) -> Result<Cached>
    where
        F: FnOnce(&str) -> anyhow::Result<LlmResult>,
    {
        let CacheRequest { content, task_type, model, temperature } = *request;
        {
            let mut cache = self.lock();
            if let Some(entry) = cache.get(content, task_type, model, temperature) {
                cache.record_hit(entry.result.tokens.input, &entry.result.model);
                return Ok(Cached::Hit(entry));
            }
        }

        let result = compute(content).map_err(TwError::Compute)?;
        self.set(content, task_type, result.clone(), model, temperature);
        Ok(Cached::Computed(result))
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn export(&self) -> Vec<ExportedEntry> {
        self.lock().export()
    }

    pub fn import(&self, entries: Vec<ExportedEntry>) -> usize {
        self.lock().import(entries)
    }

    pub fn entries_by_task(&self, task_type: &TaskType) -> Vec<CacheEntry> {
        self.lock().entries_by_task(task_type)
    }

    pub fn top_hits(&self, limit: usize) -> Vec<CacheEntry> {
        self.lock().top_hits(limit)
    }
}

impl Default for SharedResultCache {
    fn default() -> Self {
        Self::from_cache(ResultCache::default())
    }
}
