//! Cache entries and the export/import record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tw_core::{LlmResult, TaskType};

/// One cached LLM result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub content_hash: String,
    pub task_type: TaskType,
    pub result: LlmResult,
    pub created_at: DateTime<Utc>,
    /// `created_at + ttl`, fixed at creation.
    pub expires_at: DateTime<Utc>,
    pub hit_count: u64,
}

impl CacheEntry {
    pub fn new(
        key: String,
        content_hash: String,
        task_type: TaskType,
        result: LlmResult,
        created_at: DateTime<Utc>,
        ttl_ms: u64,
    ) -> Self {
        let ttl = Duration::milliseconds(i64::try_from(ttl_ms).unwrap_or(i64::MAX));
        let expires_at = created_at.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            key,
            content_hash,
            task_type,
            result,
            created_at,
            expires_at,
            hit_count: 0,
        }
    }

    /// Strictly past `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Persistence record: a key and the entry stored under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedEntry {
    pub key: String,
    pub entry: CacheEntry,
}
