//! Result cache for LLM calls, keyed by a content fingerprint plus the call
//! parameters.
//!
//! Typical flow:
//! 1. `get` with the raw content, task type, model and temperature.
//! 2. On a miss, call the model (optionally on compacted input).
//! 3. `set` the returned result; on later hits, `record_hit` attributes the
//!    avoided input tokens and their cost.

pub mod cache;
pub mod entry;
pub mod hasher;
pub mod key;
pub mod shared;
pub mod stats;

pub use cache::{CacheRequest, Cached, Lookup, ResultCache};
pub use entry::{CacheEntry, ExportedEntry};
pub use hasher::hash;
pub use key::{build_key, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use shared::SharedResultCache;
pub use stats::CacheStats;
