//! Cache key construction.

use crate::hasher;
use tw_core::TaskType;

pub const DEFAULT_MODEL: &str = "default";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Build the lookup key for a fingerprint and call parameters.
///
/// Omitted `model`/`temperature` are replaced by [`DEFAULT_MODEL`] and
/// [`DEFAULT_TEMPERATURE`] before hashing, so an omitted value and its
/// explicit default map to the same key. The task type is kept as a readable
/// prefix and is also part of the digest.
pub fn build_key(
    fingerprint: &str,
    task_type: &TaskType,
    model: Option<&str>,
    temperature: Option<f64>,
) -> String {
    let model = model.unwrap_or(DEFAULT_MODEL);
    let temperature = temperature.unwrap_or(DEFAULT_TEMPERATURE);
    // JSON array keeps field boundaries unambiguous.
    let canonical = serde_json::to_string(&(fingerprint, task_type.as_str(), model, temperature))
        .unwrap_or_else(|_| format!("{fingerprint}|{task_type}|{model}|{temperature}"));
    format!("llm:{}:{}", task_type, hasher::hash(&canonical))
}
