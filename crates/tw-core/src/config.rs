use crate::error::{Result, TwError};
use crate::types::TaskType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Seven days.
pub const DEFAULT_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;
pub const DEFAULT_MAX_SIZE: usize = 10_000;
/// Price per 1M input tokens for models missing from the table.
pub const DEFAULT_RATE_PER_MILLION: f64 = 5.0;

/// Top-level configuration: cache policy plus the price table used for
/// savings accounting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub cache: CacheConfig,
    pub pricing: PricingConfig,
}

impl OptimizerConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.cache.validate()?;
        cfg.pricing.validate()?;
        debug!(
            enabled = cfg.cache.enabled,
            ttl_ms = cfg.cache.ttl_ms,
            max_size = cfg.cache.max_size,
            "loaded optimizer config"
        );
        Ok(cfg)
    }
}

/// Result cache policy. Fixed at cache construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_ms: u64,
    pub max_size: usize,
    /// Only these task types are stored or looked up.
    pub task_types: Vec<TaskType>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_ms: DEFAULT_TTL_MS,
            max_size: DEFAULT_MAX_SIZE,
            task_types: TaskType::defaults(),
        }
    }
}

impl CacheConfig {
    pub fn disabled() -> Self {
        Self { enabled: false, ..Default::default() }
    }

    pub fn with_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_task_types(mut self, task_types: Vec<TaskType>) -> Self {
        self.task_types = task_types;
        self
    }

    pub fn allows(&self, task_type: &TaskType) -> bool {
        self.task_types.contains(task_type)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(TwError::InvalidConfig("max_size must be at least 1".into()));
        }
        if self.ttl_ms == 0 {
            return Err(TwError::InvalidConfig("ttl_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Input-token prices, in dollars per 1,000,000 tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub per_million: HashMap<String, f64>,
    pub default_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let mut m = HashMap::new();
        m.insert("gpt-4o".into(), 5.0);
        m.insert("gpt-4o-mini".into(), 0.15);
        m.insert("gpt-4-turbo".into(), 10.0);
        m.insert("gpt-4".into(), 30.0);
        m.insert("gpt-3.5-turbo".into(), 0.5);
        m.insert("claude-3-5-sonnet".into(), 3.0);
        m.insert("claude-3-opus".into(), 15.0);
        m.insert("claude-3-haiku".into(), 0.25);
        Self { per_million: m, default_rate: DEFAULT_RATE_PER_MILLION }
    }
}

impl PricingConfig {
    pub fn rate(&self, model: &str) -> f64 {
        self.per_million.get(model).copied().unwrap_or(self.default_rate)
    }

    /// Dollar cost of `input_tokens` on `model`.
    pub fn cost(&self, input_tokens: u64, model: &str) -> f64 {
        input_tokens as f64 / 1_000_000.0 * self.rate(model)
    }

    pub fn validate(&self) -> Result<()> {
        let negative = self.per_million.iter().find(|(_, r)| **r < 0.0 || !r.is_finite());
        if let Some((model, rate)) = negative {
            return Err(TwError::InvalidConfig(format!("invalid rate {rate} for model {model}")));
        }
        if self.default_rate < 0.0 || !self.default_rate.is_finite() {
            return Err(TwError::InvalidConfig("default_rate must be a non-negative number".into()));
        }
        Ok(())
    }
}
