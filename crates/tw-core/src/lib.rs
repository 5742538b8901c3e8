//! Shared types, configuration and errors for the LLM result cache and
//! context compactor.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CacheConfig, OptimizerConfig, PricingConfig};
pub use error::{Result, TwError};
pub use types::{LlmResult, TaskType, TokenUsage};
