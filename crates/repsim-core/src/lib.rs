//! Shared domain types and configuration for repsim.
//!
//! Defines the business record model used by the generator, the store, and
//! the HTTP surface, plus the env-driven application configuration.

pub mod app_config;
pub mod config;
pub mod record;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{
    BusinessKey, BusinessMetrics, BusinessRecord, Sentiment, TrendPoint, TREND_MONTHS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
