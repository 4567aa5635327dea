//! Configuration for metric scoring.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! explicit config file -> environment. The user-level file lives at
//! `~/.config/rageval/config.toml` (platform equivalent via `directories`).

use crate::error::MetricsError;
use crate::metrics::bleu::MAX_NGRAM_ORDER;
use crate::metrics::{AggregateWeights, ScoreOptions};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `RAGEVAL_MAX_N=2`.
pub const ENV_PREFIX: &str = "RAGEVAL_";

/// Scoring defaults applied to every call made from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Highest BLEU n-gram order.
    #[serde(default = "default_max_n")]
    pub max_n: usize,
    /// Apply BLEU zero-precision smoothing.
    #[serde(default = "default_true")]
    pub smooth: bool,
    /// ROUGE-L F-measure beta.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Aggregate score weights.
    #[serde(default)]
    pub weights: AggregateWeights,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            max_n: default_max_n(),
            smooth: true,
            beta: default_beta(),
            weights: AggregateWeights::default(),
        }
    }
}

fn default_max_n() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_beta() -> f64 {
    1.0
}

impl MetricsConfig {
    /// Reject settings no scorer can run with. Weights are left as given.
    pub fn validate(&self) -> Result<(), MetricsError> {
        if self.max_n == 0 {
            return Err(MetricsError::config("max_n must be at least 1"));
        }
        if self.max_n > MAX_NGRAM_ORDER {
            return Err(MetricsError::config(format!(
                "max_n must be at most {MAX_NGRAM_ORDER}, got {}",
                self.max_n
            )));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(MetricsError::config(format!(
                "beta must be finite and non-negative, got {}",
                self.beta
            )));
        }
        Ok(())
    }

    /// Per-call options derived from this configuration.
    pub fn score_options(&self) -> ScoreOptions {
        ScoreOptions::from(self)
    }
}

impl From<&MetricsConfig> for ScoreOptions {
    fn from(config: &MetricsConfig) -> Self {
        ScoreOptions {
            max_n: config.max_n,
            smooth: config.smooth,
            beta: config.beta,
            weights: config.weights,
        }
    }
}

/// Path of the user-level configuration file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "rageval", "rageval")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (`RAGEVAL_MAX_N`, `RAGEVAL_WEIGHTS__BLEU`, ...)
/// 2. Explicit config file (`path`)
/// 3. User config (`~/.config/rageval/config.toml`)
/// 4. Built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<MetricsConfig, MetricsError> {
    load_layered(user_config_path().as_deref(), path, Some(ENV_PREFIX))
}

/// Load configuration from the given sources only.
///
/// `user_config` is skipped when it does not exist; a missing `path` is an
/// error. Environment variables are read only when `env_prefix` is set.
pub fn load_layered(
    user_config: Option<&Path>,
    path: Option<&Path>,
    env_prefix: Option<&str>,
) -> Result<MetricsConfig, MetricsError> {
    let mut figment = Figment::from(Serialized::defaults(MetricsConfig::default()));

    if let Some(user_config) = user_config {
        if user_config.exists() {
            figment = figment.merge(Toml::file(user_config));
        }
    }

    if let Some(path) = path {
        if !path.exists() {
            return Err(MetricsError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    if let Some(prefix) = env_prefix {
        figment = figment.merge(Env::prefixed(prefix).split("__"));
    }

    let config: MetricsConfig = figment.extract()?;
    config.validate()?;
    tracing::debug!(
        max_n = config.max_n,
        smooth = config.smooth,
        beta = config.beta,
        "loaded metrics configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_score_options() {
        let config = MetricsConfig::default();
        assert_eq!(config.score_options(), ScoreOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: MetricsConfig = toml_from_str("max_n = 2\n[weights]\nbleu = 0.5\nrouge_l = 0.5\ncontent_f1 = 0.0\nem = 0.0\n");
        assert_eq!(config.max_n, 2);
        assert!(config.smooth);
        assert_eq!(config.weights.bleu, 0.5);
    }

    #[test]
    fn test_validate_rejects_zero_order() {
        let config = MetricsConfig {
            max_n: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MetricsError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_order_above_cap() {
        let config = MetricsConfig {
            max_n: MAX_NGRAM_ORDER + 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MetricsError::Config(_))));
    }

    #[test]
    fn test_validate_allows_unnormalized_weights() {
        let config = MetricsConfig {
            weights: AggregateWeights::new(2.0, 2.0, 2.0, 2.0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    fn toml_from_str(s: &str) -> MetricsConfig {
        Figment::from(Serialized::defaults(MetricsConfig::default()))
            .merge(Toml::string(s))
            .extract()
            .unwrap()
    }
}
