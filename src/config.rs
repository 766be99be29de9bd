//! Engine configuration: scoring weights, normalization limits and the
//! metadata TTL.
//!
//! ## Sources
//!
//! [`ConfigLoader`] builds an [`AllocationConfig`] in three steps:
//!
//! 1. Parse an optional TOML file, substituting `${VAR}` references
//! 2. Apply `ALLOC_*` environment overrides
//! 3. Validate
//!
//! Without a file, the defaults below are used.
//!
//! ```toml
//! score_meta_ttl_hours = 24
//!
//! [scoring.weights.order]
//! oat_delta = 0.4
//! priority = 0.35
//! sku_count = 0.25
//!
//! [scoring.weights.picker]
//! sku_completed = 0.5
//! order_completed = 0.5
//! ```

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// ============================================================================
// Configuration types
// ============================================================================

/// Weights applied to the three normalized order terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderWeights {
    pub oat_delta: f64,
    pub priority: f64,
    pub sku_count: f64,
}

impl Default for OrderWeights {
    fn default() -> Self {
        Self {
            oat_delta: 0.4,
            priority: 0.35,
            sku_count: 0.25,
        }
    }
}

/// Weights applied to the two normalized picker terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerWeights {
    pub sku_completed: f64,
    pub order_completed: f64,
}

impl Default for PickerWeights {
    fn default() -> Self {
        Self {
            sku_completed: 0.5,
            order_completed: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub order: OrderWeights,
    pub picker: PickerWeights,
}

/// Upper bounds of the normalization ranges.
///
/// Values beyond a bound clamp to the end of the `[0, 1]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringLimits {
    /// Minutes either side of the OAT covered by the wait term
    pub max_oat_minutes: f64,
    pub max_priority: f64,
    pub max_sku: f64,
    /// Lifetime SKUs at which a picker counts as fully experienced
    pub max_sku_completed: f64,
    /// Lifetime orders at which a picker counts as fully experienced
    pub max_order_completed: f64,
}

impl Default for ScoringLimits {
    fn default() -> Self {
        Self {
            max_oat_minutes: 120.0,
            max_priority: 10.0,
            max_sku: 100.0,
            max_sku_completed: 10_000.0,
            max_order_completed: 1_000.0,
        }
    }
}

/// Immutable input to the score calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: Weights,
    pub limits: ScoringLimits,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub scoring: ScoringConfig,
    /// Lifetime of cached score metadata, from the last write
    pub score_meta_ttl_hours: u64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            score_meta_ttl_hours: 24,
        }
    }
}

impl AllocationConfig {
    pub fn score_meta_ttl(&self) -> Duration {
        Duration::from_secs(self.score_meta_ttl_hours.saturating_mul(3600))
    }

    /// Reject weights and limits that would make scores non-finite.
    ///
    /// Weights need not sum to 1; only their relative size matters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.scoring.weights;
        let weights = [
            ("weights.order.oat_delta", w.order.oat_delta),
            ("weights.order.priority", w.order.priority),
            ("weights.order.sku_count", w.order.sku_count),
            ("weights.picker.sku_completed", w.picker.sku_completed),
            ("weights.picker.order_completed", w.picker.order_completed),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }

        // Each term is at most its weight, so finite sums keep scores finite
        let sums = [
            (
                "weights.order",
                w.order.oat_delta + w.order.priority + w.order.sku_count,
            ),
            (
                "weights.picker",
                w.picker.sku_completed + w.picker.order_completed,
            ),
        ];
        for (name, sum) in sums {
            if !sum.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must sum to a finite number (got {})",
                    name, sum
                )));
            }
        }

        let l = &self.scoring.limits;
        let limits = [
            ("limits.max_oat_minutes", l.max_oat_minutes, 0.0),
            ("limits.max_priority", l.max_priority, 1.0),
            ("limits.max_sku", l.max_sku, 1.0),
            ("limits.max_sku_completed", l.max_sku_completed, 0.0),
            ("limits.max_order_completed", l.max_order_completed, 0.0),
        ];
        for (name, value, min) in limits {
            if !value.is_finite() || value < min {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be finite and at least {} (got {})",
                    name, min, value
                )));
            }
        }

        if self.score_meta_ttl_hours == 0 {
            return Err(ConfigError::ValidationError(
                "score_meta_ttl_hours must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    file_path: Option<String>,
    env_prefix: String,
    /// Replaces the process environment when set
    vars: Option<HashMap<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file_path: None,
            env_prefix: "ALLOC_".to_string(),
            vars: None,
        }
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    pub fn load(&self) -> Result<AllocationConfig, ConfigError> {
        let mut config = match &self.file_path {
            Some(file_path) => self.load_from_file(file_path)?,
            None => AllocationConfig::default(),
        };

        self.apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Parse TOML text without touching the filesystem
    pub fn load_from_str(&self, content: &str) -> Result<AllocationConfig, ConfigError> {
        let substituted = self.substitute_env_vars(content)?;
        let mut config: AllocationConfig =
            toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        self.apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    fn load_from_file(&self, file_path: &str) -> Result<AllocationConfig, ConfigError> {
        if !Path::new(file_path).exists() {
            return Err(ConfigError::FileNotFound(file_path.to_string()));
        }
        let content = std::fs::read_to_string(file_path)?;
        let substituted = self.substitute_env_vars(&content)?;

        toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn var(&self, name: &str) -> Option<String> {
        match &self.vars {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        }
    }

    fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::ParseError(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];

            let value = self
                .var(var_name)
                .ok_or_else(|| ConfigError::EnvVarNotFound(var_name.to_string()))?;

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    fn apply_env_overrides(&self, config: &mut AllocationConfig) -> Result<(), ConfigError> {
        if let Some(ttl) = self.var(&format!("{}SCORE_META_TTL_HOURS", self.env_prefix)) {
            config.score_meta_ttl_hours = ttl.parse().map_err(|e| {
                ConfigError::ValidationError(format!("Invalid score meta TTL: {}", e))
            })?;
        }

        let weights = &mut config.scoring.weights;
        let overrides: [(&str, &mut f64); 5] = [
            ("ORDER_WEIGHT_OAT_DELTA", &mut weights.order.oat_delta),
            ("ORDER_WEIGHT_PRIORITY", &mut weights.order.priority),
            ("ORDER_WEIGHT_SKU_COUNT", &mut weights.order.sku_count),
            ("PICKER_WEIGHT_SKU_COMPLETED", &mut weights.picker.sku_completed),
            ("PICKER_WEIGHT_ORDER_COMPLETED", &mut weights.picker.order_completed),
        ];
        for (suffix, slot) in overrides {
            let name = format!("{}{}", self.env_prefix, suffix);
            if let Some(raw) = self.var(&name) {
                *slot = raw.parse().map_err(|e| {
                    ConfigError::ValidationError(format!("Invalid {}: {}", name, e))
                })?;
            }
        }

        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn loader_with(vars: &[(&str, &str)]) -> ConfigLoader {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigLoader::new().with_vars(vars)
    }

    #[test]
    fn test_defaults() {
        let config = loader_with(&[]).load().unwrap();

        assert_eq!(config.scoring.weights.order.oat_delta, 0.4);
        assert_eq!(config.scoring.weights.order.priority, 0.35);
        assert_eq!(config.scoring.weights.order.sku_count, 0.25);
        assert_eq!(config.scoring.weights.picker.sku_completed, 0.5);
        assert_eq!(config.scoring.weights.picker.order_completed, 0.5);
        assert_eq!(config.scoring.limits.max_oat_minutes, 120.0);
        assert_eq!(config.score_meta_ttl(), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = loader_with(&[])
            .load_from_str(
                r#"
                score_meta_ttl_hours = 2

                [scoring.weights.order]
                priority = 0.5
                "#,
            )
            .unwrap();

        assert_eq!(config.score_meta_ttl_hours, 2);
        assert_eq!(config.scoring.weights.order.priority, 0.5);
        assert_eq!(config.scoring.weights.order.oat_delta, 0.4);
        assert_eq!(config.scoring.weights.picker, PickerWeights::default());
    }

    #[test]
    fn test_var_substitution() {
        let config = loader_with(&[("TTL", "6")])
            .load_from_str("score_meta_ttl_hours = ${TTL}")
            .unwrap();

        assert_eq!(config.score_meta_ttl_hours, 6);
    }

    #[test]
    fn test_missing_var_is_error() {
        let err = loader_with(&[])
            .load_from_str("score_meta_ttl_hours = ${NOPE}")
            .unwrap_err();

        assert!(matches!(err, ConfigError::EnvVarNotFound(name) if name == "NOPE"));
    }

    #[test]
    fn test_env_overrides() {
        let config = loader_with(&[
            ("ALLOC_SCORE_META_TTL_HOURS", "48"),
            ("ALLOC_ORDER_WEIGHT_PRIORITY", "0.9"),
            ("ALLOC_PICKER_WEIGHT_ORDER_COMPLETED", "0.1"),
        ])
        .load()
        .unwrap();

        assert_eq!(config.score_meta_ttl_hours, 48);
        assert_eq!(config.scoring.weights.order.priority, 0.9);
        assert_eq!(config.scoring.weights.picker.order_completed, 0.1);
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let err = loader_with(&[("ALLOC_ORDER_WEIGHT_PRIORITY", "high")])
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let err = loader_with(&[])
            .load_from_str("[scoring.weights.picker]\nsku_completed = -1.0")
            .unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = AllocationConfig::default();
        config.score_meta_ttl_hours = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unnormalized_weights_are_accepted() {
        let mut config = AllocationConfig::default();
        config.scoring.weights.order.oat_delta = 4.0;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overflowing_weight_sum_is_rejected() {
        let mut config = AllocationConfig::default();
        config.scoring.weights.order = OrderWeights {
            oat_delta: 1e308,
            priority: 1e308,
            sku_count: 1e308,
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = AllocationConfig::default();
        config.scoring.weights.picker = PickerWeights {
            sku_completed: f64::MAX,
            order_completed: f64::MAX,
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_large_valid_weights_score_finitely() {
        use crate::scoring::ScoreCalculator;
        use crate::types::{Order, Picker};
        use chrono::Utc;

        let mut config = AllocationConfig::default();
        config.scoring.weights.order = OrderWeights {
            oat_delta: 1e307,
            priority: 1e307,
            sku_count: 1e307,
        };
        config.scoring.weights.picker = PickerWeights {
            sku_completed: 1e307,
            order_completed: 1e307,
        };
        config.validate().unwrap();

        let calculator = ScoreCalculator::new(config.scoring);
        let now = Utc::now();
        let slowest = Order::new("O1", "S1", now + chrono::Duration::hours(5), 10, 500);
        let novice = Picker::new("P1", "S1", 0, 0);

        assert!(calculator.score_order(&slowest, now).0.is_finite());
        assert!(calculator.score_picker(&novice).0.is_finite());
    }

    #[test]
    fn test_missing_file() {
        let err = loader_with(&[])
            .with_file("/nonexistent/alloc.toml")
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = loader_with(&[]).load_from_str("score_meta_ttl_hours = [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
