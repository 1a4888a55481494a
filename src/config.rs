//! Configuration loading from TOML.
//!
//! Reads `taxdeed.toml` and deserializes into strongly-typed structs. Every
//! section and key is optional; anything missing takes the default
//! documented on the field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::calculators::{AcquisitionConfig, HoldingConfig, SellingConfig};
use crate::types::CostError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub warnings: WarningThresholds,
    pub acquisition: AcquisitionConfig,
    pub holding: HoldingConfig,
    pub selling: SellingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Year used for property age and the future-yearBuilt check.
    /// Default: current UTC year when the engine is built.
    pub reference_year: Option<i32>,
    /// Contingency before confidence and scope factors. Default: 10%.
    pub contingency_base_rate: f64,
    /// Floor on the effective contingency rate. Default: 5%.
    pub contingency_min_rate: f64,
    /// Ceiling on the effective contingency rate. Default: 20%.
    pub contingency_max_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_year: None,
            contingency_base_rate: 0.10,
            contingency_min_rate: 0.05,
            contingency_max_rate: 0.20,
        }
    }
}

/// Thresholds for the advisory warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningThresholds {
    /// Default: 0.9.
    pub bid_to_sale_ratio: f64,
    /// Default: 0.9.
    pub bid_to_value_ratio: f64,
    /// Validation warning above this hold. Default: 24.
    pub max_holding_months: u32,
    /// Default: 400.
    pub min_sqft: u32,
    /// Default: 10,000.
    pub max_sqft: u32,
    /// Default: 100 years.
    pub max_property_age: i32,
    /// Default: 15%.
    pub min_profit_margin: f64,
    /// Default: $100.
    pub max_rehab_per_sqft: f64,
    /// Default: 0.5.
    pub rehab_to_bid_ratio: f64,
    /// Post-hoc warning above this hold. Default: 12.
    pub extended_holding_months: u32,
    /// Default: 0.10.
    pub holding_to_bid_ratio: f64,
    /// Default: 0.08.
    pub premium_to_bid_ratio: f64,
    /// Default: 0.15.
    pub selling_to_sale_ratio: f64,
    /// Default: 1.3.
    pub max_labor_multiplier: f64,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            bid_to_sale_ratio: 0.9,
            bid_to_value_ratio: 0.9,
            max_holding_months: 24,
            min_sqft: 400,
            max_sqft: 10_000,
            max_property_age: 100,
            min_profit_margin: 0.15,
            max_rehab_per_sqft: 100.0,
            rehab_to_bid_ratio: 0.5,
            extended_holding_months: 12,
            holding_to_bid_ratio: 0.10,
            premium_to_bid_ratio: 0.08,
            selling_to_sale_ratio: 0.15,
            max_labor_multiplier: 1.3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON log lines. Default: false.
    pub json: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("Invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no calculation could use.
    pub fn validate(&self) -> Result<(), CostError> {
        let e = &self.engine;
        if !(0.0..=1.0).contains(&e.contingency_min_rate)
            || !(0.0..=1.0).contains(&e.contingency_max_rate)
            || e.contingency_min_rate > e.contingency_max_rate
        {
            return Err(CostError::Config(format!(
                "contingency band [{}, {}] must satisfy 0 <= min <= max <= 1",
                e.contingency_min_rate, e.contingency_max_rate
            )));
        }
        if e.contingency_base_rate.is_nan() || e.contingency_base_rate < 0.0 {
            return Err(CostError::Config(format!(
                "contingency_base_rate must be non-negative, got {}",
                e.contingency_base_rate
            )));
        }
        let w = &self.warnings;
        if w.min_sqft > w.max_sqft {
            return Err(CostError::Config(format!(
                "min_sqft {} exceeds max_sqft {}",
                w.min_sqft, w.max_sqft
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.engine.contingency_base_rate, 0.10);
        assert_eq!(cfg.warnings.min_profit_margin, 0.15);
        assert_eq!(cfg.holding.vacant_utilities, 150.0);
        assert!(!cfg.logging.json);
    }

    #[test]
    fn test_partial_sections() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [engine]
            reference_year = 2024

            [warnings]
            min_profit_margin = 0.2

            [acquisition]
            legal_review_fee = 900.0

            [logging]
            json = true
            filter = "taxdeed_costs=debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.engine.reference_year, Some(2024));
        assert_eq!(cfg.engine.contingency_max_rate, 0.20);
        assert_eq!(cfg.warnings.min_profit_margin, 0.2);
        assert_eq!(cfg.warnings.max_holding_months, 24);
        assert_eq!(cfg.acquisition.legal_review_fee, 900.0);
        assert_eq!(cfg.acquisition.title_search_base, 350.0);
        assert!(cfg.logging.json);
        assert_eq!(cfg.logging.filter.as_deref(), Some("taxdeed_costs=debug"));
    }

    #[test]
    fn test_inverted_contingency_band_rejected() {
        let err = AppConfig::from_toml_str(
            r#"
            [engine]
            contingency_min_rate = 0.3
            contingency_max_rate = 0.1
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("contingency band"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(AppConfig::from_toml_str("[engine\nreference_year = ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = AppConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(AppConfig::load("definitely/not/here.toml").is_err());
    }
}
