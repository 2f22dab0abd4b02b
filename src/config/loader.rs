//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, RecommendationConfig, TaxConstants, TierThresholds};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── tax.yaml             # Exemption, deductions and tax brackets
/// └── recommendation.yaml  # Exchange rate and budget tier thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use advisory_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Exempt amount: {}", loader.tax().exempt_amount());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or fails validation
    /// - The exchange rate is not positive
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax_path = path.join("tax.yaml");
        let tax = Self::load_yaml::<TaxConstants>(&tax_path)?;

        let recommendation_path = path.join("recommendation.yaml");
        let recommendation = Self::load_yaml::<RecommendationConfig>(&recommendation_path)?;

        let config = EngineConfig::new(tax, recommendation)?;
        debug!(
            path = %path.display(),
            brackets = config.tax().brackets().len(),
            usd_to_twd_rate = %config.usd_to_twd_rate(),
            "Loaded engine configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the tax constants.
    pub fn tax(&self) -> &TaxConstants {
        self.config.tax()
    }

    /// Returns the TWD per USD exchange rate.
    pub fn usd_to_twd_rate(&self) -> Decimal {
        self.config.usd_to_twd_rate()
    }

    /// Returns the budget tier thresholds.
    pub fn tier_thresholds(&self) -> TierThresholds {
        self.config.tier_thresholds()
    }
}
