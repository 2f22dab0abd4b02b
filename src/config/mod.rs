//! Configuration loading and management for the advisory engine.
//!
//! This module provides functionality to load the estate tax table and the
//! recommendation settings (exchange rate, budget tier thresholds) from YAML
//! files, validating them once at load time.
//!
//! # Example
//!
//! ```no_run
//! use advisory_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Brackets: {}", config.tax().brackets().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, RawTaxConstants, RawTierThresholds, RecommendationConfig, TaxBracket,
    TaxConstants, TierThresholds, default_exchange_rate,
};
