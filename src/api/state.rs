//! Application state for the advisory engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::MemoizedTaxCalculator;
use crate::config::ConfigLoader;
use crate::recommendation::StrategyEngine;

/// Shared application state.
///
/// Holds the loaded configuration and the two engines built from it.
/// Both engines are read-only after construction and safe to share.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    tax: Arc<MemoizedTaxCalculator>,
    strategies: Arc<StrategyEngine>,
}

impl AppState {
    /// Creates the application state, building both engines from `config`.
    pub fn new(config: ConfigLoader) -> Self {
        let tax = MemoizedTaxCalculator::new(config.tax().clone());
        let strategies = StrategyEngine::from_config(config.config());
        Self {
            config: Arc::new(config),
            tax: Arc::new(tax),
            strategies: Arc::new(strategies),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The memoising estate tax calculator.
    pub fn tax(&self) -> &MemoizedTaxCalculator {
        &self.tax
    }

    /// The strategy recommendation engine.
    pub fn strategies(&self) -> &StrategyEngine {
        &self.strategies
    }
}
