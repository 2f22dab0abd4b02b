//! The strategy recommendation engine.

use std::collections::HashSet;

use tracing::debug;

use crate::config::{EngineConfig, TierThresholds};
use crate::models::{ClientProfile, RecommendationResult};

use super::currency::CurrencyNormalizer;
use super::rules::{DEFAULT_CANDIDATES, FALLBACK_CANDIDATE, StrategyCandidate, TemplateContext};

/// Evaluates a client profile against an ordered candidate table.
///
/// The engine holds no per-request state; a single instance can be shared
/// across threads.
///
/// # Example
///
/// ```
/// use advisory_engine::models::{BudgetTier, ClientProfile, Currency};
/// use advisory_engine::recommendation::StrategyEngine;
/// use rust_decimal::Decimal;
///
/// let profile = ClientProfile {
///     age: 70,
///     gender: "male".to_string(),
///     budget_amount: Decimal::from(50),
///     budget_currency: Currency::Twd,
///     pay_years: 1,
///     goals: vec![],
/// };
///
/// let result = StrategyEngine::default().recommend(&profile);
/// assert_eq!(result.tier, BudgetTier::Entry);
/// assert!(!result.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    normalizer: CurrencyNormalizer,
    thresholds: TierThresholds,
    candidates: Vec<StrategyCandidate>,
    fallback: StrategyCandidate,
}

impl StrategyEngine {
    /// Creates an engine with the default candidate table.
    pub fn new(normalizer: CurrencyNormalizer, thresholds: TierThresholds) -> Self {
        Self::with_candidates(
            normalizer,
            thresholds,
            DEFAULT_CANDIDATES.to_vec(),
            FALLBACK_CANDIDATE,
        )
    }

    /// Creates an engine from loaded configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            CurrencyNormalizer::from_config(config),
            config.tier_thresholds(),
        )
    }

    /// Creates an engine with a custom candidate table and fallback.
    pub fn with_candidates(
        normalizer: CurrencyNormalizer,
        thresholds: TierThresholds,
        candidates: Vec<StrategyCandidate>,
        fallback: StrategyCandidate,
    ) -> Self {
        Self {
            normalizer,
            thresholds,
            candidates,
            fallback,
        }
    }

    /// The currency normaliser in use.
    pub fn normalizer(&self) -> &CurrencyNormalizer {
        &self.normalizer
    }

    /// The tier thresholds in use.
    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds
    }

    /// Produces the ordered, deduplicated strategy list for `profile`.
    ///
    /// Candidates fire in table order; a later candidate whose name has
    /// already been emitted is skipped. The fallback is appended only when
    /// nothing else fired, so the result is never empty.
    pub fn recommend(&self, profile: &ClientProfile) -> RecommendationResult {
        let normalized_budget = self
            .normalizer
            .to_reference_units(profile.budget_amount, profile.budget_currency);
        let tier = self.thresholds.classify(normalized_budget);

        let ctx = TemplateContext { profile, tier };

        let mut seen = HashSet::new();
        let mut selected: Vec<&StrategyCandidate> = self
            .candidates
            .iter()
            .filter(|candidate| candidate.trigger.fires(profile, tier))
            .filter(|candidate| seen.insert(candidate.name))
            .collect();

        if selected.is_empty() {
            selected.push(&self.fallback);
        }

        let strategies: Vec<_> = selected.iter().map(|c| c.resolve(&ctx)).collect();

        debug!(
            age = profile.age,
            normalized_budget = %normalized_budget,
            tier = ?tier,
            strategies = strategies.len(),
            "Strategy recommendation evaluated"
        );

        RecommendationResult {
            tier,
            normalized_budget,
            strategies,
        }
    }
}

impl Default for StrategyEngine {
    fn default() -> Self {
        Self::new(CurrencyNormalizer::default(), TierThresholds::default())
    }
}
