//! Recommendation result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BudgetTier;

/// A resolved strategy suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Unique strategy name.
    pub name: String,
    /// Why the strategy fits.
    pub rationale: String,
    /// Audiences the strategy suits, in display order.
    pub audience_tags: Vec<String>,
    /// Concrete description with profile values substituted.
    pub description: String,
}

/// The ordered, deduplicated output of the recommendation engine.
///
/// `strategies` is never empty and no two entries share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Tier the normalised budget was classified into.
    pub tier: BudgetTier,
    /// Budget converted into reference units.
    pub normalized_budget: Decimal,
    /// Strategies in rule-table order.
    pub strategies: Vec<Recommendation>,
}

impl RecommendationResult {
    /// Number of strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Always false for results produced by the engine.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy names in order.
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name.as_str()).collect()
    }

    /// Looks up a strategy by name.
    pub fn get(&self, name: &str) -> Option<&Recommendation> {
        self.strategies.iter().find(|s| s.name == name)
    }
}
