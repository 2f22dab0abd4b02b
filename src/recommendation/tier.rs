//! Budget tier classification.

use rust_decimal::Decimal;

use crate::config::TierThresholds;
use crate::models::BudgetTier;

impl TierThresholds {
    /// Classifies a budget already converted into reference units.
    ///
    /// Thresholds are inclusive lower bounds checked from the highest tier
    /// down, so a boundary value belongs to the higher tier.
    pub fn classify(&self, normalized_budget: Decimal) -> BudgetTier {
        if normalized_budget >= self.premium() {
            BudgetTier::Premium
        } else if normalized_budget >= self.advanced() {
            BudgetTier::Advanced
        } else if normalized_budget >= self.standard() {
            BudgetTier::Standard
        } else {
            BudgetTier::Entry
        }
    }
}

/// Classifies a normalised budget with the default thresholds (100 / 300 / 1000).
///
/// # Examples
///
/// ```
/// use advisory_engine::models::BudgetTier;
/// use advisory_engine::recommendation::classify;
/// use rust_decimal::Decimal;
///
/// assert_eq!(classify(Decimal::from(1000)), BudgetTier::Premium);
/// assert_eq!(classify(Decimal::from(99)), BudgetTier::Entry);
/// ```
pub fn classify(normalized_budget: Decimal) -> BudgetTier {
    TierThresholds::default().classify(normalized_budget)
}
