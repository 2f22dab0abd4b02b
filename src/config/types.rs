//! Configuration types for the advisory engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type that carries
//! an invariant is validated on construction, including when it is
//! deserialized, so an inconsistent table can never reach the engines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One segment of a progressive tax schedule.
///
/// The lower edge of a bracket is the upper bound of the previous bracket
/// (zero for the first). `upper_bound` is `None` for the unbounded top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper edge of the bracket, `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate in `[0, 1)`.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a bounded bracket.
    pub fn bounded(upper_bound: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Creates the unbounded top bracket.
    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// Unvalidated tax constants, as read from configuration.
///
/// Convert into [`TaxConstants`] with [`TaxConstants::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTaxConstants {
    /// Blanket exemption subtracted before any deduction.
    pub exempt_amount: Decimal,
    /// Flat funeral expense deduction.
    pub funeral_expense_deduction: Decimal,
    /// Deduction applied once if a spouse survives.
    pub spouse_deduction: Decimal,
    /// Deduction per qualifying adult child.
    pub adult_child_deduction: Decimal,
    /// Deduction per parent.
    pub parent_deduction: Decimal,
    /// Deduction per disabled dependent.
    pub disabled_person_deduction: Decimal,
    /// Deduction per other dependent.
    pub other_dependent_deduction: Decimal,
    /// Brackets in ascending order; the last one must be unbounded.
    pub brackets: Vec<TaxBracket>,
}

/// Validated, immutable estate tax constants.
///
/// All amounts are in ten-thousand currency units. Construct with
/// [`TaxConstants::new`] or use [`TaxConstants::default`] for the canonical
/// table.
///
/// # Example
///
/// ```
/// use advisory_engine::config::{RawTaxConstants, TaxBracket, TaxConstants};
/// use rust_decimal::Decimal;
///
/// let mut raw = RawTaxConstants::from(TaxConstants::default());
/// raw.brackets = vec![TaxBracket::bounded(Decimal::from(100), Decimal::new(5, 2))];
///
/// // The top bracket must be unbounded.
/// assert!(TaxConstants::new(raw).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaxConstants", into = "RawTaxConstants")]
pub struct TaxConstants {
    exempt_amount: Decimal,
    funeral_expense_deduction: Decimal,
    spouse_deduction: Decimal,
    adult_child_deduction: Decimal,
    parent_deduction: Decimal,
    disabled_person_deduction: Decimal,
    other_dependent_deduction: Decimal,
    brackets: Vec<TaxBracket>,
}

impl TaxConstants {
    /// Validates raw constants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTaxConstants`] if:
    /// - any exemption or deduction amount is negative
    /// - the bracket list is empty
    /// - a rate lies outside `[0, 1)`
    /// - a bounded bracket is not positive or not strictly above its predecessor
    /// - the last bracket is bounded, or an unbounded bracket is not last
    pub fn new(raw: RawTaxConstants) -> EngineResult<Self> {
        let amounts = [
            ("exempt_amount", raw.exempt_amount),
            ("funeral_expense_deduction", raw.funeral_expense_deduction),
            ("spouse_deduction", raw.spouse_deduction),
            ("adult_child_deduction", raw.adult_child_deduction),
            ("parent_deduction", raw.parent_deduction),
            ("disabled_person_deduction", raw.disabled_person_deduction),
            ("other_dependent_deduction", raw.other_dependent_deduction),
        ];
        for (name, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(invalid(format!("{} must not be negative (got {})", name, amount)));
            }
        }

        if raw.brackets.is_empty() {
            return Err(invalid("at least one bracket is required".to_string()));
        }

        let last_index = raw.brackets.len() - 1;
        let mut previous_bound = Decimal::ZERO;
        for (index, bracket) in raw.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} rate {} is outside [0, 1)",
                    index + 1,
                    bracket.rate
                )));
            }

            match bracket.upper_bound {
                Some(bound) if index == last_index => {
                    return Err(invalid(format!(
                        "last bracket must be unbounded (got upper bound {})",
                        bound
                    )));
                }
                Some(bound) => {
                    if bound <= previous_bound {
                        return Err(invalid(format!(
                            "bracket upper bounds must be strictly ascending and positive ({} after {})",
                            bound, previous_bound
                        )));
                    }
                    previous_bound = bound;
                }
                None if index != last_index => {
                    return Err(invalid(format!(
                        "only the last bracket may be unbounded (bracket {} of {})",
                        index + 1,
                        last_index + 1
                    )));
                }
                None => {}
            }
        }

        Ok(Self {
            exempt_amount: raw.exempt_amount,
            funeral_expense_deduction: raw.funeral_expense_deduction,
            spouse_deduction: raw.spouse_deduction,
            adult_child_deduction: raw.adult_child_deduction,
            parent_deduction: raw.parent_deduction,
            disabled_person_deduction: raw.disabled_person_deduction,
            other_dependent_deduction: raw.other_dependent_deduction,
            brackets: raw.brackets,
        })
    }

    /// Blanket exemption.
    pub fn exempt_amount(&self) -> Decimal {
        self.exempt_amount
    }

    /// Flat funeral expense deduction.
    pub fn funeral_expense_deduction(&self) -> Decimal {
        self.funeral_expense_deduction
    }

    /// Spouse deduction.
    pub fn spouse_deduction(&self) -> Decimal {
        self.spouse_deduction
    }

    /// Deduction per adult child.
    pub fn adult_child_deduction(&self) -> Decimal {
        self.adult_child_deduction
    }

    /// Deduction per parent.
    pub fn parent_deduction(&self) -> Decimal {
        self.parent_deduction
    }

    /// Deduction per disabled dependent.
    pub fn disabled_person_deduction(&self) -> Decimal {
        self.disabled_person_deduction
    }

    /// Deduction per other dependent.
    pub fn other_dependent_deduction(&self) -> Decimal {
        self.other_dependent_deduction
    }

    /// Brackets in ascending order; the last one is unbounded.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl Default for TaxConstants {
    /// The canonical table, in ten-thousand TWD.
    fn default() -> Self {
        Self {
            exempt_amount: Decimal::from(1333),
            funeral_expense_deduction: Decimal::from(138),
            spouse_deduction: Decimal::from(553),
            adult_child_deduction: Decimal::from(56),
            parent_deduction: Decimal::from(138),
            disabled_person_deduction: Decimal::from(693),
            other_dependent_deduction: Decimal::from(56),
            brackets: vec![
                TaxBracket::bounded(Decimal::from(5621), Decimal::new(10, 2)),
                TaxBracket::bounded(Decimal::from(11242), Decimal::new(15, 2)),
                TaxBracket::unbounded(Decimal::new(20, 2)),
            ],
        }
    }
}

impl TryFrom<RawTaxConstants> for TaxConstants {
    type Error = EngineError;

    fn try_from(raw: RawTaxConstants) -> EngineResult<Self> {
        Self::new(raw)
    }
}

impl From<TaxConstants> for RawTaxConstants {
    fn from(constants: TaxConstants) -> Self {
        RawTaxConstants {
            exempt_amount: constants.exempt_amount,
            funeral_expense_deduction: constants.funeral_expense_deduction,
            spouse_deduction: constants.spouse_deduction,
            adult_child_deduction: constants.adult_child_deduction,
            parent_deduction: constants.parent_deduction,
            disabled_person_deduction: constants.disabled_person_deduction,
            other_dependent_deduction: constants.other_dependent_deduction,
            brackets: constants.brackets,
        }
    }
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidTaxConstants { message }
}

/// Inclusive lower bounds of the budget tiers, in reference units.
///
/// A budget below `standard` is Entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTierThresholds", into = "RawTierThresholds")]
pub struct TierThresholds {
    standard: Decimal,
    advanced: Decimal,
    premium: Decimal,
}

/// Unvalidated tier thresholds, as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTierThresholds {
    /// Lower bound of the Standard tier.
    pub standard: Decimal,
    /// Lower bound of the Advanced tier.
    pub advanced: Decimal,
    /// Lower bound of the Premium tier.
    pub premium: Decimal,
}

impl TierThresholds {
    /// Validates thresholds: non-negative and strictly ascending.
    pub fn new(standard: Decimal, advanced: Decimal, premium: Decimal) -> EngineResult<Self> {
        if standard < Decimal::ZERO {
            return Err(EngineError::InvalidTierThresholds {
                message: format!("standard threshold {} is negative", standard),
            });
        }
        if !(standard < advanced && advanced < premium) {
            return Err(EngineError::InvalidTierThresholds {
                message: format!(
                    "thresholds must be strictly ascending (standard {}, advanced {}, premium {})",
                    standard, advanced, premium
                ),
            });
        }
        Ok(Self {
            standard,
            advanced,
            premium,
        })
    }

    /// Lower bound of the Standard tier.
    pub fn standard(&self) -> Decimal {
        self.standard
    }

    /// Lower bound of the Advanced tier.
    pub fn advanced(&self) -> Decimal {
        self.advanced
    }

    /// Lower bound of the Premium tier.
    pub fn premium(&self) -> Decimal {
        self.premium
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            standard: Decimal::from(100),
            advanced: Decimal::from(300),
            premium: Decimal::from(1000),
        }
    }
}

impl TryFrom<RawTierThresholds> for TierThresholds {
    type Error = EngineError;

    fn try_from(raw: RawTierThresholds) -> EngineResult<Self> {
        Self::new(raw.standard, raw.advanced, raw.premium)
    }
}

impl From<TierThresholds> for RawTierThresholds {
    fn from(thresholds: TierThresholds) -> Self {
        RawTierThresholds {
            standard: thresholds.standard,
            advanced: thresholds.advanced,
            premium: thresholds.premium,
        }
    }
}

/// Recommendation settings file structure (`recommendation.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// TWD per USD used to normalise USD budgets.
    pub usd_to_twd_rate: Decimal,
    /// Budget tier thresholds in reference units.
    #[serde(default)]
    pub tier_thresholds: TierThresholds,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            usd_to_twd_rate: default_exchange_rate(),
            tier_thresholds: TierThresholds::default(),
        }
    }
}

/// The default TWD per USD exchange rate.
pub fn default_exchange_rate() -> Decimal {
    Decimal::new(320, 1)
}

/// The complete engine configuration.
///
/// Aggregates the tax table and the recommendation settings; validated
/// once when built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    tax: TaxConstants,
    recommendation: RecommendationConfig,
}

impl EngineConfig {
    /// Creates a configuration from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidExchangeRate`] if the rate is not positive.
    pub fn new(tax: TaxConstants, recommendation: RecommendationConfig) -> EngineResult<Self> {
        if recommendation.usd_to_twd_rate <= Decimal::ZERO {
            return Err(EngineError::InvalidExchangeRate {
                rate: recommendation.usd_to_twd_rate,
            });
        }
        Ok(Self {
            tax,
            recommendation,
        })
    }

    /// Returns the tax constants.
    pub fn tax(&self) -> &TaxConstants {
        &self.tax
    }

    /// Returns the TWD per USD exchange rate.
    pub fn usd_to_twd_rate(&self) -> Decimal {
        self.recommendation.usd_to_twd_rate
    }

    /// Returns the budget tier thresholds.
    pub fn tier_thresholds(&self) -> TierThresholds {
        self.recommendation.tier_thresholds
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax: TaxConstants::default(),
            recommendation: RecommendationConfig::default(),
        }
    }
}
