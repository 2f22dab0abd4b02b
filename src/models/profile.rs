//! Client profile model and the small value types it is built from.
//!
//! This module defines [`ClientProfile`] together with [`Currency`],
//! [`BudgetTier`] and [`AgeBand`].

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Budget currency.
///
/// TWD is the reference currency that all comparisons are normalised into;
/// USD amounts are converted with the configured exchange rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// New Taiwan dollar, the reference currency.
    #[default]
    #[serde(rename = "TWD")]
    Twd,
    /// US dollar.
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// Parses a currency code, treating anything unrecognised as TWD.
    ///
    /// # Example
    ///
    /// ```
    /// use advisory_engine::models::Currency;
    ///
    /// assert_eq!(Currency::from_code("usd"), Currency::Usd);
    /// assert_eq!(Currency::from_code("EUR"), Currency::Twd);
    /// ```
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Currency::Usd,
            _ => Currency::Twd,
        }
    }

    /// ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Twd => "TWD",
            Currency::Usd => "USD",
        }
    }

    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Twd => "NT$",
            Currency::Usd => "US$",
        }
    }

    /// Returns true for the reference currency.
    pub fn is_reference(&self) -> bool {
        *self == Currency::Twd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One of four ordered budget classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    /// Below the standard threshold.
    Entry,
    /// Standard budget.
    Standard,
    /// Advanced budget.
    Advanced,
    /// Premium budget.
    Premium,
}

impl BudgetTier {
    /// Human-readable label used in audience tags and descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Entry => "Entry budget",
            BudgetTier::Standard => "Standard budget",
            BudgetTier::Advanced => "Advanced budget",
            BudgetTier::Premium => "Premium budget",
        }
    }

    /// Advanced and Premium budgets select the accumulation-oriented variants.
    pub fn is_high(&self) -> bool {
        matches!(self, BudgetTier::Advanced | BudgetTier::Premium)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Life-stage band derived from age, used as an audience tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Under 35.
    Young,
    /// 35 to 55.
    Prime,
    /// 56 to 70.
    Mature,
    /// Over 70.
    Senior,
}

impl AgeBand {
    /// Determines the band for an age.
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=34 => AgeBand::Young,
            35..=55 => AgeBand::Prime,
            56..=70 => AgeBand::Mature,
            _ => AgeBand::Senior,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Young => "Young adults",
            AgeBand::Prime => "Prime earners",
            AgeBand::Mature => "Mature clients",
            AgeBand::Senior => "Seniors",
        }
    }
}

/// Normalises a free-text goal tag for matching.
///
/// Tags are trimmed and lowercased; spaces and underscores become hyphens.
pub fn normalize_goal(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c.is_whitespace() { '-' } else { c })
        .collect()
}

/// The client a strategy recommendation is produced for.
///
/// `budget_amount` is expressed in ten-thousand units of `budget_currency`.
/// `goals` keeps the caller's order for display; matching ignores order.
///
/// # Example
///
/// ```
/// use advisory_engine::models::{ClientProfile, Currency};
/// use rust_decimal::Decimal;
///
/// let profile = ClientProfile {
///     age: 45,
///     gender: "female".to_string(),
///     budget_amount: Decimal::from(1200),
///     budget_currency: Currency::Twd,
///     pay_years: 10,
///     goals: vec!["Legacy Transfer".to_string()],
/// };
/// assert!(profile.has_any_goal(&["legacy-transfer"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Age in years.
    pub age: u32,
    /// Free-text gender label, echoed in audience tags only.
    pub gender: String,
    /// Budget amount in ten-thousand units of `budget_currency`.
    pub budget_amount: Decimal,
    /// Currency of `budget_amount`.
    pub budget_currency: Currency,
    /// Premium payment horizon in years.
    pub pay_years: u32,
    /// Stated goals as free-text tags.
    pub goals: Vec<String>,
}

impl ClientProfile {
    /// Returns true if any goal matches any of the given keywords.
    ///
    /// Keywords are expected in normalised form (see [`normalize_goal`]).
    pub fn has_any_goal(&self, keywords: &[&str]) -> bool {
        self.goals
            .iter()
            .map(|g| normalize_goal(g))
            .any(|g| keywords.contains(&g.as_str()))
    }

    /// The client's life-stage band.
    pub fn age_band(&self) -> AgeBand {
        AgeBand::from_age(self.age)
    }
}
