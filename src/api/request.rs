//! Request types for the advisory engine API.
//!
//! This module defines the JSON request bodies for `/tax/estimate` and
//! `/strategies/recommend`, and their conversion into domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ClientProfile, Currency, FamilyComposition};
use crate::recommendation::CurrencyNormalizer;

/// Request body for the `/tax/estimate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxEstimateRequest {
    /// Gross estate value, in the same unit as the tax constants.
    pub total_assets: Decimal,
    /// Surviving family members; missing counts default to zero.
    #[serde(default)]
    pub family: FamilyComposition,
    /// Outstanding debts of the estate. Negative values count as zero.
    #[serde(default)]
    pub debts: Decimal,
}

impl TaxEstimateRequest {
    /// Total assets net of debts, the value the tax is assessed on.
    pub fn net_estate(&self) -> Decimal {
        self.total_assets.saturating_sub(self.debts.max(Decimal::ZERO))
    }
}

/// Request body for the `/strategies/recommend` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Client age in years.
    pub age: u32,
    /// Free-text gender label.
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Budget in ten-thousand units of `currency`.
    pub budget: Decimal,
    /// Currency code; unknown codes are treated as TWD.
    #[serde(default)]
    pub currency: Option<String>,
    /// Premium payment horizon in years.
    #[serde(default = "default_pay_years")]
    pub pay_years: u32,
    /// Free-text goal tags.
    #[serde(default)]
    pub goals: Vec<String>,
}

fn default_gender() -> String {
    "unspecified".to_string()
}

fn default_pay_years() -> u32 {
    10
}

impl RecommendationRequest {
    /// Validates the request and converts it into a [`ClientProfile`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidProfile`] for a negative budget, a
    /// budget too large to convert into reference units, or a zero payment
    /// horizon.
    pub fn into_profile(self, normalizer: &CurrencyNormalizer) -> EngineResult<ClientProfile> {
        if self.budget < Decimal::ZERO {
            return Err(EngineError::InvalidProfile {
                field: "budget".to_string(),
                message: format!("must not be negative, got {}", self.budget),
            });
        }
        if self.pay_years == 0 {
            return Err(EngineError::InvalidProfile {
                field: "pay_years".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let budget_currency = self
            .currency
            .as_deref()
            .map(Currency::from_code)
            .unwrap_or_default();

        if normalizer
            .checked_reference_units(self.budget, budget_currency)
            .is_none()
        {
            return Err(EngineError::InvalidProfile {
                field: "budget".to_string(),
                message: format!(
                    "{} {} is out of range after currency conversion",
                    self.budget,
                    budget_currency.code()
                ),
            });
        }

        Ok(ClientProfile {
            age: self.age,
            gender: self.gender,
            budget_amount: self.budget,
            budget_currency,
            pay_years: self.pay_years,
            goals: self.goals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_profile(json: &str) -> EngineResult<ClientProfile> {
        let request: RecommendationRequest = serde_json::from_str(json).unwrap();
        request.into_profile(&CurrencyNormalizer::default())
    }

    #[test]
    fn test_recommendation_defaults() {
        let profile = to_profile(r#"{"age": 45, "budget": "1200"}"#).unwrap();

        assert_eq!(profile.gender, "unspecified");
        assert_eq!(profile.budget_currency, Currency::Twd);
        assert_eq!(profile.pay_years, 10);
        assert!(profile.goals.is_empty());
    }

    #[test]
    fn test_numeric_budget_accepted() {
        let profile = to_profile(r#"{"age": 45, "budget": 12.5, "currency": "usd"}"#).unwrap();

        assert_eq!(profile.budget_amount, Decimal::new(125, 1));
        assert_eq!(profile.budget_currency, Currency::Usd);
    }

    #[test]
    fn test_unknown_currency_falls_back_to_twd() {
        let profile = to_profile(r#"{"age": 45, "budget": 100, "currency": "JPY"}"#).unwrap();
        assert_eq!(profile.budget_currency, Currency::Twd);
    }

    #[test]
    fn test_negative_budget_rejected() {
        let err = to_profile(r#"{"age": 45, "budget": -1}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidProfile { ref field, .. } if field == "budget"));
    }

    #[test]
    fn test_unconvertible_usd_budget_rejected() {
        let json = format!(r#"{{"age": 45, "budget": "{}", "currency": "USD"}}"#, Decimal::MAX);
        let err = to_profile(&json).unwrap_err();
        assert!(matches!(err, EngineError::InvalidProfile { ref field, .. } if field == "budget"));

        let json = format!(r#"{{"age": 45, "budget": "{}", "currency": "TWD"}}"#, Decimal::MAX);
        assert_eq!(to_profile(&json).unwrap().budget_amount, Decimal::MAX);
    }

    #[test]
    fn test_zero_pay_years_rejected() {
        let err = to_profile(r#"{"age": 45, "budget": 100, "pay_years": 0}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidProfile { ref field, .. } if field == "pay_years"));
    }

    #[test]
    fn test_tax_request_family_defaults() {
        let request: TaxEstimateRequest =
            serde_json::from_str(r#"{"total_assets": 5000, "family": {"has_spouse": true}}"#).unwrap();
        assert_eq!(request.total_assets, Decimal::from(5000));
        assert!(request.family.has_spouse);
        assert_eq!(request.family.parents, 0);

        let request: TaxEstimateRequest =
            serde_json::from_str(r#"{"total_assets": "5000"}"#).unwrap();
        assert_eq!(request.family, FamilyComposition::default());
        assert_eq!(request.debts, Decimal::ZERO);
        assert_eq!(request.net_estate(), Decimal::from(5000));
    }

    #[test]
    fn test_net_estate_subtracts_debts() {
        let request: TaxEstimateRequest =
            serde_json::from_str(r#"{"total_assets": 5000, "debts": 1200}"#).unwrap();
        assert_eq!(request.net_estate(), Decimal::from(3800));

        let request: TaxEstimateRequest =
            serde_json::from_str(r#"{"total_assets": 5000, "debts": -300}"#).unwrap();
        assert_eq!(request.net_estate(), Decimal::from(5000));

        let request = TaxEstimateRequest {
            total_assets: Decimal::MIN,
            family: FamilyComposition::default(),
            debts: Decimal::MAX,
        };
        assert_eq!(request.net_estate(), Decimal::MIN);
    }
}
