//! Currency normalisation into reference units.

use rust_decimal::Decimal;

use crate::config::{EngineConfig, default_exchange_rate};
use crate::error::{EngineError, EngineResult};
use crate::models::Currency;

/// Converts `amount` in `currency` into reference (TWD) units.
///
/// TWD amounts are returned unchanged; USD amounts are multiplied by
/// `usd_to_twd_rate`. No rounding is applied. A product beyond the
/// `Decimal` range saturates at [`Decimal::MAX`] or [`Decimal::MIN`].
///
/// # Examples
///
/// ```
/// use advisory_engine::models::Currency;
/// use advisory_engine::recommendation::to_reference_units;
/// use rust_decimal::Decimal;
///
/// let rate = Decimal::from(32);
/// assert_eq!(to_reference_units(Decimal::from(10), Currency::Usd, rate), Decimal::from(320));
/// assert_eq!(to_reference_units(Decimal::from(10), Currency::Twd, rate), Decimal::from(10));
/// ```
pub fn to_reference_units(amount: Decimal, currency: Currency, usd_to_twd_rate: Decimal) -> Decimal {
    match currency {
        Currency::Twd => amount,
        Currency::Usd => amount.saturating_mul(usd_to_twd_rate),
    }
}

/// Converts budgets into reference units with a fixed, validated rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyNormalizer {
    usd_to_twd_rate: Decimal,
}

impl CurrencyNormalizer {
    /// Creates a normaliser.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidExchangeRate`] if `usd_to_twd_rate` is not positive.
    pub fn new(usd_to_twd_rate: Decimal) -> EngineResult<Self> {
        if usd_to_twd_rate <= Decimal::ZERO {
            return Err(EngineError::InvalidExchangeRate {
                rate: usd_to_twd_rate,
            });
        }
        Ok(Self { usd_to_twd_rate })
    }

    /// Creates a normaliser from an already validated configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            usd_to_twd_rate: config.usd_to_twd_rate(),
        }
    }

    /// The configured TWD per USD rate.
    pub fn rate(&self) -> Decimal {
        self.usd_to_twd_rate
    }

    /// Converts `amount` in `currency` into reference units.
    pub fn to_reference_units(&self, amount: Decimal, currency: Currency) -> Decimal {
        to_reference_units(amount, currency, self.usd_to_twd_rate)
    }

    /// Like [`to_reference_units`](Self::to_reference_units), but `None`
    /// when the converted amount does not fit in a `Decimal`.
    pub fn checked_reference_units(&self, amount: Decimal, currency: Currency) -> Option<Decimal> {
        match currency {
            Currency::Twd => Some(amount),
            Currency::Usd => amount.checked_mul(self.usd_to_twd_rate),
        }
    }
}

impl Default for CurrencyNormalizer {
    fn default() -> Self {
        Self {
            usd_to_twd_rate: default_exchange_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_currency_is_unchanged() {
        let normalizer = CurrencyNormalizer::new(dec("31.0")).unwrap();
        assert_eq!(normalizer.to_reference_units(dec("123.45"), Currency::Twd), dec("123.45"));
    }

    #[test]
    fn test_usd_is_multiplied_without_rounding() {
        let normalizer = CurrencyNormalizer::new(dec("31.5")).unwrap();
        assert_eq!(normalizer.to_reference_units(dec("3.333"), Currency::Usd), dec("104.9895"));
    }

    #[test]
    fn test_out_of_range_usd_amount_saturates() {
        let normalizer = CurrencyNormalizer::default();
        assert_eq!(normalizer.to_reference_units(Decimal::MAX, Currency::Usd), Decimal::MAX);
        assert_eq!(normalizer.to_reference_units(Decimal::MIN, Currency::Usd), Decimal::MIN);
        assert_eq!(normalizer.checked_reference_units(Decimal::MAX, Currency::Usd), None);
        assert_eq!(normalizer.checked_reference_units(Decimal::MAX, Currency::Twd), Some(Decimal::MAX));
        assert_eq!(
            normalizer.checked_reference_units(dec("10"), Currency::Usd),
            Some(dec("320"))
        );
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(CurrencyNormalizer::new(Decimal::ZERO).is_err());
        assert!(CurrencyNormalizer::new(dec("-32")).is_err());
    }

    #[test]
    fn test_default_rate() {
        assert_eq!(CurrencyNormalizer::default().rate(), dec("32"));
    }

    #[test]
    fn test_from_config() {
        let normalizer = CurrencyNormalizer::from_config(&EngineConfig::default());
        assert_eq!(normalizer.to_reference_units(dec("10"), Currency::Usd), dec("320"));
    }
}
