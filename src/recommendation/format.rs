//! Amount formatting helpers shared by description templates and the API.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Currency;

use super::currency::to_reference_units;

/// Suffix marking amounts expressed in ten-thousand units.
pub const TEN_THOUSAND_SUFFIX: &str = "×10k";

/// Rounds to a whole number and inserts thousands separators.
///
/// # Examples
///
/// ```
/// use advisory_engine::recommendation::format_grouped;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_grouped(Decimal::new(12345675, 1)), "1,234,568");
/// assert_eq!(format_grouped(Decimal::from(-38400)), "-38,400");
/// ```
pub fn format_grouped(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < Decimal::ZERO {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats a budget amount for description text, e.g. `NT$1,200 ×10k (budget)`.
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    format!(
        "{}{} {} (budget)",
        currency.symbol(),
        format_grouped(amount),
        TEN_THOUSAND_SUFFIX
    )
}

/// Formats a budget in reference units, appending the original amount for USD.
///
/// # Examples
///
/// ```
/// use advisory_engine::models::Currency;
/// use advisory_engine::recommendation::format_budget_display;
/// use rust_decimal::Decimal;
///
/// let rate = Decimal::from(32);
/// assert_eq!(
///     format_budget_display(Decimal::from(300), Currency::Twd, rate),
///     "NT$300 ×10k"
/// );
/// assert_eq!(
///     format_budget_display(Decimal::from(1200), Currency::Usd, rate),
///     "NT$38,400 ×10k (≈ US$1,200 ×10k)"
/// );
/// ```
pub fn format_budget_display(amount: Decimal, currency: Currency, usd_to_twd_rate: Decimal) -> String {
    let reference = to_reference_units(amount, currency, usd_to_twd_rate);
    let main = format!(
        "{}{} {}",
        Currency::Twd.symbol(),
        format_grouped(reference),
        TEN_THOUSAND_SUFFIX
    );

    if currency.is_reference() {
        main
    } else {
        format!(
            "{} (≈ {}{} {})",
            main,
            currency.symbol(),
            format_grouped(amount),
            TEN_THOUSAND_SUFFIX
        )
    }
}
