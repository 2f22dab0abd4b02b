//! Marginal bracket integration.
//!
//! This module applies a progressive schedule to a taxable base: each
//! bracket taxes only the slice of the base that lies between the previous
//! bracket's upper bound and its own.

use rust_decimal::Decimal;

use crate::config::TaxBracket;
use crate::models::{AuditStep, BracketSlice};

/// The result of applying the bracket schedule.
#[derive(Debug, Clone)]
pub struct ProgressiveTaxResult {
    /// Taxed slices in ascending order; brackets the base never reaches are omitted.
    pub slices: Vec<BracketSlice>,
    /// Sum of slice taxes, unrounded.
    pub tax: Decimal,
    /// One audit step per slice.
    pub audit_steps: Vec<AuditStep>,
}

/// Integrates a taxable base over ascending brackets.
///
/// Walks the brackets tracking the previous upper bound (starting at zero)
/// and stops as soon as the base no longer exceeds it. A non-positive base
/// produces no slices and zero tax.
///
/// # Arguments
///
/// * `taxable_base` - The amount to tax
/// * `brackets` - Validated brackets, ascending, last one unbounded
/// * `first_step_number` - The step number of the first emitted audit step
///
/// # Examples
///
/// ```
/// use advisory_engine::calculation::apply_brackets;
/// use advisory_engine::config::TaxConstants;
/// use rust_decimal::Decimal;
///
/// let constants = TaxConstants::default();
/// let result = apply_brackets(Decimal::from(6000), constants.brackets(), 1);
///
/// // 5621 at 10% + 379 at 15%
/// assert_eq!(result.slices.len(), 2);
/// assert_eq!(result.tax, Decimal::new(61895, 2));
/// ```
pub fn apply_brackets(
    taxable_base: Decimal,
    brackets: &[TaxBracket],
    first_step_number: u32,
) -> ProgressiveTaxResult {
    let mut slices = Vec::new();
    let mut audit_steps = Vec::new();
    let mut tax = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;
    let mut step_number = first_step_number;

    for bracket in brackets {
        if taxable_base <= previous_bound {
            break;
        }

        let slice_top = match bracket.upper_bound {
            Some(bound) => taxable_base.min(bound),
            None => taxable_base,
        };
        let taxed_amount = slice_top - previous_bound;
        let slice_tax = taxed_amount * bracket.rate;
        tax += slice_tax;

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "tax_bracket".to_string(),
            rule_name: "Marginal Bracket".to_string(),
            input: serde_json::json!({
                "lower_bound": previous_bound.to_string(),
                "upper_bound": bracket.upper_bound.map(|b| b.to_string()),
                "rate": bracket.rate.to_string()
            }),
            output: serde_json::json!({
                "taxed_amount": taxed_amount.to_string(),
                "tax": slice_tax.to_string()
            }),
            reasoning: format!(
                "{} × {}% = {}",
                taxed_amount.normalize(),
                (bracket.rate * Decimal::ONE_HUNDRED).normalize(),
                slice_tax.normalize()
            ),
        });
        step_number += 1;

        slices.push(BracketSlice {
            lower_bound: previous_bound,
            upper_bound: bracket.upper_bound,
            rate: bracket.rate,
            taxed_amount,
            tax: slice_tax,
        });

        match bracket.upper_bound {
            Some(bound) => previous_bound = bound,
            None => break,
        }
    }

    ProgressiveTaxResult {
        slices,
        tax,
        audit_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxConstants;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn brackets() -> Vec<TaxBracket> {
        TaxConstants::default().brackets().to_vec()
    }

    #[test]
    fn test_within_first_bracket() {
        let result = apply_brackets(dec("3529"), &brackets(), 1);
        assert_eq!(result.slices.len(), 1);
        assert_eq!(result.tax, dec("352.9"));
        assert_eq!(result.slices[0].lower_bound, Decimal::ZERO);
        assert_eq!(result.slices[0].upper_bound, Some(dec("5621")));
    }

    #[test]
    fn test_exactly_at_first_bound() {
        let result = apply_brackets(dec("5621"), &brackets(), 1);
        assert_eq!(result.slices.len(), 1);
        assert_eq!(result.tax, dec("562.1"));
    }

    #[test]
    fn test_spans_all_brackets() {
        let result = apply_brackets(dec("20000"), &brackets(), 1);
        assert_eq!(result.slices.len(), 3);

        // 5621*0.10 + 5621*0.15 + 8758*0.20
        assert_eq!(result.slices[0].taxed_amount, dec("5621"));
        assert_eq!(result.slices[1].taxed_amount, dec("5621"));
        assert_eq!(result.slices[2].taxed_amount, dec("8758"));
        assert_eq!(result.slices[2].upper_bound, None);
        assert_eq!(result.tax, dec("562.1") + dec("843.15") + dec("1751.6"));
    }

    #[test]
    fn test_zero_base_has_no_slices() {
        let result = apply_brackets(Decimal::ZERO, &brackets(), 1);
        assert!(result.slices.is_empty());
        assert!(result.audit_steps.is_empty());
        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn test_negative_base_has_no_slices() {
        let result = apply_brackets(dec("-10"), &brackets(), 1);
        assert!(result.slices.is_empty());
        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn test_slices_are_contiguous() {
        let result = apply_brackets(dec("15000"), &brackets(), 1);
        for pair in result.slices.windows(2) {
            assert_eq!(Some(pair[1].lower_bound), pair[0].upper_bound);
        }
        let covered: Decimal = result.slices.iter().map(|s| s.taxed_amount).sum();
        assert_eq!(covered, dec("15000"));
    }

    #[test]
    fn test_audit_steps_numbered_from_first_step() {
        let result = apply_brackets(dec("12000"), &brackets(), 3);
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![3, 4, 5]);
        assert_eq!(result.audit_steps[0].reasoning, "5621 × 10% = 562.1");
    }
}
