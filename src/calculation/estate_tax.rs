//! Estate tax computation.
//!
//! This module combines the deduction and bracket steps into the full
//! estate tax estimate: deductions, threshold check, taxable base, marginal
//! bracket integration and whole-unit rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::TaxConstants;
use crate::models::{AuditStep, FamilyComposition, TaxResult};

use super::deductions::compute_deductions;
use super::progressive_tax::apply_brackets;

/// Rounding applied to the tax due: half away from zero, to whole units.
pub const TAX_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Computes the estate tax owed on `total_assets`.
///
/// 1. Deductions are summed for the family composition.
/// 2. Estates below `exempt_amount + deductions` owe nothing (early exit).
/// 3. The taxable base is `total_assets - exempt_amount - deductions`.
/// 4. The base is integrated over the marginal brackets.
/// 5. The tax is rounded half away from zero to a whole unit.
///
/// This function is pure: the same inputs always produce the same result.
/// Implausible family compositions are tolerated and reported as warnings.
///
/// # Examples
///
/// ```
/// use advisory_engine::calculation::compute_tax;
/// use advisory_engine::config::TaxConstants;
/// use advisory_engine::models::FamilyComposition;
/// use rust_decimal::Decimal;
///
/// let result = compute_tax(
///     Decimal::from(5000),
///     &FamilyComposition::default(),
///     &TaxConstants::default(),
/// );
///
/// assert_eq!(result.total_deductions, Decimal::from(138));
/// assert_eq!(result.taxable_base, Decimal::from(3529));
/// assert_eq!(result.tax_due, Decimal::from(353));
/// ```
pub fn compute_tax(
    total_assets: Decimal,
    family: &FamilyComposition,
    constants: &TaxConstants,
) -> TaxResult {
    let warnings = family.plausibility_warnings();
    let mut audit_steps = Vec::new();

    let deductions = compute_deductions(family, constants, 1);
    audit_steps.push(deductions.audit_step);

    let exempt_amount = constants.exempt_amount();
    let threshold = exempt_amount + deductions.total;
    let below_threshold = total_assets < threshold;

    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "threshold_check".to_string(),
        rule_name: "Exemption Threshold".to_string(),
        input: serde_json::json!({
            "total_assets": total_assets.to_string(),
            "exempt_amount": exempt_amount.to_string(),
            "total_deductions": deductions.total.to_string()
        }),
        output: serde_json::json!({
            "threshold": threshold.to_string(),
            "below_threshold": below_threshold
        }),
        reasoning: if below_threshold {
            format!(
                "Total assets {} below threshold {}; no tax due",
                total_assets.normalize(),
                threshold.normalize()
            )
        } else {
            format!(
                "Total assets {} at or above threshold {}",
                total_assets.normalize(),
                threshold.normalize()
            )
        },
    });

    if below_threshold {
        debug!(
            total_assets = %total_assets,
            threshold = %threshold,
            "Estate below threshold"
        );
        return TaxResult {
            taxable_base: Decimal::ZERO,
            tax_due: Decimal::ZERO,
            total_deductions: deductions.total,
            exempt_amount,
            deductions: deductions.lines,
            bracket_slices: Vec::new(),
            audit_steps,
            warnings,
        };
    }

    let taxable_base = (total_assets - threshold).max(Decimal::ZERO);
    let progressive = apply_brackets(taxable_base, constants.brackets(), 3);
    let next_step = 3 + progressive.audit_steps.len() as u32;
    audit_steps.extend(progressive.audit_steps);

    let tax_due = progressive
        .tax
        .round_dp_with_strategy(0, TAX_ROUNDING)
        .max(Decimal::ZERO);

    audit_steps.push(AuditStep {
        step_number: next_step,
        rule_id: "tax_rounding".to_string(),
        rule_name: "Whole Unit Rounding".to_string(),
        input: serde_json::json!({
            "unrounded_tax": progressive.tax.to_string()
        }),
        output: serde_json::json!({
            "tax_due": tax_due.to_string()
        }),
        reasoning: format!(
            "{} rounded half away from zero to {}",
            progressive.tax.normalize(),
            tax_due
        ),
    });

    debug!(
        total_assets = %total_assets,
        taxable_base = %taxable_base,
        tax_due = %tax_due,
        brackets_used = progressive.slices.len(),
        "Estate tax computed"
    );

    TaxResult {
        taxable_base,
        tax_due,
        total_deductions: deductions.total,
        exempt_amount,
        deductions: deductions.lines,
        bracket_slices: progressive.slices,
        audit_steps,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawTaxConstants, TaxBracket};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn no_family() -> FamilyComposition {
        FamilyComposition::default()
    }

    fn tax_due(assets: Decimal, family: &FamilyComposition) -> Decimal {
        compute_tax(assets, family, &TaxConstants::default()).tax_due
    }

    #[test]
    fn test_reference_scenario_single_bracket() {
        let result = compute_tax(dec("5000"), &no_family(), &TaxConstants::default());

        assert_eq!(result.total_deductions, dec("138"));
        assert_eq!(result.exempt_amount, dec("1333"));
        assert_eq!(result.taxable_base, dec("3529"));
        assert_eq!(result.tax_due, dec("353"));
        assert_eq!(result.bracket_slices.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_below_threshold_owes_nothing() {
        // threshold = 1333 + 138 = 1471
        let result = compute_tax(dec("1470.99"), &no_family(), &TaxConstants::default());
        assert_eq!(result.tax_due, Decimal::ZERO);
        assert_eq!(result.taxable_base, Decimal::ZERO);
        assert_eq!(result.total_deductions, dec("138"));
        assert!(result.bracket_slices.is_empty());
        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.audit_steps[1].output["below_threshold"], true);
    }

    #[test]
    fn test_exactly_at_threshold_has_zero_base() {
        let result = compute_tax(dec("1471"), &no_family(), &TaxConstants::default());
        assert_eq!(result.taxable_base, Decimal::ZERO);
        assert_eq!(result.tax_due, Decimal::ZERO);
        assert!(result.bracket_slices.is_empty());
    }

    #[test]
    fn test_zero_and_negative_assets() {
        for assets in [dec("0"), dec("-500")] {
            let result = compute_tax(assets, &no_family(), &TaxConstants::default());
            assert_eq!(result.tax_due, Decimal::ZERO);
            assert_eq!(result.taxable_base, Decimal::ZERO);
            assert_eq!(result.total_deductions, dec("138"));
        }
    }

    #[test]
    fn test_spans_three_brackets() {
        // base = 20000 - 1471 = 18529
        // 5621*0.10 + 5621*0.15 + 7287*0.20 = 562.1 + 843.15 + 1457.4 = 2862.65
        let result = compute_tax(dec("20000"), &no_family(), &TaxConstants::default());
        assert_eq!(result.taxable_base, dec("18529"));
        assert_eq!(result.tax_due, dec("2863"));
        assert_eq!(result.bracket_slices.len(), 3);
    }

    #[test]
    fn test_family_deductions_reduce_tax() {
        let family = FamilyComposition {
            has_spouse: true,
            adult_children: 2,
            parents: 2,
            ..no_family()
        };
        let result = compute_tax(dec("5000"), &family, &TaxConstants::default());

        // 138 + 553 + 112 + 276 = 1079; base = 5000 - 1333 - 1079 = 2588
        assert_eq!(result.total_deductions, dec("1079"));
        assert_eq!(result.taxable_base, dec("2588"));
        assert_eq!(result.tax_due, dec("259"));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        let mut raw = RawTaxConstants::from(TaxConstants::default());
        raw.exempt_amount = Decimal::ZERO;
        raw.funeral_expense_deduction = Decimal::ZERO;
        raw.brackets = vec![TaxBracket::unbounded(dec("0.5"))];
        let constants = TaxConstants::new(raw).unwrap();

        // 5 * 0.5 = 2.5 -> 3, 7 * 0.5 = 3.5 -> 4
        assert_eq!(compute_tax(dec("5"), &no_family(), &constants).tax_due, dec("3"));
        assert_eq!(compute_tax(dec("7"), &no_family(), &constants).tax_due, dec("4"));
    }

    #[test]
    fn test_implausible_family_does_not_fail() {
        let family = FamilyComposition {
            parents: 4,
            disabled_dependents: 9,
            adult_children: -2,
            ..no_family()
        };
        let result = compute_tax(dec("50000"), &family, &TaxConstants::default());
        assert!(result.tax_due > Decimal::ZERO);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_audit_steps_are_sequential() {
        let result = compute_tax(dec("12000"), &no_family(), &TaxConstants::default());
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.audit_steps.last().unwrap().rule_id, "tax_rounding");
    }

    #[test]
    fn test_continuity_at_bracket_boundary() {
        // base crosses 5621 at assets = 5621 + 1471 = 7092
        let at = compute_tax(dec("7092"), &no_family(), &TaxConstants::default());
        let above = compute_tax(dec("7092.01"), &no_family(), &TaxConstants::default());
        assert_eq!(at.tax_due, dec("562"));
        assert_eq!(above.tax_due, dec("562"));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_tax_is_monotonic_in_assets(
            a in 0i64..30_000_000,
            delta in 0i64..5_000_000,
            spouse in proptest::bool::ANY,
            children in 0i32..6,
        ) {
            let family = FamilyComposition {
                has_spouse: spouse,
                adult_children: children,
                ..FamilyComposition::default()
            };
            let lower = Decimal::new(a, 2);
            let higher = Decimal::new(a + delta, 2);
            prop_assert!(tax_due(lower, &family) <= tax_due(higher, &family));
        }

        #[test]
        fn prop_below_threshold_is_zero(cents in -1_000_000i64..147_100) {
            let result = compute_tax(Decimal::new(cents, 2), &no_family(), &TaxConstants::default());
            prop_assert_eq!(result.tax_due, Decimal::ZERO);
            prop_assert_eq!(result.taxable_base, Decimal::ZERO);
        }

        #[test]
        fn prop_unrounded_tax_is_continuous(cents in 147_100i64..3_000_000) {
            // A one-cent increase moves the unrounded tax by at most the top rate.
            let constants = TaxConstants::default();
            let at = compute_tax(Decimal::new(cents, 2), &no_family(), &constants);
            let next = compute_tax(Decimal::new(cents + 1, 2), &no_family(), &constants);
            let sum = |r: &TaxResult| r.bracket_slices.iter().map(|s| s.tax).sum::<Decimal>();
            let jump = sum(&next) - sum(&at);
            prop_assert!(jump >= Decimal::ZERO);
            prop_assert!(jump <= Decimal::new(2, 3));
        }

        #[test]
        fn prop_total_deductions_equal_line_sum(
            spouse in proptest::bool::ANY,
            children in -3i32..10,
            parents in -1i32..4,
            disabled in -1i32..4,
            others in -1i32..5,
        ) {
            let family = FamilyComposition {
                has_spouse: spouse,
                adult_children: children,
                parents,
                disabled_dependents: disabled,
                other_dependents: others,
            };
            let result = compute_tax(Decimal::from(8000), &family, &TaxConstants::default());
            let sum: Decimal = result.deductions.iter().map(|l| l.amount).sum();
            prop_assert_eq!(result.total_deductions, sum);
            prop_assert!(result.tax_due >= Decimal::ZERO);
        }
    }
}
