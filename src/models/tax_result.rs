//! Estate tax result models.
//!
//! This module contains the [`TaxResult`] type and the itemised structures
//! that explain how it was derived: per-category deduction lines, the taxed
//! slice of each bracket, audit steps and plausibility warnings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, AuditWarning};

/// The category of a deduction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    /// Flat funeral expense deduction, always applied.
    FuneralExpense,
    /// Surviving spouse deduction.
    Spouse,
    /// Per qualifying lineal descendant.
    AdultChild,
    /// Per surviving parent.
    Parent,
    /// Per dependent with a severe disability.
    DisabledPerson,
    /// Per other supported dependent.
    OtherDependent,
}

/// A single itemised deduction.
///
/// # Example
///
/// ```
/// use advisory_engine::models::{DeductionCategory, DeductionLine};
/// use rust_decimal::Decimal;
///
/// let line = DeductionLine {
///     category: DeductionCategory::AdultChild,
///     count: 2,
///     unit_amount: Decimal::from(56),
///     amount: Decimal::from(112),
/// };
/// assert_eq!(line.amount, line.unit_amount * Decimal::from(line.count));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The deduction category.
    pub category: DeductionCategory,
    /// How many times the unit amount applies (0 when not applicable).
    pub count: u32,
    /// The configured amount per unit.
    pub unit_amount: Decimal,
    /// `count * unit_amount`.
    pub amount: Decimal,
}

/// The part of the taxable base that fell into one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    /// Lower edge of the bracket (exclusive).
    pub lower_bound: Decimal,
    /// Upper edge of the bracket, `None` for the unbounded top bracket.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied to this slice.
    pub rate: Decimal,
    /// Amount of the taxable base inside this bracket.
    pub taxed_amount: Decimal,
    /// `taxed_amount * rate`, unrounded.
    pub tax: Decimal,
}

/// The result of an estate tax computation.
///
/// All amounts share the unit of the input assets and the tax constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Net taxable estate after exemption and deductions (never negative).
    pub taxable_base: Decimal,
    /// Tax due, rounded to a whole unit (never negative).
    pub tax_due: Decimal,
    /// Sum of all deduction lines, excluding the exemption.
    pub total_deductions: Decimal,
    /// The blanket exemption that was applied.
    pub exempt_amount: Decimal,
    /// Itemised deductions in a fixed category order.
    pub deductions: Vec<DeductionLine>,
    /// Taxed slices in ascending bracket order; empty below the threshold.
    pub bracket_slices: Vec<BracketSlice>,
    /// Decisions taken during the computation.
    pub audit_steps: Vec<AuditStep>,
    /// Plausibility warnings about the family composition.
    pub warnings: Vec<AuditWarning>,
}

impl TaxResult {
    /// Returns true if no tax is owed.
    pub fn is_exempt(&self) -> bool {
        self.tax_due.is_zero()
    }

    /// Effective tax rate over the taxable base, or zero when nothing is taxable.
    pub fn effective_rate(&self) -> Decimal {
        if self.taxable_base.is_zero() {
            Decimal::ZERO
        } else {
            self.tax_due / self.taxable_base
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

    fn sample_result(taxable_base: &str, tax_due: &str) -> TaxResult {
        TaxResult {
            taxable_base: dec(taxable_base),
            tax_due: dec(tax_due),
            total_deductions: dec("138"),
            exempt_amount: dec("1333"),
            deductions: vec![],
            bracket_slices: vec![],
            audit_steps: vec![],
            warnings: vec![],
        }
    }

    #[test]
    fn test_deduction_category_serialization() {
        let json = serde_json::to_string(&DeductionCategory::FuneralExpense).unwrap();
        assert_eq!(json, "\"funeral_expense\"");

        let category: DeductionCategory = serde_json::from_str("\"disabled_person\"").unwrap();
        assert_eq!(category, DeductionCategory::DisabledPerson);
    }

    #[test]
    fn test_effective_rate() {
        let result = sample_result("3529", "353");
        assert_eq!(result.effective_rate(), dec("353") / dec("3529"));
        assert!(!result.is_exempt());
    }

    #[test]
    fn test_effective_rate_zero_base() {
        let result = sample_result("0", "0");
        assert_eq!(result.effective_rate(), Decimal::ZERO);
        assert!(result.is_exempt());
    }

    #[test]
    fn test_unbounded_slice_serializes_null_upper_bound() {
        let slice = BracketSlice {
            lower_bound: dec("11242"),
            upper_bound: None,
            rate: dec("0.20"),
            taxed_amount: dec("100"),
            tax: dec("20.00"),
        };
        let json = serde_json::to_string(&slice).unwrap();
        assert!(json.contains("\"upper_bound\":null"));
        assert!(json.contains("\"rate\":\"0.20\""));
    }
}
