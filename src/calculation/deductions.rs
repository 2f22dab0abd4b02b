//! Deduction calculation functionality.
//!
//! This module itemises the per-person deductions that are subtracted from
//! the estate, on top of the blanket exemption, before the bracket schedule
//! is applied.

use rust_decimal::Decimal;

use crate::config::TaxConstants;
use crate::models::{AuditStep, DeductionCategory, DeductionLine, FamilyComposition};

/// The result of computing deductions, including the itemised lines and audit step.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// One line per category, in a fixed order.
    pub lines: Vec<DeductionLine>,
    /// Sum of all line amounts.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the deductions a family composition qualifies for.
///
/// The funeral expense deduction is always applied; the spouse deduction
/// once if a spouse survives; every other category per claimed person.
/// Negative counts are treated as zero.
///
/// # Arguments
///
/// * `family` - The surviving family composition
/// * `constants` - The validated tax constants
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use advisory_engine::calculation::compute_deductions;
/// use advisory_engine::config::TaxConstants;
/// use advisory_engine::models::FamilyComposition;
/// use rust_decimal::Decimal;
///
/// let family = FamilyComposition {
///     has_spouse: true,
///     adult_children: 2,
///     ..FamilyComposition::default()
/// };
/// let result = compute_deductions(&family, &TaxConstants::default(), 1);
///
/// // 138 funeral + 553 spouse + 2 * 56 children
/// assert_eq!(result.total, Decimal::from(803));
/// ```
pub fn compute_deductions(
    family: &FamilyComposition,
    constants: &TaxConstants,
    step_number: u32,
) -> DeductionResult {
    let lines = vec![
        line(
            DeductionCategory::FuneralExpense,
            1,
            constants.funeral_expense_deduction(),
        ),
        line(
            DeductionCategory::Spouse,
            u32::from(family.has_spouse),
            constants.spouse_deduction(),
        ),
        line(
            DeductionCategory::AdultChild,
            family.adult_children_claimed(),
            constants.adult_child_deduction(),
        ),
        line(
            DeductionCategory::Parent,
            family.parents_claimed(),
            constants.parent_deduction(),
        ),
        line(
            DeductionCategory::DisabledPerson,
            family.disabled_dependents_claimed(),
            constants.disabled_person_deduction(),
        ),
        line(
            DeductionCategory::OtherDependent,
            family.other_dependents_claimed(),
            constants.other_dependent_deduction(),
        ),
    ];

    let total: Decimal = lines.iter().map(|l| l.amount).sum();

    let reasoning = lines
        .iter()
        .filter(|l| l.count > 0)
        .map(|l| {
            if l.count == 1 {
                format!("{:?} {}", l.category, l.amount.normalize())
            } else {
                format!(
                    "{:?} {} × {} = {}",
                    l.category,
                    l.count,
                    l.unit_amount.normalize(),
                    l.amount.normalize()
                )
            }
        })
        .collect::<Vec<_>>()
        .join(" + ");

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Deduction Total".to_string(),
        input: serde_json::json!({
            "has_spouse": family.has_spouse,
            "adult_children": family.adult_children,
            "parents": family.parents,
            "disabled_dependents": family.disabled_dependents,
            "other_dependents": family.other_dependents
        }),
        output: serde_json::json!({
            "total_deductions": total.to_string()
        }),
        reasoning: format!("{} = {}", reasoning, total.normalize()),
    };

    DeductionResult {
        lines,
        total,
        audit_step,
    }
}

fn line(category: DeductionCategory, count: u32, unit_amount: Decimal) -> DeductionLine {
    DeductionLine {
        category,
        count,
        unit_amount,
        amount: unit_amount * Decimal::from(count),
    }
}
