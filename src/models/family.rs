//! Family composition model used by the estate tax calculation.

use serde::{Deserialize, Serialize};

use super::AuditWarning;

/// The maximum number of parents that may be claimed for the parent deduction.
pub const MAX_PARENTS: i32 = 2;

/// The family members of the deceased that qualify for deductions.
///
/// Counts are signed so that implausible caller input can be represented.
/// A negative count contributes nothing to the deduction total, and the
/// plausibility rules in [`FamilyComposition::plausibility_warnings`] report
/// rather than reject it.
///
/// # Example
///
/// ```
/// use advisory_engine::models::FamilyComposition;
///
/// let family = FamilyComposition {
///     has_spouse: true,
///     adult_children: 2,
///     ..FamilyComposition::default()
/// };
/// assert_eq!(family.adult_children_claimed(), 2);
/// assert!(family.plausibility_warnings().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FamilyComposition {
    /// Whether a surviving spouse exists.
    #[serde(default)]
    pub has_spouse: bool,
    /// Number of qualifying lineal descendants.
    #[serde(default)]
    pub adult_children: i32,
    /// Number of surviving parents.
    #[serde(default)]
    pub parents: i32,
    /// Number of dependents with a severe disability.
    #[serde(default)]
    pub disabled_dependents: i32,
    /// Number of other supported dependents (siblings, grandparents).
    #[serde(default)]
    pub other_dependents: i32,
}

impl FamilyComposition {
    /// Number of adult children counted towards the deduction.
    pub fn adult_children_claimed(&self) -> u32 {
        clamp_count(self.adult_children)
    }

    /// Number of parents counted towards the deduction.
    pub fn parents_claimed(&self) -> u32 {
        clamp_count(self.parents)
    }

    /// Number of disabled dependents counted towards the deduction.
    pub fn disabled_dependents_claimed(&self) -> u32 {
        clamp_count(self.disabled_dependents)
    }

    /// Number of other dependents counted towards the deduction.
    pub fn other_dependents_claimed(&self) -> u32 {
        clamp_count(self.other_dependents)
    }

    /// Checks the composition against domain plausibility rules.
    ///
    /// The calculation never fails on these; the returned warnings are
    /// attached to the result instead.
    pub fn plausibility_warnings(&self) -> Vec<AuditWarning> {
        let mut warnings = Vec::new();

        for (field, value) in [
            ("adult_children", self.adult_children),
            ("parents", self.parents),
            ("disabled_dependents", self.disabled_dependents),
            ("other_dependents", self.other_dependents),
        ] {
            if value < 0 {
                warnings.push(AuditWarning::new(
                    "NEGATIVE_COUNT",
                    format!("{} is {}; treated as 0", field, value),
                    "high",
                ));
            }
        }

        if self.parents > MAX_PARENTS {
            warnings.push(AuditWarning::new(
                "PARENTS_OVER_CAP",
                format!(
                    "{} parents declared; at most {} are normally claimable",
                    self.parents, MAX_PARENTS
                ),
                "medium",
            ));
        }

        let eligible = i64::from(self.has_spouse)
            + i64::from(self.adult_children.max(0))
            + i64::from(self.parents.max(0));
        if i64::from(self.disabled_dependents) > eligible {
            warnings.push(AuditWarning::new(
                "DISABLED_EXCEEDS_FAMILY",
                format!(
                    "{} disabled dependents declared but only {} spouse/children/parents",
                    self.disabled_dependents, eligible
                ),
                "medium",
            ));
        }

        warnings
    }
}

fn clamp_count(count: i32) -> u32 {
    u32::try_from(count).unwrap_or(0)
}
