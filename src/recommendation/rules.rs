//! The strategy rule table.
//!
//! Each [`StrategyCandidate`] pairs a declarative [`Trigger`] with the text
//! it contributes when it fires. The table is ordered; order is priority.
//! Goal keywords are stored in normalised form (see
//! [`normalize_goal`](crate::models::normalize_goal)).

use rust_decimal::Decimal;

use crate::models::{BudgetTier, ClientProfile, Recommendation};

use super::format::format_amount;

/// Goals served by accumulation and wealth-transfer policies.
pub const WEALTH_GOALS: &[&str] = &[
    "legacy-transfer",
    "asset-allocation",
    "cash-flow",
    "tax-source",
    "business-owner",
    "family",
];

/// Goals served by retirement annuities.
pub const RETIREMENT_GOALS: &[&str] = &["retirement", "annuity", "cash-flow"];

/// Goals served by policy financing and asset protection.
pub const ASSET_PROTECTION_GOALS: &[&str] = &[
    "business",
    "business-owner",
    "equity",
    "real-estate",
    "tax-source",
    "debt",
];

/// Goals served by education funding.
pub const EDUCATION_GOALS: &[&str] = &["education", "children", "tuition"];

/// Goals served by long-term care cover.
pub const LONG_TERM_CARE_GOALS: &[&str] = &["long-term-care"];

/// Goals served by the medical protection base module.
pub const MEDICAL_GOALS: &[&str] = &["medical", "long-term-care", "protection", "family-protection"];

/// Goals served by the foundational life base module.
pub const LIFE_GOALS: &[&str] = &["protection", "family-protection", "tax-source", "legacy-transfer"];

/// Age from which long-term care cover is suggested regardless of goals.
pub const LONG_TERM_CARE_AGE: u32 = 60;

/// Phrase describing front-loaded contributions; only used for multi-year plans.
pub const FRONT_LOADED_PHRASE: &str = "front-load additional coverage in the first 3-5 years";

/// When a candidate fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Any goal matches.
    Goals(&'static [&'static str]),
    /// Any goal matches and the tier is high (`true`) or not high (`false`).
    GoalsAtTier {
        /// Goal keywords.
        goals: &'static [&'static str],
        /// Whether the candidate is the Advanced/Premium variant.
        high_tier: bool,
    },
    /// Any goal matches, or the client is at least `min_age`.
    GoalsOrMinAge {
        /// Goal keywords.
        goals: &'static [&'static str],
        /// Minimum age that fires the candidate on its own.
        min_age: u32,
    },
    /// The tier is one of the listed tiers, regardless of goals.
    Tiers(&'static [BudgetTier]),
}

impl Trigger {
    /// Evaluates the trigger for a profile and its classified tier.
    pub fn fires(&self, profile: &ClientProfile, tier: BudgetTier) -> bool {
        match *self {
            Trigger::Goals(goals) => profile.has_any_goal(goals),
            Trigger::GoalsAtTier { goals, high_tier } => {
                profile.has_any_goal(goals) && tier.is_high() == high_tier
            }
            Trigger::GoalsOrMinAge { goals, min_age } => {
                profile.age >= min_age || profile.has_any_goal(goals)
            }
            Trigger::Tiers(tiers) => tiers.contains(&tier),
        }
    }
}

/// An audience tag, resolved against the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// The client's gender label, skipped when blank.
    Gender,
    /// The client's age band label.
    AgeBand,
    /// The budget tier label.
    BudgetTier,
    /// A fixed label.
    Fixed(&'static str),
}

/// Values available to description templates.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    /// The client profile.
    pub profile: &'a ClientProfile,
    /// The classified tier.
    pub tier: BudgetTier,
}

impl TemplateContext<'_> {
    /// Formats an amount in the profile's own currency.
    pub fn amount(&self, amount: Decimal) -> String {
        format_amount(amount, self.profile.budget_currency)
    }

    /// `single-premium` for one payment, otherwise `N-year`.
    pub fn payment_term(&self) -> String {
        match self.profile.pay_years {
            0 | 1 => "single-premium".to_string(),
            years => format!("{}-year", years),
        }
    }

    /// `", <front-loaded phrase>"` for plans of two or more years, empty otherwise.
    pub fn front_loaded_clause(&self) -> String {
        if self.profile.pay_years >= 2 {
            format!(", {}", FRONT_LOADED_PHRASE)
        } else {
            String::new()
        }
    }
}

/// A named entry in the rule table.
#[derive(Debug, Clone, Copy)]
pub struct StrategyCandidate {
    /// Unique strategy name.
    pub name: &'static str,
    /// When the candidate fires.
    pub trigger: Trigger,
    /// Why the strategy fits.
    pub rationale: &'static str,
    /// Audience tags in display order.
    pub audience: &'static [Audience],
    /// Builds the concrete description.
    pub description: fn(&TemplateContext<'_>) -> String,
}

impl StrategyCandidate {
    /// Resolves the candidate into a concrete recommendation.
    pub fn resolve(&self, ctx: &TemplateContext<'_>) -> Recommendation {
        let audience_tags = self
            .audience
            .iter()
            .filter_map(|audience| match audience {
                Audience::Gender => {
                    let gender = ctx.profile.gender.trim();
                    (!gender.is_empty()).then(|| gender.to_string())
                }
                Audience::AgeBand => Some(ctx.profile.age_band().label().to_string()),
                Audience::BudgetTier => Some(ctx.tier.label().to_string()),
                Audience::Fixed(label) => Some(label.to_string()),
            })
            .collect();

        Recommendation {
            name: self.name.to_string(),
            rationale: self.rationale.to_string(),
            audience_tags,
            description: (self.description)(ctx),
        }
    }
}

/// Name of the high cash-value accumulation candidate.
pub const HIGH_CASH_VALUE: &str = "High Cash-Value Increasing Whole Life";
/// Name of the participating whole life candidate.
pub const PARTICIPATING: &str = "Participating Whole Life (Steady)";
/// Name of the retirement annuity candidate.
pub const RETIREMENT_ANNUITY: &str = "Annuity / Variable Annuity (Retirement Cash Flow)";
/// Name of the policy financing candidate.
pub const ASSET_PROTECTION: &str = "Policy Financing / Asset Protection (Business Owners)";
/// Name of the education fund candidate.
pub const EDUCATION_FUND: &str = "Education Fund Policy (Increasing / Annuity)";
/// Name of the entry combo candidate.
pub const ENTRY_COMBO: &str = "Short-Term Term Life + Medical Rider (Entry Combo)";
/// Name of the long-term care candidate.
pub const LONG_TERM_CARE: &str = "Long-Term Care / Disability Income Protection";
/// Name of the medical base module.
pub const MEDICAL_MODULE: &str = "Medical / Long-Term Care Protection Module";
/// Name of the foundational life base module.
pub const LIFE_MODULE: &str = "Foundational Life Module (Term / Whole Life)";
/// Name of the fallback candidate.
pub const FOUNDATIONAL_FALLBACK: &str = "Foundational Protection + Starter Increasing Whole Life";

/// Reserve, in the profile currency, suggested for the medical module.
const MEDICAL_RESERVE_CAP: i64 = 100;

/// The default rule table, in priority order.
pub static DEFAULT_CANDIDATES: &[StrategyCandidate] = &[
    StrategyCandidate {
        name: HIGH_CASH_VALUE,
        trigger: Trigger::GoalsAtTier {
            goals: WEALTH_GOALS,
            high_tier: true,
        },
        rationale: "Steadily builds policy cash value, enabling policy loans and efficient \
                    wealth transfer; can serve as a tax-source reserve or a business succession fund.",
        audience: &[Audience::Gender, Audience::AgeBand, Audience::BudgetTier],
        description: describe_high_cash_value,
    },
    StrategyCandidate {
        name: PARTICIPATING,
        trigger: Trigger::GoalsAtTier {
            goals: WEALTH_GOALS,
            high_tier: false,
        },
        rationale: "Balances protection with dividends at a lower premium; suits a first \
                    policy or building up gradually.",
        audience: &[Audience::AgeBand, Audience::BudgetTier],
        description: describe_participating,
    },
    StrategyCandidate {
        name: RETIREMENT_ANNUITY,
        trigger: Trigger::Goals(RETIREMENT_GOALS),
        rationale: "Turns a lump sum into lifelong cash flow, reducing longevity risk and \
                    pressure from market swings.",
        audience: &[Audience::AgeBand, Audience::Fixed("Cash-flow oriented")],
        description: describe_retirement_annuity,
    },
    StrategyCandidate {
        name: ASSET_PROTECTION,
        trigger: Trigger::Goals(ASSET_PROTECTION_GOALS),
        rationale: "Policy cash value acts as standby capital; when a tax bill or a short-term \
                    liquidity gap arrives, a low-cost policy loan avoids forced asset sales.",
        audience: &[
            Audience::Fixed("Business owners"),
            Audience::Fixed("High net worth"),
            Audience::BudgetTier,
        ],
        description: describe_asset_protection,
    },
    StrategyCandidate {
        name: EDUCATION_FUND,
        trigger: Trigger::Goals(EDUCATION_GOALS),
        rationale: "Turns large future expenses such as tuition or study abroad into \
                    predictable cash flow.",
        audience: &[Audience::Fixed("Parents"), Audience::AgeBand],
        description: describe_education_fund,
    },
    StrategyCandidate {
        name: ENTRY_COMBO,
        trigger: Trigger::Tiers(&[BudgetTier::Entry, BudgetTier::Standard]),
        rationale: "With a limited budget, complete basic protection at the lowest cost \
                    first, then upgrade step by step.",
        audience: &[Audience::AgeBand, Audience::BudgetTier],
        description: describe_entry_combo,
    },
    StrategyCandidate {
        name: LONG_TERM_CARE,
        trigger: Trigger::GoalsOrMinAge {
            goals: LONG_TERM_CARE_GOALS,
            min_age: LONG_TERM_CARE_AGE,
        },
        rationale: "Provides long-term cash flow against late-life risks and care costs.",
        audience: &[Audience::Fixed("Mature clients / Seniors")],
        description: describe_long_term_care,
    },
    // Base modules, filling coverage gaps left by the goal-specific entries.
    StrategyCandidate {
        name: MEDICAL_MODULE,
        trigger: Trigger::Goals(MEDICAL_GOALS),
        rationale: "Major medical and long-term care costs are the main threat to household \
                    cash flow; fill the protection floor first.",
        audience: &[
            Audience::Gender,
            Audience::AgeBand,
            Audience::Fixed("Risk-sensitive"),
        ],
        description: describe_medical_module,
    },
    StrategyCandidate {
        name: LIFE_MODULE,
        trigger: Trigger::Goals(LIFE_GOALS),
        rationale: "Builds the just-in-case sum assured in the most efficient way, securing \
                    the baseline for family and business.",
        audience: &[Audience::AgeBand, Audience::Fixed("Family providers")],
        description: describe_life_module,
    },
];

/// The candidate appended when nothing else fires.
pub static FALLBACK_CANDIDATE: StrategyCandidate = StrategyCandidate {
    name: FOUNDATIONAL_FALLBACK,
    trigger: Trigger::Goals(&[]),
    rationale: "Start from basic protection while building a small increasing whole life \
                policy as an asset bucket.",
    audience: &[Audience::AgeBand],
    description: describe_fallback,
};

fn describe_high_cash_value(ctx: &TemplateContext<'_>) -> String {
    format!(
        "Design an increasing-benefit structure on a {} payment plan{}; in later years, \
         policy loans can fund liquidity needs or be held back as a tax source.",
        ctx.payment_term(),
        ctx.front_loaded_clause()
    )
}

fn describe_participating(ctx: &TemplateContext<'_>) -> String {
    format!(
        "Mainly a {} payment plan; add top-ups or extra coverage as the budget grows.",
        ctx.payment_term()
    )
}

fn describe_retirement_annuity(ctx: &TemplateContext<'_>) -> String {
    let bucket = ctx
        .profile
        .budget_amount
        .saturating_sub(Decimal::from(MEDICAL_RESERVE_CAP))
        .max(Decimal::ZERO);
    format!(
        "Build on a guaranteed annuity with a bonus mechanism; if volatility is acceptable, \
         pair it with an investment-linked annuity for more upside. Reserve {} for the annuity bucket.",
        ctx.amount(bucket)
    )
}

fn describe_asset_protection(_ctx: &TemplateContext<'_>) -> String {
    "Shape the policy cash-value curve to reserve a tax source; plan loan-to-value and \
     rate ranges around bank financing terms, adding a trust or policy-loan facility where needed."
        .to_string()
}

fn describe_education_fund(_ctx: &TemplateContext<'_>) -> String {
    "Layer increasing whole life or annuity payouts over time with set withdrawal dates and \
     amounts; adjust coverage and premium as the children progress through school."
        .to_string()
}

fn describe_entry_combo(ctx: &TemplateContext<'_>) -> String {
    format!(
        "Term life on a {} payment plan with actual-expense medical reimbursement. \
         Convert to increasing whole life once the budget grows.",
        ctx.payment_term()
    )
}

fn describe_long_term_care(_ctx: &TemplateContext<'_>) -> String {
    "Long-term care daily benefit plus disability support with premium waiver, paired with \
     a retirement annuity for greater resilience."
        .to_string()
}

fn describe_medical_module(ctx: &TemplateContext<'_>) -> String {
    let reserve = ctx.profile.budget_amount.min(Decimal::from(MEDICAL_RESERVE_CAP));
    format!(
        "Centre on actual-expense medical reimbursement plus a long-term care daily benefit; \
         larger budgets can add critical illness or disability support. Reserve {} for the \
         protection module first.",
        ctx.amount(reserve)
    )
}

fn describe_life_module(ctx: &TemplateContext<'_>) -> String {
    format!(
        "Use term life to amplify cover during young or indebted years; asset-rich clients \
         use whole life as the legacy foundation. {} payment plan; the sum assured follows \
         cash flow and liabilities.",
        capitalize(&ctx.payment_term())
    )
}

fn describe_fallback(ctx: &TemplateContext<'_>) -> String {
    format!(
        "Budget {}; allocate 70% to foundational protection and 30% to increasing whole life.",
        ctx.amount(ctx.profile.budget_amount)
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use crate::recommendation::format_grouped;
    use std::collections::HashSet;

    fn profile(age: u32, budget: i64, pay_years: u32, goals: &[&str]) -> ClientProfile {
        ClientProfile {
            age,
            gender: "female".to_string(),
            budget_amount: Decimal::from(budget),
            budget_currency: Currency::Twd,
            pay_years,
            goals: goals.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn ctx(profile: &ClientProfile, tier: BudgetTier) -> TemplateContext<'_> {
        TemplateContext { profile, tier }
    }

    fn candidate(name: &str) -> &'static StrategyCandidate {
        DEFAULT_CANDIDATES.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_candidate_names_are_unique() {
        let names: HashSet<_> = DEFAULT_CANDIDATES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), DEFAULT_CANDIDATES.len());
        assert!(!names.contains(FOUNDATIONAL_FALLBACK));
    }

    #[test]
    fn test_keywords_are_normalised() {
        for goals in [
            WEALTH_GOALS,
            RETIREMENT_GOALS,
            ASSET_PROTECTION_GOALS,
            EDUCATION_GOALS,
            LONG_TERM_CARE_GOALS,
            MEDICAL_GOALS,
            LIFE_GOALS,
        ] {
            for keyword in goals {
                assert_eq!(crate::models::normalize_goal(keyword), *keyword);
            }
        }
    }

    #[test]
    fn test_wealth_branch_is_exclusive() {
        let p = profile(45, 500, 10, &["family"]);
        for tier in [
            BudgetTier::Entry,
            BudgetTier::Standard,
            BudgetTier::Advanced,
            BudgetTier::Premium,
        ] {
            let high = candidate(HIGH_CASH_VALUE).trigger.fires(&p, tier);
            let low = candidate(PARTICIPATING).trigger.fires(&p, tier);
            assert!(high ^ low, "exactly one variant fires at {:?}", tier);
            assert_eq!(high, tier.is_high());
        }
    }

    #[test]
    fn test_wealth_branch_requires_goal() {
        let p = profile(45, 500, 10, &["education"]);
        assert!(!candidate(HIGH_CASH_VALUE).trigger.fires(&p, BudgetTier::Premium));
        assert!(!candidate(PARTICIPATING).trigger.fires(&p, BudgetTier::Entry));
    }

    #[test]
    fn test_long_term_care_fires_on_age_or_goal() {
        let trigger = candidate(LONG_TERM_CARE).trigger;
        assert!(trigger.fires(&profile(60, 500, 10, &[]), BudgetTier::Advanced));
        assert!(!trigger.fires(&profile(59, 500, 10, &[]), BudgetTier::Advanced));
        assert!(trigger.fires(&profile(30, 500, 10, &["long-term-care"]), BudgetTier::Advanced));
    }

    #[test]
    fn test_entry_combo_is_tier_only() {
        let trigger = candidate(ENTRY_COMBO).trigger;
        let p = profile(40, 50, 10, &[]);
        assert!(trigger.fires(&p, BudgetTier::Entry));
        assert!(trigger.fires(&p, BudgetTier::Standard));
        assert!(!trigger.fires(&p, BudgetTier::Advanced));
        assert!(!trigger.fires(&p, BudgetTier::Premium));
    }

    #[test]
    fn test_front_loaded_phrase_depends_on_pay_years() {
        let multi = profile(45, 1200, 2, &["legacy-transfer"]);
        let single = profile(45, 1200, 1, &["legacy-transfer"]);
        let c = candidate(HIGH_CASH_VALUE);

        let multi_text = c.resolve(&ctx(&multi, BudgetTier::Premium)).description;
        let single_text = c.resolve(&ctx(&single, BudgetTier::Premium)).description;

        assert!(multi_text.contains(FRONT_LOADED_PHRASE));
        assert!(multi_text.contains("2-year payment plan"));
        assert!(!single_text.contains(FRONT_LOADED_PHRASE));
        assert!(single_text.contains("single-premium payment plan"));
    }

    #[test]
    fn test_audience_tags_resolved() {
        let p = profile(45, 1200, 10, &["legacy-transfer"]);
        let rec = candidate(HIGH_CASH_VALUE).resolve(&ctx(&p, BudgetTier::Premium));
        assert_eq!(
            rec.audience_tags,
            vec!["female", "Prime earners", "Premium budget"]
        );
    }

    #[test]
    fn test_blank_gender_is_skipped() {
        let mut p = profile(45, 1200, 10, &[]);
        p.gender = "  ".to_string();
        let rec = candidate(HIGH_CASH_VALUE).resolve(&ctx(&p, BudgetTier::Premium));
        assert_eq!(rec.audience_tags, vec!["Prime earners", "Premium budget"]);
    }

    #[test]
    fn test_medical_reserve_is_capped() {
        let rich = profile(45, 1500, 10, &["medical"]);
        let text = candidate(MEDICAL_MODULE)
            .resolve(&ctx(&rich, BudgetTier::Premium))
            .description;
        assert!(text.contains("Reserve NT$100 ×10k (budget)"));

        let modest = profile(45, 40, 10, &["medical"]);
        let text = candidate(MEDICAL_MODULE)
            .resolve(&ctx(&modest, BudgetTier::Entry))
            .description;
        assert!(text.contains("Reserve NT$40 ×10k (budget)"));
    }

    #[test]
    fn test_annuity_bucket_never_negative() {
        let p = profile(50, 60, 10, &["retirement"]);
        let text = candidate(RETIREMENT_ANNUITY)
            .resolve(&ctx(&p, BudgetTier::Entry))
            .description;
        assert!(text.contains("Reserve NT$0 ×10k (budget)"));

        let p = profile(50, 1300, 10, &["retirement"]);
        let text = candidate(RETIREMENT_ANNUITY)
            .resolve(&ctx(&p, BudgetTier::Premium))
            .description;
        assert!(text.contains("Reserve NT$1,200 ×10k (budget)"));
    }

    #[test]
    fn test_annuity_bucket_at_decimal_extremes() {
        let mut p = profile(50, 0, 10, &["retirement"]);
        p.budget_amount = Decimal::MIN;
        let text = candidate(RETIREMENT_ANNUITY)
            .resolve(&ctx(&p, BudgetTier::Entry))
            .description;
        assert!(text.contains("Reserve NT$0 ×10k (budget)"));

        p.budget_amount = Decimal::MAX;
        let text = candidate(RETIREMENT_ANNUITY)
            .resolve(&ctx(&p, BudgetTier::Premium))
            .description;
        assert!(text.contains(&format_grouped(Decimal::MAX - Decimal::from(100))));
    }

    #[test]
    fn test_usd_amounts_use_usd_symbol() {
        let mut p = profile(45, 30, 10, &[]);
        p.budget_currency = Currency::Usd;
        let text = FALLBACK_CANDIDATE
            .resolve(&ctx(&p, BudgetTier::Advanced))
            .description;
        assert!(text.starts_with("Budget US$30 ×10k (budget)"));
    }

    #[test]
    fn test_life_module_capitalises_term() {
        let p = profile(45, 300, 1, &["protection"]);
        let text = candidate(LIFE_MODULE)
            .resolve(&ctx(&p, BudgetTier::Advanced))
            .description;
        assert!(text.contains("Single-premium payment plan"));
    }
}
