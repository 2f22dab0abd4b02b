//! Insurance strategy recommendation.
//!
//! Budgets are normalised into reference units, classified into a tier, and
//! evaluated against an ordered rule table. Each rule that fires contributes
//! one named strategy with its description resolved from the profile.

mod currency;
mod engine;
mod format;
pub mod rules;
mod tier;

pub use currency::{CurrencyNormalizer, to_reference_units};
pub use engine::StrategyEngine;
pub use format::{TEN_THOUSAND_SUFFIX, format_amount, format_budget_display, format_grouped};
pub use rules::{
    Audience, DEFAULT_CANDIDATES, FALLBACK_CANDIDATE, FRONT_LOADED_PHRASE, StrategyCandidate,
    TemplateContext, Trigger,
};
pub use tier::classify;
