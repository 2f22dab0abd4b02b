//! Core data models for the advisory engine.
//!
//! This module contains the value types consumed and produced by the estate
//! tax calculator and the strategy recommendation engine.

mod audit;
mod family;
mod profile;
mod recommendation;
mod tax_result;

pub use audit::{AuditStep, AuditWarning};
pub use family::{FamilyComposition, MAX_PARENTS};
pub use profile::{AgeBand, BudgetTier, ClientProfile, Currency, normalize_goal};
pub use recommendation::{Recommendation, RecommendationResult};
pub use tax_result::{BracketSlice, DeductionCategory, DeductionLine, TaxResult};
