//! Estate tax calculation logic.
//!
//! This module contains the progressive estate tax engine: itemised
//! deductions, the exemption threshold check, marginal bracket integration,
//! whole-unit rounding, and an optional memoising wrapper.

mod deductions;
mod estate_tax;
mod memo;
mod progressive_tax;

pub use deductions::{DeductionResult, compute_deductions};
pub use estate_tax::{TAX_ROUNDING, compute_tax};
pub use memo::{DEFAULT_CACHE_CAPACITY, MemoizedTaxCalculator};
pub use progressive_tax::{ProgressiveTaxResult, apply_brackets};
