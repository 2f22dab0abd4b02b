//! Read-through memoisation of estate tax results.
//!
//! [`MemoizedTaxCalculator`] owns a [`TaxConstants`] table and caches
//! [`compute_tax`] results keyed by the exact input tuple. The cache only
//! ever stores what `compute_tax` returns, so a hit and a miss are
//! indistinguishable to callers.

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxConstants;
use crate::models::{FamilyComposition, TaxResult};

use super::estate_tax::compute_tax;

/// Default number of cached entries before the cache is cleared.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Keyed on the serialised decimal so `5000` and `5000.00` stay distinct;
/// `Decimal`'s own `Eq` treats them as equal but results echo the scale.
type CacheKey = ([u8; 16], FamilyComposition);

/// An estate tax calculator with a bounded, thread-safe result cache.
///
/// # Example
///
/// ```
/// use advisory_engine::calculation::MemoizedTaxCalculator;
/// use advisory_engine::config::TaxConstants;
/// use advisory_engine::models::FamilyComposition;
/// use rust_decimal::Decimal;
///
/// let calculator = MemoizedTaxCalculator::new(TaxConstants::default());
/// let family = FamilyComposition::default();
///
/// let first = calculator.compute(Decimal::from(5000), &family);
/// let second = calculator.compute(Decimal::from(5000), &family);
/// assert_eq!(first, second);
/// assert_eq!(calculator.cached_entries(), 1);
/// ```
#[derive(Debug)]
pub struct MemoizedTaxCalculator {
    constants: TaxConstants,
    capacity: usize,
    cache: RwLock<HashMap<CacheKey, TaxResult>>,
}

impl MemoizedTaxCalculator {
    /// Creates a calculator with the default capacity.
    pub fn new(constants: TaxConstants) -> Self {
        Self::with_capacity(constants, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a calculator that holds at most `capacity` entries.
    ///
    /// A capacity of zero disables caching.
    pub fn with_capacity(constants: TaxConstants, capacity: usize) -> Self {
        Self {
            constants,
            capacity,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The tax constants every computation uses.
    pub fn constants(&self) -> &TaxConstants {
        &self.constants
    }

    /// Computes the tax, reusing a cached result for an identical input.
    ///
    /// Inputs are identical only when their decimal representation matches,
    /// scale included, so a hit always equals a fresh `compute_tax`.
    pub fn compute(&self, total_assets: Decimal, family: &FamilyComposition) -> TaxResult {
        if self.capacity == 0 {
            return compute_tax(total_assets, family, &self.constants);
        }

        let key = (total_assets.serialize(), *family);

        if let Ok(cache) = self.cache.read() {
            if let Some(hit) = cache.get(&key) {
                debug!(total_assets = %total_assets, "Tax cache hit");
                return hit.clone();
            }
        }

        let result = compute_tax(total_assets, family, &self.constants);

        if let Ok(mut cache) = self.cache.write() {
            if cache.len() >= self.capacity {
                debug!(capacity = self.capacity, "Tax cache full, clearing");
                cache.clear();
            }
            cache.insert(key, result.clone());
        }

        result
    }

    /// Number of cached results.
    pub fn cached_entries(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}
