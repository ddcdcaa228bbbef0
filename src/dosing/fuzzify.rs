//! Conversions between raw numbers and fuzzy categories.
//!
//! Thresholds are hard cuts, lower bound inclusive. None of these functions
//! check the input domain; that happens in the engine.

use super::types::*;

/// Classify a laundry weight in kilograms.
pub fn fuzzify_laundry(weight_kg: f64) -> AmountCategory {
    if weight_kg < MEDIUM_LAUNDRY_KG {
        AmountCategory::Small
    } else if weight_kg < LARGE_LAUNDRY_KG {
        AmountCategory::Medium
    } else {
        AmountCategory::Large
    }
}

/// Classify a dirt level.
pub fn fuzzify_dirty(level: f64) -> LevelCategory {
    if level < HIGH_DIRT_LEVEL {
        LevelCategory::Low
    } else {
        LevelCategory::High
    }
}

/// Resolve a powder amount category to grams.
pub fn defuzzify(amount: AmountCategory) -> f64 {
    match amount {
        AmountCategory::Small => SMALL_POWDER_GRAMS,
        AmountCategory::Medium => MEDIUM_POWDER_GRAMS,
        AmountCategory::Large => LARGE_POWDER_GRAMS,
    }
}
