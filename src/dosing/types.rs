//! Type definitions for the detergent dosing pipeline.
//!
//! Categories are closed enums so the rule table can be matched exhaustively.
//! They deserialize from lowercase names (for TOML rule files) and the output
//! record serializes to JSON for the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DoseError;

// =============================================================================
// DOMAIN BOUNDS AND THRESHOLDS
// =============================================================================

/// Accepted laundry weight range in kilograms (inclusive).
pub const LAUNDRY_WEIGHT_RANGE: (f64, f64) = (0.0, 8.0);

/// Accepted dirt level range (inclusive).
pub const DIRT_LEVEL_RANGE: (f64, f64) = (1.0, 10.0);

/// Laundry weights below this are `Small`.
pub const MEDIUM_LAUNDRY_KG: f64 = 3.0;

/// Laundry weights at or above this are `Large`.
pub const LARGE_LAUNDRY_KG: f64 = 5.0;

/// Dirt levels at or above this are `High`.
pub const HIGH_DIRT_LEVEL: f64 = 5.0;

/// Powder grams each output category resolves to.
pub const SMALL_POWDER_GRAMS: f64 = 30.0;
pub const MEDIUM_POWDER_GRAMS: f64 = 90.0;
pub const LARGE_POWDER_GRAMS: f64 = 150.0;

// =============================================================================
// CATEGORIES
// =============================================================================

/// A fuzzy quantity. Describes both the laundry load and the powder dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountCategory {
    Small,
    Medium,
    Large,
}

impl AmountCategory {
    pub const ALL: [AmountCategory; 3] = [
        AmountCategory::Small,
        AmountCategory::Medium,
        AmountCategory::Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AmountCategory::Small => "small",
            AmountCategory::Medium => "medium",
            AmountCategory::Large => "large",
        }
    }
}

impl fmt::Display for AmountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AmountCategory {
    type Err = DoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(AmountCategory::Small),
            "medium" => Ok(AmountCategory::Medium),
            "large" => Ok(AmountCategory::Large),
            other => Err(DoseError::Config(format!("Unknown amount category '{}'", other))),
        }
    }
}

/// A fuzzy degree, used for the dirt level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelCategory {
    Low,
    High,
}

impl LevelCategory {
    pub const ALL: [LevelCategory; 2] = [LevelCategory::Low, LevelCategory::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelCategory::Low => "low",
            LevelCategory::High => "high",
        }
    }
}

impl fmt::Display for LevelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LevelCategory {
    type Err = DoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(LevelCategory::Low),
            "high" => Ok(LevelCategory::High),
            other => Err(DoseError::Config(format!("Unknown level category '{}'", other))),
        }
    }
}

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// Washing parameters computed for one laundry load.
///
/// Named fields rather than a bare number so more parameters can be added
/// without breaking callers; construct it through the engine only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[non_exhaustive]
pub struct WashingParameters {
    /// Recommended detergent powder in grams
    pub powder_amount_grams: f64,
}

impl WashingParameters {
    pub(crate) fn new(powder_amount_grams: f64) -> Self {
        Self { powder_amount_grams }
    }

    /// Parameters as `(name, value)` pairs in declaration order.
    pub fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("powder_amount_grams", self.powder_amount_grams)]
    }

    /// Look up a parameter by its field name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.parameters()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}
