//! Dose computation pipeline.
//!
//! `DosingEngine` validates the raw inputs, fuzzifies them, applies its
//! rule table and resolves the result to grams.

use tracing::debug;

use super::fuzzify::{defuzzify, fuzzify_dirty, fuzzify_laundry};
use super::rules::{apply_rules, RuleTable};
use super::types::*;
use crate::error::DoseError;

/// The dose evaluation engine.
#[derive(Debug, Clone, Default)]
pub struct DosingEngine {
    rules: RuleTable,
}

impl DosingEngine {
    /// Create an engine over the given rule table.
    ///
    /// # Arguments
    /// * `rules` - Rule table (typically `RuleTable::default()` or from `load_rules()`)
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Compute washing parameters for one load.
    ///
    /// # Arguments
    /// * `laundry_weight_kg` - Laundry weight, 0.0 to 8.0 inclusive
    /// * `dirt_level` - Dirt level, 1.0 to 10.0 inclusive
    ///
    /// # Returns
    /// * `Ok(WashingParameters)` - The recommended parameters
    /// * `Err(DoseError::InvalidArgument)` - If an input is out of range
    pub fn compute(
        &self,
        laundry_weight_kg: f64,
        dirt_level: f64,
    ) -> Result<WashingParameters, DoseError> {
        evaluate(laundry_weight_kg, dirt_level, |amount, level| {
            self.rules.lookup(amount, level)
        })
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}

/// Compute washing parameters with the built-in expert rules.
pub fn compute_washing_parameters(
    laundry_weight_kg: f64,
    dirt_level: f64,
) -> Result<WashingParameters, DoseError> {
    evaluate(laundry_weight_kg, dirt_level, apply_rules)
}

fn evaluate<F>(
    laundry_weight_kg: f64,
    dirt_level: f64,
    rules: F,
) -> Result<WashingParameters, DoseError>
where
    F: Fn(AmountCategory, LevelCategory) -> Result<AmountCategory, DoseError>,
{
    check_range("laundry_weight_kg", laundry_weight_kg, LAUNDRY_WEIGHT_RANGE)?;
    check_range("dirt_level", dirt_level, DIRT_LEVEL_RANGE)?;

    let amount_in = fuzzify_laundry(laundry_weight_kg);
    let level_in = fuzzify_dirty(dirt_level);
    let amount_out = rules(amount_in, level_in)?;
    let grams = defuzzify(amount_out);

    debug!(
        laundry_weight_kg,
        dirt_level,
        %amount_in,
        %level_in,
        %amount_out,
        grams,
        "Computed powder dose"
    );

    Ok(WashingParameters::new(grams))
}

// NaN fails both comparisons, so it is rejected too.
fn check_range(name: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), DoseError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(DoseError::InvalidArgument {
            name,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dosing::rules::{ExpertRule, RuleTable};

    #[test]
    fn test_rule_table_cases() {
        let cases = [
            (1.0, 1.0, 30.0),
            (4.0, 1.0, 90.0),
            (7.0, 1.0, 90.0),
            (1.0, 9.0, 90.0),
            (4.0, 9.0, 150.0),
            (7.0, 9.0, 150.0),
        ];
        for (weight, dirt, grams) in cases {
            let params = compute_washing_parameters(weight, dirt).unwrap();
            assert_eq!(
                params.powder_amount_grams, grams,
                "weight={}, dirt={}",
                weight, dirt
            );
        }
    }

    #[test]
    fn test_domain_edges_accepted() {
        assert!(compute_washing_parameters(0.0, 1.0).is_ok());
        assert!(compute_washing_parameters(8.0, 10.0).is_ok());
    }

    #[test]
    fn test_weight_out_of_range() {
        for weight in [-0.1, 8.1] {
            match compute_washing_parameters(weight, 5.0) {
                Err(DoseError::InvalidArgument { name, value, .. }) => {
                    assert_eq!(name, "laundry_weight_kg");
                    assert_eq!(value, weight);
                }
                other => panic!("Expected InvalidArgument, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_dirt_out_of_range() {
        for dirt in [0.9, 10.1] {
            match compute_washing_parameters(4.0, dirt) {
                Err(DoseError::InvalidArgument { name, value, .. }) => {
                    assert_eq!(name, "dirt_level");
                    assert_eq!(value, dirt);
                }
                other => panic!("Expected InvalidArgument, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_weight_checked_before_dirt() {
        let err = compute_washing_parameters(9.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("laundry_weight_kg"), "Got: {}", err);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(compute_washing_parameters(f64::NAN, 5.0)
            .unwrap_err()
            .is_invalid_argument());
        assert!(compute_washing_parameters(4.0, f64::NAN)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_engine_default_matches_free_function() {
        let engine = DosingEngine::default();
        for weight in [0.0, 2.5, 3.0, 4.5, 5.0, 8.0] {
            for dirt in [1.0, 4.5, 5.0, 10.0] {
                assert_eq!(
                    engine.compute(weight, dirt).unwrap(),
                    compute_washing_parameters(weight, dirt).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_engine_with_custom_rules() {
        // Every pair resolves to a large dose
        let rules = AmountCategory::ALL
            .iter()
            .flat_map(|&amount| {
                LevelCategory::ALL.iter().map(move |&level| ExpertRule {
                    amount,
                    level,
                    output: AmountCategory::Large,
                })
            })
            .collect();
        let engine = DosingEngine::new(RuleTable::from_rules(rules).unwrap());

        assert_eq!(engine.compute(1.0, 1.0).unwrap().powder_amount_grams, 150.0);
        assert!(engine.compute(-1.0, 1.0).is_err());
    }
}
