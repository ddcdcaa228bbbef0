//! Fuzzy-rule detergent dosing.
//!
//! Turns a laundry weight and a dirt level into a powder dose in three steps:
//!
//! - **Fuzzification**: each number is cut into a category (small/medium/large, low/high)
//! - **Rules**: an expert table maps the category pair to a powder amount category
//! - **Defuzzification**: the powder category resolves to a fixed gram value
//!
//! # Example
//!
//! ```
//! use laundry_dose::dosing::compute_washing_parameters;
//!
//! let params = compute_washing_parameters(4.0, 9.0).unwrap();
//! assert_eq!(params.powder_amount_grams, 150.0);
//! ```

mod engine;
mod fuzzify;
mod rules;
mod types;

pub use engine::{compute_washing_parameters, DosingEngine};
pub use fuzzify::{defuzzify, fuzzify_dirty, fuzzify_laundry};
pub use rules::{apply_rules, expert_rule, load_rules, parse_rules, ExpertRule, RuleTable};
pub use types::*;
