//! Expert rule table: (laundry amount, dirt level) -> powder amount.
//!
//! The built-in table is an exhaustive `match`, so the compiler proves it
//! covers every pair. Custom tables can be loaded from TOML:
//!
//! ```toml
//! [[rules]]
//! amount = "small"
//! level = "low"
//! output = "small"
//! ```
//!
//! Loaded tables are rejected unless every pair appears exactly once.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use super::types::{AmountCategory, LevelCategory};
use crate::error::DoseError;

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExpertRule {
    /// Fuzzified laundry amount
    pub amount: AmountCategory,
    /// Fuzzified dirt level
    pub level: LevelCategory,
    /// Resulting powder amount
    pub output: AmountCategory,
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    rules: Vec<ExpertRule>,
}

/// The built-in expert rules.
pub const fn expert_rule(amount: AmountCategory, level: LevelCategory) -> AmountCategory {
    use AmountCategory::*;
    use LevelCategory::*;

    match (amount, level) {
        (Small, Low) => Small,
        (Medium, Low) => Medium,
        (Large, Low) => Medium,
        (Small, High) => Medium,
        (Medium, High) => Large,
        (Large, High) => Large,
    }
}

/// A validated, total rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<ExpertRule>,
}

impl RuleTable {
    /// Build a table from rows, checking that every pair is covered exactly once.
    pub fn from_rules(rules: Vec<ExpertRule>) -> Result<Self, DoseError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert((rule.amount, rule.level)) {
                return Err(DoseError::Config(format!(
                    "Duplicate rule for (amount = {}, level = {})",
                    rule.amount, rule.level
                )));
            }
        }

        for amount in AmountCategory::ALL {
            for level in LevelCategory::ALL {
                if !seen.contains(&(amount, level)) {
                    return Err(DoseError::Config(format!(
                        "Missing rule for (amount = {}, level = {})",
                        amount, level
                    )));
                }
            }
        }

        Ok(Self { rules })
    }

    /// The process-wide built-in table.
    pub fn expert() -> &'static RuleTable {
        static EXPERT: OnceLock<RuleTable> = OnceLock::new();
        EXPERT.get_or_init(|| {
            let rules = AmountCategory::ALL
                .iter()
                .flat_map(|&amount| {
                    LevelCategory::ALL.iter().map(move |&level| ExpertRule {
                        amount,
                        level,
                        output: expert_rule(amount, level),
                    })
                })
                .collect();
            RuleTable { rules }
        })
    }

    /// Look up the output for a pair.
    ///
    /// Fails with `DoseError::Logic` if the pair is absent, which a table
    /// built through `from_rules` or `expert` cannot be.
    pub fn lookup(
        &self,
        amount: AmountCategory,
        level: LevelCategory,
    ) -> Result<AmountCategory, DoseError> {
        self.rules
            .iter()
            .find(|r| r.amount == amount && r.level == level)
            .map(|r| r.output)
            .ok_or_else(|| {
                DoseError::Logic(format!(
                    "Case not covered for (laundry_amount = {}, dirt_level = {})",
                    amount, level
                ))
            })
    }

    pub fn rules(&self) -> &[ExpertRule] {
        &self.rules
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::expert().clone()
    }
}

/// Apply the built-in expert rules to a fuzzified input pair.
pub fn apply_rules(
    amount: AmountCategory,
    level: LevelCategory,
) -> Result<AmountCategory, DoseError> {
    RuleTable::expert().lookup(amount, level)
}

/// Parse a rule table from TOML text.
pub fn parse_rules(content: &str) -> Result<RuleTable, DoseError> {
    let file: RulesFile = toml::from_str(content)
        .map_err(|e| DoseError::Config(format!("Invalid rule table: {}", e)))?;
    RuleTable::from_rules(file.rules)
}

/// Load a rule table from a TOML file at the given path.
pub fn load_rules(path: &Path) -> Result<RuleTable, DoseError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        DoseError::Config(format!("Failed to read rules {}: {}", path.display(), e))
    })?;
    parse_rules(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use AmountCategory::*;
    use LevelCategory::*;

    #[test]
    fn test_expert_table_matches_rule_list() {
        let expected = [
            (Small, Low, Small),
            (Medium, Low, Medium),
            (Large, Low, Medium),
            (Small, High, Medium),
            (Medium, High, Large),
            (Large, High, Large),
        ];
        for (amount, level, output) in expected {
            assert_eq!(
                apply_rules(amount, level).unwrap(),
                output,
                "Wrong output for ({}, {})",
                amount,
                level
            );
        }
    }

    #[test]
    fn test_expert_table_has_six_rules() {
        assert_eq!(RuleTable::expert().rules().len(), 6);
        assert_eq!(RuleTable::default(), *RuleTable::expert());
    }

    #[test]
    fn test_missing_pair_is_logic_error() {
        let table = RuleTable { rules: vec![] };
        let err = table.lookup(Small, Low).unwrap_err();
        assert!(err.is_logic_error(), "Expected logic error, got {:?}", err);
        assert!(err.to_string().contains("small"));
    }

    #[test]
    fn test_from_rules_rejects_incomplete_table() {
        let rules = vec![ExpertRule {
            amount: Small,
            level: Low,
            output: Small,
        }];
        let err = RuleTable::from_rules(rules).unwrap_err();
        assert!(err.to_string().contains("Missing rule"), "Got: {}", err);
    }

    #[test]
    fn test_from_rules_rejects_duplicates() {
        let mut rules = RuleTable::expert().rules().to_vec();
        rules.push(ExpertRule {
            amount: Large,
            level: High,
            output: Small,
        });
        let err = RuleTable::from_rules(rules).unwrap_err();
        assert!(err.to_string().contains("Duplicate rule"), "Got: {}", err);
    }

    #[test]
    fn test_parse_rules_toml() {
        let content = r#"
            [[rules]]
            amount = "small"
            level = "low"
            output = "small"
            [[rules]]
            amount = "medium"
            level = "low"
            output = "small"
            [[rules]]
            amount = "large"
            level = "low"
            output = "medium"
            [[rules]]
            amount = "small"
            level = "high"
            output = "medium"
            [[rules]]
            amount = "medium"
            level = "high"
            output = "medium"
            [[rules]]
            amount = "large"
            level = "high"
            output = "large"
        "#;
        let table = parse_rules(content).unwrap();
        assert_eq!(table.lookup(Medium, Low).unwrap(), Small);
        assert_eq!(table.lookup(Medium, High).unwrap(), Medium);
    }

    #[test]
    fn test_parse_rules_rejects_unknown_category() {
        let content = r#"
            [[rules]]
            amount = "huge"
            level = "low"
            output = "small"
        "#;
        let err = parse_rules(content).unwrap_err();
        assert!(err.to_string().contains("Invalid rule table"), "Got: {}", err);
    }
}
