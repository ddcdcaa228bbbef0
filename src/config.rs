//! Settings for the command line front end.
//!
//! Resolution order:
//! - an explicit path (`--config`)
//! - `<config dir>/laundry-dose/config.toml` when it exists
//! - the defaults embedded from `config/default.toml`

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::dosing::{load_rules, RuleTable};
use crate::error::DoseError;
use crate::sweep::grid_len;

/// Default settings embedded in the binary at compile time.
const DEFAULT_SETTINGS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Custom rule table; the built-in expert rules are used when absent
    #[serde(default)]
    pub rules: Option<PathBuf>,
    pub sweep: SweepSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Grid explored by the sweep command. Bounds are inclusive.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SweepSettings {
    pub weight_min: f64,
    pub weight_max: f64,
    pub weight_step: f64,
    pub dirt_min: f64,
    pub dirt_max: f64,
    pub dirt_step: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    /// Decimal places for text output
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    1
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, DoseError> {
        let settings: Settings = toml::from_str(content)
            .map_err(|e| DoseError::Config(format!("Invalid settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, DoseError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DoseError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load settings following the resolution order above.
    pub fn load(explicit: Option<&Path>) -> Result<Self, DoseError> {
        if let Some(path) = explicit {
            debug!("Loading settings from {}", path.display());
            return Self::from_file(path);
        }

        if let Some(path) = default_settings_path().filter(|p| p.exists()) {
            debug!("Loading settings from {}", path.display());
            return Self::from_file(&path);
        }

        debug!("No settings file found, using built-in defaults");
        Ok(Self::default())
    }

    /// The rule table these settings select.
    pub fn rule_table(&self) -> Result<RuleTable, DoseError> {
        match &self.rules {
            Some(path) => load_rules(path),
            None => Ok(RuleTable::default()),
        }
    }

    fn validate(&self) -> Result<(), DoseError> {
        grid_len(&self.sweep)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_toml(DEFAULT_SETTINGS).expect("embedded default.toml must be valid")
    }
}

/// `<config dir>/laundry-dose/config.toml`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("laundry-dose").join("config.toml"))
}
