use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoseError {
    #[error("Invalid value for {name}: {value} (expected {min}..={max})")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Rule table error: {0}")]
    Logic(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl DoseError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DoseError::InvalidArgument { .. })
    }

    pub fn is_logic_error(&self) -> bool {
        matches!(self, DoseError::Logic(_))
    }
}
