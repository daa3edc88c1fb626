use thiserror::Error;

/// Errors raised while building a plant model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Dimension mismatch for matrix {matrix}: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        matrix: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl ModelError {
    pub(crate) const fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Rejects non-positive or non-finite values.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() {
        return Err(ModelError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(ModelError::invalid(name, value, "must be > 0"));
    }
    Ok(value)
}

/// Rejects zero or non-finite values.
pub(crate) fn require_nonzero(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() {
        return Err(ModelError::invalid(name, value, "must be finite"));
    }
    if value == 0.0 {
        return Err(ModelError::invalid(name, value, "must be != 0"));
    }
    Ok(value)
}
