//! Error types for statplot
//!
//! Provides a unified error type for all statplot crates.

use thiserror::Error;

/// Core error type for statistical plotting operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input sequences have incompatible shapes
    #[error("Input shape error: {0}")]
    InputShape(String),

    /// Invalid or conflicting configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// An operation received no observations
    #[error("Empty input: {0} needs at least one observation")]
    EmptyInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::EmptyInput(operation.to_string())
    }

    /// Create an error for a confidence level outside (0, 100]
    pub fn invalid_ci(ci: f64) -> Self {
        Self::Configuration(format!("Confidence level {ci} must be in (0, 100]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InputShape(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for mutually exclusive options
    pub fn conflicting(options: &str) -> Self {
        Self::Configuration(format!("Mutually exclusive options: {options}"))
    }
}
