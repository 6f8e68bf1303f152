//! Error types for statplot-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error(transparent)]
    Core(#[from] statplot_core::Error),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Missing data: {0}")]
    MissingData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// A column name was given without a frame to look it up in
    pub fn column_without_data(name: &str) -> Self {
        Self::MissingData(format!(
            "Must pass a DataFrame to use column name {name:?} as a variable"
        ))
    }
}
