//! Error types for plotting

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Data(#[from] statplot_polars::Error),

    #[error(transparent)]
    Core(#[from] statplot_core::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("Facet error: {0}")]
    Facet(String),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
