//! DataFrame extension trait for plot variables

use crate::{Error, Result, Vector};
use polars::prelude::*;
use tracing::debug;

/// Extract plot variables from a frame
pub trait PlotDataExt {
    /// Resolve one column into a [`Vector`]
    ///
    /// String columns become labels. Every other dtype is cast to `Float64`
    /// with nulls as `NaN`.
    fn plot_vector(&self, column: &str) -> Result<Vector>;

    /// Resolve one column as numeric values
    fn plot_numeric(&self, column: &str) -> Result<Vec<f64>> {
        self.plot_vector(column)?.as_numeric()
    }
}

impl PlotDataExt for DataFrame {
    fn plot_vector(&self, column: &str) -> Result<Vector> {
        let col = self
            .column(column)
            .map_err(|_| Error::InvalidColumn(column.to_string()))?;
        let name = Some(col.name().to_string());

        match col.dtype() {
            DataType::String => {
                let labels = col
                    .str()?
                    .into_iter()
                    .map(|v| v.map(str::to_string))
                    .collect();
                Ok(Vector::labels(name, labels))
            }
            other => {
                let casted = col.cast(&DataType::Float64).map_err(|err| {
                    debug!("Cannot cast column {} to Float64: {}", column, err);
                    Error::TypeMismatch {
                        expected: "numeric or string column".to_string(),
                        got: other.to_string(),
                    }
                })?;
                let values = casted
                    .f64()?
                    .into_iter()
                    .map(|v| v.unwrap_or(f64::NAN))
                    .collect();
                Ok(Vector::numeric(name, values))
            }
        }
    }
}
