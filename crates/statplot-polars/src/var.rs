//! Variable specifications: a column name or raw values

use crate::traits::PlotDataExt;
use crate::{Error, Result, Vector};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// How a plot variable is given
///
/// Resolved once against an optional frame into a [`Vector`]. In JSON a
/// string is a column name, a list of numbers is raw numeric data and a list
/// of strings is raw labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Var {
    /// Name of a column in the frame
    Column(String),
    /// Raw numeric values
    Numeric(Vec<f64>),
    /// Raw categorical labels
    Labels(Vec<String>),
}

impl Var {
    /// Resolve against `data`
    ///
    /// # Errors
    ///
    /// - `MissingData` when a column name is given without a frame
    /// - `InvalidColumn` when the frame has no such column
    pub fn resolve(&self, data: Option<&DataFrame>) -> Result<Vector> {
        match self {
            Var::Column(name) => data
                .ok_or_else(|| Error::column_without_data(name))?
                .plot_vector(name),
            Var::Numeric(values) => Ok(Vector::numeric(None, values.clone())),
            Var::Labels(labels) => Ok(Vector::labels(
                None,
                labels.iter().cloned().map(Some).collect(),
            )),
        }
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Var::Column(name.to_string())
    }
}

impl From<String> for Var {
    fn from(name: String) -> Self {
        Var::Column(name)
    }
}

impl From<Vec<f64>> for Var {
    fn from(values: Vec<f64>) -> Self {
        Var::Numeric(values)
    }
}

impl From<&[f64]> for Var {
    fn from(values: &[f64]) -> Self {
        Var::Numeric(values.to_vec())
    }
}

impl From<Vec<&str>> for Var {
    fn from(labels: Vec<&str>) -> Self {
        Var::Labels(labels.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Var {
    fn from(labels: Vec<String>) -> Self {
        Var::Labels(labels)
    }
}
