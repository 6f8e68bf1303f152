//! Aggregation functions applied to each bootstrap resample

use serde::{Deserialize, Serialize};
use statplot_core::utils::{mean, median, std_dev};

/// A statistic computed from one or more resampled sequences
///
/// The slice holds one entry per input sequence, all resampled with the same
/// indices. Any `Fn(&[&[f64]]) -> T` closure is an aggregator, so correlations
/// or regression fits can be bootstrapped as easily as a mean.
pub trait Aggregator<T> {
    fn aggregate(&self, samples: &[&[f64]]) -> T;
}

impl<T, F> Aggregator<T> for F
where
    F: Fn(&[&[f64]]) -> T,
{
    fn aggregate(&self, samples: &[&[f64]]) -> T {
        self(samples)
    }
}

/// Built-in scalar estimators of the first sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Estimator {
    /// Arithmetic mean
    #[default]
    Mean,
    /// Median
    Median,
    /// Sum of values
    Sum,
    /// Number of observations
    Count,
    /// Sample standard deviation
    Std,
}

impl Estimator {
    /// Apply the estimator to a single sequence
    pub fn estimate(&self, values: &[f64]) -> f64 {
        match self {
            Self::Mean => mean(values),
            Self::Median => median(values),
            Self::Sum => values.iter().sum(),
            Self::Count => values.len() as f64,
            Self::Std => std_dev(values),
        }
    }

    /// Name used for axis labels
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Sum => "sum",
            Self::Count => "count",
            Self::Std => "std",
        }
    }
}

impl Aggregator<f64> for Estimator {
    fn aggregate(&self, samples: &[&[f64]]) -> f64 {
        samples.first().map_or(f64::NAN, |values| self.estimate(values))
    }
}
