//! Percentile confidence intervals from bootstrap distributions

use crate::types::{ConfidenceInterval, ConfidenceLevel};
use statplot_core::utils::{nan_last, percentile_sorted};
use statplot_core::Result;
use tracing::debug;

/// Percentile interval of a scalar bootstrap distribution
///
/// Returns `Ok(None)` when `ci` is `None` or the distribution is empty.
/// `NaN` statistics are ignored; if nothing else remains both bounds are
/// `NaN`.
///
/// # Errors
///
/// `Configuration` if `ci` lies outside `(0, 100]`.
///
/// ```rust
/// use statplot_confidence::percentile_interval;
///
/// let boots: Vec<f64> = (0..=100).map(f64::from).collect();
/// let ci = percentile_interval(&boots, Some(90.0)).unwrap().unwrap();
/// assert_eq!((ci.lower, ci.upper), (5.0, 95.0));
///
/// assert!(percentile_interval(&boots, None).unwrap().is_none());
/// ```
pub fn percentile_interval(distribution: &[f64], ci: Option<f64>) -> Result<Option<ConfidenceInterval>> {
    let Some(level) = ci.map(ConfidenceLevel::new).transpose()? else {
        return Ok(None);
    };
    if distribution.is_empty() {
        return Ok(None);
    }
    Ok(Some(interval_at(distribution, level)))
}

/// One percentile interval per statistic position of a vector distribution
///
/// `distribution[i][j]` is statistic `j` of resample `i`. Rows shorter than
/// the first row leave the missing positions out of that position's
/// percentiles.
pub fn percentile_intervals(
    distribution: &[Vec<f64>],
    ci: Option<f64>,
) -> Result<Option<Vec<ConfidenceInterval>>> {
    let Some(level) = ci.map(ConfidenceLevel::new).transpose()? else {
        return Ok(None);
    };
    let Some(first) = distribution.first() else {
        return Ok(None);
    };

    let n_values = first.len();
    let mut transposed = vec![Vec::with_capacity(distribution.len()); n_values];
    for row in distribution {
        for (column, &value) in transposed.iter_mut().zip(row.iter()) {
            column.push(value);
        }
    }

    debug!(
        "Extracting {} percentile intervals from {} resamples",
        n_values,
        distribution.len()
    );
    Ok(Some(
        transposed
            .iter()
            .map(|column| interval_at(column, level))
            .collect(),
    ))
}

fn interval_at(values: &[f64], level: ConfidenceLevel) -> ConfidenceInterval {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    finite.sort_by(nan_last);
    let (lo, hi) = level.percentile_bounds();
    ConfidenceInterval::new(
        percentile_sorted(&finite, lo),
        percentile_sorted(&finite, hi),
        level.value(),
    )
}

/// Bootstrap statistics that know how to summarize their own distribution
///
/// Scalars produce one interval, vectors produce one interval per position.
pub trait BootstrapOutput: Sized {
    type Interval;

    fn percentile_interval(distribution: &[Self], ci: Option<f64>) -> Result<Option<Self::Interval>>;
}

impl BootstrapOutput for f64 {
    type Interval = ConfidenceInterval;

    fn percentile_interval(distribution: &[Self], ci: Option<f64>) -> Result<Option<Self::Interval>> {
        percentile_interval(distribution, ci)
    }
}

impl BootstrapOutput for Vec<f64> {
    type Interval = Vec<ConfidenceInterval>;

    fn percentile_interval(distribution: &[Self], ci: Option<f64>) -> Result<Option<Self::Interval>> {
        percentile_intervals(distribution, ci)
    }
}

/// Summarize any bootstrap distribution at level `ci`
pub fn confidence_interval<T: BootstrapOutput>(distribution: &[T], ci: Option<f64>) -> Result<Option<T::Interval>> {
    T::percentile_interval(distribution, ci)
}
