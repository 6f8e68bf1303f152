//! Locally weighted linear regression (LOWESS)
//!
//! Thin adapter over the `lowess` crate's batch smoother, configured as
//! classic Cleveland LOWESS: tricube neighbourhood weights, bisquare
//! robustness iterations scaled by the median absolute residual, no boundary
//! padding and no delta interpolation.
//!
//! # References
//!
//! - Cleveland, W. S. (1979). "Robust Locally Weighted Regression and
//!   Smoothing Scatterplots." JASA 74(368).

use ::lowess::prelude::{Batch, Bisquare, Lowess, LowessError, NoBoundary, Tricube, MAR};
use statplot_core::{Error, Result};
use tracing::{debug, instrument};

/// Default fraction of points used for each local fit
pub const DEFAULT_FRAC: f64 = 2.0 / 3.0;

/// Default number of robustness iterations
pub const DEFAULT_ITERATIONS: usize = 3;

/// Smoothed curve evaluated at the sorted predictor values
#[derive(Debug, Clone, PartialEq)]
pub struct LowessCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

fn smoother_error(err: LowessError) -> Error {
    match err {
        LowessError::MismatchedInputs { x_len, y_len } => Error::size_mismatch(x_len, y_len, "lowess"),
        LowessError::TooFewPoints { got, min } => Error::InsufficientData {
            expected: min,
            actual: got,
        },
        LowessError::InvalidFraction(_) | LowessError::InvalidIterations(_) => {
            Error::InvalidParameter(err.to_string())
        }
        other => Error::Computation(other.to_string()),
    }
}

/// Smooth `y` against `x`
///
/// Returns the curve at the sorted `x` values. Missing pairs are dropped.
///
/// # Errors
///
/// - `InputShape` when lengths differ
/// - `InvalidParameter` when `frac` is outside `(0, 1]`
/// - `InsufficientData` with fewer than two points
#[instrument(skip(x, y), fields(n = x.len()))]
pub fn lowess(x: &[f64], y: &[f64], frac: f64, iterations: usize) -> Result<LowessCurve> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "lowess"));
    }
    if !(frac > 0.0 && frac <= 1.0) {
        return Err(Error::InvalidParameter(format!(
            "lowess fraction must be in (0, 1], got {frac}"
        )));
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip();
    if xs.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: xs.len(),
        });
    }
    debug!("Smoothing {} points with frac {} and {} iterations", xs.len(), frac, iterations);

    let model = Lowess::new()
        .fraction(frac)
        .iterations(iterations)
        .delta(0.0)
        .weight_function(Tricube)
        .robustness_method(Bisquare)
        .scaling_method(MAR)
        .boundary_policy(NoBoundary)
        .adapter(Batch)
        .build()
        .map_err(smoother_error)?;
    let fitted = model.fit(&xs, &ys).map_err(smoother_error)?;

    Ok(LowessCurve {
        x: fitted.x,
        y: fitted.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_is_reproduced() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 - 0.5 * v).collect();
        let curve = lowess(&x, &y, DEFAULT_FRAC, DEFAULT_ITERATIONS).unwrap();
        for (xi, yi) in curve.x.iter().zip(&curve.y) {
            assert_relative_eq!(*yi, 3.0 - 0.5 * xi, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_output_sorted_by_x() {
        let x = [3.0, 1.0, 2.0, 0.0, 4.0];
        let y = [9.0, 1.0, 4.0, 0.0, 16.0];
        let curve = lowess(&x, &y, 1.0, 0).unwrap();
        assert_eq!(curve.x, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(curve.y.len(), 5);
    }

    #[test]
    fn test_missing_pairs_dropped() {
        let x = [0.0, 1.0, f64::NAN, 3.0, 4.0, 5.0];
        let y = [0.0, 2.0, 4.0, f64::NAN, 8.0, 10.0];
        let curve = lowess(&x, &y, 1.0, 0).unwrap();
        assert_eq!(curve.x, vec![0.0, 1.0, 4.0, 5.0]);
    }

    #[test]
    fn test_outlier_is_downweighted() {
        // Most points lie exactly on the line, so the median residual is zero.
        let x: Vec<f64> = (0..30).map(f64::from).collect();
        let mut y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        y[15] = 500.0;

        let plain = lowess(&x, &y, 0.5, 0).unwrap();
        let robust = lowess(&x, &y, 0.5, DEFAULT_ITERATIONS).unwrap();
        let err = |c: &LowessCurve| (c.y[15] - 30.0).abs();
        assert!(err(&plain) > 10.0);
        assert!(err(&robust) < err(&plain));
        assert!(err(&robust) < 1.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(lowess(&[1.0, 2.0], &[1.0], 0.5, 0), Err(Error::InputShape(_))));
        assert!(matches!(lowess(&[1.0, 2.0], &[1.0, 2.0], 0.0, 0), Err(Error::InvalidParameter(_))));
        assert!(matches!(lowess(&[1.0], &[1.0], 0.5, 0), Err(Error::InsufficientData { .. })));
    }
}
