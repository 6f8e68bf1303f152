//! Regression fits evaluated on a grid, with bootstrap bands
//!
//! Every model is a function `fit(x, y) -> predict(grid)`. Bands come from
//! refitting the model on paired resamples of `(x, y)` and collecting the
//! predictions into an `n_boot × grid` matrix.

use crate::config::FitKind;
use crate::linalg::{lstsq, polyfit, polyval, vandermonde};
use crate::lowess::{lowess, LowessCurve, DEFAULT_FRAC, DEFAULT_ITERATIONS};
use nalgebra::DVector;
use statplot_confidence::Bootstrap;
use statplot_core::utils::median;
use statplot_core::{Error, Result};
use tracing::{debug, instrument, warn};

/// Tuning constant of the Huber norm
pub const HUBER_T: f64 = 1.345;

/// Normal-consistency constant of the median absolute deviation
const MAD_CONSTANT: f64 = 0.6745;

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-8;

/// Point estimate on a grid plus the optional bootstrap matrix
#[derive(Debug, Clone, PartialEq)]
pub struct GridFit {
    pub yhat: Vec<f64>,
    /// One row per resample, one column per grid point
    pub boots: Option<Vec<Vec<f64>>>,
}

/// Ordinary least squares line
pub fn fit_fast(x: &[f64], y: &[f64], grid: &[f64]) -> Result<Vec<f64>> {
    let design = vandermonde(x, 1);
    let pinv = design
        .pseudo_inverse(1e-10)
        .map_err(|e| Error::Computation(format!("Pseudo-inverse failed: {e}")))?;
    let beta = pinv * DVector::from_column_slice(y);
    Ok(grid.iter().map(|g| beta[0] + beta[1] * g).collect())
}

/// Least-squares polynomial of degree `order`
pub fn fit_poly(x: &[f64], y: &[f64], grid: &[f64], order: usize) -> Result<Vec<f64>> {
    let coeffs = polyfit(x, y, order)?;
    Ok(polyval(&coeffs, grid))
}

#[inline]
fn sigmoid(eta: f64) -> f64 {
    1.0 / (1.0 + (-eta).exp())
}

/// Logistic regression of a binary `y` by iteratively reweighted least squares
pub fn fit_logistic(x: &[f64], y: &[f64], grid: &[f64]) -> Result<Vec<f64>> {
    let design = vandermonde(x, 1);
    let mut beta = DVector::<f64>::zeros(2);

    for _ in 0..MAX_ITERATIONS {
        let eta = &design * &beta;
        let mut weights = Vec::with_capacity(y.len());
        let mut working = Vec::with_capacity(y.len());
        for (&e, &yi) in eta.iter().zip(y) {
            let mu = sigmoid(e);
            let w = (mu * (1.0 - mu)).max(1e-10);
            weights.push(w);
            working.push(e + (yi - mu) / w);
        }

        let next = lstsq(&design, &working, Some(&weights))?;
        let change = (&next - &beta).amax();
        beta = next;
        if change < TOLERANCE {
            break;
        }
    }

    if beta.iter().any(|b| !b.is_finite()) {
        return Err(Error::Computation("Logistic fit did not converge".to_string()));
    }
    Ok(grid.iter().map(|g| sigmoid(beta[0] + beta[1] * g)).collect())
}

/// Huber M-estimate of a line, scale re-estimated each step by the MAD
pub fn fit_robust(x: &[f64], y: &[f64], grid: &[f64]) -> Result<Vec<f64>> {
    let design = vandermonde(x, 1);
    let mut beta = lstsq(&design, y, None)?;

    for _ in 0..MAX_ITERATIONS {
        let fitted = &design * &beta;
        let residuals: Vec<f64> = y.iter().zip(fitted.iter()).map(|(a, b)| a - b).collect();
        let center = median(&residuals);
        let deviations: Vec<f64> = residuals.iter().map(|r| (r - center).abs()).collect();
        let scale = median(&deviations) / MAD_CONSTANT;
        if scale.is_nan() || scale <= 1e-12 {
            break;
        }

        let weights: Vec<f64> = residuals
            .iter()
            .map(|r| {
                let u = (r / scale).abs();
                if u <= HUBER_T {
                    1.0
                } else {
                    HUBER_T / u
                }
            })
            .collect();

        let next = lstsq(&design, y, Some(&weights))?;
        let change = (&next - &beta).amax();
        beta = next;
        if change < TOLERANCE {
            break;
        }
    }

    Ok(grid.iter().map(|g| beta[0] + beta[1] * g).collect())
}

/// Locally weighted smoother over the sorted `x`
pub fn fit_lowess(x: &[f64], y: &[f64]) -> Result<LowessCurve> {
    lowess(x, y, DEFAULT_FRAC, DEFAULT_ITERATIONS)
}

/// Point prediction of any grid-based model
pub fn predict(kind: FitKind, x: &[f64], y: &[f64], grid: &[f64]) -> Result<Vec<f64>> {
    match kind {
        FitKind::Linear => fit_fast(x, y, grid),
        FitKind::Polynomial(order) => fit_poly(x, y, grid, order),
        FitKind::Logistic => fit_logistic(x, y, grid),
        FitKind::Robust => fit_robust(x, y, grid),
        FitKind::Lowess => Err(Error::Configuration(
            "lowess is evaluated at the data, not on a grid".to_string(),
        )),
    }
}

/// Fit `kind` on `grid` and bootstrap it when `ci` is set
///
/// Resamples whose fit fails contribute a row of `NaN`, which the interval
/// extractor ignores.
#[instrument(skip(x, y, grid, runner), fields(n = x.len(), grid = grid.len(), n_boot = runner.n_resamples()))]
pub fn fit_with_bands(
    kind: FitKind,
    x: &[f64],
    y: &[f64],
    grid: &[f64],
    ci: Option<f64>,
    runner: &Bootstrap,
) -> Result<GridFit> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "regression fit"));
    }
    let yhat = predict(kind, x, y, grid)?;
    debug!("Fitted {:?} on {} grid points", kind, grid.len());

    if ci.is_none() {
        return Ok(GridFit { yhat, boots: None });
    }

    let refit = |samples: &[&[f64]]| -> Vec<f64> {
        predict(kind, samples[0], samples[1], grid).unwrap_or_else(|e| {
            warn!("Bootstrap refit failed: {}", e);
            vec![f64::NAN; grid.len()]
        })
    };
    let boots = runner.run(&[x, y], &refit)?;

    Ok(GridFit {
        yhat,
        boots: Some(boots),
    })
}
