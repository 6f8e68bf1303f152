//! Least-squares helpers over nalgebra

use nalgebra::{DMatrix, DVector};
use statplot_core::{utils::mean, Error, Result};

const SVD_EPS: f64 = 1e-10;

/// Design matrix with columns `x^0 .. x^degree`
pub fn vandermonde(x: &[f64], degree: usize) -> DMatrix<f64> {
    let mut matrix = DMatrix::zeros(x.len(), degree + 1);
    for (i, &xi) in x.iter().enumerate() {
        let mut power = 1.0;
        for j in 0..=degree {
            matrix[(i, j)] = power;
            power *= xi;
        }
    }
    matrix
}

/// Solve the (optionally weighted) least-squares problem `X b = y`
///
/// Uses the normal equations with a Cholesky factorization and falls back to
/// an SVD solve when `X^T W X` is not positive definite.
pub fn lstsq(design: &DMatrix<f64>, y: &[f64], weights: Option<&[f64]>) -> Result<DVector<f64>> {
    if design.nrows() != y.len() {
        return Err(Error::size_mismatch(design.nrows(), y.len(), "least squares"));
    }
    if let Some(w) = weights {
        if w.len() != y.len() {
            return Err(Error::size_mismatch(y.len(), w.len(), "least squares weights"));
        }
    }

    let y = DVector::from_column_slice(y);
    let weighted = match weights {
        Some(w) => {
            let w = DVector::from_column_slice(w);
            let mut xw = design.clone();
            for (mut row, &wi) in xw.row_iter_mut().zip(w.iter()) {
                row *= wi;
            }
            xw
        }
        None => design.clone(),
    };

    let xtx = weighted.transpose() * design;
    let xty = weighted.transpose() * y;

    match xtx.clone().cholesky() {
        Some(chol) => Ok(chol.solve(&xty)),
        None => xtx
            .svd(true, true)
            .solve(&xty, SVD_EPS)
            .map_err(|e| Error::Computation(format!("Failed to solve least squares system: {e}"))),
    }
}

/// Least-squares polynomial coefficients, lowest order first
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>> {
    Ok(lstsq(&vandermonde(x, degree), y, None)?.as_slice().to_vec())
}

/// Evaluate a polynomial with coefficients lowest order first
pub fn polyval(coeffs: &[f64], x: &[f64]) -> Vec<f64> {
    x.iter()
        .map(|&xi| coeffs.iter().rev().fold(0.0, |acc, &c| acc * xi + c))
        .collect()
}

/// Remove the linear effect of `b` from `a`, keeping `a`'s mean
///
/// Both sequences are centered, `a` is projected onto `b` through the
/// pseudo-inverse and the residual is shifted back by `a`'s mean.
pub fn regress_out(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(Error::size_mismatch(a.len(), b.len(), "partial regression"));
    }
    let a_mean = mean(a);
    let b_mean = mean(b);
    let a_centered = DVector::from_iterator(a.len(), a.iter().map(|v| v - a_mean));
    let b_centered = DMatrix::from_iterator(b.len(), 1, b.iter().map(|v| v - b_mean));

    let pinv = b_centered
        .clone()
        .pseudo_inverse(SVD_EPS)
        .map_err(|e| Error::Computation(format!("Pseudo-inverse failed: {e}")))?;
    let projected = &b_centered * (pinv * &a_centered);

    Ok(a_centered
        .iter()
        .zip(projected.iter())
        .map(|(a, p)| a - p + a_mean)
        .collect())
}
