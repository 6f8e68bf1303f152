//! Regression fits with bootstrap confidence bands
//!
//! [`RegressionPlotter`] resolves `x`/`y` from a frame or raw values, applies
//! partialling and binning, and fits one of the models in [`FitKind`]:
//!
//! - ordinary least squares ([`fit_fast`])
//! - polynomial least squares ([`fit_poly`])
//! - logistic regression by IRLS ([`fit_logistic`])
//! - Huber M-estimation ([`fit_robust`])
//! - a lowess smoother ([`lowess()`])
//!
//! Bands are per grid point percentile intervals over refits on bootstrap
//! resamples.
//!
//! # Example
//!
//! ```rust
//! use statplot_regression::{RegressionOptions, RegressionPlotter};
//! use statplot_polars::Var;
//!
//! let x = Var::from((0..20).map(f64::from).collect::<Vec<_>>());
//! let y = Var::from((0..20).map(|i| 2.0 * i as f64 + (i % 3) as f64).collect::<Vec<_>>());
//!
//! let options = RegressionOptions::default().with_n_boot(200).with_seed(0);
//! let plotter = RegressionPlotter::new(&x, &y, None, options).unwrap();
//! let fit = plotter.fit_regression(None).unwrap();
//! assert_eq!(fit.grid.len(), 100);
//! assert_eq!(fit.bands.unwrap().len(), 100);
//! ```

pub mod config;
pub mod fit;
pub mod linalg;
pub mod lowess;
pub mod plotter;

pub use config::{Bins, CiLevel, FitKind, RegressionOptions};
pub use fit::{fit_fast, fit_lowess, fit_logistic, fit_poly, fit_robust, fit_with_bands, predict, GridFit};
pub use crate::lowess::{lowess, LowessCurve};
pub use plotter::{bin_predictor, BinEstimate, RegressionFit, RegressionPlotter, GRID_SIZE};
