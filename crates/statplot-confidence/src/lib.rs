//! Bootstrap resampling and percentile confidence intervals
//!
//! This crate holds the statistical kernel behind every confidence band and
//! error bar that statplot draws:
//!
//! - [`bootstrap`] / [`Bootstrap`]: resample one or more paired sequences,
//!   optionally by unit, and aggregate every draw
//! - [`percentile_interval`] / [`percentile_intervals`]: two-sided percentile
//!   bounds of a scalar or vector bootstrap distribution
//! - [`Estimator`] and the [`Aggregator`] trait for the statistic itself
//!
//! # Example
//!
//! ```rust
//! use statplot_confidence::{percentile_interval, Bootstrap, Estimator};
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let boots: Vec<f64> = Bootstrap::new()
//!     .with_resamples(1000)
//!     .with_seed(0)
//!     .run(&[&data], &Estimator::Mean)
//!     .unwrap();
//!
//! let ci = percentile_interval(&boots, Some(95.0)).unwrap().unwrap();
//! assert!(ci.contains(3.0));
//! ```

pub mod bootstrap;
pub mod estimators;
pub mod percentile;
pub mod types;
pub mod workspace;

pub use bootstrap::{bootstrap, resample_blocks, resample_indices, Bootstrap, UnitBlock, Units, DEFAULT_N_BOOT};
pub use estimators::{Aggregator, Estimator};
pub use percentile::{confidence_interval, percentile_interval, percentile_intervals, BootstrapOutput};
pub use types::{ConfidenceInterval, ConfidenceLevel};
pub use workspace::ResampleWorkspace;
