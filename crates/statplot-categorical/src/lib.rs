//! Categorical summaries for statplot
//!
//! [`CategoricalPlotter`] groups a numeric `y` by category (`x`) and an
//! optional `hue`, then produces per-group estimates with bootstrap
//! intervals, box summaries, hue offsets, colors and marker styles. Without
//! `y` it counts observations.
//!
//! # Example
//!
//! ```rust
//! use statplot_categorical::{CategoricalOptions, CategoricalPlotter, PlotKind};
//! use statplot_polars::Var;
//!
//! let x = Var::from(vec!["a", "a", "b", "b"]);
//! let y = Var::from(vec![1.0, 3.0, 10.0, 12.0]);
//! let options = CategoricalOptions::default().with_kind(PlotKind::Bar).with_n_boot(100).with_seed(0);
//!
//! let plotter = CategoricalPlotter::new(&x, Some(&y), None, None, options).unwrap();
//! let estimates = plotter.estimate_data().unwrap();
//! assert_eq!(estimates[0].heights, vec![2.0, 11.0]);
//! ```

pub mod config;
pub mod plotter;

pub use config::{CategoricalOptions, PlotKind};
pub use plotter::{BoxStats, BoxSummary, CategoricalPlotter, HueEstimates};
