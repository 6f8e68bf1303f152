//! Statistical plots drawn onto axes display lists
//!
//! Plot functions resolve their data through `statplot-regression` and
//! `statplot-categorical`, then record lines, collections, bars and boxes on
//! an [`Axes`]. Faceted variants lay the same plot out over a [`FacetGrid`].
//! [`render`] turns either into SVG with `plotters`.
//!
//! # Example
//!
//! ```rust
//! use statplot_viz::{regplot, Axes, RegplotOptions};
//! use statplot_regression::RegressionOptions;
//!
//! let x: Vec<f64> = (0..30).map(f64::from).collect();
//! let y: Vec<f64> = x.iter().map(|v| 0.5 * v + (v * 1.3).sin()).collect();
//!
//! let mut ax = Axes::new();
//! let opts = RegplotOptions::default()
//!     .with_regression(RegressionOptions::default().with_n_boot(100).with_seed(0));
//! regplot(&x.into(), &y.into(), None, &opts, &mut ax).unwrap();
//!
//! assert_eq!(ax.lines().len(), 1);
//! assert_eq!(ax.collections().len(), 2);
//! ```

pub mod axes;
pub mod categorical;
pub mod error;
pub mod facet;
pub mod regression;
pub mod render;

pub use axes::{Axes, Band, Bar, BoxArtist, Collection, Coords, Legend, Line, Scatter};
pub use categorical::{
    barplot, boxplot, categorical_plot, factorplot, pointplot, CategoricalPlotOptions, FactorplotOptions,
};
pub use error::{Error, Result};
pub use facet::{FacetGrid, GridShape};
pub use regression::{lmplot, regplot, residplot, LmplotOptions, RegplotOptions, ResidplotOptions};
pub use render::{grid_to_svg, save_svg, to_svg};
