//! Statistical plotting with bootstrap confidence intervals
//!
//! `statplot` bundles the workspace crates behind one dependency:
//!
//! - [`core`]: errors, summary helpers and color palettes
//! - [`confidence`]: bootstrap resampling and percentile intervals
//! - [`data`]: plot variables resolved from polars frames or raw values
//! - [`regression`]: binned estimates, model fits and regression bands
//! - [`categorical`]: per-category estimates, box summaries and plot kinds
//! - [`viz`]: axes display lists, faceted plots and SVG output
//!
//! # Example
//!
//! ```rust
//! use statplot::prelude::*;
//!
//! let data: Vec<f64> = (1..=20).map(f64::from).collect();
//! let boots: Vec<f64> = Bootstrap::new()
//!     .with_resamples(500)
//!     .with_seed(1)
//!     .run(&[data.as_slice()], &Estimator::Mean)
//!     .unwrap();
//! let ci = percentile_interval(&boots, Some(95.0)).unwrap().unwrap();
//! assert!(ci.contains(10.5));
//! ```

pub use statplot_categorical as categorical;
pub use statplot_confidence as confidence;
pub use statplot_core as core;
pub use statplot_polars as data;
pub use statplot_regression as regression;
pub use statplot_viz as viz;

/// Commonly used types and plot functions
pub mod prelude {
    pub use statplot_categorical::{CategoricalOptions, CategoricalPlotter, PlotKind};
    pub use statplot_confidence::{percentile_interval, percentile_intervals, Bootstrap, ConfidenceInterval, Estimator};
    pub use statplot_core::{color_palette, Color, PaletteSpec};
    pub use statplot_polars::{PlotDataExt, Var};
    pub use statplot_regression::{Bins, CiLevel, RegressionOptions, RegressionPlotter};
    pub use statplot_viz::{
        barplot, boxplot, factorplot, lmplot, pointplot, regplot, residplot, to_svg, Axes, CategoricalPlotOptions,
        FacetGrid, FactorplotOptions, LmplotOptions, RegplotOptions, ResidplotOptions,
    };
}
