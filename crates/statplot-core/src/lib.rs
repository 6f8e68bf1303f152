//! Core types for statplot
//!
//! This crate provides the pieces shared by every statplot crate:
//!
//! - [`Error`] and [`Result`]: the unified error type
//! - [`utils`]: small numeric helpers (mean, median, percentiles, grids)
//! - [`palette`]: colors and color palettes
//!
//! # Example
//!
//! ```rust
//! use statplot_core::{palette::color_palette, utils::percentile_sorted};
//!
//! let colors = color_palette(Some(&"husl".into()), 3).unwrap();
//! assert_eq!(colors.len(), 3);
//!
//! let median = percentile_sorted(&[1.0, 2.0, 3.0], 50.0);
//! assert_eq!(median, 2.0);
//! ```

pub mod error;
pub mod palette;
pub mod utils;

pub use error::{Error, Result};
pub use palette::{color_palette, Color, PaletteSpec};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
