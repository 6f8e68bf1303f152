//! Polars integration for statplot
//!
//! Plot functions accept each variable either as a column name of a
//! [`DataFrame`](polars::prelude::DataFrame) or as raw values. This crate
//! resolves those [`Var`] specifications once into [`Vector`]s and keeps
//! related vectors aligned in [`Variables`].
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use statplot_polars::{Var, Variables};
//!
//! let df = df!("x" => [1.0, 2.0, 3.0], "g" => ["a", "b", "a"]).unwrap();
//! let y = Var::from(vec![2.0, 4.0, 6.0]);
//!
//! let vars = Variables::establish(
//!     Some(&df),
//!     &[("x", Some(&"x".into())), ("y", Some(&y)), ("hue", Some(&"g".into()))],
//! )
//! .unwrap();
//! assert_eq!(vars.get("hue").unwrap().levels(), vec!["a", "b"]);
//! ```

mod error;
mod traits;
mod var;
mod variables;
mod vector;

pub use error::{Error, Result};
pub use traits::PlotDataExt;
pub use var::Var;
pub use variables::Variables;
pub use vector::{format_level, Values, Vector};

pub use polars::prelude::DataFrame;
