//! Configuration types for categorical plots

use serde::{Deserialize, Serialize};
use statplot_confidence::Estimator;
use statplot_core::{Error, PaletteSpec};
use statplot_polars::Var;
use std::fmt;
use std::str::FromStr;

/// How each category is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    /// Chosen from the data
    #[default]
    Auto,
    Bar,
    Point,
    Box,
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "bar" => Ok(Self::Bar),
            "point" => Ok(Self::Point),
            "box" => Ok(Self::Box),
            other => Err(Error::Configuration(format!("Invalid plot kind: {other}"))),
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Bar => "bar",
            Self::Point => "point",
            Self::Box => "box",
        };
        f.write_str(name)
    }
}

/// Categorical plot options
///
/// ```rust
/// use statplot_categorical::{CategoricalOptions, PlotKind};
///
/// let opts: CategoricalOptions = serde_json::from_str(r#"{"kind": "box", "palette": "husl"}"#).unwrap();
/// assert_eq!(opts.kind, PlotKind::Box);
/// assert_eq!(opts.ci, Some(95.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoricalOptions {
    pub x_order: Option<Vec<String>>,
    pub hue_order: Option<Vec<String>>,
    pub units: Option<Var>,
    pub estimator: Estimator,
    pub ci: Option<f64>,
    pub n_boot: usize,
    /// Single color applied to every level
    pub color: Option<String>,
    pub palette: Option<PaletteSpec>,
    pub markers: Option<Vec<String>>,
    pub linestyles: Option<Vec<String>>,
    pub kind: PlotKind,
    /// Horizontal spread of point estimates across hue levels
    pub dodge: f64,
    pub dropna: bool,
    pub seed: Option<u64>,
}

impl Default for CategoricalOptions {
    fn default() -> Self {
        Self {
            x_order: None,
            hue_order: None,
            units: None,
            estimator: Estimator::Mean,
            ci: Some(95.0),
            n_boot: 1000,
            color: None,
            palette: None,
            markers: None,
            linestyles: None,
            kind: PlotKind::Auto,
            dodge: 0.0,
            dropna: true,
            seed: None,
        }
    }
}

impl CategoricalOptions {
    pub fn with_x_order<S: Into<String>>(mut self, order: impl IntoIterator<Item = S>) -> Self {
        self.x_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_hue_order<S: Into<String>>(mut self, order: impl IntoIterator<Item = S>) -> Self {
        self.hue_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_units(mut self, units: impl Into<Var>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_estimator(mut self, estimator: Estimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_ci(mut self, ci: Option<f64>) -> Self {
        self.ci = ci;
        self
    }

    pub fn with_n_boot(mut self, n_boot: usize) -> Self {
        self.n_boot = n_boot;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_palette(mut self, palette: impl Into<PaletteSpec>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    pub fn with_markers<S: Into<String>>(mut self, markers: impl IntoIterator<Item = S>) -> Self {
        self.markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_linestyles<S: Into<String>>(mut self, linestyles: impl IntoIterator<Item = S>) -> Self {
        self.linestyles = Some(linestyles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_kind(mut self, kind: PlotKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_dodge(mut self, dodge: f64) -> Self {
        self.dodge = dodge;
        self
    }

    pub fn with_dropna(mut self, dropna: bool) -> Self {
        self.dropna = dropna;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
