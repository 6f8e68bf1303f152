//! Configuration types for regression plots

use serde::{Deserialize, Serialize};
use statplot_confidence::Estimator;
use statplot_core::{Error, Result};
use statplot_polars::Var;

/// How the predictor is binned before estimating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bins {
    /// Number of bins, centered on evenly spaced inner percentiles
    Count(usize),
    /// Explicit bin centers
    Centers(Vec<f64>),
}

impl From<usize> for Bins {
    fn from(n: usize) -> Self {
        Self::Count(n)
    }
}

impl From<Vec<f64>> for Bins {
    fn from(centers: Vec<f64>) -> Self {
        Self::Centers(centers)
    }
}

/// Confidence level of the per-bin estimates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiLevel {
    /// Follow the regression band level
    #[default]
    Same,
    /// No intervals
    None,
    /// Explicit level in percent
    Level(f64),
}

impl CiLevel {
    /// Resolve against the regression band level
    pub fn resolve(self, ci: Option<f64>) -> Option<f64> {
        match self {
            Self::Same => ci,
            Self::None => None,
            Self::Level(level) => Some(level),
        }
    }
}

/// The regression model, chosen once from the option flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitKind {
    /// Ordinary least squares line
    Linear,
    /// Least-squares polynomial of the given order
    Polynomial(usize),
    /// Binomial GLM with a logit link
    Logistic,
    /// Locally weighted linear smoother
    Lowess,
    /// Huber M-estimator
    Robust,
}

impl FitKind {
    /// Pick the model; more than one non-default choice is an error
    pub fn resolve(order: usize, logistic: bool, lowess: bool, robust: bool) -> Result<Self> {
        let mut chosen = Vec::new();
        if order > 1 {
            chosen.push(Self::Polynomial(order));
        }
        if logistic {
            chosen.push(Self::Logistic);
        }
        if lowess {
            chosen.push(Self::Lowess);
        }
        if robust {
            chosen.push(Self::Robust);
        }

        match chosen.as_slice() {
            [] => Ok(Self::Linear),
            [kind] => Ok(*kind),
            _ => Err(Error::conflicting("order > 1, logistic, lowess and robust")),
        }
    }
}

/// Regression plot options
///
/// All fields have defaults, so a partial JSON object is a valid config:
///
/// ```rust
/// use statplot_regression::RegressionOptions;
///
/// let opts: RegressionOptions = serde_json::from_str(r#"{"ci": 68.0, "x_bins": 4}"#).unwrap();
/// assert_eq!(opts.ci, Some(68.0));
/// assert_eq!(opts.n_boot, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionOptions {
    pub x_estimator: Option<Estimator>,
    pub x_bins: Option<Bins>,
    pub x_ci: CiLevel,
    pub ci: Option<f64>,
    pub n_boot: usize,
    pub units: Option<Var>,
    pub order: usize,
    pub logistic: bool,
    pub lowess: bool,
    pub robust: bool,
    pub x_partial: Option<Var>,
    pub y_partial: Option<Var>,
    pub truncate: bool,
    pub dropna: bool,
    pub x_jitter: Option<f64>,
    pub y_jitter: Option<f64>,
    pub seed: Option<u64>,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            x_estimator: None,
            x_bins: None,
            x_ci: CiLevel::Same,
            ci: Some(95.0),
            n_boot: 1000,
            units: None,
            order: 1,
            logistic: false,
            lowess: false,
            robust: false,
            x_partial: None,
            y_partial: None,
            truncate: false,
            dropna: true,
            x_jitter: None,
            y_jitter: None,
            seed: None,
        }
    }
}

impl RegressionOptions {
    pub fn with_x_estimator(mut self, estimator: Estimator) -> Self {
        self.x_estimator = Some(estimator);
        self
    }

    pub fn with_x_bins(mut self, bins: impl Into<Bins>) -> Self {
        self.x_bins = Some(bins.into());
        self
    }

    pub fn with_x_ci(mut self, x_ci: CiLevel) -> Self {
        self.x_ci = x_ci;
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

    pub fn with_units(mut self, units: impl Into<Var>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_logistic(mut self, logistic: bool) -> Self {
        self.logistic = logistic;
        self
    }

    pub fn with_lowess(mut self, lowess: bool) -> Self {
        self.lowess = lowess;
        self
    }

    pub fn with_robust(mut self, robust: bool) -> Self {
        self.robust = robust;
        self
    }

    pub fn with_x_partial(mut self, x_partial: impl Into<Var>) -> Self {
        self.x_partial = Some(x_partial.into());
        self
    }

    pub fn with_y_partial(mut self, y_partial: impl Into<Var>) -> Self {
        self.y_partial = Some(y_partial.into());
        self
    }

    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn with_dropna(mut self, dropna: bool) -> Self {
        self.dropna = dropna;
        self
    }

    pub fn with_x_jitter(mut self, jitter: f64) -> Self {
        self.x_jitter = Some(jitter);
        self
    }

    pub fn with_y_jitter(mut self, jitter: f64) -> Self {
        self.y_jitter = Some(jitter);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
