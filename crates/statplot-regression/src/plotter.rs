//! Data preparation and model fitting behind regression plots

use crate::config::{Bins, FitKind, RegressionOptions};
use crate::fit::{fit_lowess, fit_with_bands, predict};
use crate::linalg::regress_out;
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use statplot_confidence::{percentile_interval, percentile_intervals, Bootstrap, ConfidenceInterval, Estimator, Units};
use statplot_core::utils::{finite_range, linspace, nan_last, percentiles};
use statplot_polars::{DataFrame, Error, Result, Var, Variables};
use tracing::{debug, instrument};

/// Number of grid points a regression line is evaluated on
pub const GRID_SIZE: usize = 100;

const ROLES: [&str; 5] = ["x", "y", "units", "x_partial", "y_partial"];

/// Estimate of `y` at one distinct (possibly binned) `x` value
#[derive(Debug, Clone, PartialEq)]
pub struct BinEstimate {
    pub x: f64,
    pub y: f64,
    pub ci: Option<ConfidenceInterval>,
}

/// A fitted regression curve and its confidence band
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionFit {
    pub grid: Vec<f64>,
    pub yhat: Vec<f64>,
    /// Per grid point intervals, absent when `ci` is `None` or for lowess
    pub bands: Option<Vec<ConfidenceInterval>>,
}

/// Map each `x` onto bin centers
///
/// A count `n` places the centers at the inner `n` of `n + 2` evenly spaced
/// percentiles of `x`. Each value goes to its nearest center, the lower one
/// on ties. Returns the binned values and the centers.
///
/// ```rust
/// use statplot_regression::{bin_predictor, Bins};
///
/// let x: Vec<f64> = (0..10).map(f64::from).collect();
/// let (binned, centers) = bin_predictor(&x, &Bins::Count(3));
/// assert_eq!(centers.len(), 3);
/// assert!(binned.iter().all(|b| centers.contains(b)));
/// ```
pub fn bin_predictor(x: &[f64], bins: &Bins) -> (Vec<f64>, Vec<f64>) {
    let mut centers = match bins {
        Bins::Count(n) => {
            let ps = linspace(0.0, 100.0, n + 2);
            let inner = &ps[1..ps.len() - 1];
            percentiles(x, inner)
        }
        Bins::Centers(centers) => centers.clone(),
    };
    centers.sort_by(nan_last);

    let binned = x
        .iter()
        .map(|&xi| {
            centers
                .iter()
                .copied()
                .fold((f64::NAN, f64::INFINITY), |(best, dist), c| {
                    let d = (xi - c).abs();
                    if d < dist {
                        (c, d)
                    } else {
                        (best, dist)
                    }
                })
                .0
        })
        .collect();
    (binned, centers)
}

/// Linear interpolation of a sorted curve, constant beyond its ends
fn interpolate(xs: &[f64], ys: &[f64], at: f64) -> f64 {
    match xs.iter().position(|&x| x >= at) {
        None => ys.last().copied().unwrap_or(f64::NAN),
        Some(0) => ys[0],
        Some(i) => {
            let (x0, x1) = (xs[i - 1], xs[i]);
            if x1 == x0 {
                ys[i]
            } else {
                ys[i - 1] + (ys[i] - ys[i - 1]) * (at - x0) / (x1 - x0)
            }
        }
    }
}

/// Resolved data and model choice for one regression plot
#[derive(Debug, Clone)]
pub struct RegressionPlotter {
    x: Vec<f64>,
    y: Vec<f64>,
    x_name: Option<String>,
    y_name: Option<String>,
    units: Option<Vec<Option<String>>>,
    x_discrete: Vec<f64>,
    bin_centers: Option<Vec<f64>>,
    x_estimator: Option<Estimator>,
    fit_kind: FitKind,
    options: RegressionOptions,
}

impl RegressionPlotter {
    /// Resolve `x` and `y` (and the optional roles in `options`) against
    /// `data`, drop incomplete rows, partial out covariates and bin `x`
    #[instrument(skip(x, y, data, options))]
    pub fn new(x: &Var, y: &Var, data: Option<&DataFrame>, options: RegressionOptions) -> Result<Self> {
        let fit_kind = FitKind::resolve(options.order, options.logistic, options.lowess, options.robust)?;

        let mut vars = Variables::establish(
            data,
            &[
                ("x", Some(x)),
                ("y", Some(y)),
                ("units", options.units.as_ref()),
                ("x_partial", options.x_partial.as_ref()),
                ("y_partial", options.y_partial.as_ref()),
            ],
        )?;
        if options.dropna {
            vars.dropna(&ROLES);
        }

        let mut x_values = vars.numeric("x")?.ok_or_else(|| Error::MissingData("x".to_string()))?;
        let mut y_values = vars.numeric("y")?.ok_or_else(|| Error::MissingData("y".to_string()))?;
        if let Some(partial) = vars.numeric("x_partial")? {
            x_values = regress_out(&x_values, &partial)?;
        }
        if let Some(partial) = vars.numeric("y_partial")? {
            y_values = regress_out(&y_values, &partial)?;
        }

        let mut x_estimator = options.x_estimator;
        let (x_discrete, bin_centers) = match &options.x_bins {
            Some(bins) => {
                let (binned, centers) = bin_predictor(&x_values, bins);
                x_estimator.get_or_insert(Estimator::Mean);
                (binned, Some(centers))
            }
            None => (x_values.clone(), None),
        };

        debug!(
            "Regression plotter over {} observations with {:?} fit",
            x_values.len(),
            fit_kind
        );

        Ok(Self {
            x_name: vars.get("x").and_then(|v| v.name()).map(str::to_string),
            y_name: vars.get("y").and_then(|v| v.name()).map(str::to_string),
            units: vars.labels("units"),
            x: x_values,
            y: y_values,
            x_discrete,
            bin_centers,
            x_estimator,
            fit_kind,
            options,
        })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn x_name(&self) -> Option<&str> {
        self.x_name.as_deref()
    }

    pub fn y_name(&self) -> Option<&str> {
        self.y_name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Predictor after binning, equal to `x` without bins
    pub fn x_discrete(&self) -> &[f64] {
        &self.x_discrete
    }

    pub fn bin_centers(&self) -> Option<&[f64]> {
        self.bin_centers.as_deref()
    }

    /// Estimator applied per distinct `x`; set implicitly by binning
    pub fn x_estimator(&self) -> Option<Estimator> {
        self.x_estimator
    }

    pub fn fit_kind(&self) -> FitKind {
        self.fit_kind
    }

    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Unit labels after missing rows were dropped
    pub fn units(&self) -> Option<&[Option<String>]> {
        self.units.as_deref()
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.options.seed.unwrap_or_else(|| thread_rng().gen()))
    }

    fn runner(&self, units: Option<&[Option<String>]>) -> Bootstrap {
        let runner = Bootstrap::new()
            .with_resamples(self.options.n_boot)
            .with_optional_seed(self.options.seed);
        match units {
            Some(labels) => runner.with_units(Units::from_labels(labels)),
            None => runner,
        }
    }

    /// Observations with uniform jitter in `(-j, j)` applied where requested
    pub fn scatter_data<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec<f64>, Vec<f64>) {
        let jitter = |values: &[f64], amount: Option<f64>, rng: &mut R| -> Vec<f64> {
            match amount.map(f64::abs) {
                Some(j) if j > 0.0 => values.iter().map(|v| v + rng.gen_range(-j..j)).collect(),
                _ => values.to_vec(),
            }
        };
        let x = jitter(&self.x, self.options.x_jitter, rng);
        let y = jitter(&self.y, self.options.y_jitter, rng);
        (x, y)
    }

    /// Point estimate and bootstrap interval of `y` at every distinct `x`
    ///
    /// Each interval resamples only the observations (and units) at that
    /// `x` value, at the `x_ci` level.
    #[instrument(skip(self))]
    pub fn estimate_data(&self) -> Result<Vec<BinEstimate>> {
        let estimator = self.x_estimator.unwrap_or_default();
        let level = self.options.x_ci.resolve(self.options.ci);

        let mut levels = self.x_discrete.clone();
        levels.retain(|v| !v.is_nan());
        levels.sort_by(nan_last);
        levels.dedup();

        let mut rng = self.rng();
        let mut estimates = Vec::with_capacity(levels.len());
        for &value in &levels {
            let members: Vec<usize> = (0..self.x_discrete.len())
                .filter(|&i| self.x_discrete[i] == value)
                .collect();
            let ys: Vec<f64> = members.iter().map(|&i| self.y[i]).collect();
            let estimate = estimator.estimate(&ys);

            let ci = match level {
                None => None,
                Some(level) => {
                    let group_units: Option<Vec<Option<String>>> = self
                        .units
                        .as_ref()
                        .map(|labels| members.iter().map(|&i| labels[i].clone()).collect());
                    let boots: Vec<f64> = self
                        .runner(group_units.as_deref())
                        .run_with_rng(&[ys.as_slice()], &estimator, &mut rng)?;
                    percentile_interval(&boots, Some(level))?
                }
            };
            estimates.push(BinEstimate {
                x: value,
                y: estimate,
                ci,
            });
        }
        debug!("Estimated {} distinct x values with {}", estimates.len(), estimator.name());
        Ok(estimates)
    }

    /// Fit the model on `GRID_SIZE` points
    ///
    /// The grid spans the data when `truncate` is set or no range is given,
    /// otherwise `x_range`. Lowess is evaluated at the sorted data instead.
    pub fn fit_regression(&self, x_range: Option<(f64, f64)>) -> Result<RegressionFit> {
        if self.fit_kind == FitKind::Lowess {
            let curve = fit_lowess(&self.x, &self.y)?;
            return Ok(RegressionFit {
                grid: curve.x,
                yhat: curve.y,
                bands: None,
            });
        }

        let data_range = finite_range(&self.x);
        let range = if self.options.truncate {
            data_range
        } else {
            x_range.or(data_range)
        };
        let (lo, hi) = range.ok_or_else(|| statplot_core::Error::empty_input("fit_regression"))?;
        self.fit_regression_on(&linspace(lo, hi, GRID_SIZE))
    }

    /// Fit the model at explicit grid points
    #[instrument(skip(self, grid), fields(grid = grid.len()))]
    pub fn fit_regression_on(&self, grid: &[f64]) -> Result<RegressionFit> {
        if self.fit_kind == FitKind::Lowess {
            let curve = fit_lowess(&self.x, &self.y)?;
            let yhat = grid.iter().map(|&g| interpolate(&curve.x, &curve.y, g)).collect();
            return Ok(RegressionFit {
                grid: grid.to_vec(),
                yhat,
                bands: None,
            });
        }

        let fit = fit_with_bands(
            self.fit_kind,
            &self.x,
            &self.y,
            grid,
            self.options.ci,
            &self.runner(self.units.as_deref()),
        )?;
        let bands = match &fit.boots {
            Some(boots) => percentile_intervals(boots, self.options.ci)?,
            None => None,
        };
        Ok(RegressionFit {
            grid: grid.to_vec(),
            yhat: fit.yhat,
            bands,
        })
    }

    /// `y` minus the fitted value at each observed `x`
    pub fn residuals(&self) -> Result<Vec<f64>> {
        let fitted = match self.fit_kind {
            FitKind::Lowess => {
                let curve = fit_lowess(&self.x, &self.y)?;
                self.x.iter().map(|&g| interpolate(&curve.x, &curve.y, g)).collect()
            }
            kind => predict(kind, &self.x, &self.y, &self.x)?,
        };
        Ok(self.y.iter().zip(&fitted).map(|(y, f)| y - f).collect())
    }
}
