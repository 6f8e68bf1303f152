//! Regression plots: scatter plus fitted model, residuals, faceted fits

use crate::axes::{Axes, Band, Legend, Line, Scatter};
use crate::error::Result;
use crate::facet::{filter_level, level_colors, FacetGrid};
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use statplot_core::{Color, PaletteSpec};
use statplot_polars::{PlotDataExt, Var};
use statplot_regression::lowess::{DEFAULT_FRAC, DEFAULT_ITERATIONS};
use statplot_regression::{lowess, RegressionOptions, RegressionPlotter};
use tracing::{debug, instrument};

/// Alpha of the confidence band
const BAND_ALPHA: f64 = 0.15;
/// Scatter alpha when the color carries none
const SCATTER_ALPHA: f64 = 0.8;

/// Options for [`regplot`]
///
/// Model options are flattened, so one JSON object configures both:
///
/// ```rust
/// use statplot_viz::RegplotOptions;
///
/// let opts: RegplotOptions = serde_json::from_str(r#"{"order": 2, "scatter": false}"#).unwrap();
/// assert_eq!(opts.regression.order, 2);
/// assert!(!opts.scatter);
/// assert!(opts.fit_reg);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegplotOptions {
    #[serde(flatten)]
    pub regression: RegressionOptions,
    pub scatter: bool,
    pub fit_reg: bool,
    pub color: Option<String>,
    pub marker: String,
    pub label: Option<String>,
    /// Scatter alpha overriding the default
    pub scatter_alpha: Option<f64>,
}

impl Default for RegplotOptions {
    fn default() -> Self {
        Self {
            regression: RegressionOptions::default(),
            scatter: true,
            fit_reg: true,
            color: None,
            marker: "o".to_string(),
            label: None,
            scatter_alpha: None,
        }
    }
}

impl RegplotOptions {
    pub fn with_regression(mut self, regression: RegressionOptions) -> Self {
        self.regression = regression;
        self
    }

    pub fn with_scatter(mut self, scatter: bool) -> Self {
        self.scatter = scatter;
        self
    }

    pub fn with_fit_reg(mut self, fit_reg: bool) -> Self {
        self.fit_reg = fit_reg;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_scatter_alpha(mut self, alpha: f64) -> Self {
        self.scatter_alpha = Some(alpha);
        self
    }
}

fn draw_regplot(
    plotter: &RegressionPlotter,
    options: &RegplotOptions,
    color: Color,
    label: Option<String>,
    ax: &mut Axes,
) -> Result<()> {
    if let Some(name) = plotter.x_name() {
        ax.set_xlabel(name);
    }
    if let Some(name) = plotter.y_name() {
        ax.set_ylabel(name);
    }

    if options.scatter {
        match plotter.x_estimator() {
            None => {
                let mut rng = StdRng::seed_from_u64(plotter.options().seed.unwrap_or_else(|| thread_rng().gen()));
                let (xs, ys) = plotter.scatter_data(&mut rng);
                let alpha = options
                    .scatter_alpha
                    .or(if color.a.is_some() { None } else { Some(SCATTER_ALPHA) });
                ax.scatter(Scatter {
                    alpha,
                    marker: options.marker.clone(),
                    label: label.clone(),
                    ..Scatter::new(xs, ys, color)
                });
            }
            Some(_) => {
                let estimates = plotter.estimate_data()?;
                let (xs, ys): (Vec<f64>, Vec<f64>) = estimates.iter().map(|e| (e.x, e.y)).unzip();
                ax.scatter(Scatter {
                    marker: options.marker.clone(),
                    label: label.clone(),
                    ..Scatter::new(xs, ys, color)
                });
                for estimate in &estimates {
                    if let Some(ci) = &estimate.ci {
                        ax.plot(Line::new(vec![estimate.x, estimate.x], vec![ci.lower, ci.upper], color));
                    }
                }
            }
        }
    }

    if options.fit_reg {
        let x_range = if ax.is_empty() { None } else { Some(ax.xlim()) };
        let fit = plotter.fit_regression(x_range)?;
        let line_label = if options.scatter { None } else { label };
        if let Some(bands) = &fit.bands {
            ax.fill_between(Band {
                x: fit.grid.clone(),
                lower: bands.iter().map(|b| b.lower).collect(),
                upper: bands.iter().map(|b| b.upper).collect(),
                color,
                alpha: BAND_ALPHA,
            });
        }
        ax.plot(Line::new(fit.grid, fit.yhat, color).with_width(2.0).with_label(line_label));
    }
    Ok(())
}

/// Scatter `y` against `x` and overlay a fitted regression with its band
///
/// The color defaults to the next one in the axes cycle.
#[instrument(skip_all, fields(fit_reg = options.fit_reg, scatter = options.scatter))]
pub fn regplot(x: &Var, y: &Var, data: Option<&DataFrame>, options: &RegplotOptions, ax: &mut Axes) -> Result<()> {
    let plotter = RegressionPlotter::new(x, y, data, options.regression.clone())?;
    let color = match &options.color {
        Some(spec) => Color::parse(spec)?,
        None => ax.next_color(),
    };
    draw_regplot(&plotter, options, color, options.label.clone(), ax)
}

/// Options for [`residplot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidplotOptions {
    pub order: usize,
    pub robust: bool,
    /// Overlay a lowess smooth of the residuals
    pub lowess: bool,
    pub x_partial: Option<Var>,
    pub y_partial: Option<Var>,
    pub dropna: bool,
    pub color: Option<String>,
    pub label: Option<String>,
}

impl Default for ResidplotOptions {
    fn default() -> Self {
        Self {
            order: 1,
            robust: false,
            lowess: false,
            x_partial: None,
            y_partial: None,
            dropna: true,
            color: None,
            label: None,
        }
    }
}

impl ResidplotOptions {
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_robust(mut self, robust: bool) -> Self {
        self.robust = robust;
        self
    }

    pub fn with_lowess(mut self, lowess: bool) -> Self {
        self.lowess = lowess;
        self
    }

    pub fn with_dropna(mut self, dropna: bool) -> Self {
        self.dropna = dropna;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Plot the residuals of a regression of `y` on `x` around a zero line
#[instrument(skip_all, fields(order = options.order, lowess = options.lowess))]
pub fn residplot(x: &Var, y: &Var, data: Option<&DataFrame>, options: &ResidplotOptions, ax: &mut Axes) -> Result<()> {
    let mut regression = RegressionOptions::default()
        .with_ci(None)
        .with_order(options.order)
        .with_robust(options.robust)
        .with_dropna(options.dropna);
    regression.x_partial = options.x_partial.clone();
    regression.y_partial = options.y_partial.clone();

    let plotter = RegressionPlotter::new(x, y, data, regression)?;
    let residuals = plotter.residuals()?;
    let color = match &options.color {
        Some(spec) => Color::parse(spec)?,
        None => ax.next_color(),
    };

    ax.axhline(0.0, Color::parse("gray")?, ":");
    if options.lowess {
        let curve = lowess(plotter.x(), &residuals, DEFAULT_FRAC, DEFAULT_ITERATIONS)?;
        ax.plot(Line::new(curve.x, curve.y, color));
    }
    ax.scatter(Scatter {
        label: options.label.clone(),
        ..Scatter::new(plotter.x().to_vec(), residuals, color)
    });
    if let Some(name) = plotter.x_name() {
        ax.set_xlabel(name);
    }
    if let Some(name) = plotter.y_name() {
        ax.set_ylabel(name);
    }
    Ok(())
}

/// Options for [`lmplot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LmplotOptions {
    pub hue: Option<String>,
    pub row: Option<String>,
    pub col: Option<String>,
    pub col_wrap: Option<usize>,
    pub hue_order: Option<Vec<String>>,
    /// Hue colors, `husl` when not given
    pub palette: Option<PaletteSpec>,
    /// One marker per hue level
    pub markers: Option<Vec<String>>,
    pub legend: bool,
    pub regplot: RegplotOptions,
}

impl Default for LmplotOptions {
    fn default() -> Self {
        Self {
            hue: None,
            row: None,
            col: None,
            col_wrap: None,
            hue_order: None,
            palette: None,
            markers: None,
            legend: true,
            regplot: RegplotOptions::default(),
        }
    }
}

impl LmplotOptions {
    pub fn with_hue(mut self, hue: impl Into<String>) -> Self {
        self.hue = Some(hue.into());
        self
    }

    pub fn with_row(mut self, row: impl Into<String>) -> Self {
        self.row = Some(row.into());
        self
    }

    pub fn with_col(mut self, col: impl Into<String>) -> Self {
        self.col = Some(col.into());
        self
    }

    pub fn with_col_wrap(mut self, col_wrap: usize) -> Self {
        self.col_wrap = Some(col_wrap);
        self
    }

    pub fn with_hue_order<S: Into<String>>(mut self, order: impl IntoIterator<Item = S>) -> Self {
        self.hue_order = Some(order.into_iter().map(Into::into).collect());
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

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_regplot(mut self, regplot: RegplotOptions) -> Self {
        self.regplot = regplot;
        self
    }
}

/// Regression plots of columns `x` and `y` faceted by `row`, `col` and `hue`
#[instrument(skip(data, options), fields(hue = ?options.hue, row = ?options.row, col = ?options.col))]
pub fn lmplot(x: &str, y: &str, data: &DataFrame, options: &LmplotOptions) -> Result<FacetGrid> {
    let mut grid = FacetGrid::new(data, options.row.as_deref(), options.col.as_deref(), options.col_wrap)?;

    let hue_levels = match (&options.hue, &options.hue_order) {
        (Some(_), Some(order)) => order.clone(),
        (Some(hue), None) => data.plot_vector(hue)?.levels(),
        (None, _) => Vec::new(),
    };
    let colors = match &options.hue {
        Some(_) => level_colors(options.palette.as_ref(), "husl", &hue_levels)?,
        None => vec![match &options.regplot.color {
            Some(spec) => Color::parse(spec)?,
            None => statplot_core::palette::default_cycle()
                .first()
                .copied()
                .unwrap_or(Color::BLACK),
        }],
    };
    let markers = match &options.markers {
        Some(markers) if markers.len() != hue_levels.len().max(1) => {
            return Err(statplot_core::Error::Configuration(format!(
                "markers has {} entries but there are {} hue levels",
                markers.len(),
                hue_levels.len().max(1)
            ))
            .into())
        }
        Some(markers) => markers.clone(),
        None => vec![options.regplot.marker.clone(); hue_levels.len().max(1)],
    };

    let x_var = Var::from(x);
    let y_var = Var::from(y);
    for (index, subset) in grid.facet_data(data)? {
        let groups: Vec<(Option<String>, DataFrame)> = match &options.hue {
            Some(hue) => hue_levels
                .iter()
                .map(|level| Ok((Some(level.clone()), filter_level(&subset, hue, level)?)))
                .collect::<Result<_>>()?,
            None => vec![(None, subset)],
        };
        for (h, (level, frame)) in groups.into_iter().enumerate() {
            if frame.height() == 0 {
                continue;
            }
            let plotter = RegressionPlotter::new(&x_var, &y_var, Some(&frame), options.regplot.regression.clone())?;
            let regplot = RegplotOptions {
                marker: markers[h].clone(),
                ..options.regplot.clone()
            };
            draw_regplot(&plotter, &regplot, colors[h], level, &mut grid.axes_mut()[index])?;
        }
    }
    grid.set_axis_labels(x, y);

    if let Some(hue) = &options.hue {
        if options.legend && grid.hue_is_distinct(hue) {
            debug!("Adding legend for {}", hue);
            grid.add_legend(Legend {
                title: Some(hue.clone()),
                entries: hue_levels.iter().cloned().zip(colors.iter().copied()).collect(),
            });
        }
    }
    Ok(grid)
}
