//! Grouping, estimation and styling behind categorical plots

use crate::config::{CategoricalOptions, PlotKind};
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use statplot_confidence::{percentile_interval, Bootstrap, ConfidenceInterval, Estimator, Units};
use statplot_core::palette::default_cycle;
use statplot_core::utils::{linspace, mean, percentile_sorted, sorted};
use statplot_core::{color_palette, Color, PaletteSpec};
use statplot_polars::{DataFrame, Error, Result, Var, Variables};
use tracing::{debug, instrument};

/// Width shared by the bars or boxes of one category
const GROUP_WIDTH: f64 = 0.8;

/// Mean over standard deviation below which auto kind picks bars
const BAR_RATIO: f64 = 2.5;

/// Estimates of one hue level across every category
#[derive(Debug, Clone, PartialEq)]
pub struct HueEstimates {
    pub hue: Option<String>,
    pub positions: Vec<f64>,
    pub heights: Vec<f64>,
    pub cis: Vec<Option<ConfidenceInterval>>,
}

/// Quartiles, whiskers and outliers of a set of values
///
/// Whiskers reach the most extreme observations within 1.5 IQR of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub fliers: Vec<f64>,
}

impl BoxSummary {
    /// Summary of the finite values, `None` when there are none
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let data: Vec<f64> = sorted(values).into_iter().filter(|v| v.is_finite()).collect();
        if data.is_empty() {
            return None;
        }
        let q1 = percentile_sorted(&data, 25.0);
        let median = percentile_sorted(&data, 50.0);
        let q3 = percentile_sorted(&data, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let whisker_low = data.iter().copied().find(|&v| v >= lower_fence).unwrap_or(data[0]);
        let whisker_high = data
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= upper_fence)
            .unwrap_or(data[data.len() - 1]);
        let fliers = data
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }
}

/// Box summary of one category within one hue level
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub position: f64,
    pub x: String,
    pub hue: Option<String>,
    pub summary: BoxSummary,
}

/// Pick bar or point when the kind is left to the data
fn infer_kind(count_mode: bool, y: &[f64]) -> PlotKind {
    if count_mode {
        return PlotKind::Bar;
    }
    let finite: Vec<f64> = y.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.iter().all(|v| (0.0..=1.0).contains(v)) {
        return PlotKind::Point;
    }
    let m = mean(&finite);
    let sd = (finite.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / finite.len() as f64).sqrt();
    if m / sd < BAR_RATIO {
        PlotKind::Bar
    } else {
        PlotKind::Point
    }
}

/// One style entry per hue level, `default` repeated when not given
fn per_level(given: Option<&Vec<String>>, default: &str, n: usize, what: &str) -> Result<Vec<String>> {
    match given {
        None => Ok(vec![default.to_string(); n]),
        Some(values) if values.len() == n => Ok(values.clone()),
        Some(values) => Err(Error::Core(statplot_core::Error::Configuration(format!(
            "{what} has {} entries but there are {n} hue levels",
            values.len()
        )))),
    }
}

/// Resolved categorical data, orders, kind and colors
#[derive(Debug, Clone)]
pub struct CategoricalPlotter {
    x: Vec<Option<String>>,
    y: Vec<f64>,
    hue: Option<Vec<Option<String>>>,
    units: Option<Vec<Option<String>>>,
    x_name: Option<String>,
    y_name: Option<String>,
    hue_name: Option<String>,
    x_order: Vec<String>,
    hue_order: Option<Vec<String>>,
    count_mode: bool,
    estimator: Estimator,
    kind: PlotKind,
    colors: Vec<Color>,
    x_palette: bool,
    markers: Vec<String>,
    linestyles: Vec<String>,
    options: CategoricalOptions,
}

impl CategoricalPlotter {
    /// Resolve the variables and settle orders, kind, colors and styles
    ///
    /// Without `y` the plotter counts observations per category.
    #[instrument(skip(x, y, hue, data, options))]
    pub fn new(
        x: &Var,
        y: Option<&Var>,
        hue: Option<&Var>,
        data: Option<&DataFrame>,
        options: CategoricalOptions,
    ) -> Result<Self> {
        let mut vars = Variables::establish(
            data,
            &[("x", Some(x)), ("y", y), ("hue", hue), ("units", options.units.as_ref())],
        )?;
        if options.dropna {
            vars.dropna(&["x", "y", "hue", "units"]);
        }

        let x_vector = vars.get("x").ok_or_else(|| Error::MissingData("x".to_string()))?;
        let x_labels = x_vector.as_labels();
        let count_mode = y.is_none();
        let y_values = match vars.numeric("y")? {
            Some(values) => values,
            None => x_vector.as_numeric().unwrap_or_else(|_| vec![1.0; x_labels.len()]),
        };

        let x_order = options.x_order.clone().unwrap_or_else(|| x_vector.levels());
        let hue_order = match vars.get("hue") {
            Some(h) => Some(options.hue_order.clone().unwrap_or_else(|| h.levels())),
            None => None,
        };
        let n_hue = hue_order.as_ref().map_or(1, Vec::len);

        let markers = per_level(options.markers.as_ref(), "o", n_hue, "markers")?;
        let linestyles = per_level(options.linestyles.as_ref(), "-", n_hue, "linestyles")?;

        let (estimator, ci) = if count_mode {
            (Estimator::Count, None)
        } else {
            (options.estimator, options.ci)
        };
        let kind = match options.kind {
            PlotKind::Auto => infer_kind(count_mode, &y_values),
            explicit => explicit,
        };

        let x_palette = hue_order.is_none() && options.palette.is_some();
        let colors = Self::resolve_colors(&options, &x_order, hue_order.as_deref())?;
        debug!(
            "Categorical plotter: {} levels, {} hue levels, kind {}",
            x_order.len(),
            n_hue,
            kind
        );

        let options = CategoricalOptions { ci, ..options };
        Ok(Self {
            x_name: x_vector.name().map(str::to_string),
            y_name: if count_mode {
                Some("count".to_string())
            } else {
                vars.get("y").and_then(|v| v.name()).map(str::to_string)
            },
            hue_name: vars.get("hue").and_then(|v| v.name()).map(str::to_string),
            x: x_labels,
            y: y_values,
            hue: vars.labels("hue"),
            units: vars.labels("units"),
            x_order,
            hue_order,
            count_mode,
            estimator,
            kind,
            colors,
            x_palette,
            markers,
            linestyles,
            options,
        })
    }

    fn resolve_colors(
        options: &CategoricalOptions,
        x_order: &[String],
        hue_order: Option<&[String]>,
    ) -> Result<Vec<Color>> {
        let levels = hue_order.unwrap_or(x_order);
        let n = levels.len();

        if let Some(color) = &options.color {
            return Ok(vec![Color::parse(color)?; n]);
        }
        match &options.palette {
            None if hue_order.is_none() => {
                let first = default_cycle().first().copied().unwrap_or(Color::BLACK);
                Ok(vec![first; n])
            }
            None => Ok(color_palette(None, n)?),
            Some(PaletteSpec::Mapping(mapping)) => levels
                .iter()
                .map(|level| {
                    mapping.get(level).copied().ok_or_else(|| {
                        Error::Core(statplot_core::Error::Configuration(format!(
                            "Palette has no color for level {level}"
                        )))
                    })
                })
                .collect(),
            Some(palette) => Ok(color_palette(Some(palette), n)?),
        }
    }

    /// Category labels of each observation
    pub fn x(&self) -> &[Option<String>] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn hue(&self) -> Option<&[Option<String>]> {
        self.hue.as_deref()
    }

    pub fn units(&self) -> Option<&[Option<String>]> {
        self.units.as_deref()
    }

    pub fn x_name(&self) -> Option<&str> {
        self.x_name.as_deref()
    }

    pub fn y_name(&self) -> Option<&str> {
        self.y_name.as_deref()
    }

    pub fn hue_name(&self) -> Option<&str> {
        self.hue_name.as_deref()
    }

    pub fn x_order(&self) -> &[String] {
        &self.x_order
    }

    pub fn hue_order(&self) -> Option<&[String]> {
        self.hue_order.as_deref()
    }

    pub fn n_hue(&self) -> usize {
        self.hue_order.as_ref().map_or(1, Vec::len)
    }

    /// Whether `y` was omitted and observations are counted
    pub fn count_mode(&self) -> bool {
        self.count_mode
    }

    pub fn estimator(&self) -> Estimator {
        self.estimator
    }

    pub fn ci(&self) -> Option<f64> {
        self.options.ci
    }

    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    /// One color per hue level, or per category without hue
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Whether colors vary along the categories rather than the hue levels
    pub fn x_palette(&self) -> bool {
        self.x_palette
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn linestyles(&self) -> &[String] {
        &self.linestyles
    }

    pub fn options(&self) -> &CategoricalOptions {
        &self.options
    }

    /// Category centers `0..n`
    pub fn positions(&self) -> Vec<f64> {
        (0..self.x_order.len()).map(|i| i as f64).collect()
    }

    /// Shift of each hue level from the category center
    pub fn offset(&self) -> Vec<f64> {
        let n_hue = self.n_hue();
        let raw = match self.kind {
            PlotKind::Point => linspace(0.0, self.options.dodge, n_hue),
            _ => {
                let mut edges = linspace(0.0, GROUP_WIDTH, n_hue + 1);
                edges.truncate(n_hue);
                edges
            }
        };
        let center = mean(&raw);
        raw.into_iter().map(|v| v - center).collect()
    }

    /// Row indices of every hue level (a single `None` group without hue)
    fn hue_groups(&self) -> Vec<(Option<String>, Vec<usize>)> {
        let all: Vec<usize> = (0..self.x.len()).collect();
        match (&self.hue, &self.hue_order) {
            (Some(hue), Some(order)) => order
                .iter()
                .map(|level| {
                    let rows = all
                        .iter()
                        .copied()
                        .filter(|&i| hue[i].as_deref() == Some(level.as_str()))
                        .collect();
                    (Some(level.clone()), rows)
                })
                .collect(),
            _ => vec![(None, all)],
        }
    }

    fn rows_at(&self, rows: &[usize], level: &str) -> Vec<usize> {
        rows.iter()
            .copied()
            .filter(|&i| self.x[i].as_deref() == Some(level))
            .collect()
    }

    fn runner(&self, rows: &[usize]) -> Bootstrap {
        let runner = Bootstrap::new()
            .with_resamples(self.options.n_boot)
            .with_optional_seed(self.options.seed);
        match &self.units {
            Some(units) => {
                let labels: Vec<Option<String>> = rows.iter().map(|&i| units[i].clone()).collect();
                runner.with_units(Units::from_labels(&labels))
            }
            None => runner,
        }
    }

    /// Estimate and interval at each category, one entry per hue level
    ///
    /// Positions already include the hue offset. Empty groups yield a `NaN`
    /// height (zero when counting) and no interval.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub fn estimate_data(&self) -> Result<Vec<HueEstimates>> {
        let positions = self.positions();
        let offset = self.offset();
        let mut rng = StdRng::seed_from_u64(self.options.seed.unwrap_or_else(|| thread_rng().gen()));

        let mut out = Vec::with_capacity(self.n_hue());
        for (h, (hue, rows)) in self.hue_groups().into_iter().enumerate() {
            let mut heights = Vec::with_capacity(self.x_order.len());
            let mut cis = Vec::with_capacity(self.x_order.len());
            for level in &self.x_order {
                let members = self.rows_at(&rows, level);
                let values: Vec<f64> = members.iter().map(|&i| self.y[i]).collect();
                heights.push(self.estimator.estimate(&values));

                let ci = match self.options.ci {
                    Some(level) if !values.is_empty() => {
                        let boots: Vec<f64> =
                            self.runner(&members)
                                .run_with_rng(&[values.as_slice()], &self.estimator, &mut rng)?;
                        percentile_interval(&boots, Some(level))?
                    }
                    _ => None,
                };
                cis.push(ci);
            }
            out.push(HueEstimates {
                hue,
                positions: positions.iter().map(|p| p + offset[h]).collect(),
                heights,
                cis,
            });
        }
        Ok(out)
    }

    /// Box summaries per hue level and category, skipping empty groups
    pub fn box_data(&self) -> Vec<BoxStats> {
        let offset = self.offset();
        let mut out = Vec::new();
        for (h, (hue, rows)) in self.hue_groups().into_iter().enumerate() {
            for (p, level) in self.x_order.iter().enumerate() {
                let values: Vec<f64> = self.rows_at(&rows, level).iter().map(|&i| self.y[i]).collect();
                if let Some(summary) = BoxSummary::from_values(&values) {
                    out.push(BoxStats {
                        position: p as f64 + offset[h],
                        x: level.clone(),
                        hue: hue.clone(),
                        summary,
                    });
                }
            }
        }
        out
    }
}
