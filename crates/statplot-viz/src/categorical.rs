//! Categorical plots: bars, points and boxes per category

use crate::axes::{Axes, Bar, BoxArtist, Legend, Line, Scatter};
use crate::error::Result;
use crate::facet::FacetGrid;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use statplot_categorical::{CategoricalOptions, CategoricalPlotter, PlotKind};
use statplot_core::Color;
use statplot_polars::Var;
use tracing::{debug, instrument};

/// Total width shared by the hue levels at one category
const GROUP_WIDTH: f64 = 0.8;
/// Gray of error bars drawn over bars
const ERROR_GRAY: f64 = 0.26;

/// Options for the categorical plot functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoricalPlotOptions {
    #[serde(flatten)]
    pub categorical: CategoricalOptions,
    /// Connect point estimates of each hue level
    pub join: bool,
    /// Reference line drawn across the axes at this height
    pub hline: Option<f64>,
}

impl Default for CategoricalPlotOptions {
    fn default() -> Self {
        Self {
            categorical: CategoricalOptions::default(),
            join: true,
            hline: None,
        }
    }
}

impl CategoricalPlotOptions {
    pub fn with_categorical(mut self, categorical: CategoricalOptions) -> Self {
        self.categorical = categorical;
        self
    }

    pub fn with_join(mut self, join: bool) -> Self {
        self.join = join;
        self
    }

    pub fn with_hline(mut self, hline: f64) -> Self {
        self.hline = Some(hline);
        self
    }
}

/// Color of hue level `h` at category `i`
fn element_color(plotter: &CategoricalPlotter, h: usize, i: usize) -> Color {
    let index = if plotter.x_palette() { i } else { h };
    plotter.colors().get(index).copied().unwrap_or(Color::BLACK)
}

fn draw_bars(plotter: &CategoricalPlotter, ax: &mut Axes) -> Result<()> {
    let width = GROUP_WIDTH / plotter.n_hue() as f64;
    let error_color = Color::rgb(ERROR_GRAY, ERROR_GRAY, ERROR_GRAY);
    for (h, estimates) in plotter.estimate_data()?.iter().enumerate() {
        for (i, (&position, &height)) in estimates.positions.iter().zip(&estimates.heights).enumerate() {
            ax.bar(Bar {
                x: position - width / 2.0,
                width,
                height,
                color: element_color(plotter, h, i),
            });
        }
        for (&position, ci) in estimates.positions.iter().zip(&estimates.cis) {
            if let Some(ci) = ci {
                ax.plot(Line::new(vec![position, position], vec![ci.lower, ci.upper], error_color).with_width(2.0));
            }
        }
    }
    Ok(())
}

fn draw_points(plotter: &CategoricalPlotter, join: bool, ax: &mut Axes) -> Result<()> {
    for (h, estimates) in plotter.estimate_data()?.iter().enumerate() {
        let colors: Vec<Color> = (0..estimates.positions.len())
            .map(|i| element_color(plotter, h, i))
            .collect();
        let hue_color = colors.first().copied().unwrap_or(Color::BLACK);

        for ((&position, ci), &color) in estimates.positions.iter().zip(&estimates.cis).zip(&colors) {
            if let Some(ci) = ci {
                ax.plot(Line::new(vec![position, position], vec![ci.lower, ci.upper], color).with_width(2.0));
            }
        }
        if join {
            let style = plotter.linestyles().get(h).cloned().unwrap_or_else(|| "-".to_string());
            ax.plot(
                Line::new(estimates.positions.clone(), estimates.heights.clone(), hue_color)
                    .with_style(style)
                    .with_label(estimates.hue.clone()),
            );
        }
        ax.scatter(Scatter {
            colors: if plotter.x_palette() { colors } else { vec![hue_color] },
            marker: plotter.markers().get(h).cloned().unwrap_or_else(|| "o".to_string()),
            size: 8.0,
            label: estimates.hue.clone(),
            ..Scatter::new(estimates.positions.clone(), estimates.heights.clone(), hue_color)
        });
    }
    Ok(())
}

fn draw_boxes(plotter: &CategoricalPlotter, ax: &mut Axes) {
    let width = GROUP_WIDTH / plotter.n_hue() as f64 * 0.98;
    let hue_order = plotter.hue_order().unwrap_or_default();
    for stats in plotter.box_data() {
        let h = stats
            .hue
            .as_ref()
            .and_then(|hue| hue_order.iter().position(|level| level == hue))
            .unwrap_or(0);
        let i = plotter.x_order().iter().position(|level| *level == stats.x).unwrap_or(0);
        ax.add_box(BoxArtist {
            position: stats.position,
            width,
            summary: stats.summary,
            color: element_color(plotter, h, i),
        });
    }
}

/// Legend entries for the hue levels, if there are any
fn hue_legend(plotter: &CategoricalPlotter) -> Option<Legend> {
    let order = plotter.hue_order()?;
    Some(Legend {
        title: plotter.hue_name().map(str::to_string),
        entries: order
            .iter()
            .enumerate()
            .map(|(h, level)| (level.clone(), element_color(plotter, h, 0)))
            .collect(),
    })
}

fn draw(plotter: &CategoricalPlotter, join: bool, hline: Option<f64>, legend: bool, ax: &mut Axes) -> Result<()> {
    debug!("Drawing {} plot", plotter.kind());
    match plotter.kind() {
        PlotKind::Point => draw_points(plotter, join, ax)?,
        PlotKind::Box => draw_boxes(plotter, ax),
        PlotKind::Bar | PlotKind::Auto => draw_bars(plotter, ax)?,
    }

    let n = plotter.x_order().len();
    ax.set_xlim(-0.5, n as f64 - 0.5);
    ax.set_xticks(plotter.positions().into_iter().zip(plotter.x_order().iter().cloned()).collect());
    if let Some(name) = plotter.x_name() {
        ax.set_xlabel(name);
    }
    if let Some(name) = plotter.y_name() {
        ax.set_ylabel(name);
    }
    if legend {
        if let Some(legend) = hue_legend(plotter) {
            ax.set_legend(legend);
        }
    }
    if let Some(y) = hline {
        ax.axhline(y, Color::parse("gray")?, "--");
    }
    Ok(())
}

/// Draw a resolved plotter with its own kind
pub fn categorical_plot(plotter: &CategoricalPlotter, options: &CategoricalPlotOptions, ax: &mut Axes) -> Result<()> {
    draw(plotter, options.join, options.hline, true, ax)
}

fn plot_with_kind(
    kind: PlotKind,
    x: &Var,
    y: Option<&Var>,
    hue: Option<&Var>,
    data: Option<&DataFrame>,
    options: &CategoricalPlotOptions,
    ax: &mut Axes,
) -> Result<()> {
    let categorical = options.categorical.clone().with_kind(kind);
    let plotter = CategoricalPlotter::new(x, y, hue, data, categorical)?;
    categorical_plot(&plotter, options, ax)
}

/// Bars at the estimate of `y` per category, with error bars
///
/// Without `y` the bars count the observations in each category.
#[instrument(skip_all)]
pub fn barplot(
    x: &Var,
    y: Option<&Var>,
    hue: Option<&Var>,
    data: Option<&DataFrame>,
    options: &CategoricalPlotOptions,
    ax: &mut Axes,
) -> Result<()> {
    plot_with_kind(PlotKind::Bar, x, y, hue, data, options, ax)
}

/// Point estimates with error bars, optionally joined per hue level
#[instrument(skip_all, fields(join = options.join))]
pub fn pointplot(
    x: &Var,
    y: &Var,
    hue: Option<&Var>,
    data: Option<&DataFrame>,
    options: &CategoricalPlotOptions,
    ax: &mut Axes,
) -> Result<()> {
    plot_with_kind(PlotKind::Point, x, Some(y), hue, data, options, ax)
}

#[instrument(skip_all)]
pub fn boxplot(
    x: &Var,
    y: &Var,
    hue: Option<&Var>,
    data: Option<&DataFrame>,
    options: &CategoricalPlotOptions,
    ax: &mut Axes,
) -> Result<()> {
    plot_with_kind(PlotKind::Box, x, Some(y), hue, data, options, ax)
}

/// Options for [`factorplot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorplotOptions {
    pub hue: Option<String>,
    pub row: Option<String>,
    pub col: Option<String>,
    pub col_wrap: Option<usize>,
    pub legend: bool,
    pub plot: CategoricalPlotOptions,
}

impl Default for FactorplotOptions {
    fn default() -> Self {
        Self {
            hue: None,
            row: None,
            col: None,
            col_wrap: None,
            legend: true,
            plot: CategoricalPlotOptions::default(),
        }
    }
}

impl FactorplotOptions {
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

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_plot(mut self, plot: CategoricalPlotOptions) -> Self {
        self.plot = plot;
        self
    }
}

/// Categorical plots of column `x` (and `y`) faceted by `row` and `col`
///
/// Orders, plot kind and colors are settled on the whole frame so every
/// facet shares them.
#[instrument(skip(data, options), fields(hue = ?options.hue, row = ?options.row, col = ?options.col))]
pub fn factorplot(x: &str, y: Option<&str>, data: &DataFrame, options: &FactorplotOptions) -> Result<FacetGrid> {
    let mut grid = FacetGrid::new(data, options.row.as_deref(), options.col.as_deref(), options.col_wrap)?;

    let x_var = Var::from(x);
    let y_var = y.map(Var::from);
    let hue_var = options.hue.as_deref().map(Var::from);
    let global = CategoricalPlotter::new(
        &x_var,
        y_var.as_ref(),
        hue_var.as_ref(),
        Some(data),
        options.plot.categorical.clone(),
    )?;

    let mut shared = options
        .plot
        .categorical
        .clone()
        .with_x_order(global.x_order().to_vec())
        .with_kind(global.kind());
    if let Some(order) = global.hue_order() {
        shared = shared.with_hue_order(order.to_vec());
    }
    if shared.color.is_none() && shared.palette.is_none() {
        shared.palette = Some(global.colors().to_vec().into());
    }

    for (index, subset) in grid.facet_data(data)? {
        if subset.height() == 0 {
            continue;
        }
        let plotter = CategoricalPlotter::new(&x_var, y_var.as_ref(), hue_var.as_ref(), Some(&subset), shared.clone())?;
        draw(
            &plotter,
            options.plot.join,
            options.plot.hline,
            false,
            &mut grid.axes_mut()[index],
        )?;
    }

    if let Some(hue) = &options.hue {
        if options.legend && grid.hue_is_distinct(hue) {
            if let Some(legend) = hue_legend(&global) {
                grid.add_legend(legend);
            }
        }
    }
    Ok(grid)
}
