//! Small multiples split by row and column levels

use crate::axes::{Axes, Legend};
use crate::error::{Error, Result};
use polars::prelude::*;
use statplot_core::{color_palette, Color, PaletteSpec};
use statplot_polars::PlotDataExt;
use tracing::debug;

/// Layout of a facet grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridShape {
    /// `rows × cols` axes
    Grid(usize, usize),
    /// A single wrapped sequence of axes
    Wrapped(usize),
}

/// Keep the rows of `data` whose `column` reads as `level`
pub fn filter_level(data: &DataFrame, column: &str, level: &str) -> Result<DataFrame> {
    let labels = data.plot_vector(column)?.as_labels();
    let mask: Vec<bool> = labels.iter().map(|l| l.as_deref() == Some(level)).collect();
    Ok(data.filter(&BooleanChunked::from_slice("facet".into(), &mask))?)
}

/// One color per hue level
///
/// A mapping palette is looked up by level; otherwise the palette (or
/// `default` when none is given) is resolved to `levels.len()` colors.
pub fn level_colors(palette: Option<&PaletteSpec>, default: &str, levels: &[String]) -> Result<Vec<Color>> {
    match palette {
        Some(PaletteSpec::Mapping(mapping)) => levels
            .iter()
            .map(|level| {
                mapping
                    .get(level)
                    .copied()
                    .ok_or_else(|| Error::Facet(format!("Palette has no color for level {level}")))
            })
            .collect(),
        Some(palette) => Ok(color_palette(Some(palette), levels.len())?),
        None => Ok(color_palette(Some(&PaletteSpec::Named(default.to_string())), levels.len())?),
    }
}

/// A grid of [`Axes`], one per combination of row and column level
#[derive(Debug, Clone)]
pub struct FacetGrid {
    row: Option<String>,
    col: Option<String>,
    row_levels: Vec<String>,
    col_levels: Vec<String>,
    col_wrap: Option<usize>,
    axes: Vec<Axes>,
    legend: Option<Legend>,
}

impl FacetGrid {
    /// Lay out one axes per level combination of `row` and `col`
    ///
    /// `col_wrap` folds a column-only grid into rows of that many axes and
    /// cannot be combined with `row`.
    pub fn new(data: &DataFrame, row: Option<&str>, col: Option<&str>, col_wrap: Option<usize>) -> Result<Self> {
        if col_wrap.is_some() && row.is_some() {
            return Err(Error::Facet("Cannot use `row` and `col_wrap` together".to_string()));
        }
        if col_wrap == Some(0) {
            return Err(Error::Facet("`col_wrap` must be positive".to_string()));
        }

        let levels = |name: Option<&str>| -> Result<Vec<String>> {
            match name {
                Some(name) => Ok(data.plot_vector(name)?.levels()),
                None => Ok(Vec::new()),
            }
        };
        let row_levels = levels(row)?;
        let col_levels = levels(col)?;
        let n_axes = row_levels.len().max(1) * col_levels.len().max(1);
        debug!("Facet grid with {} axes", n_axes);

        let mut grid = Self {
            row: row.map(str::to_string),
            col: col.map(str::to_string),
            row_levels,
            col_levels,
            col_wrap,
            axes: vec![Axes::new(); n_axes],
            legend: None,
        };
        grid.set_titles();
        Ok(grid)
    }

    fn n_rows(&self) -> usize {
        self.row_levels.len().max(1)
    }

    fn n_cols(&self) -> usize {
        self.col_levels.len().max(1)
    }

    fn set_titles(&mut self) {
        for r in 0..self.n_rows() {
            for c in 0..self.n_cols() {
                let mut parts = Vec::new();
                if let (Some(name), Some(level)) = (&self.row, self.row_levels.get(r)) {
                    parts.push(format!("{name} = {level}"));
                }
                if let (Some(name), Some(level)) = (&self.col, self.col_levels.get(c)) {
                    parts.push(format!("{name} = {level}"));
                }
                if !parts.is_empty() {
                    let index = r * self.n_cols() + c;
                    self.axes[index].set_title(parts.join(" | "));
                }
            }
        }
    }

    pub fn shape(&self) -> GridShape {
        match self.col_wrap {
            Some(_) => GridShape::Wrapped(self.axes.len()),
            None => GridShape::Grid(self.n_rows(), self.n_cols()),
        }
    }

    /// Rows and columns the axes occupy on the figure
    pub fn layout(&self) -> (usize, usize) {
        match self.col_wrap {
            Some(wrap) => {
                let cols = wrap.min(self.axes.len()).max(1);
                (self.axes.len().div_ceil(cols), cols)
            }
            None => (self.n_rows(), self.n_cols()),
        }
    }

    pub fn row_var(&self) -> Option<&str> {
        self.row.as_deref()
    }

    pub fn col_var(&self) -> Option<&str> {
        self.col.as_deref()
    }

    /// Axes in row-major order
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    /// Axes at `(row, col)` of an unwrapped grid
    pub fn ax(&self, row: usize, col: usize) -> Option<&Axes> {
        if row >= self.n_rows() || col >= self.n_cols() {
            return None;
        }
        self.axes.get(row * self.n_cols() + col)
    }

    /// The subset of `data` drawn on each axes, by axes index
    pub fn facet_data(&self, data: &DataFrame) -> Result<Vec<(usize, DataFrame)>> {
        let mut out = Vec::with_capacity(self.axes.len());
        for r in 0..self.n_rows() {
            let by_row = match (&self.row, self.row_levels.get(r)) {
                (Some(name), Some(level)) => filter_level(data, name, level)?,
                _ => data.clone(),
            };
            for c in 0..self.n_cols() {
                let subset = match (&self.col, self.col_levels.get(c)) {
                    (Some(name), Some(level)) => filter_level(&by_row, name, level)?,
                    _ => by_row.clone(),
                };
                out.push((r * self.n_cols() + c, subset));
            }
        }
        Ok(out)
    }

    /// Whether a hue variable needs its own legend
    pub fn hue_is_distinct(&self, hue: &str) -> bool {
        self.row.as_deref() != Some(hue) && self.col.as_deref() != Some(hue)
    }

    pub fn add_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn set_axis_labels(&mut self, x: &str, y: &str) {
        for ax in &mut self.axes {
            ax.set_xlabel(x);
            ax.set_ylabel(y);
        }
    }
}
