//! A plotting canvas recorded as a display list
//!
//! Plot functions issue draw calls onto an [`Axes`]; nothing is rasterized
//! until the axes is handed to [`crate::render`]. The element lists mirror the
//! usual canvas vocabulary: `lines`, `collections` (scatter points and
//! filled bands), `patches` (bars) and `artists` (boxes).

use statplot_categorical::BoxSummary;
use statplot_core::palette::default_cycle;
use statplot_core::Color;

/// Fraction of the data span added on each side of autoscaled limits
const MARGIN: f64 = 0.05;

/// Coordinate system of a line's x values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coords {
    #[default]
    Data,
    /// `x` in `[0, 1]` spans the axes whatever its limits; `y` is data
    AxesSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color,
    pub width: f64,
    pub style: String,
    pub label: Option<String>,
    pub coords: Coords,
}

impl Line {
    pub fn new(x: Vec<f64>, y: Vec<f64>, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            width: 1.5,
            style: "-".to_string(),
            label: None,
            coords: Coords::Data,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// The data of the line as `(xdata, ydata)`
    pub fn data(&self) -> (&[f64], &[f64]) {
        (&self.x, &self.y)
    }
}

/// Scatter markers; `colors` holds one color or one per point
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub colors: Vec<Color>,
    pub alpha: Option<f64>,
    pub marker: String,
    pub size: f64,
    pub label: Option<String>,
}

impl Scatter {
    pub fn new(x: Vec<f64>, y: Vec<f64>, color: Color) -> Self {
        Self {
            x,
            y,
            colors: vec![color],
            alpha: None,
            marker: "o".to_string(),
            size: 5.0,
            label: None,
        }
    }

    /// Color of the `i`-th point
    pub fn color_at(&self, i: usize) -> Color {
        match self.colors.as_slice() {
            [single] => *single,
            colors => colors.get(i).copied().unwrap_or(Color::BLACK),
        }
    }

    pub fn offsets(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// Filled region between two curves
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub x: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub color: Color,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Scatter(Scatter),
    Band(Band),
}

/// Bar rising from zero, `x` is its left edge
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxArtist {
    pub position: f64,
    pub width: f64,
    pub summary: BoxSummary,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: Option<String>,
    pub entries: Vec<(String, Color)>,
}

/// One plotting area
#[derive(Debug, Clone, Default)]
pub struct Axes {
    lines: Vec<Line>,
    collections: Vec<Collection>,
    patches: Vec<Bar>,
    artists: Vec<BoxArtist>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    title: Option<String>,
    legend: Option<Legend>,
    xlim: Option<(f64, f64)>,
    xticks: Option<Vec<(f64, String)>>,
    cycle_index: usize,
}

fn extend(range: &mut Option<(f64, f64)>, values: impl IntoIterator<Item = f64>) {
    for v in values.into_iter().filter(|v| v.is_finite()) {
        *range = Some(match *range {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
}

fn with_margins(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let pad = (hi - lo) * MARGIN;
            (lo - pad, hi + pad)
        }
    }
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn patches(&self) -> &[Bar] {
        &self.patches
    }

    pub fn artists(&self) -> &[BoxArtist] {
        &self.artists
    }

    /// Whether nothing has been drawn yet
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.collections.is_empty() && self.patches.is_empty() && self.artists.is_empty()
    }

    pub fn plot(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn scatter(&mut self, scatter: Scatter) {
        self.collections.push(Collection::Scatter(scatter));
    }

    pub fn fill_between(&mut self, band: Band) {
        self.collections.push(Collection::Band(band));
    }

    pub fn bar(&mut self, bar: Bar) {
        self.patches.push(bar);
    }

    pub fn add_box(&mut self, artist: BoxArtist) {
        self.artists.push(artist);
    }

    /// Horizontal line at `y` spanning the full width of the axes
    pub fn axhline(&mut self, y: f64, color: Color, style: &str) {
        self.lines.push(Line {
            coords: Coords::AxesSpan,
            ..Line::new(vec![0.0, 1.0], vec![y, y], color).with_style(style)
        });
    }

    /// Next color of the default cycle
    pub fn next_color(&mut self) -> Color {
        let cycle = default_cycle();
        let color = cycle
            .get(self.cycle_index % cycle.len().max(1))
            .copied()
            .unwrap_or(Color::BLACK);
        self.cycle_index += 1;
        color
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = Some((lo, hi));
    }

    pub fn set_xticks(&mut self, ticks: Vec<(f64, String)>) {
        self.xticks = Some(ticks);
    }

    pub fn xticks(&self) -> Option<&[(f64, String)]> {
        self.xticks.as_deref()
    }

    /// Explicit x limits, or the data extent padded by 5% on each side
    pub fn xlim(&self) -> (f64, f64) {
        if let Some(lim) = self.xlim {
            return lim;
        }
        let mut range = None;
        for line in self.lines.iter().filter(|l| l.coords == Coords::Data) {
            extend(&mut range, line.x.iter().copied());
        }
        for collection in &self.collections {
            match collection {
                Collection::Scatter(s) => extend(&mut range, s.x.iter().copied()),
                Collection::Band(b) => extend(&mut range, b.x.iter().copied()),
            }
        }
        for bar in &self.patches {
            extend(&mut range, [bar.x, bar.x + bar.width]);
        }
        for artist in &self.artists {
            extend(&mut range, [artist.position - artist.width / 2.0, artist.position + artist.width / 2.0]);
        }
        with_margins(range)
    }

    /// The data extent in y padded by 5% on each side
    pub fn ylim(&self) -> (f64, f64) {
        let mut range = None;
        for line in &self.lines {
            extend(&mut range, line.y.iter().copied());
        }
        for collection in &self.collections {
            match collection {
                Collection::Scatter(s) => extend(&mut range, s.y.iter().copied()),
                Collection::Band(b) => {
                    extend(&mut range, b.lower.iter().copied());
                    extend(&mut range, b.upper.iter().copied());
                }
            }
        }
        for bar in &self.patches {
            extend(&mut range, [0.0, bar.height]);
        }
        for artist in &self.artists {
            let s = &artist.summary;
            extend(&mut range, [s.whisker_low, s.whisker_high]);
            extend(&mut range, s.fliers.iter().copied());
        }
        with_margins(range)
    }
}
