//! SVG output of axes and facet grids

use crate::axes::{Axes, Collection, Coords, Legend};
use crate::error::{Error, Result};
use crate::facet::FacetGrid;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn rgb(color: statplot_core::Color) -> RGBColor {
    let [r, g, b] = color.to_u8();
    RGBColor(r, g, b)
}

fn finite_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect()
}

fn draw_axes(area: &DrawingArea<SVGBackend<'_>, Shift>, ax: &Axes, extra_legend: Option<&Legend>) -> DrawResult {
    let (x0, x1) = ax.xlim();
    let (y0, y1) = ax.ylim();

    let mut builder = ChartBuilder::on(area);
    builder.margin(10).x_label_area_size(40).y_label_area_size(60);
    if let Some(title) = ax.title() {
        builder.caption(title, ("sans-serif", 16));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    let ticks = ax.xticks().unwrap_or_default();
    let tick_label = |v: &f64| {
        ticks
            .iter()
            .find(|(p, _)| (p - v).abs() < 0.25)
            .map(|(_, label)| label.clone())
            .unwrap_or_default()
    };
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(ax.xlabel().unwrap_or("")).y_desc(ax.ylabel().unwrap_or(""));
    if !ticks.is_empty() {
        mesh.x_labels(ticks.len()).x_label_formatter(&tick_label);
    }
    mesh.draw()?;

    for collection in ax.collections() {
        match collection {
            Collection::Band(band) => {
                let mut outline = finite_points(&band.x, &band.upper);
                outline.extend(finite_points(&band.x, &band.lower).into_iter().rev());
                chart.draw_series(std::iter::once(Polygon::new(
                    outline,
                    rgb(band.color).mix(band.alpha).filled(),
                )))?;
            }
            Collection::Scatter(scatter) => {
                let radius = (scatter.size / 2.0).round().max(1.0) as i32;
                let alpha = scatter.alpha.or(scatter.colors.first().and_then(|c| c.a)).unwrap_or(1.0);
                chart.draw_series(
                    scatter
                        .offsets()
                        .into_iter()
                        .enumerate()
                        .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
                        .map(|(i, point)| Circle::new(point, radius, rgb(scatter.color_at(i)).mix(alpha).filled())),
                )?;
            }
        }
    }

    for bar in ax.patches().iter().filter(|b| b.height.is_finite()) {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(bar.x, 0.0), (bar.x + bar.width, bar.height)],
            rgb(bar.color).filled(),
        )))?;
    }

    for artist in ax.artists() {
        let s = &artist.summary;
        let color = rgb(artist.color);
        let half = artist.width / 2.0;
        let (left, right) = (artist.position - half, artist.position + half);
        chart.draw_series(std::iter::once(Rectangle::new([(left, s.q1), (right, s.q3)], color.mix(0.8).filled())))?;
        let segments = [
            vec![(left, s.median), (right, s.median)],
            vec![(artist.position, s.q1), (artist.position, s.whisker_low)],
            vec![(artist.position, s.q3), (artist.position, s.whisker_high)],
        ];
        chart.draw_series(segments.into_iter().map(|segment| PathElement::new(segment, BLACK.mix(0.8))))?;
        chart.draw_series(s.fliers.iter().map(|&y| Circle::new((artist.position, y), 2, BLACK.mix(0.8).filled())))?;
    }

    let mut labelled = false;
    for line in ax.lines() {
        let x = match line.coords {
            Coords::Data => line.x.clone(),
            Coords::AxesSpan => line.x.iter().map(|f| x0 + f * (x1 - x0)).collect(),
        };
        let color = rgb(line.color);
        let style = color.stroke_width(line.width.round().max(1.0) as u32);
        let series = chart.draw_series(LineSeries::new(finite_points(&x, &line.y), style))?;
        if let Some(label) = &line.label {
            labelled = true;
            series
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    for legend in ax.legend().into_iter().chain(extra_legend) {
        for (name, color) in &legend.entries {
            let color = rgb(*color);
            labelled = true;
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
                .label(name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// Render one axes as an SVG document
pub fn to_svg(ax: &Axes, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        let drawn: DrawResult = (|| {
            root.fill(&WHITE)?;
            draw_axes(&root, ax, None)?;
            root.present()?;
            Ok(())
        })();
        drawn.map_err(|e| Error::Render(e.to_string()))?;
    }
    Ok(svg)
}

/// Render every axes of a grid into one SVG document
///
/// The grid legend is drawn on the last axes.
pub fn grid_to_svg(grid: &FacetGrid, size: (u32, u32)) -> Result<String> {
    let layout = grid.layout();
    debug!("Rendering {} axes on a {:?} layout", grid.axes().len(), layout);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        let drawn: DrawResult = (|| {
            root.fill(&WHITE)?;
            let panels = root.split_evenly(layout);
            let last = grid.axes().len().saturating_sub(1);
            for (i, (ax, panel)) in grid.axes().iter().zip(&panels).enumerate() {
                let legend = if i == last { grid.legend() } else { None };
                draw_axes(panel, ax, legend)?;
            }
            root.present()?;
            Ok(())
        })();
        drawn.map_err(|e| Error::Render(e.to_string()))?;
    }
    Ok(svg)
}

/// Write one axes to an SVG file
pub fn save_svg(ax: &Axes, path: impl AsRef<Path>, size: (u32, u32)) -> Result<()> {
    let svg = to_svg(ax, size)?;
    std::fs::write(path.as_ref(), svg).map_err(|e| Error::Render(e.to_string()))?;
    debug!("Wrote {}", path.as_ref().display());
    Ok(())
}
