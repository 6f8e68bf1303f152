mod common;

use common::create_factor_df;
use statplot_categorical::{CategoricalOptions, PlotKind};
use statplot_core::color_palette;
use statplot_viz::{
    barplot, boxplot, factorplot, grid_to_svg, pointplot, Axes, CategoricalPlotOptions, Collection, Coords,
    FactorplotOptions, GridShape,
};

fn categorical() -> CategoricalOptions {
    CategoricalOptions::default().with_n_boot(50).with_seed(3)
}

fn plot(kind: PlotKind) -> CategoricalPlotOptions {
    CategoricalPlotOptions::default().with_categorical(categorical().with_kind(kind))
}

fn factor(options: FactorplotOptions, y: Option<&str>) -> statplot_viz::FacetGrid {
    let df = create_factor_df(0);
    factorplot("x", y, &df, &options).unwrap()
}

#[test]
fn test_pointplot_join_and_hue() {
    let df = create_factor_df(0);
    let mut ax = Axes::new();
    let options = plot(PlotKind::Point).with_join(false);
    pointplot(&"x".into(), &"y".into(), None, Some(&df), &options, &mut ax).unwrap();
    assert_eq!(ax.collections().len(), 1);
    assert_eq!(ax.lines().len(), 3);

    let mut ax = Axes::new();
    pointplot(&"x".into(), &"y".into(), Some(&"g".into()), Some(&df), &plot(PlotKind::Point), &mut ax).unwrap();
    assert_eq!(ax.collections().len(), 2);
    assert_eq!(ax.lines().len(), 8);
    assert_eq!(ax.legend().unwrap().entries.len(), 2);
}

#[test]
fn test_pointplot_palette_without_hue() {
    let df = create_factor_df(0);
    let mut ax = Axes::new();
    let options = CategoricalPlotOptions::default().with_categorical(categorical().with_palette("husl"));
    pointplot(&"x".into(), &"y".into(), None, Some(&df), &options, &mut ax).unwrap();
    let husl = color_palette(Some(&"husl".into()), 3).unwrap();
    match &ax.collections()[0] {
        Collection::Scatter(points) => assert_eq!(points.colors, husl),
        other => panic!("expected points, got {other:?}"),
    }
}

#[test]
fn test_barplot() {
    let df = create_factor_df(0);
    let mut ax = Axes::new();
    barplot(&"x".into(), Some(&"y".into()), None, Some(&df), &plot(PlotKind::Auto), &mut ax).unwrap();
    assert_eq!(ax.patches().len(), 3);
    assert_eq!(ax.lines().len(), 3);

    let mut ax = Axes::new();
    barplot(&"x".into(), Some(&"y".into()), Some(&"g".into()), Some(&df), &plot(PlotKind::Auto), &mut ax).unwrap();
    assert_eq!(ax.patches().len(), 6);
    assert!(ax.patches().iter().all(|b| (b.width - 0.4).abs() < 1e-12));
}

#[test]
fn test_barplot_counts() {
    let df = create_factor_df(0);
    let mut ax = Axes::new();
    barplot(&"x".into(), None, None, Some(&df), &plot(PlotKind::Auto), &mut ax).unwrap();
    assert_eq!(ax.patches().len(), 3);
    assert!(ax.lines().is_empty());
    assert!(ax.patches().iter().all(|b| b.height == 20.0));
    assert_eq!(ax.ylabel(), Some("count"));
}

#[test]
fn test_boxplot() {
    let df = create_factor_df(0);
    let mut ax = Axes::new();
    boxplot(&"x".into(), &"y".into(), None, Some(&df), &plot(PlotKind::Auto), &mut ax).unwrap();
    assert_eq!(ax.artists().len(), 3);

    let mut ax = Axes::new();
    boxplot(&"x".into(), &"y".into(), Some(&"g".into()), Some(&df), &plot(PlotKind::Auto), &mut ax).unwrap();
    assert_eq!(ax.artists().len(), 6);
    assert!(ax.patches().is_empty());
}

#[test]
fn test_factorplot_kinds() {
    let grid = factor(FactorplotOptions::default().with_plot(plot(PlotKind::Auto)), Some("y"));
    let ax = &grid.axes()[0];
    assert_eq!(ax.collections().len(), 1);
    assert_eq!(ax.lines().len(), 4);

    let grid = factor(FactorplotOptions::default().with_plot(plot(PlotKind::Bar)), Some("y"));
    assert_eq!(grid.axes()[0].patches().len(), 3);
    assert_eq!(grid.axes()[0].lines().len(), 3);

    let grid = factor(FactorplotOptions::default().with_plot(plot(PlotKind::Box)), Some("y"));
    assert_eq!(grid.axes()[0].artists().len(), 3);

    let grid = factor(
        FactorplotOptions::default().with_plot(plot(PlotKind::Box)).with_hue("g"),
        Some("y"),
    );
    assert_eq!(grid.axes()[0].artists().len(), 6);
}

#[test]
fn test_factorplot_counts() {
    let grid = factor(FactorplotOptions::default().with_plot(plot(PlotKind::Auto)), None);
    assert_eq!(grid.axes()[0].patches().len(), 3);

    let grid = factor(
        FactorplotOptions::default().with_plot(plot(PlotKind::Auto)).with_hue("g"),
        None,
    );
    assert_eq!(grid.axes()[0].patches().len(), 6);
}

#[test]
fn test_factorplot_hline() {
    let grid = factor(
        FactorplotOptions::default().with_plot(plot(PlotKind::Auto).with_hline(0.0)),
        None,
    );
    let ax = &grid.axes()[0];
    assert_eq!(ax.lines().len(), 1);
    assert_eq!(ax.lines()[0].coords, Coords::AxesSpan);
    assert_eq!(ax.lines()[0].y, vec![0.0, 0.0]);
}

#[test]
fn test_factorplot_facets() {
    let grid = factor(
        FactorplotOptions::default()
            .with_plot(plot(PlotKind::Point))
            .with_row("g")
            .with_col("h"),
        Some("y"),
    );
    assert_eq!(grid.shape(), GridShape::Grid(2, 3));

    let grid = factor(
        FactorplotOptions::default()
            .with_plot(plot(PlotKind::Point))
            .with_col("h")
            .with_col_wrap(2),
        Some("y"),
    );
    assert_eq!(grid.shape(), GridShape::Wrapped(3));
}

#[test]
fn test_factorplot_shares_order() {
    let options = CategoricalPlotOptions::default().with_categorical(categorical().with_x_order(["c", "a", "b"]));
    let grid = factor(FactorplotOptions::default().with_plot(options).with_col("h"), Some("y"));
    for ax in grid.axes() {
        let ticks: Vec<&str> = ax.xticks().unwrap().iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(ticks, vec!["c", "a", "b"]);
        assert_eq!(ax.xlim(), (-0.5, 2.5));
    }
}

#[test]
fn test_factorplot_legend() {
    let grid = factor(
        FactorplotOptions::default()
            .with_plot(plot(PlotKind::Point))
            .with_hue("g")
            .with_col("g"),
        Some("y"),
    );
    assert!(grid.legend().is_none());

    let grid = factor(
        FactorplotOptions::default()
            .with_plot(plot(PlotKind::Point))
            .with_hue("g")
            .with_col("h"),
        Some("y"),
    );
    let legend = grid.legend().unwrap();
    assert_eq!(legend.title.as_deref(), Some("g"));
    assert_eq!(legend.entries.len(), 2);
    assert!(grid.axes().iter().all(|ax| ax.legend().is_none()));
}

#[test]
fn test_factorplot_renders() {
    let grid = factor(
        FactorplotOptions::default()
            .with_plot(plot(PlotKind::Bar))
            .with_hue("g")
            .with_col("h"),
        Some("y"),
    );
    let svg = grid_to_svg(&grid, (900, 300)).unwrap();
    assert!(svg.contains("<svg"));
}
