mod common;

use common::{create_lm_df, N};
use statplot_core::palette::default_cycle;
use statplot_core::{color_palette, Color};
use statplot_regression::{CiLevel, RegressionOptions};
use statplot_viz::{
    grid_to_svg, lmplot, regplot, residplot, Axes, Collection, Error, GridShape, LmplotOptions, RegplotOptions,
    ResidplotOptions,
};

fn regression() -> RegressionOptions {
    RegressionOptions::default().with_n_boot(50).with_seed(7)
}

fn opts() -> RegplotOptions {
    RegplotOptions::default().with_regression(regression())
}

fn draw(options: &RegplotOptions) -> Axes {
    let df = create_lm_df(0);
    let mut ax = Axes::new();
    regplot(&"x".into(), &"y".into(), Some(&df), options, &mut ax).unwrap();
    ax
}

fn scatter(ax: &Axes) -> &statplot_viz::Scatter {
    ax.collections()
        .iter()
        .find_map(|c| match c {
            Collection::Scatter(s) => Some(s),
            _ => None,
        })
        .unwrap()
}

#[test]
fn test_regplot_basic() {
    let ax = draw(&opts());
    assert_eq!(ax.lines().len(), 1);
    assert_eq!(ax.collections().len(), 2);
    assert_eq!(ax.xlabel(), Some("x"));
    assert_eq!(ax.ylabel(), Some("y"));
    assert_eq!(scatter(&ax).offsets().len(), N);
}

#[test]
fn test_regplot_toggles() {
    let ax = draw(&opts().with_scatter(false));
    assert_eq!(ax.lines().len(), 1);
    assert_eq!(ax.collections().len(), 1);

    let ax = draw(&opts().with_fit_reg(false));
    assert_eq!(ax.lines().len(), 0);
    assert_eq!(ax.collections().len(), 1);

    let ax = draw(&opts().with_regression(regression().with_ci(None)));
    assert_eq!(ax.lines().len(), 1);
    assert_eq!(ax.collections().len(), 1);
}

#[test]
fn test_regplot_binned_estimates() {
    let ax = draw(&opts().with_regression(regression().with_x_bins(5usize)));
    assert_eq!(ax.lines().len(), 6);
    assert_eq!(ax.collections().len(), 2);
    assert_eq!(scatter(&ax).offsets().len(), 5);

    let ax = draw(&opts().with_regression(regression().with_x_bins(5usize).with_x_ci(CiLevel::None)));
    assert_eq!(ax.lines().len(), 1);
}

#[test]
fn test_regplot_fit_spans_axes() {
    let ax = draw(&opts());
    let (lo, hi) = {
        let df = create_lm_df(0);
        let x = statplot_polars::PlotDataExt::plot_numeric(&df, "x").unwrap();
        statplot_core::utils::finite_range(&x).unwrap()
    };
    let fit = ax.lines().last().unwrap();
    assert!(fit.x[0] < lo);
    assert!(*fit.x.last().unwrap() > hi);

    let ax = draw(&opts().with_regression(regression().with_truncate(true)));
    let fit = ax.lines().last().unwrap();
    assert_eq!(fit.x[0], lo);
    assert_eq!(*fit.x.last().unwrap(), hi);
}

#[test]
fn test_regplot_colors() {
    let df = create_lm_df(0);
    let mut ax = Axes::new();
    regplot(&"x".into(), &"y".into(), Some(&df), &opts(), &mut ax).unwrap();
    regplot(&"x".into(), &"z".into(), Some(&df), &opts(), &mut ax).unwrap();
    let cycle = default_cycle();
    assert_eq!(ax.lines()[0].color, cycle[0]);
    assert_eq!(ax.lines()[1].color, cycle[1]);

    let ax = draw(&opts().with_color("g"));
    assert_eq!(ax.lines()[0].color, Color::parse("g").unwrap());
}

#[test]
fn test_regplot_scatter_alpha() {
    let ax = draw(&opts());
    assert_eq!(scatter(&ax).alpha, Some(0.8));

    let ax = draw(&opts().with_color("#ff000080"));
    assert_eq!(scatter(&ax).alpha, None);

    let ax = draw(&opts().with_scatter_alpha(0.3));
    assert_eq!(scatter(&ax).alpha, Some(0.3));
}

#[test]
fn test_regplot_bad_color() {
    let df = create_lm_df(0);
    let mut ax = Axes::new();
    let result = regplot(&"x".into(), &"y".into(), Some(&df), &opts().with_color("notacolor"), &mut ax);
    assert!(matches!(result, Err(Error::Core(_))));
}

#[test]
fn test_regplot_missing_column() {
    let df = create_lm_df(0);
    let mut ax = Axes::new();
    let result = regplot(&"x".into(), &"nope".into(), Some(&df), &opts(), &mut ax);
    assert!(matches!(result, Err(Error::Data(_))));
}

#[test]
fn test_residplot() {
    let df = create_lm_df(0);
    let mut ax = Axes::new();
    residplot(&"x".into(), &"y".into(), Some(&df), &ResidplotOptions::default(), &mut ax).unwrap();
    assert_eq!(ax.lines().len(), 1);
    assert_eq!(ax.collections().len(), 1);
    let resid = scatter(&ax);
    let mean = resid.y.iter().sum::<f64>() / resid.y.len() as f64;
    assert!(mean.abs() < 1e-8);

    let mut ax = Axes::new();
    let options = ResidplotOptions::default().with_lowess(true);
    residplot(&"x".into(), &"y".into(), Some(&df), &options, &mut ax).unwrap();
    assert_eq!(ax.lines().len(), 2);
}

#[test]
fn test_lmplot_basic() {
    let df = create_lm_df(0);
    let options = LmplotOptions::default().with_regplot(opts());
    let grid = lmplot("x", "y", &df, &options).unwrap();
    assert_eq!(grid.shape(), GridShape::Grid(1, 1));
    let ax = &grid.axes()[0];
    assert_eq!(ax.lines().len(), 1);
    assert_eq!(ax.collections().len(), 2);
    assert!(grid.legend().is_none());
}

#[test]
fn test_lmplot_hue() {
    let df = create_lm_df(0);
    let options = LmplotOptions::default().with_regplot(opts()).with_hue("h");
    let grid = lmplot("x", "y", &df, &options).unwrap();
    let ax = &grid.axes()[0];
    assert_eq!(ax.lines().len(), 2);
    assert_eq!(ax.collections().len(), 4);

    let legend = grid.legend().unwrap();
    assert_eq!(legend.title.as_deref(), Some("h"));
    let husl = color_palette(Some(&"husl".into()), 2).unwrap();
    assert_eq!(legend.entries, vec![("m".to_string(), husl[0]), ("n".to_string(), husl[1])]);
}

#[test]
fn test_lmplot_hue_order_and_markers() {
    let df = create_lm_df(0);
    let options = LmplotOptions::default()
        .with_regplot(opts())
        .with_hue("h")
        .with_hue_order(["n", "m"])
        .with_markers(["o", "x"]);
    let grid = lmplot("x", "y", &df, &options).unwrap();
    let names: Vec<&str> = grid.legend().unwrap().entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["n", "m"]);
    let markers: Vec<&str> = grid.axes()[0]
        .collections()
        .iter()
        .filter_map(|c| match c {
            Collection::Scatter(s) => Some(s.marker.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(markers, vec!["o", "x"]);

    let bad = LmplotOptions::default().with_regplot(opts()).with_hue("h").with_markers(["o"]);
    assert!(matches!(lmplot("x", "y", &df, &bad), Err(Error::Core(_))));
}

#[test]
fn test_lmplot_facets() {
    let df = create_lm_df(0);
    let options = LmplotOptions::default().with_regplot(opts()).with_row("g").with_col("h");
    let grid = lmplot("x", "y", &df, &options).unwrap();
    assert_eq!(grid.shape(), GridShape::Grid(3, 2));
    for ax in grid.axes() {
        assert_eq!(ax.lines().len(), 1);
        assert_eq!(scatter(ax).offsets().len(), N / 6);
        assert_eq!(ax.xlabel(), Some("x"));
    }

    let options = LmplotOptions::default().with_regplot(opts()).with_col("u").with_col_wrap(4);
    let grid = lmplot("x", "y", &df, &options).unwrap();
    assert_eq!(grid.shape(), GridShape::Wrapped(6));
    assert_eq!(grid.layout(), (2, 4));

    let options = LmplotOptions::default().with_regplot(opts()).with_row("g").with_col("u").with_col_wrap(4);
    assert!(matches!(lmplot("x", "y", &df, &options), Err(Error::Facet(_))));
}

#[test]
fn test_lmplot_legend_rules() {
    let df = create_lm_df(0);
    let options = LmplotOptions::default().with_regplot(opts()).with_hue("h").with_col("h");
    let grid = lmplot("x", "y", &df, &options).unwrap();
    assert!(grid.legend().is_none());

    let options = LmplotOptions::default().with_regplot(opts()).with_hue("h").with_col("g");
    let grid = lmplot("x", "y", &df, &options).unwrap();
    assert_eq!(grid.legend().unwrap().entries.len(), 2);

    let options = LmplotOptions::default()
        .with_regplot(opts())
        .with_hue("h")
        .with_legend(false);
    let grid = lmplot("x", "y", &df, &options).unwrap();
    assert!(grid.legend().is_none());
}

#[test]
fn test_lmplot_renders() {
    let df = create_lm_df(0);
    let options = LmplotOptions::default().with_regplot(opts()).with_hue("h").with_col("g");
    let grid = lmplot("x", "y", &df, &options).unwrap();
    let svg = grid_to_svg(&grid, (900, 300)).unwrap();
    assert!(svg.starts_with("<svg") || svg.contains("<svg"));
}
