//! Frame in, SVG out, through the facade crate

use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use statplot::prelude::*;
use statplot::viz::grid_to_svg;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tips(seed: u64) -> anyhow::Result<DataFrame> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = 48;
    let bill: Vec<f64> = (0..n).map(|_| 20.0 + 5.0 * rng.sample::<f64, _>(StandardNormal)).collect();
    let tip: Vec<f64> = bill
        .iter()
        .map(|b| 0.15 * b + 0.5 * rng.sample::<f64, _>(StandardNormal))
        .collect();
    let day: Vec<&str> = (0..n).map(|i| ["thu", "fri", "sat", "sun"][i % 4]).collect();
    let smoker: Vec<&str> = (0..n).map(|i| ["yes", "no"][(i / 4) % 2]).collect();
    Ok(df!("bill" => bill, "tip" => tip, "day" => day, "smoker" => smoker)?)
}

#[test]
fn test_regplot_to_svg() -> anyhow::Result<()> {
    init_tracing();
    let df = tips(0)?;
    let mut ax = Axes::new();
    let options = RegplotOptions::default()
        .with_regression(RegressionOptions::default().with_n_boot(100).with_seed(0));
    regplot(&"bill".into(), &"tip".into(), Some(&df), &options, &mut ax)?;
    let svg = to_svg(&ax, (640, 480))?;
    assert!(svg.contains("<svg"));
    Ok(())
}

#[test]
fn test_lmplot_by_smoker() -> anyhow::Result<()> {
    init_tracing();
    let df = tips(1)?;
    let options = LmplotOptions::default()
        .with_hue("smoker")
        .with_col("day")
        .with_col_wrap(2)
        .with_regplot(RegplotOptions::default().with_regression(RegressionOptions::default().with_n_boot(50).with_seed(1)));
    let grid = lmplot("bill", "tip", &df, &options)?;
    assert_eq!(grid.axes().len(), 4);
    assert_eq!(grid.layout(), (2, 2));
    assert!(grid.legend().is_some());
    assert!(grid_to_svg(&grid, (800, 800))?.contains("<svg"));
    Ok(())
}

#[test]
fn test_factorplot_by_day() -> anyhow::Result<()> {
    init_tracing();
    let df = tips(2)?;
    let plot = CategoricalPlotOptions::default()
        .with_categorical(CategoricalOptions::default().with_n_boot(50).with_seed(2).with_kind(PlotKind::Bar));
    let options = FactorplotOptions::default().with_hue("smoker").with_plot(plot);
    let grid = factorplot("day", Some("tip"), &df, &options)?;
    let ax = &grid.axes()[0];
    assert_eq!(ax.patches().len(), 8);
    let ticks: Vec<&str> = ax.xticks().unwrap_or_default().iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(ticks, vec!["fri", "sat", "sun", "thu"]);
    Ok(())
}
