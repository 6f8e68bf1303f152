//! Common test utilities for statplot-polars tests

use polars::prelude::*;

/// Frame with a numeric predictor, a response with gaps, a label column and
/// integer units
pub fn create_test_df() -> DataFrame {
    let n = 12;
    let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
    let y: Vec<Option<f64>> = (0..n)
        .map(|i| if i % 5 == 0 { None } else { Some(i as f64) })
        .collect();
    let s: Vec<&str> = (0..n).map(|i| ["a", "b", "c"][i % 3]).collect();
    let u: Vec<i32> = (0..n).map(|i| (i % 4) as i32).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from("x"), x).into(),
        Series::new(PlSmallStr::from("y_na"), y).into(),
        Series::new(PlSmallStr::from("s"), s).into(),
        Series::new(PlSmallStr::from("u"), u).into(),
    ])
    .unwrap()
}
