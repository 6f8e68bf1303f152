//! Shared data for the categorical integration tests

#![allow(dead_code)]

use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

pub const N: usize = 90;

/// Three categories of 30 rows, two interleaved hue levels and six units
/// that each shift `y` by a shared offset
pub fn create_categorical_df(seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let unit_error: Vec<f64> = (0..6).map(|_| rng.sample(StandardNormal)).collect();

    let x: Vec<&str> = (0..N).map(|i| ["a", "b", "c"][i / 30]).collect();
    let g: Vec<&str> = (0..N).map(|i| ["x", "y"][i % 2]).collect();
    let u: Vec<i32> = (0..N).map(|i| (i % 6) as i32).collect();
    let y: Vec<f64> = (0..N)
        .map(|i| rng.sample::<f64, _>(StandardNormal) + unit_error[i % 6])
        .collect();
    let shifted: Vec<f64> = y.iter().map(|v| v + 10.0).collect();
    let y_na: Vec<Option<f64>> = y
        .iter()
        .enumerate()
        .map(|(i, v)| if [10, 20, 30].contains(&i) { None } else { Some(*v) })
        .collect();
    let constant = vec![7.5; N];
    let h: Vec<&str> = (0..N).map(|i| ["a", "b", "c"][i / 30]).collect();

    df!(
        "x" => x,
        "y" => y,
        "w" => shifted,
        "z" => constant,
        "g" => g,
        "h" => h,
        "u" => u,
        "y_na" => y_na
    )
    .unwrap()
}
