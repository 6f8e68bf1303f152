//! Shared data for the regression integration tests

#![allow(dead_code)]

use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Normal, StandardNormal};

pub const N: usize = 60;

/// Frame with a linear signal, a binary response, a discrete predictor,
/// clustered units and a response with missing values
pub fn create_regression_df(seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let unit_offset = Normal::new(0.0, 3.0).unwrap();
    let offsets: Vec<f64> = (0..3).map(|_| unit_offset.sample(&mut rng)).collect();

    let x: Vec<f64> = (0..N).map(|_| rng.sample(StandardNormal)).collect();
    let d: Vec<f64> = (0..N).map(|_| rng.gen_range(-2..2) as f64).collect();
    let s: Vec<i32> = (0..N).map(|i| (i % 3) as i32).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|xi| xi + rng.sample::<f64, _>(StandardNormal))
        .collect();
    let w: Vec<f64> = x
        .iter()
        .map(|xi| xi + rng.sample::<f64, _>(StandardNormal))
        .collect();
    let z: Vec<f64> = y.iter().map(|v| if *v > 0.0 { 1.0 } else { 0.0 }).collect();
    let clustered: Vec<f64> = s
        .iter()
        .map(|&u| offsets[u as usize] + 0.1 * rng.sample::<f64, _>(StandardNormal))
        .collect();
    let y_na: Vec<Option<f64>> = y
        .iter()
        .enumerate()
        .map(|(i, v)| if i % 10 == 0 { None } else { Some(*v) })
        .collect();

    df!(
        "x" => x,
        "d" => d,
        "s" => s,
        "y" => y,
        "w" => w,
        "z" => z,
        "c" => clustered,
        "y_na" => y_na
    )
    .unwrap()
}
