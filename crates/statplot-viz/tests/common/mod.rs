//! Shared frames for the plotting integration tests

#![allow(dead_code)]

use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

pub const N: usize = 60;

/// Linear signal with a binary response, a three level `g`, a two level `h`
/// and six units `u`
pub fn create_lm_df(seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x: Vec<f64> = (0..N).map(|_| rng.sample(StandardNormal)).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|xi| 2.0 * xi + rng.sample::<f64, _>(StandardNormal))
        .collect();
    let z: Vec<f64> = y.iter().map(|v| if *v > 0.0 { 1.0 } else { 0.0 }).collect();
    let g: Vec<&str> = (0..N).map(|i| ["a", "b", "c"][i % 3]).collect();
    let h: Vec<&str> = (0..N).map(|i| ["m", "n"][i % 2]).collect();
    let u: Vec<i32> = (0..N).map(|i| (i % 6) as i32).collect();

    df!(
        "x" => x,
        "y" => y,
        "z" => z,
        "g" => g,
        "h" => h,
        "u" => u
    )
    .unwrap()
}

/// Three categories `x`, a two level hue `g` crossing every category, a three
/// level `h` and a response well away from zero
pub fn create_factor_df(seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x: Vec<&str> = (0..N).map(|i| ["a", "b", "c"][i % 3]).collect();
    let g: Vec<&str> = (0..N).map(|i| ["m", "n"][(i / 3) % 2]).collect();
    let h: Vec<&str> = (0..N).map(|i| ["p", "q", "r"][i / 20]).collect();
    let y: Vec<f64> = (0..N)
        .map(|_| 10.0 + rng.sample::<f64, _>(StandardNormal))
        .collect();

    df!(
        "x" => x,
        "y" => y,
        "g" => g,
        "h" => h
    )
    .unwrap()
}
