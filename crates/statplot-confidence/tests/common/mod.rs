//! Shared helpers for the bootstrap integration tests

#![allow(dead_code)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

/// Seeded normal sample
pub fn normal_sample(size: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(mean, std).unwrap();
    (0..size).map(|_| normal.sample(&mut rng)).collect()
}

/// Clustered sample: each unit shares a random offset plus small noise
///
/// Returns the values and the unit label of each value.
pub fn clustered_sample(n_units: usize, per_unit: usize, seed: u64) -> (Vec<f64>, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let offsets = Normal::new(0.0, 5.0).unwrap();
    let noise = Normal::new(0.0, 0.1).unwrap();

    let mut values = Vec::with_capacity(n_units * per_unit);
    let mut labels = Vec::with_capacity(n_units * per_unit);
    for unit in 0..n_units {
        let offset = offsets.sample(&mut rng);
        for _ in 0..per_unit {
            values.push(offset + noise.sample(&mut rng));
            labels.push(unit);
        }
    }
    (values, labels)
}
