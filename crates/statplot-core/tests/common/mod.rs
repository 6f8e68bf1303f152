//! Shared utilities for integration tests

pub use approx::assert_relative_eq;

pub const EPSILON: f64 = 1e-10;

/// Sequences that exercise empty, single and even/odd length edge cases
pub fn edge_case_lengths() -> Vec<usize> {
    vec![0, 1, 2, 3, 4, 5, 10, 17, 100]
}
