//! Nonparametric bootstrap resampling
//!
//! Resamples one or more paired sequences with replacement and applies an
//! aggregation function to every draw. Two flavours are supported:
//!
//! - plain resampling: `n` indices drawn uniformly from `[0, n)`
//! - unit resampling: distinct units are drawn with replacement, then each
//!   drawn unit's observations are resampled and appended as one block
//!
//! Randomness always flows through an explicit generator handle. The
//! [`Bootstrap`] builder owns the seed and creates the generator.

use crate::estimators::Aggregator;
use crate::workspace::ResampleWorkspace;
use rand::prelude::*;
use statplot_core::{Error, Result};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Default number of bootstrap resamples
pub const DEFAULT_N_BOOT: usize = 10_000;

/// Observation-to-unit assignment for cluster-aware resampling
///
/// Units are identified by their rank among the sorted distinct labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Units {
    codes: Vec<usize>,
    groups: Vec<Vec<usize>>,
}

impl Units {
    /// Build the assignment from one label per observation
    pub fn from_labels<U: Ord>(labels: &[U]) -> Self {
        let mut levels: BTreeMap<&U, usize> = BTreeMap::new();
        for label in labels {
            levels.entry(label).or_insert(0);
        }
        for (code, slot) in levels.values_mut().enumerate() {
            *slot = code;
        }

        let mut groups = vec![Vec::new(); levels.len()];
        let codes = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let code = levels[label];
                groups[code].push(i);
                code
            })
            .collect();

        Self { codes, groups }
    }

    /// Number of observations covered
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of distinct units
    pub fn n_units(&self) -> usize {
        self.groups.len()
    }

    /// Unit code of each observation
    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    /// Observation indices belonging to `unit`
    pub fn members(&self, unit: usize) -> &[usize] {
        &self.groups[unit]
    }
}

/// One drawn unit and the observations resampled from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitBlock {
    pub unit: usize,
    pub indices: Vec<usize>,
}

/// Draw `n` indices uniformly from `[0, n)` with replacement
pub fn resample_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices = Vec::with_capacity(n);
    fill_indices(n, rng, &mut indices);
    indices
}

/// Draw one two-level resample: units first, then observations within units
///
/// The concatenation of the blocks' indices is the resampled index vector.
pub fn resample_blocks<R: Rng + ?Sized>(units: &Units, rng: &mut R) -> Vec<UnitBlock> {
    (0..units.n_units())
        .map(|_| {
            let mut indices = Vec::new();
            let unit = draw_unit_block(units, rng, &mut indices);
            UnitBlock { unit, indices }
        })
        .collect()
}

/// Pick one unit and append as many of its observations, drawn with
/// replacement, as it holds; returns the unit
fn draw_unit_block<R: Rng + ?Sized>(units: &Units, rng: &mut R, out: &mut Vec<usize>) -> usize {
    let unit = rng.gen_range(0..units.n_units());
    let members = units.members(unit);
    out.extend((0..members.len()).map(|_| members[rng.gen_range(0..members.len())]));
    unit
}

fn fill_indices<R: Rng + ?Sized>(n: usize, rng: &mut R, out: &mut Vec<usize>) {
    out.extend((0..n).map(|_| rng.gen_range(0..n)));
}

fn fill_unit_indices<R: Rng + ?Sized>(units: &Units, rng: &mut R, out: &mut Vec<usize>) {
    for _ in 0..units.n_units() {
        draw_unit_block(units, rng, out);
    }
}

/// Check that the inputs can be bootstrapped and return their common length
fn validate(args: &[&[f64]], n_boot: usize, units: Option<&Units>) -> Result<usize> {
    let first = args
        .first()
        .ok_or_else(|| Error::InputShape("No input sequences to bootstrap".to_string()))?;
    let n = first.len();

    if let Some(other) = args.iter().find(|a| a.len() != n) {
        return Err(Error::size_mismatch(n, other.len(), "bootstrap inputs"));
    }
    if n_boot == 0 {
        return Err(Error::Configuration(
            "Number of bootstrap resamples must be positive".to_string(),
        ));
    }
    if let Some(units) = units {
        if units.len() != n {
            return Err(Error::Configuration(format!(
                "units has length {}, but the data has length {}",
                units.len(),
                n
            )));
        }
    }
    if n == 0 {
        return Err(Error::empty_input("bootstrap"));
    }
    Ok(n)
}

/// Resample `args` `n_boot` times and aggregate each draw
///
/// All sequences are gathered with the same indices, so paired statistics
/// such as correlations or regression fits keep their pairing.
///
/// # Errors
///
/// - `InputShape` if no sequence is given or their lengths differ
/// - `Configuration` if `n_boot` is zero or `units` has the wrong length
/// - `EmptyInput` if the sequences are empty
///
/// # Example
///
/// ```rust
/// use rand::{rngs::StdRng, SeedableRng};
/// use statplot_confidence::{bootstrap, Estimator};
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let mut rng = StdRng::seed_from_u64(0);
/// let boots: Vec<f64> = bootstrap(&[&data], &Estimator::Mean, 100, None, &mut rng).unwrap();
/// assert_eq!(boots.len(), 100);
/// ```
#[instrument(skip(args, aggregator, units, rng), fields(n_args = args.len(), n_boot, with_units = units.is_some()))]
pub fn bootstrap<T, A, R>(
    args: &[&[f64]],
    aggregator: &A,
    n_boot: usize,
    units: Option<&Units>,
    rng: &mut R,
) -> Result<Vec<T>>
where
    A: Aggregator<T> + ?Sized,
    R: Rng + ?Sized,
{
    let n = validate(args, n_boot, units)?;
    debug!("Running {} bootstrap resamples over {} observations", n_boot, n);

    let mut workspace = ResampleWorkspace::new(args.len(), n);
    let mut distribution = Vec::with_capacity(n_boot);
    for _ in 0..n_boot {
        let indices = workspace.index_buffer();
        match units {
            Some(units) => fill_unit_indices(units, rng, indices),
            None => fill_indices(n, rng, indices),
        }
        let resampled = workspace.gather_current(args);
        distribution.push(aggregator.aggregate(&resampled));
    }
    Ok(distribution)
}

/// Bootstrap runner that owns the resample count, seed and units
///
/// ```rust
/// use statplot_confidence::{Bootstrap, Estimator};
///
/// let data = [2.0, 4.0, 6.0, 8.0];
/// let boots: Vec<f64> = Bootstrap::new()
///     .with_resamples(500)
///     .with_seed(7)
///     .run(&[&data], &Estimator::Median)
///     .unwrap();
/// assert_eq!(boots.len(), 500);
/// ```
#[derive(Debug, Clone)]
pub struct Bootstrap {
    n_boot: usize,
    seed: Option<u64>,
    units: Option<Units>,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrap {
    /// Create a runner with [`DEFAULT_N_BOOT`] resamples and no seed
    pub fn new() -> Self {
        Self {
            n_boot: DEFAULT_N_BOOT,
            seed: None,
            units: None,
        }
    }

    /// Set the number of bootstrap resamples
    pub fn with_resamples(mut self, n_boot: usize) -> Self {
        self.n_boot = n_boot;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set an optional seed
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Resample whole units instead of single observations
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn n_resamples(&self) -> usize {
        self.n_boot
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Run with a generator seeded from the configured seed, or from the
    /// thread-local generator when no seed is set
    pub fn run<T, A>(&self, args: &[&[f64]], aggregator: &A) -> Result<Vec<T>>
    where
        A: Aggregator<T> + ?Sized,
    {
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        self.run_with_rng(args, aggregator, &mut rng)
    }

    /// Run with a caller-supplied generator
    pub fn run_with_rng<T, A, R>(&self, args: &[&[f64]], aggregator: &A, rng: &mut R) -> Result<Vec<T>>
    where
        A: Aggregator<T> + ?Sized,
        R: Rng + ?Sized,
    {
        bootstrap(args, aggregator, self.n_boot, self.units.as_ref(), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Estimator;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;

    #[test]
    fn test_units_from_labels() {
        let units = Units::from_labels(&["b", "a", "b", "c", "a"]);
        assert_eq!(units.len(), 5);
        assert_eq!(units.n_units(), 3);
        assert_eq!(units.codes(), &[1, 0, 1, 2, 0]);
        assert_eq!(units.members(0), &[1, 4]);
        assert_eq!(units.members(1), &[0, 2]);
        assert_eq!(units.members(2), &[3]);
    }

    #[test]
    fn test_resample_indices_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let indices = resample_indices(20, &mut rng);
        assert_eq!(indices.len(), 20);
        assert!(indices.iter().all(|&i| i < 20));
    }

    #[test]
    fn test_resample_blocks_stay_within_units() {
        let labels = [0, 0, 0, 1, 1, 2, 2, 2, 2];
        let units = Units::from_labels(&labels);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..50 {
            let blocks = resample_blocks(&units, &mut rng);
            assert_eq!(blocks.len(), units.n_units());
            for block in &blocks {
                assert_eq!(block.indices.len(), units.members(block.unit).len());
                assert!(block.indices.iter().all(|&i| labels[i] == block.unit));
            }
        }
    }

    #[test]
    fn test_unit_blocks_match_resample_draws() {
        let units = Units::from_labels(&[0, 0, 0, 1, 1, 2, 2, 2, 2]);
        let mut a = ChaCha8Rng::seed_from_u64(8);
        let mut b = ChaCha8Rng::seed_from_u64(8);

        let blocks: Vec<usize> = resample_blocks(&units, &mut a)
            .into_iter()
            .flat_map(|block| block.indices)
            .collect();
        let mut flat = Vec::new();
        fill_unit_indices(&units, &mut b, &mut flat);
        assert_eq!(blocks, flat);
    }

    #[test]
    fn test_unit_bootstrap_draws_whole_blocks() {
        let labels = [0, 0, 0, 1, 1, 2, 2, 2, 2];
        let units = Units::from_labels(&labels);
        // Each value is its own index, so the aggregator sees the drawn indices
        let data: Vec<f64> = (0..labels.len()).map(|i| i as f64).collect();
        let draws = RefCell::new(Vec::new());
        let record = |s: &[&[f64]]| {
            draws.borrow_mut().push(s[0].iter().map(|&v| v as usize).collect::<Vec<_>>());
            0.0
        };

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let _: Vec<f64> = bootstrap(&[&data], &record, 200, Some(&units), &mut rng).unwrap();

        let draws = draws.into_inner();
        assert_eq!(draws.len(), 200);
        for draw in &draws {
            let mut rest = draw.as_slice();
            let mut n_blocks = 0;
            while let Some(&first) = rest.first() {
                let unit = labels[first];
                let size = units.members(unit).len();
                assert!(rest.len() >= size);
                assert!(rest[..size].iter().all(|&i| labels[i] == unit));
                rest = &rest[size..];
                n_blocks += 1;
            }
            assert_eq!(n_blocks, units.n_units());
        }
    }

    #[test]
    fn test_exact_resample_count() {
        let data = [1.0, 2.0, 3.0];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let boots: Vec<f64> = bootstrap(&[&data], &Estimator::Mean, 37, None, &mut rng).unwrap();
        assert_eq!(boots.len(), 37);
    }

    #[test]
    fn test_multiple_sequences_stay_paired() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        let ratio = |s: &[&[f64]]| s[1].iter().sum::<f64>() / s[0].iter().sum::<f64>();

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let boots: Vec<f64> = bootstrap(&[&x, &y], &ratio, 100, None, &mut rng).unwrap();
        assert!(boots.iter().all(|r| r.is_nan() || (r - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_vector_statistic() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let min_max = |s: &[&[f64]]| {
            let lo = s[0].iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = s[0].iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            vec![lo, hi]
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let boots: Vec<Vec<f64>> = bootstrap(&[&data], &min_max, 20, None, &mut rng).unwrap();
        assert_eq!(boots.len(), 20);
        assert!(boots.iter().all(|b| b.len() == 2 && b[0] <= b[1]));
    }

    #[test]
    fn test_unequal_lengths_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result: Result<Vec<f64>> =
            bootstrap(&[&[1.0, 2.0], &[1.0]], &Estimator::Mean, 10, None, &mut rng);
        assert!(matches!(result, Err(Error::InputShape(_))));

        let result: Result<Vec<f64>> = bootstrap(&[], &Estimator::Mean, 10, None, &mut rng);
        assert!(matches!(result, Err(Error::InputShape(_))));
    }

    #[test]
    fn test_units_length_mismatch_error() {
        let units = Units::from_labels(&[1, 2]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result: Result<Vec<f64>> =
            bootstrap(&[&[1.0, 2.0, 3.0]], &Estimator::Mean, 10, Some(&units), &mut rng);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_zero_resamples_error() {
        let result: Result<Vec<f64>> = Bootstrap::new()
            .with_resamples(0)
            .run(&[&[1.0, 2.0]], &Estimator::Mean);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_empty_input_error() {
        let result: Result<Vec<f64>> = Bootstrap::new().run(&[&[]], &Estimator::Mean);
        match result {
            Err(Error::EmptyInput(operation)) => assert_eq!(operation, "bootstrap"),
            other => panic!("Wrong result: {other:?}"),
        }
    }

    #[test]
    fn test_seed_determinism() {
        let data = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let runner = Bootstrap::new().with_resamples(200).with_seed(42);

        let a: Vec<f64> = runner.run(&[&data], &Estimator::Mean).unwrap();
        let b: Vec<f64> = runner.run(&[&data], &Estimator::Mean).unwrap();
        assert_eq!(a, b);

        let c: Vec<f64> = runner
            .clone()
            .with_seed(43)
            .run(&[&data], &Estimator::Mean)
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_unit_resample_on_constant_units() {
        // Every unit holds one repeated value, so a unit draw reproduces it
        let data = [1.0, 1.0, 1.0, 5.0, 5.0, 5.0];
        let units = Units::from_labels(&["a", "a", "a", "b", "b", "b"]);
        let boots: Vec<f64> = Bootstrap::new()
            .with_resamples(100)
            .with_seed(9)
            .with_units(units)
            .run(&[&data], &Estimator::Mean)
            .unwrap();

        for mean in boots {
            assert!(mean == 1.0 || mean == 3.0 || mean == 5.0);
        }
    }
}
