use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};

/// A train/test partition of a dataset.
///
/// `train_indices` and `test_indices` are row numbers in the parent dataset,
/// in the order the rows appear in `train` and `test`.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Randomly partitions `dataset` into training and test subsets.
///
/// The test subset holds `ceil(test_size · n)` samples and the training
/// subset the rest. Rows are taken from a permutation of `0..n` shuffled by a
/// ChaCha8 generator seeded with `random_state`, so the same arguments always
/// produce the same split.
///
/// # Errors
/// `InvalidSplit` when `test_size` is not strictly between 0 and 1, or when
/// either subset would be empty.
pub fn train_test_split(dataset: &Dataset, test_size: f64, random_state: u64) -> Result<Split> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(Error::InvalidSplit(format!(
            "test_size must be strictly between 0 and 1, got {test_size}"
        )));
    }

    let n = dataset.n_samples();
    let n_test = (test_size * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(Error::InvalidSplit(format!(
            "test_size={test_size} with {n} samples leaves {n_train} training and {n_test} test samples"
        )));
    }

    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(&mut ChaCha8Rng::seed_from_u64(random_state));

    let test_indices = permutation[..n_test].to_vec();
    let train_indices = permutation[n_test..].to_vec();

    Ok(Split {
        train: dataset.subset(&train_indices),
        test: dataset.subset(&test_indices),
        train_indices,
        test_indices,
    })
}
