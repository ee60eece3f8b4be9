//! Seeded train/test split.

use crate::error::{InsightError, Result};
use crate::types::SplitShape;
use polars::prelude::*;
use rand::prelude::*;
use tracing::debug;

/// Shuffle the rows with a seeded RNG and cut off a test set.
///
/// The test set holds `ceil(n * test_size)` rows taken from the front of
/// the permutation, the train set the rest. The same seed always yields the
/// same split.
///
/// # Errors
///
/// [`InsightError::InvalidConfig`] when `test_size` is not strictly between
/// 0 and 1, and [`InsightError::InvalidInput`] for a zero-row dataset or a
/// split that would leave the train set empty.
pub fn train_test_split(
    df: &DataFrame,
    test_size: f64,
    seed: u64,
) -> Result<(DataFrame, DataFrame)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(InsightError::InvalidConfig(format!(
            "test_size must be strictly between 0 and 1, got {}",
            test_size
        )));
    }

    let n = df.height();
    if n == 0 {
        return Err(InsightError::InvalidInput(
            "cannot split a dataset with zero rows".to_string(),
        ));
    }

    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test >= n {
        return Err(InsightError::InvalidInput(format!(
            "test_size {} leaves no training rows out of {}",
            test_size, n
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut permutation: Vec<IdxSize> = (0..n as IdxSize).collect();
    permutation.shuffle(&mut rng);

    let test_idx = IdxCa::from_vec("idx".into(), permutation[..n_test].to_vec());
    let train_idx = IdxCa::from_vec("idx".into(), permutation[n_test..].to_vec());

    let train = df.take(&train_idx)?;
    let test = df.take(&test_idx)?;
    debug!(
        "Split {} rows into {} train / {} test (seed {})",
        n,
        train.height(),
        test.height(),
        seed
    );

    Ok((train, test))
}

/// Shapes of a split without keeping the frames around.
pub fn split_shape(df: &DataFrame, test_size: f64, seed: u64) -> Result<SplitShape> {
    let (train, test) = train_test_split(df, test_size, seed)?;
    Ok(SplitShape {
        train: train.shape(),
        test: test.shape(),
    })
}
