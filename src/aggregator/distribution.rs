//! Empirical distributions and percentile queries.

use crate::utils::error::ExtractError;
use serde::{Deserialize, Serialize};

/// Empirical CDF: sorted samples and the cumulative fraction at each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cdf<T> {
    pub values: Vec<T>,
    pub fractions: Vec<f64>,
}

impl<T: Copy> Cdf<T> {
    /// Sample at percentile `p`, see [`percentile`]
    pub fn percentile(&self, p: f64) -> Result<T, ExtractError> {
        percentile(&self.values, p)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build the empirical CDF of `samples`
///
/// `fractions[i]` is `(i + 1) / n`.
///
/// # Errors
/// * `ExtractError::EmptyInput` - `samples` is empty
pub fn cdf<T: Copy + Ord>(samples: &[T]) -> Result<Cdf<T>, ExtractError> {
    if samples.is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let mut values = samples.to_vec();
    values.sort_unstable();

    let n = values.len() as f64;
    let fractions = (1..=values.len()).map(|i| i as f64 / n).collect();

    Ok(Cdf { values, fractions })
}

/// Sample at percentile `p` of an ascending sequence
///
/// Uses index `floor(n * p)`, clamped to the last sample so `p = 1.0` yields
/// the maximum.
///
/// # Errors
/// * `ExtractError::EmptyInput` - `sorted` is empty
/// * `ExtractError::InvalidPercentile` - `p` is not in (0, 1]
pub fn percentile<T: Copy>(sorted: &[T], p: f64) -> Result<T, ExtractError> {
    if !(p > 0.0 && p <= 1.0) {
        return Err(ExtractError::InvalidPercentile(p));
    }
    let last = sorted.len().checked_sub(1).ok_or(ExtractError::EmptyInput)?;

    let index = ((sorted.len() as f64) * p).floor() as usize;
    Ok(sorted[index.min(last)])
}
