// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order statistics for box plots.

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

use crate::group::rollup;

/// Returned when asked to summarize a group with no values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot summarize an empty group")]
pub struct EmptyGroupError;

/// Five-number summary of one group.
///
/// For a non-empty group of finite values, `min <= q1 <= median <= q3 <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSummary {
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Largest value.
    pub max: f64,
}

impl GroupSummary {
    /// Summarizes values that are already sorted ascending.
    pub fn from_sorted(sorted: &[f64]) -> Result<Self, EmptyGroupError> {
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Err(EmptyGroupError);
        };
        let q = |p| quantile_sorted(sorted, p).ok_or(EmptyGroupError);
        Ok(Self {
            min,
            q1: q(0.25)?,
            median: q(0.5)?,
            q3: q(0.75)?,
            max,
        })
    }

    /// Interquartile range, `q3 - q1`.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear-interpolation quantile of an ascending slice.
///
/// The rank is `p * (n - 1)`; the result interpolates between the values at
/// `floor(rank)` and `floor(rank) + 1`. Returns `None` for an empty slice or a `NaN` `p`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || p.is_nan() {
        return None;
    }
    if p <= 0.0 || n == 1 {
        return Some(sorted[0]);
    }
    if p >= 1.0 {
        return Some(sorted[n - 1]);
    }
    let rank = (n - 1) as f64 * p;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "rank lies in [0, n - 1), so truncation is floor"
    )]
    let i0 = (rank as usize).min(n - 2);
    let v0 = sorted[i0];
    let v1 = sorted[i0 + 1];
    Some(v0 + (v1 - v0) * (rank - i0 as f64))
}

/// Sorts a copy of `values` and summarizes it.
///
/// `NaN` sorts after every number, so it surfaces in `max` (and in quartiles that touch
/// it) instead of being dropped.
pub fn summarize(values: &[f64]) -> Result<GroupSummary, EmptyGroupError> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    GroupSummary::from_sorted(&sorted)
}

/// Groups `items` by key and summarizes each group's values.
///
/// Groups come back in first-occurrence order of their key.
pub fn summarize_by<'a, T, K>(
    items: &'a [T],
    key: impl Fn(&'a T) -> K,
    value: impl Fn(&'a T) -> f64,
) -> Result<Vec<(K, GroupSummary)>, EmptyGroupError>
where
    K: Eq + Hash + Clone,
{
    rollup(items, key, |_, members| {
        let values: Vec<f64> = members.iter().map(|&m| value(m)).collect();
        summarize(&values)
    })
    .into_iter()
    .map(|(k, s)| s.map(|s| (k, s)))
    .collect()
}
