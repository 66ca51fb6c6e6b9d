// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping and extent helpers.
//!
//! Groups always iterate in first-occurrence order of their key, so charts built from
//! them are deterministic for a given input order.

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// Returns the distinct keys of `items`, in first-occurrence order.
pub fn distinct<'a, T, K>(items: &'a [T], key: impl Fn(&'a T) -> K) -> Vec<K>
where
    K: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let k = key(item);
        if seen.insert(k.clone()) {
            out.push(k);
        }
    }
    out
}

/// Partitions `items` by key.
///
/// Groups are returned in first-occurrence order of their key; items keep input order
/// within a group. Every returned group is non-empty.
pub fn group<'a, T, K>(items: &'a [T], key: impl Fn(&'a T) -> K) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();
    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, alloc::vec![item]));
            }
        }
    }
    groups
}

/// Groups `items` by key and reduces each group to one value.
pub fn rollup<'a, T, K, V>(
    items: &'a [T],
    key: impl Fn(&'a T) -> K,
    mut reduce: impl FnMut(&K, &[&'a T]) -> V,
) -> Vec<(K, V)>
where
    K: Eq + Hash + Clone,
{
    group(items, key)
        .into_iter()
        .map(|(k, members)| {
            let v = reduce(&k, &members);
            (k, v)
        })
        .collect()
}

/// Returns `(min, max)` over the finite values, or `None` if there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Returns the maximum finite value, or `None` if there are none.
pub fn max(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    extent(values).map(|(_, hi)| hi)
}
