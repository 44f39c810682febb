// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairwise overlap detection over the install-time center snapshot.
//!
//! Every unordered pair of distinct centers is compared, so the cost is
//! quadratic in the number of tracked elements. The audit runs once per
//! session over a bounded page.

use alloc::vec;
use alloc::vec::Vec;

use crate::geometry::Center;

/// Indices of elements that take part in at least one close pair.
///
/// Each index appears once, in ascending order, regardless of how many pairs
/// it belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlapSet {
    members: Vec<usize>,
    pairs: usize,
}

impl OverlapSet {
    /// Flagged element indices.
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of distinct flagged elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nothing overlaps.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of close pairs found.
    #[inline]
    #[must_use]
    pub const fn pairs(&self) -> usize {
        self.pairs
    }

    /// Returns `true` if `index` was flagged.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.members.binary_search(&index).is_ok()
    }
}

/// Flags every element whose center lies strictly closer than `threshold` to
/// another element's center.
#[must_use]
pub fn detect_overlaps(centers: &[Center], threshold: f64) -> OverlapSet {
    let mut flagged = vec![false; centers.len()];
    let mut pairs = 0;
    for (i, a) in centers.iter().enumerate() {
        for (j, b) in centers.iter().enumerate().skip(i + 1) {
            if a.distance(*b) < threshold {
                flagged[i] = true;
                flagged[j] = true;
                pairs += 1;
            }
        }
    }
    let members = flagged
        .iter()
        .enumerate()
        .filter_map(|(i, &hit)| hit.then_some(i))
        .collect();
    OverlapSet { members, pairs }
}
