// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Choosing one date per pairing so a group's matches cluster in time.
//!
//! Every candidate of every pairing is compared with every candidate of every
//! other pairing in the group. Each candidate remembers the smallest day
//! distance it has to any foreign candidate. The best candidate of a pairing
//! is the one with the smallest remembered distance, ties going to the
//! earliest start.
//!
//! Distances are whole calendar days, never fractions.

use chrono::{DateTime, NaiveDate, Utc};

/// A candidate date for one pairing, wrapping the caller's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    /// The caller's payload, e.g. an available date record.
    pub item: T,
    /// Kick-off (UTC), used for tie-breaking.
    pub start: DateTime<Utc>,
    /// Local calendar date, used for day distances.
    pub local_date: NaiveDate,
    /// Smallest day distance to a candidate of another pairing. `None` until
    /// a comparison happened, and then treated as larger than any distance.
    pub min_day_diff: Option<i64>,
}

impl<T> Candidate<T> {
    /// Wraps a payload as a fresh candidate.
    #[must_use]
    pub const fn new(item: T, start: DateTime<Utc>, local_date: NaiveDate) -> Self {
        Self {
            item,
            start,
            local_date,
            min_day_diff: None,
        }
    }

    fn record(&mut self, days: i64) {
        if self.min_day_diff.is_none_or(|current| days < current) {
            self.min_day_diff = Some(days);
        }
    }
}

/// Records in every candidate the minimum day distance to any candidate of
/// any other pairing.
pub fn cross_compare<T>(candidates: &mut [Vec<Candidate<T>>]) {
    for i in 0..candidates.len() {
        let (head, tail) = candidates.split_at_mut(i + 1);
        let left = &mut head[i];
        for right in tail.iter_mut() {
            for a in left.iter_mut() {
                for b in right.iter_mut() {
                    let days = (a.local_date - b.local_date).num_days().abs();
                    a.record(days);
                    b.record(days);
                }
            }
        }
    }
}

/// Returns candidate indices ordered from best to worst.
#[must_use]
pub fn ranked<T>(candidates: &[Candidate<T>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|index| {
        let candidate = &candidates[*index];
        (
            candidate.min_day_diff.unwrap_or(i64::MAX),
            candidate.start,
            *index,
        )
    });
    order
}

/// Cross-compares the candidates and returns the best candidate index per
/// pairing, or `None` for a pairing without candidates.
pub fn select_closest_candidates<T>(candidates: &mut [Vec<Candidate<T>>]) -> Vec<Option<usize>> {
    cross_compare(candidates);
    candidates
        .iter()
        .map(|list| ranked(list).first().copied())
        .collect()
}
