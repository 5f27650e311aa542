// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A span of time with optional bounds.
///
/// A missing bound means the period is unbounded on that side. Both bounds
/// are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateTimePeriod {
    /// Start of the period, or `None` for "since forever".
    pub start: Option<DateTime<Utc>>,
    /// End of the period, or `None` for "until forever".
    pub end: Option<DateTime<Utc>>,
}

impl DateTimePeriod {
    /// Creates a period bounded on both sides.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Creates a period without any bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Returns whether `instant` lies within the period.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| start <= instant) && self.end.is_none_or(|end| instant <= end)
    }

    /// Returns whether the two periods share at least one instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let starts_before_other_ends = match (self.start, other.end) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        };
        let ends_after_other_starts = match (self.end, other.start) {
            (Some(end), Some(start)) => end >= start,
            _ => true,
        };
        starts_before_other_ends && ends_after_other_starts
    }

    /// Returns whether the two periods intersect when both are read as
    /// half-open `[start, end)` ranges, so back-to-back periods do not clash.
    #[must_use]
    pub fn overlaps_half_open(&self, other: &Self) -> bool {
        let starts_before_other_ends = match (self.start, other.end) {
            (Some(start), Some(end)) => start < end,
            _ => true,
        };
        let ends_after_other_starts = match (self.end, other.start) {
            (Some(end), Some(start)) => end > start,
            _ => true,
        };
        starts_before_other_ends && ends_after_other_starts
    }

    /// Returns the smallest period covering both periods. An open bound on
    /// either side stays open.
    #[must_use]
    pub fn span(&self, other: &Self) -> Self {
        let start = match (self.start, other.start) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        };
        let end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        };
        Self { start, end }
    }

    /// Returns the length of the period, or `None` if a bound is open.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

impl std::fmt::Display for DateTimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{} - {}", start.to_rfc3339(), end.to_rfc3339()),
            (Some(start), None) => write!(f, "{} - ", start.to_rfc3339()),
            (None, Some(end)) => write!(f, " - {}", end.to_rfc3339()),
            (None, None) => write!(f, "unbounded"),
        }
    }
}
