// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Spreading pairing groups across the days of a leg.
//!
//! The distinct days on which at least one match could be played are cut
//! into `groups + 1` equally sized, contiguous chunks. Group `i` is planned in
//! chunk `i`. The trailing chunk, and any remainder left over by the integer
//! division, is not assigned to a group and stays free for rescheduling.

use crate::error::DomainError;
use chrono::NaiveDate;

/// An inclusive range of local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayRange {
    /// First day of the range.
    pub first: NaiveDate,
    /// Last day of the range (inclusive).
    pub last: NaiveDate,
}

/// Assigns a contiguous range of days to each of `group_count` groups.
///
/// `days` may be unsorted and contain duplicates.
///
/// # Errors
///
/// Returns `DomainError::InsufficientDays` if there are fewer distinct days
/// than `group_count + 1`, so that at least one group would get no day.
pub fn assign_round_date_periods(
    days: &[NaiveDate],
    group_count: usize,
) -> Result<Vec<DayRange>, DomainError> {
    if group_count == 0 {
        return Ok(Vec::new());
    }

    let mut distinct: Vec<NaiveDate> = days.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    let chunk = distinct.len() / (group_count + 1);
    if chunk == 0 {
        return Err(DomainError::InsufficientDays {
            groups: group_count,
            days: distinct.len(),
        });
    }

    Ok((0..group_count)
        .map(|index| DayRange {
            first: distinct[index * chunk],
            last: distinct[(index + 1) * chunk - 1],
        })
        .collect())
}
