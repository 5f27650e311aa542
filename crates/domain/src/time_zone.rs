// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion between tenant wall-clock time and UTC.
//!
//! Teams declare their weekly home slot as a local day and time. All stored
//! instants are UTC, so every generated date passes through this converter.
//!
//! ## DST handling
//!
//! - Ambiguous local times (clocks turned back) resolve to the earliest instant
//! - Non-existent local times (clocks turned forward) are an error; callers
//!   decide whether to skip the date

use crate::error::DomainError;
use crate::period::DateTimePeriod;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Converts between a tenant's local time zone and UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneConverter {
    tz: Tz,
}

impl TimeZoneConverter {
    /// Creates a converter for an IANA time zone name such as `Europe/Berlin`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is not a known zone.
    pub fn new(time_zone: &str) -> Result<Self, DomainError> {
        let tz: Tz = time_zone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(time_zone.to_string()))?;
        Ok(Self { tz })
    }

    /// Creates a converter that treats local time as UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Returns the IANA name of the time zone.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Converts a local wall-clock time to UTC.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLocalTime` if the local time falls into a
    /// DST gap and therefore never happens.
    pub fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, DomainError> {
        self.tz
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| DomainError::InvalidLocalTime {
                local,
                time_zone: self.tz.name().to_string(),
            })
    }

    /// Converts a UTC instant to local wall-clock time.
    #[must_use]
    pub fn to_local(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        utc.with_timezone(&self.tz).naive_local()
    }

    /// Returns the local calendar date of a UTC instant.
    #[must_use]
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date()
    }

    /// Builds the UTC period covering local days `first` through `last`, both
    /// inclusive, from local midnight to the last second of `last`.
    ///
    /// # Errors
    ///
    /// Returns an error if either boundary cannot be resolved in the time zone.
    pub fn local_days_period(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<DateTimePeriod, DomainError> {
        let start = self.to_utc(first.and_time(NaiveTime::MIN))?;
        let end_of_last = last.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::seconds(1);
        let end = self.to_utc(end_of_last)?;
        Ok(DateTimePeriod::new(start, end))
    }
}

impl Default for TimeZoneConverter {
    fn default() -> Self {
        Self::utc()
    }
}
