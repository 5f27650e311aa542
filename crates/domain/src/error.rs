// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;

/// Errors that can occur while building a fixture schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Not enough participants for the requested pairing or referee policy.
    TooFewParticipants {
        /// The minimum number of participants required.
        required: usize,
        /// The number of distinct participants supplied.
        actual: usize,
    },
    /// A referee policy that picks a third participant was given no candidates.
    MissingRefereeCandidates,
    /// There are fewer distinct match days than pairing groups need.
    InsufficientDays {
        /// The number of pairing groups that need a date period.
        groups: usize,
        /// The number of distinct days with at least one available date.
        days: usize,
    },
    /// The configured time zone is not a known IANA zone.
    InvalidTimezone(String),
    /// A local wall-clock time does not exist in the configured time zone.
    InvalidLocalTime {
        /// The local date and time that could not be resolved.
        local: NaiveDateTime,
        /// The time zone used for the conversion.
        time_zone: String,
    },
    /// A grouping strategy name could not be parsed.
    InvalidGroupingStrategy(String),
    /// A referee type name could not be parsed.
    InvalidRefereeType(String),
    /// A pairing strategy name could not be parsed.
    InvalidPairingStrategy(String),
}

impl DomainError {
    /// Returns whether this error describes a configuration problem rather
    /// than a schedule that cannot be built from the available dates.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::InsufficientDays { .. })
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewParticipants { required, actual } => {
                write!(
                    f,
                    "At least {required} participants are required, but {actual} were supplied"
                )
            }
            Self::MissingRefereeCandidates => {
                write!(f, "Referee candidates list must not be empty")
            }
            Self::InsufficientDays { groups, days } => {
                write!(
                    f,
                    "Cannot assign date periods to {groups} pairing groups from {days} available days"
                )
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid time zone: {tz}"),
            Self::InvalidLocalTime { local, time_zone } => {
                write!(f, "Local time {local} does not exist in time zone {time_zone}")
            }
            Self::InvalidGroupingStrategy(name) => {
                write!(f, "Invalid grouping strategy: {name}")
            }
            Self::InvalidRefereeType(name) => write!(f, "Invalid referee type: {name}"),
            Self::InvalidPairingStrategy(name) => {
                write!(f, "Invalid pairing strategy: {name}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
