// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain model and pure algorithms for round-robin fixture planning.
//!
//! Nothing in this crate performs I/O. The planner in the `rr-fixtures`
//! crate feeds it data loaded from a repository and persists its results.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod date_periods;
mod error;
mod grouping;
mod pairing;
mod period;
mod referee;
mod round_robin;
mod selection;
mod time_zone;
mod types;

#[cfg(test)]
mod tests;

pub use date_periods::{DayRange, assign_round_date_periods};
pub use error::DomainError;
pub use grouping::{GroupingStrategy, group_pairings};
pub use pairing::{Pairing, PairingGroup, PairingSet};
pub use period::DateTimePeriod;
pub use referee::{
    GuestReferee, HomeReferee, NoReferee, OtherFromRoundReferee, RefereeAssigner, RefereeType,
};
pub use round_robin::{PairingStrategy, RoundRobin, return_leg};
pub use selection::{Candidate, cross_compare, ranked, select_closest_candidates};
pub use time_zone::TimeZoneConverter;

// Re-export public types
pub use types::{
    AvailableDate, ExcludedDateWindow, HomeSlot, Match, Round, RoundId, RoundLeg, Team, TeamId,
    TournamentId, Venue, VenueId,
};
