// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-robin fixture planning.
//!
//! `MatchPlanner` turns the teams of a round into a dated double round-robin:
//! pairings and referees come from `rr_fixtures_domain`, candidate dates from
//! the teams' weekly home slots and manually entered dates, and the finished
//! matches go back to a `FixtureRepository` in one batch per round.
//!
//! `InMemoryRepository` keeps a whole data set in a serde `Snapshot` and is
//! what the command line tool and the tests plan against.

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

mod available_dates;
mod booking;
mod cancellation;
mod context;
mod error;
mod memory;
mod planner;
mod repository;
mod settings;

#[cfg(test)]
mod tests;

pub use available_dates::AvailableDates;
pub use booking::BookedSlots;
pub use cancellation::Cancellation;
pub use context::PlanningContext;
pub use error::{ConflictScope, ErrorKind, PlanningError, RepositoryError};
pub use memory::{InMemoryRepository, RoundTeams, Snapshot};
pub use planner::{MatchPlanner, PlanOutcome};
pub use repository::FixtureRepository;
pub use settings::PlanningSettings;

pub use rr_fixtures_domain as domain;
