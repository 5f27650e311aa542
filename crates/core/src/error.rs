// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rr_fixtures_domain::{DomainError, RoundId, TournamentId};
use thiserror::Error;

/// Errors reported by a `FixtureRepository`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The storage backend could not be reached or is in a broken state.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be read or written in the expected format.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// What a refused planning run would have overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictScope {
    /// A single round.
    Round(RoundId),
    /// Every round of a tournament.
    Tournament(TournamentId),
}

impl std::fmt::Display for ConflictScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Round(id) => write!(f, "Round {id}"),
            Self::Tournament(id) => write!(f, "Tournament {id}"),
        }
    }
}

/// Coarse classification of planning failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input or settings, raised before any work is done.
    InvalidConfiguration,
    /// Regenerating would reshuffle matches that were already played.
    StateConflict,
    /// The available dates cannot carry the schedule.
    SchedulingInfeasible,
    /// A requested round does not exist.
    NotFound,
    /// The repository failed.
    Io,
    /// The caller cancelled the run.
    Cancelled,
}

/// Errors returned by the match planner.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// A pairing, grouping or date rule failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The repository failed; passed through unchanged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The round does not exist.
    #[error("Round {0} not found")]
    RoundNotFound(RoundId),

    /// Completed matches exist in the scope being planned.
    #[error("{scope} already has completed matches; refusing to regenerate fixtures")]
    StateConflict { scope: ConflictScope },

    /// The run was cancelled before anything was saved.
    #[error("Planning was cancelled")]
    Cancelled,
}

impl PlanningError {
    /// Returns the kind of failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => {
                if err.is_configuration_error() {
                    ErrorKind::InvalidConfiguration
                } else {
                    ErrorKind::SchedulingInfeasible
                }
            }
            Self::Repository(_) => ErrorKind::Io,
            Self::RoundNotFound(_) => ErrorKind::NotFound,
            Self::StateConflict { .. } => ErrorKind::StateConflict,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}
