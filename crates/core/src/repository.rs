// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The data-access seam of the planner.
//!
//! The planner never owns tournament data. It reads rounds, teams, exclusions
//! and occupancy through this trait and hands the finished match list back
//! in one batch per round. Implementations decide how that batch is made
//! atomic.

use crate::error::RepositoryError;
use rr_fixtures_domain::{
    AvailableDate, DateTimePeriod, ExcludedDateWindow, Match, Round, RoundId, Team, TournamentId,
    VenueId,
};

/// Storage operations the planner depends on.
pub trait FixtureRepository {
    /// Loads a round with its legs.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn round(&self, round_id: RoundId) -> Result<Option<Round>, RepositoryError>;

    /// Loads every round of a tournament, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn rounds(&self, tournament_id: TournamentId) -> Result<Vec<Round>, RepositoryError>;

    /// Loads the teams taking part in a round.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn teams(&self, round_id: RoundId) -> Result<Vec<Team>, RepositoryError>;

    /// Loads all exclusion windows of a tournament, whatever their scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn excluded_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<ExcludedDateWindow>, RepositoryError>;

    /// Loads the manually entered available dates of a tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn manual_available_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<AvailableDate>, RepositoryError>;

    /// Returns the persisted matches of the tournament that use `venue_id`
    /// at some point inside `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn occupying_matches(
        &self,
        venue_id: VenueId,
        period: &DateTimePeriod,
        tournament_id: TournamentId,
    ) -> Result<Vec<Match>, RepositoryError>;

    /// Returns whether any persisted match occupies the venue in `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn is_venue_occupied(
        &self,
        venue_id: VenueId,
        period: &DateTimePeriod,
        tournament_id: TournamentId,
    ) -> Result<bool, RepositoryError> {
        Ok(!self
            .occupying_matches(venue_id, period, tournament_id)?
            .is_empty())
    }

    /// Loads the persisted matches of a round.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn matches(&self, round_id: RoundId) -> Result<Vec<Match>, RepositoryError>;

    /// Returns whether any match of the round has a result.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn any_complete_matches_in_round(&self, round_id: RoundId) -> Result<bool, RepositoryError>;

    /// Returns whether any match of the tournament has a result.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn any_complete_matches_in_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<bool, RepositoryError>;

    /// Stores the planned matches of a round as one batch and returns them
    /// with identifiers assigned.
    ///
    /// With `replace_existing` the round's incomplete matches are removed
    /// first. Either the whole batch is stored or nothing is.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn save_matches(
        &self,
        round_id: RoundId,
        matches: Vec<Match>,
        replace_existing: bool,
    ) -> Result<Vec<Match>, RepositoryError>;

    /// Removes generated available dates left behind by earlier runs and
    /// returns how many were removed. Manual dates are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn delete_generated_available_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<usize, RepositoryError>;
}
