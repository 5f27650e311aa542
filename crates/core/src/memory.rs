// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-memory repository backed by a serializable snapshot.
//!
//! The snapshot is the whole data set of one or more tournaments as a plain
//! serde document. It is loaded once, mutated in place by `save_matches` and
//! `delete_generated_available_dates`, and can be written back as JSON.

use crate::error::RepositoryError;
use crate::repository::FixtureRepository;
use crate::settings::PlanningSettings;
use rr_fixtures_domain::{
    AvailableDate, DateTimePeriod, ExcludedDateWindow, Match, Round, RoundId, Team, TeamId,
    TournamentId, Venue, VenueId,
};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// The teams entered into a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTeams {
    /// The round.
    pub round_id: RoundId,
    /// The teams playing in it.
    pub team_ids: Vec<TeamId>,
}

/// A complete, serializable data set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Tournament rule settings.
    pub settings: PlanningSettings,
    /// Known venues.
    pub venues: Vec<Venue>,
    /// Known teams.
    pub teams: Vec<Team>,
    /// Rounds with their legs.
    pub rounds: Vec<Round>,
    /// Team entries per round.
    pub round_teams: Vec<RoundTeams>,
    /// Exclusion windows.
    pub excluded_dates: Vec<ExcludedDateWindow>,
    /// Manual and generated available dates.
    pub available_dates: Vec<AvailableDate>,
    /// Persisted matches.
    pub matches: Vec<Match>,
}

impl Snapshot {
    fn tournament_of(&self, round_id: RoundId) -> Option<TournamentId> {
        self.rounds
            .iter()
            .find(|round| round.id == round_id)
            .map(|round| round.tournament_id)
    }

    fn next_match_id(&self) -> i64 {
        self.matches
            .iter()
            .filter_map(|m| m.id)
            .max()
            .map_or(1, |id| id + 1)
    }
}

/// A `FixtureRepository` that keeps everything in memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    snapshot: Mutex<Snapshot>,
}

impl InMemoryRepository {
    /// Creates a repository holding `snapshot`.
    #[must_use]
    pub const fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    /// Parses a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the document is invalid.
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        let snapshot: Snapshot = serde_json::from_str(json)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(Self::new(snapshot))
    }

    /// Serializes the current data as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be serialized.
    pub fn to_json(&self) -> Result<String, RepositoryError> {
        let guard = self.lock()?;
        serde_json::to_string_pretty(&*guard)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    /// Returns a copy of the current data.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository lock is poisoned.
    pub fn snapshot(&self) -> Result<Snapshot, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    /// Returns the stored planning settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository lock is poisoned.
    pub fn settings(&self) -> Result<PlanningSettings, RepositoryError> {
        Ok(self.lock()?.settings.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>, RepositoryError> {
        self.snapshot
            .lock()
            .map_err(|_| RepositoryError::Unavailable(String::from("snapshot lock poisoned")))
    }
}

impl FixtureRepository for InMemoryRepository {
    fn round(&self, round_id: RoundId) -> Result<Option<Round>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.rounds.iter().find(|round| round.id == round_id).cloned())
    }

    fn rounds(&self, tournament_id: TournamentId) -> Result<Vec<Round>, RepositoryError> {
        let guard = self.lock()?;
        let mut rounds: Vec<Round> = guard
            .rounds
            .iter()
            .filter(|round| round.tournament_id == tournament_id)
            .cloned()
            .collect();
        rounds.sort_by_key(|round| round.id);
        Ok(rounds)
    }

    fn teams(&self, round_id: RoundId) -> Result<Vec<Team>, RepositoryError> {
        let guard = self.lock()?;
        let Some(entry) = guard.round_teams.iter().find(|e| e.round_id == round_id) else {
            return Ok(Vec::new());
        };
        Ok(guard
            .teams
            .iter()
            .filter(|team| entry.team_ids.contains(&team.id))
            .cloned()
            .collect())
    }

    fn excluded_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<ExcludedDateWindow>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .excluded_dates
            .iter()
            .filter(|window| window.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    fn manual_available_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<AvailableDate>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .available_dates
            .iter()
            .filter(|date| date.tournament_id == tournament_id && !date.is_generated)
            .cloned()
            .collect())
    }

    fn occupying_matches(
        &self,
        venue_id: VenueId,
        period: &DateTimePeriod,
        tournament_id: TournamentId,
    ) -> Result<Vec<Match>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id && m.venue_id == Some(venue_id))
            .filter(|m| {
                m.planned_period()
                    .is_some_and(|planned| planned.overlaps_half_open(period))
            })
            .cloned()
            .collect())
    }

    fn matches(&self, round_id: RoundId) -> Result<Vec<Match>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .matches
            .iter()
            .filter(|m| m.round_id == round_id)
            .cloned()
            .collect())
    }

    fn any_complete_matches_in_round(&self, round_id: RoundId) -> Result<bool, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .matches
            .iter()
            .any(|m| m.round_id == round_id && m.is_complete))
    }

    fn any_complete_matches_in_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<bool, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .matches
            .iter()
            .any(|m| m.tournament_id == tournament_id && m.is_complete))
    }

    fn save_matches(
        &self,
        round_id: RoundId,
        matches: Vec<Match>,
        replace_existing: bool,
    ) -> Result<Vec<Match>, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.tournament_of(round_id).is_none() {
            return Err(RepositoryError::Unavailable(format!(
                "round {round_id} is not stored"
            )));
        }
        if replace_existing {
            guard
                .matches
                .retain(|m| m.round_id != round_id || m.is_complete);
        }

        let mut next_id = guard.next_match_id();
        let mut saved = Vec::with_capacity(matches.len());
        for mut planned in matches {
            planned.id = Some(next_id);
            next_id += 1;
            saved.push(planned);
        }
        guard.matches.extend(saved.iter().cloned());
        Ok(saved)
    }

    fn delete_generated_available_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<usize, RepositoryError> {
        let mut guard = self.lock()?;
        let before = guard.available_dates.len();
        guard
            .available_dates
            .retain(|date| date.tournament_id != tournament_id || !date.is_generated);
        Ok(before - guard.available_dates.len())
    }
}
