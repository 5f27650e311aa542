// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cancellation::Cancellation;
use crate::error::PlanningError;
use crate::repository::FixtureRepository;
use rr_fixtures_domain::{
    AvailableDate, DateTimePeriod, ExcludedDateWindow, Match, Round, RoundId, Team, TeamId,
    TimeZoneConverter, TournamentId,
};
use std::collections::BTreeSet;

/// Everything the planner needs to know about one round, loaded once per
/// planning run and dropped afterwards.
#[derive(Debug, Clone)]
pub struct PlanningContext {
    /// The round being planned.
    pub round: Round,
    /// The round's teams, ordered by id.
    pub teams: Vec<Team>,
    /// Exclusion windows of the tournament, all scopes.
    pub excluded_dates: Vec<ExcludedDateWindow>,
    /// Manually entered available dates of the tournament.
    pub manual_dates: Vec<AvailableDate>,
    /// Matches already stored for the round.
    pub existing_matches: Vec<Match>,
    /// Rounds whose stored matches are about to be replaced, so they do not
    /// count as venue occupancy.
    pub replaced_rounds: BTreeSet<RoundId>,
    /// Keep stored matches and only add the missing fixtures.
    pub keep_existing: bool,
}

impl PlanningContext {
    /// Loads the context of a round from the repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The data source
    /// * `round_id` - The round to plan
    /// * `replaced_rounds` - Rounds whose stored matches will be replaced
    /// * `keep_existing` - Whether stored matches of the round are kept
    /// * `cancellation` - Checked before every repository call
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::RoundNotFound` for an unknown round, or the
    /// repository's error.
    pub fn load(
        repository: &dyn FixtureRepository,
        round_id: RoundId,
        replaced_rounds: BTreeSet<RoundId>,
        keep_existing: bool,
        cancellation: &Cancellation,
    ) -> Result<Self, PlanningError> {
        cancellation.check()?;
        let round = repository
            .round(round_id)?
            .ok_or(PlanningError::RoundNotFound(round_id))?;

        cancellation.check()?;
        let mut teams = repository.teams(round_id)?;
        teams.sort_by_key(|team| team.id);

        cancellation.check()?;
        let excluded_dates = repository.excluded_dates(round.tournament_id)?;

        cancellation.check()?;
        let manual_dates = repository.manual_available_dates(round.tournament_id)?;

        cancellation.check()?;
        let existing_matches = repository.matches(round_id)?;

        Ok(Self {
            round,
            teams,
            excluded_dates,
            manual_dates,
            existing_matches,
            replaced_rounds,
            keep_existing,
        })
    }

    /// Returns the tournament of the round.
    #[must_use]
    pub const fn tournament_id(&self) -> TournamentId {
        self.round.tournament_id
    }

    /// Returns the ids of the round's teams in ascending order.
    #[must_use]
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|team| team.id).collect()
    }

    /// Looks up a team of the round.
    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    /// Returns whether the team has a complete home slot.
    #[must_use]
    pub fn can_host(&self, id: TeamId) -> bool {
        self.team(id).is_some_and(Team::can_host)
    }

    /// Returns the first exclusion window that keeps `team` from playing in
    /// `period` in this round.
    #[must_use]
    pub fn excluding_window(
        &self,
        team: TeamId,
        period: &DateTimePeriod,
        date_only: bool,
        tz: &TimeZoneConverter,
    ) -> Option<&ExcludedDateWindow> {
        let tournament_id = self.tournament_id();
        self.excluded_dates.iter().find(|window| {
            window.applies_to(tournament_id, self.round.id, team)
                && window.blocks(period, date_only, tz)
        })
    }

    /// Returns whether a stored match counts as venue occupancy for this run.
    #[must_use]
    pub fn occupies(&self, stored: &Match) -> bool {
        stored.is_complete
            || self.keep_existing
            || !self.replaced_rounds.contains(&stored.round_id)
    }

    /// Returns the stored matches that survive this run.
    pub fn kept_matches(&self) -> impl Iterator<Item = &Match> + '_ {
        self.existing_matches
            .iter()
            .filter(|stored| self.keep_existing || stored.is_complete)
    }
}
