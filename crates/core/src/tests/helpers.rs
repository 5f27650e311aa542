// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Cancellation, FixtureRepository, InMemoryRepository, MatchPlanner, PlanOutcome,
    PlanningError, RepositoryError, RoundTeams, Snapshot,
};
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc, Weekday};
use rr_fixtures_domain::{
    AvailableDate, DateTimePeriod, ExcludedDateWindow, Match, Round, RoundId, RoundLeg, Team,
    TeamId, TournamentId, VenueId,
};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TOURNAMENT: TournamentId = TournamentId(5);
pub const ROUND: RoundId = RoundId(1);

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

/// A leg from midnight of the first day to the last second of the last day.
pub fn leg(sequence_no: u32, first: DateTime<Utc>, last: DateTime<Utc>) -> RoundLeg {
    RoundLeg {
        sequence_no,
        start: first,
        end: last + Duration::days(1) - Duration::seconds(1),
    }
}

pub fn round(id: i64, legs: Vec<RoundLeg>) -> Round {
    Round {
        id: RoundId(id),
        tournament_id: TOURNAMENT,
        name: format!("Round {id}"),
        legs,
    }
}

pub fn hosting_team(id: i64, venue: i64, day: Weekday, hour: u32) -> Team {
    Team::new(TeamId(id), &format!("Team {id}")).with_home_slot(
        VenueId(venue),
        day,
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
    )
}

pub fn away_team(id: i64) -> Team {
    Team::new(TeamId(id), &format!("Team {id}"))
}

/// Builds a snapshot with one round in tournament 5 holding all `teams`.
pub fn snapshot(round: Round, teams: Vec<Team>) -> Snapshot {
    let round_teams = RoundTeams {
        round_id: round.id,
        team_ids: teams.iter().map(|team| team.id).collect(),
    };
    Snapshot {
        teams,
        rounds: vec![round],
        round_teams: vec![round_teams],
        ..Snapshot::default()
    }
}

/// Four teams at their own venues, Monday to Thursday at 19:00, with a
/// first leg in autumn 2024 and a return leg in spring 2025.
pub fn four_team_snapshot() -> Snapshot {
    let legs = vec![
        leg(1, at(2024, 9, 2, 0, 0), at(2024, 12, 22, 0, 0)),
        leg(2, at(2025, 1, 6, 0, 0), at(2025, 4, 27, 0, 0)),
    ];
    let teams = vec![
        hosting_team(1, 10, Weekday::Mon, 19),
        hosting_team(2, 20, Weekday::Tue, 19),
        hosting_team(3, 30, Weekday::Wed, 19),
        hosting_team(4, 40, Weekday::Thu, 19),
    ];
    snapshot(round(1, legs), teams)
}

/// A tournament-wide exclusion window covering whole UTC days.
pub fn excluded(first: DateTime<Utc>, last: DateTime<Utc>) -> ExcludedDateWindow {
    ExcludedDateWindow {
        date_from: first,
        date_to: last + Duration::days(1) - Duration::seconds(1),
        tournament_id: TOURNAMENT,
        round_id: None,
        team_id: None,
        reason: String::from("Holiday"),
    }
}

pub fn stored_match(
    id: i64,
    round_id: RoundId,
    home: i64,
    guest: i64,
    venue: i64,
    start: DateTime<Utc>,
) -> Match {
    Match {
        id: Some(id),
        tournament_id: TOURNAMENT,
        round_id,
        leg_sequence_no: 1,
        home_team_id: TeamId(home),
        guest_team_id: TeamId(guest),
        referee_id: None,
        planned_start: Some(start),
        planned_end: Some(start + Duration::hours(2)),
        venue_id: Some(VenueId(venue)),
        is_complete: false,
    }
}

pub fn plan(repository: &InMemoryRepository, keep_existing: bool) -> Result<PlanOutcome, PlanningError> {
    let settings = repository.settings().unwrap();
    MatchPlanner::new(repository, settings).generate_fixtures_for_round(ROUND, keep_existing)
}

/// Asserts that no two dated matches use the same venue at the same time.
pub fn assert_no_double_booking(matches: &[Match]) {
    for (i, a) in matches.iter().enumerate() {
        for b in &matches[i + 1..] {
            let (Some(pa), Some(pb)) = (a.planned_period(), b.planned_period()) else {
                continue;
            };
            assert!(
                a.venue_id != b.venue_id || !pa.overlaps_half_open(&pb),
                "{a:?} and {b:?} share a venue slot"
            );
        }
    }
}

/// Wraps the in-memory repository to inject failures and count calls.
pub struct ProbeRepository {
    pub inner: InMemoryRepository,
    pub cancel_on_occupancy_check: Option<Cancellation>,
    pub fail_teams: bool,
    pub saves: AtomicUsize,
}

impl ProbeRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: InMemoryRepository::new(snapshot),
            cancel_on_occupancy_check: None,
            fail_teams: false,
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl FixtureRepository for ProbeRepository {
    fn round(&self, round_id: RoundId) -> Result<Option<Round>, RepositoryError> {
        self.inner.round(round_id)
    }

    fn rounds(&self, tournament_id: TournamentId) -> Result<Vec<Round>, RepositoryError> {
        self.inner.rounds(tournament_id)
    }

    fn teams(&self, round_id: RoundId) -> Result<Vec<Team>, RepositoryError> {
        if self.fail_teams {
            return Err(RepositoryError::Unavailable(String::from("connection reset")));
        }
        self.inner.teams(round_id)
    }

    fn excluded_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<ExcludedDateWindow>, RepositoryError> {
        self.inner.excluded_dates(tournament_id)
    }

    fn manual_available_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<AvailableDate>, RepositoryError> {
        self.inner.manual_available_dates(tournament_id)
    }

    fn occupying_matches(
        &self,
        venue_id: VenueId,
        period: &DateTimePeriod,
        tournament_id: TournamentId,
    ) -> Result<Vec<Match>, RepositoryError> {
        if let Some(cancellation) = &self.cancel_on_occupancy_check {
            cancellation.cancel();
        }
        self.inner.occupying_matches(venue_id, period, tournament_id)
    }

    fn matches(&self, round_id: RoundId) -> Result<Vec<Match>, RepositoryError> {
        self.inner.matches(round_id)
    }

    fn any_complete_matches_in_round(&self, round_id: RoundId) -> Result<bool, RepositoryError> {
        self.inner.any_complete_matches_in_round(round_id)
    }

    fn any_complete_matches_in_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<bool, RepositoryError> {
        self.inner.any_complete_matches_in_tournament(tournament_id)
    }

    fn save_matches(
        &self,
        round_id: RoundId,
        matches: Vec<Match>,
        replace_existing: bool,
    ) -> Result<Vec<Match>, RepositoryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_matches(round_id, matches, replace_existing)
    }

    fn delete_generated_available_dates(
        &self,
        tournament_id: TournamentId,
    ) -> Result<usize, RepositoryError> {
        self.inner.delete_generated_available_dates(tournament_id)
    }
}
