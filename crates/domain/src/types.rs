// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::period::DateTimePeriod;
use crate::time_zone::TimeZoneConverter;
use chrono::{DateTime, Duration, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Returns the raw numeric identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a team, the participant type used by the planner.
    TeamId
);
id_type!(
    /// Identifies a venue.
    VenueId
);
id_type!(
    /// Identifies a round of a tournament.
    RoundId
);
id_type!(
    /// Identifies a tournament.
    TournamentId
);

/// A team's regular weekly home slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HomeSlot {
    /// The venue the team plays its home matches at.
    pub venue_id: VenueId,
    /// The local day of week of home matches.
    pub day_of_week: Weekday,
    /// The local kick-off time of home matches.
    pub match_time: NaiveTime,
}

impl HomeSlot {
    /// Returns whether two slots at the same venue and weekday overlap when
    /// each lasts `duration`.
    #[must_use]
    pub fn collides_with(&self, other: &Self, duration: Duration) -> bool {
        if self.venue_id != other.venue_id || self.day_of_week != other.day_of_week {
            return false;
        }
        let (self_end, self_wrapped) = self.match_time.overflowing_add_signed(duration);
        let (other_end, other_wrapped) = other.match_time.overflowing_add_signed(duration);
        let self_ends_after_other_starts = self_wrapped != 0 || self_end > other.match_time;
        let other_ends_after_self_starts = other_wrapped != 0 || other_end > self.match_time;
        self_ends_after_other_starts && other_ends_after_self_starts
    }
}

/// A team taking part in a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// The team's identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Home venue, if any.
    pub venue_id: Option<VenueId>,
    /// Local day of week of home matches, if any.
    pub match_day_of_week: Option<Weekday>,
    /// Local kick-off time of home matches, if any.
    pub match_time: Option<NaiveTime>,
}

impl Team {
    /// Creates a team without a home slot.
    #[must_use]
    pub fn new(id: TeamId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            venue_id: None,
            match_day_of_week: None,
            match_time: None,
        }
    }

    /// Sets the team's weekly home slot.
    #[must_use]
    pub const fn with_home_slot(
        mut self,
        venue_id: VenueId,
        day_of_week: Weekday,
        match_time: NaiveTime,
    ) -> Self {
        self.venue_id = Some(venue_id);
        self.match_day_of_week = Some(day_of_week);
        self.match_time = Some(match_time);
        self
    }

    /// Returns the weekly home slot if venue, day and time are all set.
    #[must_use]
    pub fn home_slot(&self) -> Option<HomeSlot> {
        Some(HomeSlot {
            venue_id: self.venue_id?,
            day_of_week: self.match_day_of_week?,
            match_time: self.match_time?,
        })
    }

    /// Returns whether the team may be scheduled as home team.
    ///
    /// Teams without a complete home slot play all their matches away.
    #[must_use]
    pub fn can_host(&self) -> bool {
        self.home_slot().is_some()
    }
}

/// A venue where matches are played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// The venue's identifier.
    pub id: VenueId,
    /// Display name.
    pub name: String,
}

/// One leg of a round (first leg, return leg, ...) with its own date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLeg {
    /// Position of the leg within the round, starting at 1.
    pub sequence_no: u32,
    /// First instant matches of this leg may start.
    pub start: DateTime<Utc>,
    /// Last instant matches of this leg may end.
    pub end: DateTime<Utc>,
}

impl RoundLeg {
    /// Returns the leg's date window as a period.
    #[must_use]
    pub const fn period(&self) -> DateTimePeriod {
        DateTimePeriod::new(self.start, self.end)
    }
}

/// A round of a tournament, owning one or more legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// The round's identifier.
    pub id: RoundId,
    /// The tournament the round belongs to.
    pub tournament_id: TournamentId,
    /// Display name.
    pub name: String,
    /// The round's legs.
    pub legs: Vec<RoundLeg>,
}

impl Round {
    /// Returns the legs ordered by sequence number.
    #[must_use]
    pub fn sorted_legs(&self) -> Vec<RoundLeg> {
        let mut legs = self.legs.clone();
        legs.sort_by_key(|leg| leg.sequence_no);
        legs
    }
}

/// A window of dates on which no match may be scheduled.
///
/// The window applies to the whole tournament unless `round_id` or `team_id`
/// narrow it. A round or team exclusion never implies a tournament-wide one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedDateWindow {
    /// First excluded instant.
    pub date_from: DateTime<Utc>,
    /// Last excluded instant.
    pub date_to: DateTime<Utc>,
    /// The tournament this exclusion belongs to.
    pub tournament_id: TournamentId,
    /// Restricts the exclusion to one round.
    pub round_id: Option<RoundId>,
    /// Restricts the exclusion to one team.
    pub team_id: Option<TeamId>,
    /// Why the dates are excluded.
    pub reason: String,
}

impl ExcludedDateWindow {
    /// Returns whether the exclusion is relevant for a team in a round.
    #[must_use]
    pub fn applies_to(&self, tournament_id: TournamentId, round_id: RoundId, team_id: TeamId) -> bool {
        self.tournament_id == tournament_id
            && self.round_id.is_none_or(|r| r == round_id)
            && self.team_id.is_none_or(|t| t == team_id)
    }

    /// Returns whether a match in `period` falls into the excluded window.
    ///
    /// With `date_only` the comparison uses local calendar dates, so any
    /// match on an excluded day is blocked regardless of the time of day.
    #[must_use]
    pub fn blocks(&self, period: &DateTimePeriod, date_only: bool, tz: &TimeZoneConverter) -> bool {
        if date_only {
            let (Some(start), Some(end)) = (period.start, period.end) else {
                return true;
            };
            let first_excluded = tz.local_date(self.date_from);
            let last_excluded = tz.local_date(self.date_to);
            return tz.local_date(start) <= last_excluded && tz.local_date(end) >= first_excluded;
        }
        period.overlaps(&DateTimePeriod::new(self.date_from, self.date_to))
    }
}

/// A date and venue on which a team can host a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableDate {
    /// The tournament the date belongs to.
    pub tournament_id: TournamentId,
    /// The team that can host on this date.
    pub home_team_id: TeamId,
    /// The venue of the match.
    pub venue_id: VenueId,
    /// Kick-off (UTC).
    pub start: DateTime<Utc>,
    /// Planned end (UTC).
    pub end: DateTime<Utc>,
    /// `true` for dates derived from a team's home slot, `false` for dates
    /// entered manually.
    pub is_generated: bool,
}

impl AvailableDate {
    /// Returns the time the match occupies the venue.
    #[must_use]
    pub const fn period(&self) -> DateTimePeriod {
        DateTimePeriod::new(self.start, self.end)
    }
}

/// A planned or played match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Persisted identifier, `None` until saved.
    pub id: Option<i64>,
    /// The tournament of the match.
    pub tournament_id: TournamentId,
    /// The round of the match.
    pub round_id: RoundId,
    /// The leg of the round the match belongs to.
    pub leg_sequence_no: u32,
    /// The hosting team.
    pub home_team_id: TeamId,
    /// The visiting team.
    pub guest_team_id: TeamId,
    /// The refereeing team, if any.
    pub referee_id: Option<TeamId>,
    /// Planned kick-off, `None` when left for manual assignment.
    pub planned_start: Option<DateTime<Utc>>,
    /// Planned end, `None` when left for manual assignment.
    pub planned_end: Option<DateTime<Utc>>,
    /// The venue, `None` when left for manual assignment.
    pub venue_id: Option<VenueId>,
    /// Whether a result has been recorded.
    pub is_complete: bool,
}

impl Match {
    /// Returns whether the match is between the two teams, in either order.
    #[must_use]
    pub fn is_fixture_between(&self, a: TeamId, b: TeamId) -> bool {
        (self.home_team_id == a && self.guest_team_id == b)
            || (self.home_team_id == b && self.guest_team_id == a)
    }

    /// Returns the planned time at the venue, if the match is dated.
    #[must_use]
    pub fn planned_period(&self) -> Option<DateTimePeriod> {
        Some(DateTimePeriod::new(self.planned_start?, self.planned_end?))
    }
}
