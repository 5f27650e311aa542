// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use rr_fixtures_domain::{DateTimePeriod, Match, TeamId, TimeZoneConverter, VenueId};
use std::collections::{BTreeMap, BTreeSet};

/// Venue slots and team match days claimed during one planning run.
///
/// Slots are compared as half-open ranges, so one match may start the moment
/// the previous one at the same venue ends.
#[derive(Debug, Clone, Default)]
pub struct BookedSlots {
    venues: BTreeMap<VenueId, Vec<DateTimePeriod>>,
    team_days: BTreeMap<TeamId, BTreeSet<NaiveDate>>,
}

impl BookedSlots {
    /// Creates an empty booking table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `period` at `venue` clashes with a booking.
    #[must_use]
    pub fn is_booked(&self, venue: VenueId, period: &DateTimePeriod) -> bool {
        self.venues
            .get(&venue)
            .is_some_and(|periods| periods.iter().any(|p| p.overlaps_half_open(period)))
    }

    /// Claims a dated match: its venue slot and the match day of both teams.
    ///
    /// Undated matches claim nothing.
    pub fn book(&mut self, planned: &Match, tz: &TimeZoneConverter) {
        let (Some(venue), Some(period)) = (planned.venue_id, planned.planned_period()) else {
            return;
        };
        self.venues.entry(venue).or_default().push(period);
        if let Some(start) = period.start {
            let day = tz.local_date(start);
            for team in [planned.home_team_id, planned.guest_team_id] {
                self.team_days.entry(team).or_default().insert(day);
            }
        }
    }

    /// Returns the local days on which either team already plays.
    #[must_use]
    pub fn busy_days(&self, home: TeamId, guest: TeamId) -> BTreeSet<NaiveDate> {
        let mut days = BTreeSet::new();
        for team in [home, guest] {
            if let Some(team_days) = self.team_days.get(&team) {
                days.extend(team_days.iter().copied());
            }
        }
        days
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rr_fixtures_domain::{RoundId, TournamentId};

    fn planned(home: i64, guest: i64, hour: u32) -> Match {
        let start = Utc.with_ymd_and_hms(2024, 3, 30, hour, 0, 0).unwrap();
        Match {
            id: None,
            tournament_id: TournamentId(1),
            round_id: RoundId(1),
            leg_sequence_no: 1,
            home_team_id: TeamId(home),
            guest_team_id: TeamId(guest),
            referee_id: None,
            planned_start: Some(start),
            planned_end: Some(start + Duration::hours(2)),
            venue_id: Some(VenueId(9)),
            is_complete: false,
        }
    }

    #[test]
    fn test_booking_claims_venue_and_days() {
        let tz = TimeZoneConverter::new("Europe/Berlin").unwrap();
        let mut booked = BookedSlots::new();
        booked.book(&planned(1, 2, 23), &tz);

        let period = planned(3, 4, 23).planned_period().unwrap();
        assert!(booked.is_booked(VenueId(9), &period));
        assert!(!booked.is_booked(VenueId(8), &period));

        let earlier = planned(3, 4, 1).planned_period().unwrap();
        assert!(!booked.is_booked(VenueId(9), &earlier));

        // 23:00 UTC is already the next local day in Berlin
        let day = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(booked.busy_days(TeamId(2), TeamId(5)), BTreeSet::from([day]));
        assert!(booked.busy_days(TeamId(3), TeamId(4)).is_empty());
    }

    #[test]
    fn test_undated_match_claims_nothing() {
        let tz = TimeZoneConverter::new("UTC").unwrap();
        let mut undated = planned(1, 2, 10);
        undated.planned_start = None;
        undated.planned_end = None;
        undated.venue_id = None;

        let mut booked = BookedSlots::new();
        booked.book(&undated, &tz);
        assert!(booked.busy_days(TeamId(1), TeamId(2)).is_empty());
    }
}
