// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate match dates derived from the teams' weekly home slots.
//!
//! Teams that share a venue on the same weekday with overlapping slot times
//! form a slot group. A group's weekly occurrence can host only one match,
//! so its members take turns: the rotation starts with the team after the
//! one that received the previous date, and moves on to the next member
//! when a date does not suit the team whose turn it is.
//!
//! A weekly occurrence is accepted for a team when
//! - its kick-off is not before the leg start and its end not after the leg end
//! - no exclusion window that applies to the team and round blocks it
//! - the venue is neither booked in this run nor occupied by a stored match
//!
//! Generated dates live only as long as the planning run. Manual dates come
//! from the repository and are merged in unchanged.

use crate::booking::BookedSlots;
use crate::cancellation::Cancellation;
use crate::context::PlanningContext;
use crate::error::PlanningError;
use crate::repository::FixtureRepository;
use crate::settings::PlanningSettings;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rr_fixtures_domain::{
    AvailableDate, DateTimePeriod, HomeSlot, RoundLeg, TeamId, TimeZoneConverter, TournamentId,
    VenueId,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Teams sharing one weekly venue slot.
#[derive(Debug, Clone)]
struct SlotGroup {
    day_of_week: Weekday,
    members: Vec<(TeamId, HomeSlot)>,
    next: usize,
}

/// Generated and manual available dates of one planning run.
#[derive(Debug, Clone)]
pub struct AvailableDates {
    tournament_id: TournamentId,
    tz: TimeZoneConverter,
    generated: Vec<AvailableDate>,
    manual: Vec<AvailableDate>,
}

impl AvailableDates {
    /// Generates the available dates for every leg of the context's round.
    ///
    /// # Arguments
    ///
    /// * `context` - The round, its teams, exclusions and manual dates
    /// * `settings` - Time zone, match duration and exclusion comparison mode
    /// * `booked` - Slots already claimed earlier in this run
    /// * `repository` - Queried for venue occupancy by stored matches
    /// * `cancellation` - Checked before every repository call
    ///
    /// # Errors
    ///
    /// Returns an error if the time zone is invalid, the repository fails or
    /// the run is cancelled.
    pub fn generate(
        context: &PlanningContext,
        settings: &PlanningSettings,
        booked: &BookedSlots,
        repository: &dyn FixtureRepository,
        cancellation: &Cancellation,
    ) -> Result<Self, PlanningError> {
        let generator = Generator {
            context,
            tz: settings.time_zone_converter()?,
            duration: settings.planned_duration(),
            date_only: settings.use_only_date_part_for_free_busy_times,
            booked,
            repository,
            cancellation,
        };

        let mut groups = slot_groups(context, generator.duration);
        let mut generated = Vec::new();
        for leg in context.round.sorted_legs() {
            for group in &mut groups {
                generator.fill_leg(group, &leg, &mut generated)?;
            }
        }
        debug!(
            round = %context.round.id,
            generated = generated.len(),
            slot_groups = groups.len(),
            "Generated available dates"
        );

        Ok(Self {
            tournament_id: context.tournament_id(),
            tz: generator.tz,
            generated,
            manual: context.manual_dates.clone(),
        })
    }

    /// Returns the dates on which `home_team` can host inside `period`.
    ///
    /// Generated and manual dates are merged. Dates whose local calendar day
    /// is in `excluded_days` are left out. The result is ordered by kick-off,
    /// then venue, with manual dates before generated ones.
    #[must_use]
    pub fn get_available_dates(
        &self,
        home_team: TeamId,
        period: &DateTimePeriod,
        excluded_days: &BTreeSet<NaiveDate>,
    ) -> Vec<AvailableDate> {
        let mut dates: Vec<AvailableDate> = self
            .all()
            .filter(|date| date.home_team_id == home_team && period.contains(date.start))
            .filter(|date| !excluded_days.contains(&self.tz.local_date(date.start)))
            .cloned()
            .collect();
        dates.sort_by_key(|date| (date.start, date.venue_id, date.is_generated));
        dates
    }

    /// Returns the distinct local days inside `period` on which at least one
    /// of `teams` can host, in ascending order.
    #[must_use]
    pub fn days_within(&self, period: &DateTimePeriod, teams: &[TeamId]) -> Vec<NaiveDate> {
        let days: BTreeSet<NaiveDate> = self
            .all()
            .filter(|date| teams.contains(&date.home_team_id) && period.contains(date.start))
            .map(|date| self.tz.local_date(date.start))
            .collect();
        days.into_iter().collect()
    }

    /// Returns the generated dates, for review.
    #[must_use]
    pub fn generated(&self) -> &[AvailableDate] {
        &self.generated
    }

    /// Drops the generated dates.
    pub fn clear_generated(&mut self) {
        self.generated.clear();
    }

    /// Returns the tournament the dates belong to.
    #[must_use]
    pub const fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    fn all(&self) -> impl Iterator<Item = &AvailableDate> + '_ {
        self.manual
            .iter()
            .filter(|date| date.tournament_id == self.tournament_id)
            .chain(self.generated.iter())
    }
}

/// Builds the slot groups of the round's hosting teams.
///
/// Teams are keyed by venue and weekday, then merged transitively while
/// their slot windows overlap.
fn slot_groups(context: &PlanningContext, duration: Duration) -> Vec<SlotGroup> {
    let mut by_key: BTreeMap<(VenueId, u32), Vec<(TeamId, HomeSlot)>> = BTreeMap::new();
    for team in &context.teams {
        if let Some(slot) = team.home_slot() {
            by_key
                .entry((slot.venue_id, slot.day_of_week.num_days_from_monday()))
                .or_default()
                .push((team.id, slot));
        }
    }

    let mut groups = Vec::new();
    for members in by_key.into_values() {
        let mut clusters: Vec<Vec<(TeamId, HomeSlot)>> = Vec::new();
        for (team, slot) in members {
            let (touching, rest): (Vec<_>, Vec<_>) = clusters.into_iter().partition(|cluster| {
                cluster
                    .iter()
                    .any(|(_, other)| other.collides_with(&slot, duration))
            });
            let mut merged: Vec<(TeamId, HomeSlot)> = touching.into_iter().flatten().collect();
            merged.push((team, slot));
            merged.sort_by_key(|(id, _)| *id);
            clusters = rest;
            clusters.push(merged);
        }
        clusters.sort_by_key(|cluster| cluster.first().map(|(id, _)| *id));

        for cluster in clusters {
            let Some((_, first)) = cluster.first() else {
                continue;
            };
            groups.push(SlotGroup {
                day_of_week: first.day_of_week,
                members: cluster,
                next: 0,
            });
        }
    }
    groups
}

/// Returns the first date on or after `from` that falls on `weekday`.
fn first_weekday_on_or_after(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - from.weekday().num_days_from_monday()) % 7;
    from + Duration::days(i64::from(ahead))
}

struct Generator<'a> {
    context: &'a PlanningContext,
    tz: TimeZoneConverter,
    duration: Duration,
    date_only: bool,
    booked: &'a BookedSlots,
    repository: &'a dyn FixtureRepository,
    cancellation: &'a Cancellation,
}

impl Generator<'_> {
    fn fill_leg(
        &self,
        group: &mut SlotGroup,
        leg: &RoundLeg,
        out: &mut Vec<AvailableDate>,
    ) -> Result<(), PlanningError> {
        let first_day = self.tz.local_date(leg.start);
        let last_day = self.tz.local_date(leg.end);
        let mut day = first_weekday_on_or_after(first_day, group.day_of_week);
        let size = group.members.len();

        while day <= last_day {
            for offset in 0..size {
                let index = (group.next + offset) % size;
                let (team, slot) = group.members[index];
                if let Some(date) = self.accept(day, team, &slot, leg)? {
                    out.push(date);
                    group.next = (index + 1) % size;
                    break;
                }
            }
            day += Duration::days(7);
        }
        Ok(())
    }

    fn accept(
        &self,
        day: NaiveDate,
        team: TeamId,
        slot: &HomeSlot,
        leg: &RoundLeg,
    ) -> Result<Option<AvailableDate>, PlanningError> {
        let local = day.and_time(slot.match_time);
        let start = match self.tz.to_utc(local) {
            Ok(start) => start,
            Err(err) => {
                warn!(team = %team, %local, "Skipping home slot: {err}");
                return Ok(None);
            }
        };
        let end = start + self.duration;
        if start < leg.start || end > leg.end {
            return Ok(None);
        }

        let period = DateTimePeriod::new(start, end);
        let tournament_id = self.context.tournament_id();
        if let Some(window) =
            self.context
                .excluding_window(team, &period, self.date_only, &self.tz)
        {
            debug!(team = %team, %day, reason = %window.reason, "Date excluded");
            return Ok(None);
        }

        if self.booked.is_booked(slot.venue_id, &period) {
            return Ok(None);
        }

        self.cancellation.check()?;
        let occupied = self
            .repository
            .occupying_matches(slot.venue_id, &period, tournament_id)?
            .iter()
            .any(|stored| self.context.occupies(stored));
        if occupied {
            debug!(team = %team, venue = %slot.venue_id, %day, "Venue occupied");
            return Ok(None);
        }

        Ok(Some(AvailableDate {
            tournament_id,
            home_team_id: team,
            venue_id: slot.venue_id,
            start,
            end,
            is_generated: true,
        }))
    }
}
