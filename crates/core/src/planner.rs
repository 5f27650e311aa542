// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixture planning for rounds and tournaments.
//!
//! A round is planned leg by leg. Legs at even positions (first, third, ...)
//! use the first-leg orientation, the others the return-leg orientation. Per
//! leg the pairings are grouped, every group gets an equal slice of the
//! leg's playable days, and every pairing in a group takes the candidate date
//! closest to the candidates of the other pairings in its group. A pairing
//! without a free date in its group's slice looks in its turn's period, then
//! in the whole leg.
//!
//! Nothing is written until the whole round (or every round of the
//! tournament) has been planned, and then each round is saved as one batch.

use crate::available_dates::AvailableDates;
use crate::booking::BookedSlots;
use crate::cancellation::Cancellation;
use crate::context::PlanningContext;
use crate::error::{ConflictScope, PlanningError};
use crate::repository::FixtureRepository;
use crate::settings::PlanningSettings;
use rr_fixtures_domain::{
    AvailableDate, Candidate, DateTimePeriod, Match, Pairing, PairingSet, RoundId, RoundLeg,
    RoundRobin, TeamId, TimeZoneConverter, TournamentId, assign_round_date_periods,
    group_pairings, ranked, select_closest_candidates,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// The result of a planning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// The saved matches, with identifiers assigned by the repository.
    pub matches: Vec<Match>,
    /// The dates generated from home slots, kept for review.
    pub generated_dates: Vec<AvailableDate>,
}

/// Matches planned for one round, not yet saved.
#[derive(Debug)]
struct RoundPlan {
    round_id: RoundId,
    matches: Vec<Match>,
    generated_dates: Vec<AvailableDate>,
}

/// Plans the fixtures of rounds and tournaments.
///
/// Each call loads its own `PlanningContext`; a planner holds no state
/// between calls. Separate planners may run concurrently, but runs that share
/// venues are not coordinated and can book the same slot twice, so callers
/// must serialize planning per tournament.
#[derive(Debug)]
pub struct MatchPlanner<'a, R: FixtureRepository> {
    repository: &'a R,
    settings: PlanningSettings,
    cancellation: Cancellation,
}

impl<'a, R: FixtureRepository> MatchPlanner<'a, R> {
    /// Creates a planner over `repository`.
    #[must_use]
    pub fn new(repository: &'a R, settings: PlanningSettings) -> Self {
        Self {
            repository,
            settings,
            cancellation: Cancellation::new(),
        }
    }

    /// Uses `cancellation` to abort runs on request.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Returns the settings in use.
    #[must_use]
    pub const fn settings(&self) -> &PlanningSettings {
        &self.settings
    }

    /// Plans and saves the fixtures of one round.
    ///
    /// # Arguments
    ///
    /// * `round_id` - The round to plan
    /// * `keep_existing` - Keep stored matches and add only missing fixtures;
    ///   otherwise the round's stored matches are replaced
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::StateConflict` if the round has completed
    /// matches, `PlanningError::RoundNotFound` for an unknown round, a domain
    /// error for bad settings or too few available days, and any repository
    /// error. On error nothing has been saved.
    pub fn generate_fixtures_for_round(
        &self,
        round_id: RoundId,
        keep_existing: bool,
    ) -> Result<PlanOutcome, PlanningError> {
        let tz = self.settings.time_zone_converter()?;

        self.cancellation.check()?;
        if self.repository.any_complete_matches_in_round(round_id)? {
            return Err(PlanningError::StateConflict {
                scope: ConflictScope::Round(round_id),
            });
        }

        let replaced: BTreeSet<RoundId> = if keep_existing {
            BTreeSet::new()
        } else {
            BTreeSet::from([round_id])
        };
        let context = PlanningContext::load(
            self.repository,
            round_id,
            replaced,
            keep_existing,
            &self.cancellation,
        )?;
        self.purge_generated_dates(context.tournament_id())?;

        let mut booked = BookedSlots::new();
        let plan = self.plan_round(&context, &tz, &mut booked)?;

        self.cancellation.check()?;
        let saved = self
            .repository
            .save_matches(plan.round_id, plan.matches, !keep_existing)?;
        info!(round = %round_id, matches = saved.len(), "Saved fixtures");

        Ok(PlanOutcome {
            matches: saved,
            generated_dates: plan.generated_dates,
        })
    }

    /// Plans every round of a tournament, then saves each round's batch.
    ///
    /// Rounds are planned in id order and see the venue slots booked by the
    /// rounds planned before them. If planning any round fails, nothing is
    /// saved.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::StateConflict` if the tournament has completed
    /// matches, otherwise the same errors as `generate_fixtures_for_round`.
    pub fn generate_fixtures_for_tournament(
        &self,
        tournament_id: TournamentId,
        keep_existing: bool,
    ) -> Result<PlanOutcome, PlanningError> {
        let tz = self.settings.time_zone_converter()?;

        self.cancellation.check()?;
        if self
            .repository
            .any_complete_matches_in_tournament(tournament_id)?
        {
            return Err(PlanningError::StateConflict {
                scope: ConflictScope::Tournament(tournament_id),
            });
        }

        self.cancellation.check()?;
        let rounds = self.repository.rounds(tournament_id)?;
        self.purge_generated_dates(tournament_id)?;

        let replaced: BTreeSet<RoundId> = if keep_existing {
            BTreeSet::new()
        } else {
            rounds.iter().map(|round| round.id).collect()
        };

        let mut booked = BookedSlots::new();
        let mut plans = Vec::with_capacity(rounds.len());
        for round in &rounds {
            let context = PlanningContext::load(
                self.repository,
                round.id,
                replaced.clone(),
                keep_existing,
                &self.cancellation,
            )?;
            plans.push(self.plan_round(&context, &tz, &mut booked)?);
        }

        // last cancellation point; the batches below are written together
        self.cancellation.check()?;
        let mut outcome = PlanOutcome::default();
        for plan in plans {
            let saved = self
                .repository
                .save_matches(plan.round_id, plan.matches, !keep_existing)?;
            info!(round = %plan.round_id, matches = saved.len(), "Saved fixtures");
            outcome.matches.extend(saved);
            outcome.generated_dates.extend(plan.generated_dates);
        }
        Ok(outcome)
    }

    fn purge_generated_dates(&self, tournament_id: TournamentId) -> Result<(), PlanningError> {
        self.cancellation.check()?;
        let removed = self
            .repository
            .delete_generated_available_dates(tournament_id)?;
        if removed > 0 {
            debug!(tournament = %tournament_id, removed, "Removed stale generated dates");
        }
        Ok(())
    }

    fn plan_round(
        &self,
        context: &PlanningContext,
        tz: &TimeZoneConverter,
        booked: &mut BookedSlots,
    ) -> Result<RoundPlan, PlanningError> {
        for kept in context.kept_matches() {
            booked.book(kept, tz);
        }

        let mut available = AvailableDates::generate(
            context,
            &self.settings,
            booked,
            self.repository,
            &self.cancellation,
        )?;

        let referee_type = self.settings.referee_type;
        let generator = RoundRobin::for_referee_type(&context.team_ids(), referee_type)?;
        let (first_leg, return_leg) = generator.legs(referee_type)?;
        info!(
            round = %context.round.id,
            teams = context.teams.len(),
            pairings_per_leg = generator.pairings_per_leg(),
            strategy = %generator.strategy(),
            referee = %referee_type,
            time_zone = tz.name(),
            "Planning round"
        );

        let mut matches = Vec::new();
        for (index, leg) in context.round.sorted_legs().iter().enumerate() {
            let mut pairings = if index % 2 == 0 {
                first_leg.clone()
            } else {
                return_leg.clone()
            };
            swap_non_hosting_teams(context, &mut pairings);
            let planned = self.plan_leg(context, &available, leg, &mut pairings, tz, booked)?;
            matches.extend(planned);
        }

        let generated_dates = available.generated().to_vec();
        available.clear_generated();
        Ok(RoundPlan {
            round_id: context.round.id,
            matches,
            generated_dates,
        })
    }

    fn plan_leg(
        &self,
        context: &PlanningContext,
        available: &AvailableDates,
        leg: &RoundLeg,
        pairings: &mut PairingSet<TeamId>,
        tz: &TimeZoneConverter,
        booked: &mut BookedSlots,
    ) -> Result<Vec<Match>, PlanningError> {
        let leg_period = leg.period();
        let mut groups = group_pairings(pairings, self.settings.grouping_strategy);

        let days = available.days_within(&leg_period, &context.team_ids());
        let ranges = assign_round_date_periods(&days, groups.len())?;
        for (group, range) in groups.iter_mut().zip(&ranges) {
            let period = tz
                .local_days_period(range.first, range.last)
                .unwrap_or_else(|err| {
                    warn!(first = %range.first, last = %range.last, "Using leg period: {err}");
                    leg_period
                });
            group.period = Some(period);
            // a turn spread over several groups spans all of their periods
            for pairing in &group.pairings {
                let turn_period = pairings
                    .turn_period(pairing.turn)
                    .map_or(period, |current| current.span(&period));
                pairings.set_turn_period(pairing.turn, turn_period);
            }
        }
        info!(
            round = %context.round.id,
            leg = leg.sequence_no,
            pairings = pairings.len(),
            groups = groups.len(),
            days = days.len(),
            "Planning leg"
        );

        let mut matches = Vec::with_capacity(pairings.len());
        for group in &groups {
            let period = group.period.unwrap_or(leg_period);
            let mut candidates: Vec<Vec<Candidate<AvailableDate>>> = group
                .pairings
                .iter()
                .map(|pairing| {
                    let turn_period = pairings.turn_period(pairing.turn).copied();
                    [Some(period), turn_period, Some(leg_period)]
                        .into_iter()
                        .flatten()
                        .map(|wider| {
                            self.candidate_dates(context, available, booked, pairing, &wider, tz)
                        })
                        .find(|dates| !dates.is_empty())
                        .unwrap_or_default()
                        .into_iter()
                        .map(|date| {
                            let start = date.start;
                            Candidate::new(date, start, tz.local_date(start))
                        })
                        .collect()
                })
                .collect();
            let best = select_closest_candidates(&mut candidates);

            for ((pairing, list), best) in group.pairings.iter().zip(&candidates).zip(best) {
                if context.keep_existing && is_already_planned(context, leg, pairing) {
                    debug!(home = %pairing.home, guest = %pairing.guest, "Keeping stored fixture");
                    continue;
                }

                let turn_period = pairings.turn_period(pairing.turn).copied();
                let chosen = best
                    .into_iter()
                    .chain(ranked(list))
                    .map(|index| &list[index].item)
                    .find(|date| !booked.is_booked(date.venue_id, &date.period()))
                    .cloned()
                    .or_else(|| {
                        [turn_period, Some(leg_period)]
                            .into_iter()
                            .flatten()
                            .find_map(|wider| {
                                self.candidate_dates(context, available, booked, pairing, &wider, tz)
                                    .into_iter()
                                    .find(|date| !booked.is_booked(date.venue_id, &date.period()))
                            })
                    });
                if chosen.is_none() {
                    warn!(
                        round = %context.round.id,
                        leg = leg.sequence_no,
                        home = %pairing.home,
                        guest = %pairing.guest,
                        "No available date; leaving fixture undated"
                    );
                }

                let planned = build_match(context, leg, pairing, chosen.as_ref());
                booked.book(&planned, tz);
                matches.push(planned);
            }
        }
        Ok(matches)
    }

    /// Returns the home team's dates inside `period`, without days on which
    /// either team already plays and without dates an exclusion window keeps
    /// either team from.
    fn candidate_dates(
        &self,
        context: &PlanningContext,
        available: &AvailableDates,
        booked: &BookedSlots,
        pairing: &Pairing<TeamId>,
        period: &DateTimePeriod,
        tz: &TimeZoneConverter,
    ) -> Vec<AvailableDate> {
        let busy = booked.busy_days(pairing.home, pairing.guest);
        let date_only = self.settings.use_only_date_part_for_free_busy_times;
        available
            .get_available_dates(pairing.home, period, &busy)
            .into_iter()
            .filter(|date| {
                [pairing.home, pairing.guest].into_iter().all(|team| {
                    context
                        .excluding_window(team, &date.period(), date_only, tz)
                        .is_none()
                })
            })
            .collect()
    }
}

/// Turns pairings around where the home team has no home slot but the guest
/// has one. The referee stays as it was.
fn swap_non_hosting_teams(context: &PlanningContext, pairings: &mut PairingSet<TeamId>) {
    for pairing in &mut pairings.pairings {
        if context.can_host(pairing.home) {
            continue;
        }
        if context.can_host(pairing.guest) {
            pairing.swap_home_guest();
        } else {
            debug!(home = %pairing.home, guest = %pairing.guest, "Neither team can host");
        }
    }
}

fn is_already_planned(context: &PlanningContext, leg: &RoundLeg, pairing: &Pairing<TeamId>) -> bool {
    context.existing_matches.iter().any(|stored| {
        stored.leg_sequence_no == leg.sequence_no
            && stored.is_fixture_between(pairing.home, pairing.guest)
    })
}

fn build_match(
    context: &PlanningContext,
    leg: &RoundLeg,
    pairing: &Pairing<TeamId>,
    date: Option<&AvailableDate>,
) -> Match {
    Match {
        id: None,
        tournament_id: context.tournament_id(),
        round_id: context.round.id,
        leg_sequence_no: leg.sequence_no,
        home_team_id: pairing.home,
        guest_team_id: pairing.guest,
        referee_id: pairing.referee,
        planned_start: date.map(|d| d.start),
        planned_end: date.map(|d| d.end),
        venue_id: date.map(|d| d.venue_id),
        is_complete: false,
    }
}
