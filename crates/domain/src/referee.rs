// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Referee assignment policies.
//!
//! A referee assigner is asked once per pairing, in pairing order, and may
//! keep state between calls. Callers create one assigner per leg so that
//! workload balancing never carries over from one leg to the next.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Picks the referee for a pairing.
pub trait RefereeAssigner<P> {
    /// Returns the referee for the pairing of `home` and `guest` in `turn`.
    fn referee(&mut self, turn: usize, home: P, guest: P) -> Option<P>;
}

/// Never assigns a referee.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReferee;

impl<P> RefereeAssigner<P> for NoReferee {
    fn referee(&mut self, _turn: usize, _home: P, _guest: P) -> Option<P> {
        None
    }
}

/// The home participant referees its own match.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeReferee;

impl<P> RefereeAssigner<P> for HomeReferee {
    fn referee(&mut self, _turn: usize, home: P, _guest: P) -> Option<P> {
        Some(home)
    }
}

/// The guest participant referees the match.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestReferee;

impl<P> RefereeAssigner<P> for GuestReferee {
    fn referee(&mut self, _turn: usize, _home: P, guest: P) -> Option<P> {
        Some(guest)
    }
}

/// A third participant referees, chosen to spread the workload.
///
/// Selection rules, in order:
/// 1. Neither the home nor the guest participant
/// 2. Not the referee of the previously processed pairing
/// 3. Fewest assignments so far, ties going to the earlier candidate
///
/// Rule 2 is dropped when it would leave no candidate at all.
#[derive(Debug, Clone)]
pub struct OtherFromRoundReferee<P> {
    candidates: Vec<P>,
    assignments: Vec<usize>,
    previous: Option<P>,
}

impl<P: Copy + Eq> OtherFromRoundReferee<P> {
    /// Creates the assigner from the participants of the round.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingRefereeCandidates` if `candidates` is empty.
    pub fn new(candidates: &[P]) -> Result<Self, DomainError> {
        if candidates.is_empty() {
            return Err(DomainError::MissingRefereeCandidates);
        }
        let mut unique: Vec<P> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !unique.contains(candidate) {
                unique.push(*candidate);
            }
        }
        let assignments = vec![0; unique.len()];
        Ok(Self {
            candidates: unique,
            assignments,
            previous: None,
        })
    }

    /// Returns how often `participant` has been assigned so far.
    #[must_use]
    pub fn assignment_count(&self, participant: P) -> usize {
        self.candidates
            .iter()
            .position(|c| *c == participant)
            .map_or(0, |index| self.assignments[index])
    }

    fn least_busy(&self, home: P, guest: P, skip_previous: bool) -> Option<usize> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != home && **c != guest)
            .filter(|(_, c)| !skip_previous || self.previous != Some(**c))
            .min_by_key(|(index, _)| (self.assignments[*index], *index))
            .map(|(index, _)| index)
    }
}

impl<P: Copy + Eq> RefereeAssigner<P> for OtherFromRoundReferee<P> {
    fn referee(&mut self, _turn: usize, home: P, guest: P) -> Option<P> {
        let index = self
            .least_busy(home, guest, true)
            .or_else(|| self.least_busy(home, guest, false))?;
        self.assignments[index] += 1;
        let referee = self.candidates[index];
        self.previous = Some(referee);
        Some(referee)
    }
}

/// The referee policy configured for a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RefereeType {
    /// No referees.
    None,
    /// The home team referees.
    #[default]
    Home,
    /// The guest team referees.
    Guest,
    /// Another team of the round referees.
    OtherFromRound,
}

impl RefereeType {
    /// Returns the policy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Home => "Home",
            Self::Guest => "Guest",
            Self::OtherFromRound => "OtherFromRound",
        }
    }

    /// Returns the minimum number of participants the policy works with.
    #[must_use]
    pub const fn min_participants(&self) -> usize {
        match self {
            Self::OtherFromRound => 3,
            Self::None | Self::Home | Self::Guest => 2,
        }
    }

    /// Creates a fresh assigner for this policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy needs candidates and none are given.
    pub fn assigner<P>(&self, participants: &[P]) -> Result<Box<dyn RefereeAssigner<P>>, DomainError>
    where
        P: Copy + Eq + 'static,
    {
        Ok(match self {
            Self::None => Box::new(NoReferee),
            Self::Home => Box::new(HomeReferee),
            Self::Guest => Box::new(GuestReferee),
            Self::OtherFromRound => Box::new(OtherFromRoundReferee::new(participants)?),
        })
    }
}

impl FromStr for RefereeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "none" => Ok(Self::None),
            "Home" | "home" => Ok(Self::Home),
            "Guest" | "guest" => Ok(Self::Guest),
            "OtherFromRound" | "other-from-round" => Ok(Self::OtherFromRound),
            _ => Err(DomainError::InvalidRefereeType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RefereeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_policies() {
        assert_eq!(NoReferee.referee(0, 1, 2), None::<i32>);
        assert_eq!(HomeReferee.referee(0, 1, 2), Some(1));
        assert_eq!(GuestReferee.referee(0, 1, 2), Some(2));
    }

    #[test]
    fn test_other_from_round_requires_candidates() {
        let result = OtherFromRoundReferee::<u32>::new(&[]);
        assert!(matches!(result, Err(DomainError::MissingRefereeCandidates)));
    }

    #[test]
    fn test_other_from_round_never_picks_home_or_guest() {
        let mut assigner = OtherFromRoundReferee::new(&[1, 2, 3, 4]).unwrap();
        for (home, guest) in [(1, 2), (3, 4), (1, 3), (2, 4), (1, 4), (2, 3)] {
            let referee = assigner.referee(0, home, guest).unwrap();
            assert_ne!(referee, home);
            assert_ne!(referee, guest);
        }
    }

    #[test]
    fn test_other_from_round_avoids_consecutive_repeats() {
        let mut assigner = OtherFromRoundReferee::new(&[1, 2, 3, 4, 5]).unwrap();
        let mut previous = None;
        for (home, guest) in [(1, 2), (1, 2), (1, 2), (1, 2)] {
            let referee = assigner.referee(0, home, guest);
            assert_ne!(referee, previous);
            previous = referee;
        }
    }

    #[test]
    fn test_other_from_round_balances_workload() {
        let mut assigner = OtherFromRoundReferee::new(&[1, 2, 3, 4, 5, 6]).unwrap();
        let pairs = [(1, 2), (3, 4), (5, 6), (1, 3), (2, 5), (4, 6)];
        for (home, guest) in pairs {
            assigner.referee(0, home, guest);
        }
        for participant in 1..=6 {
            assert_eq!(assigner.assignment_count(participant), 1);
        }
    }

    #[test]
    fn test_other_from_round_picks_first_candidate_on_tie() {
        let mut assigner = OtherFromRoundReferee::new(&[1, 2, 3, 4]).unwrap();
        assert_eq!(assigner.referee(0, 1, 2), Some(3));
        // 3 refereed last, 4 is the only other free candidate
        assert_eq!(assigner.referee(1, 1, 2), Some(4));
    }

    #[test]
    fn test_other_from_round_relaxes_repeat_rule_when_needed() {
        let mut assigner = OtherFromRoundReferee::new(&[1, 2, 3]).unwrap();
        assert_eq!(assigner.referee(0, 1, 2), Some(3));
        assert_eq!(assigner.referee(1, 1, 2), Some(3));
    }

    #[test]
    fn test_referee_type_round_trips_through_strings() {
        for kind in [
            RefereeType::None,
            RefereeType::Home,
            RefereeType::Guest,
            RefereeType::OtherFromRound,
        ] {
            assert_eq!(kind.as_str().parse::<RefereeType>().unwrap(), kind);
        }
        assert!(matches!(
            "Umpire".parse::<RefereeType>(),
            Err(DomainError::InvalidRefereeType(_))
        ));
    }

    #[test]
    fn test_factory_builds_other_from_round() {
        let mut assigner = RefereeType::OtherFromRound.assigner(&[10, 20, 30]).unwrap();
        assert_eq!(assigner.referee(0, 10, 20), Some(30));
        assert!(RefereeType::OtherFromRound.assigner::<i32>(&[]).is_err());
    }
}
