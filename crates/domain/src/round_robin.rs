// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-robin pairing generation.
//!
//! Every participant meets every other participant exactly once per leg.
//! The return leg mirrors the first leg with home and guest exchanged.
//!
//! ## Strategies
//!
//! - **Circle**: the classic rotation schedule. Every turn is a perfect
//!   matching (one idle participant when the count is odd), which makes
//!   grouping trivially optimal. Used for 5 to 14 participants.
//! - **Greedy**: repeatedly pairs the participants with the most missing
//!   fixtures. Works for any count but turns are not guaranteed to be
//!   conflict free.
//!
//! ## Invariants
//!
//! - `n * (n - 1) / 2` pairings per leg, each unordered pair exactly once
//! - `home != guest` for every pairing
//! - `|home - guest| <= 1` for every participant within a leg
//! - Output depends only on the set of participants, not on input order

use crate::error::DomainError;
use crate::pairing::{Pairing, PairingSet};
use crate::referee::{RefereeAssigner, RefereeType};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

/// How first-leg pairings are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairingStrategy {
    /// Most-missing-first greedy construction, valid for any count.
    Greedy,
    /// Rotation schedule with conflict-free turns.
    Circle,
}

impl PairingStrategy {
    /// Returns the preferred strategy for `count` participants.
    #[must_use]
    pub const fn for_participant_count(count: usize) -> Self {
        if matches!(count, 5..=14) {
            Self::Circle
        } else {
            Self::Greedy
        }
    }

    /// Returns the strategy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Greedy => "Greedy",
            Self::Circle => "Circle",
        }
    }
}

impl FromStr for PairingStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Greedy" | "greedy" => Ok(Self::Greedy),
            "Circle" | "circle" => Ok(Self::Circle),
            _ => Err(DomainError::InvalidPairingStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An unordered fixture during construction, by participant index.
#[derive(Debug, Clone, Copy)]
struct Fixture {
    turn: usize,
    home: usize,
    guest: usize,
}

/// Round-robin generator for a fixed set of participants.
#[derive(Debug, Clone)]
pub struct RoundRobin<P> {
    participants: Vec<P>,
    strategy: PairingStrategy,
}

impl<P: Copy + Ord> RoundRobin<P> {
    /// Creates a generator. Participants are de-duplicated and sorted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TooFewParticipants` for fewer than 2 distinct
    /// participants.
    pub fn new(participants: &[P]) -> Result<Self, DomainError> {
        Self::with_minimum(participants, 2)
    }

    /// Creates a generator whose participants satisfy the referee policy.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TooFewParticipants` if the policy needs more
    /// participants than supplied (3 for `OtherFromRound`, otherwise 2).
    pub fn for_referee_type(
        participants: &[P],
        referee_type: RefereeType,
    ) -> Result<Self, DomainError> {
        Self::with_minimum(participants, referee_type.min_participants())
    }

    fn with_minimum(participants: &[P], required: usize) -> Result<Self, DomainError> {
        let mut unique: Vec<P> = participants.to_vec();
        unique.sort_unstable();
        unique.dedup();
        if unique.len() < required {
            return Err(DomainError::TooFewParticipants {
                required,
                actual: unique.len(),
            });
        }
        let strategy = PairingStrategy::for_participant_count(unique.len());
        Ok(Self {
            participants: unique,
            strategy,
        })
    }

    /// Overrides the automatically chosen strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: PairingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the sorted, distinct participants.
    #[must_use]
    pub fn participants(&self) -> &[P] {
        &self.participants
    }

    /// Returns the strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> PairingStrategy {
        self.strategy
    }

    /// Returns the number of pairings in one leg.
    #[must_use]
    pub fn pairings_per_leg(&self) -> usize {
        let n = self.participants.len();
        n * (n - 1) / 2
    }

    /// Generates the first leg, asking `assigner` for each referee in
    /// pairing order.
    pub fn first_leg(&self, assigner: &mut dyn RefereeAssigner<P>) -> PairingSet<P> {
        let count = self.participants.len();
        let mut fixtures = match self.strategy {
            PairingStrategy::Greedy => greedy_fixtures(count),
            PairingStrategy::Circle => circle_fixtures(count),
        };
        balance_home_and_guest(&mut fixtures, count);

        let pairings = fixtures
            .iter()
            .map(|fixture| {
                let home = self.participants[fixture.home];
                let guest = self.participants[fixture.guest];
                Pairing {
                    turn: fixture.turn,
                    home,
                    guest,
                    referee: assigner.referee(fixture.turn, home, guest),
                }
            })
            .collect();
        PairingSet::new(pairings)
    }

    /// Generates the first and return leg with a fresh referee assigner per
    /// leg.
    ///
    /// # Errors
    ///
    /// Returns an error if the referee policy cannot be built for these
    /// participants.
    pub fn legs(&self, referee_type: RefereeType) -> Result<(PairingSet<P>, PairingSet<P>), DomainError>
    where
        P: 'static,
    {
        let mut first_assigner = referee_type.assigner(&self.participants)?;
        let first = self.first_leg(first_assigner.as_mut());
        let mut return_assigner = referee_type.assigner(&self.participants)?;
        let second = return_leg(&first, return_assigner.as_mut());
        Ok((first, second))
    }
}

/// Derives the return leg: same turns, home and guest exchanged, referees
/// asked for again from `assigner` rather than copied.
pub fn return_leg<P: Copy + Eq>(
    first_leg: &PairingSet<P>,
    assigner: &mut dyn RefereeAssigner<P>,
) -> PairingSet<P> {
    let pairings = first_leg
        .pairings
        .iter()
        .map(|pairing| Pairing {
            turn: pairing.turn,
            home: pairing.guest,
            guest: pairing.home,
            referee: assigner.referee(pairing.turn, pairing.guest, pairing.home),
        })
        .collect();
    PairingSet::new(pairings)
}

/// Greedy construction over participant indices.
fn greedy_fixtures(count: usize) -> Vec<Fixture> {
    let target = count * (count - 1) / 2;
    let per_turn = (count / 2).max(1);
    let mut missing: Vec<usize> = vec![count - 1; count];
    let mut met: Vec<Vec<bool>> = vec![vec![false; count]; count];
    let mut home_games: Vec<usize> = vec![0; count];
    let mut fixtures: Vec<Fixture> = Vec::with_capacity(target);

    while fixtures.len() < target {
        let Some(first) = most_missing(&missing, |_| true) else {
            break;
        };
        let Some(second) = most_missing(&missing, |j| j != first && !met[first][j]) else {
            break;
        };

        let (home, guest) = if home_games[second] < home_games[first] {
            (second, first)
        } else {
            (first, second)
        };

        met[first][second] = true;
        met[second][first] = true;
        missing[first] -= 1;
        missing[second] -= 1;
        home_games[home] += 1;
        fixtures.push(Fixture {
            turn: fixtures.len() / per_turn,
            home,
            guest,
        });
    }

    fixtures
}

/// Index with the most missing fixtures among those accepted by `filter`,
/// ties going to the lowest index. Participants with nothing missing are
/// never returned.
fn most_missing(missing: &[usize], filter: impl Fn(usize) -> bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, count) in missing.iter().enumerate() {
        if *count == 0 || !filter(index) {
            continue;
        }
        if best.is_none_or(|b| *count > missing[b]) {
            best = Some(index);
        }
    }
    best
}

/// Circle method over participant indices.
///
/// For an odd count a bye takes the fixed position. For an even count the
/// first participant is fixed and hosts on even turns. In every other pair the
/// upper position hosts.
fn circle_fixtures(count: usize) -> Vec<Fixture> {
    let mut slots: Vec<Option<usize>> = Vec::with_capacity(count + 1);
    if count % 2 == 1 {
        slots.push(None);
    }
    slots.extend((0..count).map(Some));

    let size = slots.len();
    let mut fixtures: Vec<Fixture> = Vec::with_capacity(count * (count - 1) / 2);

    for turn in 0..size - 1 {
        for upper in 0..size / 2 {
            let lower = size - 1 - upper;
            let (Some(a), Some(b)) = (slots[upper], slots[lower]) else {
                continue;
            };
            let (home, guest) = if upper == 0 && turn % 2 == 1 {
                (b, a)
            } else {
                (a, b)
            };
            fixtures.push(Fixture { turn, home, guest });
        }
        slots[1..].rotate_right(1);
    }

    fixtures
}

/// Reverses home/guest along paths until no participant hosts two or more
/// matches more (or fewer) than it visits.
///
/// Each reversal changes the imbalance only at the path's ends and strictly
/// lowers the total absolute imbalance, so the loop terminates.
fn balance_home_and_guest(fixtures: &mut [Fixture], count: usize) {
    loop {
        let mut imbalance: Vec<i64> = vec![0; count];
        for fixture in fixtures.iter() {
            imbalance[fixture.home] += 1;
            imbalance[fixture.guest] -= 1;
        }

        let path = if let Some(source) = imbalance.iter().position(|d| *d >= 2) {
            reversal_path(fixtures, count, source, true, |node| imbalance[node] < 0)
        } else if let Some(source) = imbalance.iter().position(|d| *d <= -2) {
            reversal_path(fixtures, count, source, false, |node| imbalance[node] > 0)
        } else {
            return;
        };

        let Some(path) = path else {
            return;
        };
        for index in path {
            let fixture = &mut fixtures[index];
            std::mem::swap(&mut fixture.home, &mut fixture.guest);
        }
    }
}

/// Breadth-first search from `source` along hosting edges (home to guest when
/// `forward`, guest to home otherwise) to the nearest participant accepted by
/// `is_target`. Returns the indices of the fixtures on the path.
fn reversal_path(
    fixtures: &[Fixture],
    count: usize,
    source: usize,
    forward: bool,
    is_target: impl Fn(usize) -> bool,
) -> Option<Vec<usize>> {
    let mut came_from: Vec<Option<(usize, usize)>> = vec![None; count];
    let mut visited: Vec<bool> = vec![false; count];
    let mut queue: VecDeque<usize> = VecDeque::from([source]);
    visited[source] = true;

    while let Some(node) = queue.pop_front() {
        if node != source && is_target(node) {
            let mut path = Vec::new();
            let mut current = node;
            while let Some((previous, fixture)) = came_from[current] {
                path.push(fixture);
                current = previous;
            }
            return Some(path);
        }
        for (index, fixture) in fixtures.iter().enumerate() {
            let (from, to) = if forward {
                (fixture.home, fixture.guest)
            } else {
                (fixture.guest, fixture.home)
            };
            if from == node && !visited[to] {
                visited[to] = true;
                came_from[to] = Some((node, index));
                queue.push_back(to);
            }
        }
    }

    None
}
