// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::period::DateTimePeriod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single fixture between two participants within one leg.
///
/// `turn` is the index of the idealized time slot the pairing belongs to.
/// Pairings of the same turn are meant to be played at about the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing<P> {
    /// 0-based time slot within the leg.
    pub turn: usize,
    /// The hosting participant.
    pub home: P,
    /// The visiting participant.
    pub guest: P,
    /// The refereeing participant, if the referee policy assigns one.
    pub referee: Option<P>,
}

impl<P: Copy + Eq> Pairing<P> {
    /// Creates a pairing without a referee.
    #[must_use]
    pub const fn new(turn: usize, home: P, guest: P) -> Self {
        Self {
            turn,
            home,
            guest,
            referee: None,
        }
    }

    /// Returns every participant involved in the pairing, in any role.
    pub fn participants(&self) -> impl Iterator<Item = P> + '_ {
        [self.home, self.guest].into_iter().chain(self.referee)
    }

    /// Returns whether `participant` is involved in the pairing in any role.
    #[must_use]
    pub fn involves(&self, participant: P) -> bool {
        self.participants().any(|p| p == participant)
    }

    /// Returns whether the two pairings share a participant in any role.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.participants().any(|p| other.involves(p))
    }

    /// Returns whether the pairing is between `a` and `b`, in either order.
    #[must_use]
    pub fn is_between(&self, a: P, b: P) -> bool {
        (self.home == a && self.guest == b) || (self.home == b && self.guest == a)
    }

    /// Exchanges the home and guest roles. The referee is left unchanged.
    pub fn swap_home_guest(&mut self) {
        std::mem::swap(&mut self.home, &mut self.guest);
    }
}

/// The ordered pairings of one leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingSet<P> {
    /// Pairings in generation order.
    pub pairings: Vec<Pairing<P>>,
    /// Optional desired date period per turn.
    pub turn_periods: BTreeMap<usize, DateTimePeriod>,
}

impl<P> PairingSet<P> {
    /// Creates a set from pairings, without turn periods.
    #[must_use]
    pub const fn new(pairings: Vec<Pairing<P>>) -> Self {
        Self {
            pairings,
            turn_periods: BTreeMap::new(),
        }
    }

    /// Returns the number of pairings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    /// Returns whether the set holds no pairings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    /// Returns the number of distinct turns.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.pairings.iter().map(|p| p.turn + 1).max().unwrap_or(0)
    }

    /// Sets the desired date period of a turn.
    pub fn set_turn_period(&mut self, turn: usize, period: DateTimePeriod) {
        self.turn_periods.insert(turn, period);
    }

    /// Returns the desired date period of a turn, if one was set.
    #[must_use]
    pub fn turn_period(&self, turn: usize) -> Option<&DateTimePeriod> {
        self.turn_periods.get(&turn)
    }
}

/// Pairings that share no participant and can therefore be played in parallel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingGroup<P> {
    /// Member pairings in insertion order.
    pub pairings: Vec<Pairing<P>>,
    /// Date period the group's matches should be planned in.
    pub period: Option<DateTimePeriod>,
}

impl<P: Copy + Eq> PairingGroup<P> {
    /// Creates an empty group without a period.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pairings: Vec::new(),
            period: None,
        }
    }

    /// Returns whether `pairing` could join the group without a participant
    /// appearing twice.
    #[must_use]
    pub fn accepts(&self, pairing: &Pairing<P>) -> bool {
        !self.pairings.iter().any(|member| member.conflicts_with(pairing))
    }
}

impl<P: Copy + Eq> Default for PairingGroup<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_includes_referee() {
        let a = Pairing {
            turn: 0,
            home: 1,
            guest: 2,
            referee: Some(3),
        };
        let b = Pairing::new(0, 3, 4);
        let c = Pairing::new(0, 5, 6);
        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
        assert!(!a.conflicts_with(&c));
    }

    #[test]
    fn test_swap_keeps_referee() {
        let mut pairing = Pairing {
            turn: 2,
            home: 1,
            guest: 2,
            referee: Some(1),
        };
        pairing.swap_home_guest();
        assert_eq!(pairing.home, 2);
        assert_eq!(pairing.guest, 1);
        assert_eq!(pairing.referee, Some(1));
        assert!(pairing.is_between(1, 2));
    }

    #[test]
    fn test_turn_count() {
        let set = PairingSet::new(vec![Pairing::new(0, 1, 2), Pairing::new(3, 1, 3)]);
        assert_eq!(set.turn_count(), 4);
        assert_eq!(PairingSet::<u8>::new(Vec::new()).turn_count(), 0);
    }
}
