// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Partitioning of pairings into groups that can be played in parallel.
//!
//! Two pairings conflict when any participant appears in both, whatever its
//! role (home, guest or referee). No group ever holds conflicting pairings,
//! and every input pairing lands in exactly one group.

use crate::error::DomainError;
use crate::pairing::{PairingGroup, PairingSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

/// How pairings are combined into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GroupingStrategy {
    /// Every pairing forms its own group.
    NoGrouping,
    /// Pairings are taken in order; a conflicting pairing closes the current
    /// group and opens the next one.
    #[default]
    AlternatingFill,
    /// First-fit packing: each new group takes every remaining pairing that
    /// fits, scanning the whole queue.
    LeastGroupsPossible,
}

impl GroupingStrategy {
    /// Returns the strategy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoGrouping => "NoGrouping",
            Self::AlternatingFill => "AlternatingFill",
            Self::LeastGroupsPossible => "LeastGroupsPossible",
        }
    }
}

impl FromStr for GroupingStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NoGrouping" | "none" => Ok(Self::NoGrouping),
            "AlternatingFill" | "alternating" => Ok(Self::AlternatingFill),
            "LeastGroupsPossible" | "least-groups" => Ok(Self::LeastGroupsPossible),
            _ => Err(DomainError::InvalidGroupingStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for GroupingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Groups the pairings of a leg with the given strategy.
///
/// Groups are returned without a date period.
#[must_use]
pub fn group_pairings<P: Copy + Eq>(
    pairings: &PairingSet<P>,
    strategy: GroupingStrategy,
) -> Vec<PairingGroup<P>> {
    match strategy {
        GroupingStrategy::NoGrouping => pairings
            .pairings
            .iter()
            .map(|pairing| PairingGroup {
                pairings: vec![*pairing],
                period: None,
            })
            .collect(),
        GroupingStrategy::AlternatingFill => alternating_fill(pairings),
        GroupingStrategy::LeastGroupsPossible => least_groups_possible(pairings),
    }
}

fn alternating_fill<P: Copy + Eq>(pairings: &PairingSet<P>) -> Vec<PairingGroup<P>> {
    let mut groups: Vec<PairingGroup<P>> = Vec::new();
    let mut current: PairingGroup<P> = PairingGroup::new();

    for pairing in &pairings.pairings {
        if !current.accepts(pairing) {
            groups.push(std::mem::take(&mut current));
        }
        current.pairings.push(*pairing);
    }

    if !current.pairings.is_empty() {
        groups.push(current);
    }
    groups
}

fn least_groups_possible<P: Copy + Eq>(pairings: &PairingSet<P>) -> Vec<PairingGroup<P>> {
    let mut queue: VecDeque<_> = pairings.pairings.iter().copied().collect();
    let mut groups: Vec<PairingGroup<P>> = Vec::new();

    while !queue.is_empty() {
        let mut group: PairingGroup<P> = PairingGroup::new();
        let mut remaining = VecDeque::with_capacity(queue.len());
        for pairing in queue.drain(..) {
            if group.accepts(&pairing) {
                group.pairings.push(pairing);
            } else {
                remaining.push_back(pairing);
            }
        }
        queue = remaining;
        groups.push(group);
    }

    groups
}
