//! Team: an unordered pair of two distinct players acting as one unit.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of a team: its member ids in sorted order. `{a,b}` and `{b,a}`
/// produce the same key.
pub type TeamKey = (PlayerId, PlayerId);

/// A pair of players. Members are stored sorted by id so two teams with the
/// same players compare equal no matter the construction order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Team {
    first: PlayerId,
    second: PlayerId,
}

impl Team {
    /// Build a team from two distinct player ids.
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        debug_assert!(a != b, "a team needs two distinct players");
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Sorted member pair, the team's identity.
    pub fn key(&self) -> TeamKey {
        (self.first, self.second)
    }

    /// Both member ids, sorted.
    pub fn players(&self) -> [PlayerId; 2] {
        [self.first, self.second]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.first == id || self.second == id
    }

    /// Combined seeding strength: sum of both members' levels (0.0 for
    /// players missing from the index or without an assessed level).
    pub fn strength(&self, levels: &HashMap<PlayerId, f64>) -> f64 {
        self.players()
            .iter()
            .map(|id| levels.get(id).copied().unwrap_or(0.0))
            .sum()
    }

    /// Level index for `strength` lookups.
    pub fn level_index(players: &[Player]) -> HashMap<PlayerId, f64> {
        players
            .iter()
            .map(|p| (p.id, p.seeding_level()))
            .collect()
    }
}
