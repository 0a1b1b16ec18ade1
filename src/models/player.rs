//! Player data structures: club roster records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams, fixtures and lookups).
pub type PlayerId = Uuid;

/// A club player. Level follows the club scale (1.0 weakest .. 7.0 strongest);
/// players without an assessed level have `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Skill level on the 1.0–7.0 club scale, if assessed.
    pub level: Option<f64>,
    /// Membership approval: only approved players can be selected for a roster.
    pub approved: bool,
}

impl Player {
    /// Create an approved player with the given name and optional level.
    pub fn new(name: impl Into<String>, level: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            level,
            approved: true,
        }
    }

    /// Seeding level: unassessed players count as 0.0 (weakest).
    pub fn seeding_level(&self) -> f64 {
        self.level.unwrap_or(0.0)
    }
}

/// Filter for roster queries against the store.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RosterFilter {
    /// Restrict to these ids (the organizer's selection). `None` = all.
    pub ids: Option<Vec<PlayerId>>,
    /// Keep only players at or above this level.
    pub min_level: Option<f64>,
}

impl RosterFilter {
    /// Filter matching exactly the given selection of player ids.
    pub fn selection(ids: Vec<PlayerId>) -> Self {
        Self {
            ids: Some(ids),
            min_level: None,
        }
    }

    /// Whether an (approved) player passes this filter.
    pub fn matches(&self, player: &Player) -> bool {
        if let Some(ids) = &self.ids {
            if !ids.contains(&player.id) {
                return false;
            }
        }
        if let Some(min) = self.min_level {
            if player.seeding_level() < min {
                return false;
            }
        }
        true
    }
}
