//! Roster normalization: validate the organizer's player selection.

use crate::models::{EngineError, Player, SelectionIssue};
use std::collections::HashSet;

/// Smallest roster that can form two opposing teams.
pub const MIN_ROSTER: usize = 4;

/// Validate a selected roster: at least 4 players, even count, no duplicate
/// ids. Returns the players unchanged (order preserved) when valid.
pub fn normalize_roster(players: Vec<Player>) -> Result<Vec<Player>, EngineError> {
    let selected = players.len();
    if selected < MIN_ROSTER {
        return Err(EngineError::InvalidSelection(SelectionIssue::TooFew {
            selected,
        }));
    }
    if selected % 2 != 0 {
        return Err(EngineError::InvalidSelection(SelectionIssue::OddCount {
            selected,
        }));
    }
    let mut seen = HashSet::with_capacity(selected);
    for p in &players {
        if !seen.insert(p.id) {
            return Err(EngineError::InvalidSelection(SelectionIssue::Duplicate(
                p.id,
            )));
        }
    }
    Ok(players)
}
