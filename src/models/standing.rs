//! Standing: one player's row in a computed ranking table.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Per-player aggregate over resolved fixtures. Recomputed on demand, never
/// stored as source of truth.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
    pub played: u32,
    pub games_for: u32,
    pub games_against: u32,
}

impl Standing {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ..Self::default()
        }
    }

    /// Game differential (first-set games for minus against).
    pub fn game_diff(&self) -> i64 {
        i64::from(self.games_for) - i64::from(self.games_against)
    }
}
