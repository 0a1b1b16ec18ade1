//! Fixture (match), Side, RoundStage and MatchupKey.

use crate::models::score::Score;
use crate::models::team::{Team, TeamKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Which side of a fixture won.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Competition stage a fixture belongs to. Display labels are derived from
/// this tag; ordering uses `sort_key`, never the label text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStage {
    /// Single round-robin over all teams.
    League,
    /// Round-robin inside group `0..n` ("Grupo A", "Grupo B", ...).
    Group(u8),
    /// First knockout round of a bracket with this many slots (byes included).
    Knockout { bracket: u32 },
}

impl RoundStage {
    /// Most groups one tournament can carry; `Group` stores a byte-sized
    /// index.
    pub const MAX_GROUPS: usize = 256;

    /// Display label shown to players ("Liga", "Grupo A", "Semifinal", ...).
    pub fn label(&self) -> String {
        match self {
            RoundStage::League => "Liga".to_string(),
            RoundStage::Group(i) if *i < 26 => format!("Grupo {}", (b'A' + i) as char),
            RoundStage::Group(i) => format!("Grupo {}", u32::from(*i) + 1),
            RoundStage::Knockout { bracket: 2 } => "Final".to_string(),
            RoundStage::Knockout { bracket: 4 } => "Semifinal".to_string(),
            RoundStage::Knockout { bracket: 8 } => "Cuartos".to_string(),
            RoundStage::Knockout { bracket: 16 } => "Octavos".to_string(),
            RoundStage::Knockout { bracket } => format!("Ronda de {bracket}"),
        }
    }

    /// Sort key for fixture lists: group phase first (by group), then
    /// knockout rounds from largest bracket down to the final.
    pub fn sort_key(&self) -> (u8, i64) {
        match self {
            RoundStage::League => (0, 0),
            RoundStage::Group(i) => (0, i64::from(*i)),
            RoundStage::Knockout { bracket } => (1, -i64::from(*bracket)),
        }
    }
}

/// Derived identity of a fixture's matchup: the two sides' team keys in side
/// order. Generators emit primary fixtures with sides sorted by team key, so
/// this is orientation-independent everywhere except deliberate round-trip
/// return legs, which carry the mirrored key and are therefore kept.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MatchupKey(pub TeamKey, pub TeamKey);

/// A scheduled contest between two teams. Sides are fixed at generation;
/// only score and winner change afterwards (one result submission, or an
/// organizer override).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub side_a: Team,
    pub side_b: Team,
    pub stage: RoundStage,
    /// Display label, derived from `stage` at creation.
    pub round_label: String,
    /// Placeholder slot time; real court scheduling happens elsewhere.
    pub scheduled_at: DateTime<Utc>,
    /// None until a result is recorded.
    pub score: Option<Score>,
    /// None = pending.
    pub winner: Option<Side>,
}

impl Fixture {
    pub fn new(side_a: Team, side_b: Team, stage: RoundStage, scheduled_at: DateTime<Utc>) -> Self {
        debug_assert!(
            !side_a.players().iter().any(|p| side_b.contains(*p)),
            "fixture sides must be disjoint teams"
        );
        Self {
            id: Uuid::new_v4(),
            side_a,
            side_b,
            stage,
            round_label: stage.label(),
            scheduled_at,
            score: None,
            winner: None,
        }
    }

    /// Matchup identity derived from the sides as stored.
    pub fn matchup_key(&self) -> MatchupKey {
        MatchupKey(self.side_a.key(), self.side_b.key())
    }

    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }

    pub fn team_on(&self, side: Side) -> Team {
        match side {
            Side::A => self.side_a,
            Side::B => self.side_b,
        }
    }

    /// Winning team, if resolved.
    pub fn winning_team(&self) -> Option<Team> {
        self.winner.map(|s| self.team_on(s))
    }

    /// Losing team, if resolved.
    pub fn losing_team(&self) -> Option<Team> {
        self.winner.map(|s| self.team_on(s.opponent()))
    }
}
