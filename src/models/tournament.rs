//! Tournament aggregate, competition format configuration, and engine errors.

use crate::models::fixture::{Fixture, FixtureId, MatchupKey, RoundStage, Side};
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Why a roster selection was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectionIssue {
    /// Fewer than 4 players selected.
    TooFew { selected: usize },
    /// Two-person teams need an even roster.
    OddCount { selected: usize },
    /// The same player appears twice in the selection.
    Duplicate(PlayerId),
}

/// Why a format configuration was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatIssue {
    /// Groups need at least 2 groups.
    GroupCountTooSmall { group_count: usize },
    /// More groups than `RoundStage::MAX_GROUPS` can tag.
    GroupCountTooLarge { group_count: usize },
    /// More groups than teams to fill them.
    GroupCountExceedsTeams { group_count: usize, team_count: usize },
}

/// Why a submitted score was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreIssue {
    /// A score needs at least one set.
    NoSets,
    /// A match is best of 3 sets at most.
    TooManySets { supplied: usize },
    /// Set at this position (1-based) breaks the game-count rules.
    BadSet { set: usize, games_a: u8, games_b: u8 },
}

/// Errors reported by the pairing/fixture/scoring engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Roster too small, odd-sized, or containing duplicates.
    InvalidSelection(SelectionIssue),
    /// Group count out of range for the team count.
    InvalidFormatConfig(FormatIssue),
    /// Every computed matchup already exists; nothing new was generated.
    /// Informational for the caller, not a failure.
    NoNewFixtures { skipped: usize },
    /// The submitted score breaks the set rules.
    InvalidScore(ScoreIssue),
    /// Declared winner does not hold the set-count majority.
    WinnerMismatch { declared: Side },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidSelection(SelectionIssue::TooFew { selected }) => {
                write!(f, "Need at least 4 players to form teams (selected {selected})")
            }
            EngineError::InvalidSelection(SelectionIssue::OddCount { selected }) => {
                write!(f, "Roster must be even to form pairs (selected {selected})")
            }
            EngineError::InvalidSelection(SelectionIssue::Duplicate(_)) => {
                write!(f, "A player appears twice in the selection")
            }
            EngineError::InvalidFormatConfig(FormatIssue::GroupCountTooSmall { group_count }) => {
                write!(f, "Need at least 2 groups (configured {group_count})")
            }
            EngineError::InvalidFormatConfig(FormatIssue::GroupCountTooLarge { group_count }) => {
                write!(
                    f,
                    "At most {} groups can be scheduled (configured {group_count})",
                    RoundStage::MAX_GROUPS
                )
            }
            EngineError::InvalidFormatConfig(FormatIssue::GroupCountExceedsTeams {
                group_count,
                team_count,
            }) => {
                write!(f, "Cannot split {team_count} teams into {group_count} groups")
            }
            EngineError::NoNewFixtures { skipped } => {
                write!(f, "All {skipped} computed matchups already exist")
            }
            EngineError::InvalidScore(ScoreIssue::NoSets) => {
                write!(f, "A result needs at least one set")
            }
            EngineError::InvalidScore(ScoreIssue::TooManySets { supplied }) => {
                write!(f, "A match has at most 3 sets (got {supplied})")
            }
            EngineError::InvalidScore(ScoreIssue::BadSet { set, games_a, games_b }) => {
                write!(f, "Set {set} has an impossible score {games_a}-{games_b}")
            }
            EngineError::WinnerMismatch { .. } => {
                write!(f, "Declared winner did not win the majority of sets")
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Competition format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Format {
    /// Single round-robin over all teams.
    League,
    /// Teams dealt into groups, round-robin inside each group.
    Groups {
        group_count: usize,
        #[serde(default)]
        round_trip: bool,
    },
    /// Single-elimination bracket (first round only), byes for short fields.
    Elimination,
}

/// Format plus the seeding switch (seeded pairing, and seeded bracket order
/// for elimination).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(flatten)]
    pub format: Format,
    #[serde(default)]
    pub seeded: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            format: Format::League,
            seeded: false,
        }
    }
}

/// A club tournament: configuration plus every fixture generated for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub config: FormatConfig,
    pub created_at: DateTime<Utc>,
    /// All fixtures generated so far, every phase.
    pub fixtures: Vec<Fixture>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, config: FormatConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            config,
            created_at: Utc::now(),
            fixtures: Vec::new(),
        }
    }

    pub fn fixture(&self, id: FixtureId) -> Option<&Fixture> {
        self.fixtures.iter().find(|fx| fx.id == id)
    }

    pub fn fixture_mut(&mut self, id: FixtureId) -> Option<&mut Fixture> {
        self.fixtures.iter_mut().find(|fx| fx.id == id)
    }

    /// Matchup keys of every fixture already created for this tournament.
    pub fn existing_matchup_keys(&self) -> HashSet<MatchupKey> {
        self.fixtures.iter().map(Fixture::matchup_key).collect()
    }

    /// Fixtures with a recorded winner.
    pub fn resolved_fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter().filter(|fx| fx.is_resolved())
    }
}
