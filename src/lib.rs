//! Padel tournament web app: library with models, tournament engine and
//! storage.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    build_pairs, compute_standings, filter_new, generate_fixtures, generate_for_teams,
    normalize_roster, validate_score, FixtureBatch, LOSS_POINTS, MAX_SETS, MIN_ROSTER,
    ResolvedScore, WIN_POINTS,
};
pub use models::{
    EngineError, Fixture, FixtureId, Format, FormatConfig, FormatIssue, MatchupKey,
    ParseScoreError, Player, PlayerId, RosterFilter, RoundStage, Score, ScoreIssue, SelectionIssue,
    SetScore, Side, Standing, Team, TeamKey, Tournament, TournamentId,
};
pub use store::{MemoryStore, StandingsScope, Store, StoreError};
