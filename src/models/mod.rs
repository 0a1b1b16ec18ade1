//! Data structures for the club tournaments: players, teams, fixtures, scores.

mod fixture;
mod player;
mod score;
mod standing;
mod team;
mod tournament;

pub use fixture::{Fixture, FixtureId, MatchupKey, RoundStage, Side};
pub use player::{Player, PlayerId, RosterFilter};
pub use score::{ParseScoreError, Score, SetScore};
pub use standing::Standing;
pub use team::{Team, TeamKey};
pub use tournament::{
    EngineError, Format, FormatConfig, FormatIssue, ScoreIssue, SelectionIssue, Tournament,
    TournamentId,
};
