//! Persistence boundary. Engine and web layer talk to a [`Store`]; the
//! shipped implementation keeps everything in process memory, and a database
//! can slot in behind the same trait later.

mod memory;
mod roster_csv;

pub use memory::MemoryStore;
pub use roster_csv::{load_roster_file, read_roster};

use crate::models::{
    Fixture, FixtureId, MatchupKey, Player, PlayerId, RosterFilter, Score, Side, TournamentId,
};
use std::collections::HashSet;
use std::fmt;

/// Storage-level failures, distinct from rule violations in the engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    UnknownPlayer(PlayerId),
    UnknownTournament(TournamentId),
    UnknownFixture(FixtureId),
    /// A fixture with the same matchup key already exists in the tournament.
    DuplicateMatchup,
    /// The fixture already has a result; only an override may replace it.
    AlreadyResolved(FixtureId),
    /// Backend unavailable (for the in-memory store: a poisoned lock).
    Unavailable,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownPlayer(id) => write!(f, "No player with id {id}"),
            StoreError::UnknownTournament(id) => write!(f, "No tournament with id {id}"),
            StoreError::UnknownFixture(id) => write!(f, "No fixture with id {id}"),
            StoreError::DuplicateMatchup => {
                write!(f, "A fixture for this matchup already exists")
            }
            StoreError::AlreadyResolved(id) => {
                write!(f, "Fixture {id} already has a result")
            }
            StoreError::Unavailable => write!(f, "Store unavailable"),
        }
    }
}

/// Which fixtures a standings query covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StandingsScope {
    /// One tournament.
    Tournament(TournamentId),
    /// Every tournament in the store (club-wide ranking).
    Club,
}

/// What the engine needs from persistence. The store, not the caller, owns
/// matchup uniqueness and the pending-to-resolved transition.
pub trait Store {
    /// Approved players passing the filter, sorted by name.
    fn fetch_approved_roster(&self, filter: &RosterFilter) -> Result<Vec<Player>, StoreError>;

    /// Matchup keys of every fixture already stored for the tournament.
    fn fetch_existing_matchup_keys(
        &self,
        tournament: TournamentId,
    ) -> Result<HashSet<MatchupKey>, StoreError>;

    /// Persist a generated batch, rejecting any fixture whose matchup key is
    /// already present. Nothing is inserted on rejection.
    fn insert_fixtures(
        &self,
        tournament: TournamentId,
        fixtures: Vec<Fixture>,
    ) -> Result<(), StoreError>;

    /// Attach a validated result to a pending fixture.
    fn record_result(
        &self,
        tournament: TournamentId,
        fixture: FixtureId,
        score: Score,
        winner: Side,
    ) -> Result<Fixture, StoreError>;

    /// Replace a fixture's result whether or not one is recorded (organizer
    /// correction).
    fn override_result(
        &self,
        tournament: TournamentId,
        fixture: FixtureId,
        score: Score,
        winner: Side,
    ) -> Result<Fixture, StoreError>;

    /// Resolved fixtures in scope, as standings input.
    fn fetch_resolved_fixtures(&self, scope: StandingsScope) -> Result<Vec<Fixture>, StoreError>;
}
