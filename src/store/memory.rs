//! In-memory store backed by `RwLock`ed maps, sized for a single-process
//! club deployment.

use crate::models::{
    Fixture, FixtureId, FormatConfig, MatchupKey, Player, PlayerId, RosterFilter, Score, Side,
    Tournament, TournamentId,
};
use crate::store::{StandingsScope, Store, StoreError};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    players: RwLock<HashMap<PlayerId, Player>>,
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new approved player.
    pub fn add_player(&self, name: &str, level: Option<f64>) -> Result<Player, StoreError> {
        let player = Player::new(name, level);
        let mut g = self.players.write().map_err(|_| StoreError::Unavailable)?;
        g.insert(player.id, player.clone());
        Ok(player)
    }

    /// Bulk-import players (roster CSV at startup or via upload). Names
    /// already present are skipped so a re-import cannot duplicate the
    /// roster. Returns how many players were added.
    pub fn import_players(&self, players: Vec<Player>) -> Result<usize, StoreError> {
        let mut g = self.players.write().map_err(|_| StoreError::Unavailable)?;
        let mut known: HashSet<String> = g.values().map(|p| p.name.clone()).collect();
        let mut added = 0;
        for player in players {
            if !known.insert(player.name.clone()) {
                continue;
            }
            g.insert(player.id, player);
            added += 1;
        }
        Ok(added)
    }

    /// All players sorted by name, pending approvals included.
    pub fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let g = self.players.read().map_err(|_| StoreError::Unavailable)?;
        let mut players: Vec<Player> = g.values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(players)
    }

    /// Flip a player's membership approval.
    pub fn set_approved(&self, id: PlayerId, approved: bool) -> Result<Player, StoreError> {
        let mut g = self.players.write().map_err(|_| StoreError::Unavailable)?;
        match g.get_mut(&id) {
            Some(p) => {
                p.approved = approved;
                Ok(p.clone())
            }
            None => Err(StoreError::UnknownPlayer(id)),
        }
    }

    pub fn create_tournament(
        &self,
        name: &str,
        config: FormatConfig,
    ) -> Result<Tournament, StoreError> {
        let tournament = Tournament::new(name, config);
        let mut g = self
            .tournaments
            .write()
            .map_err(|_| StoreError::Unavailable)?;
        let out = tournament.clone();
        g.insert(tournament.id, tournament);
        Ok(out)
    }

    /// All tournaments, newest first.
    pub fn list_tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        let g = self
            .tournaments
            .read()
            .map_err(|_| StoreError::Unavailable)?;
        let mut tournaments: Vec<Tournament> = g.values().cloned().collect();
        tournaments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(tournaments)
    }

    pub fn get_tournament(&self, id: TournamentId) -> Result<Tournament, StoreError> {
        let g = self
            .tournaments
            .read()
            .map_err(|_| StoreError::Unavailable)?;
        g.get(&id).cloned().ok_or(StoreError::UnknownTournament(id))
    }
}

impl Store for MemoryStore {
    fn fetch_approved_roster(&self, filter: &RosterFilter) -> Result<Vec<Player>, StoreError> {
        let g = self.players.read().map_err(|_| StoreError::Unavailable)?;
        let mut roster: Vec<Player> = g
            .values()
            .filter(|p| p.approved && filter.matches(p))
            .cloned()
            .collect();
        roster.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(roster)
    }

    fn fetch_existing_matchup_keys(
        &self,
        tournament: TournamentId,
    ) -> Result<HashSet<MatchupKey>, StoreError> {
        let g = self
            .tournaments
            .read()
            .map_err(|_| StoreError::Unavailable)?;
        match g.get(&tournament) {
            Some(t) => Ok(t.existing_matchup_keys()),
            None => Err(StoreError::UnknownTournament(tournament)),
        }
    }

    fn insert_fixtures(
        &self,
        tournament: TournamentId,
        fixtures: Vec<Fixture>,
    ) -> Result<(), StoreError> {
        let mut g = self
            .tournaments
            .write()
            .map_err(|_| StoreError::Unavailable)?;
        let t = g
            .get_mut(&tournament)
            .ok_or(StoreError::UnknownTournament(tournament))?;
        let mut keys = t.existing_matchup_keys();
        for fx in &fixtures {
            if !keys.insert(fx.matchup_key()) {
                return Err(StoreError::DuplicateMatchup);
            }
        }
        t.fixtures.extend(fixtures);
        Ok(())
    }

    fn record_result(
        &self,
        tournament: TournamentId,
        fixture: FixtureId,
        score: Score,
        winner: Side,
    ) -> Result<Fixture, StoreError> {
        let mut g = self
            .tournaments
            .write()
            .map_err(|_| StoreError::Unavailable)?;
        let t = g
            .get_mut(&tournament)
            .ok_or(StoreError::UnknownTournament(tournament))?;
        let fx = t
            .fixture_mut(fixture)
            .ok_or(StoreError::UnknownFixture(fixture))?;
        if fx.is_resolved() {
            return Err(StoreError::AlreadyResolved(fixture));
        }
        fx.score = Some(score);
        fx.winner = Some(winner);
        Ok(fx.clone())
    }

    fn override_result(
        &self,
        tournament: TournamentId,
        fixture: FixtureId,
        score: Score,
        winner: Side,
    ) -> Result<Fixture, StoreError> {
        let mut g = self
            .tournaments
            .write()
            .map_err(|_| StoreError::Unavailable)?;
        let t = g
            .get_mut(&tournament)
            .ok_or(StoreError::UnknownTournament(tournament))?;
        let fx = t
            .fixture_mut(fixture)
            .ok_or(StoreError::UnknownFixture(fixture))?;
        fx.score = Some(score);
        fx.winner = Some(winner);
        Ok(fx.clone())
    }

    fn fetch_resolved_fixtures(&self, scope: StandingsScope) -> Result<Vec<Fixture>, StoreError> {
        let g = self
            .tournaments
            .read()
            .map_err(|_| StoreError::Unavailable)?;
        match scope {
            StandingsScope::Tournament(id) => match g.get(&id) {
                Some(t) => Ok(t.resolved_fixtures().cloned().collect()),
                None => Err(StoreError::UnknownTournament(id)),
            },
            StandingsScope::Club => {
                let mut out = Vec::new();
                for t in g.values() {
                    out.extend(t.resolved_fixtures().cloned());
                }
                Ok(out)
            }
        }
    }
}
