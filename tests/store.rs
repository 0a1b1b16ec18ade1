//! Integration tests for the in-memory store: roster queries, the matchup
//! uniqueness constraint, the result lifecycle and CSV import.

use chrono::Utc;
use padel_tournament_web::store::read_roster;
use padel_tournament_web::{
    Fixture, FormatConfig, MemoryStore, Player, RosterFilter, RoundStage, Score, SetScore, Side,
    StandingsScope, Store, StoreError, Team,
};
use uuid::Uuid;

fn store_with_roster(n: usize) -> (MemoryStore, Vec<Player>) {
    let store = MemoryStore::new();
    let players: Vec<Player> = (0..n)
        .map(|i| {
            store
                .add_player(&format!("P{i}"), Some(3.0 + i as f64 * 0.5))
                .unwrap()
        })
        .collect();
    (store, players)
}

fn fixture(a: Team, b: Team) -> Fixture {
    Fixture::new(a, b, RoundStage::League, Utc::now())
}

fn straight_sets() -> Score {
    Score::new(vec![SetScore::new(6, 4), SetScore::new(6, 2)])
}

#[test]
fn approved_roster_honors_filters() {
    let (store, players) = store_with_roster(4); // levels 3.0, 3.5, 4.0, 4.5
    store.set_approved(players[0].id, false).unwrap();

    let all = store.fetch_approved_roster(&RosterFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|p| p.id != players[0].id));

    let strong = store
        .fetch_approved_roster(&RosterFilter {
            ids: None,
            min_level: Some(4.0),
        })
        .unwrap();
    assert_eq!(strong.len(), 2);

    // selection intersects with approval
    let selection = store
        .fetch_approved_roster(&RosterFilter::selection(vec![players[0].id, players[1].id]))
        .unwrap();
    assert_eq!(selection.len(), 1);
    assert_eq!(selection[0].id, players[1].id);
}

#[test]
fn insert_rejects_duplicate_matchups() {
    let (store, players) = store_with_roster(4);
    let t = store
        .create_tournament("Liga", FormatConfig::default())
        .unwrap();
    let team_a = Team::new(players[0].id, players[1].id);
    let team_b = Team::new(players[2].id, players[3].id);

    store
        .insert_fixtures(t.id, vec![fixture(team_a, team_b)])
        .unwrap();
    assert!(matches!(
        store.insert_fixtures(t.id, vec![fixture(team_a, team_b)]),
        Err(StoreError::DuplicateMatchup)
    ));
    // mirrored sides are a different matchup (the return leg)
    store
        .insert_fixtures(t.id, vec![fixture(team_b, team_a)])
        .unwrap();
    assert_eq!(store.get_tournament(t.id).unwrap().fixtures.len(), 2);
}

#[test]
fn insert_rejects_duplicates_within_one_batch() {
    let (store, players) = store_with_roster(4);
    let t = store
        .create_tournament("Liga", FormatConfig::default())
        .unwrap();
    let team_a = Team::new(players[0].id, players[1].id);
    let team_b = Team::new(players[2].id, players[3].id);

    assert!(matches!(
        store.insert_fixtures(
            t.id,
            vec![fixture(team_a, team_b), fixture(team_a, team_b)],
        ),
        Err(StoreError::DuplicateMatchup)
    ));
    // nothing from the rejected batch was kept
    assert!(store.get_tournament(t.id).unwrap().fixtures.is_empty());
}

#[test]
fn result_recorded_once_then_conflicts() {
    let (store, players) = store_with_roster(4);
    let t = store
        .create_tournament("Liga", FormatConfig::default())
        .unwrap();
    let fx = fixture(
        Team::new(players[0].id, players[1].id),
        Team::new(players[2].id, players[3].id),
    );
    let fixture_id = fx.id;
    store.insert_fixtures(t.id, vec![fx]).unwrap();

    let updated = store
        .record_result(t.id, fixture_id, straight_sets(), Side::A)
        .unwrap();
    assert_eq!(updated.winner, Some(Side::A));

    assert!(matches!(
        store.record_result(t.id, fixture_id, straight_sets(), Side::B),
        Err(StoreError::AlreadyResolved(_))
    ));
}

#[test]
fn override_replaces_a_recorded_result() {
    let (store, players) = store_with_roster(4);
    let t = store
        .create_tournament("Liga", FormatConfig::default())
        .unwrap();
    let fx = fixture(
        Team::new(players[0].id, players[1].id),
        Team::new(players[2].id, players[3].id),
    );
    let fixture_id = fx.id;
    store.insert_fixtures(t.id, vec![fx]).unwrap();
    store
        .record_result(t.id, fixture_id, straight_sets(), Side::A)
        .unwrap();

    let corrected = store
        .override_result(
            t.id,
            fixture_id,
            Score::new(vec![SetScore::new(4, 6), SetScore::new(2, 6)]),
            Side::B,
        )
        .unwrap();
    assert_eq!(corrected.winner, Some(Side::B));
    assert_eq!(
        store.get_tournament(t.id).unwrap().fixtures[0].winner,
        Some(Side::B)
    );
}

#[test]
fn unknown_ids_are_reported() {
    let store = MemoryStore::new();
    assert!(matches!(
        store.get_tournament(Uuid::new_v4()),
        Err(StoreError::UnknownTournament(_))
    ));
    assert!(matches!(
        store.set_approved(Uuid::new_v4(), true),
        Err(StoreError::UnknownPlayer(_))
    ));

    let t = store
        .create_tournament("Liga", FormatConfig::default())
        .unwrap();
    assert!(matches!(
        store.record_result(t.id, Uuid::new_v4(), straight_sets(), Side::A),
        Err(StoreError::UnknownFixture(_))
    ));
}

#[test]
fn resolved_fixtures_respect_scope() {
    let (store, players) = store_with_roster(8);
    let t1 = store
        .create_tournament("Liga", FormatConfig::default())
        .unwrap();
    let t2 = store
        .create_tournament("Copa", FormatConfig::default())
        .unwrap();

    let fx1 = fixture(
        Team::new(players[0].id, players[1].id),
        Team::new(players[2].id, players[3].id),
    );
    let fx2 = fixture(
        Team::new(players[4].id, players[5].id),
        Team::new(players[6].id, players[7].id),
    );
    let pending = fixture(
        Team::new(players[0].id, players[2].id),
        Team::new(players[1].id, players[3].id),
    );
    let (fx1_id, fx2_id) = (fx1.id, fx2.id);
    store.insert_fixtures(t1.id, vec![fx1, pending]).unwrap();
    store.insert_fixtures(t2.id, vec![fx2]).unwrap();
    store
        .record_result(t1.id, fx1_id, straight_sets(), Side::A)
        .unwrap();
    store
        .record_result(t2.id, fx2_id, straight_sets(), Side::B)
        .unwrap();

    let in_t1 = store
        .fetch_resolved_fixtures(StandingsScope::Tournament(t1.id))
        .unwrap();
    assert_eq!(in_t1.len(), 1);
    assert_eq!(in_t1[0].id, fx1_id);

    let club = store.fetch_resolved_fixtures(StandingsScope::Club).unwrap();
    assert_eq!(club.len(), 2);
}

#[test]
fn existing_keys_cover_every_stored_fixture() {
    let (store, players) = store_with_roster(4);
    let t = store
        .create_tournament("Liga", FormatConfig::default())
        .unwrap();
    let fx = fixture(
        Team::new(players[0].id, players[1].id),
        Team::new(players[2].id, players[3].id),
    );
    let key = fx.matchup_key();
    store.insert_fixtures(t.id, vec![fx]).unwrap();

    let keys = store.fetch_existing_matchup_keys(t.id).unwrap();
    assert_eq!(keys.len(), 1);
    assert!(keys.contains(&key));
}

#[test]
fn roster_csv_imports_players() {
    let csv = "name,level,approved\nAna,4.5,true\nBeto,,false\nCarla,5.25,\n";
    let players = read_roster(csv.as_bytes()).unwrap();
    assert_eq!(players.len(), 3);

    assert_eq!(players[0].name, "Ana");
    assert_eq!(players[0].level, Some(4.5));
    assert!(players[0].approved);

    assert_eq!(players[1].level, None);
    assert!(!players[1].approved);

    assert!(players[2].approved, "blank approved defaults to true");

    let store = MemoryStore::new();
    assert_eq!(store.import_players(players.clone()).unwrap(), 3);
    // duplicate names are skipped on a re-import
    assert_eq!(store.import_players(players).unwrap(), 0);
    assert_eq!(store.list_players().unwrap().len(), 3);
}

#[test]
fn roster_csv_without_optional_columns() {
    let csv = "name,level\nDiego,3.0\nElena,\n";
    let players = read_roster(csv.as_bytes()).unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].level, Some(3.0));
    assert!(players[0].approved);
    assert_eq!(players[1].level, None);
}
