//! Integration tests for the standings calculator: points formula, first-set
//! differential and the ordering chain.

use chrono::Utc;
use padel_tournament_web::{
    compute_standings, Fixture, Player, PlayerId, RoundStage, Score, SetScore, Side, Standing,
    Team,
};
use std::collections::HashSet;

fn players(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"), None)).collect()
}

fn resolved(side_a: Team, side_b: Team, sets: &[(u8, u8)], winner: Side) -> Fixture {
    let mut fx = Fixture::new(side_a, side_b, RoundStage::League, Utc::now());
    fx.score = Some(Score::new(
        sets.iter().map(|&(a, b)| SetScore::new(a, b)).collect(),
    ));
    fx.winner = Some(winner);
    fx
}

fn ids(rows: &[Standing], from: usize, to: usize) -> HashSet<PlayerId> {
    rows[from..to].iter().map(|r| r.player_id).collect()
}

#[test]
fn empty_input_yields_empty_table() {
    let none: Vec<Fixture> = Vec::new();
    assert!(compute_standings(&none).is_empty());
}

#[test]
fn points_wins_and_games_follow_results() {
    let p = players(6);
    let a = Team::new(p[0].id, p[1].id);
    let b = Team::new(p[2].id, p[3].id);
    let c = Team::new(p[4].id, p[5].id);
    let fixtures = vec![
        resolved(a, b, &[(6, 4), (6, 2)], Side::A), // a beats b, first set 6-4
        resolved(a, c, &[(3, 6), (4, 6)], Side::B), // c beats a, first set 3-6
    ];
    let rows = compute_standings(&fixtures);
    assert_eq!(rows.len(), 6);

    let row_a = rows.iter().find(|r| r.player_id == p[0].id).unwrap();
    assert_eq!(row_a.points, 4); // 3 for the win + 1 for the loss
    assert_eq!(row_a.wins, 1);
    assert_eq!(row_a.losses, 1);
    assert_eq!(row_a.played, 2);
    assert_eq!(row_a.games_for, 9); // 6 + 3, first sets only
    assert_eq!(row_a.games_against, 10); // 4 + 6
    assert_eq!(row_a.game_diff(), -1);

    // a-pair 4 points, c-pair 3, b-pair 1
    assert_eq!(ids(&rows, 0, 2), [p[0].id, p[1].id].into_iter().collect());
    assert_eq!(ids(&rows, 2, 4), [p[4].id, p[5].id].into_iter().collect());
    assert_eq!(ids(&rows, 4, 6), [p[2].id, p[3].id].into_iter().collect());
}

#[test]
fn game_differential_counts_only_the_first_set() {
    let p = players(4);
    let a = Team::new(p[0].id, p[1].id);
    let b = Team::new(p[2].id, p[3].id);
    // a takes the first set but loses the match
    let fixtures = vec![resolved(a, b, &[(6, 4), (0, 6), (0, 6)], Side::B)];
    let rows = compute_standings(&fixtures);

    let loser = rows.iter().find(|r| r.player_id == p[0].id).unwrap();
    assert_eq!(loser.points, 1);
    assert_eq!(loser.games_for, 6);
    assert_eq!(loser.games_against, 4);
    assert_eq!(loser.game_diff(), 2);

    let winner = rows.iter().find(|r| r.player_id == p[2].id).unwrap();
    assert_eq!(winner.points, 3);
    assert_eq!(winner.game_diff(), -2);

    // points beat differential: the winners still head the table
    assert_eq!(ids(&rows, 0, 2), [p[2].id, p[3].id].into_iter().collect());
}

#[test]
fn scoreless_resolved_fixture_still_scores_points() {
    let p = players(4);
    let a = Team::new(p[0].id, p[1].id);
    let b = Team::new(p[2].id, p[3].id);
    let mut fx = Fixture::new(a, b, RoundStage::League, Utc::now());
    fx.winner = Some(Side::B); // resolved, but no score was recorded
    let rows = compute_standings(&vec![fx]);
    assert_eq!(rows.len(), 4, "all four players appeared in a resolved fixture");

    let winner = rows.iter().find(|r| r.player_id == p[2].id).unwrap();
    assert_eq!(winner.points, 3);
    assert_eq!(winner.wins, 1);
    assert_eq!(winner.played, 1);
    assert_eq!((winner.games_for, winner.games_against), (0, 0));

    let loser = rows.iter().find(|r| r.player_id == p[0].id).unwrap();
    assert_eq!(loser.points, 1);
    assert_eq!(loser.losses, 1);
    assert_eq!(loser.game_diff(), 0);
}

#[test]
fn empty_score_contributes_zero_games() {
    let p = players(4);
    let a = Team::new(p[0].id, p[1].id);
    let b = Team::new(p[2].id, p[3].id);
    let fixtures = vec![
        resolved(a, b, &[], Side::A), // score present but without any sets
        resolved(a, b, &[(6, 4)], Side::A),
    ];
    let rows = compute_standings(&fixtures);

    let row = rows.iter().find(|r| r.player_id == p[0].id).unwrap();
    assert_eq!(row.points, 6);
    assert_eq!(row.wins, 2);
    assert_eq!(row.played, 2);
    assert_eq!(row.games_for, 6); // only the scored fixture adds games
    assert_eq!(row.games_against, 4);
}

#[test]
fn pending_fixtures_are_skipped() {
    let p = players(8);
    let a = Team::new(p[0].id, p[1].id);
    let b = Team::new(p[2].id, p[3].id);
    let c = Team::new(p[4].id, p[5].id);
    let d = Team::new(p[6].id, p[7].id);
    let pending = Fixture::new(c, d, RoundStage::League, Utc::now());
    let fixtures = vec![resolved(a, b, &[(6, 3)], Side::A), pending];
    let rows = compute_standings(&fixtures);
    assert_eq!(rows.len(), 4, "pending fixtures contribute nothing");
}

#[test]
fn equal_points_rank_by_first_set_differential() {
    let p = players(8);
    let a = Team::new(p[0].id, p[1].id);
    let b = Team::new(p[2].id, p[3].id);
    let c = Team::new(p[4].id, p[5].id);
    let d = Team::new(p[6].id, p[7].id);
    let fixtures = vec![
        resolved(a, b, &[(6, 0)], Side::A), // a wins with margin +6
        resolved(c, d, &[(6, 4)], Side::A), // c wins with margin +2
    ];
    let rows = compute_standings(&fixtures);
    assert_eq!(ids(&rows, 0, 2), [p[0].id, p[1].id].into_iter().collect());
    assert_eq!(ids(&rows, 2, 4), [p[4].id, p[5].id].into_iter().collect());
    // among losers the smaller deficit ranks higher
    assert_eq!(ids(&rows, 4, 6), [p[6].id, p[7].id].into_iter().collect());
    assert_eq!(ids(&rows, 6, 8), [p[2].id, p[3].id].into_iter().collect());
}

#[test]
fn equal_differential_ranks_by_games_won() {
    let p = players(8);
    let a = Team::new(p[0].id, p[1].id);
    let b = Team::new(p[2].id, p[3].id);
    let c = Team::new(p[4].id, p[5].id);
    let d = Team::new(p[6].id, p[7].id);
    let fixtures = vec![
        resolved(a, b, &[(7, 5)], Side::A), // diff +2, 7 games won
        resolved(c, d, &[(6, 4)], Side::A), // diff +2, 6 games won
    ];
    let rows = compute_standings(&fixtures);
    assert_eq!(ids(&rows, 0, 2), [p[0].id, p[1].id].into_iter().collect());
    assert_eq!(ids(&rows, 2, 4), [p[4].id, p[5].id].into_iter().collect());
}

#[test]
fn identical_records_order_by_player_id() {
    let p = players(4);
    let a = Team::new(p[0].id, p[1].id);
    let b = Team::new(p[2].id, p[3].id);
    let fixtures = vec![resolved(a, b, &[(6, 4)], Side::A)];
    let rows = compute_standings(&fixtures);
    assert!(rows[0].player_id < rows[1].player_id);
    assert!(rows[2].player_id < rows[3].player_id);
}
