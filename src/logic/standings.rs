//! Standings: fold resolved fixtures into a per-player ranking table.

use crate::models::{Fixture, PlayerId, Side, Standing};
use std::collections::HashMap;

/// Points for winning a fixture.
pub const WIN_POINTS: u32 = 3;
/// Points for playing and losing one.
pub const LOSS_POINTS: u32 = 1;

/// Aggregate resolved fixtures into sorted standings. Pending fixtures are
/// skipped; a resolved fixture without a usable score still earns points and
/// contributes zero games. Game differential counts the first set only, so
/// one runaway match cannot dominate the tie-break.
///
/// Rows sort by points, then game differential, then games won, then win
/// count, and finally by player id so equal records always list in the same
/// order.
pub fn compute_standings<'a, I>(fixtures: I) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a Fixture>,
{
    let mut table: HashMap<PlayerId, Standing> = HashMap::new();

    for fx in fixtures {
        let winner = match fx.winner {
            Some(side) => side,
            None => continue,
        };
        // A missing or empty score counts as zero games on both sides.
        let (games_a, games_b) = fx
            .score
            .as_ref()
            .and_then(|s| s.first_set())
            .map_or((0, 0), |set| (set.games_a, set.games_b));

        let mut credit = |id: PlayerId, won: bool, games_for: u8, games_against: u8| {
            let row = table.entry(id).or_insert_with(|| Standing::new(id));
            row.played += 1;
            row.games_for += u32::from(games_for);
            row.games_against += u32::from(games_against);
            if won {
                row.points += WIN_POINTS;
                row.wins += 1;
            } else {
                row.points += LOSS_POINTS;
                row.losses += 1;
            }
        };

        for id in fx.side_a.players() {
            credit(id, winner == Side::A, games_a, games_b);
        }
        for id in fx.side_b.players() {
            credit(id, winner == Side::B, games_b, games_a);
        }
    }

    let mut rows: Vec<Standing> = table.into_values().collect();
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.game_diff().cmp(&a.game_diff()))
            .then_with(|| b.games_for.cmp(&a.games_for))
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    rows
}
