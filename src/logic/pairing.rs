//! Pairing: turn a validated roster into two-person teams.

use crate::models::{Player, Team};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build teams from an even-sized roster.
///
/// Non-seeded: uniform shuffle, then consecutive pairs. Seeded: sort by level
/// descending (ties by name for determinism), then pair the best remaining
/// with the weakest remaining, advancing inward, so team strengths balance.
pub fn build_pairs(players: &[Player], seeded: bool, rng: &mut impl Rng) -> Vec<Team> {
    debug_assert!(players.len() % 2 == 0, "roster must be even");
    let mut ordered: Vec<&Player> = players.iter().collect();
    if seeded {
        ordered.sort_by(|a, b| {
            b.seeding_level()
                .total_cmp(&a.seeding_level())
                .then_with(|| a.name.cmp(&b.name))
        });
        let n = ordered.len();
        (0..n / 2)
            .map(|i| Team::new(ordered[i].id, ordered[n - 1 - i].id))
            .collect()
    } else {
        ordered.shuffle(rng);
        ordered
            .chunks_exact(2)
            .map(|pair| Team::new(pair[0].id, pair[1].id))
            .collect()
    }
}
