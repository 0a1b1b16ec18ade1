//! Tournament engine: roster checks, pairing, fixture generation, result
//! validation and standings.

mod fixtures;
mod pairing;
mod roster;
mod scoring;
mod standings;

pub use fixtures::{filter_new, generate_fixtures, generate_for_teams, FixtureBatch};
pub use pairing::build_pairs;
pub use roster::{normalize_roster, MIN_ROSTER};
pub use scoring::{validate_score, MAX_SETS, ResolvedScore};
pub use standings::{compute_standings, LOSS_POINTS, WIN_POINTS};
