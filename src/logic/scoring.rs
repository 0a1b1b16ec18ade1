//! Result validation: padel set legality and winner consistency.

use crate::models::{EngineError, Score, ScoreIssue, SetScore, Side};

/// Most sets a result may carry.
pub const MAX_SETS: usize = 3;

/// A validated result: the normalized score and the confirmed winner side,
/// ready for the caller to persist.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedScore {
    pub score: Score,
    pub winner: Side,
}

/// A set is complete when one side reaches 6 games with the other at 4 or
/// fewer, or takes a close set 7-5 or 7-6.
fn valid_set(set: SetScore) -> bool {
    let (a, b) = (set.games_a, set.games_b);
    (a == 6 && b <= 4)
        || (b == 6 && a <= 4)
        || (a == 7 && (b == 5 || b == 6))
        || (b == 7 && (a == 5 || a == 6))
}

/// Check submitted sets against the declared winner. Every set must be a
/// complete padel set and the declared side must have won strictly more sets
/// than the other. Valid sets never tie, so no draw handling is needed.
/// Pure validation; persisting the result is the caller's next call.
pub fn validate_score(sets: &[SetScore], declared: Side) -> Result<ResolvedScore, EngineError> {
    if sets.is_empty() {
        return Err(EngineError::InvalidScore(ScoreIssue::NoSets));
    }
    if sets.len() > MAX_SETS {
        return Err(EngineError::InvalidScore(ScoreIssue::TooManySets {
            supplied: sets.len(),
        }));
    }

    let mut won_a = 0u32;
    let mut won_b = 0u32;
    for (i, set) in sets.iter().enumerate() {
        if !valid_set(*set) {
            return Err(EngineError::InvalidScore(ScoreIssue::BadSet {
                set: i + 1,
                games_a: set.games_a,
                games_b: set.games_b,
            }));
        }
        if set.games_a > set.games_b {
            won_a += 1;
        } else {
            won_b += 1;
        }
    }

    let (declared_won, other_won) = match declared {
        Side::A => (won_a, won_b),
        Side::B => (won_b, won_a),
    };
    if declared_won <= other_won {
        return Err(EngineError::WinnerMismatch { declared });
    }
    Ok(ResolvedScore {
        score: Score::new(sets.to_vec()),
        winner: declared,
    })
}
