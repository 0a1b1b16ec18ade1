//! Score: an ordered list of set results, structured instead of free text.
//!
//! The engine always works on the struct; the string forms exist only for
//! display and for score text arriving at the edges of the system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One set: games won by each side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub games_a: u8,
    pub games_b: u8,
}

impl SetScore {
    pub fn new(games_a: u8, games_b: u8) -> Self {
        Self { games_a, games_b }
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.games_a, self.games_b)
    }
}

/// A match score: 1 to 3 sets, in playing order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub sets: Vec<SetScore>,
}

impl Score {
    pub fn new(sets: Vec<SetScore>) -> Self {
        Self { sets }
    }

    /// First set, used for game-differential bookkeeping in standings.
    pub fn first_set(&self) -> Option<SetScore> {
        self.sets.first().copied()
    }
}

impl fmt::Display for Score {
    /// Canonical text form, e.g. `6-4, 4-6, 6-2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.sets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{set}")?;
        }
        Ok(())
    }
}

/// Why a score string could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseScoreError {
    /// No set could be read from the input.
    NoSets,
    /// More than 3 sets in the input.
    TooManySets,
    /// Set at this position (1-based) is not a pair of game counts.
    MalformedSet(usize),
}

impl fmt::Display for ParseScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseScoreError::NoSets => write!(f, "no sets found in score"),
            ParseScoreError::TooManySets => write!(f, "more than 3 sets in score"),
            ParseScoreError::MalformedSet(n) => write!(f, "set {} is not a pair of game counts", n),
        }
    }
}

impl FromStr for Score {
    type Err = ParseScoreError;

    /// Lenient boundary parser: sets separated by `,`, `/` or `;`, each set a
    /// pair of numbers with any non-digit separator between them (`6-4`,
    /// `6:4`, `6 4`). Kept out of the standings engine on purpose.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chunks: Vec<&str> = s
            .split([',', '/', ';'])
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        if chunks.is_empty() {
            return Err(ParseScoreError::NoSets);
        }
        if chunks.len() > 3 {
            return Err(ParseScoreError::TooManySets);
        }
        let mut sets = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            let runs: Vec<u8> = chunk
                .split(|c: char| !c.is_ascii_digit())
                .filter(|r| !r.is_empty())
                .map(|r| r.parse::<u8>().map_err(|_| ParseScoreError::MalformedSet(i + 1)))
                .collect::<Result<_, _>>()?;
            match runs.as_slice() {
                [a, b] => sets.push(SetScore::new(*a, *b)),
                _ => return Err(ParseScoreError::MalformedSet(i + 1)),
            }
        }
        Ok(Score::new(sets))
    }
}
