//! Fixture generation for the three competition formats, plus the duplicate
//! filter that keeps a tournament from scheduling the same matchup twice.

use crate::logic::pairing::build_pairs;
use crate::logic::roster::normalize_roster;
use crate::models::{
    EngineError, Fixture, Format, FormatConfig, FormatIssue, MatchupKey, Player, RoundStage, Team,
};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Spacing between consecutive placeholder slots.
const SLOT_MINUTES: i64 = 5;

/// Hands out monotonically increasing placeholder timestamps so no two
/// fixtures of one generation batch share a time.
struct TimeSlots {
    base: DateTime<Utc>,
    index: i64,
}

impl TimeSlots {
    fn new(base: DateTime<Utc>) -> Self {
        Self { base, index: 0 }
    }

    fn next(&mut self) -> DateTime<Utc> {
        let at = self.base + Duration::minutes(SLOT_MINUTES * self.index);
        self.index += 1;
        at
    }
}

/// Fixture for an unordered pair, sides in canonical (sorted-by-key) order so
/// the matchup key is independent of how the pair was enumerated.
fn pair_fixture(t1: Team, t2: Team, stage: RoundStage, slots: &mut TimeSlots) -> Fixture {
    let (a, b) = if t1.key() <= t2.key() { (t1, t2) } else { (t2, t1) };
    Fixture::new(a, b, stage, slots.next())
}

/// Return leg of a round-trip pair: sides deliberately reversed, so its key
/// mirrors the first leg's and both legs survive the duplicate filter.
fn return_fixture(t1: Team, t2: Team, stage: RoundStage, slots: &mut TimeSlots) -> Fixture {
    let (a, b) = if t1.key() <= t2.key() { (t2, t1) } else { (t1, t2) };
    Fixture::new(a, b, stage, slots.next())
}

/// League: one fixture per unordered team pair, no reverse fixtures.
fn league_fixtures(teams: &[Team], slots: &mut TimeSlots) -> Vec<Fixture> {
    let mut fixtures = Vec::new();
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            fixtures.push(pair_fixture(teams[i], teams[j], RoundStage::League, slots));
        }
    }
    fixtures
}

/// Groups: deal shuffled teams round-robin into groups, round-robin inside
/// each group; with `round_trip`, each group's return legs follow its first
/// legs.
fn group_fixtures(
    teams: &[Team],
    group_count: usize,
    round_trip: bool,
    slots: &mut TimeSlots,
    rng: &mut impl Rng,
) -> Result<Vec<Fixture>, EngineError> {
    if group_count < 2 {
        return Err(EngineError::InvalidFormatConfig(
            FormatIssue::GroupCountTooSmall { group_count },
        ));
    }
    // Group indices are stored as a byte, so the count must fit one.
    if group_count > RoundStage::MAX_GROUPS {
        return Err(EngineError::InvalidFormatConfig(
            FormatIssue::GroupCountTooLarge { group_count },
        ));
    }
    if group_count > teams.len() {
        return Err(EngineError::InvalidFormatConfig(
            FormatIssue::GroupCountExceedsTeams {
                group_count,
                team_count: teams.len(),
            },
        ));
    }

    let mut dealt = teams.to_vec();
    dealt.shuffle(rng);
    let mut groups: Vec<Vec<Team>> = vec![Vec::new(); group_count];
    for (k, team) in dealt.into_iter().enumerate() {
        groups[k % group_count].push(team);
    }

    let mut fixtures = Vec::new();
    for (gi, group) in groups.iter().enumerate() {
        let stage = RoundStage::Group(gi as u8);
        let mut first_leg = Vec::new();
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                first_leg.push((group[i], group[j]));
            }
        }
        for &(t1, t2) in &first_leg {
            fixtures.push(pair_fixture(t1, t2, stage, slots));
        }
        if round_trip {
            for &(t1, t2) in &first_leg {
                fixtures.push(return_fixture(t1, t2, stage, slots));
            }
        }
    }
    Ok(fixtures)
}

/// Elimination first round: order teams (seeded by combined level, or
/// shuffled), pad with byes to the next power of two, pair slot `i` with the
/// mirrored slot. A pairing touching a bye produces no fixture.
fn elimination_fixtures(
    teams: &[Team],
    players: &[Player],
    seeded: bool,
    slots: &mut TimeSlots,
    rng: &mut impl Rng,
) -> Vec<Fixture> {
    let mut ordered = teams.to_vec();
    if seeded {
        let levels = Team::level_index(players);
        ordered.sort_by(|a, b| {
            b.strength(&levels)
                .total_cmp(&a.strength(&levels))
                .then_with(|| a.key().cmp(&b.key()))
        });
    } else {
        ordered.shuffle(rng);
    }

    let padded = ordered.len().next_power_of_two();
    let stage = RoundStage::Knockout {
        bracket: padded as u32,
    };
    let mut bracket: Vec<Option<Team>> = ordered.into_iter().map(Some).collect();
    bracket.resize(padded, None);

    let mut fixtures = Vec::new();
    for i in 0..padded / 2 {
        // A pairing against a padding slot is a bye; the seeded team
        // advances without a recorded match.
        if let (Some(t1), Some(t2)) = (bracket[i], bracket[padded - 1 - i]) {
            fixtures.push(pair_fixture(t1, t2, stage, slots));
        }
    }
    fixtures
}

/// Generate candidate fixtures for already-built teams. `players` feeds the
/// seeding lookup for elimination brackets.
pub fn generate_for_teams(
    teams: &[Team],
    players: &[Player],
    config: &FormatConfig,
    starts_at: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<Vec<Fixture>, EngineError> {
    let mut slots = TimeSlots::new(starts_at);
    match config.format {
        Format::League => Ok(league_fixtures(teams, &mut slots)),
        Format::Groups {
            group_count,
            round_trip,
        } => group_fixtures(teams, group_count, round_trip, &mut slots, rng),
        Format::Elimination => Ok(elimination_fixtures(
            teams,
            players,
            config.seeded,
            &mut slots,
            rng,
        )),
    }
}

/// Drop every candidate whose matchup key is already persisted or taken
/// earlier in the same batch. Skipping is expected, never an error.
pub fn filter_new(
    candidates: Vec<Fixture>,
    existing: &HashSet<MatchupKey>,
) -> (Vec<Fixture>, usize) {
    let mut seen = existing.clone();
    let mut kept = Vec::with_capacity(candidates.len());
    let mut skipped = 0;
    for fx in candidates {
        if seen.insert(fx.matchup_key()) {
            kept.push(fx);
        } else {
            skipped += 1;
        }
    }
    (kept, skipped)
}

/// Outcome of a generation call: the new fixtures plus how many computed
/// matchups were skipped as already existing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixtureBatch {
    pub fixtures: Vec<Fixture>,
    pub skipped: usize,
}

/// Full generation pipeline: validate the roster, pair it into teams, build
/// the format's fixtures, and drop matchups the tournament already has.
/// Returns `NoNewFixtures` when every computed matchup was dropped.
pub fn generate_fixtures(
    players: &[Player],
    config: &FormatConfig,
    starts_at: DateTime<Utc>,
    existing: &HashSet<MatchupKey>,
    rng: &mut impl Rng,
) -> Result<FixtureBatch, EngineError> {
    let roster = normalize_roster(players.to_vec())?;
    let teams = build_pairs(&roster, config.seeded, rng);
    let candidates = generate_for_teams(&teams, &roster, config, starts_at, rng)?;
    let (fixtures, skipped) = filter_new(candidates, existing);
    if fixtures.is_empty() && skipped > 0 {
        return Err(EngineError::NoNewFixtures { skipped });
    }
    Ok(FixtureBatch { fixtures, skipped })
}
