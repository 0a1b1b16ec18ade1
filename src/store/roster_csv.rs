//! Roster import from CSV (`name,level,approved` with a header row), used at
//! startup and by the upload endpoint.

use crate::models::Player;
use serde::Deserialize;
use std::io;
use std::path::Path;

/// One CSV row. `level` and `approved` columns may be absent or empty.
#[derive(Debug, Deserialize)]
struct RosterRecord {
    name: String,
    #[serde(default)]
    level: Option<f64>,
    #[serde(default)]
    approved: Option<bool>,
}

fn collect_players<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Player>, csv::Error> {
    let mut players = Vec::new();
    for record in rdr.deserialize() {
        let record: RosterRecord = record?;
        if record.name.is_empty() {
            continue;
        }
        let mut player = Player::new(record.name, record.level);
        if let Some(approved) = record.approved {
            player.approved = approved;
        }
        players.push(player);
    }
    Ok(players)
}

/// Read players from CSV. Rows with an empty name are skipped; `approved`
/// defaults to true so a plain `name,level` file imports playable members.
pub fn read_roster<R: io::Read>(reader: R) -> Result<Vec<Player>, csv::Error> {
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    collect_players(rdr)
}

/// Read players from a roster CSV file on disk.
pub fn load_roster_file(path: impl AsRef<Path>) -> Result<Vec<Player>, csv::Error> {
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    collect_players(rdr)
}
