//! Team lists from CSV (`id,name,crest_url`; crest may be empty). Row order is seed order.

use crate::models::{EngineError, TeamRef};
use std::io::Read;

pub fn read_teams_csv<R: Read>(reader: R) -> Result<Vec<TeamRef>, EngineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut teams = Vec::new();
    for record in rdr.deserialize::<TeamRef>() {
        let team = record.map_err(|e| EngineError::Import(e.to_string()))?;
        teams.push(team);
    }
    Ok(teams)
}
