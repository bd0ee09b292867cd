//! Round ("jornada"): one stage of a competition.

use crate::models::competition::CompetitionId;
use crate::models::game::FixtureStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a round.
pub type RoundId = Uuid;

/// A scheduled stage. `number` orders rounds chronologically (ascending).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub competition_id: CompetitionId,
    pub name: String,
    pub number: u32,
    pub status: FixtureStatus,
}

impl Round {
    pub fn new(id: RoundId, competition_id: CompetitionId, name: impl Into<String>, number: u32) -> Self {
        Self {
            id,
            competition_id,
            name: name.into(),
            number,
            status: FixtureStatus::Pending,
        }
    }
}
