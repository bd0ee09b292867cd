//! Generator output: rounds with the fixtures created in them.

use crate::models::game::GameMatch;
use crate::models::round::Round;
use crate::models::series::Series;
use serde::{Deserialize, Serialize};

/// One round and everything created inside it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundPlan {
    pub round: Round,
    pub matches: Vec<GameMatch>,
    /// Playoff rounds only.
    pub series: Vec<Series>,
}

impl RoundPlan {
    pub fn new(round: Round) -> Self {
        Self {
            round,
            matches: Vec::new(),
            series: Vec::new(),
        }
    }
}

/// Rounds in chronological order, ready to be persisted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub rounds: Vec<RoundPlan>,
}

impl Schedule {
    pub fn matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }
}
