//! Competition and EngineError.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a competition.
pub type CompetitionId = Uuid;

/// Errors that can occur while generating or advancing fixtures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Fewer teams than the format needs.
    NotEnoughTeams { required: usize, found: usize },
    /// More teams than the bracket holds.
    TooManyTeams { capacity: usize, found: usize },
    /// The same team id appears twice in the seed list.
    DuplicateTeam(TeamId),
    /// A team uses one of the sentinel ids.
    ReservedTeamId(TeamId),
    /// Bracket size is not a power of two (or is below 2).
    InvalidBracketSize(usize),
    CompetitionNotFound(Uuid),
    RoundNotFound(Uuid),
    MatchNotFound(Uuid),
    SeriesNotFound(Uuid),
    /// Both slots of the target fixture are already taken.
    NoOpenSlot(Uuid),
    /// A score with no winner.
    InvalidResult,
    /// The match already has a final result.
    AlreadyFinished(Uuid),
    /// A result was reported for a match whose teams are not both known.
    TeamsNotResolved(Uuid),
    /// Operation does not apply to this competition format.
    WrongCompetitionType,
    /// The series would need more games than it allows.
    SeriesOverflow(Uuid),
    /// The store reported a failure.
    Store(String),
    /// A team list could not be read.
    Import(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotEnoughTeams { required, found } => {
                write!(f, "Need at least {} teams (got {})", required, found)
            }
            EngineError::TooManyTeams { capacity, found } => {
                write!(f, "Bracket holds {} teams (got {})", capacity, found)
            }
            EngineError::DuplicateTeam(id) => write!(f, "Team {} is listed twice", id),
            EngineError::ReservedTeamId(id) => write!(f, "Team id '{}' is reserved", id),
            EngineError::InvalidBracketSize(n) => {
                write!(f, "Bracket size must be a power of two of at least 2 (got {})", n)
            }
            EngineError::CompetitionNotFound(id) => write!(f, "Competition {} not found", id),
            EngineError::RoundNotFound(id) => write!(f, "Round {} not found", id),
            EngineError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            EngineError::SeriesNotFound(id) => write!(f, "Series {} not found", id),
            EngineError::NoOpenSlot(id) => write!(f, "Fixture {} has no open slot", id),
            EngineError::InvalidResult => write!(f, "A game cannot end in a tie"),
            EngineError::AlreadyFinished(id) => write!(f, "Match {} is already finished", id),
            EngineError::TeamsNotResolved(id) => {
                write!(f, "Match {} does not have both teams yet", id)
            }
            EngineError::WrongCompetitionType => {
                write!(f, "Operation not valid for this competition type")
            }
            EngineError::SeriesOverflow(id) => {
                write!(f, "Series {} cannot take another game", id)
            }
            EngineError::Store(msg) => write!(f, "Store error: {}", msg),
            EngineError::Import(msg) => write!(f, "Could not read teams: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

/// Format of a competition.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    /// Double round-robin calendar.
    #[default]
    League,
    /// Single-elimination bracket of single matches.
    Cup,
    /// Single-elimination bracket of best-of-three series.
    Playoff,
}

/// Whether a competition still has games to play.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionStatus {
    #[default]
    InProgress,
    Finished,
}

/// A season competition. Its rounds, matches and series live in the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    pub competition_type: CompetitionType,
    pub status: CompetitionStatus,
    pub team_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Competition {
    pub fn new(
        id: CompetitionId,
        name: impl Into<String>,
        competition_type: CompetitionType,
        team_count: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            competition_type,
            status: CompetitionStatus::InProgress,
            team_count,
            created_at: Utc::now(),
        }
    }
}
