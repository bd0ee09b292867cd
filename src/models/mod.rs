//! Fixture model: teams, rounds, matches, series and competitions.

mod competition;
mod game;
mod round;
mod schedule;
mod series;
mod team;

pub use competition::{Competition, CompetitionId, CompetitionStatus, CompetitionType, EngineError};
pub use game::{FixtureStatus, GameMatch, MatchId, Score, Side};
pub use round::{Round, RoundId};
pub use schedule::{RoundPlan, Schedule};
pub use series::{Series, SeriesId, MAX_GAMES, WINS_TO_CLINCH};
pub use team::{TeamId, TeamRef, BYE_ID, TO_BE_DEFINED_ID};
