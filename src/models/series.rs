//! Best-of-three playoff series.

use crate::models::competition::CompetitionId;
use crate::models::game::{FixtureStatus, Side};
use crate::models::round::RoundId;
use crate::models::team::{TeamId, TeamRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a series.
pub type SeriesId = Uuid;

/// Games needed to take a series.
pub const WINS_TO_CLINCH: u8 = 2;
/// Longest possible series.
pub const MAX_GAMES: u8 = 3;

/// A best-of-three meta-fixture between two teams.
///
/// `games_won_local + games_won_visitor == games_played` always holds, and `winner_id`
/// is set exactly when the series is finished.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub competition_id: CompetitionId,
    pub round_id: RoundId,
    pub local: TeamRef,
    pub visitor: TeamRef,
    pub games_won_local: u8,
    pub games_won_visitor: u8,
    pub games_played: u8,
    pub max_games: u8,
    pub status: FixtureStatus,
    pub winner_id: Option<TeamId>,
    pub next_series_id: Option<SeriesId>,
}

impl Series {
    pub fn new(
        id: SeriesId,
        competition_id: CompetitionId,
        round_id: RoundId,
        local: TeamRef,
        visitor: TeamRef,
    ) -> Self {
        Self {
            id,
            competition_id,
            round_id,
            local,
            visitor,
            games_won_local: 0,
            games_won_visitor: 0,
            games_played: 0,
            max_games: MAX_GAMES,
            status: FixtureStatus::Pending,
            winner_id: None,
            next_series_id: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == FixtureStatus::Finished
    }

    /// Both slots hold a known occupant (team or bye).
    pub fn slots_resolved(&self) -> bool {
        self.local.is_defined() && self.visitor.is_defined()
    }

    pub fn team(&self, side: Side) -> &TeamRef {
        match side {
            Side::Home => &self.local,
            Side::Away => &self.visitor,
        }
    }

    /// Resolve a bye pairing at creation time: finished, no games, real side wins.
    pub fn resolve_walkover(&mut self) {
        let winner = [&self.local, &self.visitor]
            .into_iter()
            .find(|t| t.is_real())
            .map(|t| t.id.clone());
        self.status = FixtureStatus::Finished;
        self.winner_id = winner;
    }

    /// The winning team once finished.
    pub fn winner(&self) -> Option<&TeamRef> {
        let id = self.winner_id.as_ref()?;
        [&self.local, &self.visitor].into_iter().find(|t| &t.id == id)
    }
}
