//! Match (single game), its score and status.

use crate::models::competition::{CompetitionId, CompetitionType};
use crate::models::round::RoundId;
use crate::models::series::SeriesId;
use crate::models::team::TeamRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle shared by rounds, matches and series.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Pending,
    InProgress,
    Finished,
}

/// Which side of a fixture.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// Final score of a game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Winning side, or `None` on a level score.
    pub fn winner(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A single game between two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub competition_id: CompetitionId,
    pub round_id: RoundId,
    /// Set for playoff games only.
    pub series_id: Option<SeriesId>,
    /// 1..=3 inside a series.
    pub game_number: Option<u8>,
    pub competition_type: CompetitionType,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub status: FixtureStatus,
    /// None if not yet played (and for walkovers).
    pub result: Option<Score>,
    /// Cup only: the match the winner advances into.
    pub next_match_id: Option<MatchId>,
}

impl GameMatch {
    /// New pending match. A bye on either side makes it a finished walkover with no result.
    pub fn new(
        id: MatchId,
        competition_id: CompetitionId,
        round_id: RoundId,
        competition_type: CompetitionType,
        home_team: TeamRef,
        away_team: TeamRef,
    ) -> Self {
        let status = if home_team.is_bye() || away_team.is_bye() {
            FixtureStatus::Finished
        } else {
            FixtureStatus::Pending
        };
        Self {
            id,
            competition_id,
            round_id,
            series_id: None,
            game_number: None,
            competition_type,
            home_team,
            away_team,
            status,
            result: None,
            next_match_id: None,
        }
    }

    pub fn is_walkover(&self) -> bool {
        self.home_team.is_bye() || self.away_team.is_bye()
    }

    pub fn is_finished(&self) -> bool {
        self.status == FixtureStatus::Finished
    }

    pub fn team(&self, side: Side) -> &TeamRef {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    /// Team that won: the higher score, or the real side of a walkover.
    pub fn winner(&self) -> Option<&TeamRef> {
        if !self.is_finished() {
            return None;
        }
        if self.is_walkover() {
            return [&self.home_team, &self.away_team]
                .into_iter()
                .find(|t| t.is_real());
        }
        self.result.and_then(|s| s.winner()).map(|side| self.team(side))
    }

    /// Record a final score.
    pub fn finish(&mut self, score: Score) {
        self.result = Some(score);
        self.status = FixtureStatus::Finished;
    }
}
