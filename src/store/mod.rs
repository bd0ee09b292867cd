//! Persistence boundary for competitions, rounds, matches and series.
//!
//! Every call either succeeds or reports an [`EngineError`]; callers abort the
//! current operation on the first failure. The slot-fill calls are the one
//! read-modify-write the engine relies on: implementations must run each of
//! them atomically per target fixture.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    Competition, CompetitionId, CompetitionStatus, EngineError, FixtureStatus, GameMatch,
    MatchId, Round, RoundId, Score, Series, SeriesId, TeamId, TeamRef,
};

/// Partial update of a match. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MatchPatch {
    pub status: Option<FixtureStatus>,
    pub result: Option<Score>,
    pub home_team: Option<TeamRef>,
    pub away_team: Option<TeamRef>,
}

impl MatchPatch {
    /// Final score, marking the match finished.
    pub fn finished(score: Score) -> Self {
        Self {
            status: Some(FixtureStatus::Finished),
            result: Some(score),
            ..Self::default()
        }
    }

    /// Replace both teams.
    pub fn teams(home: TeamRef, away: TeamRef) -> Self {
        Self {
            home_team: Some(home),
            away_team: Some(away),
            ..Self::default()
        }
    }

    pub fn apply(self, m: &mut GameMatch) {
        if let Some(status) = self.status {
            m.status = status;
        }
        if let Some(result) = self.result {
            m.result = Some(result);
        }
        if let Some(home) = self.home_team {
            m.home_team = home;
        }
        if let Some(away) = self.away_team {
            m.away_team = away;
        }
    }
}

/// Partial update of a series: the fields advancement owns.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SeriesPatch {
    pub games_won_local: Option<u8>,
    pub games_won_visitor: Option<u8>,
    pub games_played: Option<u8>,
    pub status: Option<FixtureStatus>,
    pub winner_id: Option<TeamId>,
}

impl SeriesPatch {
    /// Totals, status and winner taken from an advanced copy.
    pub fn from_series(series: &Series) -> Self {
        Self {
            games_won_local: Some(series.games_won_local),
            games_won_visitor: Some(series.games_won_visitor),
            games_played: Some(series.games_played),
            status: Some(series.status),
            winner_id: series.winner_id.clone(),
        }
    }

    pub fn apply(self, s: &mut Series) {
        if let Some(v) = self.games_won_local {
            s.games_won_local = v;
        }
        if let Some(v) = self.games_won_visitor {
            s.games_won_visitor = v;
        }
        if let Some(v) = self.games_played {
            s.games_played = v;
        }
        if let Some(status) = self.status {
            s.status = status;
        }
        if let Some(winner) = self.winner_id {
            s.winner_id = Some(winner);
        }
    }
}

/// Storage collaborator.
pub trait FixtureStore {
    fn create_competition(&mut self, competition: Competition) -> Result<(), EngineError>;
    fn get_competition(&self, id: CompetitionId) -> Result<Competition, EngineError>;
    fn set_competition_status(
        &mut self,
        id: CompetitionId,
        status: CompetitionStatus,
    ) -> Result<(), EngineError>;

    fn create_round(&mut self, round: Round) -> Result<(), EngineError>;
    fn get_round(&self, id: RoundId) -> Result<Round, EngineError>;
    fn set_round_status(&mut self, id: RoundId, status: FixtureStatus) -> Result<(), EngineError>;
    /// Rounds of a competition ordered by number.
    fn list_rounds(&self, competition_id: CompetitionId) -> Result<Vec<Round>, EngineError>;

    fn create_match(&mut self, m: GameMatch) -> Result<(), EngineError>;
    fn get_match(&self, id: MatchId) -> Result<GameMatch, EngineError>;
    fn update_match(&mut self, id: MatchId, patch: MatchPatch) -> Result<GameMatch, EngineError>;
    fn delete_match(&mut self, id: MatchId) -> Result<(), EngineError>;
    fn list_matches_by_round(&self, round_id: RoundId) -> Result<Vec<GameMatch>, EngineError>;
    /// Games of a series ordered by game number.
    fn list_matches_by_series(&self, series_id: SeriesId) -> Result<Vec<GameMatch>, EngineError>;
    /// Atomically put `team` in the first open side of match `id`.
    fn fill_open_match_slot(&mut self, id: MatchId, team: TeamRef) -> Result<GameMatch, EngineError>;

    fn create_series(&mut self, series: Series) -> Result<(), EngineError>;
    fn get_series(&self, id: SeriesId) -> Result<Series, EngineError>;
    fn update_series(&mut self, id: SeriesId, patch: SeriesPatch) -> Result<Series, EngineError>;
    fn list_series_by_round(&self, round_id: RoundId) -> Result<Vec<Series>, EngineError>;
    /// Atomically put `team` in the first open slot of series `id`.
    fn fill_open_series_slot(&mut self, id: SeriesId, team: TeamRef) -> Result<Series, EngineError>;
}
