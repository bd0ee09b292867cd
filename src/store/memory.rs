//! In-process store. Each `&mut self` call is one serialized step.

use crate::logic::fill_first_open;
use crate::models::{
    Competition, CompetitionId, CompetitionStatus, EngineError, FixtureStatus, GameMatch,
    MatchId, Round, RoundId, Series, SeriesId, TeamRef,
};
use crate::store::{FixtureStore, MatchPatch, SeriesPatch};

/// Entities kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    competitions: Vec<Competition>,
    rounds: Vec<Round>,
    matches: Vec<GameMatch>,
    series: Vec<Series>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    fn match_mut(&mut self, id: MatchId) -> Result<&mut GameMatch, EngineError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(EngineError::MatchNotFound(id))
    }

    fn series_mut(&mut self, id: SeriesId) -> Result<&mut Series, EngineError> {
        self.series
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(EngineError::SeriesNotFound(id))
    }
}

fn ensure_new<T>(items: &[T], id: uuid::Uuid, id_of: impl Fn(&T) -> uuid::Uuid) -> Result<(), EngineError> {
    if items.iter().any(|item| id_of(item) == id) {
        return Err(EngineError::Store(format!("duplicate id {}", id)));
    }
    Ok(())
}

impl FixtureStore for MemoryStore {
    fn create_competition(&mut self, competition: Competition) -> Result<(), EngineError> {
        ensure_new(&self.competitions, competition.id, |c| c.id)?;
        self.competitions.push(competition);
        Ok(())
    }

    fn get_competition(&self, id: CompetitionId) -> Result<Competition, EngineError> {
        self.competitions
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(EngineError::CompetitionNotFound(id))
    }

    fn set_competition_status(
        &mut self,
        id: CompetitionId,
        status: CompetitionStatus,
    ) -> Result<(), EngineError> {
        let competition = self
            .competitions
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(EngineError::CompetitionNotFound(id))?;
        competition.status = status;
        Ok(())
    }

    fn create_round(&mut self, round: Round) -> Result<(), EngineError> {
        ensure_new(&self.rounds, round.id, |r| r.id)?;
        self.rounds.push(round);
        Ok(())
    }

    fn get_round(&self, id: RoundId) -> Result<Round, EngineError> {
        self.rounds
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(EngineError::RoundNotFound(id))
    }

    fn set_round_status(&mut self, id: RoundId, status: FixtureStatus) -> Result<(), EngineError> {
        let round = self
            .rounds
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EngineError::RoundNotFound(id))?;
        round.status = status;
        Ok(())
    }

    fn list_rounds(&self, competition_id: CompetitionId) -> Result<Vec<Round>, EngineError> {
        let mut rounds: Vec<Round> = self
            .rounds
            .iter()
            .filter(|r| r.competition_id == competition_id)
            .cloned()
            .collect();
        rounds.sort_by_key(|r| r.number);
        Ok(rounds)
    }

    fn create_match(&mut self, m: GameMatch) -> Result<(), EngineError> {
        ensure_new(&self.matches, m.id, |x| x.id)?;
        self.matches.push(m);
        Ok(())
    }

    fn get_match(&self, id: MatchId) -> Result<GameMatch, EngineError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(EngineError::MatchNotFound(id))
    }

    fn update_match(&mut self, id: MatchId, patch: MatchPatch) -> Result<GameMatch, EngineError> {
        let m = self.match_mut(id)?;
        patch.apply(m);
        Ok(m.clone())
    }

    fn delete_match(&mut self, id: MatchId) -> Result<(), EngineError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(EngineError::MatchNotFound(id))?;
        self.matches.remove(idx);
        Ok(())
    }

    fn list_matches_by_round(&self, round_id: RoundId) -> Result<Vec<GameMatch>, EngineError> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.round_id == round_id)
            .cloned()
            .collect())
    }

    fn list_matches_by_series(&self, series_id: SeriesId) -> Result<Vec<GameMatch>, EngineError> {
        let mut games: Vec<GameMatch> = self
            .matches
            .iter()
            .filter(|m| m.series_id == Some(series_id))
            .cloned()
            .collect();
        games.sort_by_key(|g| g.game_number);
        Ok(games)
    }

    fn fill_open_match_slot(&mut self, id: MatchId, team: TeamRef) -> Result<GameMatch, EngineError> {
        let m = self.match_mut(id)?;
        fill_first_open(&mut m.home_team, &mut m.away_team, team)
            .ok_or(EngineError::NoOpenSlot(id))?;
        Ok(m.clone())
    }

    fn create_series(&mut self, series: Series) -> Result<(), EngineError> {
        ensure_new(&self.series, series.id, |s| s.id)?;
        self.series.push(series);
        Ok(())
    }

    fn get_series(&self, id: SeriesId) -> Result<Series, EngineError> {
        self.series
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(EngineError::SeriesNotFound(id))
    }

    fn update_series(&mut self, id: SeriesId, patch: SeriesPatch) -> Result<Series, EngineError> {
        let s = self.series_mut(id)?;
        patch.apply(s);
        Ok(s.clone())
    }

    fn list_series_by_round(&self, round_id: RoundId) -> Result<Vec<Series>, EngineError> {
        Ok(self
            .series
            .iter()
            .filter(|s| s.round_id == round_id)
            .cloned()
            .collect())
    }

    fn fill_open_series_slot(&mut self, id: SeriesId, team: TeamRef) -> Result<Series, EngineError> {
        let s = self.series_mut(id)?;
        fill_first_open(&mut s.local, &mut s.visitor, team).ok_or(EngineError::NoOpenSlot(id))?;
        Ok(s.clone())
    }
}
