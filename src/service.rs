//! Orchestration: runs generators and advancement against a [`FixtureStore`].

use crate::ids::IdGenerator;
use crate::logic::{
    advance_cup_match, advance_series, competition_complete, derive_round_status,
    fill_first_open, generate_cup_bracket, generate_league_calendar, generate_playoff_bracket,
    plan_next_series_games, validate_teams, BracketConfig, NextSeriesGames,
};
use crate::models::{
    Competition, CompetitionId, CompetitionStatus, CompetitionType, EngineError, GameMatch,
    MatchId, RoundId, RoundPlan, Schedule, Score, TeamRef,
};
use crate::store::{FixtureStore, MatchPatch, SeriesPatch};
use serde::Serialize;

/// A competition with every round and its fixtures.
#[derive(Clone, Debug, Serialize)]
pub struct CompetitionOverview {
    pub competition: Competition,
    pub rounds: Vec<RoundPlan>,
}

/// Entry point for creating competitions and reporting results.
pub struct LeagueService<S, G> {
    store: S,
    ids: G,
    bracket: BracketConfig,
}

impl<S: FixtureStore, G: IdGenerator> LeagueService<S, G> {
    pub fn new(store: S, ids: G) -> Self {
        Self {
            store,
            ids,
            bracket: BracketConfig::default(),
        }
    }

    pub fn with_bracket(mut self, bracket: BracketConfig) -> Self {
        self.bracket = bracket;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Validate `teams` (seed order), generate the format's fixtures and persist them.
    pub fn create_competition(
        &mut self,
        name: &str,
        competition_type: CompetitionType,
        teams: &[TeamRef],
    ) -> Result<Competition, EngineError> {
        let capacity = match competition_type {
            CompetitionType::League => None,
            CompetitionType::Cup | CompetitionType::Playoff => Some(self.bracket.size),
        };
        if let Err(e) = validate_teams(teams, capacity) {
            log::warn!("rejected competition '{}': {}", name, e);
            return Err(e);
        }

        let competition = Competition::new(self.ids.next_id(), name, competition_type, teams.len());
        let schedule = match competition_type {
            CompetitionType::League => {
                generate_league_calendar(competition.id, teams, &mut self.ids)?
            }
            CompetitionType::Cup => {
                generate_cup_bracket(competition.id, teams, self.bracket, &mut self.ids)?
            }
            CompetitionType::Playoff => {
                generate_playoff_bracket(competition.id, teams, self.bracket, &mut self.ids)?
            }
        };

        self.store.create_competition(competition.clone())?;
        self.persist_schedule(schedule)?;
        log::info!(
            "created {:?} '{}' ({}) with {} teams",
            competition_type,
            competition.name,
            competition.id,
            teams.len()
        );
        Ok(competition)
    }

    fn persist_schedule(&mut self, schedule: Schedule) -> Result<(), EngineError> {
        for plan in schedule.rounds {
            self.store.create_round(plan.round)?;
            for series in plan.series {
                self.store.create_series(series)?;
            }
            for m in plan.matches {
                self.store.create_match(m)?;
            }
        }
        Ok(())
    }

    /// Competition plus its rounds, in order, with their matches and series.
    pub fn competition_overview(&self, id: CompetitionId) -> Result<CompetitionOverview, EngineError> {
        let competition = self.store.get_competition(id)?;
        let rounds = self
            .store
            .list_rounds(id)?
            .into_iter()
            .map(|round| {
                let matches = self.store.list_matches_by_round(round.id)?;
                let series = self.store.list_series_by_round(round.id)?;
                Ok::<_, EngineError>(RoundPlan {
                    round,
                    matches,
                    series,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompetitionOverview { competition, rounds })
    }

    /// Record a final score and carry its consequences through the competition.
    ///
    /// Cup winners move into their next match; playoff games re-tally their series,
    /// which may schedule a decisive game or send the winner on. Round and competition
    /// status follow. All lookups for a step happen before its first write.
    pub fn report_result(&mut self, match_id: MatchId, score: Score) -> Result<GameMatch, EngineError> {
        let current = self.store.get_match(match_id)?;
        if current.is_finished() {
            return Err(EngineError::AlreadyFinished(match_id));
        }
        if !current.home_team.is_real() || !current.away_team.is_real() {
            return Err(EngineError::TeamsNotResolved(match_id));
        }
        if score.winner().is_none() {
            return Err(EngineError::InvalidResult);
        }

        let mut finished = current;
        finished.finish(score);

        match finished.competition_type {
            CompetitionType::League => {
                self.store.update_match(match_id, MatchPatch::finished(score))?;
            }
            CompetitionType::Cup => self.finish_cup_match(&finished)?,
            CompetitionType::Playoff => self.finish_series_game(&finished)?,
        }

        self.refresh_progress(finished.competition_id, finished.round_id)?;
        log::info!(
            "result {}-{} recorded for {} vs {}",
            score.home,
            score.away,
            finished.home_team.name,
            finished.away_team.name
        );
        Ok(finished)
    }

    fn finish_cup_match(&mut self, finished: &GameMatch) -> Result<(), EngineError> {
        let fill = advance_cup_match(finished)?;
        if let Some(fill) = &fill {
            let mut next = self.store.get_match(fill.target)?;
            if fill_first_open(&mut next.home_team, &mut next.away_team, fill.team.clone()).is_none() {
                return Err(EngineError::NoOpenSlot(fill.target));
            }
        }
        let score = finished.result.ok_or(EngineError::InvalidResult)?;
        self.store.update_match(finished.id, MatchPatch::finished(score))?;
        if let Some(fill) = fill {
            let next = self.store.fill_open_match_slot(fill.target, fill.team)?;
            log::debug!("cup match {} now {} vs {}", next.id, next.home_team.id, next.away_team.id);
        }
        Ok(())
    }

    fn finish_series_game(&mut self, finished: &GameMatch) -> Result<(), EngineError> {
        let series_id = finished.series_id.ok_or(EngineError::WrongCompetitionType)?;
        let series = self.store.get_series(series_id)?;
        let games: Vec<GameMatch> = self
            .store
            .list_matches_by_series(series_id)?
            .into_iter()
            .map(|g| if g.id == finished.id { finished.clone() } else { g })
            .collect();
        // the next series must exist before anything is written
        let next = match series.next_series_id {
            Some(next_id) => Some((
                self.store.get_series(next_id)?,
                self.store.list_matches_by_series(next_id)?,
            )),
            None => None,
        };

        let plan = advance_series(&series, &games, &mut self.ids)?;
        let next_games = match (next, &plan.winner_slot) {
            (Some((mut next, games)), Some(fill)) => {
                if fill_first_open(&mut next.local, &mut next.visitor, fill.team.clone()).is_none() {
                    return Err(EngineError::NoOpenSlot(fill.target));
                }
                Some(games)
            }
            (next, _) => next.map(|(_, games)| games),
        };

        let score = finished.result.ok_or(EngineError::InvalidResult)?;
        self.store.update_match(finished.id, MatchPatch::finished(score))?;
        self.store
            .update_series(series_id, SeriesPatch::from_series(&plan.series))?;
        for id in &plan.cancelled_games {
            self.store.delete_match(*id)?;
        }
        if let Some(game) = plan.decisive_game {
            self.store.create_match(game)?;
        }

        if let (Some(fill), Some(next_games)) = (plan.winner_slot, next_games) {
            let patched = self.store.fill_open_series_slot(fill.target, fill.team)?;
            match plan_next_series_games(&patched, &next_games, &mut self.ids) {
                NextSeriesGames::Waiting => {}
                NextSeriesGames::Create(new_games) => {
                    for g in new_games {
                        self.store.create_match(g)?;
                    }
                }
                NextSeriesGames::Patch(updated) => {
                    for g in updated {
                        self.store
                            .update_match(g.id, MatchPatch::teams(g.home_team, g.away_team))?;
                    }
                }
            }
        }
        if plan.just_finished {
            if let Some(winner) = plan.series.winner() {
                log::info!("series {} finished, winner {}", series_id, winner.name);
            }
        }
        Ok(())
    }

    fn refresh_progress(&mut self, competition_id: CompetitionId, round_id: RoundId) -> Result<(), EngineError> {
        let round = self.store.get_round(round_id)?;
        let matches = self.store.list_matches_by_round(round_id)?;
        let series = self.store.list_series_by_round(round_id)?;
        let status = derive_round_status(&matches, &series);
        if status != round.status {
            self.store.set_round_status(round_id, status)?;
        }

        let rounds = self.store.list_rounds(competition_id)?;
        if competition_complete(&rounds) {
            let competition = self.store.get_competition(competition_id)?;
            if competition.status != CompetitionStatus::Finished {
                self.store
                    .set_competition_status(competition_id, CompetitionStatus::Finished)?;
                log::info!("competition '{}' finished", competition.name);
            }
        }
        Ok(())
    }
}
