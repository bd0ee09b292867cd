//! Playoffs: single-elimination bracket of best-of-three series.

use crate::ids::IdGenerator;
use crate::logic::bracket::{build_bracket, round_name, BracketConfig};
use crate::logic::setup::validate_teams;
use crate::models::{
    CompetitionId, CompetitionType, EngineError, FixtureStatus, GameMatch, Round, RoundPlan,
    Schedule, Series, SeriesId, TeamRef,
};
use uuid::Uuid;

/// Games scheduled as soon as a series knows both teams.
pub const INITIAL_GAMES: u8 = 2;

/// Generate the playoff bracket for seed-ordered `teams` (index 0 = top seed).
///
/// Same pairings and feeds as the cup. Every series whose two teams are known at
/// creation gets its first two games right away: pending, or finished walkovers when
/// the series was decided by a bye.
pub fn generate_playoff_bracket<G: IdGenerator>(
    competition_id: CompetitionId,
    teams: &[TeamRef],
    config: BracketConfig,
    ids: &mut G,
) -> Result<Schedule, EngineError> {
    validate_teams(teams, Some(config.size))?;
    let bracket = build_bracket(teams, config)?;
    let round_count = bracket.rounds.len();

    let round_ids: Vec<Uuid> = (0..round_count).map(|_| ids.next_id()).collect();
    let series_ids: Vec<Vec<Option<SeriesId>>> = bracket
        .rounds
        .iter()
        .map(|nodes| {
            nodes
                .iter()
                .map(|n| (!n.is_void()).then(|| ids.next_id()))
                .collect()
        })
        .collect();

    let mut rounds = Vec::with_capacity(round_count);
    for (r, nodes) in bracket.rounds.iter().enumerate() {
        let number = r as u32 + 1;
        let name = round_name(bracket.config.size >> r);
        let mut plan = RoundPlan::new(Round::new(round_ids[r], competition_id, name, number));

        for (i, node) in nodes.iter().enumerate() {
            let Some(id) = series_ids[r][i] else {
                continue;
            };
            let mut series = Series::new(
                id,
                competition_id,
                round_ids[r],
                node.local.clone(),
                node.visitor.clone(),
            );
            series.next_series_id = node.next.and_then(|n| series_ids[r + 1][n]);
            if node.finished {
                series.resolve_walkover();
            }
            if series.slots_resolved() {
                plan.matches.extend(initial_games(&series, ids));
            }
            plan.series.push(series);
        }

        if !plan.series.is_empty() && plan.series.iter().all(|s| s.is_finished()) {
            plan.round.status = FixtureStatus::Finished;
        }
        rounds.push(plan);
    }

    Ok(Schedule { rounds })
}

/// Game `number` of `series`, local at home.
pub fn series_game<G: IdGenerator>(series: &Series, number: u8, ids: &mut G) -> GameMatch {
    let mut game = GameMatch::new(
        ids.next_id(),
        series.competition_id,
        series.round_id,
        CompetitionType::Playoff,
        series.local.clone(),
        series.visitor.clone(),
    );
    game.series_id = Some(series.id);
    game.game_number = Some(number);
    game
}

/// The opening games of a series whose teams are both known.
pub fn initial_games<G: IdGenerator>(series: &Series, ids: &mut G) -> Vec<GameMatch> {
    (1..=INITIAL_GAMES)
        .map(|number| series_game(series, number, ids))
        .collect()
}
