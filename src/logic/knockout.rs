//! Cup: single-elimination bracket of single matches.

use crate::ids::IdGenerator;
use crate::logic::bracket::{build_bracket, round_name, Bracket, BracketConfig};
use crate::logic::setup::validate_teams;
use crate::models::{
    CompetitionId, CompetitionType, EngineError, FixtureStatus, GameMatch, MatchId, Round,
    RoundPlan, Schedule, TeamRef,
};
use uuid::Uuid;

/// Intention to place a winner in whichever slot of `target` is still open.
///
/// The check-and-set happens at the store, which serializes it per target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotFill {
    pub target: Uuid,
    pub team: TeamRef,
}

/// Generate the cup bracket for seed-ordered `teams` (index 0 = top seed).
///
/// Every round is created up front. Later-round matches start with both sides
/// `to-be-defined` and carry no team until a child match completes; pairings against
/// a bye are finished walkovers whose team is already written into the next match.
pub fn generate_cup_bracket<G: IdGenerator>(
    competition_id: CompetitionId,
    teams: &[TeamRef],
    config: BracketConfig,
    ids: &mut G,
) -> Result<Schedule, EngineError> {
    validate_teams(teams, Some(config.size))?;
    let bracket = build_bracket(teams, config)?;
    Ok(wrap_matches(competition_id, &bracket, ids))
}

fn wrap_matches<G: IdGenerator>(
    competition_id: CompetitionId,
    bracket: &Bracket,
    ids: &mut G,
) -> Schedule {
    let round_count = bracket.rounds.len();

    // Ids first so each node can point at the match it feeds.
    let round_ids: Vec<Uuid> = (0..round_count).map(|_| ids.next_id()).collect();
    let match_ids: Vec<Vec<Option<MatchId>>> = bracket
        .rounds
        .iter()
        .map(|nodes| {
            nodes
                .iter()
                .map(|n| (!n.is_void()).then(|| ids.next_id()))
                .collect()
        })
        .collect();

    let rounds = bracket
        .rounds
        .iter()
        .enumerate()
        .map(|(r, nodes)| {
            let number = r as u32 + 1;
            let name = round_name(bracket.config.size >> r);
            let mut plan = RoundPlan::new(Round::new(round_ids[r], competition_id, name, number));
            plan.matches = nodes
                .iter()
                .enumerate()
                .filter_map(|(i, node)| {
                    let id = match_ids[r][i]?;
                    let mut m = GameMatch::new(
                        id,
                        competition_id,
                        round_ids[r],
                        CompetitionType::Cup,
                        node.local.clone(),
                        node.visitor.clone(),
                    );
                    m.next_match_id = node.next.and_then(|n| match_ids[r + 1][n]);
                    Some(m)
                })
                .collect();
            if !plan.matches.is_empty() && plan.matches.iter().all(|m| m.is_finished()) {
                plan.round.status = FixtureStatus::Finished;
            }
            plan
        })
        .collect();

    Schedule { rounds }
}

/// Where the winner of a finished cup match goes next.
///
/// Returns `None` for the final. Fails if the match is unfinished or its score is level.
pub fn advance_cup_match(finished: &GameMatch) -> Result<Option<SlotFill>, EngineError> {
    if finished.competition_type != CompetitionType::Cup {
        return Err(EngineError::WrongCompetitionType);
    }
    let Some(target) = finished.next_match_id else {
        return Ok(None);
    };
    let winner = finished.winner().ok_or(EngineError::InvalidResult)?;
    Ok(Some(SlotFill {
        target,
        team: winner.clone(),
    }))
}
