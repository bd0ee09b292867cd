//! League calendar: double round-robin by the circle method.

use crate::ids::IdGenerator;
use crate::logic::setup::validate_teams;
use crate::models::{
    CompetitionId, CompetitionType, EngineError, GameMatch, Round, RoundPlan, Schedule, TeamRef,
};

/// Generate a home-and-away league calendar.
///
/// 1. Odd team counts get a synthetic bye appended so every round pairs everyone.
/// 2. Position 0 stays fixed; in each round slot `i` hosts slot `M-1-i`.
/// 3. After each round the other slots rotate one step (the last moves to slot 1).
/// 4. The second leg replays the first leg round by round with home and away swapped.
///
/// Bye fixtures are created already finished with no result.
pub fn generate_league_calendar<G: IdGenerator>(
    competition_id: CompetitionId,
    teams: &[TeamRef],
    ids: &mut G,
) -> Result<Schedule, EngineError> {
    validate_teams(teams, None)?;

    let first_leg = circle_pairings(teams);
    let rounds_per_leg = first_leg.len();
    log::debug!(
        "league calendar: {} teams, {} rounds per leg",
        teams.len(),
        rounds_per_leg
    );

    let second_leg = first_leg.iter().map(|pairs| {
        pairs
            .iter()
            .map(|(home, away)| (away.clone(), home.clone()))
            .collect::<Vec<_>>()
    });
    let all_rounds: Vec<Vec<(TeamRef, TeamRef)>> =
        first_leg.iter().cloned().chain(second_leg).collect();

    let rounds = all_rounds
        .into_iter()
        .enumerate()
        .map(|(idx, pairs)| {
            let number = idx as u32 + 1;
            let round = Round::new(ids.next_id(), competition_id, format!("Round {}", number), number);
            let round_id = round.id;
            let mut plan = RoundPlan::new(round);
            plan.matches = pairs
                .into_iter()
                .map(|(home, away)| {
                    GameMatch::new(
                        ids.next_id(),
                        competition_id,
                        round_id,
                        CompetitionType::League,
                        home,
                        away,
                    )
                })
                .collect();
            plan
        })
        .collect();

    Ok(Schedule { rounds })
}

/// First-leg pairings, one `Vec<(home, away)>` per round.
fn circle_pairings(teams: &[TeamRef]) -> Vec<Vec<(TeamRef, TeamRef)>> {
    let mut slots = teams.to_vec();
    if slots.len() % 2 == 1 {
        slots.push(TeamRef::bye());
    }
    let m = slots.len();
    let mut rounds = Vec::with_capacity(m - 1);
    for _ in 0..m - 1 {
        let pairs = (0..m / 2)
            .map(|i| (slots[i].clone(), slots[m - 1 - i].clone()))
            .collect();
        rounds.push(pairs);
        slots[1..].rotate_right(1);
    }
    rounds
}
