//! Round and competition completion.

use crate::models::{FixtureStatus, GameMatch, Round, Series};

/// Status a round should have given its fixtures.
///
/// Playoff rounds are judged by their series, other rounds by their matches.
/// Walkovers are finished from the start, so they never move a round to in-progress
/// on their own.
pub fn derive_round_status(matches: &[GameMatch], series: &[Series]) -> FixtureStatus {
    if !series.is_empty() {
        if series.iter().all(|s| s.is_finished()) {
            return FixtureStatus::Finished;
        }
        let started = series
            .iter()
            .any(|s| s.games_played > 0)
            || matches.iter().any(|m| m.is_finished() && !m.is_walkover());
        return if started {
            FixtureStatus::InProgress
        } else {
            FixtureStatus::Pending
        };
    }

    if matches.is_empty() {
        return FixtureStatus::Pending;
    }
    if matches.iter().all(|m| m.is_finished()) {
        return FixtureStatus::Finished;
    }
    let started = matches
        .iter()
        .any(|m| !m.is_walkover() && m.status != FixtureStatus::Pending);
    if started {
        FixtureStatus::InProgress
    } else {
        FixtureStatus::Pending
    }
}

/// A competition is over once its last round is finished and no earlier round is
/// still open.
pub fn competition_complete(rounds: &[Round]) -> bool {
    let Some(last) = rounds.iter().max_by_key(|r| r.number) else {
        return false;
    };
    last.status == FixtureStatus::Finished
        && rounds.iter().all(|r| r.status == FixtureStatus::Finished)
}
