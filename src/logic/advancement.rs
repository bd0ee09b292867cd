//! Series advancement: tally a best-of-three after each finished game and plan
//! what has to change (series totals, a decisive game, the winner's next slot).
//!
//! Nothing here touches storage. [`advance_series`] and [`plan_next_series_games`]
//! return plans; the caller applies them and serializes the slot fill per target.

use crate::ids::IdGenerator;
use crate::logic::knockout::SlotFill;
use crate::logic::playoff::{initial_games, series_game};
use crate::models::{
    EngineError, FixtureStatus, GameMatch, MatchId, Series, Side, MAX_GAMES, WINS_TO_CLINCH,
};

/// Wins counted from a series' finished games.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SeriesTally {
    pub local_wins: u8,
    pub visitor_wins: u8,
}

impl SeriesTally {
    pub fn played(&self) -> u8 {
        self.local_wins + self.visitor_wins
    }

    pub fn clinched_by(&self) -> Option<Side> {
        if self.local_wins >= WINS_TO_CLINCH {
            Some(Side::Home)
        } else if self.visitor_wins >= WINS_TO_CLINCH {
            Some(Side::Away)
        } else {
            None
        }
    }
}

/// Count finished games with a result. Series games put the local team at home, so a
/// home win is a local win.
pub fn tally_games(games: &[GameMatch]) -> SeriesTally {
    games
        .iter()
        .filter(|g| g.is_finished())
        .filter_map(|g| g.result.and_then(|s| s.winner()))
        .fold(SeriesTally::default(), |mut tally, side| {
            match side {
                Side::Home => tally.local_wins += 1,
                Side::Away => tally.visitor_wins += 1,
            }
            tally
        })
}

/// Everything one finished game changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeriesAdvance {
    /// The series with fresh totals, status and winner.
    pub series: Series,
    /// True when this call decided the series.
    pub just_finished: bool,
    /// Unplayed games of a decided series.
    pub cancelled_games: Vec<MatchId>,
    /// Game three, after a 1-1 split.
    pub decisive_game: Option<GameMatch>,
    /// Where the winner goes next.
    pub winner_slot: Option<SlotFill>,
}

/// Re-tally `series` from its full game list and plan the follow-ups.
///
/// On a 2-x finish the unplayed games are cancelled and the winner is headed for
/// the first open slot of `next_series_id`. On a 1-1 split one decisive game is
/// created, unless the series already has three games or an unplayed one.
/// Calling again for an already-finished series changes nothing.
pub fn advance_series<G: IdGenerator>(
    series: &Series,
    games: &[GameMatch],
    ids: &mut G,
) -> Result<SeriesAdvance, EngineError> {
    let tally = tally_games(games);
    if tally.played() > MAX_GAMES
        || tally.local_wins > WINS_TO_CLINCH
        || tally.visitor_wins > WINS_TO_CLINCH
    {
        return Err(EngineError::SeriesOverflow(series.id));
    }

    let mut updated = series.clone();
    updated.games_won_local = tally.local_wins;
    updated.games_won_visitor = tally.visitor_wins;
    updated.games_played = tally.played();

    let mut plan = SeriesAdvance {
        series: updated,
        just_finished: false,
        cancelled_games: Vec::new(),
        decisive_game: None,
        winner_slot: None,
    };

    if series.is_finished() {
        return Ok(plan);
    }

    if let Some(side) = tally.clinched_by() {
        let winner = series.team(side).clone();
        log::debug!(
            "series {} won {}-{} by {}",
            series.id,
            tally.local_wins.max(tally.visitor_wins),
            tally.local_wins.min(tally.visitor_wins),
            winner.id
        );
        plan.series.status = FixtureStatus::Finished;
        plan.series.winner_id = Some(winner.id.clone());
        plan.just_finished = true;
        plan.cancelled_games = games
            .iter()
            .filter(|g| !g.is_finished())
            .map(|g| g.id)
            .collect();
        plan.winner_slot = series.next_series_id.map(|target| SlotFill {
            target,
            team: winner,
        });
        return Ok(plan);
    }

    if tally.played() > 0 {
        plan.series.status = FixtureStatus::InProgress;
    }

    let has_unplayed = games.iter().any(|g| !g.is_finished());
    let split = tally.local_wins == 1 && tally.visitor_wins == 1;
    if split && !has_unplayed && games.len() < MAX_GAMES as usize {
        log::debug!("series {} tied 1-1, scheduling game {}", series.id, MAX_GAMES);
        plan.decisive_game = Some(series_game(series, MAX_GAMES, ids));
    } else if tally.played() == MAX_GAMES {
        // three games without a 2-win side cannot happen without a level score
        return Err(EngineError::SeriesOverflow(series.id));
    }

    Ok(plan)
}

/// Games to create or re-team once a series has been patched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NextSeriesGames {
    /// A slot is still open.
    Waiting,
    /// No games existed yet: create these.
    Create(Vec<GameMatch>),
    /// Placeholder games existed: store these updated copies.
    Patch(Vec<GameMatch>),
}

/// Decide what the series that just received a winner needs.
///
/// Once both slots are known, a series without games gets its opening pair; one that
/// already had placeholder games keeps them with the team references corrected, so
/// nothing is duplicated.
pub fn plan_next_series_games<G: IdGenerator>(
    next: &Series,
    existing: &[GameMatch],
    ids: &mut G,
) -> NextSeriesGames {
    if !next.slots_resolved() {
        return NextSeriesGames::Waiting;
    }
    if existing.is_empty() {
        return NextSeriesGames::Create(initial_games(next, ids));
    }
    let patched = existing
        .iter()
        .filter(|g| g.home_team != next.local || g.away_team != next.visitor)
        .map(|g| {
            let mut g = g.clone();
            g.home_team = next.local.clone();
            g.away_team = next.visitor.clone();
            g
        })
        .collect();
    NextSeriesGames::Patch(patched)
}
