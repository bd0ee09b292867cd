//! Scheduling and advancement: league calendars, cup and playoff brackets, series.

mod advancement;
mod bracket;
mod knockout;
mod playoff;
mod progress;
mod round_robin;
mod setup;

pub use advancement::{
    advance_series, plan_next_series_games, tally_games, NextSeriesGames, SeriesAdvance,
    SeriesTally,
};
pub use bracket::{
    build_bracket, fill_first_open, first_round_feeds, first_round_pairings, round_name,
    seed_order, Bracket, BracketConfig, BracketNode, DEFAULT_BRACKET_SIZE, MAX_BRACKET_SIZE,
};
pub use knockout::{advance_cup_match, generate_cup_bracket, SlotFill};
pub use playoff::{generate_playoff_bracket, initial_games, series_game, INITIAL_GAMES};
pub use progress::{competition_complete, derive_round_status};
pub use round_robin::generate_league_calendar;
pub use setup::{validate_teams, MIN_TEAMS};
