//! Basketball league season engine: league calendars, cup and playoff brackets,
//! and best-of-three series advancement, persisted through a pluggable store.

pub mod config;
pub mod ids;
pub mod import;
pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use config::Config;
pub use ids::{IdGenerator, SeededIdGenerator, UuidGenerator};
pub use import::read_teams_csv;
pub use logic::{
    advance_cup_match, advance_series, build_bracket, generate_cup_bracket,
    generate_league_calendar, generate_playoff_bracket, plan_next_series_games, tally_games,
    validate_teams, BracketConfig, NextSeriesGames, SeriesAdvance, SlotFill,
};
pub use models::{
    Competition, CompetitionId, CompetitionStatus, CompetitionType, EngineError, FixtureStatus,
    GameMatch, MatchId, Round, RoundId, RoundPlan, Schedule, Score, Series, SeriesId, Side,
    TeamId, TeamRef,
};
pub use service::{CompetitionOverview, LeagueService};
pub use store::{FixtureStore, MatchPatch, MemoryStore, SeriesPatch};
