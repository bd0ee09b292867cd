//! Integration tests for the league service: creation, result reporting and advancement
//! against the in-memory store.

use hoops_league::{
    read_teams_csv, CompetitionId, CompetitionStatus, CompetitionType, EngineError,
    FixtureStatus, FixtureStore, GameMatch, LeagueService, MatchPatch, MemoryStore, Score,
    SeededIdGenerator, Series, TeamRef,
};
use uuid::Uuid;

type Service = LeagueService<MemoryStore, SeededIdGenerator>;

fn service() -> Service {
    LeagueService::new(MemoryStore::new(), SeededIdGenerator::new(99))
}

fn teams(n: usize) -> Vec<TeamRef> {
    (1..=n).map(|i| TeamRef::new(format!("eq{i}"), format!("Eq {i}"), "")).collect()
}

/// Games of `round_index` belonging to the series at `series_index`.
fn series_games(svc: &Service, id: CompetitionId, round_index: usize, series_index: usize) -> Vec<GameMatch> {
    let overview = svc.competition_overview(id).unwrap();
    let series_id = overview.rounds[round_index].series[series_index].id;
    svc.store().list_matches_by_series(series_id).unwrap()
}

/// Local team wins every game it plays in the series, 2-0.
fn sweep_for_local(svc: &mut Service, id: CompetitionId, round_index: usize, series_index: usize) {
    for g in series_games(svc, id, round_index, series_index).into_iter().take(2) {
        svc.report_result(g.id, Score::new(90, 80)).unwrap();
    }
}

#[test]
fn create_rejects_bad_team_lists() {
    let mut svc = service();
    assert!(matches!(
        svc.create_competition("Solo", CompetitionType::League, &teams(1)),
        Err(EngineError::NotEnoughTeams { .. })
    ));
    assert!(matches!(
        svc.create_competition("Big cup", CompetitionType::Cup, &teams(9)),
        Err(EngineError::TooManyTeams { .. })
    ));
    assert!(svc.store().competitions().is_empty());
}

#[test]
fn league_finishes_when_every_round_is_played() {
    let mut svc = service();
    let c = svc.create_competition("Liga", CompetitionType::League, &teams(3)).unwrap();
    let overview = svc.competition_overview(c.id).unwrap();
    assert_eq!(overview.rounds.len(), 6);

    let playable: Vec<_> = overview
        .rounds
        .iter()
        .flat_map(|r| r.matches.iter())
        .filter(|m| !m.is_walkover())
        .map(|m| m.id)
        .collect();
    assert_eq!(playable.len(), 6);

    let (last, rest) = playable.split_last().unwrap();
    for id in rest {
        svc.report_result(*id, Score::new(70, 64)).unwrap();
    }
    assert_eq!(svc.store().get_competition(c.id).unwrap().status, CompetitionStatus::InProgress);
    svc.report_result(*last, Score::new(70, 64)).unwrap();

    let overview = svc.competition_overview(c.id).unwrap();
    assert_eq!(overview.competition.status, CompetitionStatus::Finished);
    assert!(overview.rounds.iter().all(|r| r.round.status == FixtureStatus::Finished));
}

#[test]
fn results_are_validated() {
    let mut svc = service();
    let c = svc.create_competition("Liga", CompetitionType::League, &teams(4)).unwrap();
    let m = svc.competition_overview(c.id).unwrap().rounds[0].matches[0].clone();
    assert_eq!(svc.report_result(m.id, Score::new(70, 70)), Err(EngineError::InvalidResult));
    svc.report_result(m.id, Score::new(71, 70)).unwrap();
    assert_eq!(
        svc.report_result(m.id, Score::new(71, 70)),
        Err(EngineError::AlreadyFinished(m.id))
    );
    let round = svc.competition_overview(c.id).unwrap().rounds[0].round.clone();
    assert_eq!(round.status, FixtureStatus::InProgress);
}

#[test]
fn cup_winners_climb_to_the_final() {
    let mut svc = service();
    let c = svc.create_competition("Copa", CompetitionType::Cup, &teams(8)).unwrap();
    let overview = svc.competition_overview(c.id).unwrap();

    let semi = overview.rounds[1].matches[0].id;
    assert_eq!(
        svc.report_result(semi, Score::new(1, 0)),
        Err(EngineError::TeamsNotResolved(semi))
    );

    // eq1 and eq5 (upset over eq4) feed semifinal 0
    for m in &overview.rounds[0].matches {
        let score = if m.home_team.id == "eq4" { Score::new(60, 75) } else { Score::new(80, 60) };
        svc.report_result(m.id, score).unwrap();
    }
    let overview = svc.competition_overview(c.id).unwrap();
    assert_eq!(overview.rounds[0].round.status, FixtureStatus::Finished);
    let semis = &overview.rounds[1].matches;
    assert_eq!((semis[0].home_team.id.as_str(), semis[0].away_team.id.as_str()), ("eq1", "eq5"));
    assert_eq!((semis[1].home_team.id.as_str(), semis[1].away_team.id.as_str()), ("eq2", "eq3"));

    for m in semis.clone() {
        svc.report_result(m.id, Score::new(50, 49)).unwrap();
    }
    let fin = svc.competition_overview(c.id).unwrap().rounds[2].matches[0].clone();
    assert_eq!((fin.home_team.id.as_str(), fin.away_team.id.as_str()), ("eq1", "eq2"));
    svc.report_result(fin.id, Score::new(88, 90)).unwrap();
    assert_eq!(svc.store().get_competition(c.id).unwrap().status, CompetitionStatus::Finished);
}

#[test]
fn split_series_gets_a_single_third_game() {
    let mut svc = service();
    let c = svc.create_competition("Playoffs", CompetitionType::Playoff, &teams(8)).unwrap();
    let games = series_games(&svc, c.id, 0, 0);
    assert_eq!(games.len(), 2);

    svc.report_result(games[0].id, Score::new(80, 70)).unwrap();
    svc.report_result(games[1].id, Score::new(70, 80)).unwrap();

    let games = series_games(&svc, c.id, 0, 0);
    assert_eq!(games.len(), 3);
    let third = &games[2];
    assert_eq!(third.game_number, Some(3));
    assert_eq!(third.status, FixtureStatus::Pending);
    assert_eq!((third.home_team.id.as_str(), third.away_team.id.as_str()), ("eq1", "eq8"));

    let series = svc.competition_overview(c.id).unwrap().rounds[0].series[0].clone();
    assert_eq!(series.status, FixtureStatus::InProgress);
    assert_eq!((series.games_won_local, series.games_won_visitor, series.games_played), (1, 1, 2));

    svc.report_result(third.id, Score::new(60, 66)).unwrap();
    let overview = svc.competition_overview(c.id).unwrap();
    let series = &overview.rounds[0].series[0];
    assert_eq!(series.status, FixtureStatus::Finished);
    assert_eq!(series.winner_id.as_deref(), Some("eq8"));
    assert_eq!(overview.rounds[1].series[0].local.id, "eq8");
}

#[test]
fn sweep_fills_next_slot_and_removes_unplayed_game() {
    let mut svc = service();
    let c = svc.create_competition("Playoffs", CompetitionType::Playoff, &teams(8)).unwrap();
    let games = series_games(&svc, c.id, 0, 0);

    // leave a provisional game behind, as an early third game would be
    let mut provisional = games[0].clone();
    provisional.id = Uuid::new_v4();
    provisional.game_number = Some(3);
    svc.store_mut().create_match(provisional.clone()).unwrap();

    sweep_for_local(&mut svc, c.id, 0, 0);

    let overview = svc.competition_overview(c.id).unwrap();
    let series = &overview.rounds[0].series[0];
    assert_eq!(series.status, FixtureStatus::Finished);
    assert_eq!(series.winner_id.as_deref(), Some("eq1"));
    assert_eq!(series.games_played, 2);
    assert_eq!(
        svc.store().get_match(provisional.id),
        Err(EngineError::MatchNotFound(provisional.id))
    );
    let semi = &overview.rounds[1].series[0];
    assert_eq!(semi.local.id, "eq1");
    assert!(!semi.visitor.is_defined());
    assert!(series_games(&svc, c.id, 1, 0).is_empty());
}

#[test]
fn semifinal_games_appear_once_both_feeders_finish() {
    let mut svc = service();
    let c = svc.create_competition("Playoffs", CompetitionType::Playoff, &teams(8)).unwrap();

    sweep_for_local(&mut svc, c.id, 0, 0);
    sweep_for_local(&mut svc, c.id, 0, 3);

    let overview = svc.competition_overview(c.id).unwrap();
    let semi = &overview.rounds[1].series[0];
    assert_eq!((semi.local.id.as_str(), semi.visitor.id.as_str()), ("eq1", "eq4"));
    let games = series_games(&svc, c.id, 1, 0);
    assert_eq!(games.len(), 2);
    assert!(games.iter().all(|g| g.home_team.id == "eq1" && g.away_team.id == "eq4"));
    assert!(games.iter().all(|g| g.round_id == semi.round_id));
}

#[test]
fn placeholder_games_are_re_teamed() {
    let mut svc = service();
    let c = svc.create_competition("Playoffs", CompetitionType::Playoff, &teams(8)).unwrap();
    let semi = svc.competition_overview(c.id).unwrap().rounds[1].series[0].clone();
    let mut ids = SeededIdGenerator::new(5);
    for g in hoops_league::logic::initial_games(&semi, &mut ids) {
        svc.store_mut().create_match(g).unwrap();
    }

    sweep_for_local(&mut svc, c.id, 0, 0);
    sweep_for_local(&mut svc, c.id, 0, 3);

    let games = series_games(&svc, c.id, 1, 0);
    assert_eq!(games.len(), 2);
    assert!(games.iter().all(|g| g.home_team.id == "eq1" && g.away_team.id == "eq4"));
}

#[test]
fn playoff_champion_finishes_the_competition() {
    let mut svc = service();
    let c = svc.create_competition("Playoffs", CompetitionType::Playoff, &teams(8)).unwrap();
    for s in 0..4 {
        sweep_for_local(&mut svc, c.id, 0, s);
    }
    for s in 0..2 {
        sweep_for_local(&mut svc, c.id, 1, s);
    }
    let fin = svc.competition_overview(c.id).unwrap().rounds[2].series[0].clone();
    assert_eq!((fin.local.id.as_str(), fin.visitor.id.as_str()), ("eq1", "eq2"));
    sweep_for_local(&mut svc, c.id, 2, 0);

    let overview = svc.competition_overview(c.id).unwrap();
    assert_eq!(overview.rounds[2].series[0].winner_id.as_deref(), Some("eq1"));
    assert_eq!(overview.competition.status, CompetitionStatus::Finished);
}

#[test]
fn overview_serializes_with_snake_case_enums() {
    let mut svc = service();
    let csv = "id,name,crest_url\na,Alpha,\nb,Beta,\n";
    let teams = read_teams_csv(csv.as_bytes()).unwrap();
    let c = svc.create_competition("Mini", CompetitionType::Cup, &teams).unwrap();
    let json = serde_json::to_value(svc.competition_overview(c.id).unwrap()).unwrap();
    assert_eq!(json["competition"]["competition_type"], "cup");
    assert_eq!(json["rounds"][2]["matches"][0]["status"], "pending");
    assert_eq!(json["rounds"][2]["matches"][0]["home_team"]["id"], "a");
}

#[test]
fn missing_next_series_aborts_without_writing() {
    let mut svc = service();
    let c = svc.create_competition("Playoffs", CompetitionType::Playoff, &teams(8)).unwrap();
    let round_id = svc.competition_overview(c.id).unwrap().rounds[0].round.id;

    let missing = Uuid::new_v4();
    let mut orphan = Series::new(
        Uuid::new_v4(),
        c.id,
        round_id,
        TeamRef::new("x", "X", ""),
        TeamRef::new("y", "Y", ""),
    );
    orphan.next_series_id = Some(missing);
    let mut ids = SeededIdGenerator::new(3);
    let games = hoops_league::logic::initial_games(&orphan, &mut ids);
    svc.store_mut().create_series(orphan.clone()).unwrap();
    for g in &games {
        svc.store_mut().create_match(g.clone()).unwrap();
    }

    assert_eq!(
        svc.report_result(games[0].id, Score::new(80, 70)),
        Err(EngineError::SeriesNotFound(missing))
    );
    assert!(!svc.store().get_match(games[0].id).unwrap().is_finished());
    let stored = svc.store().get_series(orphan.id).unwrap();
    assert_eq!((stored.games_played, stored.status), (0, FixtureStatus::Pending));
}

#[test]
fn full_next_cup_match_rejects_result_before_writing() {
    let mut svc = service();
    let c = svc.create_competition("Copa", CompetitionType::Cup, &teams(8)).unwrap();
    let overview = svc.competition_overview(c.id).unwrap();
    let qf = overview.rounds[0].matches[0].clone();
    let semi = overview.rounds[1].matches[0].id;
    svc.store_mut()
        .update_match(semi, MatchPatch::teams(TeamRef::new("x", "X", ""), TeamRef::new("y", "Y", "")))
        .unwrap();

    assert_eq!(
        svc.report_result(qf.id, Score::new(80, 70)),
        Err(EngineError::NoOpenSlot(semi))
    );
    let stored = svc.store().get_match(qf.id).unwrap();
    assert!(!stored.is_finished());
    assert!(stored.result.is_none());
}

#[test]
fn full_next_series_rejects_clinching_game_before_writing() {
    let mut svc = service();
    let c = svc.create_competition("Playoffs", CompetitionType::Playoff, &teams(8)).unwrap();
    let semi = svc.competition_overview(c.id).unwrap().rounds[1].series[0].id;
    svc.store_mut().fill_open_series_slot(semi, TeamRef::new("x", "X", "")).unwrap();
    svc.store_mut().fill_open_series_slot(semi, TeamRef::new("y", "Y", "")).unwrap();

    let games = series_games(&svc, c.id, 0, 0);
    svc.report_result(games[0].id, Score::new(80, 70)).unwrap();
    assert_eq!(
        svc.report_result(games[1].id, Score::new(80, 70)),
        Err(EngineError::NoOpenSlot(semi))
    );

    assert!(!svc.store().get_match(games[1].id).unwrap().is_finished());
    let series = svc.competition_overview(c.id).unwrap().rounds[0].series[0].clone();
    assert_eq!(series.games_played, 1);
    assert_eq!(series.status, FixtureStatus::InProgress);
    assert!(series.winner_id.is_none());
}
