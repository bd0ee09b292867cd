//! Integration tests for the league calendar: round counts, pairings and leg symmetry.

use hoops_league::{
    generate_league_calendar, EngineError, FixtureStatus, Schedule, SeededIdGenerator, TeamRef,
};
use std::collections::HashSet;
use uuid::Uuid;

fn teams(n: usize) -> Vec<TeamRef> {
    (1..=n).map(|i| TeamRef::new(format!("t{i}"), format!("Team {i}"), "")).collect()
}

fn calendar(n: usize) -> Schedule {
    let mut ids = SeededIdGenerator::new(n as u64);
    generate_league_calendar(Uuid::nil(), &teams(n), &mut ids).unwrap()
}

fn pair_key(a: &TeamRef, b: &TeamRef) -> (String, String) {
    if a.id < b.id {
        (a.id.clone(), b.id.clone())
    } else {
        (b.id.clone(), a.id.clone())
    }
}

#[test]
fn rejects_fewer_than_two_teams() {
    let mut ids = SeededIdGenerator::new(1);
    assert!(matches!(
        generate_league_calendar(Uuid::nil(), &teams(1), &mut ids),
        Err(EngineError::NotEnoughTeams { .. })
    ));
}

#[test]
fn round_count_is_twice_padded_size_minus_one() {
    for n in 2..=11 {
        let m = n + n % 2;
        let schedule = calendar(n);
        assert_eq!(schedule.rounds.len(), 2 * (m - 1), "n = {n}");
        for (i, plan) in schedule.rounds.iter().enumerate() {
            assert_eq!(plan.round.number, i as u32 + 1);
            assert_eq!(plan.matches.len(), m / 2);
            assert!(plan.matches.iter().all(|x| x.round_id == plan.round.id));
        }
    }
}

#[test]
fn no_pair_repeats_within_a_leg_and_everyone_meets() {
    for n in 2..=11 {
        let schedule = calendar(n);
        let legs = schedule.rounds.len() / 2;
        for leg in schedule.rounds.chunks(legs) {
            let mut seen = HashSet::new();
            for m in leg.iter().flat_map(|p| p.matches.iter()).filter(|m| !m.is_walkover()) {
                assert!(seen.insert(pair_key(&m.home_team, &m.away_team)), "n = {n}");
            }
            assert_eq!(seen.len(), n * (n - 1) / 2, "n = {n}");
        }
    }
}

#[test]
fn second_leg_mirrors_first_leg_round_for_round() {
    for n in [2, 5, 6, 9] {
        let schedule = calendar(n);
        let r = schedule.rounds.len() / 2;
        for i in 0..r {
            let first = &schedule.rounds[i].matches;
            let second = &schedule.rounds[i + r].matches;
            assert_eq!(first.len(), second.len());
            for (a, b) in first.iter().zip(second) {
                assert_eq!(a.home_team, b.away_team);
                assert_eq!(a.away_team, b.home_team);
            }
        }
    }
}

#[test]
fn five_teams_get_one_pre_finished_bye_per_round() {
    let schedule = calendar(5);
    assert_eq!(schedule.rounds.len(), 10);
    for plan in &schedule.rounds {
        let byes: Vec<_> = plan.matches.iter().filter(|m| m.is_walkover()).collect();
        assert_eq!(byes.len(), 1);
        assert_eq!(byes[0].status, FixtureStatus::Finished);
        assert!(byes[0].result.is_none());
        let others = plan.matches.iter().filter(|m| !m.is_walkover());
        assert!(others.into_iter().all(|m| m.status == FixtureStatus::Pending));
    }
}

#[test]
fn each_team_plays_once_per_round() {
    let schedule = calendar(8);
    for plan in &schedule.rounds {
        let mut seen = HashSet::new();
        for m in &plan.matches {
            assert!(seen.insert(m.home_team.id.clone()));
            assert!(seen.insert(m.away_team.id.clone()));
        }
        assert_eq!(seen.len(), 8);
    }
}

#[test]
fn same_input_and_seed_give_same_calendar() {
    assert_eq!(calendar(7), calendar(7));
}
