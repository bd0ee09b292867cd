//! Shared single-elimination core used by both the cup and the playoffs.
//!
//! A bracket is built from abstract nodes carrying two team slots, a finished flag,
//! a winner and a reference to the node it feeds. The cup wraps each node in a
//! [`GameMatch`](crate::models::GameMatch), the playoffs in a [`Series`](crate::models::Series);
//! neither re-implements pairing or advancement.
//!
//! Seeding follows the usual "1 vs n, balance the halves" layout. For the default
//! 8-slot bracket this gives first-round pairings `(i, 7-i)` and feeds first-round
//! match `0` and `3` into semifinal `0`, `1` and `2` into semifinal `1`.

use crate::models::{EngineError, Side, TeamRef};

/// Default number of slots.
pub const DEFAULT_BRACKET_SIZE: usize = 8;

/// Largest accepted slot count.
pub const MAX_BRACKET_SIZE: usize = 64;

/// Bracket shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BracketConfig {
    /// Slot count: a power of two from 2 to [`MAX_BRACKET_SIZE`].
    pub size: usize,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRACKET_SIZE,
        }
    }
}

impl BracketConfig {
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if !(2..=MAX_BRACKET_SIZE).contains(&size) || !size.is_power_of_two() {
            return Err(EngineError::InvalidBracketSize(size));
        }
        Ok(Self { size })
    }

    /// Number of rounds, first round to final.
    pub fn rounds(&self) -> usize {
        self.size.trailing_zeros() as usize
    }

    /// Nodes in round `round` (0 = first round).
    pub fn nodes_in_round(&self, round: usize) -> usize {
        self.size >> (round + 1)
    }
}

/// One bracket position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BracketNode {
    pub local: TeamRef,
    pub visitor: TeamRef,
    pub finished: bool,
    /// Real team, or a bye when both sides were byes.
    pub winner: Option<TeamRef>,
    /// Index of the node fed in the following round; `None` for the final.
    pub next: Option<usize>,
}

impl BracketNode {
    fn open(next: Option<usize>) -> Self {
        Self {
            local: TeamRef::to_be_defined(),
            visitor: TeamRef::to_be_defined(),
            finished: false,
            winner: None,
            next,
        }
    }

    /// A pairing of two byes. Never turned into a fixture.
    pub fn is_void(&self) -> bool {
        self.local.is_bye() && self.visitor.is_bye()
    }

    pub fn is_walkover(&self) -> bool {
        self.local.is_bye() || self.visitor.is_bye()
    }

    pub fn slots_resolved(&self) -> bool {
        self.local.is_defined() && self.visitor.is_defined()
    }
}

/// Nodes per round, first round first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bracket {
    pub config: BracketConfig,
    pub rounds: Vec<Vec<BracketNode>>,
}

/// Seeds (0-based) in bracket order, e.g. `[0, 7, 3, 4, 1, 6, 2, 5]` for 8.
pub fn seed_order(size: usize) -> Vec<usize> {
    let mut order = vec![0];
    while order.len() < size {
        let width = order.len() * 2;
        order = order
            .iter()
            .flat_map(|&seed| [seed, width - 1 - seed])
            .collect();
    }
    order
}

/// First-round pairings by seed: match `i` is seed `i` against seed `size-1-i`.
pub fn first_round_pairings(size: usize) -> Vec<(usize, usize)> {
    (0..size / 2).map(|i| (i, size - 1 - i)).collect()
}

/// Second-round node fed by each first-round match.
pub fn first_round_feeds(size: usize) -> Vec<usize> {
    let order = seed_order(size);
    (0..size / 2)
        .map(|seed| {
            let position = order.iter().position(|&s| s == seed).unwrap_or(0);
            position / 4
        })
        .collect()
}

/// Display name for a round given how many teams enter it.
pub fn round_name(teams_in_round: usize) -> String {
    match teams_in_round {
        2 => "Final".to_string(),
        4 => "Semifinal".to_string(),
        8 => "Quarterfinal".to_string(),
        n => format!("Round of {}", n),
    }
}

/// Put `team` into the first open slot: local if still undefined, else visitor.
///
/// Re-delivering a team that already holds one of the slots is a no-op, so a repeated
/// advancement cannot consume the sibling's slot.
pub fn fill_first_open(
    local: &mut TeamRef,
    visitor: &mut TeamRef,
    team: TeamRef,
) -> Option<Side> {
    if team.is_real() {
        if local.id == team.id {
            return Some(Side::Home);
        }
        if visitor.id == team.id {
            return Some(Side::Away);
        }
    }
    if !local.is_defined() {
        *local = team;
        Some(Side::Home)
    } else if !visitor.is_defined() {
        *visitor = team;
        Some(Side::Away)
    } else {
        None
    }
}

/// Lay out the bracket for seed-ordered `seeds`, pad with byes, and resolve every
/// pairing that involves a bye, carrying its winner forward round by round.
pub fn build_bracket(seeds: &[TeamRef], config: BracketConfig) -> Result<Bracket, EngineError> {
    let config = BracketConfig::new(config.size)?;
    if seeds.len() > config.size {
        return Err(EngineError::TooManyTeams {
            capacity: config.size,
            found: seeds.len(),
        });
    }

    let padded: Vec<TeamRef> = seeds
        .iter()
        .cloned()
        .chain(std::iter::repeat_with(TeamRef::bye))
        .take(config.size)
        .collect();

    let round_count = config.rounds();
    let feeds = first_round_feeds(config.size);
    let mut rounds: Vec<Vec<BracketNode>> = Vec::with_capacity(round_count);

    let first = first_round_pairings(config.size)
        .into_iter()
        .enumerate()
        .map(|(i, (top, bottom))| BracketNode {
            local: padded[top].clone(),
            visitor: padded[bottom].clone(),
            finished: false,
            winner: None,
            next: (round_count > 1).then(|| feeds[i]),
        })
        .collect();
    rounds.push(first);

    for r in 1..round_count {
        let next_exists = r + 1 < round_count;
        rounds.push(
            (0..config.nodes_in_round(r))
                .map(|j| BracketNode::open(next_exists.then_some(j / 2)))
                .collect(),
        );
    }

    for r in 0..round_count {
        for i in 0..rounds[r].len() {
            let node = &mut rounds[r][i];
            if !node.slots_resolved() || !node.is_walkover() {
                continue;
            }
            let winner = if node.local.is_bye() {
                node.visitor.clone()
            } else {
                node.local.clone()
            };
            node.finished = true;
            node.winner = Some(winner.clone());
            if let Some(next) = node.next {
                let target = &mut rounds[r + 1][next];
                fill_first_open(&mut target.local, &mut target.visitor, winner);
            }
        }
    }

    log::debug!(
        "bracket of {} for {} teams: {} walkovers",
        config.size,
        seeds.len(),
        rounds.iter().flatten().filter(|n| n.finished).count()
    );

    Ok(Bracket { config, rounds })
}
