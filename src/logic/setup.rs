//! Setup checks run on a team list before any generator sees it.

use crate::models::{EngineError, TeamRef};
use std::collections::HashSet;

/// Fewest teams any format accepts.
pub const MIN_TEAMS: usize = 2;

/// Reject lists that no generator can schedule: fewer than two teams, more than
/// `capacity` (when given), repeated ids, or ids that collide with a sentinel.
pub fn validate_teams(teams: &[TeamRef], capacity: Option<usize>) -> Result<(), EngineError> {
    if teams.len() < MIN_TEAMS {
        return Err(EngineError::NotEnoughTeams {
            required: MIN_TEAMS,
            found: teams.len(),
        });
    }
    if let Some(capacity) = capacity {
        if teams.len() > capacity {
            return Err(EngineError::TooManyTeams {
                capacity,
                found: teams.len(),
            });
        }
    }
    let mut seen = HashSet::new();
    for team in teams {
        if TeamRef::is_reserved_id(&team.id) {
            return Err(EngineError::ReservedTeamId(team.id.clone()));
        }
        if !seen.insert(team.id.as_str()) {
            return Err(EngineError::DuplicateTeam(team.id.clone()));
        }
    }
    Ok(())
}
