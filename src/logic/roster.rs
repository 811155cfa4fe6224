//! Roster changes. Each operation takes the current team collection and returns
//! a replacement collection; the input is never modified.

use crate::models::{Match, ModelError, Player, PlayerId, Team, TeamId};

fn position(teams: &[Team], team_id: TeamId) -> Result<usize, ModelError> {
    teams
        .iter()
        .position(|t| t.id() == team_id)
        .ok_or(ModelError::TeamNotFound(team_id))
}

/// Replace the team at `team_id` with `update(team)`.
fn update_team<F>(teams: &[Team], team_id: TeamId, update: F) -> Result<Vec<Team>, ModelError>
where
    F: FnOnce(Team) -> Result<Team, ModelError>,
{
    let idx = position(teams, team_id)?;
    let mut next = teams.to_vec();
    next[idx] = update(teams[idx].clone())?;
    Ok(next)
}

pub fn add_team(teams: &[Team], team: Team) -> Vec<Team> {
    log::info!("Adding team {}", team.name);
    let mut next = teams.to_vec();
    next.push(team);
    next
}

pub fn remove_team(teams: &[Team], team_id: TeamId) -> Result<Vec<Team>, ModelError> {
    position(teams, team_id)?;
    Ok(teams.iter().filter(|t| t.id() != team_id).cloned().collect())
}

/// Append `player` to the roster of `team_id`.
pub fn add_player(
    teams: &[Team],
    team_id: TeamId,
    player: Player,
) -> Result<Vec<Team>, ModelError> {
    update_team(teams, team_id, |t| {
        log::info!("Adding player {} to team {}", player.name, t.name);
        t.with_player(player)
    })
}

/// Swap in an edited player, matched by id, keeping roster order.
pub fn replace_player(
    teams: &[Team],
    team_id: TeamId,
    player: Player,
) -> Result<Vec<Team>, ModelError> {
    update_team(teams, team_id, |t| t.with_player_replaced(player))
}

pub fn remove_player(
    teams: &[Team],
    team_id: TeamId,
    player_id: PlayerId,
) -> Result<Vec<Team>, ModelError> {
    update_team(teams, team_id, |t| t.without_player(player_id))
}

/// Add `m` to the history of every team in `teams` that takes part in it.
/// Teams not in the collection are ignored.
pub fn record_match(teams: &[Team], m: &Match) -> Vec<Team> {
    teams
        .iter()
        .cloned()
        .map(|t| {
            if m.participates(t.id()) {
                t.with_match_recorded(m.id())
            } else {
                t
            }
        })
        .collect()
}

/// Find a player anywhere in the collection, with the team that holds them.
pub fn find_player(teams: &[Team], player_id: PlayerId) -> Option<(&Team, &Player)> {
    teams
        .iter()
        .find_map(|t| t.player(player_id).map(|p| (t, p)))
}
