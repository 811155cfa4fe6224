//! Read-only aggregates over the roster and match history.

use crate::models::{Match, MatchStatus, Player, PlayerStats, Team, TeamId};
use serde::Serialize;

/// Players ordered by eliminations, highest first. Ties keep roster order.
/// With `team` set, only that team's roster is ranked (empty if unknown).
pub fn leaderboard(teams: &[Team], team: Option<TeamId>) -> Vec<Player> {
    let mut players: Vec<Player> = teams
        .iter()
        .filter(|t| team.map_or(true, |id| t.id() == id))
        .flat_map(|t| t.players.iter().cloned())
        .collect();
    players.sort_by(|a, b| b.stats.eliminations.cmp(&a.stats.eliminations));
    players
}

/// Summary card for one team.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamPerformance {
    pub team_id: TeamId,
    pub name: String,
    pub player_count: usize,
    /// Roster totals, widened so large counters cannot overflow.
    pub eliminations: u64,
    pub objective_captures: u64,
    pub completed_matches: usize,
    pub matches_won: usize,
    /// Percentage of completed matches won; 0 before any completed match.
    pub win_rate: f64,
    /// Nickname of the player with the most eliminations.
    pub mvp: Option<String>,
}

fn total(team: &Team, counter: impl Fn(&PlayerStats) -> u32) -> u64 {
    team.players.iter().map(|p| u64::from(counter(&p.stats))).sum()
}

pub fn team_performance(team: &Team, matches: &[Match]) -> TeamPerformance {
    let completed: Vec<&Match> = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed && m.participates(team.id()))
        .collect();
    let matches_won = completed
        .iter()
        .filter(|m| m.winner() == Some(team.id()))
        .count();
    let win_rate = if completed.is_empty() {
        0.0
    } else {
        matches_won as f64 / completed.len() as f64 * 100.0
    };
    // First maximum in roster order.
    let mvp = team
        .players
        .iter()
        .fold(None::<&Player>, |best, p| match best {
            Some(b) if b.stats.eliminations >= p.stats.eliminations => Some(b),
            _ => Some(p),
        })
        .map(|p| p.nickname.clone());

    TeamPerformance {
        team_id: team.id(),
        name: team.name.clone(),
        player_count: team.players.len(),
        eliminations: total(team, |s| s.eliminations),
        objective_captures: total(team, |s| s.objective_captures),
        completed_matches: completed.len(),
        matches_won,
        win_rate,
        mvp,
    }
}

/// One highlighted player and the value that earned the spot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Highlight {
    pub name: String,
    pub nickname: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TopPerformers {
    pub most_eliminations: Option<Highlight>,
    pub best_kd_ratio: Option<Highlight>,
    pub most_assists: Option<Highlight>,
    pub most_captures: Option<Highlight>,
}

fn best_by<F>(players: &[&Player], metric: F) -> Option<Highlight>
where
    F: Fn(&Player) -> f64,
{
    let mut best: Option<(&Player, f64)> = None;
    for &p in players {
        let v = metric(p);
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((p, v));
        }
    }
    best.map(|(p, value)| Highlight {
        name: p.name.clone(),
        nickname: p.nickname.clone(),
        value,
    })
}

pub fn top_performers(teams: &[Team]) -> TopPerformers {
    let players: Vec<&Player> = teams.iter().flat_map(|t| t.players.iter()).collect();
    TopPerformers {
        most_eliminations: best_by(&players, |p| f64::from(p.stats.eliminations)),
        best_kd_ratio: best_by(&players, |p| p.stats.kd_ratio()),
        most_assists: best_by(&players, |p| f64::from(p.stats.assists)),
        most_captures: best_by(&players, |p| f64::from(p.stats.objective_captures)),
    }
}
