//! Match scheduling: creating matches from the roster and replacing them in the
//! match collection.

use crate::models::{Match, MatchId, MatchStatus, ModelError, Team, TeamId};
use chrono::{DateTime, Utc};

/// Build a match between the teams named by `team_ids`, each starting on 0 points.
///
/// Needs at least two distinct teams from `teams` and a non-blank location.
pub fn create_match(
    teams: &[Team],
    team_ids: &[TeamId],
    date: DateTime<Utc>,
    location: &str,
    status: MatchStatus,
) -> Result<Match, ModelError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(ModelError::EmptyLocation);
    }
    let mut participants: Vec<Team> = Vec::with_capacity(team_ids.len());
    for &id in team_ids {
        if participants.iter().any(|t| t.id() == id) {
            continue;
        }
        let team = teams
            .iter()
            .find(|t| t.id() == id)
            .ok_or(ModelError::TeamNotFound(id))?;
        participants.push(team.clone());
    }
    if participants.len() < 2 {
        return Err(ModelError::NotEnoughTeams(participants.len()));
    }
    Ok(Match::new(date, participants, location, status).with_zeroed_scores())
}

pub fn add_match(matches: &[Match], m: Match) -> Vec<Match> {
    log::info!("Adding match {} at {}", m.id(), m.location);
    let mut next = matches.to_vec();
    next.push(m);
    next
}

/// Replace the match with the same id as `m`.
pub fn replace_match(matches: &[Match], m: Match) -> Result<Vec<Match>, ModelError> {
    let idx = matches
        .iter()
        .position(|x| x.id() == m.id())
        .ok_or(ModelError::MatchNotFound(m.id()))?;
    let mut next = matches.to_vec();
    next[idx] = m;
    Ok(next)
}

pub fn remove_match(matches: &[Match], id: MatchId) -> Result<Vec<Match>, ModelError> {
    if !matches.iter().any(|m| m.id() == id) {
        return Err(ModelError::MatchNotFound(id));
    }
    Ok(matches.iter().filter(|m| m.id() != id).cloned().collect())
}

/// Matches with the given status (all when `None`), newest first.
pub fn filter_matches(matches: &[Match], status: Option<MatchStatus>) -> Vec<Match> {
    let mut out: Vec<Match> = matches
        .iter()
        .filter(|m| status.map_or(true, |s| m.status == s))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 14, 0, 0).unwrap()
    }

    #[test]
    fn create_match_zeroes_every_score() {
        let teams = sample::generate_teams();
        let ids = [teams[0].id(), teams[1].id()];
        let m = create_match(&teams, &ids, now(), "  Evergreen Arena ", MatchStatus::Scheduled)
            .unwrap();
        assert_eq!(m.location, "Evergreen Arena");
        assert_eq!(m.teams().len(), 2);
        assert_eq!(m.scores().len(), 2);
        assert!(m.scores().values().all(|s| *s == 0));
        assert_eq!(m.winner(), None);
    }

    #[test]
    fn create_match_validates_input() {
        let teams = sample::generate_teams();
        let a = teams[0].id();
        assert_eq!(
            create_match(&teams, &[a, a], now(), "Arena", MatchStatus::Scheduled),
            Err(ModelError::NotEnoughTeams(1))
        );
        assert_eq!(
            create_match(&teams, &[a, teams[1].id()], now(), "   ", MatchStatus::Scheduled),
            Err(ModelError::EmptyLocation)
        );
        let ghost = uuid::Uuid::new_v4();
        assert_eq!(
            create_match(&teams, &[a, ghost], now(), "Arena", MatchStatus::Scheduled),
            Err(ModelError::TeamNotFound(ghost))
        );
    }

    #[test]
    fn replace_match_by_id() {
        let matches = sample::generate_matches(now());
        let edited = matches[1].clone().with_status(MatchStatus::Cancelled);
        let next = replace_match(&matches, edited).unwrap();
        assert_eq!(next[1].status, MatchStatus::Cancelled);
        assert_eq!(matches[1].status, MatchStatus::Scheduled);

        let stranger = Match::new(now(), Vec::new(), "Nowhere", MatchStatus::Scheduled);
        assert_eq!(
            replace_match(&matches, stranger.clone()),
            Err(ModelError::MatchNotFound(stranger.id()))
        );
    }

    #[test]
    fn remove_match_by_id() {
        let matches = sample::generate_matches(now());
        let next = remove_match(&matches, matches[0].id()).unwrap();
        assert_eq!(next.len(), 2);
        assert!(remove_match(&next, matches[0].id()).is_err());
    }

    #[test]
    fn filter_sorts_newest_first() {
        let matches = sample::generate_matches(now());
        let all = filter_matches(&matches, None);
        assert_eq!(all[0].date, now() + Duration::days(3));
        assert_eq!(all[2].date, now() - Duration::days(7));

        let done = filter_matches(&matches, Some(MatchStatus::Completed));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].location, "Evergreen Arena");
        assert!(filter_matches(&matches, Some(MatchStatus::Cancelled)).is_empty());
    }
}
