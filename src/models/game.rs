//! Match record, MatchStatus, and the parallel-sequence score encoding.

use crate::models::error::ModelError;
use crate::models::event::MatchEvent;
use crate::models::optional::present;
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match. Transitions are made by users; the model records them
/// without enforcing [`MatchStatus::can_transition_to`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    /// Absorbing: reachable from every other status.
    Cancelled,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 4] = [
        MatchStatus::Scheduled,
        MatchStatus::InProgress,
        MatchStatus::Completed,
        MatchStatus::Cancelled,
    ];

    /// Completed and Cancelled have no outgoing transitions.
    pub fn is_final(self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Cancelled)
    }

    /// Scheduled -> InProgress -> Completed, and any non-final status -> Cancelled.
    pub fn can_transition_to(self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        matches!(
            (self, next),
            (Scheduled, InProgress) | (InProgress, Completed) | (Scheduled | InProgress, Cancelled)
        )
    }
}

/// A scheduled or played match between two or more teams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatchRecord", into = "MatchRecord")]
pub struct Match {
    id: MatchId,
    pub date: DateTime<Utc>,
    /// Participants; order only matters for display.
    teams: Vec<Team>,
    pub location: String,
    pub events: Vec<MatchEvent>,
    pub status: MatchStatus,
    /// Always one of `teams`.
    winner: Option<TeamId>,
    /// Keys are always a subset of `teams`; missing keys read as 0.
    score: BTreeMap<TeamId, u32>,
    pub duration_secs: u64,
}

impl Match {
    /// New match with no events, no winner, an empty score and zero duration.
    pub fn new(
        date: DateTime<Utc>,
        teams: Vec<Team>,
        location: impl Into<String>,
        status: MatchStatus,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), date, teams, location, status)
    }

    pub fn with_id(
        id: MatchId,
        date: DateTime<Utc>,
        teams: Vec<Team>,
        location: impl Into<String>,
        status: MatchStatus,
    ) -> Self {
        Self {
            id,
            date,
            teams,
            location: location.into(),
            events: Vec::new(),
            status,
            winner: None,
            score: BTreeMap::new(),
            duration_secs: 0,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id() == id)
    }

    pub fn participates(&self, id: TeamId) -> bool {
        self.team(id).is_some()
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    pub fn winning_team(&self) -> Option<&Team> {
        self.winner.and_then(|id| self.team(id))
    }

    /// Score for `team`, 0 when nothing was recorded.
    pub fn score_for(&self, team: TeamId) -> u32 {
        self.score.get(&team).copied().unwrap_or(0)
    }

    pub fn scores(&self) -> &BTreeMap<TeamId, u32> {
        &self.score
    }

    pub fn with_winner(self, team: TeamId) -> Result<Self, ModelError> {
        if !self.participates(team) {
            return Err(ModelError::WinnerNotParticipating(team));
        }
        Ok(Self {
            winner: Some(team),
            ..self
        })
    }

    pub fn without_winner(self) -> Self {
        Self {
            winner: None,
            ..self
        }
    }

    pub fn with_score(self, team: TeamId, points: u32) -> Result<Self, ModelError> {
        if !self.participates(team) {
            return Err(ModelError::ScoreForNonParticipant(team));
        }
        let mut score = self.score;
        score.insert(team, points);
        Ok(Self { score, ..self })
    }

    /// Score 0 for every participant that has no entry yet.
    pub fn with_zeroed_scores(self) -> Self {
        let mut score = self.score;
        for t in &self.teams {
            score.entry(t.id()).or_insert(0);
        }
        Self { score, ..self }
    }

    /// Set winner and scores, silently dropping any that name a non-participant.
    pub(crate) fn with_result_sanitized(
        self,
        winner: Option<TeamId>,
        score: impl IntoIterator<Item = (TeamId, u32)>,
    ) -> Self {
        let winner = winner.filter(|w| {
            let keep = self.participates(*w);
            if !keep {
                log::warn!("Match {}: dropping winner {} (not a participant)", self.id, w);
            }
            keep
        });
        let score = score
            .into_iter()
            .filter(|(key, _)| {
                let keep = self.participates(*key);
                if !keep {
                    log::warn!("Match {}: dropping score for non-participant {}", self.id, key);
                }
                keep
            })
            .collect();
        Self {
            winner,
            score,
            ..self
        }
    }

    pub fn with_status(self, status: MatchStatus) -> Self {
        Self { status, ..self }
    }

    pub fn with_event(self, event: MatchEvent) -> Self {
        let mut events = self.events;
        events.push(event);
        Self { events, ..self }
    }

    pub fn with_duration(self, duration_secs: u64) -> Self {
        Self {
            duration_secs,
            ..self
        }
    }
}

/// On-disk shape. The score map travels as two parallel sequences so that
/// identifier keys never depend on a format's map-key support.
#[derive(Clone, Serialize, Deserialize)]
struct MatchRecord {
    id: MatchId,
    date: DateTime<Utc>,
    teams: Vec<Team>,
    location: String,
    events: Vec<MatchEvent>,
    status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    winner: Option<TeamId>,
    score_keys: Vec<TeamId>,
    score_values: Vec<u32>,
    duration_secs: u64,
}

impl TryFrom<MatchRecord> for Match {
    type Error = ModelError;

    /// Mismatched or duplicated score entries are corrupt data. A winner or score
    /// key that names a non-participant is dropped.
    fn try_from(r: MatchRecord) -> Result<Self, Self::Error> {
        if r.score_keys.len() != r.score_values.len() {
            return Err(ModelError::ScoreLengthMismatch {
                keys: r.score_keys.len(),
                values: r.score_values.len(),
            });
        }
        let mut score = BTreeMap::new();
        for (key, value) in r.score_keys.iter().zip(&r.score_values) {
            if score.insert(*key, *value).is_some() {
                return Err(ModelError::DuplicateScoreKey(*key));
            }
        }
        let m = Self {
            id: r.id,
            date: r.date,
            teams: r.teams,
            location: r.location,
            events: r.events,
            status: r.status,
            winner: None,
            score: BTreeMap::new(),
            duration_secs: r.duration_secs,
        };
        Ok(m.with_result_sanitized(r.winner, score))
    }
}

impl From<Match> for MatchRecord {
    fn from(m: Match) -> Self {
        let (score_keys, score_values) = m.score.into_iter().unzip();
        Self {
            id: m.id,
            date: m.date,
            teams: m.teams,
            location: m.location,
            events: m.events,
            status: m.status,
            winner: m.winner,
            score_keys,
            score_values,
            duration_secs: m.duration_secs,
        }
    }
}
