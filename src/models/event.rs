//! In-match events and their optional field position.

use crate::models::optional::present;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match event.
pub type EventId = Uuid;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Elimination,
    ObjectiveCapture,
    Resupply,
    TeamRevive,
    FlagPickup,
    FlagDrop,
}

impl EventType {
    /// Whether the event conventionally names a second player.
    pub fn takes_target(self) -> bool {
        matches!(self, EventType::Elimination | EventType::TeamRevive)
    }
}

/// A point on the field. Both coordinates are always present and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// `None` for NaN or infinite coordinates.
    pub fn new(x: f64, y: f64) -> Option<Self> {
        (x.is_finite() && y.is_finite()).then_some(Self { x, y })
    }

    /// Build from independently optional coordinates. Anything short of two
    /// finite values normalizes to no position.
    pub fn from_parts(x: Option<f64>, y: Option<f64>) -> Option<Self> {
        match (x, y) {
            (Some(x), Some(y)) => Self::new(x, y),
            _ => None,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Something that happened during a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventRecord", into = "EventRecord")]
pub struct MatchEvent {
    id: EventId,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    /// Acting player.
    pub player_id: PlayerId,
    pub target_player_id: Option<PlayerId>,
    pub position: Option<Position>,
}

impl MatchEvent {
    pub fn new(timestamp: DateTime<Utc>, event_type: EventType, player_id: PlayerId) -> Self {
        Self::with_id(Uuid::new_v4(), timestamp, event_type, player_id)
    }

    pub fn with_id(
        id: EventId,
        timestamp: DateTime<Utc>,
        event_type: EventType,
        player_id: PlayerId,
    ) -> Self {
        Self {
            id,
            timestamp,
            event_type,
            player_id,
            target_player_id: None,
            position: None,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn with_target(self, target: PlayerId) -> Self {
        Self {
            target_player_id: Some(target),
            ..self
        }
    }

    pub fn with_position(self, position: Position) -> Self {
        Self {
            position: Some(position),
            ..self
        }
    }

    /// Attach a position from loose coordinates; a half-specified point is dropped.
    pub fn with_position_parts(self, x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            position: Position::from_parts(x, y),
            ..self
        }
    }
}

/// On-disk shape: the position is flattened to optional `x`/`y` keys.
#[derive(Clone, Serialize, Deserialize)]
struct EventRecord {
    id: EventId,
    timestamp: DateTime<Utc>,
    event_type: EventType,
    player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    target_player_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    y: Option<f64>,
}

impl From<EventRecord> for MatchEvent {
    fn from(r: EventRecord) -> Self {
        if r.x.is_some() != r.y.is_some() {
            log::warn!("Event {} carries a partial position, dropping it", r.id);
        }
        Self {
            id: r.id,
            timestamp: r.timestamp,
            event_type: r.event_type,
            player_id: r.player_id,
            target_player_id: r.target_player_id,
            position: Position::from_parts(r.x, r.y),
        }
    }
}

impl From<MatchEvent> for EventRecord {
    fn from(e: MatchEvent) -> Self {
        Self {
            id: e.id,
            timestamp: e.timestamp,
            event_type: e.event_type,
            player_id: e.player_id,
            target_player_id: e.target_player_id,
            x: e.position.map(|p| p.x),
            y: e.position.map(|p| p.y),
        }
    }
}
