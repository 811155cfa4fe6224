//! Data structures for PaintRaid: players, teams, matches and match events.

mod color;
mod error;
mod event;
mod game;
mod optional;
mod player;
mod team;

pub use color::TeamColor;
pub use error::ModelError;
pub use event::{EventId, EventType, MatchEvent, Position};
pub use game::{Match, MatchId, MatchStatus};
pub use player::{Player, PlayerId, PlayerRole, PlayerStats, DEFAULT_AVATAR};
pub use team::{Team, TeamId, DEFAULT_TEAM_ICON};
