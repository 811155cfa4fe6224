//! PaintRaid: paintball team companion core. Models, persistence with sample-data
//! fallback, roster/match/statistics logic and the arena map.

pub mod app_state;
pub mod arena;
pub mod config;
pub mod display;
pub mod logic;
pub mod models;
pub mod persistence;
pub mod sample;
pub mod store;

pub use app_state::{AppState, Tab};
pub use arena::{ArenaMap, GridPosition, Marker, MarkerKind, GRID_SIZE};
pub use config::{Config, ConfigError};
pub use logic::{
    add_match, add_player, add_team, create_match, filter_matches, leaderboard, record_match,
    remove_match, remove_player, remove_team, replace_match, replace_player, team_performance,
    top_performers, TeamPerformance, TopPerformers,
};
pub use models::{
    EventId, EventType, Match, MatchEvent, MatchId, MatchStatus, ModelError, Player, PlayerId,
    PlayerRole, PlayerStats, Position, Team, TeamColor, TeamId,
};
pub use persistence::{Persistence, MATCHES_KEY, TEAMS_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
