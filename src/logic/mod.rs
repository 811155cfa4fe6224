//! Collection logic: roster edits, match scheduling and statistics.

pub mod roster;
pub mod schedule;
pub mod stats;

pub use roster::{add_player, add_team, record_match, remove_player, remove_team, replace_player};
pub use schedule::{add_match, create_match, filter_matches, remove_match, replace_match};
pub use stats::{leaderboard, team_performance, top_performers, TeamPerformance, TopPerformers};
