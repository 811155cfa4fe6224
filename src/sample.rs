//! Deterministic seed data for first launch, decode fallback and tests.
//!
//! Identifiers are fixed constants, so two calls produce equal collections. Match
//! dates are offsets from the supplied `now`.

use crate::models::{Match, MatchStatus, Player, PlayerRole, PlayerStats, Team, TeamColor};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

const PLAYER_IDS: [u128; 5] = [
    0x5a18_9a00_0000_4000_8000_0000_0000_0001,
    0x5a18_9a00_0000_4000_8000_0000_0000_0002,
    0x5a18_9a00_0000_4000_8000_0000_0000_0003,
    0x5a18_9a00_0000_4000_8000_0000_0000_0004,
    0x5a18_9a00_0000_4000_8000_0000_0000_0005,
];
const TEAM_IDS: [u128; 2] = [
    0x5a18_9a00_0000_4000_8000_0000_0001_0001,
    0x5a18_9a00_0000_4000_8000_0000_0001_0002,
];
const MATCH_IDS: [u128; 3] = [
    0x5a18_9a00_0000_4000_8000_0000_0002_0001,
    0x5a18_9a00_0000_4000_8000_0000_0002_0002,
    0x5a18_9a00_0000_4000_8000_0000_0002_0003,
];

pub const DEEP_PURPLE: TeamColor = TeamColor::rgb(0x5A, 0x18, 0x9A);
pub const LIGHT_PURPLE: TeamColor = TeamColor::rgb(0xC7, 0x7D, 0xFF);

fn player(
    n: usize,
    name: &str,
    nickname: &str,
    role: PlayerRole,
    [eliminations, deaths, assists, objective_captures, matches_played, matches_won]: [u32; 6],
) -> Player {
    Player::with_id(Uuid::from_u128(PLAYER_IDS[n]), name, nickname, role).with_stats(PlayerStats {
        eliminations,
        deaths,
        assists,
        objective_captures,
        matches_played,
        matches_won,
    })
}

pub fn generate_players() -> Vec<Player> {
    vec![
        player(0, "Alex Johnson", "Quickshot", PlayerRole::Sniper, [42, 12, 8, 3, 10, 7]),
        player(1, "Sam Rivera", "Shadow", PlayerRole::Scout, [26, 18, 15, 12, 12, 8]),
        player(2, "Jordan Smith", "Tank", PlayerRole::Assault, [56, 23, 4, 2, 14, 9]),
        player(3, "Taylor Wong", "Doc", PlayerRole::Medic, [12, 15, 36, 5, 11, 7]),
        player(4, "Morgan Chen", "Commander", PlayerRole::Captain, [38, 16, 24, 9, 13, 10]),
    ]
}

/// Two teams: the first three sample players and the last two.
pub fn generate_teams() -> Vec<Team> {
    let mut players = generate_players();
    let second = players.split_off(3);
    vec![
        Team::with_id(
            Uuid::from_u128(TEAM_IDS[0]),
            "Purple Reign",
            DEEP_PURPLE,
            "bolt.circle.fill",
        )
        .with_players(players),
        Team::with_id(
            Uuid::from_u128(TEAM_IDS[1]),
            "Neon Strikers",
            LIGHT_PURPLE,
            "star.circle.fill",
        )
        .with_players(second),
    ]
}

/// Three matches between the sample teams: one completed a week before `now`,
/// one scheduled three days after, and one in progress at `now`.
pub fn generate_matches(now: DateTime<Utc>) -> Vec<Match> {
    let teams = generate_teams();
    let (a, b) = (teams[0].id(), teams[1].id());

    let completed = Match::with_id(
        Uuid::from_u128(MATCH_IDS[0]),
        now - Duration::days(7),
        teams.clone(),
        "Evergreen Arena",
        MatchStatus::Completed,
    )
    .with_duration(3600)
    .with_result_sanitized(Some(a), [(a, 12), (b, 8)]);

    let scheduled = Match::with_id(
        Uuid::from_u128(MATCH_IDS[1]),
        now + Duration::days(3),
        teams.clone(),
        "Urban Warfare Center",
        MatchStatus::Scheduled,
    )
    .with_result_sanitized(None, [(a, 0), (b, 0)]);

    let in_progress = Match::with_id(
        Uuid::from_u128(MATCH_IDS[2]),
        now,
        teams,
        "Woodland Arena",
        MatchStatus::InProgress,
    )
    .with_duration(1800)
    .with_result_sanitized(None, [(a, 5), (b, 7)]);

    vec![completed, scheduled, in_progress]
}
