//! Presentation metadata for the closed enumerations: labels, icon tags and
//! colours. Kept apart from the records so the persisted model carries none of it.

use crate::app_state::Tab;
use crate::arena::MarkerKind;
use crate::models::{EventType, MatchStatus, PlayerRole, TeamColor};

pub fn role_label(role: PlayerRole) -> &'static str {
    match role {
        PlayerRole::Sniper => "Sniper",
        PlayerRole::Scout => "Scout",
        PlayerRole::Support => "Support",
        PlayerRole::Assault => "Assault",
        PlayerRole::Medic => "Medic",
        PlayerRole::Captain => "Captain",
    }
}

pub fn role_icon(role: PlayerRole) -> &'static str {
    match role {
        PlayerRole::Sniper => "scope",
        PlayerRole::Scout => "binoculars",
        PlayerRole::Support => "shield",
        PlayerRole::Assault => "bolt.fill",
        PlayerRole::Medic => "cross.case.fill",
        PlayerRole::Captain => "star.fill",
    }
}

pub fn status_label(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Scheduled => "Scheduled",
        MatchStatus::InProgress => "In Progress",
        MatchStatus::Completed => "Completed",
        MatchStatus::Cancelled => "Cancelled",
    }
}

/// Badge colour per status (yellow, green, blue, red).
pub fn status_color(status: MatchStatus) -> TeamColor {
    match status {
        MatchStatus::Scheduled => TeamColor::rgb(0xFF, 0xCC, 0x00),
        MatchStatus::InProgress => TeamColor::rgb(0x34, 0xC7, 0x59),
        MatchStatus::Completed => TeamColor::rgb(0x00, 0x7A, 0xFF),
        MatchStatus::Cancelled => TeamColor::rgb(0xFF, 0x3B, 0x30),
    }
}

pub fn event_label(event: EventType) -> &'static str {
    match event {
        EventType::Elimination => "Elimination",
        EventType::ObjectiveCapture => "Objective Capture",
        EventType::Resupply => "Resupply",
        EventType::TeamRevive => "Team Revive",
        EventType::FlagPickup => "Flag Pickup",
        EventType::FlagDrop => "Flag Drop",
    }
}

pub fn marker_icon(kind: MarkerKind) -> &'static str {
    match kind {
        MarkerKind::Player => "pin",
        MarkerKind::Flag => "flag.fill",
        MarkerKind::Danger => "exclamationmark.triangle.fill",
        MarkerKind::Cover => "shield.fill",
    }
}

pub fn tab_title(tab: Tab) -> &'static str {
    match tab {
        Tab::Home => "Home",
        Tab::Map => "Map",
        Tab::Teams => "Teams",
        Tab::Matches => "Matches",
        Tab::Stats => "Stats",
        Tab::Assistant => "AI",
    }
}

pub fn tab_icon(tab: Tab) -> &'static str {
    match tab {
        Tab::Home => "house.fill",
        Tab::Map => "map.fill",
        Tab::Teams => "person.3.fill",
        Tab::Matches => "flag.checkered.2.crossed",
        Tab::Stats => "chart.bar.fill",
        Tab::Assistant => "brain.head.profile",
    }
}

/// Seconds as the abbreviated hours/minutes shown on match cards, e.g. `1h 30m`.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
