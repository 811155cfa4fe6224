//! Integration tests for saving and restoring teams and matches.

use chrono::{DateTime, TimeZone, Utc};
use paint_raid::sample;
use paint_raid::{
    EventType, FileStore, KeyValueStore, Match, MatchEvent, MatchStatus, MemoryStore, Persistence,
    Player, PlayerRole, PlayerStats, Position, Team, TeamColor, MATCHES_KEY, TEAMS_KEY,
};

fn pinned_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 4, 16, 20, 0).unwrap()
}

fn persistence() -> Persistence<MemoryStore> {
    Persistence::new(MemoryStore::new()).with_clock(pinned_now)
}

fn purple_reign() -> Team {
    let quickshot =
        Player::new("Alex Johnson", "Quickshot", PlayerRole::Sniper).with_stats(PlayerStats {
            eliminations: 42,
            deaths: 12,
            ..PlayerStats::default()
        });
    let color = TeamColor::from_hex("#5A189A").unwrap();
    Team::new("Purple Reign", color, "bolt.circle.fill").with_players(vec![
        quickshot,
        Player::new("Morgan Chen", "Commander", PlayerRole::Captain),
    ])
}

#[test]
fn team_round_trip_keeps_name_colour_and_roster() {
    let p = persistence();
    let team = purple_reign();
    assert!(p.save_teams(&[team.clone()]));

    let loaded = p.load_teams();
    assert_eq!(loaded.len(), 1);
    let back = &loaded[0];
    assert_eq!(back.name, "Purple Reign");
    assert_eq!(back.color.to_hex(), "#5A189A");
    let nicks: Vec<_> = back.players.iter().map(|p| p.nickname.as_str()).collect();
    assert_eq!(nicks, ["Quickshot", "Commander"]);
    assert_eq!(back, &team);
}

#[test]
fn completed_match_round_trip_keeps_score_and_winner() {
    let p = persistence();
    let a = purple_reign();
    let b = Team::new("Neon Strikers", TeamColor::rgb(0xC7, 0x7D, 0xFF), "star.circle.fill");
    let teams = vec![a.clone(), b.clone()];
    let m = Match::new(pinned_now(), teams, "Evergreen Arena", MatchStatus::Completed)
        .with_score(a.id(), 12)
        .unwrap()
        .with_score(b.id(), 8)
        .unwrap()
        .with_winner(a.id())
        .unwrap()
        .with_duration(3600);
    assert!(p.save_matches(&[m.clone()]));

    let loaded = p.load_matches();
    assert_eq!(loaded.len(), 1);
    let back = &loaded[0];
    assert_eq!(back.score_for(a.id()), 12);
    assert_eq!(back.score_for(b.id()), 8);
    assert_eq!(back.winner(), Some(a.id()));
    assert_eq!(back.status, MatchStatus::Completed);
    assert_eq!(back, &m);
}

#[test]
fn corrupted_matches_load_the_sample_set() {
    let p = persistence();
    p.store().set(MATCHES_KEY, b"\x00\x9f{[garbage").unwrap();

    let loaded = p.load_matches();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded, sample::generate_matches(pinned_now()));
}

#[test]
fn half_position_is_never_persisted() {
    let p = persistence();
    let team = purple_reign();
    let shooter = team.players[0].id();
    let event = MatchEvent::new(pinned_now(), EventType::ObjectiveCapture, shooter)
        .with_position_parts(Some(14.0), None);
    assert_eq!(event.position, None);

    let m = Match::new(pinned_now(), vec![team], "Woodland Arena", MatchStatus::InProgress)
        .with_event(event)
        .with_event(
            MatchEvent::new(pinned_now(), EventType::FlagPickup, shooter)
                .with_position(Position::new(1.5, 2.5).unwrap()),
        );
    assert!(p.save_matches(&[m]));

    let raw: serde_json::Value =
        serde_json::from_slice(&p.store().get(MATCHES_KEY).unwrap().unwrap()).unwrap();
    let events = raw[0]["events"].as_array().unwrap();
    assert!(events[0].get("x").is_none() && events[0].get("y").is_none());
    assert_eq!(events[1]["x"], 1.5);
    assert_eq!(events[1]["y"], 2.5);

    let back = p.load_matches();
    assert_eq!(back[0].events[0].position, None);
    assert_eq!(back[0].events[1].position, Position::new(1.5, 2.5));
}

#[test]
fn saving_twice_then_loading_is_idempotent() {
    let p = persistence();
    let teams = sample::generate_teams();
    let matches = sample::generate_matches(pinned_now());
    for _ in 0..2 {
        assert!(p.save_teams(&teams));
        assert!(p.save_matches(&matches));
    }
    assert_eq!(p.load_teams(), teams);
    assert_eq!(p.load_matches(), matches);
}

#[test]
fn explicit_null_winner_is_treated_as_corrupt() {
    let p = persistence();
    let team = purple_reign();
    let m = Match::new(pinned_now(), vec![team], "Evergreen Arena", MatchStatus::Completed);
    let mut raw = serde_json::to_value(vec![m]).unwrap();
    assert!(raw[0].get("winner").is_none());
    raw[0]["winner"] = serde_json::Value::Null;
    p.store().set(MATCHES_KEY, &serde_json::to_vec(&raw).unwrap()).unwrap();

    assert_eq!(p.load_matches(), sample::generate_matches(pinned_now()));
}

#[test]
fn bad_colour_does_not_fail_the_load() {
    let p = persistence();
    let mut raw = serde_json::to_value(vec![purple_reign()]).unwrap();
    raw[0]["color_hex"] = "#ZZZZZZ".into();
    p.store().set(TEAMS_KEY, &serde_json::to_vec(&raw).unwrap()).unwrap();

    let loaded = p.load_teams();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "Purple Reign");
    assert_eq!(loaded[0].color, TeamColor::DEFAULT);
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let team = purple_reign();
    {
        let p = Persistence::new(FileStore::open(dir.path()).unwrap()).with_clock(pinned_now);
        assert!(p.save_teams(&[team.clone()]));
    }
    let p = Persistence::new(FileStore::open(dir.path()).unwrap()).with_clock(pinned_now);
    assert_eq!(p.load_teams(), vec![team]);
    assert_eq!(p.load_matches(), sample::generate_matches(pinned_now()));
}
