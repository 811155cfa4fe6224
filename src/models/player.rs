//! Player, PlayerRole and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams, events and lookups).
pub type PlayerId = Uuid;

/// Avatar tag given to players created without one.
pub const DEFAULT_AVATAR: &str = "person.circle.fill";

/// Position a player fills on the field.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Sniper,
    Scout,
    Support,
    #[default]
    Assault,
    Medic,
    Captain,
}

impl PlayerRole {
    pub const ALL: [PlayerRole; 6] = [
        PlayerRole::Sniper,
        PlayerRole::Scout,
        PlayerRole::Support,
        PlayerRole::Assault,
        PlayerRole::Medic,
        PlayerRole::Captain,
    ];
}

/// Raw per-player counters. Ratios are derived on read and never stored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub eliminations: u32,
    pub deaths: u32,
    pub assists: u32,
    pub objective_captures: u32,
    pub matches_played: u32,
    pub matches_won: u32,
}

impl PlayerStats {
    /// Eliminations per death; with no deaths the ratio is the elimination count.
    pub fn kd_ratio(&self) -> f64 {
        if self.deaths > 0 {
            f64::from(self.eliminations) / f64::from(self.deaths)
        } else {
            f64::from(self.eliminations)
        }
    }

    /// Percentage of played matches that were won (0..=100, or 0 before any match).
    pub fn win_rate(&self) -> f64 {
        if self.matches_played > 0 {
            f64::from(self.matches_won) / f64::from(self.matches_played) * 100.0
        } else {
            0.0
        }
    }
}

/// A player on a team roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    pub name: String,
    pub nickname: String,
    pub role: PlayerRole,
    /// Symbol tag rendered as the player's avatar.
    pub avatar: String,
    pub stats: PlayerStats,
}

impl Player {
    /// Create a new player with a fresh id, the default avatar and zeroed stats.
    /// Blank names fall back to "New Player" / "Rookie".
    pub fn new(name: impl Into<String>, nickname: impl Into<String>, role: PlayerRole) -> Self {
        Self::with_id(Uuid::new_v4(), name, nickname, role)
    }

    /// Same as [`Player::new`] with a caller-chosen id (seed data, imports).
    pub fn with_id(
        id: PlayerId,
        name: impl Into<String>,
        nickname: impl Into<String>,
        role: PlayerRole,
    ) -> Self {
        let name = non_blank(name.into(), "New Player");
        let nickname = non_blank(nickname.into(), "Rookie");
        Self {
            id,
            name,
            nickname,
            role,
            avatar: DEFAULT_AVATAR.to_string(),
            stats: PlayerStats::default(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn with_avatar(self, avatar: impl Into<String>) -> Self {
        Self {
            avatar: avatar.into(),
            ..self
        }
    }

    pub fn with_stats(self, stats: PlayerStats) -> Self {
        Self { stats, ..self }
    }

    pub fn with_role(self, role: PlayerRole) -> Self {
        Self { role, ..self }
    }
}

/// `value` as given, or `fallback` when it is empty or whitespace only.
pub(crate) fn non_blank(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(eliminations: u32, deaths: u32) -> PlayerStats {
        PlayerStats {
            eliminations,
            deaths,
            ..PlayerStats::default()
        }
    }

    #[test]
    fn kd_ratio_divides_when_deaths_present() {
        assert_eq!(stats(42, 12).kd_ratio(), 3.5);
    }

    #[test]
    fn kd_ratio_without_deaths_is_elimination_count() {
        assert_eq!(stats(7, 0).kd_ratio(), 7.0);
        assert_eq!(stats(0, 0).kd_ratio(), 0.0);
    }

    #[test]
    fn kd_ratio_is_never_negative() {
        for e in [0, 1, 5, 100] {
            for d in [0, 1, 3, 50] {
                let kd = stats(e, d).kd_ratio();
                assert!(kd >= 0.0 && kd.is_finite());
            }
        }
    }

    #[test]
    fn win_rate_is_zero_without_matches() {
        let s = PlayerStats {
            matches_won: 3,
            ..PlayerStats::default()
        };
        assert_eq!(s.win_rate(), 0.0);
    }

    #[test]
    fn win_rate_is_a_percentage() {
        let s = PlayerStats {
            matches_played: 10,
            matches_won: 7,
            ..PlayerStats::default()
        };
        assert!((s.win_rate() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn blank_names_get_form_defaults() {
        let p = Player::new("  ", "", PlayerRole::Medic);
        assert_eq!(p.name, "New Player");
        assert_eq!(p.nickname, "Rookie");
        assert_eq!(p.avatar, DEFAULT_AVATAR);
        assert_eq!(p.stats, PlayerStats::default());
    }

    #[test]
    fn names_are_kept_as_typed() {
        let p = Player::new(" Alex ", "Quick shot", PlayerRole::Sniper);
        assert_eq!(p.name, " Alex ");
        assert_eq!(p.nickname, "Quick shot");
    }

    #[test]
    fn updates_keep_the_id() {
        let p = Player::new("Sam Rivera", "Shadow", PlayerRole::Scout);
        let id = p.id();
        let p = p.with_role(PlayerRole::Captain).with_avatar("star");
        assert_eq!(p.id(), id);
        assert_eq!(p.role, PlayerRole::Captain);
    }
}
