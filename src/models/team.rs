//! Team roster record.

use crate::models::color::TeamColor;
use crate::models::error::ModelError;
use crate::models::game::MatchId;
use crate::models::player::{non_blank, Player, PlayerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Icon tag given to teams created without one.
pub const DEFAULT_TEAM_ICON: &str = "bolt.circle.fill";

/// A team: display metadata, an ordered roster and the ids of matches it played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    pub name: String,
    /// Persisted as `#RRGGBB`.
    #[serde(rename = "color_hex")]
    pub color: TeamColor,
    pub players: Vec<Player>,
    pub icon_name: String,
    pub match_history: Vec<MatchId>,
}

impl Team {
    /// Create an empty team with a fresh id. A blank name becomes "New Team".
    pub fn new(name: impl Into<String>, color: TeamColor, icon_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, color, icon_name)
    }

    pub fn with_id(
        id: TeamId,
        name: impl Into<String>,
        color: TeamColor,
        icon_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: non_blank(name.into(), "New Team"),
            color,
            players: Vec::new(),
            icon_name: non_blank(icon_name.into(), DEFAULT_TEAM_ICON),
            match_history: Vec::new(),
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn has_player(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// New team with `player` appended to the roster. Ids are unique per roster.
    pub fn with_player(self, player: Player) -> Result<Self, ModelError> {
        if self.has_player(player.id()) {
            return Err(ModelError::DuplicatePlayer(player.id()));
        }
        let mut players = self.players;
        players.push(player);
        Ok(Self { players, ..self })
    }

    pub fn with_players(self, players: Vec<Player>) -> Self {
        Self { players, ..self }
    }

    /// New team with the roster entry sharing `player`'s id swapped in place.
    pub fn with_player_replaced(self, player: Player) -> Result<Self, ModelError> {
        let id = player.id();
        let idx = self
            .players
            .iter()
            .position(|p| p.id() == id)
            .ok_or(ModelError::PlayerNotFound(id))?;
        let mut players = self.players;
        players[idx] = player;
        Ok(Self { players, ..self })
    }

    pub fn without_player(self, id: PlayerId) -> Result<Self, ModelError> {
        if !self.has_player(id) {
            return Err(ModelError::PlayerNotFound(id));
        }
        let players = self.players.into_iter().filter(|p| p.id() != id).collect();
        Ok(Self { players, ..self })
    }

    /// New team with `match_id` appended to its history, unless already present.
    pub fn with_match_recorded(self, match_id: MatchId) -> Self {
        if self.match_history.contains(&match_id) {
            return self;
        }
        let mut match_history = self.match_history;
        match_history.push(match_id);
        Self {
            match_history,
            ..self
        }
    }
}
