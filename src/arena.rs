//! Tactical arena map: a square grid where team markers are placed and removed.

use crate::models::{ModelError, Team, TeamColor, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Cells per side.
pub const GRID_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
}

impl GridPosition {
    pub fn new(row: usize, column: usize) -> Result<Self, ModelError> {
        if row >= GRID_SIZE || column >= GRID_SIZE {
            return Err(ModelError::OutOfBounds {
                row,
                column,
                size: GRID_SIZE,
            });
        }
        Ok(Self { row, column })
    }
}

/// Drawing tool / marker type.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    #[default]
    Player,
    Flag,
    Danger,
    Cover,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: Uuid,
    pub team_id: TeamId,
    pub team_color: TeamColor,
    pub kind: MarkerKind,
}

/// Occupied cells of the grid. Values are replaced, not edited in place.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArenaMap {
    cells: BTreeMap<GridPosition, Marker>,
}

impl ArenaMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_at(&self, position: GridPosition) -> Option<&Marker> {
        self.cells.get(&position)
    }

    pub fn markers(&self) -> impl Iterator<Item = (GridPosition, &Marker)> {
        self.cells.iter().map(|(p, m)| (*p, m))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Clear an occupied cell, or place a `kind` marker for `team` on an empty one.
    pub fn toggle(&self, position: GridPosition, team: &Team, kind: MarkerKind) -> Self {
        let mut cells = self.cells.clone();
        if cells.remove(&position).is_none() {
            cells.insert(
                position,
                Marker {
                    id: Uuid::new_v4(),
                    team_id: team.id(),
                    team_color: team.color,
                    kind,
                },
            );
        }
        Self { cells }
    }

    pub fn reset(&self) -> Self {
        Self::new()
    }

    /// Markers belonging to `team`, in row-major order.
    pub fn markers_for_team(&self, team: TeamId) -> Vec<(GridPosition, &Marker)> {
        self.markers().filter(|(_, m)| m.team_id == team).collect()
    }

    /// Drop markers whose team is no longer in `teams`.
    pub fn retain_teams(&self, teams: &[Team]) -> Self {
        let cells = self
            .cells
            .iter()
            .filter(|(_, m)| teams.iter().any(|t| t.id() == m.team_id))
            .map(|(p, m)| (*p, m.clone()))
            .collect();
        Self { cells }
    }
}

/// Serialized as a list of occupied cells.
#[derive(Serialize, Deserialize)]
struct Cell {
    #[serde(flatten)]
    position: GridPosition,
    marker: Marker,
}

impl Serialize for ArenaMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells.iter().map(|(p, m)| Cell {
            position: *p,
            marker: m.clone(),
        }))
    }
}

impl<'de> Deserialize<'de> for ArenaMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = Vec::<Cell>::deserialize(deserializer)?;
        let mut map = BTreeMap::new();
        for c in cells {
            let p = GridPosition::new(c.position.row, c.position.column)
                .map_err(serde::de::Error::custom)?;
            map.insert(p, c.marker);
        }
        Ok(Self { cells: map })
    }
}
