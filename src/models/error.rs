use crate::models::{MatchId, PlayerId, TeamId};
use thiserror::Error;

/// Errors from caller-driven model operations. Data read back from storage never
/// produces these; it is repaired or replaced instead.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ModelError {
    #[error("Team not found")]
    TeamNotFound(TeamId),

    #[error("Player not found")]
    PlayerNotFound(PlayerId),

    #[error("Player is already on this team")]
    DuplicatePlayer(PlayerId),

    #[error("Match not found")]
    MatchNotFound(MatchId),

    #[error("A match needs at least 2 distinct teams (got {0})")]
    NotEnoughTeams(usize),

    #[error("Location must not be empty")]
    EmptyLocation,

    #[error("Winner must be one of the participating teams")]
    WinnerNotParticipating(TeamId),

    #[error("Score can only be recorded for participating teams")]
    ScoreForNonParticipant(TeamId),

    #[error("Score keys and values differ in length ({keys} keys, {values} values)")]
    ScoreLengthMismatch { keys: usize, values: usize },

    #[error("Duplicate score entry for one team")]
    DuplicateScoreKey(TeamId),

    #[error("Cell ({row}, {column}) is outside the {size}x{size} arena")]
    OutOfBounds { row: usize, column: usize, size: usize },
}
