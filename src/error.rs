//! Error types for the engine, the session, configuration and snapshots.
//!
//! None of these are fatal: a rejected move leaves the session untouched, a bad
//! snapshot falls back to a fresh game.

use std::path::PathBuf;

/// Why a well-formed move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("cell is occupied")]
    Occupied,

    #[error("it is not the human player's turn")]
    NotYourTurn,

    #[error("game is over")]
    GameOver,

    #[error("AI move is pending")]
    AwaitingAi,
}

/// A rejected move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("coordinate ({row}, {col}) is outside the board")]
    InvalidCoordinate { row: usize, col: usize },

    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
}

/// Failure to fire a scheduled AI move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AiMoveError {
    #[error("no AI move is pending")]
    NothingPending,

    #[error("AI ticket from generation {ticket} does not match session generation {current}")]
    StaleTicket { ticket: u64, current: u64 },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur when rehydrating a session snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to decode snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent snapshot: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidCoordinate { row: 12, col: 3 };
        assert_eq!(err.to_string(), "coordinate (12, 3) is outside the board");

        let err = MoveError::from(IllegalMove::Occupied);
        assert_eq!(err.to_string(), "illegal move: cell is occupied");
    }

    #[test]
    fn test_ai_move_error_display() {
        let err = AiMoveError::StaleTicket { ticket: 1, current: 2 };
        assert_eq!(
            err.to_string(),
            "AI ticket from generation 1 does not match session generation 2"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board_size must be in 3..=19".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board_size must be in 3..=19"
        );
    }

    #[test]
    fn test_snapshot_error_display() {
        let err = SnapshotError::Invalid("board is not square".to_string());
        assert_eq!(err.to_string(), "inconsistent snapshot: board is not square");
    }
}
