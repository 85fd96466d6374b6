//! Persisted session state
//!
//! A snapshot holds enough to resume a game: the board, whose turn it is,
//! mode, difficulty, status and the last move. A pending AI move is not
//! stored; restoring re-schedules it when the AI is to move.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Move, Player, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::config::{Difficulty, GameConfig};
use crate::error::SnapshotError;
use crate::rules::has_connection;

use super::{GameMode, GameSession, GameStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub size: usize,
    /// Row-major cell matrix, `size` rows of `size` cells
    pub board: Vec<Vec<Cell>>,
    pub current: Player,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub last_move: Option<Move>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the snapshot describes a reachable position and build its board.
    pub fn validate(&self) -> Result<Board, SnapshotError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(invalid(format!("board size {} out of range", self.size)));
        }
        if self.board.len() != self.size {
            return Err(invalid(format!(
                "expected {} rows, found {}",
                self.size,
                self.board.len()
            )));
        }
        let board = Board::from_rows(&self.board)
            .ok_or_else(|| invalid("board rows are not square".to_string()))?;

        let red = board.count(Player::Red);
        let blue = board.count(Player::Blue);
        let to_move = if red == blue {
            Player::Red
        } else if red == blue + 1 {
            Player::Blue
        } else {
            return Err(invalid(format!("{red} red and {blue} blue stones")));
        };

        let red_connected = has_connection(&board, Player::Red);
        let blue_connected = has_connection(&board, Player::Blue);

        match self.status {
            GameStatus::Ready => {
                if !board.is_board_empty() {
                    return Err(invalid("ready game with stones on the board".to_string()));
                }
            }
            GameStatus::InProgress => {
                if red_connected || blue_connected {
                    return Err(invalid("game in progress has a winner".to_string()));
                }
                if board.is_board_empty() || board.is_full() {
                    return Err(invalid("game in progress on an empty or full board".to_string()));
                }
            }
            GameStatus::Won(winner) => {
                let (won, lost) = match winner {
                    Player::Red => (red_connected, blue_connected),
                    Player::Blue => (blue_connected, red_connected),
                };
                if !won || lost {
                    return Err(invalid(format!("{} recorded as winner", winner.name())));
                }
                // The winner placed the last stone
                if to_move == winner {
                    return Err(invalid(format!("{} won out of turn", winner.name())));
                }
            }
            GameStatus::Draw => {
                if !board.is_full() {
                    return Err(invalid("draw on a board with empty cells".to_string()));
                }
                if red_connected || blue_connected {
                    return Err(invalid("draw on a board with a winner".to_string()));
                }
            }
        }

        if !self.status.is_over() && self.current != to_move {
            return Err(invalid(format!(
                "{} to move with {red} red and {blue} blue stones",
                self.current.name()
            )));
        }

        if let Some(Move { pos, player }) = self.last_move {
            let (row, col) = (pos.row as usize, pos.col as usize);
            if board.get(row, col).ok() != Some(player.to_cell()) {
                return Err(invalid(format!(
                    "last move {pos} is not a {} stone",
                    player.name()
                )));
            }
        }

        Ok(board)
    }
}

fn invalid(reason: String) -> SnapshotError {
    SnapshotError::Invalid(reason)
}

impl GameSession {
    /// Capture the persistent part of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            size: self.board().size(),
            board: self.board().to_rows(),
            current: self.current_player(),
            mode: self.mode(),
            difficulty: self.difficulty(),
            status: self.status(),
            last_move: self.last_move(),
        }
    }

    /// Rehydrate a session. The board size comes from the snapshot; the rest
    /// of `config` (difficulty profiles) applies as usual. If the AI is to
    /// move its reply is scheduled again.
    pub fn restore(config: GameConfig, snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        let board = snapshot.validate()?;
        info!(
            "restoring {0}x{0} session, {1:?}, {2:?}",
            snapshot.size, snapshot.mode, snapshot.status
        );
        Ok(GameSession::from_parts(
            config,
            board,
            snapshot.mode,
            snapshot.difficulty,
            snapshot.current,
            snapshot.status,
            snapshot.last_move,
        ))
    }

    pub fn restore_json(config: GameConfig, json: &str) -> Result<Self, SnapshotError> {
        Self::restore(config, SessionSnapshot::from_json(json)?)
    }

    /// Restore from JSON, or start a fresh `mode` session if the saved state
    /// is unreadable or inconsistent.
    pub fn restore_or_fresh(config: GameConfig, json: &str, mode: GameMode) -> Self {
        match Self::restore_json(config.clone(), json) {
            Ok(session) => session,
            Err(e) => {
                warn!("discarding saved session: {e}");
                GameSession::new(config, mode)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn config(size: usize) -> GameConfig {
        GameConfig {
            board_size: size,
            ..GameConfig::default()
        }
    }

    fn mid_game() -> GameSession {
        let mut session = GameSession::new(config(5), GameMode::Duo);
        for (r, c) in [(2, 2), (1, 3), (3, 1)] {
            session.apply_move(r, c).unwrap();
        }
        session
    }

    #[test]
    fn test_snapshot_json_restores_same_state() {
        let session = mid_game();
        let json = session.snapshot().to_json().unwrap();

        let restored = GameSession::restore_json(config(11), &json).unwrap();
        assert_eq!(restored.board(), session.board());
        assert_eq!(restored.current_player(), Player::Blue);
        assert_eq!(restored.status(), GameStatus::InProgress);
        assert_eq!(
            restored.last_move(),
            Some(Move::new(Pos::new(3, 1), Player::Red))
        );
        assert_eq!(restored.snapshot(), session.snapshot());
    }

    #[test]
    fn test_restore_reschedules_ai_turn() {
        let mut snapshot = mid_game().snapshot();
        snapshot.mode = GameMode::Solo { human: Player::Red };

        let mut restored = GameSession::restore(config(5), snapshot).unwrap();
        assert!(restored.is_ai_pending());

        let ticket = restored.pending_ticket().unwrap();
        let report = restored.run_ai_move(ticket).unwrap();
        assert_eq!(report.player, Player::Blue);
        assert_eq!(restored.board().stone_count(), 4);
        assert!(restored.is_human_turn());
    }

    #[test]
    fn test_restore_human_turn_has_nothing_pending() {
        let mut snapshot = mid_game().snapshot();
        snapshot.mode = GameMode::Solo { human: Player::Blue };

        let restored = GameSession::restore(config(5), snapshot).unwrap();
        assert!(!restored.is_ai_pending());
        assert!(restored.is_human_turn());
    }

    #[test]
    fn test_restore_rejects_bad_turn() {
        let mut snapshot = mid_game().snapshot();
        snapshot.current = Player::Red;
        let err = GameSession::restore(config(5), snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::Invalid(_)));
    }

    #[test]
    fn test_restore_rejects_bad_stone_counts() {
        let mut snapshot = mid_game().snapshot();
        snapshot.board[0][0] = Cell::Red;
        snapshot.board[0][1] = Cell::Red;
        assert!(GameSession::restore(config(5), snapshot).is_err());
    }

    #[test]
    fn test_restore_rejects_false_winner() {
        let mut snapshot = mid_game().snapshot();
        snapshot.status = GameStatus::Won(Player::Red);
        assert!(GameSession::restore(config(5), snapshot).is_err());
    }

    #[test]
    fn test_restore_rejects_winner_swap() {
        let mut session = GameSession::new(config(3), GameMode::Duo);
        for (r, c) in [(1, 0), (0, 0), (1, 1), (0, 1), (1, 2)] {
            session.apply_move(r, c).unwrap();
        }
        let mut snapshot = session.snapshot();
        snapshot.status = GameStatus::Won(Player::Blue);
        assert!(GameSession::restore(config(3), snapshot).is_err());
    }

    #[test]
    fn test_restore_rejects_draw_with_connection() {
        // Full 3x3 board, Red holds row 1 and so connects left to right
        let rows = [
            [Cell::Blue, Cell::Red, Cell::Blue],
            [Cell::Red, Cell::Red, Cell::Red],
            [Cell::Blue, Cell::Red, Cell::Blue],
        ];
        let snapshot = SessionSnapshot {
            size: 3,
            board: rows.iter().map(|row| row.to_vec()).collect(),
            current: Player::Blue,
            mode: GameMode::Duo,
            difficulty: Difficulty::Normal,
            status: GameStatus::Draw,
            last_move: None,
        };
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("draw on a board with a winner"));

        let won = SessionSnapshot {
            status: GameStatus::Won(Player::Red),
            ..snapshot
        };
        assert!(won.validate().is_ok());
    }

    #[test]
    fn test_restore_rejects_ragged_board() {
        let mut snapshot = mid_game().snapshot();
        snapshot.board[4].pop();
        assert!(GameSession::restore(config(5), snapshot).is_err());

        let mut snapshot = mid_game().snapshot();
        snapshot.size = 6;
        assert!(GameSession::restore(config(5), snapshot).is_err());
    }

    #[test]
    fn test_restore_finished_game() {
        let mut session = GameSession::new(config(3), GameMode::Duo);
        for (r, c) in [(1, 0), (0, 0), (1, 1), (0, 1), (1, 2)] {
            session.apply_move(r, c).unwrap();
        }
        assert_eq!(session.status(), GameStatus::Won(Player::Red));

        let restored = GameSession::restore(config(3), session.snapshot()).unwrap();
        assert_eq!(restored.status(), GameStatus::Won(Player::Red));
        assert_eq!(restored.winning_path().map(|p| p.len()), Some(3));
    }

    #[test]
    fn test_restore_rejects_wrong_last_move() {
        let mut snapshot = mid_game().snapshot();
        snapshot.last_move = Some(Move::new(Pos::new(3, 1), Player::Blue));
        assert!(GameSession::restore(config(5), snapshot).is_err());

        let mut snapshot = mid_game().snapshot();
        snapshot.last_move = Some(Move::new(Pos::new(0, 0), Player::Red));
        assert!(GameSession::restore(config(5), snapshot).is_err());
    }

    #[test]
    fn test_corrupt_json_falls_back_to_fresh() {
        let mode = GameMode::Solo { human: Player::Red };
        let session = GameSession::restore_or_fresh(config(7), "{\"size\": 7, \"board\":", mode);
        assert_eq!(session.status(), GameStatus::Ready);
        assert_eq!(session.board().size(), 7);
        assert!(session.board().is_board_empty());
        assert_eq!(session.mode(), mode);
    }

    #[test]
    fn test_inconsistent_snapshot_falls_back_to_fresh() {
        let mut snapshot = mid_game().snapshot();
        snapshot.status = GameStatus::Ready;
        let json = snapshot.to_json().unwrap();

        let session = GameSession::restore_or_fresh(config(5), &json, GameMode::Duo);
        assert!(session.board().is_board_empty());
    }

    #[test]
    fn test_json_is_readable() {
        let json = mid_game().snapshot().to_json().unwrap();
        assert!(json.contains("\"status\":\"inprogress\""));
        assert!(json.contains("\"mode\":{\"kind\":\"duo\"}"));
        assert!(json.contains("\"current\":\"blue\""));
    }
}
