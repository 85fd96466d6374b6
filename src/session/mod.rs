//! Game session: turn order, modes, the delayed AI move and persistence
//!
//! A [`GameSession`] is the only stateful value the host talks to. It owns the
//! board and decides who may move; the AI's reply is scheduled behind a
//! thinking delay and identified by an [`AiTicket`] so a reset can invalidate
//! it.

pub mod game;
pub mod snapshot;

pub use game::{AiMoveReport, GameSession, RewardHook};
pub use snapshot::SessionSnapshot;

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::config::Difficulty;

/// Who controls the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum GameMode {
    /// One human against the AI
    Solo { human: Player },
    /// Two humans sharing the board
    Duo,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Solo { human: Player::Red }
    }
}

impl GameMode {
    /// Side played by the AI, if any
    pub fn ai_player(self) -> Option<Player> {
        match self {
            GameMode::Solo { human } => Some(human.opponent()),
            GameMode::Duo => None,
        }
    }

    pub fn is_human(self, player: Player) -> bool {
        self.ai_player() != Some(player)
    }
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// No stone placed yet
    #[default]
    Ready,
    InProgress,
    Won(Player),
    /// Board filled without a connection, or the AI found no move
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won(_) | GameStatus::Draw)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(p) => Some(p),
            _ => None,
        }
    }
}

/// Handle for a scheduled AI move, stamped with the session generation it
/// was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AiTicket {
    generation: u64,
}

impl AiTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Sent to the host's reward hook when the human beats the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardEvent {
    pub winner: Player,
    pub difficulty: Difficulty,
    pub tier: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_sides() {
        let solo = GameMode::Solo { human: Player::Blue };
        assert_eq!(solo.ai_player(), Some(Player::Red));
        assert!(solo.is_human(Player::Blue));
        assert!(!solo.is_human(Player::Red));

        assert_eq!(GameMode::Duo.ai_player(), None);
        assert!(GameMode::Duo.is_human(Player::Red));
        assert!(GameMode::Duo.is_human(Player::Blue));
    }

    #[test]
    fn test_status_terminal() {
        assert!(!GameStatus::Ready.is_over());
        assert!(!GameStatus::InProgress.is_over());
        assert!(GameStatus::Won(Player::Red).is_over());
        assert!(GameStatus::Draw.is_over());
        assert_eq!(GameStatus::Won(Player::Blue).winner(), Some(Player::Blue));
        assert_eq!(GameStatus::Draw.winner(), None);
    }

    #[test]
    fn test_mode_serde() {
        let json = serde_json::to_string(&GameMode::Solo { human: Player::Blue }).unwrap();
        assert_eq!(json, r#"{"kind":"solo","human":"blue"}"#);
        let duo: GameMode = serde_json::from_str(r#"{"kind":"duo"}"#).unwrap();
        assert_eq!(duo, GameMode::Duo);
    }
}
