//! Hex game engine with a negamax AI
//!
//! Rules engine and computer opponent for Hex on a square array with
//! hexagonal adjacency:
//! - Red moves first and joins the left edge to the right edge
//! - Blue joins the top edge to the bottom edge
//! - The first side to complete an unbroken chain of its stones wins
//!
//! # Architecture
//!
//! - [`board`]: Board representation and hexagonal neighbors
//! - [`rules`]: Edge-to-edge connection detection
//! - [`eval`]: Shortest-path distance heuristic
//! - [`search`]: Candidate generation and negamax with alpha-beta
//! - [`engine`]: AI facade (opening, immediate win, search)
//! - [`session`]: Turn order, delayed AI moves, rewards and snapshots
//! - [`config`]: Difficulty presets and TOML configuration
//!
//! # Quick Start
//!
//! ```
//! use hex::{GameConfig, GameMode, GameSession, Player};
//!
//! let config = GameConfig { board_size: 7, ..GameConfig::default() };
//! let mut session = GameSession::new(config, GameMode::Solo { human: Player::Red });
//!
//! session.apply_move(3, 3).unwrap();
//!
//! // The host normally waits for `ai_due()`; fire the reply straight away
//! let ticket = session.pending_ticket().unwrap();
//! let report = session.run_ai_move(ticket).unwrap();
//! println!("AI plays {:?}", report.result.best_move);
//! ```
//!
//! # Performance
//!
//! Search effort is bounded by depth and a candidate limit that halves with
//! every ply, so even the hard preset on an 11x11 board answers well inside
//! its thinking delay.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Move, Player, Pos, DEFAULT_BOARD_SIZE};
pub use config::{Difficulty, DifficultyProfile, GameConfig};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{AiMoveError, ConfigError, IllegalMove, MoveError, SnapshotError};
pub use session::{
    AiMoveReport, AiTicket, GameMode, GameSession, GameStatus, RewardEvent, SessionSnapshot,
};
