//! AI engine facade over the negamax searcher
//!
//! The engine picks a move for the side to move in three steps:
//!
//! 1. **Opening**: on an empty board, take the center
//! 2. **Immediate win**: any empty cell that connects the player's edges now
//! 3. **Negamax**: depth-bounded alpha-beta search under the difficulty profile
//!
//! # Example
//!
//! ```
//! use hex::{AIEngine, Board, Cell, Difficulty, Player, Pos};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::new(7);
//! board.put(Pos::new(3, 3), Cell::Red);
//!
//! let result = engine.choose_move(&board, Player::Blue, &Difficulty::Easy.preset());
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use log::debug;

use crate::board::{Board, Cell, Player, Pos};
use crate::config::DifficultyProfile;
use crate::eval::Score;
use crate::rules::has_connection;
use crate::search::{SearchResult, SearchStats, Searcher};

/// Which step of the engine produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center reply on an empty board
    Opening,
    /// The move connects the player's edges immediately
    ImmediateWin,
    /// Regular negamax search result
    Negamax,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found; `None` only on a full board
    pub best_move: Option<Pos>,
    /// Score from the mover's perspective
    pub score: i32,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn opening(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::Opening,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64, nodes: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: Score::win_in(1),
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes,
        }
    }

    #[inline]
    fn from_negamax(result: &SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::Negamax,
            time_ms,
            nodes: result.stats.nodes,
        }
    }
}

/// Main AI engine for Hex.
///
/// Stateless between calls apart from the statistics of the last search, so
/// one engine can serve both sides of a self-play game.
#[derive(Debug, Default)]
pub struct AIEngine {
    searcher: Searcher,
    last: Option<MoveResult>,
}

impl AIEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Best move only. See [`choose_move`](Self::choose_move).
    #[must_use]
    pub fn get_move(
        &mut self,
        board: &Board,
        player: Player,
        profile: &DifficultyProfile,
    ) -> Option<Pos> {
        self.choose_move(board, player, profile).best_move
    }

    /// Pick a move for `player` and report how it was found.
    ///
    /// Never returns an occupied cell. `best_move` is `None` only when the
    /// board has no empty cell left.
    pub fn choose_move(
        &mut self,
        board: &Board,
        player: Player,
        profile: &DifficultyProfile,
    ) -> MoveResult {
        let start = Instant::now();

        let result = if board.is_board_empty() {
            MoveResult::opening(board.center(), elapsed_ms(start))
        } else if let Some((pos, probes)) = find_immediate_win(board, player) {
            MoveResult::immediate_win(pos, elapsed_ms(start), probes)
        } else {
            let search = self.searcher.choose_move(board, player, profile);
            MoveResult::from_negamax(&search, elapsed_ms(start))
        };

        debug!(
            "{} plays {:?} via {:?} (score {}, {} nodes, {}ms)",
            player.name(),
            result.best_move,
            result.search_type,
            result.score,
            result.nodes,
            result.time_ms
        );

        self.last = Some(result.clone());
        result
    }

    /// Result of the most recent [`choose_move`](Self::choose_move).
    pub fn last_result(&self) -> Option<&MoveResult> {
        self.last.as_ref()
    }

    /// Negamax statistics of the most recent full search.
    pub fn search_stats(&self) -> &SearchStats {
        self.searcher.stats()
    }
}

/// First empty cell, in scan order, that connects `player` at once. Only cells
/// touching one of the player's stones can do that on a board of size > 1.
/// Returns the move and the number of cells probed.
fn find_immediate_win(board: &Board, player: Player) -> Option<(Pos, u64)> {
    let mut work = board.clone();
    let mut probes = 0;
    let own = player.to_cell();

    for pos in board.empty_cells() {
        let touches_own = board.neighbors(pos).any(|nb| board.cell(nb) == own);
        if !touches_own {
            continue;
        }
        probes += 1;
        work.put(pos, own);
        let wins = has_connection(&work, player);
        work.put(pos, Cell::Empty);
        if wins {
            return Some((pos, probes));
        }
    }
    None
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;

    #[test]
    fn test_engine_empty_board() {
        let board = Board::new(11);
        let mut engine = AIEngine::new();
        let result = engine.choose_move(&board, Player::Red, &Difficulty::Hard.preset());

        assert_eq!(result.best_move, Some(Pos::new(5, 5)));
        assert_eq!(result.search_type, SearchType::Opening);
    }

    #[test]
    fn test_engine_immediate_win() {
        let mut board = Board::new(5);
        for r in [0, 1, 2, 4] {
            board.put(Pos::new(r, 3), Cell::Blue);
        }
        for c in [0, 1, 2] {
            board.put(Pos::new(1, c), Cell::Red);
        }

        let mut engine = AIEngine::new();
        let result = engine.choose_move(&board, Player::Blue, &Difficulty::Easy.preset());

        assert_eq!(result.search_type, SearchType::ImmediateWin);
        let pos = result.best_move.unwrap();
        board.put(pos, Cell::Blue);
        assert!(has_connection(&board, Player::Blue));
    }

    #[test]
    fn test_engine_falls_back_to_negamax() {
        let mut board = Board::new(7);
        board.put(Pos::new(3, 3), Cell::Red);
        board.put(Pos::new(2, 4), Cell::Blue);

        let mut engine = AIEngine::new();
        let result = engine.choose_move(&board, Player::Red, &Difficulty::Normal.preset());

        assert_eq!(result.search_type, SearchType::Negamax);
        assert!(result.nodes > 0);
        assert_eq!(engine.search_stats().nodes, result.nodes);
        assert!(board.is_empty_at(result.best_move.unwrap()));
    }

    #[test]
    fn test_engine_full_board_has_no_move() {
        let mut board = Board::new(3);
        for (i, pos) in board.positions().collect::<Vec<_>>().into_iter().enumerate() {
            board.put(pos, if i % 2 == 0 { Cell::Red } else { Cell::Blue });
        }
        let mut engine = AIEngine::new();
        assert_eq!(engine.get_move(&board, Player::Red, &Difficulty::Easy.preset()), None);
    }

    #[test]
    fn test_engine_deterministic() {
        let mut board = Board::new(7);
        board.put(Pos::new(3, 3), Cell::Red);
        board.put(Pos::new(4, 2), Cell::Blue);
        board.put(Pos::new(2, 3), Cell::Red);
        let profile = Difficulty::Hard.preset();

        let mut engine = AIEngine::new();
        let first = engine.get_move(&board, Player::Blue, &profile);
        let second = engine.get_move(&board, Player::Blue, &profile);
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_alternating_colors() {
        let mut engine = AIEngine::new();
        let mut board = Board::new(7);
        let profile = Difficulty::Easy.preset();

        let red = engine.get_move(&board, Player::Red, &profile).unwrap();
        board.put(red, Cell::Red);

        let blue = engine.get_move(&board, Player::Blue, &profile).unwrap();
        assert_ne!(red, blue);
        board.put(blue, Cell::Blue);

        let red2 = engine.get_move(&board, Player::Red, &profile).unwrap();
        assert!(board.is_empty_at(red2));
        assert_eq!(
            engine.last_result().map(|r| r.best_move),
            Some(Some(red2))
        );
    }

    #[test]
    fn test_engine_time_reasonable() {
        let mut board = Board::new(11);
        board.put(Pos::new(5, 5), Cell::Red);
        board.put(Pos::new(4, 6), Cell::Blue);
        board.put(Pos::new(6, 4), Cell::Red);

        let mut engine = AIEngine::new();
        let result = engine.choose_move(&board, Player::Blue, &Difficulty::Hard.preset());

        #[cfg(debug_assertions)]
        let max_time_ms = 60_000;
        #[cfg(not(debug_assertions))]
        let max_time_ms = 5_000;

        assert!(
            result.time_ms < max_time_ms,
            "Search took too long: {}ms (limit: {}ms)",
            result.time_ms,
            max_time_ms
        );
    }

    #[test]
    fn test_move_result_types() {
        let pos = Pos::new(2, 2);

        let opening = MoveResult::opening(pos, 0);
        assert_eq!(opening.search_type, SearchType::Opening);

        let win = MoveResult::immediate_win(pos, 1, 3);
        assert_eq!(win.search_type, SearchType::ImmediateWin);
        assert!(Score::is_decisive(win.score));
    }
}
