//! Negamax search with alpha-beta pruning
//!
//! Depth-bounded and single-threaded. Every node restricts itself to a prefix
//! of the ordered candidate list whose length shrinks with each ply, which
//! keeps the tree small enough to walk to completion in one call.
//!
//! # Example
//!
//! ```
//! use hex::board::{Board, Cell, Player, Pos};
//! use hex::config::Difficulty;
//! use hex::search::Searcher;
//!
//! let mut board = Board::new(7);
//! board.put(Pos::new(3, 3), Cell::Red);
//!
//! let mut searcher = Searcher::new();
//! let result = searcher.choose_move(&board, Player::Blue, &Difficulty::Easy.preset());
//! assert!(result.best_move.is_some());
//! ```

use log::debug;

use crate::board::{Board, Cell, Player, Pos};
use crate::config::DifficultyProfile;
use crate::eval::{evaluate, Score};
use crate::rules::has_connection;

use super::candidates::generate_candidates;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Negamax calls, leaves included
    pub nodes: u64,
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` only when the board has no empty cell
    pub best_move: Option<Pos>,
    /// Score of the best move from the mover's perspective
    pub score: i32,
    /// Plies searched, root move included
    pub depth: u8,
    /// Root candidates actually searched
    pub root_moves: usize,
    pub stats: SearchStats,
}

/// Negamax searcher. Holds only statistics; all position state lives on the
/// call stack.
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the most recent search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick a move for `player`.
    ///
    /// Runs [`negamax`](Self::negamax) once per root candidate and keeps the
    /// highest score; on equal scores the earlier candidate wins, so the
    /// choice is deterministic for a given position.
    pub fn choose_move(
        &mut self,
        board: &Board,
        player: Player,
        profile: &DifficultyProfile,
    ) -> SearchResult {
        self.stats = SearchStats::default();
        let max_depth = profile.search_depth.max(1);
        let mut work = board.clone();

        let mut candidates = generate_candidates(&mut work, player);
        candidates.truncate(profile.candidate_limit(max_depth));

        let mut best_move = None;
        let mut best_score = -Score::INF;
        let mut alpha = -Score::INF;
        let beta = Score::INF;

        for candidate in &candidates {
            work.put(candidate.pos, player.to_cell());
            let score = -self.negamax(
                &mut work,
                player.opponent(),
                max_depth - 1,
                -beta,
                -alpha,
                profile,
                max_depth,
            );
            work.put(candidate.pos, Cell::Empty);

            if score > best_score {
                best_score = score;
                best_move = Some(candidate.pos);
            }
            alpha = alpha.max(score);
        }

        if best_move.is_none() {
            best_score = 0;
        }

        debug!(
            "negamax {} depth {}: best {:?} score {} ({} root moves, {} nodes, {} cutoffs, {:.0}% on first move)",
            player.name(),
            max_depth,
            best_move,
            best_score,
            candidates.len(),
            self.stats.nodes,
            self.stats.beta_cutoffs,
            self.stats.first_move_rate()
        );

        SearchResult {
            best_move,
            score: best_score,
            depth: max_depth,
            root_moves: candidates.len(),
            stats: self.stats.clone(),
        }
    }

    /// Negamax value of `board` for `player` (the side to move).
    ///
    /// `depth` is the remaining depth and `max_depth` the depth the root was
    /// searched at, so `max_depth - depth` is the distance from the root.
    /// Decided positions score `±(WIN - ply)`: quicker wins rank higher and
    /// slower losses rank higher.
    #[allow(clippy::too_many_arguments)]
    pub fn negamax(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        profile: &DifficultyProfile,
        max_depth: u8,
    ) -> i32 {
        self.stats.nodes += 1;

        let ply = i32::from(max_depth.saturating_sub(depth));
        if has_connection(board, player) {
            return Score::win_in(ply);
        }
        if has_connection(board, player.opponent()) {
            return Score::loss_in(ply);
        }

        if depth == 0 || board.is_full() {
            return evaluate(board, player);
        }

        let mut candidates = generate_candidates(board, player);
        candidates.truncate(profile.candidate_limit(depth));
        if candidates.is_empty() {
            return evaluate(board, player);
        }

        let mut best_score = -Score::INF;

        for (i, candidate) in candidates.iter().enumerate() {
            board.put(candidate.pos, player.to_cell());
            let score = -self.negamax(
                board,
                player.opponent(),
                depth - 1,
                -beta,
                -alpha,
                profile,
                max_depth,
            );
            board.put(candidate.pos, Cell::Empty);

            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }

        best_score
    }
}
