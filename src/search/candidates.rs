//! Candidate move generation
//!
//! Restricts the search to empty cells touching a stone. Each candidate is
//! scored by a one-ply lookahead (place, evaluate, undo) so the search tries
//! the strongest-looking moves first and can cut the list short.

use crate::board::{Board, Cell, Player, Pos};
use crate::eval::evaluate;

/// A move worth searching, with its one-ply score for the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub pos: Pos,
    pub score: i32,
}

/// Opening replies on an empty board: the center, then its six neighbors.
pub fn opening_moves(board: &Board) -> Vec<Candidate> {
    let center = board.center();
    std::iter::once(center)
        .chain(board.neighbors(center))
        .map(|pos| Candidate { pos, score: 0 })
        .collect()
}

/// Generate candidates for `player`, best first.
///
/// Ties on score are broken by Manhattan distance to the center, then by
/// row-major scan order, so the ordering is fully deterministic.
/// Takes the board mutably to try each move in place; the board is restored
/// before returning.
pub fn generate_candidates(board: &mut Board, player: Player) -> Vec<Candidate> {
    if board.is_board_empty() {
        return opening_moves(board);
    }

    let size = board.size();
    let center = board.center();
    let mut seen = vec![false; size * size];
    let mut scored: Vec<(Candidate, u32)> = Vec::with_capacity(size * 2);

    for pos in board.positions() {
        if board.is_empty_at(pos) {
            continue;
        }
        for nb in board.neighbors(pos) {
            let idx = nb.to_index(size);
            if seen[idx] || !board.is_empty_at(nb) {
                continue;
            }
            seen[idx] = true;

            board.put(nb, player.to_cell());
            let score = evaluate(board, player);
            board.put(nb, Cell::Empty);

            scored.push((Candidate { pos: nb, score }, nb.manhattan(center)));
        }
    }

    // Stable sort keeps discovery order among exact ties
    scored.sort_by(|(a, da), (b, db)| b.score.cmp(&a.score).then(da.cmp(db)));
    scored.into_iter().map(|(c, _)| c).collect()
}
