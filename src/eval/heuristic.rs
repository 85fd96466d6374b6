//! Heuristic evaluation function for Hex board positions
//!
//! The evaluation is the difference of connection distances: how much closer
//! the side to move is to joining its edges than the opponent is.

use crate::board::{Board, Player};

use super::distance::distance;
use super::score::Score;

/// Evaluate the board from the perspective of `to_move`.
///
/// Returns `distance(opponent) - distance(to_move)`:
/// - Positive values indicate advantage for `to_move`
/// - `Score::WIN` if `to_move` is already connected
/// - `-Score::WIN` if the opponent is already connected
///
/// Antisymmetric: `evaluate(b, p) == -evaluate(b, p.opponent())`.
#[must_use]
pub fn evaluate(board: &Board, to_move: Player) -> i32 {
    let mine = distance(board, to_move);
    if mine == 0 {
        return Score::WIN;
    }
    let theirs = distance(board, to_move.opponent());
    if theirs == 0 {
        return -Score::WIN;
    }
    theirs - mine
}
