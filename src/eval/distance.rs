//! Connection distance: how many empty cells a player still has to fill to
//! join their edges.
//!
//! Shortest path over the cells with 0/1 weights. Entering one of the player's
//! own stones costs 0, entering an empty cell costs 1, opponent stones are
//! walls. Every cell on the start edge seeds the search with its own entry
//! cost. The frontier is a binary heap, so each pop is O(log n) and every cell
//! is settled exactly once.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::board::{Board, Cell, Player, Pos};

/// Cost of stepping onto `cell` for `player`, `None` if it is blocked.
#[inline]
fn entry_cost(cell: Cell, player: Player) -> Option<i32> {
    match cell.owner() {
        None => Some(1),
        Some(owner) if owner == player => Some(0),
        Some(_) => None,
    }
}

/// Value returned when the far edge cannot be reached at all.
///
/// Strictly larger than any real distance (at most `size`).
#[inline]
pub fn unreachable_distance(size: usize) -> i32 {
    2 * size as i32
}

/// Minimal number of empty cells `player` must still claim to connect.
///
/// 0 means the player is already connected; [`unreachable_distance`] means the
/// opponent has cut every path.
pub fn distance(board: &Board, player: Player) -> i32 {
    let size = board.size();
    let mut best = vec![i32::MAX; size * size];
    let mut settled = vec![false; size * size];
    let mut heap = BinaryHeap::with_capacity(size * 4);

    for i in 0..size {
        let pos = player.start_edge(i);
        if let Some(cost) = entry_cost(board.cell(pos), player) {
            let idx = pos.to_index(size);
            best[idx] = cost;
            heap.push(Reverse((cost, idx)));
        }
    }

    while let Some(Reverse((cost, idx))) = heap.pop() {
        if settled[idx] {
            continue;
        }
        settled[idx] = true;

        let pos = Pos::from_index(idx, size);
        if player.reaches_end(pos, size) {
            return cost;
        }

        for nb in board.neighbors(pos) {
            let nidx = nb.to_index(size);
            if settled[nidx] {
                continue;
            }
            if let Some(step) = entry_cost(board.cell(nb), player) {
                let next = cost + step;
                if next < best[nidx] {
                    best[nidx] = next;
                    heap.push(Reverse((next, nidx)));
                }
            }
        }
    }

    unreachable_distance(size)
}
