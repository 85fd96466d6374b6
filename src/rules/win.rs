//! Win condition checking for Hex
//!
//! A player wins by linking their two edges with an unbroken chain of their
//! own stones: Red joins column 0 to the last column, Blue joins row 0 to the
//! last row.

use std::collections::VecDeque;

use crate::board::{Board, Player, Pos};

/// Check whether `player` has a chain touching both of their edges.
///
/// Flood fill seeded from every stone the player owns on their start edge.
/// Each cell is visited at most once, so this is O(size²).
pub fn has_connection(board: &Board, player: Player) -> bool {
    let size = board.size();
    let own = player.to_cell();
    let mut visited = vec![false; size * size];
    let mut stack = Vec::with_capacity(size * 2);

    for i in 0..size {
        let pos = player.start_edge(i);
        if board.cell(pos) == own {
            visited[pos.to_index(size)] = true;
            stack.push(pos);
        }
    }

    while let Some(pos) = stack.pop() {
        if player.reaches_end(pos, size) {
            return true;
        }
        for nb in board.neighbors(pos) {
            let idx = nb.to_index(size);
            if !visited[idx] && board.cell(nb) == own {
                visited[idx] = true;
                stack.push(nb);
            }
        }
    }

    false
}

/// The connected player, if any.
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::Red, Player::Blue]
        .into_iter()
        .find(|&p| has_connection(board, p))
}

/// Find a shortest chain of `player` stones linking their edges.
///
/// Breadth-first over own stones, so the returned path has the fewest cells
/// among all connecting chains. Ordered from the start edge to the far edge.
pub fn find_winning_path(board: &Board, player: Player) -> Option<Vec<Pos>> {
    let size = board.size();
    let own = player.to_cell();
    let mut parent: Vec<Option<usize>> = vec![None; size * size];
    let mut visited = vec![false; size * size];
    let mut queue = VecDeque::new();

    for i in 0..size {
        let pos = player.start_edge(i);
        if board.cell(pos) == own {
            visited[pos.to_index(size)] = true;
            queue.push_back(pos);
        }
    }

    while let Some(pos) = queue.pop_front() {
        if player.reaches_end(pos, size) {
            let mut path = vec![pos];
            let mut idx = pos.to_index(size);
            while let Some(prev) = parent[idx] {
                path.push(Pos::from_index(prev, size));
                idx = prev;
            }
            path.reverse();
            return Some(path);
        }
        for nb in board.neighbors(pos) {
            let idx = nb.to_index(size);
            if !visited[idx] && board.cell(nb) == own {
                visited[idx] = true;
                parent[idx] = Some(pos.to_index(size));
                queue.push_back(nb);
            }
        }
    }

    None
}
