//! Board representation for Hex

pub mod board;


// Re-exports
pub use board::Board;

use serde::{Deserialize, Serialize};

/// Default board size (11x11)
pub const DEFAULT_BOARD_SIZE: usize = 11;
pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 19;

/// Hexagonal adjacency laid over a square array.
/// Row and column grow down and right; the board is a rhombus.
pub const DIRECTIONS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

/// The two sides.
///
/// Red moves first and joins the left edge (column 0) to the right edge.
/// Blue joins the top edge (row 0) to the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    /// Get the other side
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    #[inline]
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Blue => Cell::Blue,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Blue => "Blue",
        }
    }

    /// The `i`-th cell of this player's starting edge.
    #[inline]
    pub fn start_edge(self, i: usize) -> Pos {
        match self {
            Player::Red => Pos::new(i as u8, 0),
            Player::Blue => Pos::new(0, i as u8),
        }
    }

    /// Whether `pos` lies on this player's far edge.
    #[inline]
    pub fn reaches_end(self, pos: Pos, size: usize) -> bool {
        match self {
            Player::Red => pos.col as usize == size - 1,
            Player::Blue => pos.row as usize == size - 1,
        }
    }
}

/// Cell states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Blue,
}

impl Cell {
    /// Owner of the stone in this cell, if any.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Blue => Some(Player::Blue),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    /// Manhattan distance between two positions.
    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        (self.row as i32 - other.row as i32).unsigned_abs()
            + (self.col as i32 - other.col as i32).unsigned_abs()
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A placed stone: where, and by whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub pos: Pos,
    pub player: Player,
}

impl Move {
    #[inline]
    pub fn new(pos: Pos, player: Player) -> Self {
        Self { pos, player }
    }
}
