//! Board structure with neighbor enumeration

use std::fmt;

use super::{Cell, Player, Pos, DIRECTIONS, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::MoveError;

/// Square array of cells with hexagonal adjacency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    /// Number of non-empty cells
    stones: usize,
}

impl Board {
    /// Empty board. `size` is clamped to `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`
    /// so every coordinate fits a `Pos`.
    pub fn new(size: usize) -> Self {
        let size = size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            stones: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        let n = self.size as i32;
        row >= 0 && row < n && col >= 0 && col < n
    }

    /// Validate a coordinate.
    pub fn pos(&self, row: usize, col: usize) -> Result<Pos, MoveError> {
        if row < self.size && col < self.size {
            Ok(Pos::new(row as u8, col as u8))
        } else {
            Err(MoveError::InvalidCoordinate { row, col })
        }
    }

    /// Get cell state at a coordinate
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, MoveError> {
        let pos = self.pos(row, col)?;
        Ok(self.cell(pos))
    }

    /// Set cell state at a coordinate. Nothing changes on an invalid coordinate.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), MoveError> {
        let pos = self.pos(row, col)?;
        self.put(pos, cell);
        Ok(())
    }

    /// Get cell state at a position known to be on this board
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.to_index(self.size)]
    }

    /// Overwrite a cell known to be on this board.
    /// Search uses `put(pos, Cell::Empty)` to undo a placement.
    #[inline]
    pub fn put(&mut self, pos: Pos, cell: Cell) {
        let idx = pos.to_index(self.size);
        let old = self.cells[idx];
        match (old.is_empty(), cell.is_empty()) {
            (true, false) => self.stones += 1,
            (false, true) => self.stones -= 1,
            _ => {}
        }
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.cell(pos).is_empty()
    }

    /// In-bounds neighbors of `pos` (up to 6)
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> {
        let n = self.size as i32;
        let (row, col) = (pos.row as i32, pos.col as i32);
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            if r >= 0 && r < n && c >= 0 && c < n {
                Some(Pos::new(r as u8, c as u8))
            } else {
                None
            }
        })
    }

    /// Whether any neighbor of `pos` holds a stone
    #[inline]
    pub fn has_stone_neighbor(&self, pos: Pos) -> bool {
        self.neighbors(pos).any(|nb| !self.is_empty_at(nb))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    /// Stones owned by one player
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    /// Center cell (upper-left of the middle on even sizes)
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = ((self.size - 1) / 2) as u8;
        Pos::new(mid, mid)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size;
        (0..size * size).map(move |idx| Pos::from_index(idx, size))
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&pos| self.is_empty_at(pos))
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Build a board from a row matrix. Returns `None` unless the matrix is
    /// square with a supported size.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
            || rows.iter().any(|row| row.len() != size)
        {
            return None;
        }
        let mut board = Board::new(size);
        for (r, row) in rows.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                board.put(Pos::new(r as u8, c as u8), cell);
            }
        }
        Some(board)
    }

    /// Row matrix copy of the board
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }
}

/// Skewed text rendering: each row is shifted right by one column so the
/// hexagonal adjacency reads naturally.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.size {
            write!(f, "{:2}", c)?;
        }
        writeln!(f)?;

        for (r, row) in self.rows().enumerate() {
            write!(f, "{:2} {}", r, " ".repeat(r))?;
            for cell in row {
                let ch = match cell {
                    Cell::Red => " R",
                    Cell::Blue => " B",
                    Cell::Empty => " .",
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
