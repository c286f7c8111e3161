use super::player::Player;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of contiguous pieces needed to win.
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

/// Row/column step of each scan, in the order winners are reported:
/// horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped into `col` would land on, if any
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }

        let row = self.lowest_empty_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Scan the whole board for four in a row.
    ///
    /// Each direction is a separate full-board pass; the first line found in
    /// direction order, then row-major start position, decides the winner.
    pub fn winner(&self) -> Option<Player> {
        DIRECTIONS
            .iter()
            .find_map(|&(dr, dc)| self.scan_direction(dr, dc))
    }

    fn scan_direction(&self, dr: isize, dc: isize) -> Option<Player> {
        let span = (WIN_LENGTH - 1) as isize;
        for row in 0..ROWS as isize {
            for col in 0..COLS as isize {
                let end_row = row + dr * span;
                let end_col = col + dc * span;
                if end_row < 0 || end_row >= ROWS as isize || end_col < 0 || end_col >= COLS as isize
                {
                    continue;
                }
                if let Some(player) = self.line_owner(row, col, dr, dc) {
                    return Some(player);
                }
            }
        }
        None
    }

    /// Owner of the `WIN_LENGTH` cells starting at (row, col), if they all match.
    /// Callers guarantee the whole line is in bounds.
    fn line_owner(&self, row: isize, col: isize, dr: isize, dc: isize) -> Option<Player> {
        let first = self.cells[row as usize][col as usize];
        let player = Player::from_cell(first)?;
        let complete = (1..WIN_LENGTH as isize).all(|step| {
            self.cells[(row + dr * step) as usize][(col + dc * step) as usize] == first
        });
        complete.then_some(player)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
