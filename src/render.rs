//! Plain-text board rendering for the line-oriented console.

use std::fmt;

use crate::game::{Board, Cell, Player, COLS, ROWS};

fn cell_symbol(cell: Cell) -> char {
    Player::from_cell(cell).map_or(' ', Player::symbol)
}

/// Render the board as `|R|Y| | | | | |` rows followed by a base line.
pub fn board_to_string(board: &Board) -> String {
    let width = 2 * COLS + 1;
    let mut out = String::with_capacity((width + 1) * (ROWS + 1));
    for row in 0..ROWS {
        out.push('|');
        for col in 0..COLS {
            out.push(cell_symbol(board.get(row, col)));
            out.push('|');
        }
        out.push('\n');
    }
    out.extend(std::iter::repeat('-').take(width));
    out.push('\n');
    out
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&board_to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let text = board_to_string(&Board::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert!(lines[..ROWS].iter().all(|l| *l == "| | | | | | | |"));
        assert_eq!(lines[ROWS], "---------------");
    }

    #[test]
    fn test_pieces_rendered_bottom_up() {
        let mut board = Board::new();
        board.drop_piece(0, Cell::Red).unwrap();
        board.drop_piece(0, Cell::Yellow).unwrap();
        board.drop_piece(6, Cell::Yellow).unwrap();

        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], "|R| | | | | |Y|");
        assert_eq!(lines[4], "|Y| | | | | | |");
        assert_eq!(lines[3], "| | | | | | | |");
    }
}
