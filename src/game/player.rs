use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Red, Player::Yellow];

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Yellow => Cell::Yellow,
        }
    }

    /// Owner of a cell, `None` for an empty one
    pub fn from_cell(cell: Cell) -> Option<Player> {
        match cell {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    /// Colour name as used in prompts ("red", "yellow")
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Yellow => "yellow",
        }
    }

    /// Capitalised name for headings
    pub fn label(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        }
    }

    /// Single-character piece symbol
    pub fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Yellow => 'Y',
        }
    }

    /// Pick either player with equal probability
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Player {
        Player::ALL[rng.random_range(0..Player::ALL.len())]
    }
}
