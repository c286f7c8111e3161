//! Core Connect Four game logic: board representation, player types, and the
//! in-place game state machine.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, COLS, ROWS, WIN_LENGTH};
pub use player::Player;
pub use state::{GameState, GameStatus};
