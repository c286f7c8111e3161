use rand::Rng;
use tracing::{debug, instrument};

use super::{Board, Player, COLS};
use crate::error::MoveError;

/// Where a game stands. `Win` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Win(Player),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    turn: Player,
    status: GameStatus,
}

impl GameState {
    /// Create initial game state with a starting player drawn from `rng`
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_first_player(Player::random(rng))
    }

    /// Create initial game state with a fixed starting player
    pub fn with_first_player(first: Player) -> Self {
        GameState {
            board: Board::new(),
            turn: first,
            status: GameStatus::InProgress,
        }
    }

    /// Player whose piece the next move drops
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Status recorded by the last `finish_turn`
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn moves_played(&self) -> usize {
        self.board.piece_count()
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's piece into `column` and return the row it
    /// landed on. The turn is not advanced; see [`GameState::finish_turn`].
    #[instrument(skip(self), fields(player = ?self.turn))]
    pub fn apply_move(&mut self, column: usize) -> Result<usize, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(column, self.turn.to_cell())?;
        debug!(row, "piece placed");
        Ok(row)
    }

    /// Classify the current board without touching it.
    pub fn evaluate(&self) -> GameStatus {
        if let Some(winner) = self.board.winner() {
            GameStatus::Win(winner)
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Record the board's status and, if the game goes on, hand the turn to
    /// the other player.
    pub fn finish_turn(&mut self) -> GameStatus {
        if self.is_terminal() {
            return self.status;
        }

        self.status = self.evaluate();
        if self.status == GameStatus::InProgress {
            self.turn = self.turn.other();
        }
        self.status
    }

    /// Apply a move and close the turn in one step.
    pub fn play(&mut self, column: usize) -> Result<(usize, GameStatus), MoveError> {
        let row = self.apply_move(column)?;
        Ok((row, self.finish_turn()))
    }
}
