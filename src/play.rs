//! Console turn loop: asks each player for a column, applies it to the game
//! state and reports every change to a presenter.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::error::{MoveError, PlayError};
use crate::game::{Board, GameState, GameStatus, Player, COLS};
use crate::render::board_to_string;

/// Source of column choices for the turn loop.
pub trait InputCollector {
    /// Ask `player` for a column in `0..COLS`. `Ok(None)` means no more input
    /// is coming and the game should be abandoned.
    fn next_column(&mut self, player: Player) -> Result<Option<usize>, PlayError>;
}

/// Receives game events for display.
pub trait Presenter {
    fn board_changed(&mut self, board: &Board) -> Result<(), PlayError>;

    fn move_rejected(&mut self, error: MoveError) -> Result<(), PlayError>;

    fn finished(&mut self, status: GameStatus) -> Result<(), PlayError>;
}

/// How a call to [`run_game`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Finished(GameStatus),
    Abandoned,
}

/// Line-oriented prompt reader. Re-prompts until it gets a number in range.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
    line: Vec<u8>,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        ConsoleInput {
            reader,
            writer,
            line: Vec::new(),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> InputCollector for ConsoleInput<R, W> {
    fn next_column(&mut self, player: Player) -> Result<Option<usize>, PlayError> {
        loop {
            write!(
                self.writer,
                "Drop a {} disk at column (0-{}): ",
                player.name(),
                COLS - 1
            )?;
            self.writer.flush()?;

            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }

            // Undecodable bytes are just another bad answer.
            let parsed = std::str::from_utf8(&self.line)
                .ok()
                .and_then(|text| text.trim().parse::<usize>().ok());
            match parsed {
                Some(col) if col < COLS => return Ok(Some(col)),
                _ => writeln!(
                    self.writer,
                    "Please enter a number between 0 and {}, inclusive!",
                    COLS - 1
                )?,
            }
        }
    }
}

/// Prints boards and results as plain text.
pub struct ConsolePresenter<W> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        ConsolePresenter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn board_changed(&mut self, board: &Board) -> Result<(), PlayError> {
        self.out.write_all(board_to_string(board).as_bytes())?;
        Ok(())
    }

    fn move_rejected(&mut self, error: MoveError) -> Result<(), PlayError> {
        match error {
            MoveError::ColumnFull(_) => {
                writeln!(self.out, "Column is full. Please choose another column.")?
            }
            other => writeln!(self.out, "{}", capitalize(&other.to_string()))?,
        }
        Ok(())
    }

    fn finished(&mut self, status: GameStatus) -> Result<(), PlayError> {
        match status {
            GameStatus::Win(player) => writeln!(self.out, "The {} player won", player.name())?,
            GameStatus::Draw => writeln!(self.out, "Boo-hoo! You Drew!")?,
            GameStatus::InProgress => {}
        }
        self.out.flush()?;
        Ok(())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Play `state` to completion.
///
/// Rejected moves are reported and the same player is asked again. The loop
/// only advances the turn after the board has been shown.
pub fn run_game<I, P>(
    state: &mut GameState,
    input: &mut I,
    presenter: &mut P,
) -> Result<GameOutcome, PlayError>
where
    I: InputCollector + ?Sized,
    P: Presenter + ?Sized,
{
    if state.is_terminal() {
        return Ok(GameOutcome::Finished(state.status()));
    }

    presenter.board_changed(state.board())?;
    info!(first = ?state.turn(), "game started");

    loop {
        let player = state.turn();
        let Some(column) = input.next_column(player)? else {
            info!(moves = state.moves_played(), "input closed, game abandoned");
            return Ok(GameOutcome::Abandoned);
        };

        if let Err(err) = state.apply_move(column) {
            warn!(?player, column, %err, "move rejected");
            presenter.move_rejected(err)?;
            continue;
        }
        presenter.board_changed(state.board())?;

        let status = state.finish_turn();
        if status.is_terminal() {
            info!(?status, moves = state.moves_played(), "game over");
            presenter.finished(status)?;
            return Ok(GameOutcome::Finished(status));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    struct Scripted(VecDeque<usize>);

    impl InputCollector for Scripted {
        fn next_column(&mut self, _player: Player) -> Result<Option<usize>, PlayError> {
            Ok(self.0.pop_front())
        }
    }

    #[derive(Default)]
    struct Recording {
        boards: Vec<Board>,
        rejected: Vec<MoveError>,
        finished: Option<GameStatus>,
    }

    impl Presenter for Recording {
        fn board_changed(&mut self, board: &Board) -> Result<(), PlayError> {
            self.boards.push(*board);
            Ok(())
        }

        fn move_rejected(&mut self, error: MoveError) -> Result<(), PlayError> {
            self.rejected.push(error);
            Ok(())
        }

        fn finished(&mut self, status: GameStatus) -> Result<(), PlayError> {
            self.finished = Some(status);
            Ok(())
        }
    }

    fn scripted(columns: &[usize]) -> Scripted {
        Scripted(columns.iter().copied().collect())
    }

    #[test]
    fn test_console_input_reprompts_until_valid() {
        let mut input = ConsoleInput::new(Cursor::new("9\nabc\n-1\n 4 \n"), Vec::new());
        assert_eq!(input.next_column(Player::Yellow).unwrap(), Some(4));

        let out = String::from_utf8(input.into_writer()).unwrap();
        assert_eq!(out.matches("Drop a yellow disk at column (0-6): ").count(), 4);
        assert_eq!(
            out.matches("Please enter a number between 0 and 6, inclusive!").count(),
            3
        );
    }

    #[test]
    fn test_console_input_reprompts_on_invalid_utf8() {
        let bytes = vec![0xff, 0xfe, b'\n', b'3', b'\n'];
        let mut input = ConsoleInput::new(Cursor::new(bytes), Vec::new());
        assert_eq!(input.next_column(Player::Red).unwrap(), Some(3));

        let out = String::from_utf8(input.into_writer()).unwrap();
        assert_eq!(out.matches("Drop a red disk at column (0-6): ").count(), 2);
        assert_eq!(
            out.matches("Please enter a number between 0 and 6, inclusive!").count(),
            1
        );
    }

    #[test]
    fn test_console_input_eof() {
        let mut input = ConsoleInput::new(Cursor::new(""), Vec::new());
        assert_eq!(input.next_column(Player::Red).unwrap(), None);
    }

    #[test]
    fn test_vertical_win_through_console() {
        let mut state = GameState::with_first_player(Player::Red);
        let mut input = ConsoleInput::new(Cursor::new("0\n1\n0\n1\n0\n1\n0\n"), Vec::new());
        let mut presenter = ConsolePresenter::new(Vec::new());

        let outcome = run_game(&mut state, &mut input, &mut presenter).unwrap();
        assert_eq!(outcome, GameOutcome::Finished(GameStatus::Win(Player::Red)));

        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(out.ends_with("The red player won\n"));
        // Empty board plus one board per move
        assert_eq!(out.matches("---------------").count(), 8);
    }

    #[test]
    fn test_full_column_asks_same_player_again() {
        let mut state = GameState::with_first_player(Player::Yellow);
        let mut input = scripted(&[2, 2, 2, 2, 2, 2, 2, 5]);
        let mut presenter = Recording::default();

        let outcome = run_game(&mut state, &mut input, &mut presenter).unwrap();
        assert_eq!(outcome, GameOutcome::Abandoned);
        assert_eq!(presenter.rejected, vec![MoveError::ColumnFull(2)]);
        // Six moves alternate Y,R,Y,R,Y,R; the rejected seventh leaves Yellow to play 5
        assert_eq!(state.board().get(5, 5), crate::game::Cell::Yellow);
        assert_eq!(state.turn(), Player::Red);
        assert_eq!(presenter.boards.len(), 1 + 7);
    }

    #[test]
    fn test_column_full_message() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        presenter.move_rejected(MoveError::ColumnFull(1)).unwrap();
        presenter.move_rejected(MoveError::InvalidColumn(8)).unwrap();
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(
            out,
            "Column is full. Please choose another column.\nColumn 8 is out of range (expected 0-6)\n"
        );
    }

    #[test]
    fn test_draw_reported() {
        let mut state = GameState::with_first_player(Player::Red);
        let mut input = scripted(&[
            3, 4, 4, 6, 0, 3, 5, 2, 6, 5, 0, 6, 5, 0, 3, 6, 5, 6, 1, 3, 1, 3, 6, 5, 2, 0, 5, 3,
            4, 4, 0, 1, 1, 1, 0, 1, 4, 2, 4, 2, 2, 2,
        ]);
        let mut presenter = ConsolePresenter::new(Vec::new());

        let outcome = run_game(&mut state, &mut input, &mut presenter).unwrap();
        assert_eq!(outcome, GameOutcome::Finished(GameStatus::Draw));
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(out.ends_with("Boo-hoo! You Drew!\n"));
    }

    #[test]
    fn test_finished_game_is_not_replayed() {
        let mut state = GameState::with_first_player(Player::Red);
        for col in [0, 1, 0, 1, 0, 1, 0] {
            state.play(col).unwrap();
        }
        let mut input = scripted(&[3]);
        let mut presenter = Recording::default();

        let outcome = run_game(&mut state, &mut input, &mut presenter).unwrap();
        assert_eq!(outcome, GameOutcome::Finished(GameStatus::Win(Player::Red)));
        assert!(presenter.boards.is_empty());
        assert_eq!(input.0.len(), 1);
    }
}
