use crate::config::GameConfig;
use crate::error::MoveError;
use crate::game::{GameState, GameStatus, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    config: GameConfig,
    game_state: GameState,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        App {
            game_state: config.new_game(),
            config,
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: None,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '0'..='6') => {
                self.selected_column = c as usize - '0' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.game_state = self.config.new_game();
                self.selected_column = COLS / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.game_state.play(self.selected_column) {
            Ok((_, GameStatus::Win(player))) => {
                self.message = Some(format!("The {} player won", player.name()));
            }
            Ok((_, GameStatus::Draw)) => {
                self.message = Some("Boo-hoo! You Drew!".to_string());
            }
            Ok((_, GameStatus::InProgress)) => {}
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full. Please choose another column.".to_string());
            }
            Err(MoveError::InvalidColumn(col)) => {
                self.message = Some(format!("Invalid column {col}!"));
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game_state, self.selected_column, &self.message);
    }
}
