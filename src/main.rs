use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use connect_four::config::{AppConfig, FirstPlayer};
use connect_four::play::{run_game, ConsoleInput, ConsolePresenter};
use connect_four::ui::App;

/// Play Connect Four against another person at the same console.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Seed for choosing the starting player
    #[arg(long)]
    seed: Option<u64>,

    /// Who moves first
    #[arg(long, value_enum)]
    first: Option<FirstPlayer>,

    /// Use the full-screen terminal UI instead of line prompts
    #[arg(long)]
    tui: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        app_config.game.seed = Some(seed);
    }
    if let Some(first) = cli.first {
        app_config.game.first_player = first;
    }

    if cli.tui {
        return run_tui(&app_config).context("running terminal UI");
    }

    init_logging(&app_config)?;

    let mut state = app_config.game.new_game();
    let stdin = io::stdin();
    let mut input = ConsoleInput::new(stdin.lock(), io::stdout());
    let mut presenter = ConsolePresenter::new(io::stdout());
    run_game(&mut state, &mut input, &mut presenter).context("playing console game")?;
    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config.logging.env_filter()?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn run_tui(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.game.clone());
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
