//! # Connect Four
//!
//! Two-player Connect Four on a 6 × 7 board, played from the console.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, state machine
//! - [`play`] — Turn loop, input collectors and presenters
//! - [`render`] — Plain-text board rendering
//! - [`ui`] — Full-screen terminal UI
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod play;
pub mod render;
pub mod ui;
