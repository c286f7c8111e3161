//! Full-screen terminal front end: a column selector over the same game
//! state the console loop drives.

mod app;
mod game_view;

pub use app::App;
