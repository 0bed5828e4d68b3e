//! GUI module for the Jump61 game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::Jump61App;
pub use game_state::{GameMode, GameState};
