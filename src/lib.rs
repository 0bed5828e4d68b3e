//! Jump61 chain-reaction engine and AI
//!
//! Two players take turns adding spots to cells of an N x N grid. A cell
//! holding more spots than it has orthogonal neighbors fires: it keeps one
//! spot and pushes one into each neighbor, capturing it. Firings chain
//! until the board is stable or one side owns every cell.
//!
//! # Architecture
//!
//! - [`board`]: cells, the read-only [`Board`] view and [`MutableBoard`]
//!   (cascade, snapshot undo, observers)
//! - [`eval`]: threshold heuristic used at the search horizon
//! - [`search`]: minimax with best-move cutoff and a time budget
//! - [`engine`]: [`AIEngine`], which searches a private copy of the board
//! - [`player`] and [`game`]: the per-turn player contract and a reference
//!   controller
//! - [`ui`]: egui desktop front end, [`cli`]: command-line options shared
//!   by the binaries
//!
//! # Quick Start
//!
//! ```
//! use jump61::{AIEngine, Board, MutableBoard, Pos, Side};
//!
//! let mut board = MutableBoard::new(4);
//! board.add_spot(Side::Red, Pos::new(1, 1))?;
//!
//! // AI responds as Blue
//! let mut engine = AIEngine::with_config(2, 1_000);
//! if let Some(pos) = engine.choose_move(&board, Side::Blue)? {
//!     board.add_spot(Side::Blue, pos)?;
//!     println!("AI plays at {pos}");
//! }
//! assert_eq!(board.num_pieces(), 2);
//! # Ok::<(), jump61::GameError>(())
//! ```

pub mod board;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod player;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, BoardEvent, Cell, MutableBoard, Pos, Side, DEFAULT_SIZE};
pub use config::{GameConfig, SearchConfig};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::GameError;
pub use game::Game;
pub use player::{AiPlayer, GameContext, HumanPlayer, Player};
