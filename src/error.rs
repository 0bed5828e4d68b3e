//! Error type shared by the board, the search engine and the controller

use crate::board::{Pos, Side};

/// Errors raised by board mutation and move handling.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    /// The target cell belongs to the opponent, is off the board,
    /// or the game is already decided.
    #[error("illegal move for {side} at {pos}")]
    IllegalMove { side: Side, pos: Pos },

    /// A position outside the `size` x `size` grid.
    #[error("position ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// A linear index outside `1..=cells`.
    #[error("square number {n} is outside 1..={cells}")]
    InvalidIndex { n: usize, cells: usize },

    /// A neutral cell with spots, or an owned cell without any.
    #[error("invalid cell: {spots} spots for {side}")]
    InvalidCell { side: Side, spots: u32 },

    /// A cascade ran past the step ceiling. Unreachable under the game
    /// rules; reported instead of looping forever.
    #[error("cascade exceeded {steps} steps")]
    CascadeOverflow { steps: usize },
}
