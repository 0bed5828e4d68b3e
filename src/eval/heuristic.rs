//! Threshold heuristic for Jump61 positions
//!
//! The evaluation is deliberately coarse: a side that holds more than
//! [`DOMINANCE_FRACTION`] of the cells scores [`DOMINANCE_SCORE`], anything
//! else scores zero. The search relies on the exact values, so changing
//! them changes how the engine plays.

use crate::board::{Board, Side};

/// Score of a position the side to move has already won. The search adds
/// the remaining depth so that quicker wins score higher.
pub const WIN_SCORE: i32 = 23_333;

/// Score of a position the side to move has already lost
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Share of the board above which a side counts as dominant
pub const DOMINANCE_FRACTION: f64 = 0.8;

/// Score of a dominant, undecided position
pub const DOMINANCE_SCORE: i32 = 255;

/// Evaluate `board` from the perspective of `side`. Higher is better for `side`.
#[must_use]
pub fn evaluate<B: Board + ?Sized>(board: &B, side: Side) -> i32 {
    let cells = board.num_cells() as f64;
    if board.num_of_side(side) as f64 > DOMINANCE_FRACTION * cells {
        DOMINANCE_SCORE
    } else {
        0
    }
}
