//! Static evaluation used at the search horizon

pub mod heuristic;

pub use heuristic::{evaluate, DOMINANCE_FRACTION, DOMINANCE_SCORE, LOSS_SCORE, WIN_SCORE};
