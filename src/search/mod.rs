//! Search module for the Jump61 AI
//!
//! Contains the depth-limited minimax searcher with best-move cutoff and a
//! wall-clock budget.

pub mod minimax;

pub use minimax::{SearchResult, Searcher};
