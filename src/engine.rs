//! Main AI engine
//!
//! The engine never searches the board it is given. Each call copies the
//! position into a private scratch [`MutableBoard`], runs the minimax
//! searcher on that copy, and falls back to a uniformly random legal move
//! when every candidate looks equally lost.
//!
//! # Example
//!
//! ```
//! use jump61::{AIEngine, Board, MutableBoard, Pos, Side};
//!
//! let mut engine = AIEngine::with_config(2, 1_000);
//! let mut board = MutableBoard::new(3);
//! board.add_spot(Side::Red, Pos::new(2, 2)).unwrap();
//!
//! let result = engine.choose_move_with_stats(&board, Side::Blue).unwrap();
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! assert!(board.is_legal(Side::Blue, result.best_move.unwrap()));
//! ```

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::info;

use crate::board::{Board, MutableBoard, Pos, Side};
use crate::config::SearchConfig;
use crate::error::GameError;
use crate::eval::LOSS_SCORE;
use crate::search::{SearchResult, Searcher};

/// Depth used for hints
const HINT_DEPTH: u8 = 2;

/// How the move in a [`MoveResult`] was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Best move of the minimax search
    Minimax,
    /// Every move scored as a loss (or the clock ran out before any move
    /// was scored), so a random legal move was picked
    RandomFallback,
    /// The position is already won; there is nothing to play
    Decided,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Move to play, `None` only for decided positions
    pub best_move: Option<Pos>,
    /// Minimax score of the position for the side to move
    pub score: i32,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of minimax calls
    pub nodes: u64,
    /// True if the time budget cut the search short
    pub timed_out: bool,
}

impl MoveResult {
    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::Minimax,
            time_ms,
            nodes: result.nodes,
            timed_out: result.timed_out,
        }
    }

    #[inline]
    fn random(pos: Option<Pos>, result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: result.score,
            search_type: SearchType::RandomFallback,
            time_ms,
            nodes: result.nodes,
            timed_out: result.timed_out,
        }
    }

    #[inline]
    fn decided(score: i32, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score,
            search_type: SearchType::Decided,
            time_ms,
            nodes: 0,
            timed_out: false,
        }
    }
}

/// Automated Jump61 player.
///
/// Holds the searcher configuration and the random source for the
/// fallback move. Seed it with [`AIEngine::with_seed`] for reproducible
/// games.
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
    rng: StdRng,
}

impl AIEngine {
    /// Engine with the default configuration: depth 5, 15 s per move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_search_config(SearchConfig::default())
    }

    /// Engine searching `max_depth` plies within `time_limit_ms`.
    #[must_use]
    pub fn with_config(max_depth: u8, time_limit_ms: u64) -> Self {
        Self::with_search_config(SearchConfig::new(max_depth, time_limit_ms))
    }

    #[must_use]
    pub fn with_search_config(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Engine whose fallback moves are reproducible.
    #[must_use]
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            searcher: Searcher::new(config),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a move for `side` on `board`.
    ///
    /// Returns `Ok(None)` only when the game is already decided. `board`
    /// is not modified.
    pub fn choose_move(&mut self, board: &dyn Board, side: Side) -> Result<Option<Pos>, GameError> {
        Ok(self.choose_move_with_stats(board, side)?.best_move)
    }

    /// Choose a move for `side` on `board` and report how it was found.
    pub fn choose_move_with_stats(
        &mut self,
        board: &dyn Board,
        side: Side,
    ) -> Result<MoveResult, GameError> {
        let start = Instant::now();

        if let Some(winner) = board.winner() {
            let score = if winner == side { -LOSS_SCORE } else { LOSS_SCORE };
            return Ok(MoveResult::decided(score, elapsed_ms(start)));
        }

        let mut scratch = MutableBoard::copy_from(board);
        let result = self.searcher.search(&mut scratch, side)?;
        debug_assert_eq!(scratch.history_len(), 0);

        let move_result = if result.best_move.is_some() {
            MoveResult::from_search(result, elapsed_ms(start))
        } else {
            let legal = scratch.legal_moves(side);
            let pos = legal.choose(&mut self.rng).copied();
            MoveResult::random(pos, result, elapsed_ms(start))
        };

        if let Some(pos) = move_result.best_move {
            info!(
                %side,
                %pos,
                score = move_result.score,
                nodes = move_result.nodes,
                time_ms = move_result.time_ms,
                search_type = ?move_result.search_type,
                "move chosen"
            );
        }
        Ok(move_result)
    }

    /// Quick, shallow suggestion for `side`, used for hints.
    pub fn suggest(&mut self, board: &dyn Board, side: Side) -> Result<Option<Pos>, GameError> {
        let depth = self.max_depth();
        self.set_max_depth(depth.min(HINT_DEPTH));
        let suggestion = self.choose_move(board, side);
        self.set_max_depth(depth);
        suggestion
    }

    /// Set maximum search depth
    pub fn set_max_depth(&mut self, depth: u8) {
        self.searcher.config_mut().depth = depth;
    }

    /// Set per-move time budget
    pub fn set_time_limit(&mut self, time_ms: u64) {
        self.searcher.config_mut().time_limit = Duration::from_millis(time_ms);
    }

    /// Current maximum depth
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.searcher.config().depth
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        self.searcher.config()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::WIN_SCORE;
    use std::collections::BTreeSet;

    fn seeded(depth: u8) -> AIEngine {
        AIEngine::with_seed(SearchConfig::new(depth, 10_000), 61)
    }

    /// Red owns every cell but (3,3); playing (3,2) captures it.
    fn one_move_from_win() -> MutableBoard {
        let mut board = MutableBoard::new(3);
        for n in 1..=9 {
            board.set(board.pos_of(n).unwrap(), 1, Side::Red).unwrap();
        }
        board.set(Pos::new(3, 2), 3, Side::Red).unwrap();
        board.set(Pos::new(3, 3), 1, Side::Blue).unwrap();
        board
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.max_depth(), 5);
        assert_eq!(engine.config().time_limit, Duration::from_secs(15));
        assert_eq!(engine.config().check_interval, 10_000);
    }

    #[test]
    fn test_engine_set_depth_and_time() {
        let mut engine = AIEngine::with_config(3, 500);
        assert_eq!(engine.max_depth(), 3);
        engine.set_max_depth(4);
        engine.set_time_limit(2_000);
        assert_eq!(engine.max_depth(), 4);
        assert_eq!(engine.config().time_limit, Duration::from_secs(2));
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let board = one_move_from_win();
        let mut engine = seeded(2);
        let result = engine.choose_move_with_stats(&board, Side::Red).unwrap();

        assert_eq!(result.best_move, Some(Pos::new(3, 2)));
        assert_eq!(result.score, WIN_SCORE + 1);
        assert_eq!(result.search_type, SearchType::Minimax);
    }

    #[test]
    fn test_engine_default_depth_plays_winning_line() {
        let board = one_move_from_win();
        let before = MutableBoard::copy_from(&board);
        let mut engine = seeded(5);
        let result = engine.choose_move_with_stats(&board, Side::Red).unwrap();

        assert_eq!(result.best_move, Some(Pos::new(3, 2)));
        assert_eq!(result.score, WIN_SCORE + 4);
        assert_eq!(result.search_type, SearchType::Minimax);
        assert_eq!(board, before);
    }

    #[test]
    fn test_engine_leaves_board_unchanged() {
        let mut board = MutableBoard::new(4);
        board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
        board.add_spot(Side::Blue, Pos::new(4, 4)).unwrap();
        board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
        let before = MutableBoard::copy_from(&board);

        let mut engine = seeded(3);
        let pos = engine.choose_move(&board, Side::Blue).unwrap().unwrap();

        assert!(board.is_legal(Side::Blue, pos));
        assert_eq!(board, before);
        assert_eq!(board.history_len(), 3);
    }

    #[test]
    fn test_engine_random_fallback_is_legal() {
        let board = one_move_from_win();
        let mut engine = seeded(2);
        let result = engine.choose_move_with_stats(&board, Side::Blue).unwrap();

        assert_eq!(result.search_type, SearchType::RandomFallback);
        assert_eq!(result.best_move, Some(Pos::new(3, 3)));
    }

    #[test]
    fn test_engine_random_fallback_varies_with_seed() {
        // 2x2 corners: Red fires (1,1) and sweeps the board whichever of
        // its two cells Blue reinforces.
        let mut board = MutableBoard::new(2);
        board.set(Pos::new(1, 1), 2, Side::Red).unwrap();
        board.set(Pos::new(1, 2), 1, Side::Blue).unwrap();
        board.set(Pos::new(2, 1), 1, Side::Blue).unwrap();
        board.set(Pos::new(2, 2), 2, Side::Red).unwrap();

        let picks: BTreeSet<Pos> = (0..32)
            .map(|seed| {
                let mut engine = AIEngine::with_seed(SearchConfig::new(2, 10_000), seed);
                let result = engine.choose_move_with_stats(&board, Side::Blue).unwrap();
                assert_eq!(result.search_type, SearchType::RandomFallback);
                assert_eq!(result.score, LOSS_SCORE);
                result.best_move.unwrap()
            })
            .collect();

        assert_eq!(picks, BTreeSet::from([Pos::new(1, 2), Pos::new(2, 1)]));
    }

    #[test]
    fn test_engine_timeout_still_moves() {
        let mut board = MutableBoard::new(5);
        board.add_spot(Side::Red, Pos::new(3, 3)).unwrap();

        let mut engine = AIEngine::with_seed(
            SearchConfig {
                depth: 8,
                time_limit: Duration::ZERO,
                check_interval: 1,
            },
            3,
        );
        let result = engine.choose_move_with_stats(&board, Side::Blue).unwrap();

        assert!(result.timed_out);
        assert_eq!(result.search_type, SearchType::RandomFallback);
        assert!(board.is_legal(Side::Blue, result.best_move.unwrap()));
    }

    #[test]
    fn test_engine_decided_board() {
        let mut board = MutableBoard::new(2);
        for n in 1..=4 {
            board.set(board.pos_of(n).unwrap(), 2, Side::Red).unwrap();
        }
        let mut engine = seeded(5);
        let result = engine.choose_move_with_stats(&board, Side::Blue).unwrap();

        assert_eq!(result.best_move, None);
        assert_eq!(result.search_type, SearchType::Decided);
        assert_eq!(result.score, LOSS_SCORE);
    }

    #[test]
    fn test_suggest_restores_depth() {
        let mut board = MutableBoard::new(3);
        board.add_spot(Side::Red, Pos::new(1, 1)).unwrap();
        let mut engine = seeded(5);

        let hint = engine.suggest(&board, Side::Blue).unwrap();
        assert!(board.is_legal(Side::Blue, hint.unwrap()));
        assert_eq!(engine.max_depth(), 5);
    }
}
