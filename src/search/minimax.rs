//! Minimax search with a best-move cutoff
//!
//! Negamax formulation: a node's score is from the point of view of the
//! side to move, and a child's score is negated on the way up. Only an
//! upper cutoff is threaded down (the negated best score so far), which
//! prunes the remaining siblings once a node is known to be good enough
//! for its parent to ignore.
//!
//! The searcher works on a scratch [`MutableBoard`] and undoes every move
//! it tries, so the board is identical before and after [`Searcher::search`].
//!
//! # Example
//!
//! ```
//! use jump61::board::{MutableBoard, Pos, Side};
//! use jump61::config::SearchConfig;
//! use jump61::search::Searcher;
//!
//! let mut board = MutableBoard::new(3);
//! board.add_spot(Side::Red, Pos::new(2, 2)).unwrap();
//!
//! let mut searcher = Searcher::new(SearchConfig::new(2, 1_000));
//! let result = searcher.search(&mut board, Side::Blue).unwrap();
//! assert!(result.best_move.is_some());
//! assert_eq!(board.history_len(), 1);
//! ```

use std::time::Instant;

use tracing::{debug, warn};

use crate::board::{Board, MutableBoard, Pos, Side};
use crate::config::SearchConfig;
use crate::error::GameError;
use crate::eval::{evaluate, LOSS_SCORE, WIN_SCORE};

/// Cutoff passed to the root: no score reaches it.
const NO_CUTOFF: i32 = i32::MAX;

/// Outcome of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found; `None` when every move scored as a certain loss,
    /// when the position is already decided, or when the clock ran out
    /// before the first candidate finished.
    pub best_move: Option<Pos>,
    /// Score of the best move for the side to move
    pub score: i32,
    /// Minimax calls made
    pub nodes: u64,
    /// True if the time budget cut the search short
    pub timed_out: bool,
}

/// Depth-limited minimax searcher with a wall-clock budget.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    nodes: u64,
    start_time: Option<Instant>,
    stopped: bool,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            nodes: 0,
            start_time: None,
            stopped: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Search `board` for `side` to the configured depth.
    ///
    /// `board` is mutated during the search but every change is undone
    /// before this returns, including on error.
    pub fn search(&mut self, board: &mut MutableBoard, side: Side) -> Result<SearchResult, GameError> {
        self.nodes = 0;
        self.stopped = false;
        self.start_time = Some(Instant::now());

        let (score, best_move) = self.minmax(side, board, self.config.depth, NO_CUTOFF)?;

        debug!(
            %side,
            score,
            nodes = self.nodes,
            timed_out = self.stopped,
            "search finished"
        );
        Ok(SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            timed_out: self.stopped,
        })
    }

    /// Poll the clock and raise the stop flag once the budget is spent.
    fn check_time(&mut self) {
        if self.stopped {
            return;
        }
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed();
            if elapsed >= self.config.time_limit {
                warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    nodes = self.nodes,
                    "time budget exhausted, returning best move so far"
                );
                self.stopped = true;
            }
        }
    }

    /// Return the minimum of `cutoff` and the minimax value of `board` for
    /// `side` searched `depth` plies deep, together with the move that
    /// reached it. Depth 0 evaluates statically.
    ///
    /// Decided positions score the win/loss sentinel pushed out by the
    /// remaining depth, so a win found nearer the root outranks a slower one.
    fn minmax(
        &mut self,
        side: Side,
        board: &mut MutableBoard,
        depth: u8,
        cutoff: i32,
    ) -> Result<(i32, Option<Pos>), GameError> {
        self.nodes += 1;
        if self.nodes % self.config.check_interval.max(1) == 0 {
            self.check_time();
        }

        let cells = board.num_cells();
        let remaining = i32::from(depth);
        if board.num_of_side(side) == cells {
            return Ok((WIN_SCORE + remaining, None));
        }
        if board.num_of_side(side.opposite()) == cells {
            return Ok((LOSS_SCORE - remaining, None));
        }
        if depth == 0 || self.stopped {
            return Ok((evaluate(board, side), None));
        }

        let mut best_score = LOSS_SCORE;
        let mut best_move = None;

        for n in 1..=cells {
            let Some(pos) = board.pos_of(n) else { continue };
            if !board.is_legal(side, pos) {
                continue;
            }

            board.add_spot(side, pos)?;
            let reply = self.minmax(side.opposite(), board, depth - 1, -best_score);
            board.undo();
            let (reply, _) = reply?;

            // A child interrupted by the clock has no trustworthy score
            if self.stopped {
                break;
            }

            let score = -reply;
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
                if best_score >= cutoff {
                    break;
                }
            }
        }

        Ok((best_score.min(cutoff), best_move))
    }
}
