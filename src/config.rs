//! Tunable settings for the search engine and the front ends

use std::time::Duration;

use crate::board::{Side, DEFAULT_SIZE};

/// Search depth used when nothing else is configured
pub const DEFAULT_DEPTH: u8 = 5;

/// Wall-clock budget per move
pub const DEFAULT_TIME_LIMIT_MS: u64 = 15_000;

/// Number of minimax calls between two looks at the clock
pub const DEFAULT_CHECK_INTERVAL: u64 = 10_000;

/// Search engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root
    pub depth: u8,
    /// Budget after which the search returns its best move so far
    pub time_limit: Duration,
    /// Calls between elapsed-time checks (at least 1)
    pub check_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            time_limit: Duration::from_millis(DEFAULT_TIME_LIMIT_MS),
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

impl SearchConfig {
    pub fn new(depth: u8, time_limit_ms: u64) -> Self {
        Self {
            depth,
            time_limit: Duration::from_millis(time_limit_ms),
            ..Self::default()
        }
    }
}

/// Settings for one game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Board side length
    pub size: usize,
    /// Side played from the keyboard/mouse, `None` for AI-only games
    pub human: Option<Side>,
    pub search: SearchConfig,
    /// Fixed seed for the AI's fallback move, random when `None`
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            human: Some(Side::Red),
            search: SearchConfig::default(),
            seed: None,
        }
    }
}
