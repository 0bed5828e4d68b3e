//! Command-line interface for the Jump61 binaries.

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::board::{Side, DEFAULT_SIZE};
use crate::config::{GameConfig, SearchConfig, DEFAULT_DEPTH, DEFAULT_TIME_LIMIT_MS};

/// Side the human plays in the GUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HumanSide {
    Red,
    Blue,
    /// Watch the AI play itself
    None,
}

impl From<HumanSide> for Option<Side> {
    fn from(side: HumanSide) -> Self {
        match side {
            HumanSide::Red => Some(Side::Red),
            HumanSide::Blue => Some(Side::Blue),
            HumanSide::None => None,
        }
    }
}

/// Options shared by every binary
#[derive(clap::Args, Debug, Clone)]
pub struct SessionArgs {
    /// Board side length (at least 1)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SIZE,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub size: usize,

    /// Search depth in plies
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u8,

    /// Time budget per AI move, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_MS)]
    pub time_limit_ms: u64,

    /// Seed for the AI's fallback move
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SessionArgs {
    pub fn game_config(&self, human: Option<Side>) -> GameConfig {
        GameConfig {
            size: self.size,
            human,
            search: SearchConfig::new(self.depth, self.time_limit_ms),
            seed: self.seed,
        }
    }
}

/// Jump61 - chain-reaction board game against a minimax AI
#[derive(Parser, Debug)]
#[command(name = "jump61")]
#[command(about = "Play Jump61 against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Side played with the mouse
    #[arg(long, value_enum, default_value = "red")]
    pub human: HumanSide,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        self.session.game_config(self.human.into())
    }
}

/// Jump61 self-play - two AI players on one board
#[derive(Parser, Debug)]
#[command(name = "selfplay")]
#[command(about = "Let the AI play both sides and print the result", long_about = None)]
#[command(version)]
pub struct SelfPlayCli {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Stop after this many moves
    #[arg(long, default_value = "1000")]
    pub max_turns: usize,

    /// Print the board after every move
    #[arg(short, long)]
    pub verbose: bool,
}

impl SelfPlayCli {
    pub fn game_config(&self) -> GameConfig {
        self.session.game_config(None)
    }
}

/// Install the fmt subscriber; `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();
}
