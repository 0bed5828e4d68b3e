//! Headless self-play: the AI plays both sides and the final board is printed.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use jump61::cli::{init_tracing, SelfPlayCli};
use jump61::{AIEngine, AiPlayer, Board, Game, GameConfig, GameError, Player, Side};

fn player(side: Side, config: &GameConfig) -> AiPlayer {
    let engine = match config.seed {
        Some(seed) => AIEngine::with_seed(config.search, seed.wrapping_add(side as u64)),
        None => AIEngine::with_search_config(config.search),
    };
    AiPlayer::new(side, engine)
}

fn run(cli: &SelfPlayCli) -> Result<Option<Side>, GameError> {
    let config = cli.game_config();
    let mut game = Game::new(config.size);
    let mut red = player(Side::Red, &config);
    let mut blue = player(Side::Blue, &config);

    if !cli.verbose {
        let winner = game.play(&mut red, &mut blue, cli.max_turns)?;
        println!("{}", game.board());
        return Ok(winner);
    }

    for _ in 0..cli.max_turns {
        if game.winner().is_some() {
            break;
        }
        let current: &mut dyn Player = if game.to_move() == Side::Red { &mut red } else { &mut blue };
        if !game.play_turn(current)? {
            break;
        }
        if let Some(report) = game.last_report() {
            println!("{report}");
        }
        println!("{}", game.board());
    }
    info!(moves = game.move_history().len(), pieces = game.board().num_pieces(), "game finished");
    Ok(game.winner())
}

fn main() -> ExitCode {
    let cli = SelfPlayCli::parse();
    init_tracing("warn");

    match run(&cli) {
        Ok(Some(winner)) => {
            println!("{winner} wins.");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("No winner after {} moves.", cli.max_turns);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "self-play aborted");
            ExitCode::FAILURE
        }
    }
}
