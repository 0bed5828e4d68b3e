//! Players: the per-turn move producers driven by a game controller

use tracing::debug;

use crate::board::{Board, Pos, Side};
use crate::engine::AIEngine;
use crate::error::GameError;

/// What a player sees of the game it is playing in.
///
/// Implemented by the controller that owns the authoritative board.
pub trait GameContext {
    /// The authoritative board (read-only)
    fn board(&self) -> &dyn Board;

    /// Apply a move for the side to move
    fn make_move(&mut self, pos: Pos) -> Result<(), GameError>;

    /// Announce a move chosen by an automated player
    fn report_move(&mut self, side: Side, pos: Pos);

    /// Next move typed or clicked by a human, `None` if none is available
    fn request_move(&mut self) -> Option<Pos>;

    /// Tell the human why their move was rejected
    fn report_error(&mut self, err: &GameError);
}

/// A participant that makes one move per turn.
pub trait Player {
    fn side(&self) -> Side;

    /// Make this turn's move in `game`.
    fn make_move(&mut self, game: &mut dyn GameContext) -> Result<(), GameError>;
}

/// Player whose moves come from the controller's input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanPlayer {
    side: Side,
}

impl HumanPlayer {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl Player for HumanPlayer {
    fn side(&self) -> Side {
        self.side
    }

    /// Takes one requested move. A rejected move is reported back and the
    /// turn ends without a move, so the controller asks again.
    fn make_move(&mut self, game: &mut dyn GameContext) -> Result<(), GameError> {
        let Some(pos) = game.request_move() else {
            return Ok(());
        };
        match game.make_move(pos) {
            Ok(()) => Ok(()),
            Err(err @ GameError::CascadeOverflow { .. }) => Err(err),
            Err(err) => {
                debug!(side = %self.side, %pos, %err, "rejected human move");
                game.report_error(&err);
                Ok(())
            }
        }
    }
}

/// Player that searches for its moves.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    side: Side,
    engine: AIEngine,
}

impl AiPlayer {
    pub fn new(side: Side, engine: AIEngine) -> Self {
        Self { side, engine }
    }

    pub fn engine_mut(&mut self) -> &mut AIEngine {
        &mut self.engine
    }
}

impl Player for AiPlayer {
    fn side(&self) -> Side {
        self.side
    }

    fn make_move(&mut self, game: &mut dyn GameContext) -> Result<(), GameError> {
        let Some(pos) = self.engine.choose_move(game.board(), self.side)? else {
            return Ok(());
        };
        game.make_move(pos)?;
        game.report_move(self.side, pos);
        Ok(())
    }
}
