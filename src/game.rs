//! Reference game controller
//!
//! Owns the authoritative board, alternates turns between two players and
//! applies exactly one move per turn. Human input is fed through a queue so
//! front ends (and tests) can script it.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use tracing::{info, warn};

use crate::board::{Board, BoardEvent, MutableBoard, Pos, Side};
use crate::error::GameError;
use crate::player::{GameContext, Player};

/// One Jump61 game in progress
#[derive(Debug)]
pub struct Game {
    board: MutableBoard,
    to_move: Side,
    input: VecDeque<Pos>,
    move_history: Vec<(Side, Pos)>,
    last_report: Option<String>,
    last_error: Option<GameError>,
}

impl Game {
    /// New game on an empty `size` x `size` board, Red to move
    pub fn new(size: usize) -> Self {
        Self::from_board(MutableBoard::new(size))
    }

    /// Continue from a prepared position; the side to move follows the
    /// spot-count parity.
    pub fn from_board(board: MutableBoard) -> Self {
        let to_move = board.whose_move();
        Self {
            board,
            to_move,
            input: VecDeque::new(),
            move_history: Vec::new(),
            last_report: None,
            last_error: None,
        }
    }

    /// Start over on an empty board
    pub fn restart(&mut self, size: usize) {
        self.board.clear(size);
        self.to_move = Side::Red;
        self.input.clear();
        self.move_history.clear();
        self.last_report = None;
        self.last_error = None;
    }

    #[inline]
    pub fn board(&self) -> &MutableBoard {
        &self.board
    }

    /// Subscribe to changes of the authoritative board
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        self.board.subscribe()
    }

    #[inline]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        self.board.winner()
    }

    pub fn move_history(&self) -> &[(Side, Pos)] {
        &self.move_history
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.move_history.last().map(|&(_, pos)| pos)
    }

    /// Most recent announcement from an automated player
    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    /// Most recent rejected move, cleared by the next successful one
    pub fn last_error(&self) -> Option<&GameError> {
        self.last_error.as_ref()
    }

    /// Queue a move for the next human turn
    pub fn queue_input(&mut self, pos: Pos) {
        self.input.push_back(pos);
    }

    /// Apply `pos` for the side to move and pass the turn.
    pub fn make_move(&mut self, pos: Pos) -> Result<(), GameError> {
        let side = self.to_move;
        self.board.add_spot(side, pos)?;
        self.move_history.push((side, pos));
        self.last_error = None;

        match self.board.winner() {
            Some(winner) => {
                info!(%winner, moves = self.move_history.len(), "game over");
            }
            None => self.to_move = side.opposite(),
        }
        Ok(())
    }

    /// Take back the most recent move. Returns false if there is none.
    pub fn undo_turn(&mut self) -> bool {
        if !self.board.undo() {
            return false;
        }
        self.to_move = match self.move_history.pop() {
            Some((side, _)) => side,
            None => self.board.whose_move(),
        };
        true
    }

    /// Let `player` take its turn. Returns whether a move was applied.
    pub fn play_turn(&mut self, player: &mut dyn Player) -> Result<bool, GameError> {
        if self.winner().is_some() {
            return Ok(false);
        }
        if player.side() != self.to_move {
            warn!(player = %player.side(), to_move = %self.to_move, "player moved out of turn");
            return Ok(false);
        }
        let before = self.move_history.len();
        player.make_move(self)?;
        Ok(self.move_history.len() > before)
    }

    /// Alternate turns until someone wins, a player passes, or
    /// `max_turns` turns have been played. Returns the winner.
    pub fn play(
        &mut self,
        red: &mut dyn Player,
        blue: &mut dyn Player,
        max_turns: usize,
    ) -> Result<Option<Side>, GameError> {
        for _ in 0..max_turns {
            if self.winner().is_some() {
                break;
            }
            let player: &mut dyn Player = if self.to_move == Side::Red {
                &mut *red
            } else {
                &mut *blue
            };
            if !self.play_turn(player)? {
                break;
            }
        }
        Ok(self.winner())
    }
}

impl GameContext for Game {
    fn board(&self) -> &dyn Board {
        &self.board
    }

    fn make_move(&mut self, pos: Pos) -> Result<(), GameError> {
        Game::make_move(self, pos)
    }

    fn report_move(&mut self, side: Side, pos: Pos) {
        info!(%side, %pos, "reported move");
        self.last_report = Some(format!("{side} moves {pos}."));
    }

    fn request_move(&mut self) -> Option<Pos> {
        self.input.pop_front()
    }

    fn report_error(&mut self, err: &GameError) {
        warn!(%err, "move rejected");
        self.last_error = Some(err.clone());
    }
}
