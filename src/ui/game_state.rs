//! Game state management for the Jump61 GUI

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::player::{GameContext, HumanPlayer};
use crate::{AIEngine, BoardEvent, Game, GameConfig, GameError, MoveResult, MutableBoard, Pos, Side};

/// Number of board events kept for the side panel
const EVENT_LOG_LEN: usize = 8;

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human: Side },
    /// Player vs Player (hotseat)
    PvP { show_suggestions: bool },
    /// The AI plays both sides
    AiVsAi,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Side::Red }
    }
}

impl GameMode {
    pub fn from_config(config: &GameConfig) -> Self {
        match config.human {
            Some(human) => GameMode::PvE { human },
            None => GameMode::AiVsAi,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Result<MoveResult, GameError>>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub game: Game,
    pub mode: GameMode,
    pub config: GameConfig,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
    /// Most recent board changes, newest first
    pub event_log: VecDeque<String>,
    events: Receiver<BoardEvent>,
    hint_engine: AIEngine,
}

impl GameState {
    pub fn new(mode: GameMode, config: GameConfig) -> Self {
        let mut game = Game::new(config.size);
        let events = game.subscribe();
        Self {
            game,
            mode,
            config,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            event_log: VecDeque::new(),
            events,
            hint_engine: new_engine(&config, 0),
        }
    }

    pub fn reset(&mut self) {
        // A pending search belongs to the old game; its receiver is dropped.
        self.ai_state = AiState::Idle;
        self.game.restart(self.config.size);
        self.last_ai_result = None;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
        self.drain_events();
        self.event_log.clear();
    }

    #[inline]
    pub fn board(&self) -> &MutableBoard {
        self.game.board()
    }

    #[inline]
    pub fn current_turn(&self) -> Side {
        self.game.to_move()
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        self.game.winner()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn() == human,
            GameMode::PvP { .. } => true,
            GameMode::AiVsAi => false,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt a human move at the given position
    pub fn try_place(&mut self, pos: Pos) -> Result<(), String> {
        if self.winner().is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        let mut player = HumanPlayer::new(self.current_turn());
        self.game.queue_input(pos);
        match self.game.play_turn(&mut player) {
            Ok(true) => {
                self.after_move();
                Ok(())
            }
            Ok(false) => Err(self
                .game
                .last_error()
                .map_or_else(|| "Move not applied".to_string(), ToString::to_string)),
            Err(err) => Err(err.to_string()),
        }
    }

    /// Bookkeeping shared by human and AI moves
    fn after_move(&mut self) {
        self.suggested_move = None;
        self.move_timer.stop();
        self.message = None;
        if self.winner().is_none() {
            self.move_timer.start();
        }
    }

    /// Start AI thinking on a private copy of the board
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.winner().is_some() {
            return;
        }

        let board = MutableBoard::copy_from(self.board());
        let side = self.current_turn();
        let mut engine = new_engine(&self.config, self.game.move_history().len() as u64);

        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.choose_move_with_stats(&board, side);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((result, elapsed)) = result else {
            return;
        };
        self.ai_state = AiState::Idle;
        self.move_timer.set_ai_time(elapsed);

        let move_result = match result {
            Ok(move_result) => move_result,
            Err(err) => {
                warn!(%err, "AI search failed");
                self.message = Some(err.to_string());
                return;
            }
        };
        self.last_ai_result = Some(move_result.clone());

        let Some(pos) = move_result.best_move else {
            self.message = Some("AI could not find a move".to_string());
            return;
        };
        let side = self.current_turn();
        match self.game.make_move(pos) {
            Ok(()) => {
                self.game.report_move(side, pos);
                self.after_move();
                self.message = self.game.last_report().map(str::to_string);
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Quick shallow suggestion for the side to move
    pub fn request_suggestion(&mut self) {
        if self.winner().is_some() || self.is_ai_thinking() {
            return;
        }
        let side = self.current_turn();
        match self.hint_engine.suggest(self.game.board(), side) {
            Ok(pos) => self.suggested_move = pos,
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.game.move_history().is_empty() || self.is_ai_thinking() {
            return;
        }

        if !self.game.undo_turn() {
            return;
        }
        // For PvE, also take back the AI's reply so the human is to move again
        if let GameMode::PvE { human } = self.mode {
            if self.current_turn() != human {
                self.game.undo_turn();
            }
        }

        self.suggested_move = None;
        self.message = None;
        self.move_timer.start();
    }

    /// Move pending board events into the log
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            let line = match event {
                BoardEvent::SpotAdded { side, pos } => format!("{side} added a spot at {pos}"),
                BoardEvent::CellSet { pos } => format!("cell {pos} set"),
                BoardEvent::Cleared { size } => format!("new {size}x{size} board"),
                BoardEvent::Undone => "move taken back".to_string(),
            };
            self.event_log.push_front(line);
            self.event_log.truncate(EVENT_LOG_LEN);
        }
    }
}

/// Engine seeded from the session config; `salt` varies the seed per move.
fn new_engine(config: &GameConfig, salt: u64) -> AIEngine {
    match config.seed {
        Some(seed) => AIEngine::with_seed(config.search, seed.wrapping_add(salt)),
        None => AIEngine::with_search_config(config.search),
    }
}
