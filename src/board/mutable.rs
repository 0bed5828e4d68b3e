//! Mutable Jump61 board: cascade engine and snapshot undo history

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::{debug, trace, warn};

use super::{write_board, Board, Cell, Pos, Side};
use crate::error::GameError;

/// Cascade steps allowed per cell before a move is declared runaway.
const CASCADE_STEPS_PER_CELL: usize = 4096;

/// State change broadcast to subscribers after each mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A move was applied (including its whole cascade)
    SpotAdded { side: Side, pos: Pos },
    /// A cell was overwritten directly
    CellSet { pos: Pos },
    /// The board was reset to an empty `size` x `size` grid
    Cleared { size: usize },
    /// The most recent move was taken back
    Undone,
}

/// Cell contents plus per-side ownership counters.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Grid {
    cells: Vec<Cell>,
    /// Cells owned by Red and Blue
    owned: [usize; 2],
}

impl Grid {
    fn empty(size: usize) -> Self {
        Self {
            cells: vec![Cell::EMPTY; size * size],
            owned: [0; 2],
        }
    }

    /// Overwrite one cell, keeping the ownership counters in step.
    #[inline]
    fn put(&mut self, idx: usize, cell: Cell) {
        if let Some(slot) = self.cells[idx].side().slot() {
            self.owned[slot] -= 1;
        }
        if let Some(slot) = cell.side().slot() {
            self.owned[slot] += 1;
        }
        self.cells[idx] = cell;
    }
}

/// A Jump61 board that may be modified.
///
/// Every [`add_spot`](MutableBoard::add_spot) pushes a full copy of the
/// grid onto the undo history first, so [`undo`](MutableBoard::undo)
/// restores the exact previous state no matter how far the cascade spread.
#[derive(Debug)]
pub struct MutableBoard {
    size: usize,
    grid: Grid,
    history: Vec<Grid>,
    cascade_limit: usize,
    observers: Vec<Sender<BoardEvent>>,
}

impl MutableBoard {
    /// An empty `size` x `size` board
    pub fn new(size: usize) -> Self {
        debug_assert!(size >= 1);
        Self {
            size,
            grid: Grid::empty(size),
            history: Vec::new(),
            cascade_limit: CASCADE_STEPS_PER_CELL * size * size,
            observers: Vec::new(),
        }
    }

    /// A board with the contents of `board`, an empty undo history and
    /// no subscribers.
    pub fn copy_from(board: &dyn Board) -> Self {
        let mut copy = Self::new(board.size());
        for n in 1..=board.num_cells() {
            if let Some(pos) = board.pos_of(n) {
                copy.grid.put(n - 1, board.get(pos));
            }
        }
        copy
    }

    /// Number of moves that can currently be undone
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Override the cascade step ceiling (mainly for tests).
    pub fn set_cascade_limit(&mut self, steps: usize) {
        self.cascade_limit = steps;
    }

    /// Register an observer. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        let (tx, rx) = channel();
        self.observers.push(tx);
        rx
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        (pos.row - 1) * self.size + (pos.col - 1)
    }

    /// Add one spot for `side` at `pos` and run the resulting cascade.
    ///
    /// Fails with [`GameError::IllegalMove`] before touching anything if
    /// the move is not legal. On success the pre-move state is on the
    /// undo history and subscribers have been notified.
    pub fn add_spot(&mut self, side: Side, pos: Pos) -> Result<(), GameError> {
        if !self.is_legal(side, pos) {
            return Err(GameError::IllegalMove { side, pos });
        }
        self.history.push(self.grid.clone());
        if let Err(err) = self.cascade(side, pos) {
            warn!(%side, %pos, %err, "cascade aborted, restoring board");
            if let Some(prev) = self.history.pop() {
                self.grid = prev;
            }
            return Err(err);
        }
        self.announce(BoardEvent::SpotAdded { side, pos });
        Ok(())
    }

    /// Add a spot by linear index `n` (1-based).
    pub fn add_spot_at(&mut self, side: Side, n: usize) -> Result<(), GameError> {
        let pos = self.pos_of(n).ok_or(GameError::InvalidIndex {
            n,
            cells: self.num_cells(),
        })?;
        self.add_spot(side, pos)
    }

    /// Depth-first chain reaction. Each pending entry adds one spot; an
    /// overfull cell keeps a single spot and queues its neighbors so that
    /// the left neighbor's cascade finishes before the right one starts,
    /// then up, then down. Pending additions are dropped once a side owns
    /// the whole board.
    fn cascade(&mut self, side: Side, start: Pos) -> Result<(), GameError> {
        let mut pending = vec![start];
        let mut steps = 0usize;
        let mut firings = 0usize;

        while let Some(pos) = pending.pop() {
            if self.winner().is_some() {
                break;
            }
            steps += 1;
            if steps > self.cascade_limit {
                return Err(GameError::CascadeOverflow {
                    steps: self.cascade_limit,
                });
            }

            let idx = self.index(pos);
            let spots = self.grid.cells[idx].spots() + 1;
            self.grid.put(idx, Cell::owned(side, spots));
            if spots as usize <= self.neighbors(pos) {
                continue;
            }

            firings += 1;
            self.grid.put(idx, Cell::owned(side, 1));
            pending.extend(self.adjacent(pos).into_iter().rev());
        }

        if firings > 0 {
            trace!(%side, %start, steps, firings, "cascade");
        }
        Ok(())
    }

    /// Restore the state before the most recent `add_spot`.
    ///
    /// Returns false (and changes nothing) when the history is empty.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.grid = prev;
                debug!(remaining = self.history.len(), "undo");
                self.announce(BoardEvent::Undone);
                true
            }
            None => false,
        }
    }

    /// Reset to an empty `size` x `size` board and drop the undo history.
    pub fn clear(&mut self, size: usize) {
        debug_assert!(size >= 1);
        self.size = size;
        self.grid = Grid::empty(size);
        self.history.clear();
        self.cascade_limit = CASCADE_STEPS_PER_CELL * size * size;
        debug!(size, "board cleared");
        self.announce(BoardEvent::Cleared { size });
    }

    /// Overwrite the cell at `pos` with `spots` spots of `side`.
    ///
    /// No legality check, no cascade, no undo entry: this is for setting
    /// up positions.
    pub fn set(&mut self, pos: Pos, spots: u32, side: Side) -> Result<(), GameError> {
        if !self.contains(pos) {
            return Err(GameError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            });
        }
        let cell = Cell::new(side, spots)?;
        let idx = self.index(pos);
        self.grid.put(idx, cell);
        self.announce(BoardEvent::CellSet { pos });
        Ok(())
    }

    /// Notify subscribers, forgetting the ones that hung up.
    fn announce(&mut self, event: BoardEvent) {
        self.observers.retain(|tx| tx.send(event).is_ok());
    }
}

impl Board for MutableBoard {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn get(&self, pos: Pos) -> Cell {
        assert!(
            self.contains(pos),
            "{} is off a {}x{} board",
            pos,
            self.size,
            self.size
        );
        self.grid.cells[self.index(pos)]
    }

    #[inline]
    fn num_of_side(&self, side: Side) -> usize {
        match side.slot() {
            Some(slot) => self.grid.owned[slot],
            None => self.num_cells() - self.grid.owned[0] - self.grid.owned[1],
        }
    }

    fn num_pieces(&self) -> u32 {
        self.grid.cells.iter().map(|cell| cell.spots()).sum()
    }
}

/// Equal when the sizes match and every cell matches; history and
/// subscribers are not compared.
impl PartialEq for MutableBoard {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.grid.cells == other.grid.cells
    }
}

impl Eq for MutableBoard {}

impl Hash for MutableBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.grid.cells.hash(state);
    }
}

impl fmt::Display for MutableBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_board(self, f)
    }
}
