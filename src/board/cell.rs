//! Cell contents: owning side and spot count

use std::fmt;

use crate::error::GameError;

/// Owner of a cell, or the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Neutral,
    Red,
    Blue,
}

impl Side {
    /// Get the opposing side. Neutral has no opponent.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
            Side::Neutral => Side::Neutral,
        }
    }

    /// True for the two sides that can move
    #[inline]
    pub fn is_player(self) -> bool {
        self != Side::Neutral
    }

    /// Slot in per-side counters (None for Neutral)
    #[inline]
    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            Side::Red => Some(0),
            Side::Blue => Some(1),
            Side::Neutral => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Neutral => "neutral",
            Side::Red => "red",
            Side::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Contents of one grid position.
///
/// A neutral cell is always empty and an owned cell always holds at
/// least one spot. The fields are private so that only [`Cell::new`]
/// (which checks this) and the board itself can build cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    side: Side,
    spots: u32,
}

impl Cell {
    /// The empty, unowned cell
    pub const EMPTY: Cell = Cell {
        side: Side::Neutral,
        spots: 0,
    };

    /// Build a cell, rejecting `(Neutral, n > 0)` and `(Red | Blue, 0)`.
    pub fn new(side: Side, spots: u32) -> Result<Cell, GameError> {
        if side.is_player() == (spots > 0) {
            Ok(Cell { side, spots })
        } else {
            Err(GameError::InvalidCell { side, spots })
        }
    }

    /// Owned cell; callers guarantee `spots >= 1` and a non-neutral side.
    #[inline]
    pub(crate) fn owned(side: Side, spots: u32) -> Cell {
        debug_assert!(side.is_player() && spots >= 1);
        Cell { side, spots }
    }

    #[inline]
    pub fn side(self) -> Side {
        self.side
    }

    #[inline]
    pub fn spots(self) -> u32 {
        self.spots
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.side == Side::Neutral
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Side::Neutral => f.write_str("--"),
            Side::Red => write!(f, "{}r", self.spots),
            Side::Blue => write!(f, "{}b", self.spots),
        }
    }
}
