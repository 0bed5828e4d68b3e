//! Board representation for Jump61
//!
//! [`Board`] is the read-only view every board offers; [`MutableBoard`] is
//! the single concrete implementation and owns the cascade engine and the
//! undo history.

pub mod cell;
pub mod mutable;

#[cfg(test)]
mod tests;

use std::fmt;

// Re-exports
pub use cell::{Cell, Side};
pub use mutable::{BoardEvent, MutableBoard};

/// Default board size used by the front ends
pub const DEFAULT_SIZE: usize = 6;

/// Position on the board, 1-based in both coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row >= 1 && col >= 1);
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Read-only queries over an N x N Jump61 grid.
///
/// Only `size`, `get` and `num_of_side` are required; everything else is
/// derived from them, so every implementation agrees on legality,
/// capacity and winner detection.
pub trait Board {
    /// Side length N
    fn size(&self) -> usize;

    /// Contents of the cell at `pos`. Panics if `pos` is off the board.
    fn get(&self, pos: Pos) -> Cell;

    /// Number of cells owned by `side`
    fn num_of_side(&self, side: Side) -> usize;

    /// Total number of cells
    fn num_cells(&self) -> usize {
        self.size() * self.size()
    }

    /// Total spots on the board
    fn num_pieces(&self) -> u32 {
        (1..=self.num_cells())
            .filter_map(|n| self.pos_of(n))
            .map(|pos| self.get(pos).spots())
            .sum()
    }

    /// True if (row, col) is on the board
    #[inline]
    fn exists(&self, row: usize, col: usize) -> bool {
        (1..=self.size()).contains(&row) && (1..=self.size()).contains(&col)
    }

    #[inline]
    fn contains(&self, pos: Pos) -> bool {
        self.exists(pos.row, pos.col)
    }

    /// Linear index of `pos`, in `1..=N*N`, if `pos` is on the board
    #[inline]
    fn sq_num(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.row - 1) * self.size() + pos.col)
    }

    /// Position with linear index `n`, if `1 <= n <= N*N`
    #[inline]
    fn pos_of(&self, n: usize) -> Option<Pos> {
        if n == 0 || n > self.num_cells() {
            return None;
        }
        let size = self.size();
        Some(Pos::new((n - 1) / size + 1, (n - 1) % size + 1))
    }

    /// Existing orthogonal neighbors of `pos`, in cascade order:
    /// left, right, up, down.
    fn adjacent(&self, pos: Pos) -> Vec<Pos> {
        let Pos { row, col } = pos;
        [
            (row, col.wrapping_sub(1)),
            (row, col + 1),
            (row.wrapping_sub(1), col),
            (row + 1, col),
        ]
        .into_iter()
        .filter(|&(r, c)| self.exists(r, c))
        .map(|(r, c)| Pos::new(r, c))
        .collect()
    }

    /// Number of orthogonal neighbors: the spots a cell holds before it overflows
    fn neighbors(&self, pos: Pos) -> usize {
        let Pos { row, col } = pos;
        [
            self.exists(row, col.wrapping_sub(1)),
            self.exists(row, col + 1),
            self.exists(row.wrapping_sub(1), col),
            self.exists(row + 1, col),
        ]
        .into_iter()
        .filter(|&e| e)
        .count()
    }

    /// The side owning every cell, if any
    fn winner(&self) -> Option<Side> {
        let total = self.num_cells();
        [Side::Red, Side::Blue]
            .into_iter()
            .find(|&side| self.num_of_side(side) == total)
    }

    /// A move is legal if the cell is on the board, empty or already
    /// owned by `side`, and the game is undecided.
    fn is_legal(&self, side: Side, pos: Pos) -> bool {
        if !side.is_player() || !self.contains(pos) || self.winner().is_some() {
            return false;
        }
        let owner = self.get(pos).side();
        owner == Side::Neutral || owner == side
    }

    /// All legal moves for `side` in increasing index order
    fn legal_moves(&self, side: Side) -> Vec<Pos> {
        (1..=self.num_cells())
            .filter_map(|n| self.pos_of(n))
            .filter(|&pos| self.is_legal(side, pos))
            .collect()
    }

    /// Side to move under the alternating-turn convention: every move adds
    /// one spot, Red moves first.
    fn whose_move(&self) -> Side {
        if self.num_pieces() % 2 == 0 {
            Side::Red
        } else {
            Side::Blue
        }
    }
}

/// Row-per-line text rendering shared by board implementations.
pub(crate) fn write_board(board: &dyn Board, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let size = board.size();
    for row in 1..=size {
        let line = (1..=size)
            .map(|col| board.get(Pos::new(row, col)).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "{line}")?;
    }
    Ok(())
}
