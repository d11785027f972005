//! Snake engine: body geometry, movement, growth and self-collision.
//!
//! The body is a fixed array with the head at index 0. The engine has no
//! opinion on which direction is legal; the reversal guard lives in
//! [`crate::input::steer`].

use core::fmt;

use crate::grid::{Cell, Direction, Grid};

/// Why a body could not be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub enum ResetError {
    EmptyBody,
    TooLong,
    OutOfBounds,
    Overlapping,
}

impl fmt::Display for ResetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyBody => "snake needs at least one cell",
            Self::TooLong => "snake longer than its capacity",
            Self::OutOfBounds => "snake cell outside the grid",
            Self::Overlapping => "snake cells overlap",
        })
    }
}

/// Anything that can answer "is this cell taken?".
pub trait Occupancy {
    fn is_occupied(&self, cell: Cell) -> bool;
}

impl Occupancy for [Cell] {
    fn is_occupied(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

/// A snake of at most `N` cells.
#[derive(Clone)]
pub struct Snake<const N: usize> {
    cells: [Cell; N],
    len: usize,
    direction: Direction,
}

impl<const N: usize> Snake<N> {
    /// A horizontal snake of `length` cells with its head at `start`,
    /// body extending to the left, heading right.
    pub fn new(start: Cell, length: usize, grid: &Grid) -> Result<Self, ResetError> {
        let mut snake = Self {
            cells: [Cell::default(); N],
            len: 0,
            direction: Direction::Right,
        };
        snake.reset(start, length, grid)?;
        Ok(snake)
    }

    /// Builds an arbitrary body, head first.
    pub fn from_cells(cells: &[Cell], direction: Direction, grid: &Grid) -> Result<Self, ResetError> {
        if cells.is_empty() {
            return Err(ResetError::EmptyBody);
        }
        if cells.len() > N {
            return Err(ResetError::TooLong);
        }
        if cells.iter().any(|&c| !grid.in_bounds(c)) {
            return Err(ResetError::OutOfBounds);
        }
        if cells.iter().enumerate().any(|(i, c)| cells[..i].contains(c)) {
            return Err(ResetError::Overlapping);
        }

        let mut body = [Cell::default(); N];
        body[..cells.len()].copy_from_slice(cells);
        Ok(Self {
            cells: body,
            len: cells.len(),
            direction,
        })
    }

    /// Re-places the snake; on error the previous body is left untouched.
    pub fn reset(&mut self, start: Cell, length: usize, grid: &Grid) -> Result<(), ResetError> {
        if length == 0 {
            return Err(ResetError::EmptyBody);
        }
        if length > N {
            return Err(ResetError::TooLong);
        }
        let tail = Cell::new(start.x - (length as i16 - 1), start.y);
        if !grid.in_bounds(start) || !grid.in_bounds(tail) {
            return Err(ResetError::OutOfBounds);
        }

        for (i, cell) in self.cells[..length].iter_mut().enumerate() {
            *cell = Cell::new(start.x - i as i16, start.y);
        }
        self.len = length;
        self.direction = Direction::Right;
        Ok(())
    }

    pub const fn head(&self) -> Cell {
        self.cells[0]
    }

    pub const fn tail(&self) -> Cell {
        self.cells[self.len - 1]
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    /// Never true for a constructed snake; present for API symmetry.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells[..self.len].iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells[..self.len].contains(&cell)
    }

    /// Where the head would go next. Does not mutate.
    pub const fn propose_move(&self, direction: Direction) -> Cell {
        self.head().step(direction)
    }

    /// Whether `candidate` hits the current (pre-move) body, tail included.
    pub fn detect_self_collision(&self, candidate: Cell) -> bool {
        self.contains(candidate)
    }

    /// Moves the head to `new_head`. Without growth (or at capacity) the tail
    /// cell is dropped and returned.
    pub fn apply_move(&mut self, new_head: Cell, grew: bool) -> Option<Cell> {
        let vacated = if grew && self.len < N {
            self.len += 1;
            None
        } else {
            Some(self.tail())
        };

        self.cells.copy_within(0..self.len - 1, 1);
        self.cells[0] = new_head;
        vacated
    }
}

impl<const N: usize> Occupancy for Snake<N> {
    fn is_occupied(&self, cell: Cell) -> bool {
        self.contains(cell)
    }
}
