//! Core type definitions for the automaton.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D cell coordinate: `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, saturating at the `i32` bounds. A saturated
    /// coordinate never lies inside a grid.
    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Apply toroidal wrapping for given grid dimensions.
    ///
    /// Both dimensions must be non-zero.
    pub fn wrap(&self, cols: i32, rows: i32) -> Self {
        Self {
            x: ((self.x % cols) + cols) % cols,
            y: ((self.y % rows) + rows) % rows,
        }
    }

    /// Parity of `x + y`, used by tilings whose cells alternate orientation
    pub fn is_even(&self) -> bool {
        (self.x ^ self.y) & 1 == 0
    }
}

/// Binary state of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }

    /// Numeric value (0 or 1) used when counting neighbors
    pub fn as_count(self) -> u8 {
        self as u8
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_count())
    }
}

/// Tiling that determines cell adjacency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    Triangle,
    #[default]
    Square,
    Hex,
}

impl Topology {
    /// Resolve a requested number of sides. Anything other than 3 or 6 is square.
    pub fn from_sides(sides: u8) -> Self {
        match sides {
            3 => Topology::Triangle,
            6 => Topology::Hex,
            _ => Topology::Square,
        }
    }

    pub fn sides(self) -> u8 {
        match self {
            Topology::Triangle => 3,
            Topology::Square => 4,
            Topology::Hex => 6,
        }
    }

    /// Whether a cell's shape and neighborhood depend on its coordinate parity
    pub fn is_orientation_dependent(self) -> bool {
        matches!(self, Topology::Triangle)
    }

    /// Largest neighbor count any cell can observe under this tiling
    pub fn max_neighbors(self) -> u8 {
        match self {
            Topology::Square => 8,
            Topology::Triangle | Topology::Hex => 6,
        }
    }
}

/// How neighbors beyond the grid bounds are sampled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Toroidal addressing
    #[default]
    Wrap,
    /// Out-of-range neighbors are dead
    Bounded,
}

impl EdgePolicy {
    pub fn from_wrap(wrap: bool) -> Self {
        if wrap {
            EdgePolicy::Wrap
        } else {
            EdgePolicy::Bounded
        }
    }

    pub fn wraps(self) -> bool {
        self == EdgePolicy::Wrap
    }
}
