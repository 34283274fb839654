//! Neighbor offsets for each supported tiling.
//!
//! Offsets are logical adjacency in grid coordinates and carry no pixel
//! geometry. The hex set is a single fixed list for every cell even though
//! hexes are drawn row-staggered; triangles alternate between two lists by
//! the parity of `x + y`.

use lifegrid_core::{Position, Topology};

/// Relative `(dx, dy)` offset of a neighbor
pub type Offset = (i32, i32);

const SQUARE_OFFSETS: [Offset; 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const HEX_OFFSETS: [Offset; 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

const TRI_UP_OFFSETS: [Offset; 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

const TRI_DOWN_OFFSETS: [Offset; 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (-1, -1)];

/// Neighborhood of one concrete cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// Moore neighborhood
    Square,
    Hex,
    /// Triangle with its apex at the top
    TriUp,
    /// Triangle with its apex at the bottom
    TriDown,
}

impl Neighborhood {
    /// Resolve the neighborhood of the cell at `pos`
    pub fn resolve(topology: Topology, pos: Position) -> Self {
        match topology {
            Topology::Square => Neighborhood::Square,
            Topology::Hex => Neighborhood::Hex,
            Topology::Triangle if pos.is_even() => Neighborhood::TriUp,
            Topology::Triangle => Neighborhood::TriDown,
        }
    }

    pub fn offsets(self) -> &'static [Offset] {
        match self {
            Neighborhood::Square => &SQUARE_OFFSETS,
            Neighborhood::Hex => &HEX_OFFSETS,
            Neighborhood::TriUp => &TRI_UP_OFFSETS,
            Neighborhood::TriDown => &TRI_DOWN_OFFSETS,
        }
    }

    /// Absolute neighbor coordinates around `pos`
    pub fn neighbors(self, pos: Position) -> impl Iterator<Item = Position> {
        self.offsets().iter().map(move |&(dx, dy)| pos.add(dx, dy))
    }
}

/// Offsets for the cell at `(x, y)` given a requested side count.
/// Unsupported side counts fall back to the square tiling.
pub fn neighbor_offsets(x: i32, y: i32, sides: u8) -> &'static [Offset] {
    Neighborhood::resolve(Topology::from_sides(sides), Position::new(x, y)).offsets()
}
