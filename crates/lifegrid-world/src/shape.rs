//! Pixel-space outlines of cells, for renderers.

use lifegrid_core::{Position, Topology};
use serde::{Deserialize, Serialize};

/// Outline a renderer should draw for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellShape {
    Square,
    /// Pointy hex, shifted right on odd rows
    Hex,
    /// Apex at the top middle of the cell box
    TriangleUp,
    /// Apex at the bottom middle of the cell box
    TriangleDown,
}

impl CellShape {
    pub fn resolve(topology: Topology, pos: Position) -> Self {
        match topology {
            Topology::Square => CellShape::Square,
            Topology::Hex => CellShape::Hex,
            Topology::Triangle if pos.is_even() => CellShape::TriangleUp,
            Topology::Triangle => CellShape::TriangleDown,
        }
    }

    /// Vertices of the cell at `pos` for a cell box of `size` pixels.
    ///
    /// `overlap` enlarges hexes slightly so filled neighbors leave no gaps.
    pub fn polygon(self, pos: Position, size: f32, overlap: bool) -> Vec<(f32, f32)> {
        let px = pos.x as f32 * size;
        let py = pos.y as f32 * size;

        match self {
            CellShape::Square => vec![
                (px, py),
                (px + size, py),
                (px + size, py + size),
                (px, py + size),
            ],
            CellShape::Hex => {
                let radius = if overlap { size * 0.55 } else { size * 0.5 };
                let shift = if pos.y.rem_euclid(2) == 1 { radius * 0.5 } else { 0.0 };
                let cx = px + size / 2.0 + shift;
                let cy = py + size / 2.0;
                (0..6)
                    .map(|i| {
                        let angle = (60.0 * i as f32).to_radians();
                        (cx + radius * angle.cos(), cy + radius * angle.sin())
                    })
                    .collect()
            }
            CellShape::TriangleUp => vec![
                (px + size / 2.0, py),
                (px, py + size),
                (px + size, py + size),
            ],
            CellShape::TriangleDown => vec![
                (px + size / 2.0, py + size),
                (px, py),
                (px + size, py),
            ],
        }
    }
}
