//! Direct edits of the current generation.
//!
//! None of these touch the next buffer or need the evolution engine, and all
//! of them silently skip coordinates outside the grid.

use crate::grid::Grid;
use crate::pattern::mask_offsets;
use lifegrid_core::{CellState, Position};
use rand::Rng;

impl Grid {
    /// Flip one cell. Returns false when `pos` is outside the grid.
    pub fn toggle_cell(&mut self, pos: Position) -> bool {
        match self.get(pos) {
            Some(state) => {
                self.set(pos, state.toggled());
                true
            }
            None => false,
        }
    }

    /// Union a 0/1 mask into the grid with its top-left corner at `origin`.
    /// `0` entries never clear cells. Returns how many cells came alive.
    pub fn stamp_pattern<R: AsRef<[u8]>>(&mut self, origin: Position, mask: &[R]) -> usize {
        let mut revived = 0;
        for (dx, dy) in mask_offsets(mask) {
            let pos = origin.add(dx, dy);
            if self.get(pos) == Some(CellState::Dead) {
                self.set(pos, CellState::Alive);
                revived += 1;
            }
        }
        revived
    }

    /// Kill every cell whose pixel-space center lies strictly within `radius`
    /// of `(center_x, center_y)`. Returns how many live cells were cleared.
    pub fn clear_circle(&mut self, center_x: f32, center_y: f32, radius: f32, cell_size: f32) -> usize {
        let (cx, cy, r) = (center_x as f64, center_y as f64, radius as f64);
        let size = cell_size as f64;
        let mut cleared = 0;

        for pos in self.positions().collect::<Vec<_>>() {
            let px = pos.x as f64 * size + size / 2.0;
            let py = pos.y as f64 * size + size / 2.0;
            if (px - cx).hypot(py - cy) < r && self.get(pos) == Some(CellState::Alive) {
                self.set(pos, CellState::Dead);
                cleared += 1;
            }
        }
        cleared
    }

    /// Set each cell alive independently with probability `density`,
    /// clamped to `[0, 1]`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        for cell in self.cells_mut() {
            *cell = CellState::from(rng.gen_bool(density));
        }
    }
}
