//! Fixed-point detection between consecutive generations.
//!
//! Only period-1 fixed points are caught: a grid that alternates between two
//! or more states (a blinker, say) never compares equal to the generation
//! right before it and is never reported as stagnant.

use crate::grid::Grid;
use lifegrid_core::CellState;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    rows: i32,
    cols: i32,
    cells: Vec<CellState>,
}

/// Remembers the last grid it was shown, independent of the grid's buffers
#[derive(Debug, Clone, Default)]
pub struct StagnationDetector {
    snapshot: Option<Snapshot>,
}

impl StagnationDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff `grid` equals the previously seen grid. Always records `grid`
    /// as the new snapshot, so the first call after a reset returns false.
    pub fn has_stagnated(&mut self, grid: &Grid) -> bool {
        let (rows, cols) = grid.dimensions();
        match &mut self.snapshot {
            Some(snapshot) => {
                let unchanged = snapshot.rows == rows
                    && snapshot.cols == cols
                    && snapshot.cells.as_slice() == grid.cells();
                if !unchanged {
                    snapshot.rows = rows;
                    snapshot.cols = cols;
                    snapshot.cells.clear();
                    snapshot.cells.extend_from_slice(grid.cells());
                }
                unchanged
            }
            None => {
                self.snapshot = Some(Snapshot {
                    rows,
                    cols,
                    cells: grid.cells().to_vec(),
                });
                false
            }
        }
    }

    /// Forget the stored snapshot
    pub fn reset(&mut self) {
        self.snapshot = None;
    }
}
