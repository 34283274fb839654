//! Neighbor sampling under an edge policy.

use lifegrid_core::{CellState, EdgePolicy, Position};

/// Read-only view of one generation buffer
#[derive(Debug, Clone, Copy)]
pub struct GenerationView<'a> {
    cells: &'a [CellState],
    rows: i32,
    cols: i32,
}

impl<'a> GenerationView<'a> {
    pub fn new(cells: &'a [CellState], rows: i32, cols: i32) -> Self {
        debug_assert_eq!(cells.len(), rows.max(0) as usize * cols.max(0) as usize);
        Self { cells, rows, cols }
    }

    pub fn get(&self, pos: Position) -> Option<CellState> {
        if pos.x < 0 || pos.x >= self.cols || pos.y < 0 || pos.y >= self.rows {
            return None;
        }
        self.cells
            .get(pos.y as usize * self.cols as usize + pos.x as usize)
            .copied()
    }

    /// Wrap: toroidal addressing, so every coordinate maps onto some cell.
    /// Bounded: anything outside the grid reads as dead.
    /// An empty grid reads as dead under both policies.
    pub fn sample(&self, pos: Position, edges: EdgePolicy) -> CellState {
        if self.rows == 0 || self.cols == 0 {
            return CellState::Dead;
        }
        let pos = match edges {
            EdgePolicy::Wrap => pos.wrap(self.cols, self.rows),
            EdgePolicy::Bounded => pos,
        };
        self.get(pos).unwrap_or(CellState::Dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::topology::Neighborhood;
    use proptest::prelude::*;

    #[test]
    fn test_single_cell_wrap_samples_itself() {
        let mut grid = Grid::new(1, 1);
        grid.set(Position::new(0, 0), CellState::Alive);
        let origin = Position::new(0, 0);

        for neighborhood in [
            Neighborhood::Square,
            Neighborhood::Hex,
            Neighborhood::TriUp,
            Neighborhood::TriDown,
        ] {
            for &(dx, dy) in neighborhood.offsets() {
                assert_eq!(
                    grid.sample(origin.add(dx, dy), EdgePolicy::Wrap),
                    CellState::Alive
                );
            }
        }
    }

    #[test]
    fn test_bounded_outside_is_dead() {
        let mut grid = Grid::new(2, 2);
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set(pos, CellState::Alive);
        }
        assert_eq!(grid.sample(Position::new(-1, 0), EdgePolicy::Bounded), CellState::Dead);
        assert_eq!(grid.sample(Position::new(0, 2), EdgePolicy::Bounded), CellState::Dead);
        assert_eq!(grid.sample(Position::new(1, 1), EdgePolicy::Bounded), CellState::Alive);
    }

    #[test]
    fn test_wrap_reads_opposite_edge() {
        let mut grid = Grid::new(3, 4);
        grid.set(Position::new(3, 2), CellState::Alive);
        assert_eq!(grid.sample(Position::new(-1, -1), EdgePolicy::Wrap), CellState::Alive);
        assert_eq!(grid.sample(Position::new(7, 5), EdgePolicy::Wrap), CellState::Alive);
        assert_eq!(grid.sample(Position::new(-1, -1), EdgePolicy::Bounded), CellState::Dead);
    }

    #[test]
    fn test_empty_grid_is_total() {
        let grid = Grid::new(0, 0);
        assert_eq!(grid.sample(Position::new(0, 0), EdgePolicy::Wrap), CellState::Dead);
        assert_eq!(grid.sample(Position::new(3, -2), EdgePolicy::Bounded), CellState::Dead);
    }

    proptest! {
        #[test]
        fn prop_wrap_matches_reduced_coordinate(
            rows in 1i32..12,
            cols in 1i32..12,
            x in -100i32..100,
            y in -100i32..100,
            seed_cells in proptest::collection::vec(any::<bool>(), 144),
        ) {
            let mut grid = Grid::new(rows, cols);
            for (i, pos) in grid.positions().collect::<Vec<_>>().into_iter().enumerate() {
                grid.set(pos, CellState::from(seed_cells[i]));
            }
            let reduced = Position::new(x.rem_euclid(cols), y.rem_euclid(rows));
            prop_assert_eq!(
                Some(grid.sample(Position::new(x, y), EdgePolicy::Wrap)),
                grid.get(reduced)
            );
        }

        #[test]
        fn prop_bounded_never_panics(
            rows in 0i32..8,
            cols in 0i32..8,
            x in proptest::num::i32::ANY,
            y in proptest::num::i32::ANY,
        ) {
            let grid = Grid::new(rows, cols);
            let state = grid.sample(Position::new(x, y), EdgePolicy::Bounded);
            prop_assert_eq!(state, CellState::Dead);
        }
    }
}
