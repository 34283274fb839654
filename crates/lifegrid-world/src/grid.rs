//! Double-buffered 2D grid of cells.

use crate::sampler::GenerationView;
use lifegrid_core::{CellState, EdgePolicy, Position};

/// Two generation buffers of identical dimensions.
///
/// `current` indexes the committed generation; the other slot is scratch
/// space for the next one. Swapping flips the index and never copies cells.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    cols: i32,
    buffers: [Vec<CellState>; 2],
    current: usize,
}

impl Grid {
    /// Allocate a dead grid. Negative dimensions are treated as zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let size = rows as usize * cols as usize;
        Self {
            rows,
            cols,
            buffers: [vec![CellState::Dead; size], vec![CellState::Dead; size]],
            current: 0,
        }
    }

    /// Replace both buffers with fresh dead ones. Prior cell state is discarded.
    pub fn initialize(&mut self, rows: i32, cols: i32) {
        *self = Self::new(rows, cols);
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// State of the current generation, `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<CellState> {
        self.view().get(pos)
    }

    /// Set a cell of the current generation. Out-of-range writes are ignored.
    pub fn set(&mut self, pos: Position, state: CellState) {
        if let Some(index) = self.index_of(pos) {
            self.buffers[self.current][index] = state;
        }
    }

    /// Read a neighbor under the given edge policy. Total over all coordinates.
    pub fn sample(&self, pos: Position, edges: EdgePolicy) -> CellState {
        self.view().sample(pos, edges)
    }

    /// Exchange the roles of the current and next buffers
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    /// Kill every cell of the current generation in place
    pub fn clear_all(&mut self) {
        self.buffers[self.current].fill(CellState::Dead);
    }

    pub fn live_count(&self) -> usize {
        self.cells().iter().filter(|cell| cell.is_alive()).count()
    }

    /// Current generation in row-major order
    pub fn cells(&self) -> &[CellState] {
        &self.buffers[self.current]
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.buffers[self.current]
    }

    /// Rows of the current generation, top to bottom
    pub fn row_slices(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells().chunks(self.cols.max(1) as usize)
    }

    pub fn view(&self) -> GenerationView<'_> {
        GenerationView::new(self.cells(), self.rows, self.cols)
    }

    /// Borrow the current generation for reading and the next one for writing
    pub(crate) fn split_generations(&mut self) -> (GenerationView<'_>, &mut [CellState]) {
        let (rows, cols, index) = (self.rows, self.cols, self.current);
        let [first, second] = &mut self.buffers;
        let (current, next) = if index == 0 {
            (first, second)
        } else {
            (second, first)
        };
        (GenerationView::new(current, rows, cols), next.as_mut_slice())
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.cols as usize + pos.x as usize)
    }

    fn position_of(&self, index: usize) -> Position {
        let cols = self.cols.max(1) as usize;
        Position::new((index % cols) as i32, (index / cols) as i32)
    }

    /// Every coordinate, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells().len()).map(move |index| self.position_of(index))
    }

    /// `(position, state)` pairs of the current generation, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.positions().zip(self.cells().iter().copied())
    }
}
