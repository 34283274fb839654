//! The automaton: grid, rules, generation counter and stagnation tracking.

use crate::evolution::{compute_next, StepStats};
use crate::grid::Grid;
use crate::pattern::Pattern;
use crate::stagnation::StagnationDetector;
use lifegrid_core::{
    dimensions_for_viewport, AutomatonConfig, CellState, EdgePolicy, Position, RuleConfig,
    Topology,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// What a pointer click does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTool<'a> {
    Toggle,
    Stamp(&'a Pattern),
    /// Area clear using the configured brush radius
    Clear,
}

/// Result of one automatic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A generation was committed and differs from the previous one
    Advanced(StepStats),
    /// A generation was committed and equals the previous one
    Stagnated(StepStats),
    /// Already finished, nothing was computed
    Halted,
}

pub struct Automaton {
    grid: Grid,
    detector: StagnationDetector,
    config: AutomatonConfig,
    rng: ChaCha8Rng,
    generation: u64,
    finished: bool,
}

impl Automaton {
    pub fn new(config: AutomatonConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let (rows, cols) = config.grid.dimensions();
        info!(rows, cols, topology = ?config.topology, "Creating automaton");

        Self {
            grid: Grid::new(rows, cols),
            detector: StagnationDetector::new(),
            config,
            rng,
            generation: 0,
            finished: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Set once an automatic tick reaches a fixed point
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn dimensions(&self) -> (i32, i32) {
        self.grid.dimensions()
    }

    pub fn cell(&self, pos: Position) -> Option<CellState> {
        self.grid.get(pos)
    }

    pub fn set_rules(&mut self, rules: RuleConfig) {
        self.config.rules = rules;
    }

    /// Unsupported side counts select the square tiling
    pub fn set_sides(&mut self, sides: u8) {
        self.config.topology = Topology::from_sides(sides);
    }

    pub fn set_edge_policy(&mut self, edges: EdgePolicy) {
        self.config.edge_policy = edges;
    }

    pub fn set_density(&mut self, density: f32) {
        self.config.density = density.clamp(0.0, 1.0);
    }

    /// Resize the area-clear brush from a scroll delta
    pub fn adjust_brush(&mut self, scroll_delta: f32) {
        self.config.brush.adjust(scroll_delta);
    }

    /// Discard all cells and allocate a `rows × cols` dead grid
    pub fn reinitialize(&mut self, rows: i32, cols: i32) {
        debug!(rows, cols, "Reinitializing grid");
        self.grid.initialize(rows, cols);
        self.reset_progress();
    }

    /// Reinitialize for a new viewport size using the configured cell size
    pub fn reinitialize_for_viewport(&mut self, width: u32, height: u32) {
        self.config.grid.viewport_width = width;
        self.config.grid.viewport_height = height;
        let (rows, cols) = dimensions_for_viewport(width, height, self.config.grid.cell_size);
        self.reinitialize(rows, cols);
    }

    /// Kill every cell, keeping dimensions
    pub fn clear_all(&mut self) {
        self.grid.clear_all();
        self.reset_progress();
    }

    /// Randomize with an explicit density. Leaves the generation counter alone.
    pub fn randomize(&mut self, density: f32) {
        self.grid.randomize(density as f64, &mut self.rng);
    }

    /// Randomize with the configured density
    pub fn randomize_default(&mut self) {
        let density = self.config.density;
        self.randomize(density);
    }

    /// Compute and commit one generation (manual step). Never marks the run finished.
    pub fn step(&mut self) -> StepStats {
        let stats = compute_next(
            &mut self.grid,
            &self.config.rules,
            self.config.topology,
            self.config.edge_policy,
        );
        self.grid.swap();
        self.generation += 1;
        stats
    }

    /// One automatic step. Stops advancing once a fixed point has been seen.
    pub fn tick(&mut self) -> TickOutcome {
        if self.finished {
            return TickOutcome::Halted;
        }

        let stats = self.step();
        if self.detector.has_stagnated(&self.grid) {
            self.finished = true;
            info!(
                event = "stagnated",
                generation = self.generation,
                population = stats.population,
                "Grid reached a fixed point"
            );
            TickOutcome::Stagnated(stats)
        } else {
            TickOutcome::Advanced(stats)
        }
    }

    /// Compare the grid with the last one the detector saw and remember it
    pub fn has_stagnated(&mut self) -> bool {
        self.detector.has_stagnated(&self.grid)
    }

    pub fn toggle_cell(&mut self, pos: Position) -> bool {
        self.grid.toggle_cell(pos)
    }

    pub fn stamp_pattern(&mut self, origin: Position, pattern: &Pattern) -> usize {
        self.grid.stamp_pattern(origin, pattern.mask)
    }

    /// Area clear in pixel space using the configured cell size
    pub fn clear_circle(&mut self, center_x: f32, center_y: f32, radius: f32) -> usize {
        let cell_size = self.config.grid.cell_size as f32;
        self.grid.clear_circle(center_x, center_y, radius, cell_size)
    }

    /// Cell under a pixel coordinate, if any
    pub fn cell_at_pixel(&self, x: f32, y: f32) -> Option<Position> {
        let size = self.config.grid.cell_size as f32;
        if size <= 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let pos = Position::new((x / size).floor() as i32, (y / size).floor() as i32);
        self.grid.contains(pos).then_some(pos)
    }

    /// Apply a click at a pixel coordinate. Clicks off the grid do nothing
    /// and return false.
    pub fn click(&mut self, x: f32, y: f32, tool: ClickTool<'_>) -> bool {
        let Some(pos) = self.cell_at_pixel(x, y) else {
            return false;
        };
        match tool {
            ClickTool::Toggle => {
                self.toggle_cell(pos);
            }
            ClickTool::Stamp(pattern) => {
                self.stamp_pattern(pos, pattern);
            }
            ClickTool::Clear => {
                let radius = self.config.brush.radius;
                self.clear_circle(x, y, radius);
            }
        }
        true
    }

    /// Tick until finished or `max_generations` more generations have run
    #[instrument(skip(self), fields(rows = self.grid.rows(), cols = self.grid.cols()))]
    pub fn run(&mut self, max_generations: u64, log_every: u64) -> RunSummary {
        info!("Running for up to {} generations", max_generations);

        for _ in 0..max_generations {
            if let TickOutcome::Halted | TickOutcome::Stagnated(_) = self.tick() {
                break;
            }
            if log_every > 0 && self.generation % log_every == 0 {
                info!(
                    "Generation {}: {} cells alive",
                    self.generation,
                    self.grid.live_count()
                );
            }
        }

        let summary = self.summary();
        info!(
            event = "run_summary",
            generation = summary.generation,
            live_cells = summary.live_cells,
            finished = summary.finished,
            "Run complete"
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            generation: self.generation,
            live_cells: self.grid.live_count(),
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            finished: self.finished,
        }
    }

    fn reset_progress(&mut self) {
        self.generation = 0;
        self.finished = false;
        self.detector.reset();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generation: u64,
    pub live_cells: usize,
    pub rows: i32,
    pub cols: i32,
    pub finished: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{BLINKER, BLOCK, GLIDER};
    use lifegrid_core::GridConfig;

    fn small_config(rows: u32, cols: u32) -> AutomatonConfig {
        AutomatonConfig {
            grid: GridConfig {
                cell_size: 10,
                viewport_width: cols * 10,
                viewport_height: rows * 10,
            },
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_automaton_creation() {
        let automaton = Automaton::new(small_config(6, 8));
        assert_eq!(automaton.dimensions(), (6, 8));
        assert_eq!(automaton.generation(), 0);
        assert!(!automaton.is_finished());
        assert_eq!(automaton.grid().live_count(), 0);
    }

    #[test]
    fn test_step_counts_generations() {
        let mut automaton = Automaton::new(small_config(6, 6));
        automaton.stamp_pattern(Position::new(1, 1), &BLINKER);
        automaton.step();
        automaton.step();
        assert_eq!(automaton.generation(), 2);
        assert!(!automaton.is_finished());
    }

    #[test]
    fn test_tick_finishes_on_fixed_point() {
        let mut automaton = Automaton::new(small_config(4, 4));
        automaton.set_edge_policy(EdgePolicy::Bounded);
        automaton.toggle_cell(Position::new(1, 1));

        // Lone cell dies, then the empty grid repeats.
        assert!(matches!(automaton.tick(), TickOutcome::Advanced(_)));
        assert!(matches!(automaton.tick(), TickOutcome::Stagnated(_)));
        assert!(automaton.is_finished());
        assert_eq!(automaton.generation(), 2);

        assert_eq!(automaton.tick(), TickOutcome::Halted);
        assert_eq!(automaton.generation(), 2);

        // Manual steps still advance.
        automaton.step();
        assert_eq!(automaton.generation(), 3);
    }

    #[test]
    fn test_clear_resets_counter_and_finished() {
        let mut automaton = Automaton::new(small_config(4, 4));
        automaton.tick();
        automaton.tick();
        assert!(automaton.is_finished());

        automaton.clear_all();
        assert_eq!(automaton.generation(), 0);
        assert!(!automaton.is_finished());
        assert!(!automaton.has_stagnated());
        assert!(automaton.has_stagnated());
    }

    #[test]
    fn test_reinitialize_for_viewport() {
        let mut automaton = Automaton::new(small_config(4, 4));
        automaton.randomize(1.0);
        automaton.step();
        automaton.reinitialize_for_viewport(95, 41);
        assert_eq!(automaton.dimensions(), (4, 9));
        assert_eq!(automaton.generation(), 0);
        assert_eq!(automaton.grid().live_count(), 0);
    }

    #[test]
    fn test_randomize_keeps_generation() {
        let mut automaton = Automaton::new(small_config(5, 5));
        automaton.step();
        automaton.randomize(1.0);
        assert_eq!(automaton.generation(), 1);
        assert_eq!(automaton.grid().live_count(), 25);
    }

    #[test]
    fn test_seeded_runs_match() {
        let mut a = Automaton::new(small_config(20, 20));
        let mut b = Automaton::new(small_config(20, 20));
        a.randomize_default();
        b.randomize_default();
        assert_eq!(a.grid().cells(), b.grid().cells());

        let sa = a.run(30, 0);
        let sb = b.run(30, 0);
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_blinker_runs_to_limit() {
        let mut automaton = Automaton::new(small_config(7, 7));
        automaton.stamp_pattern(Position::new(2, 3), &BLINKER);
        let summary = automaton.run(40, 10);
        assert_eq!(summary.generation, 40);
        assert_eq!(summary.live_cells, 3);
        assert!(!summary.finished);
    }

    #[test]
    fn test_block_stagnates_under_b3_s3() {
        let mut automaton = Automaton::new(small_config(6, 6));
        automaton.set_rules(RuleConfig::new(3, 3));
        automaton.stamp_pattern(Position::new(2, 2), &BLOCK);
        let summary = automaton.run(100, 0);
        assert!(summary.finished);
        assert_eq!(summary.generation, 2);
        assert_eq!(summary.live_cells, 4);
    }

    #[test]
    fn test_set_sides_falls_back() {
        let mut automaton = Automaton::new(small_config(3, 3));
        automaton.set_sides(5);
        assert_eq!(automaton.config().topology, Topology::Square);
        automaton.set_sides(3);
        assert_eq!(automaton.config().topology, Topology::Triangle);
    }

    #[test]
    fn test_pixel_clicks() {
        let mut automaton = Automaton::new(small_config(4, 4));
        assert_eq!(automaton.cell_at_pixel(15.0, 39.9), Some(Position::new(1, 3)));
        assert_eq!(automaton.cell_at_pixel(40.0, 0.0), None);
        assert_eq!(automaton.cell_at_pixel(-0.5, 0.0), None);

        assert!(automaton.click(15.0, 5.0, ClickTool::Toggle));
        assert_eq!(automaton.cell(Position::new(1, 0)), Some(CellState::Alive));

        assert!(automaton.click(0.0, 10.0, ClickTool::Stamp(&GLIDER)));
        assert_eq!(automaton.grid().live_count(), 6);

        assert!(!automaton.click(100.0, 100.0, ClickTool::Clear));
        assert!(automaton.click(20.0, 20.0, ClickTool::Clear));
        assert_eq!(automaton.grid().live_count(), 0);
    }

    #[test]
    fn test_brush_adjust() {
        let mut automaton = Automaton::new(small_config(4, 4));
        automaton.adjust_brush(-1.0);
        assert_eq!(automaton.config().brush.radius, 65.0);
    }

    #[test]
    fn test_summary_serializes() {
        let automaton = Automaton::new(small_config(2, 3));
        let json = serde_json::to_string(&automaton.summary()).unwrap();
        assert!(json.contains("\"rows\":2"));
        assert!(json.contains("\"finished\":false"));
    }
}
