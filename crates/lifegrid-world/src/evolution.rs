//! Birth/survival evolution.

use crate::grid::Grid;
use crate::sampler::GenerationView;
use crate::topology::Neighborhood;
use lifegrid_core::{CellState, EdgePolicy, Position, RuleConfig, Topology};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Population changes produced by one evolution step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

/// Exact-count rule: a live cell survives only at `survival` neighbors and a
/// dead cell is born only at `birth` neighbors.
pub fn next_state(current: CellState, live_neighbors: u8, rules: &RuleConfig) -> CellState {
    let threshold = if current.is_alive() {
        rules.survival
    } else {
        rules.birth
    };
    CellState::from(live_neighbors == threshold)
}

pub fn count_live_neighbors(
    view: &GenerationView<'_>,
    pos: Position,
    topology: Topology,
    edges: EdgePolicy,
) -> u8 {
    Neighborhood::resolve(topology, pos)
        .neighbors(pos)
        .map(|neighbor| view.sample(neighbor, edges).as_count())
        .sum()
}

/// Fill the next buffer from the current one. Does not swap.
pub fn compute_next(
    grid: &mut Grid,
    rules: &RuleConfig,
    topology: Topology,
    edges: EdgePolicy,
) -> StepStats {
    let cols = grid.cols();
    let (current, next) = grid.split_generations();
    let mut stats = StepStats::default();

    for (index, slot) in next.iter_mut().enumerate() {
        let pos = Position::new(index as i32 % cols, index as i32 / cols);
        let state = current.get(pos).unwrap_or_default();
        let neighbors = count_live_neighbors(&current, pos, topology, edges);
        let updated = next_state(state, neighbors, rules);

        match (state, updated) {
            (CellState::Dead, CellState::Alive) => stats.births += 1,
            (CellState::Alive, CellState::Dead) => stats.deaths += 1,
            _ => {}
        }
        if updated.is_alive() {
            stats.population += 1;
        }
        *slot = updated;
    }

    trace!(
        births = stats.births,
        deaths = stats.deaths,
        population = stats.population,
        "Computed next generation"
    );
    stats
}

/// Compute the next generation from raw configuration values. The caller
/// must still call [`Grid::swap`] to commit it.
pub fn step(grid: &mut Grid, birth: u8, survival: u8, sides: u8, edges: EdgePolicy) -> StepStats {
    compute_next(
        grid,
        &RuleConfig::new(birth, survival),
        Topology::from_sides(sides),
        edges,
    )
}
