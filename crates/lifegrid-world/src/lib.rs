//! Cellular-automaton engine.
//!
//! A double-buffered grid evolved by exact-count birth/survival rules over
//! square, hexagonal or triangular neighborhoods, with fixed-point detection
//! and direct editing operations.

pub mod grid;
pub mod sampler;
pub mod topology;
pub mod evolution;
pub mod stagnation;
pub mod edit;
pub mod pattern;
pub mod shape;
pub mod automaton;

pub use grid::Grid;
pub use sampler::GenerationView;
pub use topology::{neighbor_offsets, Neighborhood, Offset};
pub use evolution::{compute_next, step, StepStats};
pub use stagnation::StagnationDetector;
pub use pattern::Pattern;
pub use shape::CellShape;
pub use automaton::{Automaton, ClickTool, RunSummary, TickOutcome};
