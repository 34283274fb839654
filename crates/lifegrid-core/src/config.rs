//! Configuration types for the automaton and its driver.

use crate::{EdgePolicy, Error, Result, Topology};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Birth/survival thresholds. Both are exact neighbor counts, not ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Neighbor count that brings a dead cell to life
    pub birth: u8,
    /// Neighbor count that keeps a live cell alive
    pub survival: u8,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            birth: 3,
            survival: 2,
        }
    }
}

impl RuleConfig {
    pub fn new(birth: u8, survival: u8) -> Self {
        Self { birth, survival }
    }

    /// Whether either threshold can never be met under `topology`
    pub fn is_unreachable_for(&self, topology: Topology) -> bool {
        let max = topology.max_neighbors();
        self.birth > max || self.survival > max
    }
}

/// Grid sizing in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length of one cell in pixels
    pub cell_size: u32,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl GridConfig {
    /// `(rows, cols)` that fit in the viewport
    pub fn dimensions(&self) -> (i32, i32) {
        dimensions_for_viewport(self.viewport_width, self.viewport_height, self.cell_size)
    }
}

/// `(rows, cols)` of whole cells that fit in a viewport. A zero cell size yields an empty grid.
pub fn dimensions_for_viewport(width: u32, height: u32, cell_size: u32) -> (i32, i32) {
    if cell_size == 0 {
        return (0, 0);
    }
    let rows = (height / cell_size).min(i32::MAX as u32) as i32;
    let cols = (width / cell_size).min(i32::MAX as u32) as i32;
    (rows, cols)
}

/// Circular area-clear brush
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Current radius in pixels
    pub radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Radius change per scroll notch
    pub step: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: 60.0,
            min_radius: 10.0,
            max_radius: 200.0,
            step: 5.0,
        }
    }
}

impl BrushConfig {
    /// Resize from a scroll event: positive deltas shrink, anything else grows.
    pub fn adjust(&mut self, scroll_delta: f32) {
        let change = if scroll_delta > 0.0 { -self.step } else { self.step };
        self.radius = (self.radius + change).clamp(self.min_radius, self.max_radius);
    }
}

/// Everything the engine reads from the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    pub rules: RuleConfig,
    pub topology: Topology,
    pub edge_policy: EdgePolicy,
    pub grid: GridConfig,
    pub brush: BrushConfig,
    /// Fraction of cells alive after randomizing (0.0 to 1.0)
    pub density: f32,
    /// Random seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            topology: Topology::default(),
            edge_policy: EdgePolicy::default(),
            grid: GridConfig::default(),
            brush: BrushConfig::default(),
            density: 0.35,
            seed: None,
        }
    }
}

impl AutomatonConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid.cell_size == 0 {
            return Err(Error::Validation("cell_size must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(Error::Validation(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        let brush = &self.brush;
        if !(brush.min_radius <= brush.max_radius
            && (brush.min_radius..=brush.max_radius).contains(&brush.radius))
        {
            return Err(Error::Validation(format!(
                "brush radius {} outside [{}, {}]",
                brush.radius, brush.min_radius, brush.max_radius
            )));
        }
        if self.rules.is_unreachable_for(self.topology) {
            // Allowed: the rule simply never fires.
            warn!(
                birth = self.rules.birth,
                survival = self.rules.survival,
                max_neighbors = self.topology.max_neighbors(),
                "Rule threshold exceeds the neighborhood size"
            );
        }
        Ok(())
    }
}

/// Settings for the headless driving loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Generations per second (1 to 60)
    pub fps: u32,
    /// Stop after this many generations
    pub max_generations: Option<u64>,
    /// Stop once a fixed point is reached
    pub stop_on_stagnation: bool,
    /// Log progress every N generations
    pub log_every: u64,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            fps: 12,
            max_generations: None,
            stop_on_stagnation: true,
            log_every: 100,
            json_logs: false,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=60).contains(&self.fps) {
            return Err(Error::Validation(format!(
                "fps must be within [1, 60], got {}",
                self.fps
            )));
        }
        Ok(())
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub automaton: AutomatonConfig,
    pub driver: DriverConfig,
}

impl RunnerConfig {
    /// Parse only. Call `validate` once overrides are applied.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.automaton.validate()?;
        self.driver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = AutomatonConfig::default();
        assert_eq!(config.rules, RuleConfig::new(3, 2));
        assert_eq!(config.topology, Topology::Square);
        assert_eq!(config.edge_policy, EdgePolicy::Wrap);
        assert_eq!(config.grid.cell_size, 20);
        assert_eq!(config.density, 0.35);

        let driver = DriverConfig::default();
        assert_eq!(driver.fps, 12);
        assert!(driver.stop_on_stagnation);

        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = GridConfig {
            cell_size: 20,
            viewport_width: 810,
            viewport_height: 399,
        };
        assert_eq!(grid.dimensions(), (19, 40));
        assert_eq!(dimensions_for_viewport(100, 100, 0), (0, 0));
    }

    #[test]
    fn test_brush_adjust_clamps() {
        let mut brush = BrushConfig::default();
        brush.adjust(1.0);
        assert_eq!(brush.radius, 55.0);
        brush.adjust(-1.0);
        brush.adjust(0.0);
        assert_eq!(brush.radius, 65.0);

        for _ in 0..100 {
            brush.adjust(-3.0);
        }
        assert_eq!(brush.radius, 200.0);
        for _ in 0..100 {
            brush.adjust(3.0);
        }
        assert_eq!(brush.radius, 10.0);
    }

    #[test]
    fn test_unreachable_rules() {
        let rules = RuleConfig::new(7, 2);
        assert!(rules.is_unreachable_for(Topology::Hex));
        assert!(!rules.is_unreachable_for(Topology::Square));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "automaton": { "rules": { "birth": 2 }, "topology": "hex", "edge_policy": "bounded" },
            "driver": { "fps": 30 }
        }"#;
        let config = RunnerConfig::from_json_str(json).unwrap();
        assert_eq!(config.automaton.rules, RuleConfig::new(2, 2));
        assert_eq!(config.automaton.topology, Topology::Hex);
        assert_eq!(config.automaton.edge_policy, EdgePolicy::Bounded);
        assert_eq!(config.automaton.grid, GridConfig::default());
        assert_eq!(config.driver.fps, 30);
        assert_eq!(config.driver.log_every, 100);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = RunnerConfig::default();
        config.driver.fps = 0;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = RunnerConfig::default();
        config.automaton.density = 1.5;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = RunnerConfig::default();
        config.automaton.grid.cell_size = 0;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = RunnerConfig::default();
        config.automaton.brush.radius = 500.0;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        // Unreachable thresholds degrade, they do not fail.
        let mut config = RunnerConfig::default();
        config.automaton.rules = RuleConfig::new(9, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_defers_validation() {
        let mut config = RunnerConfig::from_json_str(r#"{ "driver": { "fps": 0 } }"#).unwrap();
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        config.driver.fps = 24;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = RunnerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RunnerConfig::from_json_file("/nonexistent/lifegrid.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
