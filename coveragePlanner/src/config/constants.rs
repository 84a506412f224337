// Population Constants
pub const DEFAULT_POPULATION: f64 = 1.0;           // Weight used when a location has no population given
pub const DEFAULT_INPUT_POPULATION: f64 = 10.0;    // Prefilled value for each location on the CLI

// Coverage Constants
pub const DEFAULT_COVERAGE_DISTANCE: f64 = 2.0;
pub const DEFAULT_LOCATION_COUNT: usize = 10;
pub const DISTANCE_EPSILON: f64 = 1e-9;
pub const MAX_DISTANCE_EPSILON: f64 = 1e-6;       // Larger slack would cover locations beyond X
pub const MAX_SWEEP_STEPS: usize = 10_000;

// Layout Constants
pub const LAYOUT_WIDTH: f64 = 100.0;
pub const LAYOUT_HEIGHT: f64 = 100.0;
pub const DEFAULT_NEIGHBORS: usize = 2;
pub const DEFAULT_SEED: u64 = 42;

// Rendering Constants
pub const NODE_SIZE_BASE: f64 = 600.0;
pub const NODE_SIZE_RANGE: f64 = 1200.0;

// Output Constants
pub const DEFAULT_OUTPUT_DIR: &str = "planner_output";
