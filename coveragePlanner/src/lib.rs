// Main module declarations for the coverage planner

// Core placement engine
pub mod core {
    pub mod graph_builder;
    pub mod distance;
    pub mod selector;
    pub mod sweep;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod planner_config;
}

// Model definitions
pub mod models {
    pub mod location;
    pub mod graph;
}

// Data loaders
pub mod data {
    pub mod population_loader;
    pub mod poi;
}

// Coverage accounting and reports
pub mod analysis {
    pub mod coverage;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

pub mod error;

// Re-export commonly used items
pub use crate::core::graph_builder::{build_graph, EdgeWeighting, Layout, LayoutParams};
pub use crate::core::selector::{select_centers, select_centers_with, SelectorOptions};
pub use crate::analysis::coverage::CoverageResult;
pub use crate::models::graph::Graph;
pub use crate::error::PlannerError;
