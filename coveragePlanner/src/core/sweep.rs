use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::config::constants::MAX_SWEEP_STEPS;
use crate::core::distance::DistanceTable;
use crate::core::selector::{select_with_table, SelectorOptions};
use crate::error::PlannerError;
use crate::models::graph::Graph;
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub coverage_distance: f64,
    pub center_count: usize,
    pub centers: Vec<usize>,
    pub coverage_percent: f64,
}

/// Evenly spaced distances from `start` to `end` inclusive.
pub fn distance_steps(start: f64, end: f64, step: f64) -> Result<Vec<f64>, PlannerError> {
    if !start.is_finite() || !end.is_finite() || !step.is_finite() || step <= 0.0 || start < 0.0 || end < start {
        return Err(PlannerError::configuration(format!(
            "Invalid sweep range {}..={} step {}", start, end, step
        )));
    }
    let intervals = ((end - start) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_SWEEP_STEPS as f64 {
        return Err(PlannerError::configuration(format!(
            "Sweep {}..={} step {} exceeds {} distances", start, end, step, MAX_SWEEP_STEPS
        )));
    }
    let count = intervals as usize + 1;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// Runs the selector once per coverage distance, sharing one distance table.
/// Points come back in the order of `distances`; `options.parallel` also spreads the runs over rayon.
pub fn coverage_sweep(
    graph: &Graph,
    populations: &[f64],
    distances: &[f64],
    options: &SelectorOptions,
    show_progress: bool,
) -> Result<Vec<SweepPoint>, PlannerError> {
    let _timing = logging::start_timing("coverage_sweep", OperationCategory::Selection);

    options.validate()?;
    let parallel = options.parallel;
    if graph.is_empty() {
        return Err(PlannerError::EmptyGraph);
    }
    let components = graph.component_count();
    if components > 1 {
        return Err(PlannerError::DisconnectedGraph { components });
    }

    let table = DistanceTable::compute(graph, parallel);

    let progress = if show_progress {
        let bar = ProgressBar::new(distances.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} distances")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let run = |&x: &f64| -> Result<SweepPoint, PlannerError> {
        let result = select_with_table(&table, populations, x, options)?;
        progress.inc(1);
        Ok(SweepPoint {
            coverage_distance: x,
            center_count: result.center_count(),
            centers: result.centers,
            coverage_percent: result.coverage_percent,
        })
    };

    let points: Result<Vec<SweepPoint>, PlannerError> = if parallel {
        distances.par_iter().map(run).collect()
    } else {
        distances.iter().map(run).collect()
    };

    progress.finish_and_clear();
    let points = points?;
    info!(runs = points.len(), "coverage sweep complete");
    Ok(points)
}
