//! Greedy center selection.
//!
//! Each round scores every location by how many still-uncovered locations lie within
//! the coverage distance of it, places a center at the best one (lowest id on ties),
//! and marks its neighbourhood covered. Rounds repeat until nothing is uncovered.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use crate::analysis::coverage::{CoverageAssignment, CoverageResult, SelectionStep};
use crate::config::constants::{DISTANCE_EPSILON, MAX_DISTANCE_EPSILON};
use crate::core::distance::DistanceTable;
use crate::error::PlannerError;
use crate::models::graph::Graph;
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    /// Score candidates on the rayon pool. Produces the same centers as the sequential scan.
    pub parallel: bool,
    /// Slack added to the coverage distance when comparing summed edge lengths.
    pub epsilon: f64,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            epsilon: DISTANCE_EPSILON,
        }
    }
}

impl SelectorOptions {
    /// Epsilon must lie in `0.0..=MAX_DISTANCE_EPSILON`. A negative slack drops a center
    /// out of its own radius and the loop can no longer make progress.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 || self.epsilon > MAX_DISTANCE_EPSILON {
            return Err(PlannerError::configuration(format!(
                "Distance epsilon must be within 0..={}, got {}", MAX_DISTANCE_EPSILON, self.epsilon
            )));
        }
        Ok(())
    }
}

pub fn select_centers(graph: &Graph, populations: &[f64], x: f64) -> Result<CoverageResult, PlannerError> {
    select_centers_with(graph, populations, x, &SelectorOptions::default())
}

pub fn select_centers_with(
    graph: &Graph,
    populations: &[f64],
    x: f64,
    options: &SelectorOptions,
) -> Result<CoverageResult, PlannerError> {
    let _timing = logging::start_timing("select_centers", OperationCategory::Selection);

    options.validate()?;
    validate_inputs(graph, populations, x)?;

    let components = graph.component_count();
    if components > 1 {
        return Err(PlannerError::DisconnectedGraph { components });
    }

    let table = DistanceTable::compute(graph, options.parallel);
    Ok(run_greedy(&table, populations, x, options))
}

/// Runs the greedy loop over a precomputed table. The table must be fully connected.
pub fn select_with_table(
    table: &DistanceTable,
    populations: &[f64],
    x: f64,
    options: &SelectorOptions,
) -> Result<CoverageResult, PlannerError> {
    if x.is_nan() || x < 0.0 {
        return Err(PlannerError::configuration(format!("Coverage distance must be non-negative, got {}", x)));
    }
    options.validate()?;
    if table.size() == 0 {
        return Err(PlannerError::EmptyGraph);
    }
    check_populations(table.size(), populations)?;
    if !table.is_fully_connected() {
        return Err(PlannerError::DisconnectedGraph { components: count_components(table) });
    }
    Ok(run_greedy(table, populations, x, options))
}

fn validate_inputs(graph: &Graph, populations: &[f64], x: f64) -> Result<(), PlannerError> {
    if x.is_nan() || x < 0.0 {
        return Err(PlannerError::configuration(format!("Coverage distance must be non-negative, got {}", x)));
    }
    if graph.is_empty() {
        return Err(PlannerError::EmptyGraph);
    }
    check_populations(graph.len(), populations)
}

fn check_populations(size: usize, populations: &[f64]) -> Result<(), PlannerError> {
    if populations.len() != size {
        return Err(PlannerError::configuration(format!(
            "Expected {} population values, got {}", size, populations.len()
        )));
    }
    if let Some((id, p)) = populations.iter().enumerate().find(|(_, p)| !p.is_finite() || **p < 0.0) {
        return Err(PlannerError::configuration(format!(
            "Population of location {} must be a non-negative number, got {}", id, p
        )));
    }
    Ok(())
}

fn count_components(table: &DistanceTable) -> usize {
    let mut assigned = vec![false; table.size()];
    let mut components = 0;
    for start in 0..table.size() {
        if assigned[start] {
            continue;
        }
        components += 1;
        for (id, d) in table.row(start).iter().enumerate() {
            if d.is_finite() {
                assigned[id] = true;
            }
        }
    }
    components
}

fn run_greedy(table: &DistanceTable, populations: &[f64], x: f64, options: &SelectorOptions) -> CoverageResult {
    let n = table.size();
    let radius = x + options.epsilon;
    let mut assignment = CoverageAssignment::new(n);
    let mut centers = Vec::new();
    let mut center_coverage = Vec::new();
    let mut steps = Vec::new();
    let mut covered = 0usize;

    while covered < n {
        let (best, gain) = best_candidate(table, &assignment, radius, options.parallel);

        let (center, fallback) = if gain == 0 {
            // Nothing reachable gains coverage; seat the lowest uncovered location on itself.
            let first_uncovered = (0..n).find(|&id| !assignment.is_covered(id)).unwrap_or(best);
            (first_uncovered, true)
        } else {
            (best, false)
        };

        let members = table.within(center, x, options.epsilon);
        for &id in &members {
            if assignment.cover(id, center) {
                covered += 1;
            }
        }

        trace!(center, gain, covered, "placed center");
        steps.push(SelectionStep {
            iteration: steps.len(),
            center,
            gain,
            covered_after: covered,
            fallback,
        });
        centers.push(center);
        center_coverage.push((center, members));
    }

    debug!(locations = n, centers = centers.len(), coverage_distance = x, "center selection complete");

    CoverageResult::new(x, centers, assignment, center_coverage, steps, populations)
}

/// Highest-gain candidate, ties broken towards the lower id.
fn best_candidate(table: &DistanceTable, assignment: &CoverageAssignment, radius: f64, parallel: bool) -> (usize, usize) {
    let gain_of = |candidate: usize| -> (usize, usize) {
        let gain = table
            .row(candidate)
            .iter()
            .enumerate()
            .filter(|(id, &d)| d <= radius && !assignment.is_covered(*id))
            .count();
        (candidate, gain)
    };
    let better = |a: (usize, usize), b: (usize, usize)| -> (usize, usize) {
        if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) { b } else { a }
    };

    if parallel {
        (0..table.size())
            .into_par_iter()
            .map(gain_of)
            .reduce(|| (usize::MAX, 0), better)
    } else {
        (0..table.size()).map(gain_of).fold((usize::MAX, 0), better)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Graph {
        let mut graph = Graph::from_populations(&vec![1.0; n]);
        for i in 1..n {
            graph.add_edge(i - 1, i, 1.0).unwrap();
        }
        graph
    }

    #[test]
    fn best_candidate_prefers_lower_id_on_ties() {
        let table = DistanceTable::from_graph(&line(4));
        let assignment = CoverageAssignment::new(4);
        // 1 and 2 both reach three locations
        assert_eq!(best_candidate(&table, &assignment, 1.0, false), (1, 3));
        assert_eq!(best_candidate(&table, &assignment, 1.0, true), (1, 3));
    }

    #[test]
    fn table_entry_point_rejects_disconnected_tables() {
        let mut graph = Graph::from_populations(&[1.0; 4]);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(2, 3, 1.0).unwrap();
        let table = DistanceTable::from_graph(&graph);
        let err = select_with_table(&table, &[1.0; 4], 1.0, &SelectorOptions::default()).unwrap_err();
        assert!(matches!(err, PlannerError::DisconnectedGraph { components: 2 }));
    }

    #[test]
    fn epsilon_absorbs_float_sums() {
        let mut graph = Graph::from_populations(&[1.0; 3]);
        graph.add_edge(0, 1, 0.1).unwrap();
        graph.add_edge(1, 2, 0.2).unwrap();
        // 0.1 + 0.2 is slightly above 0.3 in binary floating point
        let result = select_centers(&graph, &[1.0; 3], 0.3).unwrap();
        assert_eq!(result.centers, vec![0]);
    }

    #[test]
    fn out_of_range_epsilon_is_rejected() {
        let graph = line(3);
        for epsilon in [-1.0, f64::NAN, f64::INFINITY, 10.0] {
            let options = SelectorOptions { parallel: false, epsilon };
            let err = select_centers_with(&graph, &[1.0; 3], 0.0, &options).unwrap_err();
            assert!(matches!(err, PlannerError::Configuration(_)), "epsilon {}", epsilon);

            let table = DistanceTable::from_graph(&graph);
            assert!(select_with_table(&table, &[1.0; 3], 0.0, &options).is_err());
        }
        let zero = SelectorOptions { parallel: false, epsilon: 0.0 };
        assert_eq!(select_centers_with(&graph, &[1.0; 3], 0.0, &zero).unwrap().centers, vec![0, 1, 2]);
    }
}
