use serde::{Deserialize, Serialize};
use crate::config::constants::{NODE_SIZE_BASE, NODE_SIZE_RANGE};

/// Per-location coverage state produced by one selector run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageAssignment {
    covered: Vec<bool>,
    covering_centers: Vec<Vec<usize>>,
}

impl CoverageAssignment {
    pub fn new(size: usize) -> Self {
        Self {
            covered: vec![false; size],
            covering_centers: vec![Vec::new(); size],
        }
    }

    pub fn len(&self) -> usize {
        self.covered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }

    pub fn is_covered(&self, id: usize) -> bool {
        self.covered[id]
    }

    /// Centers within the coverage distance of `id`, in selection order.
    pub fn centers_for(&self, id: usize) -> &[usize] {
        &self.covering_centers[id]
    }

    /// Marks `id` as covered by `center`. Returns true if it was uncovered before.
    pub fn cover(&mut self, id: usize, center: usize) -> bool {
        if !self.covering_centers[id].contains(&center) {
            self.covering_centers[id].push(center);
        }
        let newly_covered = !self.covered[id];
        self.covered[id] = true;
        newly_covered
    }

    pub fn covered_count(&self) -> usize {
        self.covered.iter().filter(|&&c| c).count()
    }

    pub fn uncovered(&self) -> Vec<usize> {
        self.covered
            .iter()
            .enumerate()
            .filter(|(_, &c)| !c)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn all_covered(&self) -> bool {
        self.covered.iter().all(|&c| c)
    }
}

/// One iteration of the greedy loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStep {
    pub iteration: usize,
    pub center: usize,
    pub gain: usize,
    /// Covered locations once this center is placed.
    pub covered_after: usize,
    /// The zero-gain fallback picked this center.
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageResult {
    pub coverage_distance: f64,
    /// Centers in selection order.
    pub centers: Vec<usize>,
    pub assignment: CoverageAssignment,
    /// Each center with the sorted ids it covers.
    pub center_coverage: Vec<(usize, Vec<usize>)>,
    pub steps: Vec<SelectionStep>,
    pub total_population: f64,
    pub covered_population: f64,
    pub coverage_percent: f64,
}

impl CoverageResult {
    pub fn new(
        coverage_distance: f64,
        centers: Vec<usize>,
        assignment: CoverageAssignment,
        center_coverage: Vec<(usize, Vec<usize>)>,
        steps: Vec<SelectionStep>,
        populations: &[f64],
    ) -> Self {
        let (total_population, covered_population) = population_totals(&assignment, populations);
        let coverage_percent = coverage_percentage(total_population, covered_population, assignment.all_covered());

        Self {
            coverage_distance,
            centers,
            assignment,
            center_coverage,
            steps,
            total_population,
            covered_population,
            coverage_percent,
        }
    }

    pub fn location_count(&self) -> usize {
        self.assignment.len()
    }

    pub fn center_count(&self) -> usize {
        self.centers.len()
    }

    pub fn is_center(&self, id: usize) -> bool {
        self.centers.contains(&id)
    }

    pub fn uncovered(&self) -> Vec<usize> {
        self.assignment.uncovered()
    }

    /// Marker sizes scaled by population, for renderers that draw nodes.
    pub fn node_sizes(populations: &[f64]) -> Vec<f64> {
        let min = populations.iter().copied().fold(f64::INFINITY, f64::min);
        let max = populations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        populations
            .iter()
            .map(|p| NODE_SIZE_BASE + ((p - min) / (max - min + 1.0)) * NODE_SIZE_RANGE)
            .collect()
    }
}

fn population_totals(assignment: &CoverageAssignment, populations: &[f64]) -> (f64, f64) {
    populations
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(total, covered), (id, &p)| {
            if assignment.is_covered(id) {
                (total + p, covered + p)
            } else {
                (total + p, covered)
            }
        })
}

/// With zero total population the percentage follows the location coverage.
pub fn coverage_percentage(total_population: f64, covered_population: f64, all_covered: bool) -> f64 {
    if total_population > 0.0 {
        covered_population / total_population * 100.0
    } else if all_covered {
        100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cover_is_idempotent() {
        let mut assignment = CoverageAssignment::new(3);
        assert!(assignment.cover(1, 0));
        assert!(!assignment.cover(1, 0));
        assert!(!assignment.cover(1, 2));
        assert_eq!(assignment.centers_for(1), &[0, 2]);
        assert_eq!(assignment.covered_count(), 1);
        assert_eq!(assignment.uncovered(), vec![0, 2]);
    }

    #[test]
    fn partial_coverage_percentage() {
        let mut assignment = CoverageAssignment::new(3);
        assignment.cover(0, 0);
        let result = CoverageResult::new(1.0, vec![0], assignment, vec![(0, vec![0])], Vec::new(), &[30.0, 50.0, 20.0]);
        assert_relative_eq!(result.total_population, 100.0);
        assert_relative_eq!(result.covered_population, 30.0);
        assert_relative_eq!(result.coverage_percent, 30.0);
        assert_eq!(result.uncovered(), vec![1, 2]);
    }

    #[test]
    fn zero_population_follows_location_coverage() {
        assert_eq!(coverage_percentage(0.0, 0.0, true), 100.0);
        assert_eq!(coverage_percentage(0.0, 0.0, false), 0.0);
    }

    #[test]
    fn node_sizes_scale_with_population() {
        let sizes = CoverageResult::node_sizes(&[10.0, 20.0, 10.0]);
        assert_relative_eq!(sizes[0], 600.0);
        assert_relative_eq!(sizes[1], 600.0 + 10.0 / 11.0 * 1200.0);
        assert_relative_eq!(sizes[2], 600.0);
    }
}
