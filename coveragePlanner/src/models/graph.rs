use std::collections::VecDeque;
use serde::{Deserialize, Serialize};
use crate::data::poi::Coordinate;
use crate::error::PlannerError;
use super::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

/// Undirected, edge-weighted proximity graph. Location ids are their index.
#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    locations: Vec<Location>,
    edges: Vec<Edge>,
    #[serde(skip)]
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl Graph {
    pub fn new(locations: Vec<Location>) -> Self {
        let adjacency = vec![Vec::new(); locations.len()];
        Self {
            locations,
            edges: Vec::new(),
            adjacency,
        }
    }

    /// Builds a graph from bare populations, placing every location at the origin.
    /// Used by callers that supply their own edge set.
    pub fn from_populations(populations: &[f64]) -> Self {
        let locations = populations
            .iter()
            .enumerate()
            .map(|(id, &population)| Location::new(id, population, Coordinate::new(0.0, 0.0)))
            .collect();
        Self::new(locations)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get_locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn get_edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn neighbors(&self, id: usize) -> &[(usize, f64)] {
        &self.adjacency[id]
    }

    pub fn populations(&self) -> Vec<f64> {
        self.locations.iter().map(|l| l.get_population()).collect()
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a < self.len() && self.adjacency[a].iter().any(|&(n, _)| n == b)
    }

    /// Adds an undirected edge. A repeated edge keeps the shorter distance.
    pub fn add_edge(&mut self, a: usize, b: usize, distance: f64) -> Result<(), PlannerError> {
        let n = self.len();
        if a >= n || b >= n {
            return Err(PlannerError::configuration(format!(
                "Edge ({}, {}) out of bounds for {} locations", a, b, n
            )));
        }
        if a == b {
            return Err(PlannerError::configuration(format!("Self-loop on location {}", a)));
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(PlannerError::configuration(format!(
                "Edge ({}, {}) has invalid distance {}", a, b, distance
            )));
        }

        if self.has_edge(a, b) {
            for (from, to) in [(a, b), (b, a)] {
                for entry in self.adjacency[from].iter_mut().filter(|entry| entry.0 == to) {
                    entry.1 = entry.1.min(distance);
                }
            }
            if let Some(edge) = self.edges.iter_mut().find(|e| {
                (e.a == a && e.b == b) || (e.a == b && e.b == a)
            }) {
                edge.distance = edge.distance.min(distance);
            }
            return Ok(());
        }

        self.adjacency[a].push((b, distance));
        self.adjacency[b].push((a, distance));
        self.edges.push(Edge { a, b, distance });
        Ok(())
    }

    /// Number of connected components (0 for an empty graph).
    pub fn component_count(&self) -> usize {
        let n = self.len();
        let mut seen = vec![false; n];
        let mut components = 0;
        let mut queue = VecDeque::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }
            components += 1;
            seen[start] = true;
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                for &(next, _) in &self.adjacency[node] {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        components
    }

    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }
}
