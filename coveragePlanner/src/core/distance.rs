use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use rayon::prelude::*;
use tracing::debug;
use crate::models::graph::Graph;
use crate::utils::logging::{self, OperationCategory};

/// Ordered float for the Dijkstra frontier. Distances are never NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct OrderedDistance(f64);

impl Eq for OrderedDistance {}

impl Ord for OrderedDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// All-pairs shortest path distances, row-major. Unreachable pairs hold `f64::INFINITY`.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    data: Vec<f64>,
    size: usize,
}

impl DistanceTable {
    pub fn from_graph(graph: &Graph) -> Self {
        Self::compute(graph, false)
    }

    /// Runs one Dijkstra per source. With `parallel` the rows are computed on the rayon pool;
    /// the table is identical either way.
    pub fn compute(graph: &Graph, parallel: bool) -> Self {
        let _timing = logging::start_timing("distance_table", OperationCategory::DistanceTable);

        let size = graph.len();
        let rows: Vec<Vec<f64>> = if parallel {
            (0..size).into_par_iter().map(|source| shortest_paths_from(graph, source)).collect()
        } else {
            (0..size).map(|source| shortest_paths_from(graph, source)).collect()
        };

        debug!(locations = size, parallel, "computed distance table");

        Self {
            data: rows.into_iter().flatten().collect(),
            size,
        }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// True when every pair of locations has a finite distance.
    pub fn is_fully_connected(&self) -> bool {
        self.data.iter().all(|d| d.is_finite())
    }

    /// Ids of every location within `radius` (inclusive) of `center`.
    pub fn within(&self, center: usize, radius: f64, epsilon: f64) -> Vec<usize> {
        self.row(center)
            .iter()
            .enumerate()
            .filter(|(_, &d)| d <= radius + epsilon)
            .map(|(id, _)| id)
            .collect()
    }
}

fn shortest_paths_from(graph: &Graph, source: usize) -> Vec<f64> {
    let mut distances = vec![f64::INFINITY; graph.len()];
    let mut queue = BinaryHeap::new();

    distances[source] = 0.0;
    queue.push(Reverse((OrderedDistance(0.0), source)));

    while let Some(Reverse((OrderedDistance(dist), node))) = queue.pop() {
        if dist > distances[node] {
            continue;
        }
        for &(next, weight) in graph.neighbors(node) {
            let candidate = dist + weight;
            if candidate < distances[next] {
                distances[next] = candidate;
                queue.push(Reverse((OrderedDistance(candidate), next)));
            }
        }
    }

    distances
}
