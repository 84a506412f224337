use std::fmt;
use std::str::FromStr;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::constants::{DEFAULT_NEIGHBORS, DEFAULT_POPULATION, DEFAULT_SEED, LAYOUT_HEIGHT, LAYOUT_WIDTH};
use crate::data::poi::Coordinate;
use crate::error::PlannerError;
use crate::models::graph::Graph;
use crate::models::location::Location;
use crate::utils::logging::{self, GraphBuildType, OperationCategory};

/// Where locations are placed before edges are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Location i is linked to i + 1, positions on a horizontal line.
    Chain,
    Circular,
    Grid,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeWeighting {
    /// Every edge counts as one hop.
    Unit,
    /// Edge distance is the distance between the two positions.
    Euclidean,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Chain => "chain",
            Layout::Circular => "circular",
            Layout::Grid => "grid",
            Layout::Random => "random",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Layout {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chain" | "line" => Ok(Layout::Chain),
            "circular" | "circle" => Ok(Layout::Circular),
            "grid" => Ok(Layout::Grid),
            "random" => Ok(Layout::Random),
            other => Err(PlannerError::configuration(format!("Unknown layout: {}", other))),
        }
    }
}

impl fmt::Display for EdgeWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeWeighting::Unit => write!(f, "unit"),
            EdgeWeighting::Euclidean => write!(f, "euclidean"),
        }
    }
}

impl FromStr for EdgeWeighting {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unit" | "hop" => Ok(EdgeWeighting::Unit),
            "euclidean" => Ok(EdgeWeighting::Euclidean),
            other => Err(PlannerError::configuration(format!("Unknown edge weighting: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub layout: Layout,
    pub weighting: EdgeWeighting,
    /// Nearest neighbours linked per location for the geometric layouts.
    pub neighbors: usize,
    /// Columns for `Layout::Grid`; `None` picks the ceiling of the square root.
    pub grid_columns: Option<usize>,
    pub seed: u64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            layout: Layout::Chain,
            weighting: EdgeWeighting::Unit,
            neighbors: DEFAULT_NEIGHBORS,
            grid_columns: None,
            seed: DEFAULT_SEED,
        }
    }
}

/// Builds a connected proximity graph. Location ids are the indices of `populations`;
/// a `None` population becomes `DEFAULT_POPULATION`.
pub fn build_graph(populations: &[Option<f64>], params: &LayoutParams) -> Result<Graph, PlannerError> {
    let _timing = logging::start_timing("build_graph",
        OperationCategory::GraphBuild { subcategory: GraphBuildType::Other });

    if populations.is_empty() {
        return Err(PlannerError::configuration("At least one location is required"));
    }
    let resolved = resolve_populations(populations)?;

    let positions = {
        let _timing = logging::start_timing("layout_positions",
            OperationCategory::GraphBuild { subcategory: GraphBuildType::Layout });
        layout_positions(resolved.len(), params)?
    };

    connect(&resolved, positions, params)
}

/// Builds a connected graph over caller-supplied positions (e.g. loaded from a file).
/// `params.layout` only decides between chain linking and nearest-neighbour linking.
pub fn build_graph_at(
    populations: &[Option<f64>],
    positions: Vec<Coordinate>,
    params: &LayoutParams,
) -> Result<Graph, PlannerError> {
    let _timing = logging::start_timing("build_graph_at",
        OperationCategory::GraphBuild { subcategory: GraphBuildType::Other });

    if populations.is_empty() {
        return Err(PlannerError::configuration("At least one location is required"));
    }
    if positions.len() != populations.len() {
        return Err(PlannerError::configuration(format!(
            "Expected {} positions, got {}", populations.len(), positions.len()
        )));
    }
    if let Some(bad) = positions.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(PlannerError::configuration(format!("Invalid position ({}, {})", bad.x, bad.y)));
    }
    let resolved = resolve_populations(populations)?;

    connect(&resolved, positions, params)
}

fn connect(resolved: &[f64], positions: Vec<Coordinate>, params: &LayoutParams) -> Result<Graph, PlannerError> {
    let locations: Vec<Location> = resolved
        .iter()
        .zip(positions.iter())
        .enumerate()
        .map(|(id, (&population, &coordinate))| Location::new(id, population, coordinate))
        .collect();
    let mut graph = Graph::new(locations);

    let pairs: Vec<(usize, usize)> = match params.layout {
        Layout::Chain => (1..positions.len()).map(|i| (i - 1, i)).collect(),
        _ => {
            let mut pairs = {
                let _timing = logging::start_timing("nearest_neighbor_edges",
                    OperationCategory::GraphBuild { subcategory: GraphBuildType::NearestNeighbors });
                nearest_neighbor_pairs(&positions, params.neighbors)
            };
            let _timing = logging::start_timing("spanning_tree_backbone",
                OperationCategory::GraphBuild { subcategory: GraphBuildType::SpanningTree });
            pairs.extend(minimum_spanning_tree(&positions));
            pairs
        }
    };

    for (a, b) in pairs {
        let distance = match params.weighting {
            EdgeWeighting::Unit => 1.0,
            EdgeWeighting::Euclidean => positions[a].distance_to(&positions[b]),
        };
        graph.add_edge(a, b, distance)?;
    }

    debug!(
        locations = graph.len(),
        edges = graph.get_edges().len(),
        layout = %params.layout,
        weighting = %params.weighting,
        "built proximity graph"
    );

    Ok(graph)
}

pub fn resolve_populations(populations: &[Option<f64>]) -> Result<Vec<f64>, PlannerError> {
    populations
        .iter()
        .enumerate()
        .map(|(id, population)| {
            let value = population.unwrap_or(DEFAULT_POPULATION);
            if !value.is_finite() || value < 0.0 {
                Err(PlannerError::configuration(format!(
                    "Population of location {} must be a non-negative number, got {}", id, value
                )))
            } else {
                Ok(value)
            }
        })
        .collect()
}

fn layout_positions(n: usize, params: &LayoutParams) -> Result<Vec<Coordinate>, PlannerError> {
    let positions: Vec<Coordinate> = match params.layout {
        Layout::Chain => {
            let step = if n > 1 { LAYOUT_WIDTH / (n - 1) as f64 } else { 0.0 };
            (0..n).map(|i| Coordinate::new(i as f64 * step, LAYOUT_HEIGHT / 2.0)).collect()
        }
        Layout::Circular => {
            let radius = LAYOUT_WIDTH.min(LAYOUT_HEIGHT) / 2.0;
            (0..n)
                .map(|i| {
                    let angle = std::f64::consts::TAU * i as f64 / n as f64;
                    Coordinate::new(
                        LAYOUT_WIDTH / 2.0 + radius * angle.cos(),
                        LAYOUT_HEIGHT / 2.0 + radius * angle.sin(),
                    )
                })
                .collect()
        }
        Layout::Grid => {
            let columns = match params.grid_columns {
                Some(0) => return Err(PlannerError::configuration("Grid layout needs at least one column")),
                Some(columns) => columns,
                None => (n as f64).sqrt().ceil() as usize,
            };
            let rows = (n + columns - 1) / columns;
            let dx = if columns > 1 { LAYOUT_WIDTH / (columns - 1) as f64 } else { 0.0 };
            let dy = if rows > 1 { LAYOUT_HEIGHT / (rows - 1) as f64 } else { 0.0 };
            (0..n)
                .map(|i| Coordinate::new((i % columns) as f64 * dx, (i / columns) as f64 * dy))
                .collect()
        }
        Layout::Random => {
            let mut rng = StdRng::seed_from_u64(params.seed);
            (0..n)
                .map(|_| Coordinate::new(rng.gen_range(0.0..LAYOUT_WIDTH), rng.gen_range(0.0..LAYOUT_HEIGHT)))
                .collect()
        }
    };
    Ok(positions)
}

/// Links each location to its `k` nearest positions. Ties go to the lower id.
fn nearest_neighbor_pairs(positions: &[Coordinate], k: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, origin) in positions.iter().enumerate() {
        let mut others: Vec<(f64, usize)> = positions
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, p)| (origin.distance_to(p), j))
            .collect();
        others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        pairs.extend(others.into_iter().take(k).map(|(_, j)| (i.min(j), i.max(j))));
    }
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

/// Kruskal over the complete Euclidean graph. Returns `n - 1` pairs.
fn minimum_spanning_tree(positions: &[Coordinate]) -> Vec<(usize, usize)> {
    let n = positions.len();
    let mut candidates = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            candidates.push((positions[i].distance_to(&positions[j]), i, j));
        }
    }
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then((a.1, a.2).cmp(&(b.1, b.2))));

    let mut sets = DisjointSet::new(n);
    let mut tree = Vec::with_capacity(n.saturating_sub(1));
    for (_, i, j) in candidates {
        if sets.union(i, j) {
            tree.push((i, j));
            if tree.len() + 1 == n {
                break;
            }
        }
    }
    tree
}

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Returns false when `a` and `b` were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanning_tree_has_n_minus_one_edges() {
        let positions: Vec<Coordinate> = (0..6).map(|i| Coordinate::new(i as f64 * 7.0, (i % 2) as f64)).collect();
        assert_eq!(minimum_spanning_tree(&positions).len(), 5);
        assert!(minimum_spanning_tree(&positions[..1]).is_empty());
    }

    #[test]
    fn nearest_neighbors_are_deduplicated() {
        let positions = vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0), Coordinate::new(5.0, 0.0)];
        assert_eq!(nearest_neighbor_pairs(&positions, 1), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn disjoint_set_joins_once() {
        let mut sets = DisjointSet::new(3);
        assert!(sets.union(0, 1));
        assert!(!sets.union(1, 0));
        assert!(sets.union(2, 1));
        assert_eq!(sets.find(0), sets.find(2));
    }

    #[test]
    fn layout_names_parse() {
        assert_eq!("Grid".parse::<Layout>().unwrap(), Layout::Grid);
        assert_eq!("line".parse::<Layout>().unwrap(), Layout::Chain);
        assert!("spiral".parse::<Layout>().is_err());
        assert_eq!("euclidean".parse::<EdgeWeighting>().unwrap(), EdgeWeighting::Euclidean);
    }
}
