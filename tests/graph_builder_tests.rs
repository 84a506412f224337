//! Graph construction: connectivity, defaults and input validation.

use coverage_planner::config::constants::DEFAULT_POPULATION;
use coverage_planner::core::distance::DistanceTable;
use coverage_planner::core::graph_builder::build_graph_at;
use coverage_planner::data::poi::Coordinate;
use coverage_planner::{build_graph, EdgeWeighting, Layout, LayoutParams, PlannerError};

fn params(layout: Layout, weighting: EdgeWeighting) -> LayoutParams {
    LayoutParams { layout, weighting, ..LayoutParams::default() }
}

#[test]
fn every_layout_is_connected() {
    let layouts = [Layout::Chain, Layout::Circular, Layout::Grid, Layout::Random];
    let weightings = [EdgeWeighting::Unit, EdgeWeighting::Euclidean];
    for layout in layouts {
        for weighting in weightings {
            for n in [1usize, 2, 7, 25] {
                let mut p = params(layout, weighting);
                p.neighbors = 1;
                let graph = build_graph(&vec![Some(2.0); n], &p).unwrap();
                assert_eq!(graph.len(), n);
                assert!(graph.is_connected(), "{} / {} with {} locations", layout, weighting, n);
                assert!(DistanceTable::from_graph(&graph).is_fully_connected());
            }
        }
    }
}

#[test]
fn chain_matches_hop_distances() {
    let graph = build_graph(&vec![Some(10.0); 5], &LayoutParams::default()).unwrap();
    assert_eq!(graph.get_edges().len(), 4);
    let table = DistanceTable::from_graph(&graph);
    assert_eq!(table.get(0, 4), 4.0);
    assert_eq!(table.get(1, 3), 2.0);
}

#[test]
fn missing_populations_use_default_weight() {
    let graph = build_graph(&[Some(4.0), None, Some(0.0)], &LayoutParams::default()).unwrap();
    assert_eq!(graph.populations(), vec![4.0, DEFAULT_POPULATION, 0.0]);
}

#[test]
fn zero_locations_is_a_configuration_error() {
    let err = build_graph(&[], &LayoutParams::default()).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));
}

#[test]
fn negative_population_is_a_configuration_error() {
    let err = build_graph(&[Some(1.0), Some(-3.0)], &LayoutParams::default()).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));
}

#[test]
fn zero_grid_columns_is_rejected() {
    let mut p = params(Layout::Grid, EdgeWeighting::Unit);
    p.grid_columns = Some(0);
    assert!(build_graph(&[None, None], &p).is_err());
}

#[test]
fn random_layout_is_reproducible_per_seed() {
    let p = params(Layout::Random, EdgeWeighting::Euclidean);
    let a = build_graph(&vec![None; 12], &p).unwrap();
    let b = build_graph(&vec![None; 12], &p).unwrap();
    assert_eq!(a.get_edges(), b.get_edges());

    let other = LayoutParams { seed: p.seed + 1, ..p.clone() };
    let c = build_graph(&vec![None; 12], &other).unwrap();
    assert_ne!(a.get_edges(), c.get_edges());
}

#[test]
fn euclidean_edges_carry_position_distance() {
    let positions = vec![Coordinate::new(0.0, 0.0), Coordinate::new(3.0, 4.0), Coordinate::new(100.0, 0.0)];
    let graph = build_graph_at(&[None, None, None], positions, &params(Layout::Grid, EdgeWeighting::Euclidean)).unwrap();
    let edge = graph
        .get_edges()
        .iter()
        .find(|e| (e.a, e.b) == (0, 1))
        .expect("nearest pair is linked");
    assert_eq!(edge.distance, 5.0);
    assert!(graph.is_connected());
}

#[test]
fn supplied_positions_must_match_locations() {
    let err = build_graph_at(&[None, None], vec![Coordinate::new(0.0, 0.0)], &LayoutParams::default()).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));
}
