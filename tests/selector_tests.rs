//! Greedy selector scenarios and coverage properties.

use approx::assert_relative_eq;
use coverage_planner::core::distance::DistanceTable;
use coverage_planner::core::selector::{select_centers, select_centers_with, SelectorOptions};
use coverage_planner::{build_graph, EdgeWeighting, Graph, Layout, LayoutParams, PlannerError};

fn line(n: usize) -> Graph {
    let mut graph = Graph::from_populations(&vec![1.0; n]);
    for i in 1..n {
        graph.add_edge(i - 1, i, 1.0).unwrap();
    }
    graph
}

fn star(leaves: usize) -> Graph {
    let mut graph = Graph::from_populations(&vec![1.0; leaves + 1]);
    for leaf in 1..=leaves {
        graph.add_edge(0, leaf, 1.0).unwrap();
    }
    graph
}

fn assert_full_coverage(graph: &Graph, centers: &[usize], x: f64) {
    let table = DistanceTable::from_graph(graph);
    for id in 0..graph.len() {
        assert!(
            centers.iter().any(|&c| table.get(c, id) <= x + 1e-9),
            "location {} has no center within {}",
            id,
            x
        );
    }
}

#[test]
fn line_of_five_picks_one_and_three() {
    let graph = line(5);
    let result = select_centers(&graph, &[1.0; 5], 1.0).unwrap();
    assert_eq!(result.centers, vec![1, 3]);
    assert_eq!(result.center_coverage, vec![(1, vec![0, 1, 2]), (3, vec![2, 3, 4])]);
    assert_full_coverage(&graph, &result.centers, 1.0);
    assert_relative_eq!(result.coverage_percent, 100.0);
}

#[test]
fn star_is_covered_by_its_hub() {
    let graph = star(4);
    let result = select_centers(&graph, &[1.0; 5], 1.0).unwrap();
    assert_eq!(result.centers, vec![0]);
    assert_eq!(result.center_count(), 1);
    assert_relative_eq!(result.coverage_percent, 100.0);
}

#[test]
fn zero_distance_makes_every_location_a_center() {
    let graph = line(6);
    let result = select_centers(&graph, &[3.0; 6], 0.0).unwrap();
    assert_eq!(result.centers, vec![0, 1, 2, 3, 4, 5]);
    assert!(result.steps.iter().all(|s| s.gain == 1 && !s.fallback));
}

#[test]
fn symmetric_ties_go_to_lower_id() {
    // A 4-cycle: every location reaches itself and both neighbours at X = 1
    let mut graph = Graph::from_populations(&[1.0; 4]);
    graph.add_edge(0, 1, 1.0).unwrap();
    graph.add_edge(1, 2, 1.0).unwrap();
    graph.add_edge(2, 3, 1.0).unwrap();
    graph.add_edge(3, 0, 1.0).unwrap();
    let result = select_centers(&graph, &[1.0; 4], 1.0).unwrap();
    assert_eq!(result.centers[0], 0);
    // only 2 is left; 1, 2 and 3 all reach it, 1 wins
    assert_eq!(result.centers, vec![0, 1]);
}

#[test]
fn repeated_runs_are_identical() {
    let params = LayoutParams {
        layout: Layout::Random,
        weighting: EdgeWeighting::Euclidean,
        neighbors: 3,
        grid_columns: None,
        seed: 7,
    };
    let graph = build_graph(&vec![Some(5.0); 40], &params).unwrap();
    let weights = graph.populations();
    let first = select_centers(&graph, &weights, 20.0).unwrap();
    for _ in 0..3 {
        let again = select_centers(&graph, &weights, 20.0).unwrap();
        assert_eq!(again.centers, first.centers);
    }
    let parallel = select_centers_with(
        &graph,
        &weights,
        20.0,
        &SelectorOptions { parallel: true, ..SelectorOptions::default() },
    )
    .unwrap();
    assert_eq!(parallel.centers, first.centers);
}

#[test]
fn coverage_grows_every_iteration() {
    let params = LayoutParams { layout: Layout::Grid, ..LayoutParams::default() };
    let graph = build_graph(&vec![None; 30], &params).unwrap();
    let result = select_centers(&graph, &graph.populations(), 1.0).unwrap();

    let mut previous = 0;
    for step in &result.steps {
        assert!(step.covered_after > previous);
        assert_eq!(step.covered_after - previous, step.gain);
        previous = step.covered_after;
    }
    assert_eq!(previous, graph.len());
    assert!(result.center_count() <= graph.len());
    assert_full_coverage(&graph, &result.centers, 1.0);
}

#[test]
fn populations_are_weighted_in_totals() {
    let graph = line(3);
    let result = select_centers(&graph, &[10.0, 0.0, 30.0], 1.0).unwrap();
    assert_relative_eq!(result.total_population, 40.0);
    assert_relative_eq!(result.covered_population, 40.0);
    assert_relative_eq!(result.coverage_percent, 100.0);
}

#[test]
fn zero_total_population_still_reports_full_coverage() {
    let graph = line(2);
    let result = select_centers(&graph, &[0.0, 0.0], 1.0).unwrap();
    assert_relative_eq!(result.coverage_percent, 100.0);
}

#[test]
fn disconnected_input_is_rejected() {
    let mut graph = Graph::from_populations(&[1.0; 5]);
    graph.add_edge(0, 1, 1.0).unwrap();
    graph.add_edge(1, 2, 1.0).unwrap();
    graph.add_edge(3, 4, 1.0).unwrap();
    let err = select_centers(&graph, &[1.0; 5], 10.0).unwrap_err();
    assert!(matches!(err, PlannerError::DisconnectedGraph { components: 2 }));
}

#[test]
fn negative_distance_is_a_configuration_error() {
    let err = select_centers(&line(3), &[1.0; 3], -0.5).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));
    let err = select_centers(&line(3), &[1.0; 3], f64::NAN).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));
}

#[test]
fn epsilon_outside_the_float_slack_is_rejected() {
    let negative = SelectorOptions { parallel: false, epsilon: -1.0 };
    let err = select_centers_with(&line(3), &[1.0; 3], 0.0, &negative).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));

    // would let center 0 claim location 4 at distance 4
    let wide = SelectorOptions { parallel: false, epsilon: 10.0 };
    let err = select_centers_with(&line(5), &[1.0; 5], 1.0, &wide).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));

    let not_a_number = SelectorOptions { parallel: true, epsilon: f64::NAN };
    assert!(select_centers_with(&line(5), &[1.0; 5], 1.0, &not_a_number).is_err());
}

#[test]
fn empty_graph_is_rejected() {
    let err = select_centers(&Graph::from_populations(&[]), &[], 1.0).unwrap_err();
    assert!(matches!(err, PlannerError::EmptyGraph));
}

#[test]
fn population_mismatch_is_rejected() {
    let err = select_centers(&line(3), &[1.0; 2], 1.0).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));
    let err = select_centers(&line(3), &[1.0, -1.0, 1.0], 1.0).unwrap_err();
    assert!(matches!(err, PlannerError::Configuration(_)));
}

#[test]
fn covering_centers_are_recorded_per_location() {
    let graph = line(5);
    let result = select_centers(&graph, &[1.0; 5], 1.0).unwrap();
    assert_eq!(result.assignment.centers_for(2), &[1, 3]);
    assert_eq!(result.assignment.centers_for(4), &[3]);
    assert!(result.uncovered().is_empty());
}
