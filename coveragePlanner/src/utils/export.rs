use std::path::{Path, PathBuf};
use chrono::Local;
use serde::Serialize;
use tracing::info;
use crate::analysis::coverage::CoverageResult;
use crate::core::sweep::SweepPoint;
use crate::error::PlannerError;
use crate::models::graph::{Edge, Graph};
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Serialize)]
struct LocationRow {
    id: usize,
    population: f64,
    x: f64,
    y: f64,
    is_center: bool,
    covered: bool,
    covering_centers: String,
    node_size: f64,
}

#[derive(Debug, Serialize)]
struct NodeView {
    id: usize,
    population: f64,
    x: f64,
    y: f64,
    is_center: bool,
    covered: bool,
    node_size: f64,
}

/// Everything a renderer needs to draw the placement.
#[derive(Debug, Serialize)]
struct PlacementExport<'a> {
    generated_at: String,
    nodes: Vec<NodeView>,
    edges: &'a [Edge],
    result: &'a CoverageResult,
}

pub fn timestamped_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    dir.join(format!("{}_{}.{}", prefix, timestamp, extension))
}

pub fn write_locations_csv<P: AsRef<Path>>(path: P, graph: &Graph, result: &CoverageResult) -> Result<(), PlannerError> {
    let _timing = logging::start_timing("write_locations_csv",
        OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

    let sizes = CoverageResult::node_sizes(&graph.populations());
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for (location, size) in graph.get_locations().iter().zip(sizes) {
        let id = location.get_id();
        let centers: Vec<String> = result.assignment.centers_for(id).iter().map(|c| c.to_string()).collect();
        writer.serialize(LocationRow {
            id,
            population: location.get_population(),
            x: location.get_coordinate().x,
            y: location.get_coordinate().y,
            is_center: result.is_center(id),
            covered: result.assignment.is_covered(id),
            covering_centers: centers.join(";"),
            node_size: size,
        })?;
    }
    writer.flush()?;

    info!(path = %path.as_ref().display(), "wrote location CSV");
    Ok(())
}

pub fn write_placement_json<P: AsRef<Path>>(path: P, graph: &Graph, result: &CoverageResult) -> Result<(), PlannerError> {
    let _timing = logging::start_timing("write_placement_json",
        OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

    let sizes = CoverageResult::node_sizes(&graph.populations());
    let nodes = graph
        .get_locations()
        .iter()
        .zip(sizes)
        .map(|(location, node_size)| NodeView {
            id: location.get_id(),
            population: location.get_population(),
            x: location.get_coordinate().x,
            y: location.get_coordinate().y,
            is_center: result.is_center(location.get_id()),
            covered: result.assignment.is_covered(location.get_id()),
            node_size,
        })
        .collect();

    let export = PlacementExport {
        generated_at: Local::now().to_rfc3339(),
        nodes,
        edges: graph.get_edges(),
        result,
    };
    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&export)?)?;

    info!(path = %path.as_ref().display(), "wrote placement JSON");
    Ok(())
}

pub fn write_sweep_csv<P: AsRef<Path>>(path: P, points: &[SweepPoint]) -> Result<(), PlannerError> {
    let _timing = logging::start_timing("write_sweep_csv",
        OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["coverage_distance", "center_count", "coverage_percent", "centers"])?;
    for point in points {
        let centers: Vec<String> = point.centers.iter().map(|c| c.to_string()).collect();
        writer.write_record([
            point.coverage_distance.to_string(),
            point.center_count.to_string(),
            format!("{:.2}", point.coverage_percent),
            centers.join(";"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
