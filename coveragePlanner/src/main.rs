use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use coverage_planner::cli::cli::Args;
use coverage_planner::config::planner_config::{PlannerConfig, SweepConfig};
use coverage_planner::core::graph_builder::{build_graph, build_graph_at};
use coverage_planner::core::selector::select_centers_with;
use coverage_planner::core::sweep::{coverage_sweep, distance_steps};
use coverage_planner::data::population_loader::{load_locations, parse_population_list};
use coverage_planner::analysis::reporting;
use coverage_planner::utils::export;
use coverage_planner::utils::logging;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging());

    println!("Coverage Center Planner");

    let mut config = match args.config() {
        Some(path) => PlannerConfig::load(path).with_context(|| format!("reading config {}", path))?,
        None => PlannerConfig::default(),
    };
    apply_overrides(&mut config, &args)?;

    let mut positions = None;
    if let Some(path) = args.population_file() {
        let loaded = load_locations(path).with_context(|| format!("loading locations from {}", path))?;
        config.location_count = loaded.populations.len();
        config.populations = Some(loaded.populations);
        positions = loaded.positions;
    } else if let Some(list) = args.populations() {
        let expected = args.locations().unwrap_or_else(|| list.split(',').count());
        config.location_count = expected;
        config.populations = Some(parse_population_list(list, Some(expected))?);
    }
    config.validate()?;

    let populations = config.resolved_populations();
    let graph = match positions {
        Some(positions) => build_graph_at(&populations, positions, &config.layout)?,
        None => build_graph(&populations, &config.layout)?,
    };
    info!(
        locations = graph.len(),
        edges = graph.get_edges().len(),
        layout = %config.layout.layout,
        "graph ready"
    );

    let weights = graph.populations();
    let result = select_centers_with(&graph, &weights, config.coverage_distance, &config.selector)?;
    reporting::print_summary(&result);
    reporting::print_center_coverage(&result);

    let output_dir = Path::new(&config.output_dir);
    if args.export_csv() || args.export_json() {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    }
    if args.export_csv() {
        let path = export::timestamped_path(output_dir, "placement", "csv");
        export::write_locations_csv(&path, &graph, &result)?;
        println!("Location table written to {}", path.display());
    }
    if args.export_json() {
        let path = export::timestamped_path(output_dir, "placement", "json");
        export::write_placement_json(&path, &graph, &result)?;
        println!("Placement written to {}", path.display());
    }

    if let Some(sweep) = &config.sweep {
        let distances = distance_steps(sweep.start, sweep.end, sweep.step)?;
        let points = coverage_sweep(&graph, &weights, &distances, &config.selector, true)?;
        reporting::print_sweep(&points);
        if args.export_csv() {
            let path = export::timestamped_path(output_dir, "sweep", "csv");
            export::write_sweep_csv(&path, &points)?;
            println!("Sweep written to {}", path.display());
        }
    }

    logging::print_timing_report();
    Ok(())
}

fn apply_overrides(config: &mut PlannerConfig, args: &Args) -> Result<()> {
    if let Some(n) = args.locations() {
        config.location_count = n;
    }
    if let Some(x) = args.distance() {
        config.coverage_distance = x;
    }
    if let Some(layout) = args.layout() {
        config.layout.layout = layout.parse()?;
    }
    if let Some(weighting) = args.weighting() {
        config.layout.weighting = weighting.parse()?;
    }
    if let Some(k) = args.neighbors() {
        config.layout.neighbors = k;
    }
    if args.grid_columns().is_some() {
        config.layout.grid_columns = args.grid_columns();
    }
    if let Some(seed) = args.seed() {
        config.layout.seed = seed;
    }
    if args.parallel() {
        config.selector.parallel = true;
    }
    if let Some(dir) = args.output_dir() {
        config.output_dir = dir.to_string();
    }
    if let Some(end) = args.sweep_max() {
        config.sweep = Some(SweepConfig {
            start: 0.0,
            end,
            step: args.sweep_step(),
        });
    }
    Ok(())
}
