use std::fmt::Write as _;
use super::coverage::CoverageResult;
use crate::core::sweep::SweepPoint;

fn format_ids(ids: &[usize]) -> String {
    let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", joined.join(", "))
}

/// Console summary of one selection run.
pub fn summary_text(result: &CoverageResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nCoverage Summary (Coverage Distance = {})", result.coverage_distance);
    let _ = writeln!(out, "----------------------------------------");
    let _ = writeln!(out, "Total Locations: {}", result.location_count());
    let _ = writeln!(out, "Centers Placed: {}", result.center_count());
    let _ = writeln!(out, "Population Covered: {:.1}%", result.coverage_percent);
    let _ = writeln!(out, "  Covered: {:.1} of {:.1}", result.covered_population, result.total_population);
    let _ = writeln!(out, "Centers placed at: {}", format_ids(&result.centers));

    let uncovered = result.uncovered();
    if !uncovered.is_empty() {
        let _ = writeln!(out, "Uncovered Locations: {}", format_ids(&uncovered));
    }
    out
}

pub fn coverage_by_center_text(result: &CoverageResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nNode Coverage by Each Center:");
    let _ = writeln!(out, "----------------------------------------");
    for (center, members) in &result.center_coverage {
        let _ = writeln!(out, "Center {} covers nodes: {}", center, format_ids(members));
    }
    out
}

pub fn print_summary(result: &CoverageResult) {
    print!("{}", summary_text(result));
}

pub fn print_center_coverage(result: &CoverageResult) {
    print!("{}", coverage_by_center_text(result));
    println!("----------------------------------------");
}

pub fn print_sweep(points: &[SweepPoint]) {
    println!("\nCoverage Distance Sweep:");
    println!("----------------------------------------");
    println!("{:>10} {:>8} {:>10}", "Distance", "Centers", "Covered");
    for point in points {
        println!(
            "{:>10.2} {:>8} {:>9.1}%",
            point.coverage_distance, point.center_count, point.coverage_percent
        );
    }
    println!("----------------------------------------");
}
