use std::path::Path;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::data::poi::Coordinate;
use crate::error::PlannerError;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Parses a comma-separated population list such as `"10,20,,5"`.
/// Empty entries mean "use the default population" and come back as `None`.
/// With `expected` set, the number of entries must match it.
pub fn parse_population_list(input: &str, expected: Option<usize>) -> Result<Vec<Option<f64>>, PlannerError> {
    let populations = input
        .split(',')
        .map(str::trim)
        .map(|entry| {
            if entry.is_empty() {
                return Ok(None);
            }
            let value: f64 = entry
                .parse()
                .map_err(|_| PlannerError::InvalidPopulation(format!("'{}' is not a number", entry)))?;
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidPopulation(format!("'{}' must be non-negative", entry)));
            }
            Ok(Some(value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(count) = expected {
        if populations.len() != count {
            return Err(PlannerError::InvalidPopulation(format!(
                "Please enter exactly {} population values (got {})", count, populations.len()
            )));
        }
    }

    Ok(populations)
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRecord {
    pub id: usize,
    pub population: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Locations read from a file, ordered by id.
#[derive(Debug, Clone)]
pub struct LoadedLocations {
    pub populations: Vec<Option<f64>>,
    /// Present only when every row carries both coordinates.
    pub positions: Option<Vec<Coordinate>>,
}

/// Loads `id,population[,x,y]` rows. Ids must be exactly `0..n` in any order.
pub fn load_locations<P: AsRef<Path>>(path: P) -> Result<LoadedLocations, PlannerError> {
    let _timing = logging::start_timing("load_locations",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad });

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: LocationRecord = row?;
        records.push(record);
    }

    let loaded = records_to_locations(records)?;
    debug!(
        path = %path.as_ref().display(),
        locations = loaded.populations.len(),
        "loaded locations"
    );
    Ok(loaded)
}

pub fn records_to_locations(mut records: Vec<LocationRecord>) -> Result<LoadedLocations, PlannerError> {
    records.sort_by_key(|r| r.id);
    for (expected, record) in records.iter().enumerate() {
        if record.id != expected {
            return Err(PlannerError::InvalidPopulation(format!(
                "Location ids must be unique and run from 0 to {}; found {} at position {}",
                records.len().saturating_sub(1), record.id, expected
            )));
        }
    }

    let populations = records.iter().map(|r| r.population).collect();

    let coordinates: Vec<Option<Coordinate>> = records
        .iter()
        .map(|r| match (r.x, r.y) {
            (Some(x), Some(y)) => Some(Coordinate::new(x, y)),
            _ => None,
        })
        .collect();
    let with_position = coordinates.iter().filter(|c| c.is_some()).count();
    let positions = if with_position == records.len() && !records.is_empty() {
        coordinates.into_iter().collect()
    } else {
        if with_position > 0 {
            warn!(with_position, total = records.len(), "ignoring partial coordinates, using generated layout");
        }
        None
    };

    Ok(LoadedLocations { populations, positions })
}
