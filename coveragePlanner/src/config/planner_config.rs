use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::constants::{DEFAULT_COVERAGE_DISTANCE, DEFAULT_INPUT_POPULATION, DEFAULT_LOCATION_COUNT, DEFAULT_OUTPUT_DIR};
use crate::core::graph_builder::LayoutParams;
use crate::core::selector::SelectorOptions;
use crate::error::PlannerError;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub location_count: usize,
    /// Explicit populations; `None` entries fall back to the default weight.
    pub populations: Option<Vec<Option<f64>>>,
    pub coverage_distance: f64,
    pub layout: LayoutParams,
    pub selector: SelectorOptions,
    pub sweep: Option<SweepConfig>,
    pub output_dir: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            location_count: DEFAULT_LOCATION_COUNT,
            populations: None,
            coverage_distance: DEFAULT_COVERAGE_DISTANCE,
            layout: LayoutParams::default(),
            selector: SelectorOptions::default(),
            sweep: None,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PlannerError> {
        let _timing = logging::start_timing("load_config",
            OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });

        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "loaded planner config");
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PlannerError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Populations for every location, padding with the CLI's prefilled value when none were given.
    pub fn resolved_populations(&self) -> Vec<Option<f64>> {
        match &self.populations {
            Some(populations) => populations.clone(),
            None => vec![Some(DEFAULT_INPUT_POPULATION); self.location_count],
        }
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.coverage_distance.is_nan() || self.coverage_distance < 0.0 {
            return Err(PlannerError::configuration(format!(
                "Coverage distance must be non-negative, got {}", self.coverage_distance
            )));
        }
        if self.location_count == 0 {
            return Err(PlannerError::configuration("Number of locations must be positive"));
        }
        self.selector.validate()?;
        if let Some(populations) = &self.populations {
            if populations.len() != self.location_count {
                return Err(PlannerError::configuration(format!(
                    "Please enter exactly {} population values (got {})",
                    self.location_count, populations.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config: PlannerConfig = serde_json::from_str(r#"{ "coverage_distance": 3.5 }"#).unwrap();
        assert_eq!(config.coverage_distance, 3.5);
        assert_eq!(config.location_count, DEFAULT_LOCATION_COUNT);
        assert_eq!(config.resolved_populations(), vec![Some(10.0); DEFAULT_LOCATION_COUNT]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mismatched_population_count_fails_validation() {
        let config = PlannerConfig {
            location_count: 3,
            populations: Some(vec![Some(1.0), None]),
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_selector_epsilon_fails_validation() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{ "coverage_distance": 0.0, "selector": { "epsilon": -1.0 } }"#).unwrap();
        assert!(matches!(config.validate(), Err(PlannerError::Configuration(_))));
    }
}
