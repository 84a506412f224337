use std::fmt;

#[derive(Debug)]
pub enum PlannerError {
    /// An input parameter is out of range (negative distance, negative population, no locations...).
    Configuration(String),
    /// The graph handed to the selector has no locations to cover.
    EmptyGraph,
    /// Some pair of locations has no path between them.
    DisconnectedGraph { components: usize },
    InvalidPopulation(String),
    IoError(std::io::Error),
    CsvError(csv::Error),
    JsonError(serde_json::Error),
}

impl PlannerError {
    pub fn configuration(message: impl Into<String>) -> Self {
        PlannerError::Configuration(message.into())
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::IoError(err)
    }
}

impl From<csv::Error> for PlannerError {
    fn from(err: csv::Error) -> Self {
        PlannerError::CsvError(err)
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::JsonError(err)
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Configuration(s) => write!(f, "Configuration error: {}", s),
            PlannerError::EmptyGraph => write!(f, "Graph has no locations to cover"),
            PlannerError::DisconnectedGraph { components } => {
                write!(f, "Graph is disconnected ({} components)", components)
            }
            PlannerError::InvalidPopulation(s) => write!(f, "Invalid population: {}", s),
            PlannerError::IoError(e) => write!(f, "IO error: {}", e),
            PlannerError::CsvError(e) => write!(f, "CSV error: {}", e),
            PlannerError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::IoError(e) => Some(e),
            PlannerError::CsvError(e) => Some(e),
            PlannerError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}
