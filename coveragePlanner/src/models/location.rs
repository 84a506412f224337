use serde::{Deserialize, Serialize};
use crate::data::poi::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    id: usize,
    population: f64,
    coordinate: Coordinate,
}

impl Location {
    pub fn new(id: usize, population: f64, coordinate: Coordinate) -> Self {
        Self { id, population, coordinate }
    }

    pub fn get_id(&self) -> usize {
        self.id
    }

    pub fn get_population(&self) -> f64 {
        self.population
    }

    pub fn get_coordinate(&self) -> &Coordinate {
        &self.coordinate
    }
}
