use serde::{Deserialize, Serialize};

use crate::fuel::FuelParams;
use crate::loading::de::deserialize_or_ignore;
use crate::model::Stop;

fn default_algorithm() -> String {
    "astar".to_string()
}

fn default_mode() -> String {
    "car".to_string()
}

/// One planning request as received from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Stops in visiting order
    pub stops: Vec<Stop>,
    /// `"dijkstra"` plans the shortest route, anything else the fastest
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Malformed fuel input is logged and dropped
    #[serde(
        default,
        deserialize_with = "deserialize_or_ignore",
        skip_serializing_if = "Option::is_none"
    )]
    pub fuel: Option<FuelParams>,
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Departure time of day as `HH:MM`
    pub start_time: String,
}

impl TripRequest {
    pub fn new(stops: Vec<Stop>, mode: impl Into<String>, start_time: impl Into<String>) -> Self {
        Self {
            stops,
            algorithm: default_algorithm(),
            fuel: None,
            mode: mode.into(),
            start_time: start_time.into(),
        }
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    #[must_use]
    pub fn with_fuel(mut self, fuel: FuelParams) -> Self {
        self.fuel = Some(fuel);
        self
    }
}
