//! Range check for a stop sequence and refuel stop insertion.
//!
//! The check runs before any routing, so the trip length is estimated from
//! straight-line distances between stops scaled by a road factor.

mod stations;

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loading::de::deserialize_lenient_number;
use crate::model::{Stop, StopPoint, StopResolver};

pub use stations::StationRegistry;

/// Vehicle fuel state as sent by clients.
///
/// Both fields accept numbers or numeric strings. A missing or blank field
/// means no fuel constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelParams {
    /// Average economy, distance per volume unit
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub avg: Option<String>,
    /// Current fuel volume
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub curr: Option<String>,
}

impl FuelParams {
    pub fn new(avg: f64, curr: f64) -> Self {
        Self {
            avg: Some(avg.to_string()),
            curr: Some(curr.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuelInputError {
    #[error("Fuel parameter '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Average fuel economy must be positive, got {0}")]
    NonPositiveEconomy(f64),
    #[error("Current fuel level must not be negative, got {0}")]
    NegativeFuel(f64),
}

/// Outcome of a well-formed fuel check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuelAssessment {
    /// No fuel parameters were given
    Unconstrained,
    WithinRange { range_km: f64, estimate_km: f64 },
    OutOfRange { range_km: f64, estimate_km: f64 },
}

impl FuelAssessment {
    pub fn needs_refuel(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Stops after the check, with the alert flag and the inserted station name
#[derive(Debug, Clone, PartialEq)]
pub struct FuelDecision {
    pub stops: Vec<Stop>,
    pub alert: bool,
    pub inserted: Option<String>,
}

impl FuelDecision {
    fn unchanged(stops: Vec<Stop>) -> Self {
        Self {
            stops,
            alert: false,
            inserted: None,
        }
    }
}

pub struct FuelCheck<'a, R: ?Sized> {
    resolver: &'a R,
    stations: Option<&'a StationRegistry>,
    road_factor: f64,
}

impl<'a, R: StopResolver + ?Sized> FuelCheck<'a, R> {
    pub fn new(resolver: &'a R, stations: Option<&'a StationRegistry>, road_factor: f64) -> Self {
        Self {
            resolver,
            stations,
            road_factor,
        }
    }

    /// Sum of great-circle distances between consecutive stops times the
    /// road factor. Pairs with an unresolvable stop contribute nothing.
    pub fn estimate_distance_km(&self, stops: &[Stop]) -> f64 {
        stops
            .iter()
            .map(|stop| stop.resolve(self.resolver))
            .tuple_windows()
            .filter_map(|(from, to)| Some(from?.haversine_km(to?)))
            .sum::<f64>()
            * self.road_factor
    }

    /// Compares the estimated trip length with the vehicle range.
    ///
    /// # Errors
    ///
    /// Returns a [`FuelInputError`] when a fuel field is not a finite number,
    /// the economy is not positive or the fuel level is negative.
    pub fn assess(
        &self,
        stops: &[Stop],
        params: Option<&FuelParams>,
    ) -> Result<FuelAssessment, FuelInputError> {
        let Some(params) = params else {
            return Ok(FuelAssessment::Unconstrained);
        };
        let (Some(avg), Some(curr)) = (
            present(params.avg.as_deref()),
            present(params.curr.as_deref()),
        ) else {
            return Ok(FuelAssessment::Unconstrained);
        };

        let economy = parse_field("avg", avg)?;
        let fuel = parse_field("curr", curr)?;
        if economy <= 0.0 {
            return Err(FuelInputError::NonPositiveEconomy(economy));
        }
        if fuel < 0.0 {
            return Err(FuelInputError::NegativeFuel(fuel));
        }

        let range_km = economy * fuel;
        let estimate_km = self.estimate_distance_km(stops);
        debug!("Estimated trip length {estimate_km:.1} km, vehicle range {range_km:.1} km");

        Ok(if estimate_km > range_km {
            FuelAssessment::OutOfRange {
                range_km,
                estimate_km,
            }
        } else {
            FuelAssessment::WithinRange {
                range_km,
                estimate_km,
            }
        })
    }

    /// Raises the fuel alert when the trip exceeds the vehicle range and
    /// inserts the station nearest to the first stop right after it.
    ///
    /// Malformed fuel parameters are logged and leave the stops unchanged.
    pub fn evaluate(&self, stops: Vec<Stop>, params: Option<&FuelParams>) -> FuelDecision {
        let assessment = match self.assess(&stops, params) {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!("Ignoring fuel parameters: {e}");
                return FuelDecision::unchanged(stops);
            }
        };
        if !assessment.needs_refuel() {
            return FuelDecision::unchanged(stops);
        }

        let origin = stops.first().and_then(|stop| stop.resolve(self.resolver));
        let nearest = self
            .stations
            .zip(origin)
            .and_then(|(stations, origin)| stations.nearest(origin));

        let Some((name, coordinate)) = nearest else {
            warn!("Fuel range exceeded but no refuel station can be suggested");
            return FuelDecision {
                stops,
                alert: true,
                inserted: None,
            };
        };

        warn!("Fuel range exceeded, routing via {name}");
        let mut stops = stops;
        stops.insert(
            1,
            Stop::Point(StopPoint {
                lat: coordinate.lat,
                lon: coordinate.lon,
                name: Some(name.to_string()),
            }),
        );
        FuelDecision {
            stops,
            alert: true,
            inserted: Some(name.to_string()),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_field(field: &'static str, value: &str) -> Result<f64, FuelInputError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| FuelInputError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
