//! Engine configuration, supplied once at startup

use serde::{Deserialize, Serialize};

use crate::{Error, Minutes, ModeRegistry, TrafficSchedule};

/// Tunables of the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Stop-over added at every intermediate stop of a multi-stop trip.
    pub dwell_minutes: Minutes,

    /// Cost multiplier for edges of a previously returned path.
    /// Must be greater than one.
    pub penalty_factor: f64,

    /// Lower bound of the congestion speed multiplier.
    pub speed_floor: f64,

    /// Ratio between road distance and straight-line distance used by the
    /// fuel range estimate.
    pub road_factor: f64,

    /// Edge length in meters assumed when the map does not provide one.
    pub default_length_m: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            dwell_minutes: 5.0,
            penalty_factor: 3.0,
            speed_floor: 0.05,
            road_factor: 1.3,
            default_length_m: 50.0,
        }
    }
}

impl PlannerConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for values outside their ranges.
    pub fn validate(&self) -> Result<(), Error> {
        let check = |ok: bool, message: String| {
            if ok {
                Ok(())
            } else {
                Err(Error::InvalidConfig(message))
            }
        };

        check(
            self.dwell_minutes.is_finite() && self.dwell_minutes >= 0.0,
            format!("dwell_minutes {} must be non-negative", self.dwell_minutes),
        )?;
        check(
            self.penalty_factor.is_finite() && self.penalty_factor > 1.0,
            format!("penalty_factor {} must exceed 1", self.penalty_factor),
        )?;
        check(
            self.speed_floor > 0.0 && self.speed_floor <= 1.0,
            format!("speed_floor {} must be in (0, 1]", self.speed_floor),
        )?;
        check(
            self.road_factor.is_finite() && self.road_factor >= 1.0,
            format!("road_factor {} must be at least 1", self.road_factor),
        )?;
        check(
            self.default_length_m.is_finite() && self.default_length_m >= 0.0,
            format!(
                "default_length_m {} must be non-negative",
                self.default_length_m
            ),
        )
    }
}

/// Everything the engine needs besides the network itself.
///
/// Deserializes from TOML/JSON; every section is optional and falls back to
/// the built-in defaults.
///
/// ```toml
/// [planner]
/// dwell_minutes = 5
///
/// [[traffic]]
/// start_hour = 0
/// end_hour = 24
/// factor = 1.0
///
/// [modes.car]
/// speeds = { primary = 60, residential = 30 }
/// traffic_impact = 1.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub planner: PlannerConfig,
    pub traffic: TrafficSchedule,
    pub modes: ModeRegistry,
}

impl EngineConfig {
    /// Checks every section. The traffic schedule is validated on
    /// construction already.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found.
    pub fn validate(&self) -> Result<(), Error> {
        self.planner.validate()?;
        self.modes.validate()
    }
}
