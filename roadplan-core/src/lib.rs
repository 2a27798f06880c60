//! Time-dependent, mode-aware routing over a city road network.
//!
//! The crate is organised leaves first:
//!
//! - [`model`] holds the immutable road network, travel-mode profiles,
//!   the traffic schedule and stop types
//! - [`routing`] turns edges into costs and runs the shortest path search,
//!   including penalised re-search for alternative routes
//! - [`fuel`] checks whether a trip fits into the remaining vehicle range
//! - [`trip`] chains single-leg searches into complete itineraries
//!
//! A [`Network`] is built once (see [`loading`]) and shared read-only by any
//! number of concurrent planning calls.

pub mod config;
pub mod error;
pub mod fuel;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod trip;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{EngineConfig, PlannerConfig};
pub use error::Error;
pub use model::{
    Coordinate, Gazetteer, HighwayClass, ModeProfile, ModeRegistry, Network, NetworkBuilder,
    NodeLocator, Stop, StopPoint, StopResolver, TrafficBand, TrafficSchedule,
};

/// Identifier of a road network node (OSM node id)
pub type NodeId = i64;

/// Fractional minutes, used both for durations and for clock values
pub type Minutes = f64;

/// Length of the daily clock cycle in minutes
pub const MINUTES_PER_DAY: Minutes = 1440.0;

/// Wraps any clock value into `[0, 1440)`
pub(crate) fn wrap_clock(clock: Minutes) -> Minutes {
    clock.rem_euclid(MINUTES_PER_DAY)
}
