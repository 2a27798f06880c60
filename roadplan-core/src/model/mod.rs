//! Data model for road routing
//!
//! Contains the road network, per-mode travel profiles, the daily traffic
//! schedule and the stops a trip is made of. Everything here is immutable
//! once constructed.

pub mod profile;
pub mod stop;
pub mod streets;
pub mod traffic;

pub use profile::{ModeProfile, ModeRegistry};
pub use stop::{Gazetteer, Stop, StopPoint, StopResolver};
pub use streets::{
    Coordinate, HighwayClass, Network, NetworkBuilder, NodeLocator, RoadEdge, RoadNode,
};
pub use traffic::{TrafficBand, TrafficSchedule};
