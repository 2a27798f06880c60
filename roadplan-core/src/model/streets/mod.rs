//! Road network model

pub mod components;
pub mod network;

pub use components::{Coordinate, HighwayClass, RoadEdge, RoadNode};
pub use network::{IndexedPoint, Network, NetworkBuilder, NodeLocator};
