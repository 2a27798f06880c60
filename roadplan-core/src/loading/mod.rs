//! This module is responsible for loading the road network and the named
//! place registries from JSON exports and turning them into validated,
//! immutable values.

mod builder;
pub(crate) mod de;
mod raw_types;
mod registry;

pub use builder::{build_network, load_network};
pub use raw_types::{RawEdge, RawNetwork, RawNode};
pub use registry::{load_gazetteer, load_stations};
