//! Single-pair shortest path search over the road network.
//!
//! Edge costs depend on the clock at which an edge is entered, so each label
//! carries its own arrival clock and relaxation reads it before pricing the
//! next edge.

mod search;
mod state;


pub use search::{PathSearch, SearchQuery};
