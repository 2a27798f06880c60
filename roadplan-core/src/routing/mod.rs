//! Road routing: edge costs, shortest path search and alternative routes

pub mod alternatives;
pub mod cost;
pub mod dijkstra;
pub mod path;

pub use alternatives::RouteAlternatives;
pub use cost::{CostModel, EdgeStep, Metric, PenaltyOverlay};
pub use dijkstra::{PathSearch, SearchQuery};
pub use path::{SearchResult, Segment};
