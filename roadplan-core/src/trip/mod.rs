//! Trip assembly: fuel check, per-leg searches and result shaping

mod error;
mod planner;
mod request;
mod result;
mod to_geojson;

pub use error::PlanError;
pub use planner::{PlanOptions, TripPlanner};
pub use request::TripRequest;
pub use result::{LegSummary, OrderedStop, RouteEntry, RouteLabel, TripResult};
