pub use crate::{Error, MINUTES_PER_DAY, Minutes, NodeId};

// Configuration and network
pub use crate::config::{EngineConfig, PlannerConfig};
pub use crate::loading::{load_gazetteer, load_network, load_stations};
pub use crate::model::{
    Coordinate, Gazetteer, HighwayClass, ModeProfile, ModeRegistry, Network, NetworkBuilder,
    NodeLocator, Stop, StopPoint, StopResolver, TrafficBand, TrafficSchedule,
};

// Routing core
pub use crate::routing::{
    CostModel, Metric, PathSearch, PenaltyOverlay, RouteAlternatives, SearchQuery, SearchResult,
    Segment,
};

// Fuel and trip planning
pub use crate::fuel::{
    FuelAssessment, FuelCheck, FuelDecision, FuelInputError, FuelParams, StationRegistry,
};
pub use crate::trip::{
    LegSummary, OrderedStop, PlanError, PlanOptions, RouteEntry, RouteLabel, TripPlanner,
    TripRequest, TripResult,
};
