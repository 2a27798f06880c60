use serde::Serialize;

use crate::model::{Stop, StopResolver};
use crate::routing::{SearchResult, Segment};
use crate::{Minutes, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteLabel {
    Primary,
    Alternative,
}

/// One of the routes offered for a two-stop trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    #[serde(rename = "type")]
    pub label: RouteLabel,
    pub simple_path: Vec<NodeId>,
    pub segments: Vec<Segment>,
    /// Whole minutes
    pub time: u32,
    /// Kilometres, one decimal
    pub dist: f64,
    pub arrival_clock: Minutes,
}

impl RouteEntry {
    pub(crate) fn new(label: RouteLabel, result: SearchResult) -> Self {
        Self {
            label,
            time: whole_minutes(result.minutes),
            dist: round_km(result.distance_km),
            arrival_clock: result.arrival_clock,
            simple_path: result.path,
            segments: result.segments,
        }
    }
}

/// A stop of a multi-stop trip with its display position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedStop {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl OrderedStop {
    pub(crate) fn from_stop<R: StopResolver + ?Sized>(stop: &Stop, resolver: &R) -> Self {
        let coordinate = stop.resolve(resolver);
        Self {
            name: stop.name().map(str::to_string),
            lat: coordinate.map(|c| c.lat),
            lon: coordinate.map(|c| c.lon),
        }
    }
}

/// What happened to one leg of a multi-stop trip.
///
/// Stop indices refer to `ordered_stops`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LegSummary {
    Routed {
        from_stop: usize,
        to_stop: usize,
        depart_clock: Minutes,
        arrival_clock: Minutes,
        time: u32,
        dist: f64,
    },
    Skipped {
        from_stop: usize,
        to_stop: usize,
        reason: String,
    },
}

impl LegSummary {
    pub fn is_routed(&self) -> bool {
        matches!(self, Self::Routed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TripResult {
    /// Two-stop trip: primary route and possibly an alternative
    Alternatives {
        routes: Vec<RouteEntry>,
        fuel_alert: bool,
        fuel_stop: Option<String>,
    },
    /// Three or more stops routed leg by leg
    Multistop {
        segments: Vec<Segment>,
        ordered_stops: Vec<OrderedStop>,
        legs: Vec<LegSummary>,
        time: u32,
        dist: f64,
        fuel_alert: bool,
        fuel_stop: Option<String>,
    },
}

impl TripResult {
    pub fn fuel_alert(&self) -> bool {
        match self {
            Self::Alternatives { fuel_alert, .. } | Self::Multistop { fuel_alert, .. } => {
                *fuel_alert
            }
        }
    }

    pub fn fuel_stop(&self) -> Option<&str> {
        match self {
            Self::Alternatives { fuel_stop, .. } | Self::Multistop { fuel_stop, .. } => {
                fuel_stop.as_deref()
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn whole_minutes(minutes: Minutes) -> u32 {
    minutes.round().max(0.0) as u32
}

pub(crate) fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
