//! Road network components - nodes, edges and coordinates

use std::fmt;

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Point in `geo` axis order (x = longitude, y = latitude)
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance in kilometres
    pub fn haversine_km(self, other: Self) -> f64 {
        Haversine.distance(self.to_point(), other.to_point()) / 1000.0
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

/// OSM highway class of a road segment (`primary`, `residential`, ...)
///
/// The taxonomy is open-ended, any tag value is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighwayClass(String);

impl HighwayClass {
    pub const UNCLASSIFIED: &'static str = "unclassified";

    pub fn new(class: impl Into<String>) -> Self {
        Self(class.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HighwayClass {
    fn default() -> Self {
        Self::new(Self::UNCLASSIFIED)
    }
}

impl From<&str> for HighwayClass {
    fn from(class: &str) -> Self {
        Self::new(class)
    }
}

impl fmt::Display for HighwayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// OSM ID of the node
    pub id: NodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

impl RoadNode {
    pub fn coordinate(&self) -> Coordinate {
        self.geometry.into()
    }
}

/// Road graph edge (directed street segment)
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEdge {
    /// Physical length in meters
    pub length: f64,
    /// Highway class of the segment
    pub highway: HighwayClass,
}

impl RoadEdge {
    pub fn length_km(&self) -> f64 {
        self.length / 1000.0
    }
}
