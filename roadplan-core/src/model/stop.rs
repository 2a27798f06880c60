//! Trip stops and name resolution

use hashbrown::HashMap;

use serde::{Deserialize, Serialize};

use super::streets::Coordinate;

/// Resolves a stop name to a coordinate.
pub trait StopResolver {
    fn resolve_name(&self, name: &str) -> Option<Coordinate>;
}

/// Inline stop position with an optional display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl StopPoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// A stop is either a name to be resolved or an inline coordinate.
///
/// Deserializes from a bare JSON string or from `{"lat", "lon", "name"?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stop {
    Named(String),
    Point(StopPoint),
}

impl Stop {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn point(lat: f64, lon: f64) -> Self {
        Self::Point(StopPoint {
            lat,
            lon,
            name: None,
        })
    }

    /// Coordinate of the stop, inline points pass through unchanged
    pub fn resolve<R: StopResolver + ?Sized>(&self, resolver: &R) -> Option<Coordinate> {
        match self {
            Self::Named(name) => resolver.resolve_name(name),
            Self::Point(point) => Some(point.coordinate()).filter(|c| c.is_finite()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Point(point) => point.name.as_deref(),
        }
    }

    /// Human readable description for logs and error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::Point(StopPoint {
                name: Some(name), ..
            }) => name.clone(),
            Self::Point(point) => format!("({:.5}, {:.5})", point.lat, point.lon),
        }
    }
}

/// Named places with known coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gazetteer {
    places: HashMap<String, Coordinate>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, coordinate: Coordinate) {
        self.places.insert(name.into(), coordinate);
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl StopResolver for Gazetteer {
    fn resolve_name(&self, name: &str) -> Option<Coordinate> {
        self.places
            .get(name)
            .or_else(|| self.places.get(name.trim()))
            .copied()
    }
}

impl<S: Into<String>> FromIterator<(S, Coordinate)> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = (S, Coordinate)>>(iter: I) -> Self {
        Self {
            places: iter
                .into_iter()
                .map(|(name, coordinate)| (name.into(), coordinate))
                .collect(),
        }
    }
}
