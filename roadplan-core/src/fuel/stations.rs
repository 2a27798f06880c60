use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// Refuel stations by name.
///
/// Ordered by name so that equally distant stations resolve the same way on
/// every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationRegistry {
    stations: BTreeMap<String, Coordinate>,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, coordinate: Coordinate) {
        self.stations.insert(name.into(), coordinate);
    }

    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.stations.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Station with the smallest great-circle distance to `from`
    pub fn nearest(&self, from: Coordinate) -> Option<(&str, Coordinate)> {
        self.stations
            .iter()
            .map(|(name, coordinate)| (name.as_str(), *coordinate))
            .min_by(|(_, a), (_, b)| from.haversine_km(*a).total_cmp(&from.haversine_km(*b)))
    }
}

impl<S: Into<String>> FromIterator<(S, Coordinate)> for StationRegistry {
    fn from_iter<I: IntoIterator<Item = (S, Coordinate)>>(iter: I) -> Self {
        Self {
            stations: iter
                .into_iter()
                .map(|(name, coordinate)| (name.into(), coordinate))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_station() {
        let registry: StationRegistry = [
            ("Far", Coordinate::new(34.0, 73.0)),
            ("Near", Coordinate::new(33.71, 73.0)),
        ]
        .into_iter()
        .collect();

        let (name, coordinate) = registry.nearest(Coordinate::new(33.70, 73.0)).unwrap();
        assert_eq!(name, "Near");
        assert_eq!(coordinate, Coordinate::new(33.71, 73.0));
    }

    #[test]
    fn equidistant_stations_resolve_by_name() {
        let registry: StationRegistry = [
            ("Bravo", Coordinate::new(0.5, 0.0)),
            ("Alpha", Coordinate::new(-0.5, 0.0)),
        ]
        .into_iter()
        .collect();

        let (name, _) = registry.nearest(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(name, "Alpha");
    }

    #[test]
    fn empty_registry() {
        assert!(StationRegistry::new().nearest(Coordinate::new(0.0, 0.0)).is_none());
    }
}
