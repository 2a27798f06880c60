use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::result::{OrderedStop, RouteEntry, TripResult};
use crate::routing::Segment;
use crate::{Error, NodeId, model::Network};

impl TripResult {
    /// Converts the trip to a `GeoJSON` `FeatureCollection`.
    ///
    /// Two-stop trips produce one line per route, multi-stop trips one line
    /// per segment plus a point per resolved stop.
    pub fn to_geojson(&self, network: &Network) -> Result<FeatureCollection, Error> {
        let mut features = Vec::new();

        match self {
            Self::Alternatives { routes, .. } => {
                for route in routes {
                    features.push(route_feature(network, route)?);
                }
            }
            Self::Multistop {
                segments,
                ordered_stops,
                ..
            } => {
                for (idx, segment) in segments.iter().enumerate() {
                    features.push(segment_feature(network, idx, segment)?);
                }
                for (idx, stop) in ordered_stops.iter().enumerate() {
                    if let Some(feature) = stop_feature(idx, stop)? {
                        features.push(feature);
                    }
                }
            }
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, network: &Network) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(network)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn node_coord(network: &Network, id: NodeId) -> Result<Coord<f64>, Error> {
    network
        .coordinate(id)
        .map(|coordinate| coordinate.to_point().0)
        .ok_or_else(|| Error::GeoJsonError(format!("Node {id} is not part of the network")))
}

fn path_geometry(network: &Network, path: &[NodeId]) -> Result<Geometry, Error> {
    let coords = path
        .iter()
        .map(|&id| node_coord(network, id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Geometry::new(GeoJsonValue::from(&LineString::new(coords))))
}

fn route_feature(network: &Network, route: &RouteEntry) -> Result<Feature, Error> {
    let geometry = path_geometry(network, &route.simple_path)?;
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "type": route.label,
            "time": route.time,
            "dist": route.dist,
            "arrival_clock": route.arrival_clock,
            "nodes": route.simple_path.len(),
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn segment_feature(network: &Network, idx: usize, segment: &Segment) -> Result<Feature, Error> {
    let geometry = path_geometry(network, &[segment.from, segment.to])?;
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "segment_index": idx,
            "from": segment.from,
            "to": segment.to,
            "highway": segment.highway,
            "length_m": segment.length_m,
            "minutes": segment.minutes,
            "depart_clock": segment.depart_clock,
            "arrival_clock": segment.arrival_clock,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Stops without a known position are left out
fn stop_feature(idx: usize, stop: &OrderedStop) -> Result<Option<Feature>, Error> {
    let (Some(lat), Some(lon)) = (stop.lat, stop.lon) else {
        return Ok(None);
    };
    let geometry = Geometry::new(GeoJsonValue::from(&geo::Point::new(lon, lat)));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "stop_index": idx,
            "name": stop.name,
        }
    });

    Feature::from_json_value(value)
        .map(Some)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::config::EngineConfig;
    use crate::model::Stop;
    use crate::test_support::{diamond, places};
    use crate::trip::{TripPlanner, TripRequest};

    #[test]
    fn alternatives_as_lines() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);
        let request =
            TripRequest::new(vec![Stop::named("Home"), Stop::named("Office")], "car", "03:00");

        let collection = planner.plan(&request).unwrap().to_geojson(&network).unwrap();
        assert_eq!(collection.features.len(), 2);

        let value = serde_json::to_value(&collection).unwrap();
        let first = &value["features"][0];
        assert_eq!(first["properties"]["type"], "Primary");
        assert_eq!(first["geometry"]["type"], "LineString");

        let coordinates = first["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coordinates.len(), 3);
        // lon first
        assert!((coordinates[0][0].as_f64().unwrap() - 73.00).abs() < 1e-9);
        assert!((coordinates[0][1].as_f64().unwrap() - 33.70).abs() < 1e-9);
    }

    #[test]
    fn multistop_segments_and_stops() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);
        let request = TripRequest::new(
            vec![
                Stop::named("Home"),
                Stop::named("Atlantis"),
                Stop::named("Market"),
                Stop::named("Office"),
            ],
            "car",
            "03:00",
        );

        let json = planner
            .plan(&request)
            .unwrap()
            .to_geojson_string(&network)
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let features = value["features"].as_array().unwrap();

        // Market -> Office is one segment, Atlantis has no position
        assert_eq!(features.len(), 1 + 3);
        assert_eq!(features[0]["properties"]["highway"], "primary");
        assert_eq!(features[1]["geometry"]["type"], "Point");
        assert_eq!(features[1]["properties"]["name"], "Home");
        assert_eq!(features[2]["properties"]["stop_index"], 2);
    }
}
