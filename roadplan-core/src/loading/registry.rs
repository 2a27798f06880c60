use std::collections::BTreeMap;
use std::path::Path;

use log::info;

use super::de::read_json_file;
use crate::fuel::StationRegistry;
use crate::{Coordinate, Error, Gazetteer};

/// Loads named places (`{"name": {"lat": .., "lon": ..}}`) used to resolve
/// named stops
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if a place has
/// a non-finite coordinate.
pub fn load_gazetteer(path: &Path) -> Result<Gazetteer, Error> {
    let places = read_places(path)?;
    info!("Loaded {} named places from {}", places.len(), path.display());
    Ok(places.into_iter().collect())
}

/// Loads refuel stations in the same format as [`load_gazetteer`]
///
/// # Errors
///
/// See [`load_gazetteer`].
pub fn load_stations(path: &Path) -> Result<StationRegistry, Error> {
    let stations = read_places(path)?;
    info!("Loaded {} refuel stations from {}", stations.len(), path.display());
    Ok(stations.into_iter().collect())
}

fn read_places(path: &Path) -> Result<BTreeMap<String, Coordinate>, Error> {
    let places: BTreeMap<String, Coordinate> = read_json_file(path)?;
    if let Some((name, _)) = places.iter().find(|(_, c)| !c.is_finite()) {
        return Err(Error::InvalidData(format!(
            "Place '{name}' in {} has a non-finite coordinate",
            path.display()
        )));
    }
    Ok(places)
}
