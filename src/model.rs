use std::fs;
use std::path::Path;

use roadplan_core::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::info;

use crate::{Cli, CliError};

/// Everything a planning call needs, loaded once per process
#[derive(Debug)]
pub struct Engine {
    pub config: EngineConfig,
    pub network: Network,
    pub places: Gazetteer,
    pub stations: Option<StationRegistry>,
}

impl Engine {
    /// Loads configuration, network and registries named on the command line.
    ///
    /// # Errors
    ///
    /// Any unreadable or invalid input is fatal.
    pub fn load(cli: &Cli) -> Result<Self, CliError> {
        let config = load_config(cli.config.as_deref())?;
        let network = load_network(&cli.network, &config.planner)?;
        let places = cli
            .places
            .as_deref()
            .map(load_gazetteer)
            .transpose()?
            .unwrap_or_default();
        let stations = cli.stations.as_deref().map(load_stations).transpose()?;

        info!(
            nodes = network.node_count(),
            edges = network.edge_count(),
            places = places.len(),
            stations = stations.as_ref().map_or(0, StationRegistry::len),
            "Engine loaded"
        );

        Ok(Self {
            config,
            network,
            places,
            stations,
        })
    }

    pub fn planner(&self) -> TripPlanner<'_, Gazetteer> {
        TripPlanner::new(
            &self.network,
            &self.config,
            &self.places,
            self.stations.as_ref(),
        )
    }

    /// Counts reported by `check`
    pub fn summary(&self) -> Value {
        json!({
            "nodes": self.network.node_count(),
            "edges": self.network.edge_count(),
            "modes": self.config.modes.names().collect::<Vec<_>>(),
            "traffic_bands": self.config.traffic.bands().len(),
            "places": self.places.len(),
            "stations": self.stations.as_ref().map_or(0, StationRegistry::len),
        })
    }
}

/// Reads and validates the TOML engine configuration, defaults without a path.
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid TOML for
/// [`EngineConfig`] or does not pass validation.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let Some(path) = path else {
        info!("No configuration file given, using defaults");
        return Ok(EngineConfig::default());
    };

    let text = read_to_string(path)?;
    let config: EngineConfig = toml::from_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

pub(crate) fn read_to_string(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn config_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[planner]
dwell_minutes = 10
penalty_factor = 2.5

[[traffic]]
start_hour = 0
end_hour = 24
factor = 1.0

[modes.truck]
traffic_impact = 1.0
default_speed = 40
forbidden = ["residential"]

[modes.truck.speeds]
motorway = 80
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert!((config.planner.dwell_minutes - 10.0).abs() < f64::EPSILON);
        assert!((config.planner.road_factor - 1.3).abs() < f64::EPSILON);
        assert_eq!(config.traffic.bands().len(), 1);
        assert_eq!(
            config.modes.names().collect::<Vec<_>>(),
            vec!["bike", "car", "truck"]
        );
        assert_eq!(config.modes.get("bike"), Some(&ModeProfile::bike()));
        let truck = config.modes.get("truck").unwrap();
        assert!(truck.is_forbidden(&HighwayClass::from("residential")));
        assert_eq!(truck.speed_for(&HighwayClass::from("motorway")), Some(80.0));
    }

    #[test]
    fn schedule_gap_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[traffic]]
start_hour = 0
end_hour = 12
factor = 1.0
"#
        )
        .unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }), "got {err}");
    }

    #[test]
    fn missing_file() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
