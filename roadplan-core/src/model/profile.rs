//! Per travel-mode speed tables and traffic sensitivity

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::streets::HighwayClass;
use crate::Error;

/// How one travel mode moves through the network.
///
/// A highway class is not traversable when it is listed in `forbidden` or
/// its speed is zero. Classes missing from `speeds` fall back to
/// `default_speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeProfile {
    /// Free-flow speed in km/h per highway class
    pub speeds: BTreeMap<String, f64>,
    /// Highway classes this mode may never use
    pub forbidden: BTreeSet<String>,
    /// Share of ambient congestion felt by this mode, in `[0, 1]`
    pub traffic_impact: f64,
    /// Speed in km/h for classes absent from `speeds`
    pub default_speed: f64,
}

impl Default for ModeProfile {
    fn default() -> Self {
        Self {
            speeds: BTreeMap::new(),
            forbidden: BTreeSet::new(),
            traffic_impact: 1.0,
            default_speed: 30.0,
        }
    }
}

impl ModeProfile {
    pub fn car() -> Self {
        Self {
            speeds: speed_table(&[
                ("motorway", 100.0),
                ("trunk", 80.0),
                ("primary", 60.0),
                ("secondary", 45.0),
                ("tertiary", 35.0),
                ("residential", 30.0),
            ]),
            ..Self::default()
        }
    }

    /// Bicycles are kept off motorways and feel only part of car congestion.
    pub fn bike() -> Self {
        Self {
            speeds: speed_table(&[
                ("motorway", 0.0),
                ("trunk", 60.0),
                ("primary", 50.0),
                ("secondary", 40.0),
                ("tertiary", 35.0),
                ("residential", 30.0),
            ]),
            forbidden: ["motorway", "motorway_link"]
                .into_iter()
                .map(String::from)
                .collect(),
            traffic_impact: 0.3,
            ..Self::default()
        }
    }

    /// Free-flow speed for a class, `None` when the class is not traversable
    pub fn speed_for(&self, class: &HighwayClass) -> Option<f64> {
        if self.forbidden.contains(class.as_str()) {
            return None;
        }
        let speed = self
            .speeds
            .get(class.as_str())
            .copied()
            .unwrap_or(self.default_speed);
        (speed > 0.0).then_some(speed)
    }

    pub fn is_forbidden(&self, class: &HighwayClass) -> bool {
        self.speed_for(class).is_none()
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidProfile`] for negative or non-finite speeds and
    /// for a traffic impact outside `[0, 1]`.
    pub fn validate(&self, mode: &str) -> Result<(), Error> {
        let invalid = |reason: String| Error::InvalidProfile {
            mode: mode.to_string(),
            reason,
        };

        if !(0.0..=1.0).contains(&self.traffic_impact) {
            return Err(invalid(format!(
                "traffic_impact {} is outside [0, 1]",
                self.traffic_impact
            )));
        }
        if !self.default_speed.is_finite() || self.default_speed < 0.0 {
            return Err(invalid(format!(
                "default_speed {} must be a non-negative number",
                self.default_speed
            )));
        }
        if let Some((class, speed)) = self
            .speeds
            .iter()
            .find(|(_, speed)| !speed.is_finite() || **speed < 0.0)
        {
            return Err(invalid(format!(
                "speed {speed} for '{class}' must be a non-negative number"
            )));
        }
        Ok(())
    }
}

fn speed_table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|&(class, speed)| (class.to_string(), speed))
        .collect()
}

/// Named travel-mode profiles (`car`, `bike`, ...).
///
/// Deserialized profiles are merged over the built-in ones: a named entry
/// replaces the built-in profile of that name and the others stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ModeProfile>",
    into = "BTreeMap<String, ModeProfile>"
)]
pub struct ModeRegistry(BTreeMap<String, ModeProfile>);

impl From<BTreeMap<String, ModeProfile>> for ModeRegistry {
    fn from(profiles: BTreeMap<String, ModeProfile>) -> Self {
        let mut registry = Self::default();
        registry.0.extend(profiles);
        registry
    }
}

impl From<ModeRegistry> for BTreeMap<String, ModeProfile> {
    fn from(registry: ModeRegistry) -> Self {
        registry.0
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.insert("car", ModeProfile::car());
        registry.insert("bike", ModeProfile::bike());
        registry
    }
}

impl ModeRegistry {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, mode: impl Into<String>, profile: ModeProfile) {
        self.0.insert(mode.into(), profile);
    }

    pub fn get(&self, mode: &str) -> Option<&ModeProfile> {
        self.0.get(mode)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// # Errors
    ///
    /// Fails if the registry is empty or any profile is invalid.
    pub fn validate(&self) -> Result<(), Error> {
        if self.0.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one travel mode must be configured".to_string(),
            ));
        }
        self.0
            .iter()
            .try_for_each(|(mode, profile)| profile.validate(mode))
    }
}
