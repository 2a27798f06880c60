//! Edge traversal costs for a travel mode at a given time of day

use std::fmt;

use hashbrown::HashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{ModeProfile, RoadEdge, TrafficSchedule};
use crate::{Minutes, NodeId};

/// Optimisation objective of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Physical length, unaffected by traffic
    Dist,
    /// Traffic-adjusted travel time
    Time,
}

impl Metric {
    /// Exactly `"dijkstra"` asks for the shortest route, any other algorithm
    /// name for the fastest one.
    pub fn for_algorithm(algorithm: &str) -> Self {
        if algorithm == "dijkstra" {
            Self::Dist
        } else {
            Self::Time
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dist => "dist",
            Self::Time => "time",
        })
    }
}

/// Directed edges whose cost is inflated during a single search, used to
/// push the search off a previously returned path.
#[derive(Debug, Clone)]
pub struct PenaltyOverlay {
    edges: HashSet<(NodeId, NodeId)>,
    factor: f64,
}

impl Default for PenaltyOverlay {
    fn default() -> Self {
        Self::empty()
    }
}

impl PenaltyOverlay {
    pub fn empty() -> Self {
        Self {
            edges: HashSet::new(),
            factor: 1.0,
        }
    }

    pub fn new(factor: f64, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
            factor,
        }
    }

    /// Penalises every consecutive node pair of `path`
    pub fn from_path(path: &[NodeId], factor: f64) -> Self {
        Self::new(factor, path.iter().copied().tuple_windows())
    }

    pub fn contains(&self, from: NodeId, to: NodeId) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn multiplier(&self, from: NodeId, to: NodeId) -> f64 {
        if self.contains(from, to) {
            self.factor
        } else {
            1.0
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Result of relaxing one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStep {
    /// Search cost, penalty included
    pub cost: f64,
    /// Traffic-adjusted traversal time
    pub minutes: Minutes,
    pub length_km: f64,
}

/// Converts edges into costs for one travel mode under one traffic schedule.
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    profile: &'a ModeProfile,
    schedule: &'a TrafficSchedule,
    speed_floor: f64,
}

impl<'a> CostModel<'a> {
    pub fn new(profile: &'a ModeProfile, schedule: &'a TrafficSchedule, speed_floor: f64) -> Self {
        Self {
            profile,
            schedule,
            speed_floor,
        }
    }

    pub fn profile(&self) -> &'a ModeProfile {
        self.profile
    }

    pub fn is_forbidden(&self, edge: &RoadEdge) -> bool {
        self.profile.is_forbidden(&edge.highway)
    }

    /// Minutes needed to traverse `edge` when entering it at `clock`,
    /// `None` if the mode may not use it.
    ///
    /// Congestion slows the mode down by
    /// `1 - traffic_impact * (1 - congestion)`, floored at `speed_floor`.
    pub fn travel_minutes(&self, edge: &RoadEdge, clock: Minutes) -> Option<Minutes> {
        let speed = self.profile.speed_for(&edge.highway)?;
        let free_flow = edge.length_km() / speed * 60.0;
        let congestion = self.schedule.congestion_at(clock);
        let multiplier =
            (1.0 - self.profile.traffic_impact * (1.0 - congestion)).max(self.speed_floor);
        Some(free_flow / multiplier)
    }

    /// Cost of `edge` for `metric` without any penalty, `None` if forbidden.
    /// The distance metric ignores traffic but not the mode's restrictions.
    pub fn edge_cost(&self, edge: &RoadEdge, clock: Minutes, metric: Metric) -> Option<f64> {
        let minutes = self.travel_minutes(edge, clock)?;
        Some(match metric {
            Metric::Time => minutes,
            Metric::Dist => edge.length_km(),
        })
    }

    /// Full relaxation step for the edge `from -> to`
    pub fn step(
        &self,
        from: NodeId,
        to: NodeId,
        edge: &RoadEdge,
        clock: Minutes,
        metric: Metric,
        penalty: &PenaltyOverlay,
    ) -> Option<EdgeStep> {
        let minutes = self.travel_minutes(edge, clock)?;
        let length_km = edge.length_km();
        let base = match metric {
            Metric::Time => minutes,
            Metric::Dist => length_km,
        };
        Some(EdgeStep {
            cost: base * penalty.multiplier(from, to),
            minutes,
            length_km,
        })
    }
}
