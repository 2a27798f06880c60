//! Paths returned by the search

use serde::Serialize;

use crate::model::HighwayClass;
use crate::routing::Metric;
use crate::{Minutes, NodeId};

/// One traversed edge with its timing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: NodeId,
    pub to: NodeId,
    pub highway: HighwayClass,
    pub length_m: f64,
    /// Traffic-adjusted traversal time
    pub minutes: Minutes,
    /// Clock when entering the edge, wrapped into the day
    pub depart_clock: Minutes,
    /// Clock when leaving the edge, wrapped into the day
    pub arrival_clock: Minutes,
    pub cumulative_km: f64,
    pub cumulative_minutes: Minutes,
}

/// A simple path from start to end with its physical totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Visited node ids, start and end included
    pub path: Vec<NodeId>,
    pub segments: Vec<Segment>,
    pub distance_km: f64,
    /// Sum of segment times, never penalised
    pub minutes: Minutes,
    /// Arrival clock wrapped into the day
    pub arrival_clock: Minutes,
    pub metric: Metric,
    /// Search objective value, including any penalty
    pub cost: f64,
}

impl SearchResult {
    pub fn start(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    /// Consecutive `(from, to)` node pairs along the path
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.segments.iter().map(|segment| (segment.from, segment.to))
    }

    /// Start and end coincide
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }
}
