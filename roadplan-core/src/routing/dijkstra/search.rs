use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::{debug, trace};
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::{Label, State};
use crate::model::Network;
use crate::routing::{CostModel, Metric, PenaltyOverlay, SearchResult, Segment};
use crate::{Minutes, NodeId, wrap_clock};

/// Endpoints, objective and departure clock of one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    pub start: NodeId,
    pub end: NodeId,
    pub metric: Metric,
    /// Departure clock in minutes after midnight
    pub start_clock: Minutes,
}

impl SearchQuery {
    pub fn new(start: NodeId, end: NodeId, metric: Metric, start_clock: Minutes) -> Self {
        Self {
            start,
            end,
            metric,
            start_clock,
        }
    }
}

/// Label-setting search bound to a network and a cost model
#[derive(Debug, Clone, Copy)]
pub struct PathSearch<'a> {
    network: &'a Network,
    costs: CostModel<'a>,
}

impl<'a> PathSearch<'a> {
    pub fn new(network: &'a Network, costs: CostModel<'a>) -> Self {
        Self { network, costs }
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    pub fn costs(&self) -> &CostModel<'a> {
        &self.costs
    }

    /// Cheapest path from `query.start` to `query.end`.
    ///
    /// Edges in `penalty` have their cost multiplied while the reported
    /// distance and travel time stay physical. Returns `None` when either
    /// endpoint is missing or the target is unreachable for this mode.
    pub fn search(&self, query: &SearchQuery, penalty: &PenaltyOverlay) -> Option<SearchResult> {
        let Some(start) = self.network.node_index(query.start) else {
            debug!("Start node {} is not part of the network", query.start);
            return None;
        };
        let Some(target) = self.network.node_index(query.end) else {
            debug!("End node {} is not part of the network", query.end);
            return None;
        };

        let node_count = self.network.node_count();
        let estimated_nodes = node_count.min(1000);
        let mut labels: HashMap<NodeIndex, Label> = HashMap::with_capacity(estimated_nodes);
        let mut settled = FixedBitSet::with_capacity(node_count);
        let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

        labels.insert(start, Label::origin(query.start_clock));
        heap.push(State {
            cost: 0.0,
            node_id: query.start,
            node: start,
        });

        while let Some(State { cost, node, .. }) = heap.pop() {
            if settled.contains(node.index()) {
                continue;
            }
            let Some(&label) = labels.get(&node) else {
                continue;
            };
            // Stale heap entry
            if cost > label.cost {
                continue;
            }
            settled.insert(node.index());

            if node == target {
                break;
            }

            let from_id = self.network.node(node).id;
            for edge in self.network.edges(node) {
                let next = edge.target();
                if settled.contains(next.index()) {
                    continue;
                }
                let to_id = self.network.node(next).id;
                let Some(step) = self.costs.step(
                    from_id,
                    to_id,
                    edge.weight(),
                    label.clock,
                    query.metric,
                    penalty,
                ) else {
                    continue;
                };

                let candidate = Label {
                    cost: cost + step.cost,
                    distance_km: label.distance_km + step.length_km,
                    clock: label.clock + step.minutes,
                    predecessor: Some((node, edge.id())),
                };

                match labels.entry(next) {
                    hashbrown::hash_map::Entry::Vacant(entry) => {
                        entry.insert(candidate);
                        heap.push(State {
                            cost: candidate.cost,
                            node_id: to_id,
                            node: next,
                        });
                    }
                    hashbrown::hash_map::Entry::Occupied(mut entry) => {
                        if self.improves(&candidate, entry.get(), from_id) {
                            *entry.get_mut() = candidate;
                            heap.push(State {
                                cost: candidate.cost,
                                node_id: to_id,
                                node: next,
                            });
                        }
                    }
                }
            }
        }

        if !settled.contains(target.index()) {
            debug!(
                "No {} path from {} to {} ({} nodes settled)",
                query.metric,
                query.start,
                query.end,
                settled.count_ones(..)
            );
            return None;
        }

        if let Some(label) = labels.get(&target) {
            trace!(
                "Reached {} after settling {} nodes: cost {:.3}, {:.3} km",
                query.end,
                settled.count_ones(..),
                label.cost,
                label.distance_km
            );
        }

        self.reconstruct(query, &labels, start, target)
    }

    /// Equal costs are resolved towards the smaller predecessor id so that
    /// repeated searches return the same path.
    fn improves(&self, candidate: &Label, current: &Label, via: NodeId) -> bool {
        match candidate.cost.total_cmp(&current.cost) {
            Ordering::Less => true,
            Ordering::Equal => current
                .predecessor
                .is_some_and(|(pred, _)| via < self.network.node(pred).id),
            Ordering::Greater => false,
        }
    }

    /// Walks predecessors back from `target` and replays the path forward
    /// to get physical per-segment times without penalties.
    fn reconstruct(
        &self,
        query: &SearchQuery,
        labels: &HashMap<NodeIndex, Label>,
        start: NodeIndex,
        target: NodeIndex,
    ) -> Option<SearchResult> {
        let mut hops = Vec::new();
        let mut current = target;
        while current != start {
            let (previous, edge) = labels.get(&current)?.predecessor?;
            hops.push(edge);
            current = previous;
            if hops.len() > self.network.node_count() {
                return None;
            }
        }
        hops.reverse();

        let graph = &self.network.graph;
        let mut path = Vec::with_capacity(hops.len() + 1);
        path.push(query.start);
        let mut segments = Vec::with_capacity(hops.len());
        let mut clock = query.start_clock;
        let mut distance_km = 0.0;
        let mut minutes = 0.0;

        for edge_index in hops {
            let (source, destination) = graph.edge_endpoints(edge_index)?;
            let edge = &graph[edge_index];
            let step_minutes = self.costs.travel_minutes(edge, clock)?;
            distance_km += edge.length_km();
            minutes += step_minutes;

            let to = graph[destination].id;
            segments.push(Segment {
                from: graph[source].id,
                to,
                highway: edge.highway.clone(),
                length_m: edge.length,
                minutes: step_minutes,
                depart_clock: wrap_clock(clock),
                arrival_clock: wrap_clock(clock + step_minutes),
                cumulative_km: distance_km,
                cumulative_minutes: minutes,
            });
            clock += step_minutes;
            path.push(to);
        }

        Some(SearchResult {
            path,
            segments,
            distance_km,
            minutes,
            arrival_clock: wrap_clock(clock),
            metric: query.metric,
            cost: labels.get(&target)?.cost,
        })
    }
}
