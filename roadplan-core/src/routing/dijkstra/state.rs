use std::cmp::Ordering;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{Minutes, NodeId};

#[derive(Copy, Clone, Debug)]
pub(super) struct State {
    pub(super) cost: f64,
    pub(super) node_id: NodeId,
    pub(super) node: NodeIndex,
}

// Min-heap by cost, ties popped by smaller node id
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Best known way of reaching a node
#[derive(Copy, Clone, Debug)]
pub(super) struct Label {
    pub(super) cost: f64,
    pub(super) distance_km: f64,
    /// Unwrapped clock on arrival
    pub(super) clock: Minutes,
    pub(super) predecessor: Option<(NodeIndex, EdgeIndex)>,
}

impl Label {
    pub(super) fn origin(clock: Minutes) -> Self {
        Self {
            cost: 0.0,
            distance_km: 0.0,
            clock,
            predecessor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    fn state(cost: f64, node_id: NodeId) -> State {
        State {
            cost,
            node_id,
            node: NodeIndex::new(0),
        }
    }

    #[test]
    fn heap_pops_cheapest_then_smallest_id() {
        let mut heap = BinaryHeap::new();
        heap.push(state(2.0, 1));
        heap.push(state(1.0, 9));
        heap.push(state(1.0, 4));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|s| s.node_id)
            .collect();
        assert_eq!(order, vec![4, 9, 1]);
    }
}
