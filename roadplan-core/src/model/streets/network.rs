//! Immutable road network with spatial lookup

use geo::Point;
use hashbrown::HashMap;
use log::info;
use petgraph::graph::{DiGraph, Edges, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use rstar::{RTree, primitives::GeomWithData};

use super::components::{Coordinate, HighwayClass, RoadEdge, RoadNode};
use crate::{Error, NodeId};

/// Road node position stored in the R-tree
pub type IndexedPoint = GeomWithData<Point<f64>, NodeIndex>;

/// Maps a geographic point to the closest routable node.
pub trait NodeLocator {
    fn nearest_node(&self, at: Coordinate) -> Option<NodeId>;
}

/// Directed road graph.
///
/// Nodes carry their OSM id and coordinate, edges their length and highway
/// class. Parallel edges between the same pair of nodes are kept as-is.
/// There is no way to mutate a `Network` after [`NetworkBuilder::build`],
/// so it can be shared between threads without locking.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) graph: DiGraph<RoadNode, RoadEdge>,
    index: HashMap<NodeId, NodeIndex>,
    rtree: RTree<IndexedPoint>,
}

impl Network {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn coordinate(&self, id: NodeId) -> Option<Coordinate> {
        self.node_index(id).map(|idx| self.graph[idx].coordinate())
    }

    /// Outgoing edges of a node as `(target, edge)` pairs.
    /// Unknown nodes and dead ends both yield nothing.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &RoadEdge)> + '_ {
        self.node_index(id)
            .into_iter()
            .flat_map(move |idx| self.graph.edges(idx))
            .map(|edge| (self.graph[edge.target()].id, edge.weight()))
    }

    /// Whether at least one directed edge `from -> to` exists
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        match (self.node_index(from), self.node_index(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().map(|node| node.id)
    }

    pub(crate) fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &RoadNode {
        &self.graph[idx]
    }

    pub(crate) fn edges(&self, idx: NodeIndex) -> Edges<'_, RoadEdge, Directed> {
        self.graph.edges(idx)
    }
}

impl NodeLocator for Network {
    fn nearest_node(&self, at: Coordinate) -> Option<NodeId> {
        if !at.is_finite() {
            return None;
        }
        self.rtree
            .nearest_neighbor(&at.to_point())
            .map(|entry| self.graph[entry.data].id)
    }
}

/// Incremental construction of a [`Network`] that enforces the
/// "every edge endpoint has a coordinate" invariant.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    graph: DiGraph<RoadNode, RoadEdge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            index: HashMap::with_capacity(nodes),
        }
    }

    /// Registers a node.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate id or a non-finite coordinate.
    pub fn add_node(&mut self, id: NodeId, coordinate: Coordinate) -> Result<(), Error> {
        if !coordinate.is_finite() {
            return Err(Error::InvalidData(format!(
                "Node {id} has a non-finite coordinate"
            )));
        }
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNode(id));
        }
        let idx = self.graph.add_node(RoadNode {
            id,
            geometry: coordinate.to_point(),
        });
        self.index.insert(id, idx);
        Ok(())
    }

    /// Adds a directed edge between two registered nodes.
    ///
    /// # Errors
    ///
    /// Fails if either endpoint has no coordinate or the length is negative
    /// or not finite.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length: f64,
        highway: HighwayClass,
    ) -> Result<(), Error> {
        if !length.is_finite() || length < 0.0 {
            return Err(Error::InvalidEdgeLength { from, to, length });
        }
        let source = *self
            .index
            .get(&from)
            .ok_or(Error::MissingCoordinate { node: from })?;
        let target = *self
            .index
            .get(&to)
            .ok_or(Error::MissingCoordinate { node: to })?;
        self.graph.add_edge(source, target, RoadEdge { length, highway });
        Ok(())
    }

    pub fn build(self) -> Network {
        let points: Vec<IndexedPoint> = self
            .graph
            .node_indices()
            .map(|idx| GeomWithData::new(self.graph[idx].geometry, idx))
            .collect();
        let rtree = RTree::bulk_load(points);

        info!(
            "Road network ready: {} nodes, {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );

        Network {
            graph: self.graph,
            index: self.index,
            rtree,
        }
    }
}
