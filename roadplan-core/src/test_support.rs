//! Shared fixtures for unit tests

use crate::model::{Coordinate, Gazetteer, HighwayClass, Network, NetworkBuilder};
use crate::NodeId;

pub(crate) const HOME: Coordinate = Coordinate::new(33.70, 73.00);
pub(crate) const NORTH: Coordinate = Coordinate::new(33.71, 73.01);
pub(crate) const SOUTH: Coordinate = Coordinate::new(33.69, 73.01);
pub(crate) const OFFICE: Coordinate = Coordinate::new(33.70, 73.02);
pub(crate) const RING: Coordinate = Coordinate::new(33.705, 73.01);
pub(crate) const ISLAND: Coordinate = Coordinate::new(33.80, 73.10);
pub(crate) const DEPOT: Coordinate = Coordinate::new(33.70, 73.03);

pub(crate) fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn two_way(builder: &mut NetworkBuilder, a: NodeId, b: NodeId, length: f64, class: &str) {
    builder
        .add_edge(a, b, length, HighwayClass::from(class))
        .unwrap();
    builder
        .add_edge(b, a, length, HighwayClass::from(class))
        .unwrap();
}

/// Three ways from 1 to 4, all two-way:
///
/// - `1-2-4` primary, 2 km per edge
/// - `1-3-4` residential, 1.5 km per edge
/// - `1-5-4` motorway, 2 km per edge
///
/// Node 7 hangs off 4 by a one-way motorway edge, node 6 is unconnected.
pub(crate) fn diamond() -> Network {
    let mut builder = NetworkBuilder::new();
    for (id, coordinate) in [
        (1, HOME),
        (2, NORTH),
        (3, SOUTH),
        (4, OFFICE),
        (5, RING),
        (6, ISLAND),
        (7, DEPOT),
    ] {
        builder.add_node(id, coordinate).unwrap();
    }
    two_way(&mut builder, 1, 2, 2000.0, "primary");
    two_way(&mut builder, 2, 4, 2000.0, "primary");
    two_way(&mut builder, 1, 3, 1500.0, "residential");
    two_way(&mut builder, 3, 4, 1500.0, "residential");
    two_way(&mut builder, 1, 5, 2000.0, "motorway");
    two_way(&mut builder, 5, 4, 2000.0, "motorway");
    builder
        .add_edge(4, 7, 1000.0, HighwayClass::from("motorway"))
        .unwrap();
    builder.build()
}

/// One-way residential street `1 -> 2 -> 3`, 1 km per edge
pub(crate) fn line() -> Network {
    let mut builder = NetworkBuilder::new();
    builder.add_node(1, Coordinate::new(33.60, 73.00)).unwrap();
    builder.add_node(2, Coordinate::new(33.60, 73.01)).unwrap();
    builder.add_node(3, Coordinate::new(33.60, 73.02)).unwrap();
    builder
        .add_edge(1, 2, 1000.0, HighwayClass::from("residential"))
        .unwrap();
    builder
        .add_edge(2, 3, 1000.0, HighwayClass::from("residential"))
        .unwrap();
    builder.build()
}

/// Names for the diamond nodes
pub(crate) fn places() -> Gazetteer {
    [
        ("Home", HOME),
        ("Market", NORTH),
        ("Office", OFFICE),
        ("Island", ISLAND),
        ("Depot", DEPOT),
    ]
    .into_iter()
    .collect()
}
