use std::path::Path;

use log::info;

use super::de::read_json_file;
use super::raw_types::RawNetwork;
use crate::{Coordinate, Error, HighwayClass, Network, NetworkBuilder, PlannerConfig};

/// Loads a road network from a JSON export
///
/// # Errors
///
/// Returns an error if the file cannot be read or the network violates the
/// model invariants (duplicate nodes, edges to nodes without coordinates,
/// invalid lengths).
pub fn load_network(path: &Path, config: &PlannerConfig) -> Result<Network, Error> {
    info!("Loading road network: {}", path.display());
    let raw: RawNetwork = read_json_file(path)?;
    build_network(raw, config.default_length_m)
}

/// Builds a network from already parsed raw data
///
/// # Errors
///
/// See [`load_network`].
pub fn build_network(raw: RawNetwork, default_length_m: f64) -> Result<Network, Error> {
    if raw.nodes.is_empty() {
        return Err(Error::InvalidData(
            "Road network contains no nodes".to_string(),
        ));
    }

    let mut builder = NetworkBuilder::with_capacity(raw.nodes.len(), raw.edges.len());
    for node in raw.nodes {
        builder.add_node(node.id, Coordinate::new(node.lat, node.lon))?;
    }

    let mut defaulted_lengths = 0usize;
    for edge in raw.edges {
        let length = edge.length.unwrap_or_else(|| {
            defaulted_lengths += 1;
            default_length_m
        });
        let highway = edge.highway.map(HighwayClass::new).unwrap_or_default();
        builder.add_edge(edge.from, edge.to, length, highway)?;
    }

    if defaulted_lengths > 0 {
        log::debug!("{defaulted_lengths} edges had no length, assumed {default_length_m} m");
    }

    let network = builder.build();
    report_isolated_nodes(&network);
    Ok(network)
}

#[allow(clippy::cast_precision_loss)]
fn report_isolated_nodes(network: &Network) {
    let isolated = network
        .graph
        .node_indices()
        .filter(|&idx| network.graph.neighbors_undirected(idx).next().is_none())
        .count();

    if isolated > 0 {
        let total = network.node_count();
        let percentage = (isolated as f64 / total as f64) * 100.0;
        log::warn!(
            "{isolated} of {total} nodes ({percentage:.1}%) have no edges at all. \
        Stops snapped to them will be unreachable."
        );
    }
}
