use serde::{Deserialize, Serialize};

use super::de::deserialize_highway;
use crate::NodeId;

/// Road network as exported from the map source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNetwork {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Length in meters, defaulted when missing
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_highway")]
    pub highway: Option<String>,
}
