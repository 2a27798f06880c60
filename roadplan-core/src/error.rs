use thiserror::Error;

use crate::NodeId;

/// Configuration-time failures.
///
/// Any of these means the engine refuses to serve requests: the network,
/// the mode profiles or the traffic schedule violate their invariants.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Node {0} is defined more than once")]
    DuplicateNode(NodeId),
    #[error("Node {node} is referenced by an edge but has no coordinate")]
    MissingCoordinate { node: NodeId },
    #[error("Edge {from} -> {to} has invalid length {length}")]
    InvalidEdgeLength { from: NodeId, to: NodeId, length: f64 },
    #[error("Traffic schedule does not cover hour {hour}")]
    TrafficScheduleGap { hour: u8 },
    #[error("Traffic schedule covers hour {hour} more than once")]
    TrafficScheduleOverlap { hour: u8 },
    #[error("Invalid traffic band {start_hour}-{end_hour}: {reason}")]
    InvalidTrafficBand {
        start_hour: u8,
        end_hour: u8,
        reason: &'static str,
    },
    #[error("Invalid profile for mode '{mode}': {reason}")]
    InvalidProfile { mode: String, reason: String },
    #[error("Invalid planner configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::MissingCoordinate { node: 42 };
        assert_eq!(
            err.to_string(),
            "Node 42 is referenced by an edge but has no coordinate"
        );

        let err = Error::TrafficScheduleGap { hour: 7 };
        assert_eq!(err.to_string(), "Traffic schedule does not cover hour 7");

        let err = Error::InvalidTrafficBand {
            start_hour: 9,
            end_hour: 7,
            reason: "start must precede end",
        };
        assert_eq!(
            err.to_string(),
            "Invalid traffic band 9-7: start must precede end"
        );
    }
}
