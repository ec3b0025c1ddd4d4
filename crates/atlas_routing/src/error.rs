use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("the graph does not contain any node")]
    GraphEmpty,
    #[error("no path exists between node {start} and node {end}")]
    NoPathFound { start: NodeId, end: NodeId },
    #[error("coordinates ({x}, {y}) are not finite or out of range")]
    InvalidCoordinates { x: f64, y: f64 },
    #[error("the search has already been run")]
    SearchAlreadyRun,
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("failed to read graph file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse graph file")]
    Parse(#[from] serde_json::Error),
    #[error("road {road} references unknown node {node}")]
    UnknownNode { road: usize, node: NodeId },
    #[error("road {road} has fewer than two nodes")]
    DegenerateRoad { road: usize },
    #[error("cannot normalize coordinates without a non-empty bounding box")]
    EmptyBounds,
    #[error("node {node} has non-finite coordinates ({x}, {y})")]
    NonFiniteNode { node: NodeId, x: f64, y: f64 },
    #[error("metric scale must be finite and positive, got {0}")]
    InvalidMetricScale(f64),
}
