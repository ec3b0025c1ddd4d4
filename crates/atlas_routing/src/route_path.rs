use serde::{Deserialize, Serialize};

use crate::{point::Point, types::NodeId};

/// Copy of a graph node taken when the path was built.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    pub id: NodeId,
    pub point: Point,
}

impl RouteNode {
    pub fn new(id: NodeId, point: Point) -> Self {
        RouteNode { id, point }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    nodes: Vec<RouteNode>,

    /// Sum of the distances between consecutive nodes, in graph units
    raw_distance: f64,

    /// `raw_distance` converted to real-world units with the graph's metric scale
    distance: f64,
}

impl RoutePath {
    pub fn new(nodes: Vec<RouteNode>, raw_distance: f64, metric_scale: f64) -> RoutePath {
        RoutePath {
            nodes,
            raw_distance,
            distance: raw_distance * metric_scale,
        }
    }

    pub fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    pub fn raw_distance(&self) -> f64 {
        self.raw_distance
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&RouteNode> {
        self.nodes.first()
    }

    pub fn end(&self) -> Option<&RouteNode> {
        self.nodes.last()
    }
}
