use crate::{point::Point, route_path::RoutePath, types::NodeId};

/// The graph a [`RoutePlanner`](crate::route_planner::RoutePlanner) searches.
///
/// The model owns every node. A planner only holds node ids, its per-search
/// state lives in its own table and never on the model.
pub trait RouteModel {
    fn node_count(&self) -> usize;

    /// Nearest node to `point` in normalized coordinates.
    /// Only `None` when the model has no node at all.
    fn closest_node(&self, point: &Point) -> Option<NodeId>;

    /// Adjacent nodes of `node`. May be computed on first call, must be
    /// idempotent.
    fn neighbors(&self, node: NodeId) -> &[NodeId];

    /// Symmetric, non-negative, zero only between a node and itself.
    /// Used both as the edge cost and as the heuristic.
    fn distance(&self, a: NodeId, b: NodeId) -> f64;

    /// Factor converting graph distance units into meters.
    fn metric_scale(&self) -> f64;

    fn node_point(&self, node: NodeId) -> Point;

    /// Publishes the last computed path.
    fn set_path(&mut self, path: RoutePath);

    /// Withdraws any previously published path.
    fn clear_path(&mut self);
}
