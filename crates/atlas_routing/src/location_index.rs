use rstar::primitives::GeomWithData;
use rstar::{RStarInsertionStrategy, RTree, RTreeParams};
use tracing::debug;

use crate::{point::Point, types::NodeId};

type LocationIndexObject = GeomWithData<[f64; 2], NodeId>;

struct LocationIndexTreeParams;

impl RTreeParams for LocationIndexTreeParams {
    type DefaultInsertionStrategy = RStarInsertionStrategy;

    const MAX_SIZE: usize = 64;
    const MIN_SIZE: usize = 28;
    const REINSERTION_COUNT: usize = 5;
}

/// Nearest-node lookup over the points of a graph.
pub struct LocationIndex {
    tree: RTree<LocationIndexObject, LocationIndexTreeParams>,
}

impl LocationIndex {
    pub fn build(points: &[Point]) -> LocationIndex {
        debug!(nodes = points.len(), "Building location index");

        let tree: RTree<LocationIndexObject, LocationIndexTreeParams> =
            RTree::bulk_load_with_params(
                points
                    .iter()
                    .enumerate()
                    .map(|(node_id, point)| LocationIndexObject::new(point.into(), node_id))
                    .collect(),
            );

        LocationIndex { tree }
    }

    /// Works for any coordinate, including points outside the graph's
    /// bounding box.
    pub fn closest_node(&self, point: &Point) -> Option<NodeId> {
        self.tree
            .nearest_neighbor(&[point.x, point.y])
            .map(|nearest| nearest.data)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
