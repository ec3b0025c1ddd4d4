use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::info;

use crate::{
    error::GraphError,
    geopoint::GeoPoint,
    graph::RouteModel,
    location_index::LocationIndex,
    point::Point,
    route_path::RoutePath,
    types::{NodeId, RoadId},
};

const DEFAULT_METRIC_SCALE: f64 = 1.0;

fn default_metric_scale() -> f64 {
    DEFAULT_METRIC_SCALE
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GraphFile {
    Planar {
        #[serde(default = "default_metric_scale")]
        metric_scale: f64,
        nodes: Vec<Point>,
        roads: Vec<Vec<NodeId>>,
    },
    Geographic {
        geo_nodes: Vec<GeoPoint>,
        roads: Vec<Vec<NodeId>>,
    },
}

/// Road network made of nodes and roads, a road being an ordered polyline of
/// nodes. Two nodes are neighbors when they follow each other on a road.
pub struct RouteGraph {
    points: Vec<Point>,
    roads: Vec<Vec<NodeId>>,
    node_roads: Vec<Vec<RoadId>>,

    // Filled on first access, shared by every search on this graph
    neighbors: Vec<OnceLock<Vec<NodeId>>>,

    metric_scale: f64,
    index: LocationIndex,
    path: Option<RoutePath>,
}

impl RouteGraph {
    pub fn builder() -> RouteGraphBuilder {
        RouteGraphBuilder::default()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<RouteGraph, GraphError> {
        let path = path.as_ref();
        info!("Reading graph from {}", path.display());

        let reader = BufReader::new(File::open(path)?);
        let file: GraphFile = serde_json::from_reader(reader)?;
        Self::from_graph_file(file)
    }

    pub fn from_json_str(json: &str) -> Result<RouteGraph, GraphError> {
        let file: GraphFile = serde_json::from_str(json)?;
        Self::from_graph_file(file)
    }

    fn from_graph_file(file: GraphFile) -> Result<RouteGraph, GraphError> {
        match file {
            GraphFile::Planar {
                metric_scale,
                nodes,
                roads,
            } => {
                let mut builder = RouteGraph::builder().metric_scale(metric_scale);
                for point in nodes {
                    builder.add_node(point);
                }
                for road in roads {
                    builder.add_road(road);
                }
                builder.build()
            }
            GraphFile::Geographic { geo_nodes, roads } => Self::from_geo_points(&geo_nodes, roads),
        }
    }

    /// Projects geographic coordinates onto the normalized [0, 1] plane.
    ///
    /// Both axes share the same scale so that Euclidean distances keep their
    /// proportions, the metric scale being the larger side of the projected
    /// bounding box in meters.
    pub fn from_geo_points(
        geo_points: &[GeoPoint],
        roads: impl IntoIterator<Item = Vec<NodeId>>,
    ) -> Result<RouteGraph, GraphError> {
        let projected = project(geo_points);

        let (min_x, min_y, max_x, max_y) = projected.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(min_x, min_y, max_x, max_y), &(x, y)| {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            },
        );

        let metric_scale = (max_x - min_x).max(max_y - min_y);
        if projected.is_empty() || metric_scale <= 0.0 {
            return Err(GraphError::EmptyBounds);
        }

        let mut builder = RouteGraph::builder().metric_scale(metric_scale);
        for (x, y) in projected {
            builder.add_node(Point::new(
                (x - min_x) / metric_scale,
                (y - min_y) / metric_scale,
            ));
        }
        for road in roads {
            builder.add_road(road);
        }

        builder.build()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn roads(&self) -> &[Vec<NodeId>] {
        &self.roads
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// Last path published by a search, if any.
    pub fn path(&self) -> Option<&RoutePath> {
        self.path.as_ref()
    }

    fn compute_neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let mut neighbors: Vec<NodeId> = Vec::new();

        for &road_id in &self.node_roads[node] {
            let road = &self.roads[road_id];

            for (index, _) in road.iter().enumerate().filter(|(_, n)| **n == node) {
                let previous = index.checked_sub(1).map(|i| road[i]);
                let next = road.get(index + 1).copied();

                for adj_node in previous.into_iter().chain(next) {
                    if adj_node != node && !neighbors.contains(&adj_node) {
                        neighbors.push(adj_node);
                    }
                }
            }
        }

        neighbors
    }
}

impl RouteModel for RouteGraph {
    fn node_count(&self) -> usize {
        self.points.len()
    }

    fn closest_node(&self, point: &Point) -> Option<NodeId> {
        self.index.closest_node(point)
    }

    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.neighbors[node].get_or_init(|| self.compute_neighbors(node))
    }

    fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        self.points[a].distance(&self.points[b])
    }

    fn metric_scale(&self) -> f64 {
        self.metric_scale
    }

    fn node_point(&self, node: NodeId) -> Point {
        self.points[node]
    }

    fn set_path(&mut self, path: RoutePath) {
        self.path = Some(path);
    }

    fn clear_path(&mut self) {
        self.path = None;
    }
}

// Equirectangular projection around the mean latitude, in meters.
fn project(geo_points: &[GeoPoint]) -> Vec<(f64, f64)> {
    if geo_points.is_empty() {
        return Vec::new();
    }

    let mean_lat = geo_points.iter().map(|p| p.lat).sum::<f64>() / geo_points.len() as f64;
    let cos_lat = mean_lat.to_radians().cos();
    let meters_per_radian = crate::constants::EARTH_RADIUS_METERS;

    geo_points
        .iter()
        .map(|p| {
            (
                p.lng.to_radians() * cos_lat * meters_per_radian,
                p.lat.to_radians() * meters_per_radian,
            )
        })
        .collect()
}

pub struct RouteGraphBuilder {
    points: Vec<Point>,
    roads: Vec<Vec<NodeId>>,
    metric_scale: f64,
}

impl Default for RouteGraphBuilder {
    fn default() -> Self {
        RouteGraphBuilder {
            points: Vec::new(),
            roads: Vec::new(),
            metric_scale: DEFAULT_METRIC_SCALE,
        }
    }
}

impl RouteGraphBuilder {
    pub fn metric_scale(mut self, metric_scale: f64) -> Self {
        self.metric_scale = metric_scale;
        self
    }

    pub fn add_node(&mut self, point: Point) -> NodeId {
        let node_id = self.points.len();
        self.points.push(point);
        node_id
    }

    pub fn add_road(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> RoadId {
        let road_id = self.roads.len();
        self.roads.push(nodes.into_iter().collect());
        road_id
    }

    pub fn build(self) -> Result<RouteGraph, GraphError> {
        if !self.metric_scale.is_finite() || self.metric_scale <= 0.0 {
            return Err(GraphError::InvalidMetricScale(self.metric_scale));
        }

        if let Some(node) = self.points.iter().position(|point| !point.is_finite()) {
            let Point { x, y } = self.points[node];
            return Err(GraphError::NonFiniteNode { node, x, y });
        }

        let mut node_roads: Vec<Vec<RoadId>> = vec![vec![]; self.points.len()];

        for (road_id, road) in self.roads.iter().enumerate() {
            if road.len() < 2 {
                return Err(GraphError::DegenerateRoad { road: road_id });
            }

            for &node in road {
                let roads = node_roads
                    .get_mut(node)
                    .ok_or(GraphError::UnknownNode {
                        road: road_id,
                        node,
                    })?;

                if roads.last() != Some(&road_id) {
                    roads.push(road_id);
                }
            }
        }

        let index = LocationIndex::build(&self.points);
        let neighbors = (0..self.points.len()).map(|_| OnceLock::new()).collect();

        info!(
            nodes = self.points.len(),
            roads = self.roads.len(),
            "Built route graph"
        );

        Ok(RouteGraph {
            points: self.points,
            roads: self.roads,
            node_roads,
            neighbors,
            metric_scale: self.metric_scale,
            index,
            path: None,
        })
    }
}
