use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::hash_map::Entry;

use fxhash::FxHashMap;
use tracing::{debug, trace};

use crate::{
    constants::{COORDINATE_SCALE, MAX_COORDINATE},
    error::RoutingError,
    graph::RouteModel,
    point::Point,
    route_path::{RouteNode, RoutePath},
    stopwatch::Stopwatch,
    types::NodeId,
};

/// https://en.wikipedia.org/wiki/A*_search_algorithm

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node_id: NodeId,

    /// g_score is the cheapest known distance from start to "node_id" when the item was queued
    g_score: f64,

    /// f_score = g_score + h_score, with h_score being the heuristic value from node_id to the end
    f_score: f64,

    /// Insertion order, earlier items win ties on f_score
    sequence: usize,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip both to make this a min-heap
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Nodes waiting for expansion, ordered by `g + h` then by insertion order.
///
/// A node may be queued again after a cheaper route to it is found, the
/// outdated entries are skipped when popped.
struct OpenList {
    heap: BinaryHeap<HeapItem>,
    next_sequence: usize,
}

impl OpenList {
    fn new() -> Self {
        OpenList {
            heap: BinaryHeap::with_capacity(1024),
            next_sequence: 0,
        }
    }

    fn push(&mut self, node_id: NodeId, g_score: f64, h_score: f64) {
        self.heap.push(HeapItem {
            node_id,
            g_score,
            f_score: g_score + h_score,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<HeapItem> {
        self.heap.pop()
    }
}

/// Search record of a node discovered by the current search.
struct NodeState {
    settled: bool,
    g_value: f64,
    h_value: f64,
    parent: Option<NodeId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Running,
    Found,
    Exhausted,
}

#[derive(Debug, Default, Copy, Clone)]
pub struct SearchOptions {
    /// Record every expanded node, in expansion order
    pub include_debug_info: bool,
}

#[derive(Debug, Default, Clone)]
pub struct SearchDebugInfo {
    pub expanded_nodes: Vec<NodeId>,
}

fn estimate(model: &impl RouteModel, node: NodeId, end: NodeId) -> f64 {
    model.distance(node, end)
}

/// A* search between the nodes closest to two query coordinates.
///
/// A planner answers a single query: build it, call [`RoutePlanner::search`]
/// once, read the results. The found path is also published to the model
/// through [`RouteModel::set_path`].
pub struct RoutePlanner<'a, M: RouteModel> {
    model: &'a mut M,
    start_node: NodeId,
    end_node: NodeId,

    open_list: OpenList,
    states: FxHashMap<NodeId, NodeState>,

    status: SearchStatus,
    path_found: Option<RoutePath>,
    distance: f64,
    nodes_expanded: usize,

    debug_info: Option<SearchDebugInfo>,
}

impl<'a, M: RouteModel> RoutePlanner<'a, M> {
    /// Coordinates are percentages (0 to 100) of the map extent.
    pub fn new(
        model: &'a mut M,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> Result<Self, RoutingError> {
        Self::with_options(
            model,
            start_x,
            start_y,
            end_x,
            end_y,
            SearchOptions::default(),
        )
    }

    pub fn with_options(
        model: &'a mut M,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
        options: SearchOptions,
    ) -> Result<Self, RoutingError> {
        let start = Point::new(start_x, start_y).scale(COORDINATE_SCALE);
        let end = Point::new(end_x, end_y).scale(COORDINATE_SCALE);

        let start_node = Self::resolve_node(model, &start, start_x, start_y)?;
        let end_node = Self::resolve_node(model, &end, end_x, end_y)?;

        debug!(start_node, end_node, "Resolved route endpoints");

        Ok(RoutePlanner {
            model,
            start_node,
            end_node,
            open_list: OpenList::new(),
            states: FxHashMap::default(),
            status: SearchStatus::Idle,
            path_found: None,
            distance: 0.0,
            nodes_expanded: 0,
            debug_info: options
                .include_debug_info
                .then(SearchDebugInfo::default),
        })
    }

    fn resolve_node(model: &M, point: &Point, x: f64, y: f64) -> Result<NodeId, RoutingError> {
        if !point.is_finite()
            || point.x.abs() > MAX_COORDINATE
            || point.y.abs() > MAX_COORDINATE
        {
            return Err(RoutingError::InvalidCoordinates { x, y });
        }

        model.closest_node(point).ok_or(RoutingError::GraphEmpty)
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Length of the found path in real-world units, 0 until a path is found.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn path(&self) -> Option<&RoutePath> {
        self.path_found.as_ref()
    }

    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    pub fn debug_info(&self) -> Option<&SearchDebugInfo> {
        self.debug_info.as_ref()
    }

    pub fn calculate_h_value(&self, node: NodeId) -> f64 {
        estimate(&*self.model, node, self.end_node)
    }

    fn init(&mut self) {
        let h_value = self.calculate_h_value(self.start_node);
        self.states.insert(
            self.start_node,
            NodeState {
                settled: false,
                g_value: 0.0,
                h_value,
                parent: None,
            },
        );
        self.open_list.push(self.start_node, 0.0, h_value);
    }

    /// Relaxes every neighbor of `current` that is not settled yet.
    ///
    /// A neighbor's values are only overwritten when the route through
    /// `current` is strictly cheaper than the one already recorded. Its
    /// heuristic is computed once, when it is first discovered.
    fn add_neighbors(&mut self, current: NodeId) {
        let current_g = self.states[&current].g_value;
        let end_node = self.end_node;
        let model: &M = &*self.model;

        for &neighbor in model.neighbors(current) {
            let g_value = current_g + model.distance(current, neighbor);

            let h_value = match self.states.entry(neighbor) {
                Entry::Occupied(mut entry) => {
                    let state = entry.get_mut();
                    if state.settled || g_value >= state.g_value {
                        continue;
                    }
                    state.g_value = g_value;
                    state.parent = Some(current);
                    state.h_value
                }
                Entry::Vacant(entry) => {
                    let h_value = estimate(model, neighbor, end_node);
                    entry.insert(NodeState {
                        settled: false,
                        g_value,
                        h_value,
                        parent: Some(current),
                    });
                    h_value
                }
            };

            self.open_list.push(neighbor, g_value, h_value);
        }
    }

    /// Pops the open node with the lowest `g + h`, skipping stale entries.
    fn next_node(&mut self) -> Option<NodeId> {
        while let Some(HeapItem {
            node_id, g_score, ..
        }) = self.open_list.pop()
        {
            let Some(state) = self.states.get_mut(&node_id) else {
                continue;
            };

            // Already expanded, or queued before a cheaper route was found
            if state.settled || g_score > state.g_value {
                continue;
            }

            state.settled = true;
            return Some(node_id);
        }

        None
    }

    /// Walks the parents back from `node` to the start node.
    fn construct_final_path(&self, node: NodeId) -> RoutePath {
        let mut nodes: Vec<RouteNode> = Vec::with_capacity(32);
        let mut raw_distance = 0.0;
        let mut current = node;

        loop {
            nodes.push(RouteNode::new(current, self.model.node_point(current)));

            match self.states.get(&current).and_then(|state| state.parent) {
                Some(parent) => {
                    raw_distance += self.model.distance(current, parent);
                    current = parent;
                }
                None => break,
            }
        }

        nodes.reverse();

        RoutePath::new(nodes, raw_distance, self.model.metric_scale())
    }

    /// Runs the search. On success the path is published to the model,
    /// otherwise any path previously published there is withdrawn.
    pub fn search(&mut self) -> Result<(), RoutingError> {
        if self.status != SearchStatus::Idle {
            return Err(RoutingError::SearchAlreadyRun);
        }

        let stopwatch = Stopwatch::new("route_planner/search");
        self.status = SearchStatus::Running;
        self.init();

        while let Some(current) = self.next_node() {
            if let Some(debug_info) = self.debug_info.as_mut() {
                debug_info.expanded_nodes.push(current);
            }

            if current == self.end_node {
                let path = self.construct_final_path(current);
                self.distance = path.distance();
                self.status = SearchStatus::Found;

                debug!(
                    nodes = path.len(),
                    distance = self.distance,
                    expanded = self.nodes_expanded,
                    "Route found"
                );
                stopwatch.report();

                self.model.set_path(path.clone());
                self.path_found = Some(path);
                return Ok(());
            }

            trace!(node = current, "Expanding node");
            self.add_neighbors(current);
            self.nodes_expanded += 1;
        }

        self.status = SearchStatus::Exhausted;
        self.model.clear_path();

        debug!(
            start = self.start_node,
            end = self.end_node,
            expanded = self.nodes_expanded,
            "Open list exhausted without reaching the end node"
        );
        stopwatch.report();

        Err(RoutingError::NoPathFound {
            start: self.start_node,
            end: self.end_node,
        })
    }
}
