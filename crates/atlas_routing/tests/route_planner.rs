use atlas_routing::{
    error::RoutingError,
    graph::RouteModel,
    point::Point,
    route_graph::RouteGraph,
    route_planner::{RoutePlanner, SearchStatus},
    types::NodeId,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Connected graph: every node is linked to a random earlier one, plus some
/// extra random roads.
fn create_random_graph(rng: &mut StdRng, nodes: usize, extra_roads: usize) -> RouteGraph {
    let mut builder = RouteGraph::builder().metric_scale(1500.0);

    for _ in 0..nodes {
        builder.add_node(Point::new(
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
        ));
    }

    for node in 1..nodes {
        builder.add_road([rng.random_range(0..node), node]);
    }

    for _ in 0..extra_roads {
        let a = rng.random_range(0..nodes);
        let b = rng.random_range(0..nodes);
        if a != b {
            builder.add_road([a, b]);
        }
    }

    builder.build().unwrap()
}

/// Quadratic Dijkstra, only meant as a reference on small graphs.
fn brute_force_dijkstra(graph: &RouteGraph, start: NodeId, end: NodeId) -> Option<f64> {
    let node_count = graph.node_count();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut settled = vec![false; node_count];
    distances[start] = 0.0;

    loop {
        let current = (0..node_count)
            .filter(|&node| !settled[node] && distances[node].is_finite())
            .min_by(|&a, &b| distances[a].total_cmp(&distances[b]))?;

        if current == end {
            return Some(distances[end]);
        }
        settled[current] = true;

        for &neighbor in graph.neighbors(current) {
            let distance = distances[current] + graph.distance(current, neighbor);
            if distance < distances[neighbor] {
                distances[neighbor] = distance;
            }
        }
    }
}

fn percent(point: &Point) -> (f64, f64) {
    (point.x * 100.0, point.y * 100.0)
}

#[test]
fn grid_of_three_by_three() {
    let mut builder = RouteGraph::builder();
    for y in 0..3 {
        for x in 0..3 {
            builder.add_node(Point::new(x as f64 * 0.5, y as f64 * 0.5));
        }
    }
    for i in 0..3 {
        builder.add_road([i * 3, i * 3 + 1, i * 3 + 2]);
        builder.add_road([i, i + 3, i + 6]);
    }
    let mut graph = builder.metric_scale(2.0).build().unwrap();

    let mut planner = RoutePlanner::new(&mut graph, 0.0, 0.0, 100.0, 100.0).unwrap();
    planner.search().unwrap();

    assert_eq!(planner.distance(), 4.0);
    assert_eq!(planner.path().unwrap().len(), 5);
}

#[test]
fn optimal_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..25 {
        let mut graph = create_random_graph(&mut rng, 60, 90);

        let start = rng.random_range(0..graph.node_count());
        let end = rng.random_range(0..graph.node_count());
        let (start_x, start_y) = percent(&graph.node_point(start));
        let (end_x, end_y) = percent(&graph.node_point(end));

        let (start_node, end_node, path) = {
            let mut planner =
                RoutePlanner::new(&mut graph, start_x, start_y, end_x, end_y).unwrap();
            planner.search().unwrap();
            (
                planner.start_node(),
                planner.end_node(),
                planner.path().cloned().unwrap(),
            )
        };

        let expected = brute_force_dijkstra(&graph, start_node, end_node).unwrap();
        assert!(
            (path.raw_distance() - expected).abs() < 1e-9,
            "A* found {} but the shortest path is {}",
            path.raw_distance(),
            expected
        );

        assert_eq!(path.start().unwrap().id, start_node);
        assert_eq!(path.end().unwrap().id, end_node);
    }
}

#[test]
fn distance_is_sum_of_legs_times_metric_scale() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut graph = create_random_graph(&mut rng, 80, 120);

    let path = {
        let mut planner = RoutePlanner::new(&mut graph, 5.0, 5.0, 95.0, 95.0).unwrap();
        planner.search().unwrap();
        planner.path().cloned().unwrap()
    };

    let legs: f64 = path
        .nodes()
        .windows(2)
        .map(|pair| graph.distance(pair[0].id, pair[1].id))
        .sum();

    assert!((path.raw_distance() - legs).abs() < 1e-9);
    assert_eq!(path.distance(), path.raw_distance() * graph.metric_scale());
}

#[test]
fn path_nodes_are_snapshots_of_graph_nodes() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut graph = create_random_graph(&mut rng, 30, 30);

    let mut planner = RoutePlanner::new(&mut graph, 20.0, 80.0, 80.0, 20.0).unwrap();
    planner.search().unwrap();
    let path = planner.path().cloned().unwrap();
    drop(planner);

    for node in path.nodes() {
        assert_eq!(node.point, graph.node_point(node.id));
    }
    assert_eq!(graph.path(), Some(&path));
}

#[test]
fn disconnected_nodes() {
    let mut builder = RouteGraph::builder();
    builder.add_node(Point::new(0.0, 0.0));
    builder.add_node(Point::new(0.1, 0.0));
    builder.add_node(Point::new(1.0, 1.0));
    builder.add_road([0, 1]);
    let mut graph = builder.build().unwrap();

    let mut planner = RoutePlanner::new(&mut graph, 0.0, 0.0, 100.0, 100.0).unwrap();

    assert!(matches!(
        planner.search(),
        Err(RoutingError::NoPathFound { start: 0, end: 2 })
    ));
    assert_eq!(planner.status(), SearchStatus::Exhausted);
    assert!(graph.path().is_none());
}

#[test]
fn queries_outside_of_the_map_snap_to_the_closest_node() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut graph = create_random_graph(&mut rng, 40, 40);

    let mut planner = RoutePlanner::new(&mut graph, -50.0, -50.0, 250.0, 180.0).unwrap();
    assert_eq!(planner.search().ok(), Some(()));
    assert_eq!(planner.status(), SearchStatus::Found);
}

#[test]
fn graph_can_be_shared_between_threads() {
    fn assert_sync<T: Sync>() {}
    assert_sync::<RouteGraph>();
}
