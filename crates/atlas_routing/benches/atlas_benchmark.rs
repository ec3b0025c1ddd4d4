use atlas_routing::{point::Point, route_graph::RouteGraph, route_planner::RoutePlanner};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn create_grid_graph(size: usize) -> RouteGraph {
    let spacing = 1.0 / (size - 1) as f64;
    let mut builder = RouteGraph::builder().metric_scale(10_000.0);

    for y in 0..size {
        for x in 0..size {
            builder.add_node(Point::new(x as f64 * spacing, y as f64 * spacing));
        }
    }

    for i in 0..size {
        builder.add_road((0..size).map(|x| i * size + x));
        builder.add_road((0..size).map(|y| y * size + i));
    }

    builder.build().unwrap()
}

fn route_planner_benchmark(c: &mut Criterion) {
    let mut graph = create_grid_graph(200);

    c.bench_function("RoutePlanner grid 200x200 corner to corner", |b| {
        b.iter(|| {
            let mut planner = RoutePlanner::new(&mut graph, 0.0, 0.0, 100.0, 100.0).unwrap();
            planner.search().unwrap();
            black_box(planner.distance())
        })
    });

    c.bench_function("RoutePlanner grid 200x200 along an edge", |b| {
        b.iter(|| {
            let mut planner = RoutePlanner::new(&mut graph, 0.0, 0.0, 100.0, 0.0).unwrap();
            planner.search().unwrap();
            black_box(planner.distance())
        })
    });
}

criterion_group!(benches, route_planner_benchmark);
criterion_main!(benches);
