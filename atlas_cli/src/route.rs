use std::path::{Path, PathBuf};

use anyhow::Context;
use atlas_routing::{
    route_graph::RouteGraph,
    route_path::RoutePath,
    route_planner::RoutePlanner,
};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::parsers;

#[derive(Args)]
pub struct RouteArgs {
    /// Graph file (JSON)
    #[arg(short, long, env = "ATLAS_GRAPH")]
    graph: PathBuf,

    /// Start coordinates "x,y", in percent of the map extent
    #[arg(short, long, value_parser = parsers::parse_coordinates, allow_hyphen_values = true)]
    start: (f64, f64),

    /// End coordinates "x,y", in percent of the map extent
    #[arg(short, long, value_parser = parsers::parse_coordinates, allow_hyphen_values = true)]
    end: (f64, f64),

    /// Print the route as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RouteOutput {
    start_node: usize,
    end_node: usize,
    nodes_expanded: usize,
    path: RoutePath,
}

pub fn run(args: RouteArgs) -> Result<(), anyhow::Error> {
    let mut graph = load_graph(&args.graph)?;
    let output = find_route(&mut graph, args.start, args.end)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Distance: {:.2} m", output.path.distance());
    println!("Nodes: {}", output.path.len());
    println!(
        "Path: {}",
        output
            .path
            .node_ids()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    );

    Ok(())
}

fn load_graph(path: &Path) -> Result<RouteGraph, anyhow::Error> {
    RouteGraph::from_file(path).with_context(|| format!("Failed to load graph {}", path.display()))
}

fn find_route(
    graph: &mut RouteGraph,
    (start_x, start_y): (f64, f64),
    (end_x, end_y): (f64, f64),
) -> Result<RouteOutput, anyhow::Error> {
    let mut planner = RoutePlanner::new(graph, start_x, start_y, end_x, end_y)?;
    planner.search()?;

    let path = planner
        .path()
        .cloned()
        .context("Search succeeded without a path")?;

    info!(
        start = planner.start_node(),
        end = planner.end_node(),
        expanded = planner.nodes_expanded(),
        "Route of {:.2} m through {} nodes",
        planner.distance(),
        path.len()
    );

    Ok(RouteOutput {
        start_node: planner.start_node(),
        end_node: planner.end_node(),
        nodes_expanded: planner.nodes_expanded(),
        path,
    })
}
