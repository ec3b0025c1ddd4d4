use std::path::PathBuf;

use anyhow::Context;
use atlas_routing::{graph::RouteModel, route_graph::RouteGraph};
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct InfoArgs {
    /// Graph file (JSON)
    #[arg(short, long, env = "ATLAS_GRAPH")]
    graph: PathBuf,
}

pub fn run(args: InfoArgs) -> Result<(), anyhow::Error> {
    let graph = RouteGraph::from_file(&args.graph)
        .with_context(|| format!("Failed to load graph {}", args.graph.display()))?;

    info!("Nodes: {}", graph.node_count());
    info!("Roads: {}", graph.road_count());
    info!("Metric scale: {}", graph.metric_scale());

    Ok(())
}
