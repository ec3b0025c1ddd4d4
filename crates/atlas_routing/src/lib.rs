pub mod constants;
pub mod error;
pub mod geopoint;
pub mod graph;
pub mod location_index;
pub mod point;
pub mod route_graph;
pub mod route_path;
pub mod route_planner;
pub mod stopwatch;
pub mod types;
