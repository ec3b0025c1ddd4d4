pub type NodeId = usize;
pub type RoadId = usize;
