/// Maps the caller's [0, 100] percentage scale into the normalized [0, 1] space of the graph.
pub const COORDINATE_SCALE: f64 = 0.01;

/// Largest accepted query coordinate, in normalized units. Squared distances stay finite below it.
pub const MAX_COORDINATE: f64 = 1e150;

/// Mean earth radius, the same one `geo::Haversine` measures with.
pub(crate) const EARTH_RADIUS_METERS: f64 = 6_371_008.8;
