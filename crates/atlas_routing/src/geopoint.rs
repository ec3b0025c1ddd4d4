use geo::{Distance, Haversine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Great-circle distance in meters.
    pub fn haversine_distance(&self, other: &GeoPoint) -> f64 {
        let haversine = Haversine;
        haversine.distance(geo::Point::from(self), geo::Point::from(other))
    }
}

impl From<&GeoPoint> for geo::Point<f64> {
    fn from(value: &GeoPoint) -> Self {
        geo::Point::new(value.lng, value.lat)
    }
}
