use geo::{Distance, Euclidean};
use serde::{Deserialize, Serialize};

/// A position in the normalized [0, 1] coordinate space of a route graph.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        Euclidean.distance(geo::Point::from(self), geo::Point::from(other))
    }

    pub fn scale(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<&Point> for geo::Point<f64> {
    fn from(value: &Point) -> Self {
        geo::Point::new(value.x, value.y)
    }
}

impl From<&Point> for [f64; 2] {
    fn from(value: &Point) -> Self {
        [value.x, value.y]
    }
}
