//! Polyline representation of a planned route.
//!
//! Renderers draw markers at each point and line segments between
//! consecutive points. The core never encodes the polyline into a map
//! format; that happens in the rendering layer.

use serde::{Deserialize, Serialize};

/// An outbound route path as decoded coordinates.
///
/// Each point is a (latitude, longitude) tuple, in visiting order. The
/// return leg to the depot is not part of the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consecutive (from, to) segments, one per leg of the route.
    pub fn legs(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}
