//! Haversine distance matrix provider.
//!
//! Uses great-circle distance in kilometres instead of planar degrees.
//! Opt-in through [`crate::solver::Metric::Haversine`]; the planar metric stays
//! the default.

use crate::error::Result;
use crate::matrix::{DistanceModel, build_matrix};
use crate::stop::StopSet;
use crate::traits::DistanceMatrixProvider;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based distance matrix provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl HaversineMatrix {
    /// Calculate haversine distance between two points in kilometers.
    pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        // Clamp guards asin against a > 1 from rounding near antipodes.
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_KM * c
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, stops: &StopSet) -> Result<DistanceModel> {
        Ok(build_matrix(stops, Self::haversine_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::Stop;

    #[test]
    fn test_haversine_same_point() {
        let dist = HaversineMatrix::haversine_km((-12.05, -77.04), (-12.05, -77.04));
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Lima (-12.0464, -77.0428) to Arequipa (-16.4090, -71.5375)
        // Actual distance ~765 km
        let dist = HaversineMatrix::haversine_km((-12.0464, -77.0428), (-16.4090, -71.5375));
        assert!(dist > 740.0 && dist < 790.0, "Lima to Arequipa should be ~765km, got {}", dist);
    }

    #[test]
    fn test_matrix_diagonal_is_zero_and_symmetric() {
        let stops = StopSet::new(
            Stop::depot("V01", -12.0464, -77.0428),
            vec![
                Stop::new("C1", "Bodega Lucia", -12.1219, -77.0297),
                Stop::new("C2", "Minimarket Sol", -12.0931, -77.0465),
            ],
        )
        .unwrap();
        let matrix = HaversineMatrix.matrix_for(&stops).unwrap();

        for i in 0..stops.len() {
            assert_eq!(matrix.get(i, i), 0.0, "Diagonal should be zero");
        }
        assert!(matrix.is_symmetric(0.0), "Matrix should be symmetric");
        assert!(matrix.get(0, 1) > 8.0 && matrix.get(0, 1) < 9.5);
    }
}
