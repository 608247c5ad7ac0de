//! Pairwise distance table and the planar Euclidean provider.

use rayon::prelude::*;

use crate::error::{PlanError, Result};
use crate::stop::StopSet;
use crate::traits::DistanceMatrixProvider;

/// Largest difference allowed between `D[i][j]` and `D[j][i]`.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Square distance table indexed by stop set position.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceModel {
    rows: Vec<Vec<f64>>,
}

impl DistanceModel {
    /// Build a model from explicit rows.
    ///
    /// The table must be square with a zero diagonal, and every entry finite,
    /// non-negative and equal to its mirror within [`SYMMETRY_TOLERANCE`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(PlanError::no_feasible_route(format!(
                "distance matrix row {i} has {} entries, expected {n}",
                row.len()
            )));
        }

        let model = Self { rows };
        if let Some((i, j)) = model.first_non_finite() {
            return Err(PlanError::no_feasible_route(format!(
                "distance from stop {i} to stop {j} is not finite"
            )));
        }
        for i in 0..n {
            if model.get(i, i) != 0.0 {
                return Err(PlanError::no_feasible_route(format!(
                    "distance from stop {i} to itself is {}",
                    model.get(i, i)
                )));
            }
            for j in 0..n {
                let d = model.get(i, j);
                if d < 0.0 {
                    return Err(PlanError::no_feasible_route(format!(
                        "distance from stop {i} to stop {j} is negative ({d})"
                    )));
                }
                if (d - model.get(j, i)).abs() > SYMMETRY_TOLERANCE {
                    return Err(PlanError::no_feasible_route(format!(
                        "distance matrix is not symmetric between stops {i} and {j}"
                    )));
                }
            }
        }
        Ok(model)
    }

    #[cfg(test)]
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of stops covered.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Distance from stop `from` to stop `to`.
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Returns `true` if the matrix is symmetric within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.size();
        (0..n).all(|i| ((i + 1)..n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }

    /// First non-finite entry, if any, as (row, column).
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(i, row)| {
            row.iter().position(|value| !value.is_finite()).map(|j| (i, j))
        })
    }
}

/// Straight-line distance treating latitude/longitude as planar coordinates.
///
/// Distances are in coordinate degrees. There is no geodesic correction, which
/// is acceptable at intra-city scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanMatrix;

impl EuclideanMatrix {
    pub fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
        (from.0 - to.0).hypot(from.1 - to.1)
    }
}

impl DistanceMatrixProvider for EuclideanMatrix {
    fn matrix_for(&self, stops: &StopSet) -> Result<DistanceModel> {
        Ok(build_matrix(stops, Self::distance))
    }
}

/// Fill a symmetric, zero-diagonal table from a point-to-point metric.
pub(crate) fn build_matrix<F>(stops: &StopSet, metric: F) -> DistanceModel
where
    F: Fn((f64, f64), (f64, f64)) -> f64 + Sync,
{
    let locations = stops.locations();
    let rows = (0..locations.len())
        .into_par_iter()
        .map(|i| {
            locations
                .iter()
                .enumerate()
                .map(|(j, to)| match i.cmp(&j) {
                    std::cmp::Ordering::Equal => 0.0,
                    // Always measure from the lower index so D[i][j] == D[j][i] bit for bit.
                    std::cmp::Ordering::Less => metric(locations[i], *to),
                    std::cmp::Ordering::Greater => metric(*to, locations[i]),
                })
                .collect::<Vec<f64>>()
        })
        .collect();

    DistanceModel { rows }
}
