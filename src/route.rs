//! Visiting orders and the assembled result handed to renderers.

use std::fmt;

use serde::Serialize;

use crate::error::{PlanError, Result};
use crate::matrix::DistanceModel;
use crate::polyline::Polyline;
use crate::stop::{Stop, StopSet};

/// First line of the printed itinerary.
pub const ROUTE_HEADER: &str = "Ruta:";

/// A visiting order over stop set indices, starting at the depot (0).
///
/// The tour is closed for costing: [`Route::tour_length`] includes the leg
/// from the last stop back to the depot, which the sequence itself omits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route(Vec<usize>);

impl Route {
    /// Wrap an index sequence, checking it is a permutation of `0..n` that
    /// starts at the depot.
    pub fn new(indices: Vec<usize>) -> Result<Self> {
        if indices.first() != Some(&0) {
            return Err(PlanError::no_feasible_route("route must start at the depot"));
        }
        let mut seen = vec![false; indices.len()];
        for &index in &indices {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(PlanError::no_feasible_route(format!(
                        "route is not a permutation: index {index} repeated or out of range"
                    )));
                }
            }
        }
        Ok(Self(indices))
    }

    pub(crate) fn from_indices_unchecked(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fail unless the route and the matrix cover the same number of stops.
    pub fn check_covers(&self, matrix: &DistanceModel) -> Result<()> {
        if self.len() != matrix.size() {
            return Err(PlanError::no_feasible_route(format!(
                "route covers {} stops, distance matrix {}",
                self.len(),
                matrix.size()
            )));
        }
        Ok(())
    }

    /// Closed-tour length: consecutive legs plus the return to the depot.
    pub fn tour_length(&self, matrix: &DistanceModel) -> Result<f64> {
        self.check_covers(matrix)?;
        Ok(self.length_unchecked(matrix))
    }

    pub(crate) fn length_unchecked(&self, matrix: &DistanceModel) -> f64 {
        let outbound: f64 = self.0.windows(2).map(|leg| matrix.get(leg[0], leg[1])).sum();
        let closing = match (self.0.first(), self.0.last()) {
            (Some(&first), Some(&last)) => matrix.get(last, first),
            _ => 0.0,
        };
        outbound + closing
    }

    pub(crate) fn indices_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }
}

/// The final visiting order with resolved stops and total tour distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Stops in visiting order, depot first, without the return leg.
    pub visiting_order: Vec<Stop>,
    /// Stop set indices matching `visiting_order`.
    pub route: Route,
    /// Closed-tour length, return leg included.
    pub total_distance: f64,
}

impl RouteResult {
    /// Resolve a route against its stop set and price it with `matrix`.
    pub fn assemble(stops: &StopSet, route: Route, matrix: &DistanceModel) -> Result<Self> {
        if route.len() != stops.len() || matrix.size() != stops.len() {
            return Err(PlanError::no_feasible_route(format!(
                "route covers {} stops and matrix {}, stop set has {}",
                route.len(),
                matrix.size(),
                stops.len()
            )));
        }

        let visiting_order = route
            .indices()
            .iter()
            .map(|&index| {
                stops
                    .get(index)
                    .cloned()
                    .ok_or_else(|| PlanError::no_feasible_route(format!("no stop at index {index}")))
            })
            .collect::<Result<Vec<_>>>()?;
        let total_distance = route.tour_length(matrix)?;

        Ok(Self {
            visiting_order,
            route,
            total_distance,
        })
    }

    /// Numbered itinerary lines, `"(k) id - label"`, depot at `(1)`.
    pub fn plan_lines(&self) -> Vec<String> {
        self.visiting_order
            .iter()
            .enumerate()
            .map(|(step, stop)| format!("({}) {} - {}", step + 1, stop.id, stop.label))
            .collect()
    }

    /// Outbound path through the visiting order.
    pub fn polyline(&self) -> Polyline {
        Polyline::new(self.visiting_order.iter().map(Stop::location).collect())
    }
}

impl fmt::Display for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{ROUTE_HEADER}")?;
        for line in self.plan_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
