//! Single-vehicle route planner: nearest-neighbour construction plus 2-opt.

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{PlanError, Result};
use crate::haversine::HaversineMatrix;
use crate::matrix::{DistanceModel, EuclideanMatrix};
use crate::route::{Route, RouteResult};
use crate::stop::{Stop, StopSet};
use crate::traits::{DistanceMatrixProvider, StopQuery, StopSource};

/// Smallest tour-length reduction a 2-opt move must achieve to be applied.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Distance metric used to build the distance model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Planar distance over raw latitude/longitude degrees.
    #[default]
    Euclidean,
    /// Great-circle kilometres.
    Haversine,
}

impl DistanceMatrixProvider for Metric {
    fn matrix_for(&self, stops: &StopSet) -> Result<DistanceModel> {
        match self {
            Metric::Euclidean => EuclideanMatrix.matrix_for(stops),
            Metric::Haversine => HaversineMatrix.matrix_for(stops),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Run the 2-opt improvement pass after construction.
    pub improve: bool,
    /// Maximum 2-opt passes. `None` means n² for n stops.
    pub max_improvement_passes: Option<usize>,
    pub metric: Metric,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            improve: true,
            max_improvement_passes: None,
            metric: Metric::Euclidean,
        }
    }
}

impl SolveOptions {
    /// Parse options from a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn pass_limit(&self, stop_count: usize) -> usize {
        self.max_improvement_passes
            .unwrap_or_else(|| stop_count.saturating_mul(stop_count))
    }
}

/// One planning request, for batch evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub depot: Stop,
    pub customers: Vec<Stop>,
}

/// Plan a route from `depot` through every customer using the configured metric.
pub fn plan_route(depot: Stop, customers: Vec<Stop>, options: &SolveOptions) -> Result<RouteResult> {
    plan_route_with(&options.metric, depot, customers, options)
}

/// Plan a route with an explicit distance matrix provider.
pub fn plan_route_with<M>(
    matrix_provider: &M,
    depot: Stop,
    customers: Vec<Stop>,
    options: &SolveOptions,
) -> Result<RouteResult>
where
    M: DistanceMatrixProvider + ?Sized,
{
    if customers.is_empty() {
        warn!(depot = %depot.id, "no matching stops to route");
        return Err(PlanError::EmptyResult);
    }

    let stops = StopSet::new(depot, customers)?;
    let matrix = matrix_provider.matrix_for(&stops)?;
    if matrix.size() != stops.len() {
        return Err(PlanError::no_feasible_route(format!(
            "distance matrix covers {} stops, stop set has {}",
            matrix.size(),
            stops.len()
        )));
    }
    debug!(stops = stops.len(), "built distance model");

    let mut route = construct_route(&matrix, 0)?;
    debug!(length = route.length_unchecked(&matrix), "nearest-neighbour route constructed");

    if options.improve {
        route = improve_route(route, &matrix, options.pass_limit(stops.len()))?;
    }

    let result = RouteResult::assemble(&stops, route, &matrix)?;
    info!(
        depot = %stops.depot().id,
        stops = stops.len(),
        total_distance = result.total_distance,
        "route planned"
    );
    Ok(result)
}

/// Look up a salesperson's customers in `source` and plan a route over them.
pub fn plan_for_query<S>(source: &S, depot: Stop, query: &StopQuery, options: &SolveOptions) -> Result<RouteResult>
where
    S: StopSource + ?Sized,
{
    let customers = source.find_stops(query);
    debug!(
        vendor = %query.vendor_code,
        weekday = %query.weekday,
        district = %query.district,
        found = customers.len(),
        "looked up stops"
    );
    plan_route(depot, customers, options)
}

/// Plan independent requests in parallel. Results keep request order.
pub fn plan_routes(requests: Vec<RouteRequest>, options: &SolveOptions) -> Vec<Result<RouteResult>> {
    requests
        .into_par_iter()
        .map(|request| plan_route(request.depot, request.customers, options))
        .collect()
}

// ============================================================================
// Construction
// ============================================================================

/// Build a route by repeatedly moving to the nearest unvisited stop.
///
/// Ties go to the lowest stop index so identical input always yields the
/// identical route.
pub fn construct_route(matrix: &DistanceModel, start: usize) -> Result<Route> {
    let n = matrix.size();
    if start >= n {
        return Err(PlanError::no_feasible_route(format!(
            "start index {start} outside a {n}-stop model"
        )));
    }
    if let Some((i, j)) = matrix.first_non_finite() {
        return Err(PlanError::no_feasible_route(format!(
            "distance from stop {i} to stop {j} is not finite"
        )));
    }

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut order = Vec::with_capacity(n);
    order.push(start);
    let mut current = start;

    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let d = matrix.get(current, candidate);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((candidate, d)),
            }
        }

        let Some((next, _)) = best else {
            return Err(PlanError::no_feasible_route(format!(
                "no reachable stop after visiting {} of {n}",
                order.len()
            )));
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Ok(Route::from_indices_unchecked(order))
}

// ============================================================================
// Local Search
// ============================================================================

/// 2-opt over the closed tour with the depot pinned at position 0.
///
/// Each pass evaluates every segment reversal and applies the best strictly
/// improving one. Stops when a pass finds nothing or after `max_passes`.
/// The matrix must be symmetric, which [`DistanceModel::from_rows`] enforces.
pub fn improve_route(mut route: Route, matrix: &DistanceModel, max_passes: usize) -> Result<Route> {
    route.check_covers(matrix)?;
    let n = route.len();
    if n < 4 {
        // With two customers or fewer the only reversal flips the tour direction.
        return Ok(route);
    }

    let mut passes = 0;
    while passes < max_passes {
        passes += 1;
        let Some((i, j, delta)) = best_two_opt_move(route.indices(), matrix) else {
            break;
        };
        route.indices_mut()[i..=j].reverse();
        debug!(pass = passes, from = i, to = j, delta, "applied 2-opt move");
    }

    debug!(passes, length = route.length_unchecked(matrix), "2-opt finished");
    Ok(route)
}

/// Best improving reversal of `tour[i..=j]`, with `1 <= i < j < n`.
fn best_two_opt_move(tour: &[usize], matrix: &DistanceModel) -> Option<(usize, usize, f64)> {
    let n = tour.len();
    let mut best: Option<(usize, usize, f64)> = None;

    for i in 1..n - 1 {
        for j in i + 1..n {
            // Reversing everything after the depot only flips direction.
            if i == 1 && j == n - 1 {
                continue;
            }
            let delta = two_opt_delta(tour, matrix, i, j);
            let improves = delta < -IMPROVEMENT_EPSILON;
            let better = best.is_none_or(|(_, _, best_delta)| delta < best_delta);
            if improves && better {
                best = Some((i, j, delta));
            }
        }
    }

    best
}

/// Length change from reversing `tour[i..=j]` in the closed tour.
fn two_opt_delta(tour: &[usize], matrix: &DistanceModel, i: usize, j: usize) -> f64 {
    let a = tour[i - 1];
    let b = tour[i];
    let c = tour[j];
    let d = tour[(j + 1) % tour.len()];

    matrix.get(a, c) + matrix.get(b, d) - matrix.get(a, b) - matrix.get(c, d)
}
