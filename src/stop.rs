//! Stops and the depot-anchored stop set a route is planned over.

use serde::{Deserialize, Serialize};

use crate::error::{CoordinateIssue, PlanError, Result};

/// Label given to the depot stop built by [`Stop::depot`].
pub const DEPOT_LABEL: &str = "Vendedor";

/// A single location to visit (or start from).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Stop {
    pub fn new(id: impl Into<String>, label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            latitude,
            longitude,
        }
    }

    /// The salesperson's current position, labelled as the depot.
    pub fn depot(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::new(id, DEPOT_LABEL, latitude, longitude)
    }

    /// Location as a (latitude, longitude) pair.
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Check the coordinate is finite and within geographic bounds.
    pub fn coordinate_issue(&self) -> Option<CoordinateIssue> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Some(CoordinateIssue::NotFinite);
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Some(CoordinateIssue::OutOfRange);
        }
        None
    }
}

/// Ordered stops with the depot fixed at index 0.
///
/// Every stop has passed coordinate validation, so distance providers can
/// rely on finite, in-range coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct StopSet {
    stops: Vec<Stop>,
}

impl StopSet {
    /// Build a stop set from the depot and its customers.
    ///
    /// An empty customer list is allowed here (a depot-only set is a valid
    /// degenerate input); the planning entry point is what reports "no
    /// matching stops".
    pub fn new(depot: Stop, customers: Vec<Stop>) -> Result<Self> {
        let mut stops = Vec::with_capacity(customers.len() + 1);
        stops.push(depot);
        stops.extend(customers);

        for (index, stop) in stops.iter().enumerate() {
            if let Some(issue) = stop.coordinate_issue() {
                return Err(PlanError::InvalidStop {
                    index,
                    id: stop.id.clone(),
                    issue,
                });
            }
        }

        Ok(Self { stops })
    }

    pub fn depot(&self) -> &Stop {
        &self.stops[0]
    }

    /// Customer stops, in input order.
    pub fn customers(&self) -> &[Stop] {
        &self.stops[1..]
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: the depot is always present.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn locations(&self) -> Vec<(f64, f64)> {
        self.stops.iter().map(Stop::location).collect()
    }
}
