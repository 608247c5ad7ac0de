//! Seams between the planning core and its collaborators.
//!
//! The core only needs a distance table and a list of stops; where the stops
//! come from and how distances are measured are supplied by implementations
//! of these traits.

use crate::error::Result;
use crate::matrix::DistanceModel;
use crate::records::Weekday;
use crate::stop::{Stop, StopSet};

/// Provides a distance matrix for a stop set.
///
/// The matrix is indexed by stop set position, depot at 0.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, stops: &StopSet) -> Result<DistanceModel>;
}

/// Filter used to look up a salesperson's customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopQuery {
    pub vendor_code: String,
    pub weekday: Weekday,
    pub district: String,
}

impl StopQuery {
    pub fn new(vendor_code: impl Into<String>, weekday: Weekday, district: impl Into<String>) -> Self {
        Self {
            vendor_code: vendor_code.into(),
            weekday,
            district: district.into(),
        }
    }

    /// Query for the weekday `date` falls on.
    pub fn for_date(vendor_code: impl Into<String>, date: time::Date, district: impl Into<String>) -> Self {
        Self::new(vendor_code, Weekday::from_date(date), district)
    }
}

/// Opaque source of customer stops for a query.
///
/// Implementations decide how records are stored and filtered; every stop
/// returned should carry an identifier, a display label and a coordinate.
pub trait StopSource {
    fn find_stops(&self, query: &StopQuery) -> Vec<Stop>;
}
