//! Error types for route planning and record loading.

use thiserror::Error;

/// Why a stop's coordinate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateIssue {
    /// Latitude or longitude is NaN or infinite (including a missing value).
    NotFinite,
    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    OutOfRange,
}

impl std::fmt::Display for CoordinateIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateIssue::NotFinite => write!(f, "coordinate is missing or not finite"),
            CoordinateIssue::OutOfRange => write!(f, "coordinate is out of range"),
        }
    }
}

/// Errors returned by the planning pipeline.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    /// A stop (the depot included) has an unusable coordinate.
    #[error("invalid stop {id:?} at position {index}: {issue}")]
    InvalidStop {
        index: usize,
        id: String,
        issue: CoordinateIssue,
    },
    /// The filtered stop list was empty.
    #[error("no matching stops")]
    EmptyResult,
    /// The distance model cannot produce a tour over every stop.
    #[error("no feasible route: {0}")]
    NoFeasibleRoute(String),
}

impl PlanError {
    pub fn no_feasible_route(message: impl Into<String>) -> Self {
        Self::NoFeasibleRoute(message.into())
    }
}

/// Errors returned while loading customer records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed customer record: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
