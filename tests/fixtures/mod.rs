//! Test fixtures for route-planner.
//!
//! Provides realistic test data: approximate Lima, Peru locations for
//! intra-city routing, grouped by district.

pub mod lima_locations;

pub use lima_locations::*;
