//! route-planner core
//!
//! Plans a single salesperson's visiting order over a set of customer stops:
//! a planar distance model, nearest-neighbour construction from the depot and
//! a bounded 2-opt improvement pass.

pub mod error;
pub mod haversine;
pub mod matrix;
pub mod polyline;
pub mod records;
pub mod route;
pub mod solver;
pub mod stop;
pub mod traits;

pub use error::{CoordinateIssue, PlanError, RecordError, Result};
pub use route::{Route, RouteResult};
pub use solver::{Metric, RouteRequest, SolveOptions, plan_for_query, plan_route, plan_route_with, plan_routes};
pub use stop::{Stop, StopSet};
