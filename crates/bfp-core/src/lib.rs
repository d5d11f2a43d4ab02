//! Waypoint routing for the Brick Rigs flight planner.
//!
//! Airports are snapped to their nearest waypoint, waypoints are joined by a
//! shortest-path search over a static chart graph, and the result is turned
//! into a `DCT` route string, a drawable polyline and a transit-time estimate.

pub mod chart;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod plan;
pub mod planner;
pub mod route;
pub mod search;

pub use chart::{Airport, AtcZone, Chart, ChartConfig};
pub use error::{ChartError, RouteError};
pub use geometry::{distance, MapBounds, Point};
pub use graph::{GraphIssue, WaypointGraph, WaypointNode};
pub use plan::{AtcStrip, FlightPlanDocument, LoadSheet};
pub use planner::RoutePlanner;
pub use route::{
    assemble, Clock, EtaEstimate, FixedClock, Performance, RouteDescription, SystemClock,
};
pub use search::{nearest, nearest_with_distance, shortest_path, Path};
