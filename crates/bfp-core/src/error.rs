//! Error types for chart loading and routing.

use thiserror::Error;

/// Failures of a single routing request.
///
/// All of these are local and recoverable; the caller decides how to surface them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("unknown waypoint: {0}")]
    UnknownNode(String),
    #[error("chart defines no waypoints")]
    NoNodesDefined,
    #[error("no route found from {from} to {to}")]
    NoRouteFound { from: String, to: String },
    #[error("unknown airport: {0}")]
    UnknownAirport(String),
    #[error(
        "nearest waypoint to {airport} is {waypoint} at {distance:.1} units (limit {limit:.1})"
    )]
    SnapTooFar {
        airport: String,
        waypoint: String,
        distance: f64,
        limit: f64,
    },
}

/// Problems found while building a chart from configuration.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to read chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse chart: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("waypoint {0} is defined more than once")]
    DuplicateNode(String),
    #[error("airport {0} is defined more than once")]
    DuplicateAirport(String),
    #[error("invalid airport code {0:?}: expected 4 letters")]
    InvalidAirportCode(String),
    #[error("invalid coordinates for {0}")]
    InvalidCoordinates(String),
    #[error("zone {zone} references unknown airport {airport}")]
    UnknownZoneAirport { zone: String, airport: String },
    #[error("invalid performance setting {name}: {value}")]
    InvalidPerformance { name: &'static str, value: f64 },
}
