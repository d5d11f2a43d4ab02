//! Airport-to-airport route planning over a chart.

use crate::chart::{Airport, Chart};
use crate::error::RouteError;
use crate::route::{assemble, Clock, RouteDescription, SystemClock};
use crate::search::{nearest_with_distance, shortest_path};
use std::sync::Arc;

/// Plans routes on one immutable chart. Cheap to clone and safe to share
/// across threads.
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    chart: Arc<Chart>,
}

impl RoutePlanner {
    pub fn new(chart: Chart) -> Self {
        Self {
            chart: Arc::new(chart),
        }
    }

    pub fn from_shared(chart: Arc<Chart>) -> Self {
        Self { chart }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Plan a route stamped with the local wall-clock time.
    pub fn plan_at(&self, departure: &str, arrival: &str) -> Result<RouteDescription, RouteError> {
        self.plan(departure, arrival, &SystemClock)
    }

    /// Plan a route between two airport codes (case-insensitive).
    ///
    /// Each airport is snapped to its nearest waypoint, the waypoints are
    /// joined by the shortest path, and the result is assembled with the
    /// chart's performance constants.
    pub fn plan(
        &self,
        departure: &str,
        arrival: &str,
        clock: &dyn Clock,
    ) -> Result<RouteDescription, RouteError> {
        let dep = self.lookup(departure)?;
        let arr = self.lookup(arrival)?;

        let start = self.snap(dep)?;
        let end = self.snap(arr)?;

        let graph = self.chart.graph();
        let path = shortest_path(graph, start, end)?;

        let mut description = assemble(graph, dep, &path, arr, self.chart.performance(), clock)?;
        description.zones = self
            .chart
            .zones_along(&description.polyline)
            .into_iter()
            .map(|zone| zone.name.clone())
            .collect();

        tracing::info!(
            departure = %dep.code,
            arrival = %arr.code,
            waypoints = path.len(),
            minutes = description.eta.minutes,
            "route planned"
        );

        Ok(description)
    }

    fn lookup(&self, code: &str) -> Result<&Airport, RouteError> {
        self.chart
            .airport(code)
            .ok_or_else(|| RouteError::UnknownAirport(code.trim().to_ascii_uppercase()))
    }

    fn snap(&self, airport: &Airport) -> Result<&str, RouteError> {
        let (waypoint, distance) = nearest_with_distance(self.chart.graph(), airport.position)?;
        tracing::debug!(
            airport = %airport.code,
            waypoint,
            distance,
            "snapped airport to nearest waypoint"
        );

        if let Some(limit) = self.chart.performance().max_snap_distance {
            if distance > limit {
                return Err(RouteError::SnapTooFar {
                    airport: airport.code.clone(),
                    waypoint: waypoint.to_string(),
                    distance,
                    limit,
                });
            }
        }
        Ok(waypoint)
    }
}
