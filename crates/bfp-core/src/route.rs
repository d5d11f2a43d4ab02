//! Route assembly and transit-time estimation.

use crate::chart::Airport;
use crate::error::RouteError;
use crate::geometry::{polyline_length, Point};
use crate::graph::WaypointGraph;
use crate::search::Path;
use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};

/// Token placed before every fix in a route string.
pub const DIRECT_TO: &str = "DCT";

/// Scale and speed used to turn map distance into flight time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    /// Real-world kilometres represented by one map unit.
    pub km_per_unit: f64,
    /// Assumed cruise speed.
    pub cruise_speed_kmh: f64,
    /// Reject airport-to-waypoint snaps longer than this (map units).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_snap_distance: Option<f64>,
}

impl Default for Performance {
    fn default() -> Self {
        Self {
            km_per_unit: 0.1,
            cruise_speed_kmh: 278.0,
            max_snap_distance: None,
        }
    }
}

impl Performance {
    pub fn estimate(&self, distance_units: f64) -> EtaEstimate {
        let distance_km = distance_units * self.km_per_unit;
        let raw_minutes = distance_km / self.cruise_speed_kmh * 60.0;
        EtaEstimate {
            distance_km,
            raw_minutes,
            // Round up so the estimate never under-promises.
            minutes: raw_minutes.max(0.0).ceil() as u32,
        }
    }
}

/// Estimated transit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtaEstimate {
    pub distance_km: f64,
    /// Minutes before rounding.
    pub raw_minutes: f64,
    /// Whole minutes, rounded up.
    pub minutes: u32,
}

impl EtaEstimate {
    /// Flight-plan "total time" text, e.g. `"101 min"`.
    pub fn total_time(&self) -> String {
        format!("{} min", self.minutes)
    }
}

/// Source of the pin time stamped onto assembled routes.
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Always reports the same time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Format a time as a pin time (`HH:MM`).
pub fn format_pin_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// A planned route between two airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDescription {
    pub departure: String,
    pub arrival: String,
    pub path: Path,
    /// `DCT <dep> DCT <wp> ... DCT <arr>`
    pub route: String,
    /// Departure point, every waypoint, arrival point.
    pub polyline: Vec<Point>,
    /// Total polyline length in map units.
    pub distance: f64,
    pub eta: EtaEstimate,
    /// `HH:MM` at assembly time.
    pub pin_time: String,
    /// ATC zones the polyline passes through.
    #[serde(default)]
    pub zones: Vec<String>,
}

/// Build the route string for a departure, waypoint path and arrival.
pub fn route_string(departure: &str, path: &Path, arrival: &str) -> String {
    std::iter::once(departure)
        .chain(path.nodes.iter().map(String::as_str))
        .chain(std::iter::once(arrival))
        .map(|fix| format!("{DIRECT_TO} {fix}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combine endpoints and a waypoint path into a route description.
pub fn assemble(
    graph: &WaypointGraph,
    departure: &Airport,
    path: &Path,
    arrival: &Airport,
    performance: &Performance,
    clock: &dyn Clock,
) -> Result<RouteDescription, RouteError> {
    let mut polyline = Vec::with_capacity(path.len() + 2);
    polyline.push(departure.position);
    for id in &path.nodes {
        polyline.push(graph.position(id)?);
    }
    polyline.push(arrival.position);

    let distance = polyline_length(&polyline);
    let eta = performance.estimate(distance);

    Ok(RouteDescription {
        departure: departure.code.clone(),
        arrival: arrival.code.clone(),
        path: path.clone(),
        route: route_string(&departure.code, path, &arrival.code),
        polyline,
        distance,
        eta,
        pin_time: format_pin_time(clock.now()),
        zones: Vec::new(),
    })
}
