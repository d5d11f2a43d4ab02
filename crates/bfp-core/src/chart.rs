//! Chart configuration: airports, waypoints, adjacency and ATC zones.
//!
//! A [`Chart`] is built once from a [`ChartConfig`] and never mutated. Several
//! independent charts can coexist; nothing here is global.

use crate::error::ChartError;
use crate::geometry::{point_to_segment_distance, MapBounds, Point};
use crate::graph::{GraphIssue, WaypointGraph, WaypointNode};
use crate::route::Performance;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const BUILTIN_CHART: &str = include_str!("../charts/default.json");

/// An airport as written in a chart file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportConfig {
    pub code: String,
    pub coords: Point,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub metar: String,
    #[serde(default)]
    pub notams: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// An ATC zone as written in a chart file; centred on an airport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    pub airport: String,
    pub radius: f64,
}

/// Serialized form of a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub bounds: MapBounds,
    #[serde(default)]
    pub airports: Vec<AirportConfig>,
    /// Listed in order; the order decides nearest-waypoint ties.
    #[serde(default)]
    pub waypoints: Vec<WaypointNode>,
    #[serde(default)]
    pub graph: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
    #[serde(default)]
    pub performance: Performance,
}

/// An airport identified by its ICAO code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub position: Point,
    pub name: String,
    pub metar: String,
    pub notams: String,
    pub image: Option<String>,
}

impl Airport {
    pub fn new(code: impl Into<String>, position: Point) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            position,
            metar: String::new(),
            notams: String::new(),
            image: None,
        }
    }
}

/// A circular controlled zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtcZone {
    pub name: String,
    pub airport: String,
    pub center: Point,
    pub radius: f64,
}

impl AtcZone {
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance_to(point) <= self.radius
    }

    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        point_to_segment_distance(self.center, a, b) <= self.radius
    }
}

/// Validated, immutable chart.
#[derive(Debug, Clone)]
pub struct Chart {
    bounds: MapBounds,
    airports: Vec<Airport>,
    airport_index: HashMap<String, usize>,
    graph: WaypointGraph,
    zones: Vec<AtcZone>,
    performance: Performance,
}

impl Chart {
    /// The chart shipped with the crate.
    pub fn builtin() -> Result<Self, ChartError> {
        Self::from_json_str(BUILTIN_CHART)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        let config: ChartConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_config(config: ChartConfig) -> Result<Self, ChartError> {
        validate_performance(&config.performance)?;

        let mut airports = Vec::with_capacity(config.airports.len());
        let mut airport_index = HashMap::with_capacity(config.airports.len());
        for entry in config.airports {
            let code = normalize_code(&entry.code)?;
            if !entry.coords.is_finite() {
                return Err(ChartError::InvalidCoordinates(code));
            }
            if !config.bounds.contains(entry.coords) {
                tracing::warn!(airport = %code, "airport lies outside the chart bounds");
            }
            if airport_index.insert(code.clone(), airports.len()).is_some() {
                return Err(ChartError::DuplicateAirport(code));
            }
            airports.push(Airport {
                name: entry.name.unwrap_or_else(|| code.clone()),
                code,
                position: entry.coords,
                metar: entry.metar,
                notams: entry.notams,
                image: entry.image,
            });
        }

        let mut zones = Vec::with_capacity(config.zones.len());
        for zone in config.zones {
            let code = zone.airport.trim().to_ascii_uppercase();
            let Some(&idx) = airport_index.get(&code) else {
                return Err(ChartError::UnknownZoneAirport {
                    zone: zone.name,
                    airport: zone.airport,
                });
            };
            zones.push(AtcZone {
                name: zone.name,
                airport: code,
                center: airports[idx].position,
                radius: zone.radius.max(0.0),
            });
        }

        for node in &config.waypoints {
            if !config.bounds.contains(node.position) {
                tracing::warn!(waypoint = %node.id, "waypoint lies outside the chart bounds");
            }
        }
        let graph = WaypointGraph::new(config.waypoints, config.graph)?;
        for issue in graph.audit() {
            match issue {
                GraphIssue::UndefinedAdjacencyKey(_) => tracing::debug!("chart graph: {issue}"),
                _ => tracing::warn!("chart graph: {issue}"),
            }
        }

        tracing::debug!(
            airports = airports.len(),
            waypoints = graph.len(),
            zones = zones.len(),
            "chart loaded"
        );

        Ok(Self {
            bounds: config.bounds,
            airports,
            airport_index,
            graph,
            zones,
            performance: config.performance,
        })
    }

    /// Same chart with different performance constants.
    pub fn with_performance(mut self, performance: Performance) -> Result<Self, ChartError> {
        validate_performance(&performance)?;
        self.performance = performance;
        Ok(self)
    }

    /// Look up an airport by code, ignoring case and surrounding whitespace.
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        let code = code.trim().to_ascii_uppercase();
        self.airport_index.get(&code).map(|&idx| &self.airports[idx])
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn graph(&self) -> &WaypointGraph {
        &self.graph
    }

    pub fn zones(&self) -> &[AtcZone] {
        &self.zones
    }

    pub fn performance(&self) -> &Performance {
        &self.performance
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    /// Zones touched by any segment of `polyline`, in chart order.
    pub fn zones_along(&self, polyline: &[Point]) -> Vec<&AtcZone> {
        self.zones
            .iter()
            .filter(|zone| match polyline {
                [] => false,
                [single] => zone.contains(*single),
                _ => polyline
                    .windows(2)
                    .any(|pair| zone.intersects_segment(pair[0], pair[1])),
            })
            .collect()
    }
}

fn normalize_code(code: &str) -> Result<String, ChartError> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() == 4 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(ChartError::InvalidAirportCode(code))
    }
}

fn validate_performance(performance: &Performance) -> Result<(), ChartError> {
    let checks = [
        ("km_per_unit", performance.km_per_unit),
        ("cruise_speed_kmh", performance.cruise_speed_kmh),
    ];
    for (name, value) in checks {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidPerformance { name, value });
        }
    }
    if let Some(limit) = performance.max_snap_distance {
        if !limit.is_finite() || limit < 0.0 {
            return Err(ChartError::InvalidPerformance {
                name: "max_snap_distance",
                value: limit,
            });
        }
    }
    Ok(())
}
