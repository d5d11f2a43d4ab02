//! Planar geometry for the chart coordinate space.
//!
//! Chart coordinates are plain map units (pixels of the chart image), so every
//! distance here is Euclidean. No geodesy is involved.

use serde::{Deserialize, Serialize};

/// A position on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Mirror the point vertically on a chart of the given height.
    ///
    /// Charts authored with a top-left origin use this to match a
    /// bottom-left origin renderer (and back again).
    pub fn flip_y(self, height: f64) -> Self {
        Self {
            x: self.x,
            y: height - self.y,
        }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        distance(self, other)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// Euclidean distance between two chart points, in map units.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Total length of a polyline (sum of its segment lengths).
pub fn polyline_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(pair[0], pair[1]))
        .sum()
}

/// Shortest distance from `point` to the segment `a`-`b`.
pub fn point_to_segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg_x = b.x - a.x;
    let seg_y = b.y - a.y;
    let len2 = seg_x * seg_x + seg_y * seg_y;
    if len2 < f64::EPSILON {
        return distance(point, a);
    }

    let t = (((point.x - a.x) * seg_x + (point.y - a.y) * seg_y) / len2).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * seg_x, a.y + t * seg_y);
    distance(point, closest)
}

/// Width and height of the chart image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 2000.0,
        }
    }
}

impl MapBounds {
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}
