//! # Geographic helpers
//!
//! Points use the `geo` convention: `x` is longitude and `y` is latitude.

use geo::{Coord, Destination, Distance, Haversine, Point};

/// Downtown Toronto (Yonge and Queen), used when no location is supplied.
pub const TORONTO_CENTER: Point = Point(Coord {
    x: -79.3832,
    y: 43.6532,
});

/// A latitude/longitude rectangle that lookups are restricted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceArea {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl ServiceArea {
    /// The greater Toronto area (approximate).
    pub const TORONTO: ServiceArea = ServiceArea {
        min_lat: 43.0,
        max_lat: 44.0,
        min_lon: -80.0,
        max_lon: -79.0,
    };

    /// Whether the point lies inside the area (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.y())
            && (self.min_lon..=self.max_lon).contains(&point.x())
    }
}

/// Great-circle distance between two points, in meters.
pub fn distance_meters(a: Point, b: Point) -> f64 {
    Haversine.distance(a, b)
}

/// Formats a distance for display: whole meters under a kilometer, else tenths of a kilometer.
pub fn format_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{meters:.0}m")
    } else {
        format!("{:.1}km", meters / 1_000.0)
    }
}

/// A bounding box, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Returns a bounding box centered upon `center` containing a circle with radius `radius` meters.
    pub fn around(center: Point, radius: f64) -> Self {
        // Per https://github.com/georust/geo/pull/1091/,
        // the longitude values are normalized to [-180, 180].
        Self {
            north: Haversine.destination(center, 0.0, radius).y(),
            east: Haversine.destination(center, 90.0, radius).x(),
            south: Haversine.destination(center, 180.0, radius).y(),
            west: Haversine.destination(center, 270.0, radius).x(),
        }
    }

    /// Cheap containment test used to skip exact distance checks.
    ///
    /// Does NOT account for the antimeridian (not a concern for a single city).
    pub fn contains(&self, point: Point) -> bool {
        (self.south..=self.north).contains(&point.y())
            && (self.west..=self.east).contains(&point.x())
    }
}
