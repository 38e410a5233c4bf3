//! Polyline representation for route geometries.
//!
//! A route polyline is an ordered sequence of (longitude, latitude) points
//! in travel order. It is immutable once loaded; a new route replaces it
//! wholesale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_m;

/// A WGS84 coordinate in degrees, longitude first (GeoJSON order).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.lng, self.lat)
    }
}

/// The polyline point closest to a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    pub index: usize,
    /// Great-circle distance from the position to the point, in meters.
    pub distance_m: f64,
}

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<LngLat>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<LngLat>) -> Self {
        Self { points }
    }

    /// Concatenates line segments in order into one polyline.
    ///
    /// Routing services split the geometry into one line per road section,
    /// so the end of one segment usually repeats as the start of the next.
    /// The duplicate is kept; it adds zero length.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Vec<LngLat>>,
    {
        Self {
            points: segments.into_iter().flatten().collect(),
        }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[LngLat] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<LngLat> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length in meters.
    pub fn length_m(&self) -> f64 {
        self.remaining_distance(0)
    }

    /// Finds the polyline point nearest to `position`.
    ///
    /// Plain linear scan; route polylines are at most a few hundred points.
    /// The lowest index wins when several points are equidistant. Returns
    /// `None` for an empty polyline.
    pub fn nearest_point(&self, position: LngLat) -> Option<NearestPoint> {
        let mut best: Option<NearestPoint> = None;
        for (index, point) in self.points.iter().enumerate() {
            let distance_m = haversine_m(position, *point);
            let closer = match best {
                Some(prev) => distance_m < prev.distance_m,
                None => true,
            };
            if closer {
                best = Some(NearestPoint { index, distance_m });
            }
        }
        best
    }

    /// Length of the polyline suffix starting at `index`, in meters.
    ///
    /// The vehicle's offset from the nearest point is not projected onto the
    /// next segment. Zero at the last index and past the end.
    pub fn remaining_distance(&self, index: usize) -> f64 {
        self.points
            .get(index..)
            .unwrap_or_default()
            .windows(2)
            .map(|pair| haversine_m(pair[0], pair[1]))
            .sum()
    }
}

/// Free-function form of [`Polyline::nearest_point`].
pub fn locate_nearest_point(position: LngLat, polyline: &Polyline) -> Option<NearestPoint> {
    polyline.nearest_point(position)
}

/// Free-function form of [`Polyline::remaining_distance`].
pub fn remaining_distance(nearest_index: usize, polyline: &Polyline) -> f64 {
    polyline.remaining_distance(nearest_index)
}
