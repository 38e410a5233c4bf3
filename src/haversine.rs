//! Haversine geometry and a straight-line route source (fallback when the
//! routing service is unavailable).
//!
//! Uses great-circle distance on a sphere of Earth's mean radius.
//! The fallback route ignores roads but is always available.

use crate::error::RouteError;
use crate::polyline::{LngLat, Polyline};
use crate::route::{GuidanceStep, Maneuver, Route, TripSummary};
use crate::traits::RouteSource;

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Maximum gap between fallback route points. Kept well under the default
/// 50 m deviation threshold, which is measured to the nearest point.
const DEFAULT_SPACING_M: f64 = 25.0;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters.
pub fn haversine_m(from: LngLat, to: LngLat) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial bearing from `from` to `to` in degrees, 0 = north, [0, 360).
pub fn bearing_deg(from: LngLat, to: LngLat) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Wraps any angle in degrees into [0, 360).
pub fn normalize_bearing(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Straight-line route source.
///
/// Produces a straight line with a start and an arrive step, and estimates
/// duration from the line length and an assumed speed. The line is split
/// into points at most `spacing_m` apart so a vehicle driving along it is
/// never further than half that from a point.
#[derive(Debug, Clone)]
pub struct HaversineRoute {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
    /// Maximum distance between consecutive points. Non-positive disables
    /// densification.
    pub spacing_m: f64,
}

impl Default for HaversineRoute {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            spacing_m: DEFAULT_SPACING_M,
        }
    }
}

impl HaversineRoute {
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            ..Self::default()
        }
    }

    pub fn with_spacing(mut self, spacing_m: f64) -> Self {
        self.spacing_m = spacing_m;
        self
    }

    fn line(&self, origin: LngLat, destination: LngLat) -> Polyline {
        let distance_m = haversine_m(origin, destination);
        let sections = if self.spacing_m > 0.0 {
            ((distance_m / self.spacing_m).ceil() as usize).max(1)
        } else {
            1
        };

        let mut points: Vec<LngLat> = (0..sections)
            .map(|i| {
                let t = i as f64 / sections as f64;
                LngLat::new(
                    origin.lng + (destination.lng - origin.lng) * t,
                    origin.lat + (destination.lat - origin.lat) * t,
                )
            })
            .collect();
        points.push(destination);
        Polyline::new(points)
    }

    /// Convert distance in meters to travel time in seconds.
    fn meters_to_seconds(&self, meters: f64) -> f64 {
        if self.speed_kmh <= 0.0 {
            return 0.0;
        }
        let hours = meters / 1000.0 / self.speed_kmh;
        (hours * 3600.0).round()
    }
}

impl RouteSource for HaversineRoute {
    fn fetch_route(&self, origin: LngLat, destination: LngLat) -> Result<Route, RouteError> {
        let polyline = self.line(origin, destination);
        let distance_m = polyline.length_m();
        let trip = TripSummary {
            distance_m,
            duration_s: self.meters_to_seconds(distance_m),
        };

        Ok(Route::new(
            polyline,
            vec![
                GuidanceStep::new(origin, Maneuver::Start),
                GuidanceStep::new(destination, Maneuver::Arrive),
            ],
            Some(trip),
        ))
    }
}
