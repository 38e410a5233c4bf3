//! Interfaces to the tracker's collaborators.
//!
//! These are intentionally narrow. The routing and geocoding services, the
//! device position source and the display are all external; concrete apps
//! implement these traits for them.

use serde::{Deserialize, Serialize};

use crate::error::{GeocodeError, RouteError};
use crate::format::HudText;
use crate::polyline::LngLat;
use crate::route::Route;

/// A single vehicle fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub position: LngLat,
    /// Ground speed in m/s. Absent is treated as 0.
    pub speed: Option<f64>,
    /// Heading in degrees, 0 = north.
    pub heading: Option<f64>,
    /// Fix time in milliseconds (any monotonic epoch).
    pub timestamp_ms: u64,
}

impl PositionFix {
    pub fn new(position: LngLat, timestamp_ms: u64) -> Self {
        Self {
            position,
            speed: None,
            heading: None,
            timestamp_ms,
        }
    }
}

/// Supplies one route per request.
pub trait RouteSource {
    fn fetch_route(&self, origin: LngLat, destination: LngLat) -> Result<Route, RouteError>;
}

impl<S: RouteSource + ?Sized> RouteSource for &S {
    fn fetch_route(&self, origin: LngLat, destination: LngLat) -> Result<Route, RouteError> {
        (**self).fetch_route(origin, destination)
    }
}

impl<S: RouteSource + ?Sized> RouteSource for Box<S> {
    fn fetch_route(&self, origin: LngLat, destination: LngLat) -> Result<Route, RouteError> {
        (**self).fetch_route(origin, destination)
    }
}

/// Supplies vehicle fixes in arrival order.
///
/// `None` means the feed has stopped; callers stop pulling.
pub trait PositionFeed {
    fn next_fix(&mut self) -> Option<PositionFix>;
}

/// Receives HUD text for display.
pub trait Presenter {
    fn present(&mut self, hud: &HudText);
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub label: String,
    pub position: LngLat,
}

/// Resolves a free-text query into candidate places.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Vec<Place>, GeocodeError>;
}
