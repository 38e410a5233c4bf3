//! hud-route core
//!
//! Route-progress tracking for a driving HUD: nearest point on the route,
//! remaining distance/time, turn-by-turn text and off-route detection.

pub mod config;
pub mod error;
pub mod format;
pub mod geocode;
pub mod haversine;
pub mod polyline;
pub mod route;
pub mod session;
pub mod simulate;
pub mod tmap;
pub mod tracker;
pub mod traits;
pub mod view;
