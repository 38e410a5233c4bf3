//! Test fixtures for hud-route.
//!
//! Provides realistic test data including:
//! - Downtown Seoul landmarks
//! - A densified multi-turn route with guidance steps
//! - A canned routing-service response for that route

pub mod seoul_route;

#[allow(unused_imports)]
pub use seoul_route::*;
