//! Error types for the I/O seams (routing, geocoding, configuration).
//!
//! The tracker itself never fails; missing data just produces no output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Route response parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Routing service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Routing app key missing")]
    MissingAppKey,
    #[error("Route has no geometry")]
    EmptyRoute,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Geocode response parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Geocoding service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Geocode query is empty")]
    EmptyQuery,
    #[error("Geocoding credentials missing")]
    MissingCredentials,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
