//! Tmap HTTP adapter for car routes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RouteError;
use crate::polyline::{LngLat, Polyline};
use crate::route::{GuidanceStep, Maneuver, Route, TripSummary};
use crate::traits::RouteSource;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmapConfig {
    pub base_url: String,
    pub app_key: Option<String>,
    /// 0 = fastest, 1 = free roads, 2 = shortest, 4 = prefer highways.
    pub search_option: String,
    pub traffic_info: bool,
    pub timeout_secs: u64,
}

impl Default for TmapConfig {
    fn default() -> Self {
        Self {
            base_url: "https://apis.openapi.sk.com".to_string(),
            app_key: None,
            search_option: "0".to_string(),
            traffic_info: true,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TmapClient {
    config: TmapConfig,
    client: reqwest::blocking::Client,
}

impl TmapClient {
    pub fn new(config: TmapConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn request_body(&self, origin: LngLat, destination: LngLat) -> TmapRouteRequest {
        TmapRouteRequest {
            start_x: format!("{:.7}", origin.lng),
            start_y: format!("{:.7}", origin.lat),
            end_x: format!("{:.7}", destination.lng),
            end_y: format!("{:.7}", destination.lat),
            req_coord_type: "WGS84GEO",
            res_coord_type: "WGS84GEO",
            search_option: self.config.search_option.clone(),
            traffic_info: if self.config.traffic_info { "Y" } else { "N" },
        }
    }
}

impl RouteSource for TmapClient {
    fn fetch_route(&self, origin: LngLat, destination: LngLat) -> Result<Route, RouteError> {
        let app_key = self
            .config
            .app_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(RouteError::MissingAppKey)?;

        let url = format!(
            "{}/tmap/routes?version=1&format=json",
            self.config.base_url.trim_end_matches('/')
        );
        debug!(%origin, %destination, "requesting route");

        let response = self
            .client
            .post(url)
            .header("appKey", app_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&self.request_body(origin, destination))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "route request failed");
            return Err(RouteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_route_response(&body)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TmapRouteRequest {
    start_x: String,
    start_y: String,
    end_x: String,
    end_y: String,
    req_coord_type: &'static str,
    res_coord_type: &'static str,
    search_option: String,
    traffic_info: &'static str,
}

#[derive(Debug, Deserialize)]
struct TmapRouteResponse {
    #[serde(default)]
    features: Vec<TmapFeature>,
}

#[derive(Debug, Deserialize)]
struct TmapFeature {
    geometry: TmapGeometry,
    #[serde(default)]
    properties: TmapProperties,
}

#[derive(Debug, Deserialize)]
struct TmapGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TmapProperties {
    total_distance: Option<f64>,
    total_time: Option<f64>,
    turn_type: Option<u16>,
    description: Option<String>,
    name: Option<String>,
}

/// Decodes a Tmap route response (a GeoJSON feature collection).
///
/// Line geometries are concatenated in order into the polyline. Point
/// features carrying a turn type become guidance steps. Trip totals come
/// from the first feature that has them.
pub fn parse_route_response(body: &str) -> Result<Route, RouteError> {
    let response: TmapRouteResponse = serde_json::from_str(body)?;

    let mut segments: Vec<Vec<LngLat>> = Vec::new();
    let mut steps = Vec::new();
    let mut trip = None;

    for feature in response.features {
        let props = feature.properties;
        if trip.is_none() {
            if let (Some(distance_m), Some(duration_s)) = (props.total_distance, props.total_time) {
                trip = Some(TripSummary {
                    distance_m,
                    duration_s,
                });
            }
        }

        match feature.geometry.kind.as_str() {
            "LineString" => {
                let coords: Vec<[f64; 2]> = serde_json::from_value(feature.geometry.coordinates)?;
                segments.push(coords.into_iter().map(LngLat::from).collect());
            }
            "Point" => {
                let Some(turn_type) = props.turn_type else {
                    continue;
                };
                let coords: [f64; 2] = serde_json::from_value(feature.geometry.coordinates)?;
                let description = props
                    .description
                    .filter(|text| !text.trim().is_empty())
                    .or(props.name.filter(|text| !text.trim().is_empty()));
                steps.push(GuidanceStep {
                    position: LngLat::from(coords),
                    maneuver: Maneuver::from(turn_type),
                    description,
                });
            }
            _ => {}
        }
    }

    let polyline = Polyline::from_segments(segments);
    if polyline.is_empty() {
        return Err(RouteError::EmptyRoute);
    }

    Ok(Route::new(polyline, steps, trip))
}
