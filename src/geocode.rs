//! Naver geocoding adapter for destination search.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::GeocodeError;
use crate::polyline::LngLat;
use crate::traits::{Geocoder, Place};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NaverConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NaverConfig {
    fn default() -> Self {
        Self {
            base_url: "https://naveropenapi.apigw.ntruss.com".to_string(),
            client_id: None,
            client_secret: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NaverGeocoder {
    config: NaverConfig,
    client: reqwest::blocking::Client,
}

impl NaverGeocoder {
    pub fn new(config: NaverConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NaverGeocoder {
    fn geocode(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        let (Some(id), Some(secret)) = (
            self.config.client_id.as_deref().filter(|s| !s.is_empty()),
            self.config.client_secret.as_deref().filter(|s| !s.is_empty()),
        ) else {
            return Err(GeocodeError::MissingCredentials);
        };

        let url = format!(
            "{}/map-geocode/v2/geocode",
            self.config.base_url.trim_end_matches('/')
        );
        debug!(query, "geocoding");

        let response = self
            .client
            .get(url)
            .query(&[("query", query)])
            .header("X-NCP-APIGW-API-KEY-ID", id)
            .header("X-NCP-APIGW-API-KEY", secret)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "geocode request failed");
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_geocode_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct NaverGeocodeResponse {
    #[serde(default)]
    addresses: Vec<NaverAddress>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NaverAddress {
    #[serde(default)]
    road_address: String,
    #[serde(default)]
    jibun_address: String,
    x: String,
    y: String,
}

/// Decodes a geocode response. Addresses whose coordinates do not parse
/// are skipped.
pub fn parse_geocode_response(body: &str) -> Result<Vec<Place>, GeocodeError> {
    let response: NaverGeocodeResponse = serde_json::from_str(body)?;

    let places = response
        .addresses
        .into_iter()
        .filter_map(|address| {
            let lng = address.x.parse::<f64>().ok()?;
            let lat = address.y.parse::<f64>().ok()?;
            let label = if address.road_address.is_empty() {
                address.jibun_address
            } else {
                address.road_address
            };
            Some(Place {
                label,
                position: LngLat::new(lng, lat),
            })
        })
        .collect();

    Ok(places)
}
