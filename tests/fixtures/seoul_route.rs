//! Downtown Seoul route fixture.
//!
//! City Hall east to Euljiro 1-ga, south one block, then east to the
//! destination. Points are densified so that no vertex is more than ~30 m
//! from any point on the line, like the geometry a routing service returns.

#![allow(dead_code)]

use hud_route::polyline::{LngLat, Polyline};
use hud_route::route::{GuidanceStep, Maneuver, Route, TripSummary};
use serde_json::{Value, json};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lng: f64,
    pub lat: f64,
}

impl Location {
    pub const fn new(name: &'static str, lng: f64, lat: f64) -> Self {
        Self { name, lng, lat }
    }

    pub fn lng_lat(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }
}

pub const CITY_HALL: Location = Location::new("Seoul City Hall", 126.9779692, 37.566535);
pub const EULJIRO_1GA: Location = Location::new("Euljiro 1-ga", 126.983, 37.565);
pub const MYEONGDONG_CORNER: Location = Location::new("Myeongdong corner", 126.983, 37.563);
pub const DESTINATION: Location = Location::new("Euljiro 3-ga", 126.990, 37.563);

/// Total trip time the routing service reports for this route.
pub const TRIP_DURATION_S: f64 = 420.0;

/// Corner points in travel order.
pub fn corners() -> Vec<LngLat> {
    vec![
        CITY_HALL.lng_lat(),
        EULJIRO_1GA.lng_lat(),
        MYEONGDONG_CORNER.lng_lat(),
        DESTINATION.lng_lat(),
    ]
}

/// Splits a straight section into pieces no longer than `max_step_deg`.
pub fn densify(from: LngLat, to: LngLat, max_step_deg: f64) -> Vec<LngLat> {
    let span = (to.lng - from.lng).abs().max((to.lat - from.lat).abs());
    let pieces = ((span / max_step_deg).ceil() as usize).max(1);
    (0..=pieces)
        .map(|i| {
            if i == 0 {
                from
            } else if i == pieces {
                to
            } else {
                let t = i as f64 / pieces as f64;
                LngLat::new(from.lng + (to.lng - from.lng) * t, from.lat + (to.lat - from.lat) * t)
            }
        })
        .collect()
}

/// One densified line per corner-to-corner section.
pub fn sections() -> Vec<Vec<LngLat>> {
    corners()
        .windows(2)
        .map(|pair| densify(pair[0], pair[1], 0.0005))
        .collect()
}

pub fn steps() -> Vec<GuidanceStep> {
    vec![
        GuidanceStep::new(CITY_HALL.lng_lat(), Maneuver::Start),
        GuidanceStep::new(EULJIRO_1GA.lng_lat(), Maneuver::Right).with_description("을지로입구역에서 우회전"),
        GuidanceStep::new(MYEONGDONG_CORNER.lng_lat(), Maneuver::Left),
        GuidanceStep::new(DESTINATION.lng_lat(), Maneuver::Arrive),
    ]
}

pub fn route() -> Route {
    let polyline = Polyline::from_segments(sections());
    let trip = TripSummary {
        distance_m: polyline.length_m(),
        duration_s: TRIP_DURATION_S,
    };
    Route::new(polyline, steps(), Some(trip))
}

/// The same route as a routing-service GeoJSON response.
pub fn tmap_response() -> String {
    let route = route();
    let total_distance = route.polyline.length_m().round();
    let step_codes: [u16; 4] = [200, 13, 12, 201];

    let mut features: Vec<Value> = Vec::new();
    for (i, section) in sections().iter().enumerate() {
        let step = &route.steps[i];
        let mut props = json!({
            "turnType": step_codes[i],
            "description": step.description.clone().unwrap_or_default(),
        });
        if i == 0 {
            props["totalDistance"] = json!(total_distance);
            props["totalTime"] = json!(TRIP_DURATION_S);
        }
        features.push(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [step.position.lng, step.position.lat]},
            "properties": props,
        }));

        let coords: Vec<[f64; 2]> = section.iter().map(|p| [p.lng, p.lat]).collect();
        features.push(json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": coords},
            "properties": {"index": i},
        }));
    }

    let arrive = &route.steps[3];
    features.push(json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [arrive.position.lng, arrive.position.lat]},
        "properties": {"turnType": step_codes[3], "description": "", "name": ""},
    }));

    json!({"type": "FeatureCollection", "features": features}).to_string()
}
