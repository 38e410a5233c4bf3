//! Route snapshot: polyline, guidance steps and trip totals.

use serde::{Deserialize, Serialize};

use crate::polyline::{LngLat, Polyline};

/// Maneuver announced at a guidance step.
///
/// Decoded from the routing service's numeric turn-type code. Codes this
/// crate does not name are kept as [`Maneuver::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum Maneuver {
    Straight,
    Left,
    Right,
    UTurn,
    /// 8 o'clock left.
    SharpLeft,
    /// 10 o'clock left.
    SlightLeft,
    /// 2 o'clock right.
    SlightRight,
    /// 4 o'clock right.
    SharpRight,
    KeepRight,
    KeepLeft,
    HighwayEntrance,
    HighwayExit,
    /// Roundabout exit at the given clock position (1..=12).
    Roundabout(u8),
    /// Intermediate waypoint (0 = generic, 1..=5 numbered).
    Waypoint(u8),
    Start,
    Arrive,
    Other(u16),
}

impl From<u16> for Maneuver {
    fn from(code: u16) -> Self {
        match code {
            11 | 51 => Maneuver::Straight,
            12 => Maneuver::Left,
            13 => Maneuver::Right,
            14 => Maneuver::UTurn,
            16 => Maneuver::SharpLeft,
            17 => Maneuver::SlightLeft,
            18 => Maneuver::SlightRight,
            19 => Maneuver::SharpRight,
            43 => Maneuver::KeepRight,
            44 => Maneuver::KeepLeft,
            101..=103 => Maneuver::HighwayEntrance,
            104..=106 => Maneuver::HighwayExit,
            131..=142 => Maneuver::Roundabout((code - 130) as u8),
            184 => Maneuver::Waypoint(0),
            185..=189 => Maneuver::Waypoint((code - 184) as u8),
            200 => Maneuver::Start,
            201 => Maneuver::Arrive,
            other => Maneuver::Other(other),
        }
    }
}

/// Canonical code for each maneuver.
///
/// Lossy: aliases collapse to one code (`51` to `11`, `101..=103` to `103`,
/// `104..=106` to `106`), and a `Roundabout` or `Waypoint` clock outside the
/// decoded range maps to a code that decodes as another variant.
impl From<Maneuver> for u16 {
    fn from(maneuver: Maneuver) -> Self {
        match maneuver {
            Maneuver::Straight => 11,
            Maneuver::Left => 12,
            Maneuver::Right => 13,
            Maneuver::UTurn => 14,
            Maneuver::SharpLeft => 16,
            Maneuver::SlightLeft => 17,
            Maneuver::SlightRight => 18,
            Maneuver::SharpRight => 19,
            Maneuver::KeepRight => 43,
            Maneuver::KeepLeft => 44,
            Maneuver::HighwayEntrance => 103,
            Maneuver::HighwayExit => 106,
            Maneuver::Roundabout(clock) => 130 + u16::from(clock),
            Maneuver::Waypoint(0) => 184,
            Maneuver::Waypoint(n) => 184 + u16::from(n),
            Maneuver::Start => 200,
            Maneuver::Arrive => 201,
            Maneuver::Other(code) => code,
        }
    }
}

impl Maneuver {
    pub fn is_arrival(self) -> bool {
        self == Maneuver::Arrive
    }

    /// Localized (Korean) instruction text.
    pub fn text(self) -> String {
        match self {
            Maneuver::Straight => "직진".to_string(),
            Maneuver::Left => "좌회전".to_string(),
            Maneuver::Right => "우회전".to_string(),
            Maneuver::UTurn => "유턴".to_string(),
            Maneuver::SharpLeft => "8시 방향 좌회전".to_string(),
            Maneuver::SlightLeft => "10시 방향 좌회전".to_string(),
            Maneuver::SlightRight => "2시 방향 우회전".to_string(),
            Maneuver::SharpRight => "4시 방향 우회전".to_string(),
            Maneuver::KeepRight => "오른쪽 방향".to_string(),
            Maneuver::KeepLeft => "왼쪽 방향".to_string(),
            Maneuver::HighwayEntrance => "고속도로 진입".to_string(),
            Maneuver::HighwayExit => "고속도로 출구".to_string(),
            Maneuver::Roundabout(clock) => format!("로터리 {}시 방향", clock),
            Maneuver::Waypoint(0) => "경유지".to_string(),
            Maneuver::Waypoint(n) => format!("경유지 {}", n),
            Maneuver::Start => "출발".to_string(),
            Maneuver::Arrive => "목적지 도착".to_string(),
            Maneuver::Other(_) => "안내".to_string(),
        }
    }
}

/// A point along the route where a maneuver is announced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceStep {
    pub position: LngLat,
    pub maneuver: Maneuver,
    pub description: Option<String>,
}

impl GuidanceStep {
    pub fn new(position: LngLat, maneuver: Maneuver) -> Self {
        Self {
            position,
            maneuver,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description if the service supplied one, else the maneuver text.
    pub fn instruction(&self) -> String {
        match &self.description {
            Some(text) if !text.trim().is_empty() => text.clone(),
            _ => self.maneuver.text(),
        }
    }
}

/// Trip totals reported by the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

impl TripSummary {
    /// Scales the trip duration by the remaining-distance ratio.
    ///
    /// Result lies in `[0, duration_s]`. `None` when either total is not
    /// positive.
    pub fn remaining_time(&self, remaining_distance_m: f64) -> Option<f64> {
        if self.distance_m <= 0.0 || self.duration_s <= 0.0 {
            return None;
        }
        let ratio = (remaining_distance_m / self.distance_m).clamp(0.0, 1.0);
        Some(self.duration_s * ratio)
    }
}

/// Free-function form of [`TripSummary::remaining_time`].
pub fn remaining_time(remaining_distance_m: f64, trip: &TripSummary) -> Option<f64> {
    trip.remaining_time(remaining_distance_m)
}

/// One fetched route. Treated as a read-only snapshot by the tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub polyline: Polyline,
    pub steps: Vec<GuidanceStep>,
    pub trip: Option<TripSummary>,
}

impl Route {
    pub fn new(polyline: Polyline, steps: Vec<GuidanceStep>, trip: Option<TripSummary>) -> Self {
        Self {
            polyline,
            steps,
            trip,
        }
    }

    /// Final polyline point, if any.
    pub fn destination(&self) -> Option<LngLat> {
        self.polyline.points().last().copied()
    }
}
