//! HUD text formatting.

use serde::Serialize;

use crate::haversine::normalize_bearing;
use crate::tracker::TrackerOutput;

/// `"<n> m"` below one kilometer, `"<x.y> km"` from there on.
pub fn format_distance(meters: f64) -> String {
    let rounded = meters.max(0.0).round();
    if rounded >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.0} m", rounded)
    }
}

/// Hours/minutes/seconds in Korean, dropping zero-valued leading units.
///
/// `0 -> "0초"`, `61 -> "1분 1초"`, `3661 -> "1시간 1분 1초"`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}시간 {}분 {}초", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}분 {}초", minutes, secs)
    } else {
        format!("{}초", secs)
    }
}

/// m/s to a rounded `"<n> km/h"` label. Absent speed reads as 0.
pub fn format_speed(speed_ms: Option<f64>) -> String {
    let kmh = (speed_ms.unwrap_or(0.0) * 3.6).round() as i64;
    format!("{} km/h", kmh)
}

/// Heading label in [0, 360). Absent heading reads as 0.
pub fn format_heading(heading: Option<f64>) -> String {
    let deg = normalize_bearing(heading.unwrap_or(0.0)).round() as i64 % 360;
    format!("{}°", deg)
}

/// Text handed to the presenter for one fix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HudText {
    pub next_turn: Option<String>,
    pub remaining_distance: Option<String>,
    pub remaining_time: Option<String>,
    pub off_route: bool,
}

impl From<&TrackerOutput> for HudText {
    fn from(output: &TrackerOutput) -> Self {
        Self {
            next_turn: output.turn.as_ref().map(|turn| turn.label.to_string()),
            remaining_distance: output
                .progress
                .map(|p| format_distance(p.remaining_distance_m)),
            remaining_time: output
                .progress
                .and_then(|p| p.remaining_time_s)
                .map(format_duration),
            off_route: output.off_route,
        }
    }
}
