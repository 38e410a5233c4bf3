//! Simulated drive along a route polyline.
//!
//! Stands in for a GPS feed: emits one fix per tick, moving at a constant
//! speed along the polyline, and stops after the final point.

use crate::haversine::{bearing_deg, haversine_m};
use crate::polyline::{LngLat, Polyline};
use crate::traits::{PositionFeed, PositionFix};

#[derive(Debug, Clone)]
pub struct SimulatedDrive {
    points: Vec<LngLat>,
    /// Distance from the start to each point, in meters.
    cumulative: Vec<f64>,
    speed_ms: f64,
    tick_ms: u64,
    elapsed_ms: u64,
    finished: bool,
}

impl SimulatedDrive {
    pub fn new(polyline: &Polyline, speed_ms: f64, tick_ms: u64) -> Self {
        let points = polyline.points().to_vec();
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                total += haversine_m(points[i - 1], *point);
            }
            cumulative.push(total);
        }

        Self {
            points,
            cumulative,
            speed_ms,
            tick_ms,
            elapsed_ms: 0,
            finished: false,
        }
    }

    /// Position and travel heading `along` meters from the start.
    fn locate(&self, along: f64) -> (LngLat, Option<f64>) {
        if self.points.len() < 2 {
            return (self.points[0], None);
        }

        let last_segment = self.points.len() - 2;
        if along >= self.cumulative[last_segment + 1] {
            let end = self.points[last_segment + 1];
            return (end, Some(bearing_deg(self.points[last_segment], end)));
        }

        let segment = self
            .cumulative
            .iter()
            .rposition(|&d| d <= along)
            .unwrap_or(0)
            .min(last_segment);

        let a = self.points[segment];
        let b = self.points[segment + 1];
        let length = self.cumulative[segment + 1] - self.cumulative[segment];
        let t = if length > 0.0 {
            ((along - self.cumulative[segment]) / length).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let position = LngLat::new(a.lng + (b.lng - a.lng) * t, a.lat + (b.lat - a.lat) * t);
        (position, Some(bearing_deg(a, b)))
    }
}

impl PositionFeed for SimulatedDrive {
    fn next_fix(&mut self) -> Option<PositionFix> {
        if self.finished {
            return None;
        }
        let total = *self.cumulative.last()?;

        let along = (self.speed_ms.max(0.0) * self.elapsed_ms as f64 / 1000.0).min(total);
        let (position, heading) = self.locate(along);
        let fix = PositionFix {
            position,
            speed: Some(self.speed_ms),
            heading,
            timestamp_ms: self.elapsed_ms,
        };

        if along >= total || self.speed_ms <= 0.0 || self.tick_ms == 0 {
            self.finished = true;
        }
        self.elapsed_ms += self.tick_ms;
        Some(fix)
    }
}

impl Iterator for SimulatedDrive {
    type Item = PositionFix;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_fix()
    }
}
