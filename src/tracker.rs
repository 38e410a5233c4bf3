//! Route-progress tracker.
//!
//! Turns a raw vehicle fix into HUD data: nearest point on the route,
//! remaining distance and time, the next turn instruction, and an off-route
//! signal with a debounced re-route request.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::haversine::haversine_m;
use crate::polyline::{LngLat, NearestPoint};
use crate::route::{GuidanceStep, Route};
use crate::traits::PositionFix;

/// Distance from the route beyond which the vehicle counts as off-route.
pub const DEFAULT_DEVIATION_THRESHOLD_M: f64 = 50.0;

/// Below this distance to a step the turn is announced as imminent.
pub const DEFAULT_IMMINENT_TURN_M: f64 = 15.0;

const DEFAULT_REROUTE_COOLDOWN_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub deviation_threshold_m: f64,
    pub imminent_turn_m: f64,
    /// Minimum time between two re-route requests while no new route has
    /// been loaded.
    pub reroute_cooldown_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            deviation_threshold_m: DEFAULT_DEVIATION_THRESHOLD_M,
            imminent_turn_m: DEFAULT_IMMINENT_TURN_M,
            reroute_cooldown_ms: DEFAULT_REROUTE_COOLDOWN_MS,
        }
    }
}

/// Whether guidance output is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuidanceMode {
    #[default]
    Active,
    Paused,
}

impl GuidanceMode {
    pub fn toggled(self) -> Self {
        match self {
            GuidanceMode::Active => GuidanceMode::Paused,
            GuidanceMode::Paused => GuidanceMode::Active,
        }
    }
}

/// Result of searching the upcoming guidance steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepProgress {
    pub index: usize,
    pub distance_m: f64,
}

/// Finds the nearest guidance step at or after `current_index`.
///
/// The pointer never moves backwards: completed steps are not revisited.
/// Lowest index wins ties. `None` when no steps remain.
pub fn advance_step(position: LngLat, steps: &[GuidanceStep], current_index: usize) -> Option<StepProgress> {
    let mut best: Option<StepProgress> = None;
    for (index, step) in steps.iter().enumerate().skip(current_index) {
        let distance_m = haversine_m(position, step.position);
        if best.is_none_or(|prev| distance_m < prev.distance_m) {
            best = Some(StepProgress { index, distance_m });
        }
    }
    best
}

/// True when the vehicle is farther than `threshold_m` from the route.
pub fn check_deviation(nearest_distance_m: f64, threshold_m: f64) -> bool {
    nearest_distance_m > threshold_m
}

/// Next-turn text shown on the HUD.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnLabel {
    Arrive,
    /// Turn is imminent.
    Now(String),
    Ahead { distance_m: f64, instruction: String },
}

impl TurnLabel {
    pub fn for_step(step: &GuidanceStep, distance_m: f64, imminent_turn_m: f64) -> Self {
        if step.maneuver.is_arrival() {
            TurnLabel::Arrive
        } else if distance_m < imminent_turn_m {
            TurnLabel::Now(step.instruction())
        } else {
            TurnLabel::Ahead {
                distance_m,
                instruction: step.instruction(),
            }
        }
    }
}

impl fmt::Display for TurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnLabel::Arrive => write!(f, "목적지에 도착했습니다"),
            TurnLabel::Now(instruction) => write!(f, "지금 {}", instruction),
            TurnLabel::Ahead {
                distance_m,
                instruction,
            } => write!(f, "{:.0} m 앞 {}", distance_m, instruction),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub nearest: NearestPoint,
    pub remaining_distance_m: f64,
    /// Absent when the route has no usable trip totals.
    pub remaining_time_s: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnGuidance {
    pub step_index: usize,
    pub distance_m: f64,
    pub label: TurnLabel,
}

/// Everything one fix produces. Empty while paused or without a route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerOutput {
    pub progress: Option<Progress>,
    pub turn: Option<TurnGuidance>,
    pub off_route: bool,
    /// The caller should fetch a new route from the fix position.
    pub reroute: bool,
}

impl TrackerOutput {
    pub fn is_empty(&self) -> bool {
        self.progress.is_none() && self.turn.is_none() && !self.off_route
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    /// Monotonic pointer into the route's guidance steps.
    pub step_index: usize,
    pub last_fix: Option<PositionFix>,
    pub mode: GuidanceMode,
    /// Timestamp of the last re-route request not yet answered by a new route.
    pub reroute_requested_at: Option<u64>,
}

/// Owns the tracker state exclusively and reads the loaded route as a
/// snapshot.
#[derive(Debug, Clone, Default)]
pub struct RouteProgressTracker {
    config: TrackerConfig,
    route: Option<Route>,
    state: TrackerState,
}

impl RouteProgressTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            route: None,
            state: TrackerState::default(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn mode(&self) -> GuidanceMode {
        self.state.mode
    }

    /// Replaces the route and resets all state; guidance becomes active.
    pub fn load_route(&mut self, route: Route) {
        info!(
            points = route.polyline.len(),
            steps = route.steps.len(),
            "route loaded"
        );
        self.route = Some(route);
        self.state = TrackerState::default();
    }

    /// Drops the route. Later fixes produce no output.
    pub fn clear_route(&mut self) {
        self.route = None;
        self.state.step_index = 0;
        self.state.reroute_requested_at = None;
    }

    pub fn toggle_guidance(&mut self) -> GuidanceMode {
        self.state.mode = self.state.mode.toggled();
        info!(mode = ?self.state.mode, "guidance toggled");
        self.state.mode
    }

    /// Processes one fix. No side effects beyond the tracker's own state.
    pub fn on_position_update(&mut self, fix: &PositionFix) -> TrackerOutput {
        self.state.last_fix = Some(*fix);

        if self.state.mode == GuidanceMode::Paused {
            return TrackerOutput::default();
        }
        let Some(route) = self.route.as_ref() else {
            return TrackerOutput::default();
        };

        let mut output = TrackerOutput::default();

        if let Some(nearest) = route.polyline.nearest_point(fix.position) {
            let remaining_distance_m = route.polyline.remaining_distance(nearest.index);
            let remaining_time_s = route
                .trip
                .and_then(|trip| trip.remaining_time(remaining_distance_m));
            output.progress = Some(Progress {
                nearest,
                remaining_distance_m,
                remaining_time_s,
            });
            output.off_route = check_deviation(nearest.distance_m, self.config.deviation_threshold_m);
        }

        if let Some(step) = advance_step(fix.position, &route.steps, self.state.step_index) {
            if step.index != self.state.step_index {
                debug!(from = self.state.step_index, to = step.index, "guidance step advanced");
            }
            self.state.step_index = step.index;
            output.turn = Some(TurnGuidance {
                step_index: step.index,
                distance_m: step.distance_m,
                label: TurnLabel::for_step(&route.steps[step.index], step.distance_m, self.config.imminent_turn_m),
            });
        }

        if output.off_route && self.reroute_due(fix.timestamp_ms) {
            warn!(
                distance_m = output.progress.map(|p| p.nearest.distance_m),
                "off route, requesting new route"
            );
            self.state.reroute_requested_at = Some(fix.timestamp_ms);
            output.reroute = true;
        }

        debug!(
            remaining_m = output.progress.map(|p| p.remaining_distance_m),
            off_route = output.off_route,
            "position processed"
        );
        output
    }

    fn reroute_due(&self, now_ms: u64) -> bool {
        match self.state.reroute_requested_at {
            None => true,
            Some(requested) => now_ms.saturating_sub(requested) >= self.config.reroute_cooldown_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::Polyline;
    use crate::route::{Maneuver, TripSummary};

    fn sample_route() -> Route {
        Route::new(
            Polyline::new(vec![
                LngLat::new(127.000, 37.500),
                LngLat::new(127.010, 37.500),
                LngLat::new(127.020, 37.500),
            ]),
            vec![
                GuidanceStep::new(LngLat::new(127.00, 37.50), Maneuver::Straight),
                GuidanceStep::new(LngLat::new(127.02, 37.50), Maneuver::Arrive),
            ],
            Some(TripSummary {
                distance_m: 1765.0,
                duration_s: 300.0,
            }),
        )
    }

    fn fix(lng: f64, lat: f64, timestamp_ms: u64) -> PositionFix {
        PositionFix::new(LngLat::new(lng, lat), timestamp_ms)
    }

    #[test]
    fn test_advance_step_to_arrival() {
        let route = sample_route();
        let step = advance_step(LngLat::new(127.02, 37.50), &route.steps, 0).unwrap();
        assert_eq!(step.index, 1);
        assert_eq!(step.distance_m, 0.0);

        let label = TurnLabel::for_step(&route.steps[step.index], step.distance_m, DEFAULT_IMMINENT_TURN_M);
        assert_eq!(label, TurnLabel::Arrive);
        assert_eq!(label.to_string(), "목적지에 도착했습니다");
    }

    #[test]
    fn test_advance_step_never_goes_back() {
        let route = sample_route();
        // Standing on step 0 but the pointer is already at 1.
        let step = advance_step(LngLat::new(127.00, 37.50), &route.steps, 1).unwrap();
        assert_eq!(step.index, 1);
        assert!(advance_step(LngLat::new(127.00, 37.50), &route.steps, 2).is_none());
        assert!(advance_step(LngLat::new(127.00, 37.50), &[], 0).is_none());
    }

    #[test]
    fn test_turn_label_texts() {
        let left = GuidanceStep::new(LngLat::new(127.0, 37.5), Maneuver::Left);
        assert_eq!(TurnLabel::for_step(&left, 10.0, 15.0).to_string(), "지금 좌회전");
        assert_eq!(TurnLabel::for_step(&left, 120.4, 15.0).to_string(), "120 m 앞 좌회전");
        assert!(matches!(TurnLabel::for_step(&left, 15.0, 15.0), TurnLabel::Ahead { .. }));

        let described = left.clone().with_description("을지로 방면");
        assert_eq!(TurnLabel::for_step(&described, 300.0, 15.0).to_string(), "300 m 앞 을지로 방면");
    }

    #[test]
    fn test_check_deviation() {
        assert!(check_deviation(80.0, 50.0));
        assert!(!check_deviation(20.0, 50.0));
        assert!(!check_deviation(50.0, 50.0));
    }

    #[test]
    fn test_progress_at_start_and_end() {
        let mut tracker = RouteProgressTracker::default();
        let route = sample_route();
        let full = route.polyline.length_m();
        tracker.load_route(route);

        let start = tracker.on_position_update(&fix(127.000, 37.500, 0));
        let progress = start.progress.unwrap();
        assert_eq!(progress.nearest.index, 0);
        assert!((progress.remaining_distance_m - full).abs() < 1e-9);
        assert!((progress.remaining_time_s.unwrap() - 300.0).abs() < 1.0);
        assert!(!start.off_route);

        let end = tracker.on_position_update(&fix(127.020, 37.500, 1000));
        let progress = end.progress.unwrap();
        assert_eq!(progress.nearest.index, 2);
        assert_eq!(progress.remaining_distance_m, 0.0);
        assert_eq!(progress.remaining_time_s, Some(0.0));
        assert_eq!(end.turn.unwrap().label, TurnLabel::Arrive);
    }

    #[test]
    fn test_paused_suppresses_output_and_keeps_step() {
        let mut tracker = RouteProgressTracker::default();
        tracker.load_route(sample_route());
        tracker.on_position_update(&fix(127.02, 37.50, 0));
        assert_eq!(tracker.state().step_index, 1);

        assert_eq!(tracker.toggle_guidance(), GuidanceMode::Paused);
        let output = tracker.on_position_update(&fix(127.0, 37.6, 1000));
        assert!(output.is_empty());
        assert!(!output.reroute);
        assert_eq!(tracker.state().step_index, 1);
        assert!(tracker.route().is_some());

        assert_eq!(tracker.toggle_guidance(), GuidanceMode::Active);
        assert!(tracker.on_position_update(&fix(127.02, 37.50, 2000)).progress.is_some());
    }

    #[test]
    fn test_load_route_resets_state() {
        let mut tracker = RouteProgressTracker::default();
        tracker.load_route(sample_route());
        tracker.on_position_update(&fix(127.02, 37.50, 0));
        tracker.toggle_guidance();

        tracker.load_route(sample_route());
        assert_eq!(tracker.state().step_index, 0);
        assert_eq!(tracker.mode(), GuidanceMode::Active);
    }

    #[test]
    fn test_missing_data_produces_no_output() {
        let mut tracker = RouteProgressTracker::default();
        assert!(tracker.on_position_update(&fix(127.0, 37.5, 0)).is_empty());

        tracker.load_route(Route::default());
        assert!(tracker.on_position_update(&fix(127.0, 37.5, 0)).is_empty());

        tracker.load_route(sample_route());
        tracker.clear_route();
        assert!(tracker.on_position_update(&fix(127.0, 37.5, 0)).is_empty());
        assert!(tracker.state().last_fix.is_some());
    }

    #[test]
    fn test_zero_trip_skips_time() {
        let mut route = sample_route();
        route.trip = Some(TripSummary {
            distance_m: 0.0,
            duration_s: 0.0,
        });
        let mut tracker = RouteProgressTracker::default();
        tracker.load_route(route);
        let output = tracker.on_position_update(&fix(127.0, 37.5, 0));
        assert!(output.progress.unwrap().remaining_time_s.is_none());
    }

    #[test]
    fn test_reroute_cooldown() {
        let mut tracker = RouteProgressTracker::new(TrackerConfig {
            reroute_cooldown_ms: 10_000,
            ..TrackerConfig::default()
        });
        tracker.load_route(sample_route());

        // ~1.1 km north of the route
        let first = tracker.on_position_update(&fix(127.01, 37.51, 0));
        assert!(first.off_route);
        assert!(first.reroute);

        let second = tracker.on_position_update(&fix(127.01, 37.51, 5_000));
        assert!(second.off_route);
        assert!(!second.reroute);

        let after_cooldown = tracker.on_position_update(&fix(127.01, 37.51, 10_000));
        assert!(after_cooldown.reroute);

        tracker.load_route(sample_route());
        let fresh = tracker.on_position_update(&fix(127.01, 37.51, 11_000));
        assert!(fresh.reroute);
    }
}
