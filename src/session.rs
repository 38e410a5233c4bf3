//! Navigation session: route source, tracker and presenter wired together.
//!
//! Fixes are processed one at a time in arrival order. Re-route requests
//! from the tracker are served synchronously from the fix position to the
//! current destination.

use tracing::{info, warn};

use crate::error::RouteError;
use crate::format::HudText;
use crate::polyline::LngLat;
use crate::tracker::{GuidanceMode, RouteProgressTracker, TrackerConfig, TrackerOutput};
use crate::traits::{PositionFeed, PositionFix, Presenter, RouteSource};

pub struct NavigationSession<S, P> {
    source: S,
    presenter: P,
    tracker: RouteProgressTracker,
    destination: Option<LngLat>,
}

impl<S, P> NavigationSession<S, P>
where
    S: RouteSource,
    P: Presenter,
{
    pub fn new(source: S, presenter: P, config: TrackerConfig) -> Self {
        Self {
            source,
            presenter,
            tracker: RouteProgressTracker::new(config),
            destination: None,
        }
    }

    pub fn tracker(&self) -> &RouteProgressTracker {
        &self.tracker
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn destination(&self) -> Option<LngLat> {
        self.destination
    }

    /// Fetches a route and starts guidance. On error the previous route, if
    /// any, stays loaded.
    pub fn start(&mut self, origin: LngLat, destination: LngLat) -> Result<(), RouteError> {
        let route = self.source.fetch_route(origin, destination)?;
        info!(%origin, %destination, "navigation started");
        self.destination = Some(destination);
        self.tracker.load_route(route);
        Ok(())
    }

    /// Runs one fix through the tracker and hands the text to the presenter.
    pub fn on_fix(&mut self, fix: &PositionFix) -> TrackerOutput {
        let output = self.tracker.on_position_update(fix);
        self.presenter.present(&HudText::from(&output));

        if output.reroute {
            if let Some(destination) = self.destination {
                match self.source.fetch_route(fix.position, destination) {
                    Ok(route) => self.tracker.load_route(route),
                    // Retried once the tracker's cooldown expires.
                    Err(err) => warn!(%err, "re-route failed"),
                }
            }
        }

        output
    }

    /// Drains a feed. Returns the number of fixes processed.
    pub fn run<F: PositionFeed>(&mut self, feed: &mut F) -> usize {
        let mut count = 0;
        while let Some(fix) = feed.next_fix() {
            self.on_fix(&fix);
            count += 1;
        }
        count
    }

    pub fn toggle_guidance(&mut self) -> GuidanceMode {
        self.tracker.toggle_guidance()
    }

    /// Ends navigation; later fixes produce empty HUD text.
    pub fn clear_route(&mut self) {
        self.destination = None;
        self.tracker.clear_route();
    }
}
