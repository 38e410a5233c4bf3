//! Camera view state: follow-GPS vs manual pan, north-up vs heading-up,
//! and the pitch/zoom limits of the HUD map.

use crate::haversine::normalize_bearing;
use crate::polyline::LngLat;
use crate::traits::PositionFix;

pub const MIN_PITCH: f64 = 0.0;
pub const MAX_PITCH: f64 = 85.0;
pub const PITCH_STEP: f64 = 5.0;
pub const MIN_ZOOM: f64 = 12.0;
pub const MAX_ZOOM: f64 = 20.0;

/// Pitch and zoom the camera eases to while following.
const FOLLOW_PITCH: f64 = 60.0;
const FOLLOW_ZOOM: f64 = 17.0;

/// Where the map camera should move for a fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: LngLat,
    pub bearing: f64,
    pub pitch: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Camera tracks the vehicle. Cleared by a manual pan.
    pub following: bool,
    pub north_up: bool,
    pub pitch: f64,
    pub zoom: f64,
    pub bearing: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            following: true,
            north_up: false,
            pitch: MIN_PITCH,
            zoom: 16.0,
            bearing: 0.0,
        }
    }
}

impl ViewState {
    /// The user dragged the map; stop following until locate is pressed.
    pub fn manual_pan(&mut self) {
        self.following = false;
    }

    /// Locate button: resume following the vehicle.
    pub fn locate(&mut self) {
        self.following = true;
    }

    pub fn toggle_north_up(&mut self) -> bool {
        self.north_up = !self.north_up;
        if self.north_up {
            self.bearing = 0.0;
        }
        self.north_up
    }

    /// Clamps to [0, 85] degrees and returns the applied value.
    pub fn set_pitch(&mut self, pitch: f64) -> f64 {
        self.pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        self.pitch
    }

    /// Steps pitch by `steps` increments of 5 degrees.
    pub fn nudge_pitch(&mut self, steps: i32) -> f64 {
        self.set_pitch(self.pitch + f64::from(steps) * PITCH_STEP)
    }

    /// Clamps to [12, 20] and returns the applied value.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom
    }

    /// Camera target for a fix, or `None` while the user is panning.
    ///
    /// Heading-up rotates to the vehicle heading, keeping the current
    /// bearing when the fix has none.
    pub fn camera_for_fix(&mut self, fix: &PositionFix) -> Option<Camera> {
        if !self.following {
            return None;
        }

        self.bearing = if self.north_up {
            0.0
        } else {
            fix.heading.map(normalize_bearing).unwrap_or(self.bearing)
        };
        self.pitch = FOLLOW_PITCH;
        self.zoom = FOLLOW_ZOOM;

        Some(Camera {
            center: fix.position,
            bearing: self.bearing,
            pitch: self.pitch,
            zoom: self.zoom,
        })
    }
}
