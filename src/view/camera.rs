//! The viewport camera.
//!
//! Input handlers write the *target* state; [`Camera::update`] moves the *actual*
//! state (the one every transform reads) toward it once per tick. With the
//! default follow rate of 1 the camera snaps to its target on the next tick.

use log::debug;

use crate::domain::{Axis, CAMERA_DEFAULT_ZOOM, WorldPos};
use crate::error::ConfigError;
use crate::math::lerp;

/// Camera position (world space, top-left of the viewport) and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: WorldPos,
    pub zoom: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: WorldPos::zero(),
            zoom: CAMERA_DEFAULT_ZOOM,
        }
    }
}

impl CameraState {
    /// One smoothing step toward `target`.
    pub fn advance(self, target: CameraState, rate: f64) -> CameraState {
        CameraState {
            position: WorldPos::new(
                lerp(self.position.x(), target.position.x(), rate),
                lerp(self.position.y(), target.position.y(), rate),
            ),
            zoom: lerp(self.zoom, target.zoom, rate),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    actual: CameraState,
    target: CameraState,
    follow_rate: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            actual: CameraState::default(),
            target: CameraState::default(),
            follow_rate: 1.0,
        }
    }

    /// A camera that closes `rate` of the gap to its target per tick.
    pub fn with_follow_rate(rate: f64) -> Result<Self, ConfigError> {
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(ConfigError::InvalidFollowRate(rate));
        }
        Ok(Self {
            follow_rate: rate,
            ..Self::new()
        })
    }

    pub fn set_x(&mut self, x: f64) {
        self.target.position = self.target.position.with(Axis::X, x);
    }

    pub fn set_y(&mut self, y: f64) {
        self.target.position = self.target.position.with(Axis::Y, y);
    }

    /// Callers clamp to `[MIN_ZOOM, MAX_ZOOM]` before writing.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.target.zoom = zoom;
    }

    pub fn set_position(&mut self, position: WorldPos) {
        self.target.position = position;
    }

    pub fn x(&self) -> f64 {
        self.actual.position.x()
    }

    pub fn y(&self) -> f64 {
        self.actual.position.y()
    }

    pub fn zoom(&self) -> f64 {
        self.actual.zoom
    }

    pub fn position(&self) -> WorldPos {
        self.actual.position
    }

    /// The state transforms use.
    pub fn state(&self) -> CameraState {
        self.actual
    }

    /// The state input is steering toward.
    pub fn target(&self) -> CameraState {
        self.target
    }

    /// Move the actual state toward the target. Returns whether either the
    /// position or the zoom changed.
    pub fn update(&mut self) -> bool {
        let next = self.actual.advance(self.target, self.follow_rate);
        let position_changed = next.position != self.actual.position;
        let zoom_changed = next.zoom != self.actual.zoom;
        self.actual = next;

        let changed = position_changed || zoom_changed;
        if changed {
            debug!(
                "camera: position=({:.2}, {:.2}) zoom={:.4}",
                next.position.x(),
                next.position.y(),
                next.zoom
            );
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_only_touch_the_target() {
        let mut camera = Camera::new();
        camera.set_x(10.0);
        camera.set_y(-5.0);
        camera.set_zoom(1.5);
        assert_eq!(camera.position(), WorldPos::zero());
        assert_eq!(camera.zoom(), CAMERA_DEFAULT_ZOOM);
        assert_eq!(camera.target().position, WorldPos::new(10.0, -5.0));

        assert!(camera.update());
        assert_eq!(camera.position(), WorldPos::new(10.0, -5.0));
        assert_eq!(camera.zoom(), 1.5);
    }

    #[test]
    fn update_reports_position_and_zoom_changes_independently() {
        let mut camera = Camera::new();
        assert!(!camera.update(), "nothing to do");

        camera.set_zoom(2.0);
        assert!(camera.update(), "zoom-only change must be reported");
        assert!(!camera.update());

        camera.set_position(WorldPos::new(3.0, 4.0));
        assert!(camera.update(), "position-only change must be reported");
        assert!(!camera.update());

        // Writing the same value again is not a change.
        camera.set_x(3.0);
        assert!(!camera.update());
    }

    #[test]
    fn follow_rate_eases_toward_target() {
        let mut camera = Camera::with_follow_rate(0.5).unwrap();
        camera.set_position(WorldPos::new(8.0, 0.0));
        camera.update();
        assert_eq!(camera.x(), 4.0);
        camera.update();
        assert_eq!(camera.x(), 6.0);

        assert!(Camera::with_follow_rate(0.0).is_err());
        assert!(Camera::with_follow_rate(1.5).is_err());
    }
}
