//! Mappings between screen, world and point space.
//!
//! ```text
//! screen = (world - camera.position) * zoom
//! world  = point * spacing
//! ```
//!
//! A [`Transformer`] is a snapshot of the camera and the point spacing, so every
//! mapping is a pure function of its argument. Positions and sizes are kept
//! apart: sizes are differences of positions and never pick up the camera offset.

use crate::domain::{PointPos, PointSize, ScreenPos, ScreenSize, WorldPos, WorldSize};
use crate::view::camera::{Camera, CameraState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformer {
    camera: CameraState,
    point_spacing: f64,
}

impl Transformer {
    /// Transforms for the camera's actual (displayed) state.
    pub fn new(camera: &Camera, point_spacing: f64) -> Self {
        Self::from_state(camera.state(), point_spacing)
    }

    pub fn from_state(camera: CameraState, point_spacing: f64) -> Self {
        Self {
            camera,
            point_spacing,
        }
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn point_spacing(&self) -> f64 {
        self.point_spacing
    }

    // Screen <-> World

    pub fn screen_to_world(&self, screen: ScreenPos) -> WorldPos {
        self.screen_to_world_at_zoom(screen, self.camera.zoom)
    }

    /// Where `screen` would land if the camera had `zoom` (position unchanged).
    pub fn screen_to_world_at_zoom(&self, screen: ScreenPos, zoom: f64) -> WorldPos {
        WorldPos::from_vec(self.camera.position.vec() + screen.vec() / zoom)
    }

    pub fn world_to_screen(&self, world: WorldPos) -> ScreenPos {
        ScreenPos::from_vec((world.vec() - self.camera.position.vec()) * self.camera.zoom)
    }

    // Point <-> World

    pub fn point_to_world(&self, point: PointPos) -> WorldPos {
        WorldPos::from_vec(point.vec() * self.point_spacing)
    }

    pub fn world_to_point(&self, world: WorldPos) -> PointPos {
        PointPos::from_vec(world.vec() / self.point_spacing)
    }

    // Screen <-> Point

    pub fn screen_to_point(&self, screen: ScreenPos) -> PointPos {
        self.world_to_point(self.screen_to_world(screen))
    }

    pub fn point_to_screen(&self, point: PointPos) -> ScreenPos {
        self.world_to_screen(self.point_to_world(point))
    }

    /// The nearest grid intersection to `world`, in point space.
    pub fn world_to_closest_point(&self, world: WorldPos) -> PointPos {
        self.world_to_point(world).map(f64::round)
    }

    // Sizes

    pub fn world_to_screen_size(&self, size: WorldSize) -> ScreenSize {
        let origin = self.camera.position;
        self.world_to_screen(origin + size) - self.world_to_screen(origin)
    }

    pub fn screen_to_world_size(&self, size: ScreenSize) -> WorldSize {
        let origin = ScreenPos::zero();
        self.screen_to_world(origin + size) - self.screen_to_world(origin)
    }

    pub fn point_to_world_size(&self, size: PointSize) -> WorldSize {
        let origin = PointPos::zero();
        self.point_to_world(origin + size) - self.point_to_world(origin)
    }

    pub fn world_to_point_size(&self, size: WorldSize) -> PointSize {
        let origin = WorldPos::zero();
        self.world_to_point(origin + size) - self.world_to_point(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn random_transformer(rng: &mut StdRng) -> Transformer {
        Transformer::from_state(
            CameraState {
                position: WorldPos::new(rng.gen_range(-1e4..1e4), rng.gen_range(-1e4..1e4)),
                zoom: rng.gen_range(0.1..=3.0),
            },
            rng.gen_range(100.0..=500.0),
        )
    }

    #[test]
    fn screen_world_round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let t = random_transformer(&mut rng);
            let p = ScreenPos::new(rng.gen_range(0.0..1920.0), rng.gen_range(0.0..1080.0));
            let back = t.world_to_screen(t.screen_to_world(p));
            assert!((back.x() - p.x()).abs() < 1e-9, "{p:?} -> {back:?}");
            assert!((back.y() - p.y()).abs() < 1e-9, "{p:?} -> {back:?}");
        }
    }

    #[test]
    fn point_world_round_trip() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            // Power-of-two spacing keeps the multiply/divide pair exact.
            let spacing = 2f64.powi(rng.gen_range(-4..10));
            let t = Transformer::from_state(CameraState::default(), spacing);
            let p = PointPos::new(rng.gen_range(-1e3..1e3), rng.gen_range(-1e3..1e3));
            assert_eq!(t.world_to_point(t.point_to_world(p)), p);
        }
    }

    #[test]
    fn point_world_round_trip_with_arbitrary_spacing() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            let t = random_transformer(&mut rng);
            let p = PointPos::new(rng.gen_range(-1e3..1e3), rng.gen_range(-1e3..1e3));
            let back = t.world_to_point(t.point_to_world(p));
            assert!((back.x() - p.x()).abs() <= 1e-12 * p.x().abs().max(1.0));
            assert!((back.y() - p.y()).abs() <= 1e-12 * p.y().abs().max(1.0));
        }
    }

    #[test]
    fn composed_mappings_match_the_formulas() {
        let t = Transformer::from_state(
            CameraState {
                position: WorldPos::new(100.0, -50.0),
                zoom: 0.5,
            },
            300.0,
        );
        assert_eq!(t.screen_to_world(ScreenPos::new(20.0, 10.0)), WorldPos::new(140.0, -30.0));
        assert_eq!(t.world_to_screen(WorldPos::new(140.0, -30.0)), ScreenPos::new(20.0, 10.0));
        assert_eq!(t.point_to_screen(PointPos::new(1.0, 0.0)), ScreenPos::new(100.0, 25.0));
        assert_eq!(t.screen_to_point(ScreenPos::new(100.0, 25.0)), PointPos::new(1.0, 0.0));
        assert_eq!(
            t.screen_to_world_at_zoom(ScreenPos::new(20.0, 10.0), 2.0),
            WorldPos::new(110.0, -45.0)
        );
    }

    #[test]
    fn closest_point_rounds_each_axis() {
        let t = Transformer::from_state(CameraState::default(), 100.0);
        assert_eq!(t.world_to_closest_point(WorldPos::new(149.0, -251.0)), PointPos::new(1.0, -3.0));
        assert_eq!(t.world_to_closest_point(WorldPos::new(-49.0, 50.0)), PointPos::new(-0.0, 1.0));
    }

    #[test]
    fn sizes_ignore_the_camera_offset() {
        let near = Transformer::from_state(
            CameraState {
                position: WorldPos::zero(),
                zoom: 2.0,
            },
            300.0,
        );
        let far = Transformer::from_state(
            CameraState {
                position: WorldPos::new(-7000.0, 1234.5),
                zoom: 2.0,
            },
            300.0,
        );
        let size = WorldSize::new(40.0, 10.0);
        assert_eq!(near.world_to_screen_size(size), ScreenSize::new(80.0, 20.0));
        assert_eq!(far.world_to_screen_size(size), ScreenSize::new(80.0, 20.0));
        assert_eq!(far.screen_to_world_size(ScreenSize::new(80.0, 20.0)), size);
        assert_eq!(near.point_to_world_size(PointSize::new(1.0, 2.0)), WorldSize::new(300.0, 600.0));
        assert_eq!(near.world_to_point_size(WorldSize::new(300.0, 600.0)), PointSize::new(1.0, 2.0));
    }
}
