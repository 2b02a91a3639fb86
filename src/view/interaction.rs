//! Pointer handling: hit-testing, point editing, panning and wheel zoom.
//!
//! Points are edited by [`PointId`]. Hit-testing reads the camera's displayed
//! state (what the user is pointing at); pan and zoom read and write the
//! camera's target state, so several events inside one tick accumulate.

use crate::domain::{
    MAX_ZOOM, MIN_ZOOM, PAN_SPEED, PointId, PointSet, ScreenPos, ScreenSize, WorldPos,
    ZOOM_SENSITIVITY,
};
use crate::view::camera::Camera;
use crate::view::transform::Transformer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What a pointer event did to the point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    None,
    Added(PointId),
    Removed(PointId),
    DragStarted(PointId),
    Moved(PointId),
    PanStarted,
}

impl PointerOutcome {
    /// Whether the point set changed and the fit must be recomputed.
    pub fn changes_points(self) -> bool {
        matches!(
            self,
            PointerOutcome::Added(_) | PointerOutcome::Removed(_) | PointerOutcome::Moved(_)
        )
    }
}

/// Drag and pan state between pointer events.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    dragged: Option<PointId>,
    panning: bool,
    last_pointer: Option<ScreenPos>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragged(&self) -> Option<PointId> {
        self.dragged
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Button press at `screen`.
    ///
    /// Over a point: primary starts dragging it, secondary deletes it. Elsewhere:
    /// secondary adds a point, and any button starts panning.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        screen: ScreenPos,
        points: &mut PointSet,
        view: &Transformer,
        point_radius: f64,
    ) -> PointerOutcome {
        self.last_pointer = Some(screen);

        if button != PointerButton::Middle {
            if let Some(id) = first_point_at(points, view, screen, point_radius) {
                if button == PointerButton::Primary {
                    self.dragged = Some(id);
                    return PointerOutcome::DragStarted(id);
                }
                points.remove(id);
                return PointerOutcome::Removed(id);
            }

            if button == PointerButton::Secondary {
                let id = points.insert(view.screen_to_point(screen));
                self.panning = true;
                return PointerOutcome::Added(id);
            }
        }

        self.panning = true;
        PointerOutcome::PanStarted
    }

    /// Pointer moved to `screen`: drag the held point, or pan the camera.
    pub fn pointer_move(
        &mut self,
        screen: ScreenPos,
        points: &mut PointSet,
        camera: &mut Camera,
        view: &Transformer,
    ) -> PointerOutcome {
        let movement = self.last_pointer.map(|last| screen - last);
        self.last_pointer = Some(screen);

        let mut outcome = PointerOutcome::None;
        if let Some(id) = self.dragged {
            if points.move_to(id, view.screen_to_point(screen)) {
                outcome = PointerOutcome::Moved(id);
            } else {
                self.dragged = None;
            }
        }

        if self.panning {
            if let Some(movement) = movement {
                pan_by(camera, movement);
            }
        }

        outcome
    }

    /// Button released or pointer left the viewport.
    pub fn pointer_up(&mut self) {
        self.dragged = None;
        self.panning = false;
        self.last_pointer = None;
    }
}

/// The first point (in insertion order) within `2 × radius` world units of
/// `screen`.
pub fn first_point_at(
    points: &PointSet,
    view: &Transformer,
    screen: ScreenPos,
    radius: f64,
) -> Option<PointId> {
    let world = view.screen_to_world(screen);
    points
        .iter()
        .find(|p| world.distance_to(view.point_to_world(p.position)) <= radius * 2.0)
        .map(|p| p.id)
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Move the camera target opposite to a pointer movement, so the content
/// follows the pointer.
pub fn pan_by(camera: &mut Camera, movement: ScreenSize) {
    let target = camera.target();
    let delta = movement.vec() * (PAN_SPEED / target.zoom);
    camera.set_position(WorldPos::from_vec(target.position.vec() - delta));
}

/// Apply a wheel `delta` at `screen`, keeping the world point under the pointer
/// fixed. Zoom is clamped before it is written. Returns whether the zoom changed.
pub fn zoom_at(camera: &mut Camera, screen: ScreenPos, delta: f64) -> bool {
    let target = camera.target();
    let zoom = clamp_zoom(target.zoom - delta * ZOOM_SENSITIVITY);
    if zoom == target.zoom {
        return false;
    }

    // Spacing does not enter screen/world mappings.
    let view = Transformer::from_state(target, 1.0);
    let before = view.screen_to_world(screen);
    let after = view.screen_to_world_at_zoom(screen, zoom);

    camera.set_zoom(zoom);
    camera.set_position(target.position - (after - before));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CAMERA_DEFAULT_ZOOM, PointPos};
    use crate::view::camera::CameraState;

    fn view() -> Transformer {
        Transformer::from_state(
            CameraState {
                position: WorldPos::zero(),
                zoom: 1.0,
            },
            100.0,
        )
    }

    #[test]
    fn secondary_click_on_empty_space_adds_a_point() {
        let mut points = PointSet::new();
        let mut ix = Interaction::new();
        let out = ix.pointer_down(
            PointerButton::Secondary,
            ScreenPos::new(250.0, 50.0),
            &mut points,
            &view(),
            10.0,
        );
        let PointerOutcome::Added(id) = out else {
            panic!("expected a new point, got {out:?}");
        };
        assert_eq!(points.get(id).unwrap().position, PointPos::new(2.5, 0.5));
        assert!(out.changes_points());
    }

    #[test]
    fn secondary_click_on_a_point_removes_only_that_point() {
        let mut points = PointSet::new();
        let a = points.insert(PointPos::new(1.0, 1.0));
        let b = points.insert(PointPos::new(1.0, 1.0));
        let mut ix = Interaction::new();

        let out = ix.pointer_down(
            PointerButton::Secondary,
            ScreenPos::new(100.0, 100.0),
            &mut points,
            &view(),
            10.0,
        );
        assert_eq!(out, PointerOutcome::Removed(a));
        assert!(points.get(b).is_some());
        assert!(!ix.is_panning());
    }

    #[test]
    fn primary_drag_moves_the_point_by_id() {
        let mut points = PointSet::new();
        let a = points.insert(PointPos::new(1.0, 1.0));
        let b = points.insert(PointPos::new(1.0, 1.0));
        let mut camera = Camera::new();
        let mut ix = Interaction::new();
        let v = view();

        let out = ix.pointer_down(PointerButton::Primary, ScreenPos::new(105.0, 95.0), &mut points, &v, 10.0);
        assert_eq!(out, PointerOutcome::DragStarted(a));

        let out = ix.pointer_move(ScreenPos::new(300.0, 400.0), &mut points, &mut camera, &v);
        assert_eq!(out, PointerOutcome::Moved(a));
        assert_eq!(points.get(a).unwrap().position, PointPos::new(3.0, 4.0));
        assert_eq!(points.get(b).unwrap().position, PointPos::new(1.0, 1.0));
        assert_eq!(camera.target().position, WorldPos::zero(), "dragging does not pan");

        ix.pointer_up();
        let out = ix.pointer_move(ScreenPos::new(0.0, 0.0), &mut points, &mut camera, &v);
        assert_eq!(out, PointerOutcome::None);
    }

    #[test]
    fn hit_test_uses_twice_the_radius_in_world_units() {
        let points = PointSet::from_positions([PointPos::new(1.0, 0.0)]);
        let v = view();
        assert!(first_point_at(&points, &v, ScreenPos::new(119.0, 0.0), 10.0).is_some());
        assert!(first_point_at(&points, &v, ScreenPos::new(121.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn panning_moves_the_camera_against_the_pointer() {
        let mut points = PointSet::new();
        let mut camera = Camera::new();
        let mut ix = Interaction::new();
        let v = view();

        ix.pointer_down(PointerButton::Middle, ScreenPos::new(50.0, 50.0), &mut points, &v, 10.0);
        assert!(ix.is_panning());
        ix.pointer_move(ScreenPos::new(60.0, 45.0), &mut points, &mut camera, &v);

        let zoom = CAMERA_DEFAULT_ZOOM;
        let expected = WorldPos::new(-10.0 * PAN_SPEED / zoom, 5.0 * PAN_SPEED / zoom);
        assert_eq!(camera.target().position, expected);
        assert!(points.is_empty());
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let mut camera = Camera::new();
        for _ in 0..1000 {
            zoom_at(&mut camera, ScreenPos::new(10.0, 10.0), -500.0);
        }
        assert_eq!(camera.target().zoom, MAX_ZOOM);
        assert!(!zoom_at(&mut camera, ScreenPos::new(10.0, 10.0), -500.0));

        for _ in 0..1000 {
            zoom_at(&mut camera, ScreenPos::new(10.0, 10.0), 500.0);
        }
        assert_eq!(camera.target().zoom, MIN_ZOOM);

        camera.update();
        assert_eq!(camera.zoom(), MIN_ZOOM);
    }

    #[test]
    fn zoom_keeps_the_world_point_under_the_pointer() {
        let mut camera = Camera::new();
        camera.set_position(WorldPos::new(120.0, -40.0));
        camera.update();

        let pointer = ScreenPos::new(300.0, 200.0);
        let before = Transformer::new(&camera, 300.0).screen_to_world(pointer);

        assert!(zoom_at(&mut camera, pointer, -200.0));
        camera.update();
        assert!((camera.zoom() - (CAMERA_DEFAULT_ZOOM + 0.2)).abs() < 1e-12);

        let after = Transformer::new(&camera, 300.0).screen_to_world(pointer);
        assert!(before.distance_to(after) < 1e-9, "{before:?} vs {after:?}");
    }
}
