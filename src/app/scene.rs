//! Frame geometry in screen space, independent of any drawing backend.
//!
//! The TUI turns a [`Scene`] into plotters primitives; tests inspect it
//! directly.

use crate::domain::{Axis, PointId, PointPos, ScreenPos, ScreenSize, WorldPos, WorldSize};
use crate::fit::PolynomialRegression;
use crate::view::Transformer;

use super::session::Session;

/// Thickness of the two axis bands, world units.
pub const AXIS_WIDTH: f64 = 10.0;
/// Tick mark size on the X axis (flipped for the Y axis), world units.
pub const TICK_SIZE: WorldSize = WorldSize::new(10.0, 50.0);
/// Gap between a tick mark and its label, world units.
pub const LABEL_PADDING: f64 = 10.0;
/// Upper bound on curve samples per frame.
pub const MAX_CURVE_SAMPLES: usize = 100_000;
/// Grid lines per axis above which the axis gets no grid.
pub const MAX_GRID_LINES: i64 = 2_000;

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: ScreenPos,
    pub size: ScreenSize,
}

/// One grid line with its tick mark and label.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    /// The axis the line's value is measured along. X lines are vertical.
    pub axis: Axis,
    /// Screen coordinate of the line along `axis`.
    pub offset: f64,
    pub tick: Rect,
    pub label: String,
    /// Below the tick (X, centred) or left of it (Y, right-aligned).
    pub label_anchor: ScreenPos,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: PointId,
    pub center: ScreenPos,
    pub radius: f64,
    pub dragged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: ScreenSize,
    /// Vertical band at world x = 0, then horizontal band at world y = 0.
    pub axes: [Rect; 2],
    pub grid: Vec<GridLine>,
    pub curve: Vec<ScreenPos>,
    pub markers: Vec<Marker>,
}

impl Scene {
    pub fn from_session(session: &Session) -> Self {
        let view = session.transformer();
        let viewport = session.viewport();
        let settings = session.settings();
        let dragged = session.interaction().dragged();

        let markers = session
            .points()
            .iter()
            .map(|p| Marker {
                id: p.id,
                center: view.point_to_screen(p.position),
                radius: marker_radius(&view, settings.point_radius),
                dragged: dragged == Some(p.id),
            })
            .collect();

        Self {
            viewport,
            axes: axis_bands(&view, viewport),
            grid: grid_lines(&view, viewport),
            curve: curve_samples(session.engine(), &view, viewport, settings.graph_step),
            markers,
        }
    }
}

/// Screen radius of a point marker.
pub fn marker_radius(view: &Transformer, point_radius: f64) -> f64 {
    view.world_to_screen_size(WorldSize::new(point_radius, 0.0)).x()
}

/// The displayed curve sampled every `graph_step` world units across the
/// visible world x range.
pub fn curve_samples(
    engine: &PolynomialRegression,
    view: &Transformer,
    viewport: ScreenSize,
    graph_step: f64,
) -> Vec<ScreenPos> {
    if !(graph_step.is_finite() && graph_step > 0.0) {
        return Vec::new();
    }
    let spacing = view.point_spacing();
    let start = view.screen_to_world(ScreenPos::zero()).x();
    let end = view.screen_to_world(ScreenPos::new(viewport.x(), 0.0)).x();

    (0..MAX_CURVE_SAMPLES)
        .map(|i| start + graph_step * i as f64)
        .take_while(|&x| x <= end)
        .map(|world_x| {
            let world_y = engine.predict(world_x / spacing) * spacing;
            view.world_to_screen(WorldPos::new(world_x, world_y))
        })
        .collect()
}

/// The two axis bands, `AXIS_WIDTH` thick, spanning the viewport.
pub fn axis_bands(view: &Transformer, viewport: ScreenSize) -> [Rect; 2] {
    let half = AXIS_WIDTH / 2.0;
    let vertical = Rect {
        origin: ScreenPos::new(view.world_to_screen(WorldPos::new(-half, 0.0)).x(), 0.0),
        size: ScreenSize::new(
            view.world_to_screen_size(WorldSize::new(AXIS_WIDTH, 0.0)).x(),
            viewport.y(),
        ),
    };
    let horizontal = Rect {
        origin: ScreenPos::new(0.0, view.world_to_screen(WorldPos::new(0.0, -half)).y()),
        size: ScreenSize::new(
            viewport.x(),
            view.world_to_screen_size(WorldSize::new(0.0, AXIS_WIDTH)).y(),
        ),
    };
    [vertical, horizontal]
}

/// One line per whole point-space unit between the viewport corners on each
/// axis, skipping the origin. Y labels are negated.
pub fn grid_lines(view: &Transformer, viewport: ScreenSize) -> Vec<GridLine> {
    let top_left = view.world_to_closest_point(view.camera().position);
    let bottom_right =
        view.world_to_closest_point(view.screen_to_world(ScreenPos::zero() + viewport));

    let mut lines = Vec::new();
    for axis in Axis::ALL {
        let first = top_left.get(axis) as i64;
        let last = bottom_right.get(axis) as i64;
        if last.saturating_sub(first) > MAX_GRID_LINES {
            continue;
        }
        for n in first..=last {
            if n == 0 {
                continue;
            }
            let point = PointPos::zero().with(axis, n as f64);
            lines.push(grid_line(view, axis, point));
        }
    }
    lines
}

fn grid_line(view: &Transformer, axis: Axis, point: PointPos) -> GridLine {
    let world = view.point_to_world(point);
    let tick = match axis {
        Axis::X => TICK_SIZE,
        Axis::Y => TICK_SIZE.flipped(),
    };

    let value = point.get(axis);
    let value = if axis == Axis::Y { -value } else { value };

    let label_offset = match axis {
        Axis::X => WorldSize::new(0.0, tick.y() / 2.0 + LABEL_PADDING),
        Axis::Y => WorldSize::new(-(tick.x() / 2.0 + LABEL_PADDING), 0.0),
    };

    GridLine {
        axis,
        offset: view.world_to_screen(world).get(axis),
        tick: Rect {
            origin: view.world_to_screen(world - tick / 2.0),
            size: view.world_to_screen_size(tick),
        },
        label: format!("{value}"),
        label_anchor: view.world_to_screen(world + label_offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::DEFAULT_POINTS;
    use crate::domain::ViewSettings;
    use crate::view::CameraState;

    fn view(position: WorldPos, zoom: f64) -> Transformer {
        Transformer::from_state(CameraState { position, zoom }, 100.0)
    }

    #[test]
    fn grid_skips_the_origin_and_negates_y_labels() {
        let v = view(WorldPos::new(-250.0, -250.0), 1.0);
        let lines = grid_lines(&v, ScreenSize::new(500.0, 500.0));

        let xs: Vec<&str> = lines.iter().filter(|l| l.axis == Axis::X).map(|l| l.label.as_str()).collect();
        let ys: Vec<&str> = lines.iter().filter(|l| l.axis == Axis::Y).map(|l| l.label.as_str()).collect();
        // -2.5 and 2.5 round away from zero.
        assert_eq!(xs, ["-3", "-2", "-1", "1", "2", "3"]);
        assert_eq!(ys, ["3", "2", "1", "-1", "-2", "-3"]);

        let one = lines.iter().find(|l| l.axis == Axis::X && l.label == "1").unwrap();
        assert_eq!(one.offset, 350.0);
        assert_eq!(one.tick.origin, ScreenPos::new(345.0, 225.0));
        assert_eq!(one.tick.size, ScreenSize::new(10.0, 50.0));
        assert_eq!(one.label_anchor, ScreenPos::new(350.0, 285.0));
    }

    #[test]
    fn axis_bands_follow_the_camera() {
        let v = view(WorldPos::new(-100.0, -50.0), 2.0);
        let [vertical, horizontal] = axis_bands(&v, ScreenSize::new(640.0, 480.0));
        assert_eq!(vertical.origin, ScreenPos::new(190.0, 0.0));
        assert_eq!(vertical.size, ScreenSize::new(20.0, 480.0));
        assert_eq!(horizontal.origin, ScreenPos::new(0.0, 90.0));
        assert_eq!(horizontal.size, ScreenSize::new(640.0, 20.0));
    }

    #[test]
    fn curve_spans_the_viewport_in_graph_steps() {
        let engine = PolynomialRegression::with_points([(0.0, 1.0), (1.0, 1.0)], 1, 1.0).unwrap();
        let v = view(WorldPos::zero(), 0.5);
        let curve = curve_samples(&engine, &v, ScreenSize::new(100.0, 100.0), 10.0);

        // World x runs 0..=200 in steps of 10.
        assert_eq!(curve.len(), 21);
        for p in &curve {
            assert!((p.y() - 50.0).abs() < 1e-9, "{p:?}");
        }
        assert_eq!(curve[0].x(), 0.0);
        assert_eq!(curve[20].x(), 100.0);

        assert!(curve_samples(&engine, &v, ScreenSize::new(100.0, 100.0), 0.0).is_empty());
    }

    #[test]
    fn scene_marks_every_point_and_the_dragged_one() {
        let mut session =
            Session::new(ViewSettings::default(), DEFAULT_POINTS.map(PointPos::from), 1.0).unwrap();
        session.set_viewport(ScreenSize::new(1600.0, 800.0));
        session.pointer_down(
            crate::view::PointerButton::Primary,
            ScreenPos::new(225.0, 225.0),
        );

        let scene = Scene::from_session(&session);
        assert_eq!(scene.markers.len(), 3);
        assert_eq!(scene.markers[0].center, ScreenPos::new(225.0, 225.0));
        assert_eq!(scene.markers[0].radius, 10.0);
        assert!(scene.markers[0].dragged);
        assert!(!scene.markers[1].dragged);
        assert!(!scene.curve.is_empty());
    }
}
