//! Session-level behaviour through the public API: editing points, animating
//! the fit, and reading back the scene and the report.

use poly_curves::app::scene::Scene;
use poly_curves::app::session::Session;
use poly_curves::domain::{PointPos, ScreenPos, ScreenSize, ViewSettings};
use poly_curves::report::{compute_residuals, format_polynomial, rmse};
use poly_curves::view::{PointerButton, PointerOutcome};

fn line_session() -> Session {
    let settings = ViewSettings {
        order: 1,
        lerp_weight: 1.0,
        ..ViewSettings::default()
    };
    let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)].map(PointPos::from);
    let mut session = Session::new(settings, points, 1.0).unwrap();
    session.set_viewport(ScreenSize::new(800.0, 480.0));
    session
}

#[test_log::test]
fn exact_line_is_shown_immediately() {
    let session = line_session();
    assert!(session.engine().is_settled());
    assert_eq!(format_polynomial(session.engine().coefficients(), 2), "y = 2.00x + 1.00");

    let residuals = compute_residuals(session.points(), session.engine());
    assert!(rmse(&residuals).unwrap() < 1e-9);
}

#[test_log::test]
fn dragging_a_point_refits_the_line() {
    let mut session = line_session();

    // Point (1, 3) sits at world (300, 900), screen (75, 225) at zoom 0.25.
    let out = session.pointer_down(PointerButton::Primary, ScreenPos::new(75.0, 225.0));
    let PointerOutcome::DragStarted(id) = out else {
        panic!("expected a drag, got {out:?}");
    };
    assert_eq!(session.interaction().dragged(), Some(id));

    let out = session.pointer_move(ScreenPos::new(75.0, 150.0));
    assert_eq!(out, PointerOutcome::Moved(id));
    assert_eq!(session.points().get(id).unwrap().position, PointPos::new(1.0, 2.0));
    session.pointer_up();
    assert_eq!(session.interaction().dragged(), None);

    while session.tick() {}

    // Least squares through (0, 1), (1, 2), (2, 5): y = 2x + 2/3.
    let engine = session.engine();
    assert!((engine.predict(0.0) - 2.0 / 3.0).abs() < 1e-9);
    assert!((engine.predict(1.0) - 8.0 / 3.0).abs() < 1e-9);

    let residuals = compute_residuals(session.points(), engine);
    let expected = (2.0f64 / 9.0).sqrt();
    assert!((rmse(&residuals).unwrap() - expected).abs() < 1e-9);
}

#[test_log::test]
fn right_click_on_a_point_deletes_it() {
    let mut session = line_session();
    let out = session.pointer_down(PointerButton::Secondary, ScreenPos::new(0.0, 75.0));
    assert!(matches!(out, PointerOutcome::Removed(_)));
    assert_eq!(session.points().len(), 2);
    session.pointer_up();

    // Two points still determine the line exactly.
    while session.tick() {}
    assert!((session.engine().predict(4.0) - 9.0).abs() < 1e-9);
    assert!(!session.engine().is_degenerate());
}

#[test_log::test]
fn too_few_points_for_the_order_is_degenerate_but_finite() {
    let settings = ViewSettings {
        order: 4,
        ..ViewSettings::default()
    };
    let session = Session::new(settings, [PointPos::new(1.0, 1.0), PointPos::new(2.0, 3.0)], 1.0)
        .unwrap();
    let engine = session.engine();
    assert!(engine.is_degenerate());
    assert_eq!(engine.target_coefficients().len(), 5);
    assert!(engine.target_coefficients().iter().all(|c| c.is_finite()));
    assert!(engine.predict(10.0).is_finite());
}

#[test_log::test]
fn scene_follows_panning() {
    let mut session = line_session();
    let before = Scene::from_session(&session);
    assert_eq!(before.markers.len(), 3);
    assert!(!before.curve.is_empty());
    assert!(!before.grid.is_empty());

    // Middle drag pans; the content follows the pointer.
    session.pointer_down(PointerButton::Middle, ScreenPos::new(400.0, 240.0));
    session.pointer_move(ScreenPos::new(440.0, 260.0));
    session.pointer_up();
    while session.tick() {}

    let after = Scene::from_session(&session);
    for (a, b) in before.markers.iter().zip(&after.markers) {
        assert_eq!(a.id, b.id);
        assert!((b.center.x() - a.center.x() - 40.0).abs() < 1e-9);
        assert!((b.center.y() - a.center.y() - 20.0).abs() < 1e-9);
    }
}
