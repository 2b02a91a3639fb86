//! Host-side session state shared by the interactive and batch front-ends.
//!
//! A [`Session`] owns the point set, the regression engine, the camera and the
//! pointer state. Whenever the points or a fit-related setting change, it
//! pushes them into the engine; [`Session::tick`] then animates both the curve
//! and the camera once per frame.

use log::{info, warn};

use crate::data::{ScatterConfig, generate_scatter};
use crate::domain::{PointPos, PointSet, ScreenPos, ScreenSize, Setting, ViewSettings};
use crate::error::{AppError, ConfigError};
use crate::fit::PolynomialRegression;
use crate::view::{
    Camera, CameraState, Interaction, PointerButton, PointerOutcome, Transformer, pan_by, zoom_at,
};

/// Points shown when a session starts without explicit points.
pub const DEFAULT_POINTS: [(f64, f64); 3] = [(3.0, 3.0), (7.0, 3.0), (15.0, 7.0)];

#[derive(Debug, Clone)]
pub struct Session {
    settings: ViewSettings,
    points: PointSet,
    engine: PolynomialRegression,
    camera: Camera,
    interaction: Interaction,
    viewport: ScreenSize,
    scatter: ScatterConfig,
}

impl Session {
    /// Start a session showing the fit of `points` without an initial
    /// animation. `follow_rate` is the camera's per-tick follow rate.
    pub fn new(
        settings: ViewSettings,
        points: impl IntoIterator<Item = PointPos>,
        follow_rate: f64,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let camera = Camera::with_follow_rate(follow_rate)?;
        let points = PointSet::from_positions(points);
        let engine =
            PolynomialRegression::with_points(points.positions(), settings.order, settings.lerp_weight)?;

        info!(
            "session start: points={} order={} lerp_weight={:.2}",
            points.len(),
            settings.order,
            settings.lerp_weight
        );

        Ok(Self {
            settings,
            points,
            engine,
            camera,
            interaction: Interaction::new(),
            viewport: ScreenSize::zero(),
            scatter: ScatterConfig::default(),
        })
    }

    /// Base configuration for [`Session::generate`].
    pub fn with_scatter(mut self, scatter: ScatterConfig) -> Self {
        self.scatter = scatter;
        self
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn engine(&self) -> &PolynomialRegression {
        &self.engine
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn viewport(&self) -> ScreenSize {
        self.viewport
    }

    /// Size of the drawing area in screen units.
    pub fn set_viewport(&mut self, viewport: ScreenSize) {
        self.viewport = viewport;
    }

    /// Transforms for the currently displayed camera state.
    pub fn transformer(&self) -> Transformer {
        Transformer::new(&self.camera, self.settings.point_spacing)
    }

    /// Advance the curve and the camera one frame. Returns whether anything
    /// visible moved.
    pub fn tick(&mut self) -> bool {
        let curve_moved = self.engine.update();
        let camera_moved = self.camera.update();
        curve_moved || camera_moved
    }

    pub fn pointer_down(&mut self, button: PointerButton, screen: ScreenPos) -> PointerOutcome {
        let view = self.transformer();
        let outcome = self.interaction.pointer_down(
            button,
            screen,
            &mut self.points,
            &view,
            self.settings.point_radius,
        );
        self.after_pointer(outcome)
    }

    pub fn pointer_move(&mut self, screen: ScreenPos) -> PointerOutcome {
        let view = self.transformer();
        let outcome =
            self.interaction
                .pointer_move(screen, &mut self.points, &mut self.camera, &view);
        self.after_pointer(outcome)
    }

    /// Button release, or the pointer left the viewport.
    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    /// Wheel at `screen`; positive `delta` zooms out.
    pub fn wheel(&mut self, screen: ScreenPos, delta: f64) -> bool {
        zoom_at(&mut self.camera, screen, delta)
    }

    /// Wheel-equivalent zoom around the viewport centre.
    pub fn zoom_center(&mut self, delta: f64) -> bool {
        let center = ScreenPos::zero() + self.viewport / 2.0;
        zoom_at(&mut self.camera, center, delta)
    }

    /// Pan as if the pointer had been dragged by `movement`.
    pub fn pan(&mut self, movement: ScreenSize) {
        pan_by(&mut self.camera, movement);
    }

    /// Replace all settings. Fit-related values are pushed into the engine.
    pub fn apply_settings(&mut self, settings: ViewSettings) -> Result<(), ConfigError> {
        if let Err(err) = settings.validate() {
            warn!("rejected settings: {err}");
            return Err(err);
        }
        if settings.order != self.engine.order() {
            self.engine.set_order(settings.order)?;
        }
        if settings.lerp_weight != self.engine.lerp_weight() {
            self.engine.set_lerp_weight(settings.lerp_weight)?;
        }
        self.settings = settings;
        Ok(())
    }

    /// Move one setting by `steps` slider increments.
    pub fn adjust(&mut self, setting: Setting, steps: i32) -> Result<(), ConfigError> {
        self.apply_settings(self.settings.adjusted(setting, steps))
    }

    /// Camera back to the origin at default zoom; every setting to its default.
    /// Points are kept.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        let home = CameraState::default();
        self.camera.set_position(home.position);
        self.camera.set_zoom(home.zoom);

        self.apply_settings(ViewSettings::default())?;
        self.interaction.pointer_up();
        info!("session reset");
        Ok(())
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        self.points.clear();
        self.interaction.pointer_up();
        self.sync_points();
        info!("points cleared");
    }

    /// Replace the points with a fresh random scatter. Each call uses the next
    /// seed, so repeated calls give different scatters.
    pub fn generate(&mut self) -> Result<usize, AppError> {
        let scatter = generate_scatter(&self.scatter)?;
        self.scatter.seed = self.scatter.seed.wrapping_add(1);

        self.points = PointSet::from_positions(scatter.points);
        self.interaction.pointer_up();
        self.sync_points();
        info!(
            "generated scatter: points={} baseline_degree={}",
            self.points.len(),
            scatter.baseline.len().saturating_sub(1)
        );
        Ok(self.points.len())
    }

    /// Add a point directly in point space.
    pub fn add_point(&mut self, position: PointPos) {
        self.points.insert(position);
        self.sync_points();
    }

    fn after_pointer(&mut self, outcome: PointerOutcome) -> PointerOutcome {
        if outcome.changes_points() {
            self.sync_points();
        }
        outcome
    }

    fn sync_points(&mut self) {
        self.engine.set_points(self.points.positions());
        if self.engine.is_degenerate() && !self.points.is_empty() {
            warn!(
                "rank-deficient fit: {} point(s) for order {}",
                self.points.len(),
                self.engine.order()
            );
        }
    }
}
