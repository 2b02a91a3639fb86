//! Session configuration values and their allowed ranges.

use crate::error::ConfigError;

/// Zoom the camera starts at (and returns to on reset).
pub const CAMERA_DEFAULT_ZOOM: f64 = 0.25;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom change per wheel delta unit.
pub const ZOOM_SENSITIVITY: f64 = 0.001;
/// Screen units of camera travel per screen unit of pointer travel.
pub const PAN_SPEED: f64 = 1.0;

/// Highest polynomial order the engine accepts.
pub const MAX_ORDER: usize = 32;
/// Decimal places used when showing coefficients.
pub const COEFFICIENT_PRECISION: usize = 2;

pub const DEFAULT_POINT_SPACING: f64 = 300.0;
pub const DEFAULT_GRAPH_STEP: f64 = 10.0;
pub const DEFAULT_POINT_RADIUS: f64 = 40.0;
pub const DEFAULT_LERP_WEIGHT: f64 = 0.1;
pub const DEFAULT_ORDER: usize = 5;

/// Values pushed into the engine and the scene by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    /// Polynomial degree.
    pub order: usize,
    /// Fraction of the remaining coefficient gap closed per tick.
    pub lerp_weight: f64,
    /// World units per point-space unit.
    pub point_spacing: f64,
    /// World units between consecutive curve samples.
    pub graph_step: f64,
    /// Point marker radius in world units.
    pub point_radius: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            lerp_weight: DEFAULT_LERP_WEIGHT,
            point_spacing: DEFAULT_POINT_SPACING,
            graph_step: DEFAULT_GRAPH_STEP,
            point_radius: DEFAULT_POINT_RADIUS,
        }
    }
}

impl ViewSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order > MAX_ORDER {
            return Err(ConfigError::OrderTooLarge {
                order: self.order,
                max: MAX_ORDER,
            });
        }
        if !(0.0..=1.0).contains(&self.lerp_weight) {
            return Err(ConfigError::LerpWeightOutOfRange(self.lerp_weight));
        }
        if !(self.point_spacing.is_finite() && self.point_spacing > 0.0) {
            return Err(ConfigError::InvalidPointSpacing(self.point_spacing));
        }
        if !(self.graph_step.is_finite() && self.graph_step > 0.0) {
            return Err(ConfigError::InvalidGraphStep(self.graph_step));
        }
        if !(self.point_radius.is_finite() && self.point_radius >= 0.0) {
            return Err(ConfigError::InvalidPointRadius(self.point_radius));
        }
        Ok(())
    }

    pub fn get(&self, setting: Setting) -> f64 {
        match setting {
            Setting::PointSpacing => self.point_spacing,
            Setting::GraphStep => self.graph_step,
            Setting::PointRadius => self.point_radius,
            Setting::LerpWeight => self.lerp_weight,
            Setting::Order => self.order as f64,
        }
    }

    /// Copy with `setting` moved by `steps` increments, clamped to its range.
    pub fn adjusted(self, setting: Setting, steps: i32) -> Self {
        let (min, max) = setting.range();
        let raw = self.get(setting) + setting.step() * steps as f64;
        // Round away accumulated float noise from repeated small steps.
        let scale = 10f64.powi(setting.precision() as i32);
        let value = ((raw * scale).round() / scale).clamp(min, max);

        let mut out = self;
        match setting {
            Setting::PointSpacing => out.point_spacing = value,
            Setting::GraphStep => out.graph_step = value,
            Setting::PointRadius => out.point_radius = value,
            Setting::LerpWeight => out.lerp_weight = value,
            Setting::Order => out.order = value as usize,
        }
        out
    }
}

/// A user-adjustable entry of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    PointSpacing,
    GraphStep,
    PointRadius,
    LerpWeight,
    Order,
}

impl Setting {
    pub const ALL: [Setting; 5] = [
        Setting::PointSpacing,
        Setting::GraphStep,
        Setting::PointRadius,
        Setting::LerpWeight,
        Setting::Order,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Setting::PointSpacing => "Point spacing",
            Setting::GraphStep => "Graph step",
            Setting::PointRadius => "Point radius",
            Setting::LerpWeight => "Lerp weight",
            Setting::Order => "Order",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Setting::PointSpacing | Setting::GraphStep | Setting::PointRadius => "px",
            Setting::LerpWeight => "w",
            Setting::Order => "n",
        }
    }

    /// Inclusive slider range.
    pub fn range(self) -> (f64, f64) {
        match self {
            Setting::PointSpacing => (100.0, 500.0),
            Setting::GraphStep => (1.0, 200.0),
            Setting::PointRadius => (5.0, 100.0),
            Setting::LerpWeight => (0.0, 1.0),
            Setting::Order => (1.0, 20.0),
        }
    }

    pub fn step(self) -> f64 {
        match self {
            Setting::PointSpacing => 10.0,
            Setting::GraphStep => 1.0,
            Setting::PointRadius => 5.0,
            Setting::LerpWeight => 0.01,
            Setting::Order => 1.0,
        }
    }

    pub fn precision(self) -> usize {
        match self {
            Setting::LerpWeight => 2,
            _ => 0,
        }
    }

    pub fn format_value(self, value: f64) -> String {
        format!("{value:.prec$}{}", self.suffix(), prec = self.precision())
    }
}
