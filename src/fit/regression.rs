//! The animated polynomial regression.
//!
//! Two coefficient vectors are kept:
//!
//! - `target`: the latest least-squares fit, recomputed synchronously whenever
//!   the samples or the order change
//! - `current`: what `predict` evaluates, moved toward `target` once per `update`
//!
//! The smoothing step itself is [`crate::math::advance`].

use log::{debug, warn};

use crate::domain::MAX_ORDER;
use crate::error::ConfigError;
use crate::fit::normal::{PolynomialFit, Sample, refit};
use crate::math::{advance, evaluate};

#[derive(Debug, Clone)]
pub struct PolynomialRegression {
    samples: Vec<Sample>,
    order: usize,
    lerp_weight: f64,
    fit: PolynomialFit,
    current: Vec<f64>,
}

impl PolynomialRegression {
    /// An engine with no samples. `predict` returns 0 until points are set.
    pub fn new(order: usize, lerp_weight: f64) -> Result<Self, ConfigError> {
        check_order(order)?;
        check_lerp_weight(lerp_weight)?;
        Ok(Self {
            samples: Vec::new(),
            order,
            lerp_weight,
            fit: PolynomialFit::empty(),
            current: Vec::new(),
        })
    }

    /// An engine already showing the fit of `points` (no initial animation).
    pub fn with_points<S: Into<Sample>>(
        points: impl IntoIterator<Item = S>,
        order: usize,
        lerp_weight: f64,
    ) -> Result<Self, ConfigError> {
        let mut engine = Self::new(order, lerp_weight)?;
        engine.set_points(points);
        engine.snap();
        Ok(engine)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn lerp_weight(&self) -> f64 {
        self.lerp_weight
    }

    /// Replace the sample set and refit.
    pub fn set_points<S: Into<Sample>>(&mut self, points: impl IntoIterator<Item = S>) {
        self.samples = points.into_iter().map(Into::into).collect();
        self.refit();
    }

    /// Change the polynomial degree and refit the current samples.
    pub fn set_order(&mut self, order: usize) -> Result<(), ConfigError> {
        check_order(order)?;
        self.order = order;
        self.refit();
        Ok(())
    }

    /// Set the fraction of the remaining gap closed per `update`.
    ///
    /// Rejects anything outside `[0, 1]`, NaN included; the old weight is kept.
    pub fn set_lerp_weight(&mut self, lerp_weight: f64) -> Result<(), ConfigError> {
        check_lerp_weight(lerp_weight)?;
        self.lerp_weight = lerp_weight;
        Ok(())
    }

    /// Advance the displayed coefficients one step. Returns whether they moved.
    pub fn update(&mut self) -> bool {
        let next = advance(&self.current, &self.fit.coefficients, self.lerp_weight);
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Jump the displayed coefficients straight to the target.
    pub fn snap(&mut self) {
        self.current = advance(&self.current, &self.fit.coefficients, 1.0);
    }

    /// Evaluate the displayed polynomial at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        evaluate(&self.current, x)
    }

    /// Coefficients currently displayed, lowest power first.
    pub fn coefficients(&self) -> &[f64] {
        &self.current
    }

    /// Coefficients of the latest fit, lowest power first.
    pub fn target_coefficients(&self) -> &[f64] {
        &self.fit.coefficients
    }

    /// Whether the latest fit came from a singular system.
    pub fn is_degenerate(&self) -> bool {
        self.fit.is_degenerate()
    }

    /// Whether `current` has reached `target` exactly.
    pub fn is_settled(&self) -> bool {
        advance(&self.current, &self.fit.coefficients, self.lerp_weight) == self.current
    }

    fn refit(&mut self) {
        self.fit = refit(&self.samples, self.order);
        debug!(
            "refit: samples={} used={} order={} rank={}",
            self.samples.len(),
            self.fit.samples_used,
            self.order,
            self.fit.rank
        );
        if !self.fit.is_finite() {
            warn!(
                "refit produced non-finite coefficients (order={}); keeping the displayed curve",
                self.order
            );
        }
    }
}

fn check_order(order: usize) -> Result<(), ConfigError> {
    if order > MAX_ORDER {
        return Err(ConfigError::OrderTooLarge {
            order,
            max: MAX_ORDER,
        });
    }
    Ok(())
}

fn check_lerp_weight(lerp_weight: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&lerp_weight) {
        return Err(ConfigError::LerpWeightOutOfRange(lerp_weight));
    }
    Ok(())
}
