//! Reporting utilities: residuals and formatted output.

use crate::domain::{PointId, PointSet};
use crate::fit::PolynomialRegression;

pub mod format;

pub use format::*;

/// Observed vs fitted value for one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    pub id: PointId,
    pub x: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
}

/// Compare every point with the displayed curve.
pub fn compute_residuals(points: &PointSet, regression: &PolynomialRegression) -> Vec<Residual> {
    points
        .iter()
        .map(|p| {
            let x = p.position.x();
            let y_obs = p.position.y();
            let y_fit = regression.predict(x);
            Residual {
                id: p.id,
                x,
                y_obs,
                y_fit,
                residual: y_obs - y_fit,
            }
        })
        .collect()
}

/// Root-mean-square residual; `None` without residuals.
pub fn rmse(residuals: &[Residual]) -> Option<f64> {
    if residuals.is_empty() {
        return None;
    }
    let sse: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();
    Some((sse / residuals.len() as f64).sqrt())
}
