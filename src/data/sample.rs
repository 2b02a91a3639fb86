//! Random point scatter around a hidden low-degree polynomial.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::PointPos;
use crate::error::AppError;
use crate::fit::{Sample, refit};
use crate::math::evaluate;

/// Highest degree of the hidden baseline curve.
const MAX_BASELINE_DEGREE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterConfig {
    pub count: usize,
    pub seed: u64,
    /// Abscissa range, point space.
    pub x_min: f64,
    pub x_max: f64,
    /// Range of the baseline's anchor ordinates.
    pub y_min: f64,
    pub y_max: f64,
    /// Standard deviation of the vertical noise.
    pub noise: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 12,
            seed: 42,
            x_min: 0.0,
            x_max: 15.0,
            y_min: 0.0,
            y_max: 10.0,
            noise: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scatter {
    pub points: Vec<PointPos>,
    /// The hidden curve, lowest power first.
    pub baseline: Vec<f64>,
}

pub fn generate_scatter(config: &ScatterConfig) -> Result<Scatter, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Scatter point count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for scatter generation."));
    }
    if !(config.y_min.is_finite() && config.y_max.is_finite() && config.y_max >= config.y_min) {
        return Err(AppError::new(2, "Invalid y range for scatter generation."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Scatter noise must be a non-negative number."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let baseline = baseline_curve(&mut rng, config);

    let points = (0..config.count)
        .map(|_| {
            let x = rng.gen_range(config.x_min..=config.x_max);
            let y = evaluate(&baseline, x) + noise.sample(&mut rng);
            PointPos::new(round2(x), round2(y))
        })
        .collect();

    Ok(Scatter { points, baseline })
}

/// Interpolate `degree + 1` random anchors spread evenly over the x range.
fn baseline_curve(rng: &mut StdRng, config: &ScatterConfig) -> Vec<f64> {
    let degree = rng.gen_range(1..=MAX_BASELINE_DEGREE);
    let span = config.x_max - config.x_min;
    let anchors: Vec<Sample> = (0..=degree)
        .map(|i| {
            let x = config.x_min + span * i as f64 / degree as f64;
            let y = if config.y_max > config.y_min {
                rng.gen_range(config.y_min..=config.y_max)
            } else {
                config.y_min
            };
            Sample::new(x, y)
        })
        .collect();
    refit(&anchors, degree).coefficients
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_points() {
        let config = ScatterConfig::default();
        let a = generate_scatter(&config).unwrap();
        let b = generate_scatter(&config).unwrap();
        assert_eq!(a.points, b.points);
        assert_eq!(a.baseline, b.baseline);

        let c = generate_scatter(&ScatterConfig { seed: 7, ..config }).unwrap();
        assert_ne!(a.points, c.points);
    }

    #[test]
    fn points_stay_in_the_x_range() {
        let config = ScatterConfig {
            count: 200,
            ..ScatterConfig::default()
        };
        let scatter = generate_scatter(&config).unwrap();
        assert_eq!(scatter.points.len(), 200);
        for p in &scatter.points {
            assert!((config.x_min..=config.x_max).contains(&p.x()), "{p:?}");
            assert!(p.is_finite());
        }
    }

    #[test]
    fn zero_noise_lands_on_the_baseline() {
        let config = ScatterConfig {
            noise: 0.0,
            ..ScatterConfig::default()
        };
        let scatter = generate_scatter(&config).unwrap();
        assert!((2..=MAX_BASELINE_DEGREE + 1).contains(&scatter.baseline.len()));
        for p in &scatter.points {
            // Both coordinates are rounded to 0.01.
            let expected = evaluate(&scatter.baseline, p.x());
            assert!((p.y() - expected).abs() < 0.05, "{p:?} vs {expected}");
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = [
            ScatterConfig { count: 0, ..ScatterConfig::default() },
            ScatterConfig { x_min: 5.0, x_max: 5.0, ..ScatterConfig::default() },
            ScatterConfig { noise: -1.0, ..ScatterConfig::default() },
            ScatterConfig { y_min: f64::NAN, ..ScatterConfig::default() },
        ];
        for config in bad {
            let err = generate_scatter(&config).unwrap_err();
            assert_eq!(err.exit_code(), 2);
        }
    }
}
