//! Least-squares polynomial fit via the normal equations.
//!
//! For degree `k` the unknowns are `c_0..c_k` in `y ≈ Σ c_i x^i`. Minimising the
//! squared error gives the `(k+1) × (k+1)` system
//!
//! ```text
//! Σ_j (Σ_p x_p^(i+j)) c_j = Σ_p x_p^i y_p      for i = 0..=k
//! ```
//!
//! The matrix only depends on the power sums `S_m = Σ x^m` for `m ≤ 2k`, so each
//! sample is visited once.

use nalgebra::DMatrix;

use crate::domain::PointPos;
use crate::math::solve_augmented;

/// One observation. `y = None` marks a sample with no value; it is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: Option<f64>,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }

    pub fn missing(x: f64) -> Self {
        Self { x, y: None }
    }

    /// The `(x, y)` pair if this sample takes part in a fit.
    pub fn usable(&self) -> Option<(f64, f64)> {
        match self.y {
            Some(y) if self.x.is_finite() && y.is_finite() => Some((self.x, y)),
            _ => None,
        }
    }
}

impl From<PointPos> for Sample {
    fn from(p: PointPos) -> Self {
        Sample::new(p.x(), p.y())
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Sample::new(x, y)
    }
}

/// Result of one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    /// `coefficients[i]` multiplies `x^i`. Empty when no sample was usable.
    pub coefficients: Vec<f64>,
    /// Rank reported by the solver.
    pub rank: usize,
    /// Samples that took part in the fit.
    pub samples_used: usize,
}

impl PolynomialFit {
    pub fn empty() -> Self {
        Self {
            coefficients: Vec::new(),
            rank: 0,
            samples_used: 0,
        }
    }

    /// The system had no unique solution (too few distinct x for the order).
    pub fn is_degenerate(&self) -> bool {
        self.rank < self.coefficients.len()
    }

    pub fn is_finite(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_finite())
    }
}

/// Build the augmented normal-equations matrix `[M | r]` for `order`.
pub fn normal_equations(samples: &[Sample], order: usize) -> DMatrix<f64> {
    let n = order + 1;
    let mut power_sums = vec![0.0; 2 * n - 1];
    let mut moment_sums = vec![0.0; n];

    for (x, y) in samples.iter().filter_map(Sample::usable) {
        let mut p = 1.0;
        for (m, sum) in power_sums.iter_mut().enumerate() {
            *sum += p;
            if m < n {
                moment_sums[m] += p * y;
            }
            p *= x;
        }
    }

    DMatrix::from_fn(n, n + 1, |i, j| {
        if j < n { power_sums[i + j] } else { moment_sums[i] }
    })
}

/// Fit a degree-`order` polynomial to `samples`.
///
/// Pure: the same inputs always give the same fit.
pub fn refit(samples: &[Sample], order: usize) -> PolynomialFit {
    let samples_used = samples.iter().filter(|s| s.usable().is_some()).count();
    if samples_used == 0 {
        return PolynomialFit::empty();
    }

    let system = normal_equations(samples, order);
    let solution = solve_augmented(&system);

    PolynomialFit {
        coefficients: solution.coefficients.iter().copied().collect(),
        rank: solution.rank,
        samples_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::evaluate;

    #[test]
    fn normal_matrix_holds_power_sums() {
        let samples = [Sample::new(1.0, 2.0), Sample::new(2.0, 3.0)];
        let m = normal_equations(&samples, 1);
        // [[n, Σx], [Σx, Σx²]] | [Σy, Σxy]
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m[(0, 0)], 2.0);
        assert_eq!(m[(0, 1)], 3.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(m[(1, 1)], 5.0);
        assert_eq!(m[(0, 2)], 5.0);
        assert_eq!(m[(1, 2)], 8.0);
    }

    #[test]
    fn missing_and_non_finite_samples_are_skipped() {
        let samples = [
            Sample::new(1.0, 1.0),
            Sample::missing(5.0),
            Sample::new(f64::NAN, 2.0),
            Sample::new(3.0, 3.0),
        ];
        let fit = refit(&samples, 1);
        assert_eq!(fit.samples_used, 2);
        assert!((fit.coefficients[0]).abs() < 1e-12);
        assert!((fit.coefficients[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn no_usable_samples_gives_an_empty_fit() {
        assert_eq!(refit(&[], 3), PolynomialFit::empty());
        assert_eq!(refit(&[Sample::missing(1.0)], 3), PolynomialFit::empty());
    }

    #[test]
    fn least_squares_line_through_noisy_points() {
        let samples = [
            Sample::new(0.0, 1.5),
            Sample::new(1.0, 2.5),
            Sample::new(2.0, 5.5),
            Sample::new(3.0, 6.5),
        ];
        let fit = refit(&samples, 1);
        assert_eq!(fit.rank, 2);
        // Closed form: slope = cov(x, y) / var(x) = 9 / 5
        let slope = 1.8;
        let intercept = 4.0 - slope * 1.5;
        assert!((fit.coefficients[1] - slope).abs() < 1e-10);
        assert!((fit.coefficients[0] - intercept).abs() < 1e-10);
    }

    #[test]
    fn coincident_x_at_high_order_is_degenerate_but_finite() {
        let samples = [Sample::new(2.0, 1.0), Sample::new(2.0, 3.0)];
        let fit = refit(&samples, 4);
        assert_eq!(fit.coefficients.len(), 5);
        assert!(fit.is_degenerate());
        assert!(fit.is_finite());
        // Best available answer at x = 2 is the mean.
        assert!((evaluate(&fit.coefficients, 2.0) - 2.0).abs() < 1e-9);
    }
}
