//! Dense linear solver: Gaussian elimination with partial pivoting.
//!
//! The input is an augmented matrix `[A | b]` of shape `n × (n + 1)`. In this
//! crate `A` is always the normal-equations matrix of a polynomial fit, which is
//! symmetric positive semi-definite and badly scaled (entries range from `n` to
//! `Σ x^(2k)`).
//!
//! Numerical notes:
//! - Rows and columns are first equilibrated by `1 / sqrt(|a_ii|)`, so the pivot
//!   threshold is relative rather than tied to the magnitude of `x`.
//! - A column whose best remaining pivot is below [`PIVOT_EPSILON`] is treated as
//!   free and its coefficient is set to 0. For a consistent but rank-deficient
//!   system this still yields a solution, just not a unique one: one point gives
//!   a constant, `k` points at order `≥ k` give the degree `k - 1` interpolant.
//! - Non-finite input produces an all-NaN solution with rank 0.

use nalgebra::{DMatrix, DVector};

/// Smallest pivot magnitude (after equilibration) accepted as non-zero.
///
/// Near machine precision: full-rank fits far from the origin still produce
/// pivots far below `1e-12`.
pub const PIVOT_EPSILON: f64 = 1e-15;

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub coefficients: DVector<f64>,
    /// Number of pivot columns found.
    pub rank: usize,
}

impl Solution {
    /// True when the system had no unique solution.
    pub fn is_degenerate(&self) -> bool {
        self.rank < self.coefficients.len()
    }
}

/// Solve the augmented system `[A | b]`.
///
/// The caller's matrix is left untouched; elimination runs on a scaled copy.
///
/// # Panics
/// Panics if `system` is not `n × (n + 1)`.
pub fn solve_augmented(system: &DMatrix<f64>) -> Solution {
    let n = system.nrows();
    assert_eq!(
        system.ncols(),
        n + 1,
        "augmented system must have one more column than rows"
    );

    if n == 0 {
        return Solution {
            coefficients: DVector::zeros(0),
            rank: 0,
        };
    }

    if system.iter().any(|v| !v.is_finite()) {
        return Solution {
            coefficients: DVector::from_element(n, f64::NAN),
            rank: 0,
        };
    }

    let scale = DVector::from_fn(n, |i, _| {
        let d = system[(i, i)].abs();
        if d > 0.0 { 1.0 / d.sqrt() } else { 1.0 }
    });
    let mut a = DMatrix::from_fn(n, n + 1, |r, c| {
        let v = system[(r, c)] * scale[r];
        if c < n { v * scale[c] } else { v }
    });

    // (row, column) of each accepted pivot, in elimination order.
    let mut pivots: Vec<(usize, usize)> = Vec::with_capacity(n);
    let mut row = 0;

    for col in 0..n {
        if row == n {
            break;
        }

        // Strict `>` keeps the first-seen row on ties.
        let mut best = row;
        let mut best_abs = a[(row, col)].abs();
        for r in (row + 1)..n {
            let v = a[(r, col)].abs();
            if v > best_abs {
                best = r;
                best_abs = v;
            }
        }

        if best_abs < PIVOT_EPSILON {
            continue;
        }

        if best != row {
            a.swap_rows(row, best);
        }

        let pivot = a[(row, col)];
        for r in (row + 1)..n {
            let factor = a[(r, col)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in col..=n {
                let upper = a[(row, c)];
                a[(r, c)] -= factor * upper;
            }
        }

        pivots.push((row, col));
        row += 1;
    }

    // Back substitution; free columns stay at 0.
    let mut z = DVector::zeros(n);
    for &(r, col) in pivots.iter().rev() {
        let mut total = 0.0;
        for c in (col + 1)..n {
            total += a[(r, c)] * z[c];
        }
        z[col] = (a[(r, n)] - total) / a[(r, col)];
    }

    Solution {
        coefficients: z.component_mul(&scale),
        rank: pivots.len(),
    }
}
