//! Polynomial evaluation.

/// Evaluate `Σ coefficients[i] * x^i` (Horner's scheme). Empty input is 0.
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
