//! Formatted output: the fitted equation, run summaries and residual tables.
//!
//! Everything here returns `String`s so the TUI and the `fit` command share the
//! same text.

use crate::domain::{COEFFICIENT_PRECISION, PointSet};
use crate::fit::PolynomialRegression;
use crate::report::{Residual, rmse};

/// One displayed term of the equation, already rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub power: usize,
    pub coefficient: f64,
}

/// Terms of `coefficients` (lowest power first in the input), highest power
/// first, rounded to `precision` decimals. Terms that round to zero are dropped.
pub fn display_terms(coefficients: &[f64], precision: usize) -> Vec<Term> {
    let scale = 10f64.powi(precision as i32);
    coefficients
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(power, &c)| {
            let coefficient = (c * scale).round() / scale;
            (coefficient != 0.0).then_some(Term { power, coefficient })
        })
        .collect()
}

/// `y = 0.25x² - 3.00x + 7.00`, or `y = 0` when every term rounds away.
pub fn format_polynomial(coefficients: &[f64], precision: usize) -> String {
    let terms = display_terms(coefficients, precision);
    if terms.is_empty() {
        return "y = 0".to_string();
    }

    let mut out = String::from("y = ");
    for (i, term) in terms.iter().enumerate() {
        if i == 0 {
            out.push_str(&fmt_term(term.coefficient, term.power, precision));
        } else {
            let sign = if term.coefficient < 0.0 { '-' } else { '+' };
            out.push_str(&format!(
                " {sign} {}",
                fmt_term(term.coefficient.abs(), term.power, precision)
            ));
        }
    }
    out
}

/// The equation split one term per line, continuation lines aligned under the
/// first term. Used by the TUI side panel.
pub fn format_equation_lines(coefficients: &[f64], precision: usize) -> Vec<String> {
    let terms = display_terms(coefficients, precision);
    let Some((first, rest)) = terms.split_first() else {
        return vec!["y = 0".to_string()];
    };

    let mut lines = vec![format!(
        "y = {}",
        fmt_term(first.coefficient, first.power, precision)
    )];
    for term in rest {
        let sign = if term.coefficient < 0.0 { '-' } else { '+' };
        lines.push(format!(
            "  {sign} {}",
            fmt_term(term.coefficient.abs(), term.power, precision)
        ));
    }
    lines
}

/// Summary printed by `poly fit`.
pub fn format_run_summary(points: &PointSet, regression: &PolynomialRegression) -> String {
    let mut out = String::new();

    out.push_str("=== poly - Polynomial Regression ===\n");
    out.push_str(&format!(
        "Order: {} | lerp weight: {:.2}\n",
        regression.order(),
        regression.lerp_weight()
    ));

    match bounds(points) {
        Some((x_min, x_max, y_min, y_max)) => out.push_str(&format!(
            "Points: n={} | x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n",
            points.len()
        )),
        None => out.push_str("Points: n=0\n"),
    }

    if regression.is_degenerate() {
        out.push_str("Warning: the system is underdetermined; free coefficients were set to 0.\n");
    }

    out.push_str("\nEquation:\n");
    out.push_str(&format!(
        "  {}\n",
        format_polynomial(regression.target_coefficients(), COEFFICIENT_PRECISION)
    ));
    out.push_str(&format!(
        "- coefficients: {}\n",
        fmt_vec(regression.target_coefficients())
    ));
    out.push('\n');

    out
}

/// `x -> y` rows for the requested abscissas.
pub fn format_predictions(regression: &PolynomialRegression, xs: &[f64]) -> String {
    let mut out = String::new();
    out.push_str("Predictions:\n");
    for &x in xs {
        out.push_str(&format!("  y({x}) = {:.6}\n", regression.predict(x)));
    }
    out
}

/// Per-point residual table followed by the RMSE.
pub fn format_residual_table(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<6} {:>12} {:>12} {:>12} {:>12}\n",
            "id", "x", "y_obs", "y_fit", "residual"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(format!("{:-<6} {:-<12} {:-<12} {:-<12} {:-<12}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<6} {:>12.3} {:>12.3} {:>12.3} {:>12.3}\n",
                r.id.get(),
                r.x,
                r.y_obs,
                r.y_fit,
                r.residual
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if let Some(rmse) = rmse(rows) {
        out.push_str(&format!("RMSE={rmse:.6}\n"));
    }

    out
}

fn bounds(points: &PointSet) -> Option<(f64, f64, f64, f64)> {
    let mut positions = points.positions();
    let first = positions.next()?;
    Some(positions.fold(
        (first.x(), first.x(), first.y(), first.y()),
        |(x0, x1, y0, y1), p| (x0.min(p.x()), x1.max(p.x()), y0.min(p.y()), y1.max(p.y())),
    ))
}

fn fmt_term(coefficient: f64, power: usize, precision: usize) -> String {
    match power {
        0 => format!("{coefficient:.precision$}"),
        1 => format!("{coefficient:.precision$}x"),
        _ => format!("{coefficient:.precision$}x{}", superscript(power)),
    }
}

fn superscript(n: usize) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| DIGITS[d as usize]))
        .collect()
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
