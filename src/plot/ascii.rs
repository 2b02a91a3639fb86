//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid with deterministic output, used by `poly fit`.
//!
//! Plot elements:
//! - points: `o`
//! - fitted curve: `-` line

use crate::domain::PointPos;
use crate::math::evaluate;

/// Render `points` and the polynomial `coefficients` over the points' x range.
pub fn render_ascii_plot(
    points: &[PointPos],
    coefficients: &[f64],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(points);
    let curve = sample_curve(coefficients, x_min, x_max, width);

    let (y_min, y_max) = y_range(points, &curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so points overlay it.
    draw_curve(&mut grid, &curve, x_min, x_max, y_min, y_max);

    for p in points.iter().filter(|p| p.is_finite()) {
        let x = map_x(p.x(), x_min, x_max, width);
        let y = map_y(p.y(), y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Span of the finite x values; a unit window around a lone abscissa.
fn x_range(points: &[PointPos]) -> (f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for p in points.iter().filter(|p| p.is_finite()) {
        min_x = min_x.min(p.x());
        max_x = max_x.max(p.x());
    }
    if !(min_x.is_finite() && max_x.is_finite()) {
        (0.0, 1.0)
    } else if max_x > min_x {
        (min_x, max_x)
    } else {
        (min_x - 1.0, max_x + 1.0)
    }
}

fn sample_curve(coefficients: &[f64], x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, evaluate(coefficients, x))
        })
        .collect()
}

fn y_range(points: &[PointPos], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    let ys = points
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| p.y())
        .chain(curve.iter().map(|&(_, y)| y))
        .filter(|y| y.is_finite());
    for y in ys {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() {
        Some((min_y - 1.0, min_y + 1.0))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top (y_max).
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let points = [PointPos::new(1.0, 100.0), PointPos::new(10.0, 110.0)];

        let txt = render_ascii_plot(&points, &[105.0], 10, 5);
        let expected = concat!(
            "Plot: x=[1.000, 10.000] | y=[99.50, 110.50]\n",
            "         o\n",
            "          \n",
            "----------\n",
            "          \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_input_still_renders_a_grid() {
        let txt = render_ascii_plot(&[], &[], 12, 6);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("Plot: x=[0.000, 1.000]"));
        assert!(lines[1..].iter().all(|l| l.chars().count() == 12));
    }

    #[test]
    fn rising_line_touches_both_corners() {
        let points = [PointPos::new(0.0, 0.0), PointPos::new(9.0, 9.0)];
        let txt = render_ascii_plot(&points, &[0.0, 1.0], 10, 10);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows[0].chars().last(), Some('o'));
        assert_eq!(rows[9].chars().next(), Some('o'));
        assert_eq!(rows[5].chars().filter(|&c| c == '-').count(), 1);
    }
}
