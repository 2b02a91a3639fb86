//! The smoothing law shared by the coefficient animation and the camera.

/// Linear interpolation `start * (1 - weight) + end * weight`.
///
/// A non-finite result falls back to `end`. Callers that may pass a non-finite
/// `end` should go through [`advance`] instead, which also guards that case.
pub fn lerp(start: f64, end: f64, weight: f64) -> f64 {
    let value = start * (1.0 - weight) + end * weight;
    if value.is_finite() { value } else { end }
}

/// One smoothing step from `current` toward `target`.
///
/// - indices present in both are interpolated with `rate`
/// - indices only in `target` are seeded from it directly (no lag for new terms)
/// - indices only in `current` ease toward 0, so the output is never shorter
///   than `current`
///
/// Whenever a step would be non-finite the coefficient falls back to the target
/// (if finite), else to the previous value (if finite), else to 0.
pub fn advance(current: &[f64], target: &[f64], rate: f64) -> Vec<f64> {
    let len = current.len().max(target.len());
    (0..len)
        .map(|i| {
            let goal = target.get(i).copied().unwrap_or(0.0);
            let Some(&prev) = current.get(i) else {
                return finite_or(goal, 0.0);
            };
            let next = prev * (1.0 - rate) + goal * rate;
            if next.is_finite() {
                next
            } else if goal.is_finite() {
                goal
            } else {
                finite_or(prev, 0.0)
            }
        })
        .collect()
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
