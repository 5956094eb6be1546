//! Grid rounding helpers.
//!
//! `epsilon` is relative to the grid: a value within `epsilon * grid` of a
//! grid line is snapped onto it instead of moving a whole step.

pub fn round_to_grid_up(value: f64, grid: f64, epsilon: f64) -> f64 {
    if grid == 0.0 {
        return value;
    }
    (value / grid - epsilon).ceil() * grid
}

pub fn round_to_grid_down(value: f64, grid: f64, epsilon: f64) -> f64 {
    if grid == 0.0 {
        return value;
    }
    (value / grid + epsilon).floor() * grid
}

/// Rounds to the nearest grid multiple, trimmed to 6 decimals.
pub fn round_to_grid_nearest(value: f64, grid: f64) -> f64 {
    if grid == 0.0 {
        return value;
    }
    let snapped = (value / grid).round() * grid;
    (snapped * 1e6).round() / 1e6
}
