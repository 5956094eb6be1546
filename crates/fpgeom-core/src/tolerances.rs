//! Tolerance constants shared by all geometric comparisons.

/// Default positional tolerance in millimeters.
pub const TOL_MM: f64 = 1e-7;

/// Segments shorter than this are treated as rounding artifacts.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-6;

/// Convert a distance tolerance into an angular tolerance (degrees) at `radius`.
///
/// Returns `None` for a zero radius, where every angle is equivalent.
pub fn tol_deg(tol: f64, radius: f64) -> Option<f64> {
    if radius == 0.0 {
        None
    } else {
        Some((tol / radius).to_degrees())
    }
}
