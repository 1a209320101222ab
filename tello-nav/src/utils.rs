//! Shared angle helpers. All angles here are in degrees.

/// Normalize angle to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180]
///
/// Positive means counter-clockwise.
#[inline]
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let d = normalize_degrees(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}
