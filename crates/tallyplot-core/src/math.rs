//! Math helpers shared by the geometry engines.
//!
//! Vector types come from [`glam`]; everything in pixel space is `f32`,
//! everything in data space is `f64`.
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Vec2, vec2};

/// Tolerance used when comparing accumulated floating point sums.
pub const EPSILON: f64 = 1e-9;

/// Return `value` if it is a usable divisor, otherwise `1.0`.
///
/// Zero, negative and non-finite totals all map to `1.0`, so a division by
/// the result yields zero-length geometry instead of `NaN` or infinity.
///
/// ```
/// use tallyplot_core::math::safe_divisor;
///
/// assert_eq!(safe_divisor(0.0), 1.0);
/// assert_eq!(safe_divisor(f64::NAN), 1.0);
/// assert_eq!(safe_divisor(42.0), 42.0);
/// ```
#[inline]
pub fn safe_divisor(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Share of `value` in `total`, in percent. Zero when `total` is not positive.
#[inline]
pub fn percentage(value: f64, total: f64) -> f64 {
    if total > 0.0 && total.is_finite() {
        (value / total) * 100.0
    } else {
        0.0
    }
}

/// Point on a circle of `radius` around `center` at `degrees`.
///
/// Angles follow screen conventions: 0° points right, angles grow clockwise
/// because the y axis points down.
#[inline]
pub fn polar_to_cartesian(center: Vec2, radius: f32, degrees: f64) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(
        center.x + radius * radians.cos() as f32,
        center.y + radius * radians.sin() as f32,
    )
}

/// Approximate equality for `f64` within `tolerance`.
#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
