//! Approximate float assertions.

/// Default tolerance of [`assert_approx_eq!`](crate::assert_approx_eq).
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Assert that two floats differ by at most a tolerance.
///
/// Both operands are converted to `f64`, so `f32` and `f64` values can be
/// mixed.
///
/// ```rust
/// use tallyplot_test_utils::assert_approx_eq;
///
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(10.0_f32, 10.004, 0.01);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::approx::DEFAULT_TOLERANCE)
    };
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {{
        let left = f64::from($left);
        let right = f64::from($right);
        let tolerance = f64::from($tolerance);
        assert!(
            (left - right).abs() <= tolerance,
            "assertion `left ≈ right` failed\n  left: {left}\n right: {right}\n   tol: {tolerance}",
        );
    }};
}
