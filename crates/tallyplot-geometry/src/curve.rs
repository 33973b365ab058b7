//! Bezier curve primitives and cardinal-spline smoothing.

use glam::Vec2;

/// Default tension for cardinal-spline smoothing of line charts.
pub const DEFAULT_TENSION: f32 = 0.3;

/// A cubic Bezier curve (two control points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point
    pub from: Vec2,
    /// First control point
    pub control1: Vec2,
    /// Second control point
    pub control2: Vec2,
    /// End point
    pub to: Vec2,
}

impl CubicBezier {
    /// Cubic segment from `p1` to `p2` of a cardinal spline through
    /// `p0, p1, p2, p3`.
    ///
    /// `cp1 = p1 + (p2 - p0) * tension` and `cp2 = p2 - (p3 - p1) * tension`.
    /// At the ends of a series, pass the endpoint itself as the missing
    /// neighbour.
    pub fn cardinal(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, tension: f32) -> Self {
        Self {
            from: p1,
            control1: p1 + (p2 - p0) * tension,
            control2: p2 - (p3 - p1) * tension,
            to: p2,
        }
    }
}

/// Cardinal-spline segments through `points`, one per consecutive pair.
///
/// Neighbours beyond either end are clamped to the endpoint. Fewer than two
/// points produce no segments.
pub fn cardinal_segments(points: &[Vec2], tension: f32) -> Vec<CubicBezier> {
    if points.len() < 2 {
        return Vec::new();
    }

    let last = points.len() - 1;
    (0..last)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(last)];
            CubicBezier::cardinal(p0, p1, p2, p3, tension)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_control_points() {
        let p0 = Vec2::new(0.0, 0.0);
        let p1 = Vec2::new(10.0, 10.0);
        let p2 = Vec2::new(20.0, 0.0);
        let p3 = Vec2::new(30.0, 10.0);
        let curve = CubicBezier::cardinal(p0, p1, p2, p3, 0.3);

        assert_eq!(curve.from, p1);
        assert_eq!(curve.to, p2);
        assert!((curve.control1 - Vec2::new(16.0, 10.0)).length() < 1e-5);
        assert!((curve.control2 - Vec2::new(14.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_cardinal_segments_clamp_ends() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(20.0, 0.0),
        ];
        let segments = cardinal_segments(&points, 0.3);
        assert_eq!(segments.len(), 2);

        // First segment: p0 clamps to p1 so cp1 = p1 + (p2 - p1) * t.
        let expected = points[0] + (points[1] - points[0]) * 0.3;
        assert!((segments[0].control1 - expected).length() < 1e-5);

        // Last segment: p3 clamps to p2 so cp2 = p2 - (p2 - p1) * t.
        let expected = points[2] - (points[2] - points[1]) * 0.3;
        assert!((segments[1].control2 - expected).length() < 1e-5);
    }

    #[test]
    fn test_zero_tension_is_straight() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)];
        let segment = cardinal_segments(&points, 0.0)[0];
        assert_eq!(segment.control1, points[0]);
        assert_eq!(segment.control2, points[1]);
    }
}
