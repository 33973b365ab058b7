//! Donut, pie and gauge geometry.
//!
//! Segments sweep clockwise from a fixed start angle (12 o'clock by
//! default). Each visible segment becomes one closed annulus path:
//!
//! ```text
//! M outer-start  A outer-end (sweep 1)  L inner-end  A inner-start (sweep 0)  Z
//! ```
//!
//! Angles are in degrees, in screen space (y down), so increasing angles run
//! clockwise.

use super::captions::Captions;
use super::style::{NEUTRAL_COLOR, Palette};
use super::tooltip::format_value;
use super::types::{DataPoint, Series};
use crate::error::{ChartError, ChartResult};
use crate::{Color, Path, PathBuilder};
use glam::Vec2;
use tallyplot_core::math::{percentage, polar_to_cartesian, safe_divisor};
use tallyplot_core::profiling::profile_scope;

/// Angle of the first segment's leading edge (12 o'clock).
pub const DEFAULT_START_ANGLE: f64 = -90.0;

/// Tooltip anchor distance from the center, as a fraction of the outer radius.
pub const DEFAULT_ANCHOR_RATIO: f32 = 0.75;

/// Sweeps within this many degrees of a full turn are drawn as two arcs.
const FULL_TURN_EPSILON: f64 = 1e-6;

/// Layout of a radial chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialConfig {
    /// Center of the ring in pixels
    pub center: Vec2,
    /// Outer radius in pixels
    pub outer_radius: f32,
    /// Inner (hole) radius in pixels; `0` draws a pie
    pub inner_radius: f32,
    /// Angle of the first segment's leading edge, in degrees
    pub start_angle: f64,
    /// Total angular extent shared by all segments, in degrees
    pub sweep: f64,
    /// Tooltip anchor radius as a fraction of `outer_radius`
    pub anchor_ratio: f32,
}

impl RadialConfig {
    /// Full donut centered in a `2 * outer` square.
    pub fn new(outer_radius: f32, inner_radius: f32) -> Self {
        Self {
            center: Vec2::splat(outer_radius),
            outer_radius,
            inner_radius,
            start_angle: DEFAULT_START_ANGLE,
            sweep: 360.0,
            anchor_ratio: DEFAULT_ANCHOR_RATIO,
        }
    }

    /// Full pie (no hole).
    pub fn pie(radius: f32) -> Self {
        Self::new(radius, 0.0)
    }

    /// Semicircular gauge opening downward, from 9 o'clock to 3 o'clock.
    pub fn gauge(outer_radius: f32, inner_radius: f32) -> Self {
        Self {
            start_angle: -180.0,
            sweep: 180.0,
            ..Self::new(outer_radius, inner_radius)
        }
    }

    /// Set the center.
    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    /// Set the start angle in degrees.
    pub fn with_start_angle(mut self, degrees: f64) -> Self {
        self.start_angle = degrees;
        self
    }

    /// Set the total sweep in degrees.
    pub fn with_sweep(mut self, degrees: f64) -> Self {
        self.sweep = degrees;
        self
    }

    /// Set the tooltip anchor ratio.
    pub fn with_anchor_ratio(mut self, ratio: f32) -> Self {
        self.anchor_ratio = ratio;
        self
    }

    /// Check the radii and sweep.
    pub fn validate(&self) -> ChartResult<()> {
        let (inner, outer) = (self.inner_radius, self.outer_radius);
        if !inner.is_finite() || !outer.is_finite() || inner < 0.0 || inner >= outer {
            return Err(ChartError::InvalidRadii { inner, outer });
        }
        if !self.sweep.is_finite() || self.sweep <= 0.0 || self.sweep > 360.0 {
            return Err(ChartError::InvalidConfig(format!(
                "radial sweep {} must be within (0, 360]",
                self.sweep
            )));
        }
        Ok(())
    }

    /// Copy with every field forced into a drawable range.
    pub fn sanitized(&self) -> Self {
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let outer = finite_or(self.outer_radius, 0.0).max(0.0);
        let inner = finite_or(self.inner_radius, 0.0).clamp(0.0, outer);
        let sweep = if self.sweep.is_finite() && self.sweep > 0.0 {
            self.sweep.min(360.0)
        } else {
            360.0
        };
        let start_angle = if self.start_angle.is_finite() {
            self.start_angle
        } else {
            DEFAULT_START_ANGLE
        };
        Self {
            center: if self.center.is_finite() {
                self.center
            } else {
                Vec2::ZERO
            },
            outer_radius: outer,
            inner_radius: inner,
            start_angle,
            sweep,
            anchor_ratio: finite_or(self.anchor_ratio, DEFAULT_ANCHOR_RATIO).clamp(0.0, 1.0),
        }
    }
}

/// One slice of a radial chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Position in the source series
    pub index: usize,
    pub label: String,
    pub value: f64,
    /// Resolved fill color
    pub color: Color,
    /// Share of the total, in percent
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    /// Closed outline; `None` for zero-width segments
    pub path: Option<Path>,
    /// Tooltip anchor inside the ring along `mid_angle`
    pub anchor: Vec2,
}

impl Segment {
    /// Angular width in degrees.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether the segment produced an outline.
    pub fn is_visible(&self) -> bool {
        self.path.is_some()
    }

    /// SVG path data, empty for zero-width segments.
    pub fn path_svg(&self) -> String {
        self.path.as_ref().map(Path::to_svg).unwrap_or_default()
    }
}

/// Text shown in the middle of a donut.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterLabel {
    pub value: f64,
    pub caption: String,
}

impl CenterLabel {
    /// The value formatted for display.
    pub fn formatted_value(&self) -> String {
        format_value(self.value)
    }
}

/// Output of [`build_radial_geometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGeometry {
    /// One entry per input point, in input order
    pub segments: Vec<Segment>,
    /// Sum of all values
    pub total: f64,
    /// The sanitized layout the geometry was built with
    pub config: RadialConfig,
    /// Neutral ring shown instead of segments when `total == 0`
    pub placeholder: Option<Path>,
}

impl RadialGeometry {
    /// Whether there is nothing to draw but the placeholder.
    pub fn is_empty(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Color the placeholder ring is drawn with.
    pub fn placeholder_color(&self) -> Color {
        NEUTRAL_COLOR
    }

    /// Center label: the total plus a localized caption.
    ///
    /// Independent of hover state. When the chart is empty the caption is
    /// the "no data" text.
    pub fn center_label(&self, captions: &dyn Captions) -> CenterLabel {
        let caption = if self.is_empty() {
            captions.no_data()
        } else {
            captions.total()
        };
        CenterLabel {
            value: self.total,
            caption: caption.into_owned(),
        }
    }

    /// Tooltip anchor of the segment at `index`.
    pub fn anchor(&self, index: usize) -> Option<Vec2> {
        self.segments.get(index).map(|s| s.anchor)
    }

    /// Index of the visible segment under `point`, if any.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let config = &self.config;
        let offset = point - config.center;
        let distance = offset.length();
        if distance < config.inner_radius || distance > config.outer_radius {
            return None;
        }

        let angle = f64::from(offset.y).atan2(f64::from(offset.x)).to_degrees();
        let relative = (angle - config.start_angle).rem_euclid(360.0);
        if relative > config.sweep {
            return None;
        }

        self.segments.iter().find_map(|s| {
            let start = s.start_angle - config.start_angle;
            let end = s.end_angle - config.start_angle;
            (s.is_visible() && relative >= start && relative < end).then_some(s.index)
        })
    }
}

/// Compute segments, arc paths and anchors for `series`.
///
/// Zero-value points keep their slot (zero angular width, no path) so
/// indices line up with the input. A zero total yields a placeholder ring
/// and no arcs.
pub fn build_radial_geometry(
    series: &Series,
    config: &RadialConfig,
    palette: &dyn Palette,
) -> RadialGeometry {
    profile_scope!("build_radial_geometry");

    let config = config.sanitized();
    let total = series.total();
    let divisor = safe_divisor(total);
    let has_data = total > 0.0;

    let mut current = config.start_angle;
    let segments: Vec<Segment> = series
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let sweep = if has_data {
                (point.value / divisor) * config.sweep
            } else {
                0.0
            };
            let start_angle = current;
            let end_angle = current + sweep;
            let mid_angle = current + sweep / 2.0;
            current = end_angle;

            let path = (sweep > 0.0).then(|| arc_path(&config, start_angle, end_angle));
            let anchor = polar_to_cartesian(
                config.center,
                config.outer_radius * config.anchor_ratio,
                mid_angle,
            );

            Segment {
                index,
                label: point.label.clone(),
                value: point.value,
                color: series.color_at(index, palette),
                percentage: percentage(point.value, total),
                start_angle,
                end_angle,
                mid_angle,
                path,
                anchor,
            }
        })
        .collect();

    let placeholder = (!has_data).then(|| placeholder_path(&config));

    tracing::trace!(
        "Built radial geometry: {} segment(s), total {}",
        segments.len(),
        total
    );

    RadialGeometry {
        segments,
        total,
        config,
        placeholder,
    }
}

/// Two-segment gauge: the filled share of `max` and the remaining track.
///
/// `value` is clamped into `[0, max]`. A non-positive `max` produces the
/// empty placeholder.
pub fn build_gauge_geometry(
    value: f64,
    max: f64,
    fill: Color,
    track: Color,
    config: &RadialConfig,
) -> RadialGeometry {
    let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
    let value = if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    };
    let series = Series::new(vec![
        DataPoint::new("value", value).with_color(fill),
        DataPoint::new("remaining", max - value).with_color(track),
    ]);
    build_radial_geometry(&series, config, &[fill, track])
}

fn arc_path(config: &RadialConfig, start: f64, end: f64) -> Path {
    let center = config.center;
    let outer = config.outer_radius;
    let inner = config.inner_radius;
    let full_turn = end - start >= 360.0 - FULL_TURN_EPSILON;
    let large_arc = end - start > 180.0;

    let mut builder = PathBuilder::new();
    builder.move_to(polar_to_cartesian(center, outer, start));

    if full_turn {
        // A single arc whose endpoints coincide draws nothing, so split it.
        let mid = start + (end - start) / 2.0;
        builder.arc_to(outer, false, true, polar_to_cartesian(center, outer, mid));
        builder.arc_to(outer, false, true, polar_to_cartesian(center, outer, end));
        if inner > 0.0 {
            builder.close();
            builder.move_to(polar_to_cartesian(center, inner, end));
            builder.arc_to(inner, false, false, polar_to_cartesian(center, inner, mid));
            builder.arc_to(inner, false, false, polar_to_cartesian(center, inner, start));
        }
        builder.close();
        return builder.build();
    }

    builder.arc_to(outer, large_arc, true, polar_to_cartesian(center, outer, end));
    if inner > 0.0 {
        builder.line_to(polar_to_cartesian(center, inner, end));
        builder.arc_to(inner, large_arc, false, polar_to_cartesian(center, inner, start));
    } else {
        builder.line_to(center);
    }
    builder.close();
    builder.build()
}

fn placeholder_path(config: &RadialConfig) -> Path {
    let mut builder = PathBuilder::new();
    builder.circle(config.center, config.outer_radius);
    if config.inner_radius > 0.0 {
        builder.circle(config.center, config.inner_radius);
    }
    builder.build()
}
