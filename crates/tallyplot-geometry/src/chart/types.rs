//! Core chart data types.

use super::style::Palette;
use crate::Color;
use tallyplot_core::math::{percentage, safe_divisor};

const FNV_OFFSET_BASIS: u32 = 2166136261;
const FNV_PRIME: u32 = 16777619;

fn fnv1a(seed: u32, bytes: &[u8]) -> u32 {
    let mut hash = seed;
    for byte in bytes {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Identifier of one chart instance on a page.
///
/// Used to derive ids that must be unique per chart, such as SVG gradient
/// ids. Either assign ids explicitly or derive them from a stable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChartId(pub u32);

impl ChartId {
    /// Create a chart ID from an explicit value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Create a chart ID from a name using FNV-1a.
    ///
    /// The same name always produces the same ID.
    pub fn from_name(name: &str) -> Self {
        Self(fnv1a(FNV_OFFSET_BASIS, name.as_bytes()))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Deterministic id for a gradient definition (e.g. an SVG `<linearGradient>`).
///
/// Derived from the owning chart and the gradient's base color, so rebuilding
/// the same chart yields the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GradientId {
    chart: ChartId,
    hash: u32,
}

impl GradientId {
    /// Derive the gradient id for `color` within `chart`.
    pub fn new(chart: ChartId, color: Color) -> Self {
        let hash = fnv1a(
            fnv1a(FNV_OFFSET_BASIS, &chart.0.to_le_bytes()),
            &color.to_rgba_u8(),
        );
        Self { chart, hash }
    }

    /// The chart this gradient belongs to.
    pub fn chart(&self) -> ChartId {
        self.chart
    }

    /// Reference form for a `fill` attribute: `url(#...)`.
    pub fn fill_url(&self) -> String {
        format!("url(#{self})")
    }
}

impl std::fmt::Display for GradientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tp-grad-{:08x}-{:08x}", self.chart.0, self.hash)
    }
}

/// A labelled value in a series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataPoint {
    /// Category or x-axis label
    pub label: String,
    /// Non-negative value
    pub value: f64,
    /// Explicit color; falls back to the palette by index
    pub color: Option<Color>,
}

impl DataPoint {
    /// Create a data point without an explicit color.
    ///
    /// Negative and non-finite values are stored as `0.0`.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: sanitize_value(value),
            color: None,
        }
    }

    /// Set the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl<S: Into<String>> From<(S, f64)> for DataPoint {
    fn from((label, value): (S, f64)) -> Self {
        Self::new(label, value)
    }
}

/// Clamp a value into the domain the engines accept.
pub(crate) fn sanitize_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// An ordered sequence of data points for one chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    points: Vec<DataPoint>,
}

impl Series {
    /// Create a series from points.
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    /// Create a series from `(label, value)` tuples.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        Self {
            points: pairs.into_iter().map(DataPoint::from).collect(),
        }
    }

    /// The points in order.
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Take the points out of the series.
    pub fn into_points(self) -> Vec<DataPoint> {
        self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`.
    pub fn get(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Largest value, never below `1.0`.
    ///
    /// This is the value domain maximum the line and bar engines scale
    /// against, so an all-zero series still has a usable divisor.
    pub fn max_value(&self) -> f64 {
        let max = self.points.iter().map(|p| p.value).fold(0.0, f64::max);
        safe_divisor(max).max(1.0)
    }

    /// Share of the point at `index` in the series total, in percent.
    pub fn percentage(&self, index: usize) -> f64 {
        self.points
            .get(index)
            .map(|p| percentage(p.value, self.total()))
            .unwrap_or(0.0)
    }

    /// Share of every point in the total, in percent.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.points
            .iter()
            .map(|p| percentage(p.value, total))
            .collect()
    }

    /// Resolved color of the point at `index`.
    pub fn color_at(&self, index: usize, palette: &dyn Palette) -> Color {
        self.points
            .get(index)
            .and_then(|p| p.color)
            .unwrap_or_else(|| palette.color(index))
    }
}

impl FromIterator<DataPoint> for Series {
    fn from_iter<T: IntoIterator<Item = DataPoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One segment of a stacked bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

impl BarSegment {
    /// Create a bar segment. Negative and non-finite values become `0.0`.
    pub fn new(label: impl Into<String>, value: f64, color: Color) -> Self {
        Self {
            label: label.into(),
            value: sanitize_value(value),
            color,
        }
    }
}

/// A bar made of stacked segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedBar {
    pub label: String,
    pub segments: Vec<BarSegment>,
}

impl StackedBar {
    /// Create an empty stacked bar.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            segments: Vec::new(),
        }
    }

    /// Append a segment.
    pub fn with_segment(mut self, segment: BarSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Sum of segment values.
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.value).sum()
    }
}
