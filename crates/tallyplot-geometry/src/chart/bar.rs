//! Bar, stacked bar and tri-state row layout.
//!
//! Lengths are computed along the value axis only; [`BarLayout::rects`] and
//! [`StackedLayout::segment_rects`] place them into evenly spaced slots of a
//! plot rectangle.

use super::captions::TriState;
use super::hover::StackedKey;
use super::rect::Rect;
use super::types::{Series, StackedBar};
use glam::Vec2;
use tallyplot_core::math::{percentage, safe_divisor};
use tallyplot_core::profiling::profile_scope;

/// Smallest drawn length of a strictly positive bar, in pixels.
pub const DEFAULT_MIN_BAR_LENGTH: f32 = 4.0;

/// Direction bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarOrientation {
    /// Bars grow upward from the bottom of the plot
    #[default]
    Vertical,
    /// Bars grow rightward from the left of the plot
    Horizontal,
}

/// Bar layout settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayoutConfig {
    /// Pixels available along the value axis
    pub available_space: f32,
    /// Floor for strictly positive values, capped at `available_space`
    pub min_bar_length: f32,
    /// Value mapped to the full length; defaults to the largest value
    pub max_value: Option<f64>,
}

impl BarLayoutConfig {
    pub fn new(available_space: f32) -> Self {
        Self {
            available_space,
            min_bar_length: DEFAULT_MIN_BAR_LENGTH,
            max_value: None,
        }
    }

    pub fn with_min_bar_length(mut self, length: f32) -> Self {
        self.min_bar_length = length;
        self
    }

    /// Scale against `max` instead of the data maximum.
    pub fn with_max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    fn space(&self) -> f32 {
        if self.available_space.is_finite() {
            self.available_space.max(0.0)
        } else {
            0.0
        }
    }

    fn scale_max(&self, data_max: f64) -> f64 {
        match self.max_value {
            Some(max) => safe_divisor(max),
            None => data_max,
        }
    }

    /// Proportional length of `value`, floored for positive values.
    fn length_for(&self, value: f64, max: f64) -> f32 {
        let space = self.space();
        let length = ((value / max) as f32 * space).clamp(0.0, space);
        if value > 0.0 {
            let floor = if self.min_bar_length.is_finite() {
                self.min_bar_length.max(0.0)
            } else {
                0.0
            };
            length.max(floor).min(space)
        } else {
            length
        }
    }
}

/// Lengths of simple bars.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarLayout {
    /// One length per input value, in input order
    pub lengths: Vec<f32>,
    /// Value the lengths were scaled against
    pub max_value: f64,
}

impl BarLayout {
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Place every bar into its slot within `plot`.
    ///
    /// Slots divide the category axis evenly; `gap` is split on both sides
    /// of each bar.
    pub fn rects(&self, plot: Rect, orientation: BarOrientation, gap: f32) -> Vec<Rect> {
        let count = self.lengths.len();
        self.lengths
            .iter()
            .enumerate()
            .map(|(i, &length)| bar_rect(plot, orientation, slot(plot, orientation, i, count, gap), 0.0, length))
            .collect()
    }

    /// Tooltip anchor at the top center of bar `index`.
    pub fn anchor(
        &self,
        index: usize,
        plot: Rect,
        orientation: BarOrientation,
        gap: f32,
    ) -> Option<Vec2> {
        let length = *self.lengths.get(index)?;
        let slot = slot(plot, orientation, index, self.lengths.len(), gap);
        Some(top_center(bar_rect(plot, orientation, slot, 0.0, length)))
    }
}

/// Lay out simple bars for `series`.
///
/// `length = value / max * space`, where `max` is the largest value (never
/// below `1.0`) unless overridden. Positive values get at least
/// `min_bar_length`.
pub fn build_bar_layout(series: &Series, config: &BarLayoutConfig) -> BarLayout {
    profile_scope!("build_bar_layout");

    let max_value = config.scale_max(series.max_value());
    let lengths = series
        .iter()
        .map(|point| config.length_for(point.value, max_value))
        .collect();

    BarLayout {
        lengths,
        max_value,
    }
}

/// One segment within a stacked bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedSegmentLayout {
    /// Share of the bar's own total, in percent
    pub percentage: f64,
    /// Drawn length: `percentage * bar_length / 100`
    pub length: f32,
    /// Distance from the bar's base to the segment's start
    pub offset: f32,
}

/// One stacked bar.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBarLayout {
    pub total: f64,
    /// Outer length relative to the largest bar total
    pub length: f32,
    pub segments: Vec<StackedSegmentLayout>,
}

/// Lengths of stacked bars and their segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedLayout {
    pub bars: Vec<StackedBarLayout>,
    /// Largest bar total, never below `1.0`
    pub max_total: f64,
}

impl StackedLayout {
    /// Outer length of every bar.
    pub fn bar_lengths(&self) -> Vec<f32> {
        self.bars.iter().map(|b| b.length).collect()
    }

    /// Segment percentages of every bar.
    pub fn segment_percentages(&self) -> Vec<Vec<f64>> {
        self.bars
            .iter()
            .map(|b| b.segments.iter().map(|s| s.percentage).collect())
            .collect()
    }

    /// Rectangles of every segment, grouped per bar.
    pub fn segment_rects(
        &self,
        plot: Rect,
        orientation: BarOrientation,
        gap: f32,
    ) -> Vec<Vec<Rect>> {
        let count = self.bars.len();
        self.bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let slot = slot(plot, orientation, i, count, gap);
                bar.segments
                    .iter()
                    .map(|s| bar_rect(plot, orientation, slot, s.offset, s.length))
                    .collect()
            })
            .collect()
    }

    /// Tooltip anchor at the top center of one segment.
    pub fn anchor(
        &self,
        key: StackedKey,
        plot: Rect,
        orientation: BarOrientation,
        gap: f32,
    ) -> Option<Vec2> {
        let segment = self.bars.get(key.bar)?.segments.get(key.segment)?;
        let slot = slot(plot, orientation, key.bar, self.bars.len(), gap);
        Some(top_center(bar_rect(
            plot,
            orientation,
            slot,
            segment.offset,
            segment.length,
        )))
    }
}

/// Lay out stacked bars.
///
/// Each bar's outer length is its total relative to the largest total.
/// Segments split that length by their share of the bar's own total, so
/// segment lengths always add up to the bar's length.
pub fn build_stacked_layout(bars: &[StackedBar], config: &BarLayoutConfig) -> StackedLayout {
    profile_scope!("build_stacked_layout");

    let data_max = bars.iter().map(StackedBar::total).fold(0.0, f64::max).max(1.0);
    let max_total = config.scale_max(data_max);

    let bars = bars
        .iter()
        .map(|bar| {
            let total = bar.total();
            let length = config.length_for(total, max_total);
            let mut offset = 0.0;
            let segments = bar
                .segments
                .iter()
                .map(|segment| {
                    let share = percentage(segment.value, total);
                    let segment_length = (share as f32) * length / 100.0;
                    let layout = StackedSegmentLayout {
                        percentage: share,
                        length: segment_length,
                        offset,
                    };
                    offset += segment_length;
                    layout
                })
                .collect();
            StackedBarLayout {
                total,
                length,
                segments,
            }
        })
        .collect();

    StackedLayout { bars, max_total }
}

/// A pass / fail / n/a row split into three fixed-order segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriStateSplit {
    pub counts: [f64; 3],
    pub total: f64,
    /// Percent of the row per category; all zero for an empty row
    pub percentages: [f64; 3],
    /// Pixel widths, summing to the row width for a non-empty row
    pub widths: [f32; 3],
    /// Pixel offsets from the row start
    pub offsets: [f32; 3],
}

impl TriStateSplit {
    pub fn percentage(&self, category: TriState) -> f64 {
        self.percentages[category.index()]
    }

    pub fn width(&self, category: TriState) -> f32 {
        self.widths[category.index()]
    }

    /// Visible segments in order, skipping empty categories.
    pub fn visible(&self) -> impl Iterator<Item = TriState> + '_ {
        TriState::ALL
            .into_iter()
            .filter(|c| self.counts[c.index()] > 0.0)
    }
}

/// Split a row of `row_width` pixels between pass, fail and n/a counts.
pub fn split_tri_state(pass: f64, fail: f64, not_applicable: f64, row_width: f32) -> TriStateSplit {
    let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    let counts = [clean(pass), clean(fail), clean(not_applicable)];
    let total: f64 = counts.iter().sum();
    let row_width = if row_width.is_finite() {
        row_width.max(0.0)
    } else {
        0.0
    };

    let percentages = counts.map(|c| percentage(c, total));
    let widths = percentages.map(|p| (p as f32) * row_width / 100.0);
    let offsets = [0.0, widths[0], widths[0] + widths[1]];

    TriStateSplit {
        counts,
        total,
        percentages,
        widths,
        offsets,
    }
}

/// Start and thickness of slot `index` along the category axis.
fn slot(plot: Rect, orientation: BarOrientation, index: usize, count: usize, gap: f32) -> (f32, f32) {
    let (start, extent) = match orientation {
        BarOrientation::Vertical => (plot.x, plot.width),
        BarOrientation::Horizontal => (plot.y, plot.height),
    };
    let size = extent / count.max(1) as f32;
    let gap = gap.clamp(0.0, size);
    (start + size * index as f32 + gap / 2.0, size - gap)
}

fn bar_rect(
    plot: Rect,
    orientation: BarOrientation,
    (start, thickness): (f32, f32),
    offset: f32,
    length: f32,
) -> Rect {
    match orientation {
        BarOrientation::Vertical => {
            Rect::new(start, plot.bottom() - offset - length, thickness, length)
        }
        BarOrientation::Horizontal => Rect::new(plot.x + offset, start, length, thickness),
    }
}

fn top_center(rect: Rect) -> Vec2 {
    Vec2::new(rect.x + rect.width / 2.0, rect.y)
}
