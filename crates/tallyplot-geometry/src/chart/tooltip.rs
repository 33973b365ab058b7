//! Tooltip placement and content.

use super::radial::Segment;
use super::rect::Rect;
use super::style::Palette;
use super::types::{Series, StackedBar};
use crate::Color;
use glam::Vec2;
use tallyplot_core::math::percentage;

/// Vertical distance between the anchor and the tooltip box.
pub const DEFAULT_TOOLTIP_GAP: f32 = 8.0;

/// Tooltip placement settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipConfig {
    /// Gap between the anchor and the nearest box edge, in pixels
    pub gap: f32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_TOOLTIP_GAP,
        }
    }
}

/// Which side of the anchor the box ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPlacement {
    Above,
    Below,
}

/// Resolved tooltip box position.
///
/// The box lies inside the bounds whenever it fits above or below the
/// anchor. A box taller than the room on either side keeps clear of the
/// anchor and overhangs the far edge of the roomier side instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPosition {
    /// Top-left corner of the box
    pub position: Vec2,
    pub placement: TooltipPlacement,
}

impl TooltipPosition {
    /// The box as a rectangle.
    pub fn rect(&self, box_size: Vec2) -> Rect {
        Rect::new(self.position.x, self.position.y, box_size.x, box_size.y)
    }
}

/// Place a tooltip box of `box_size` for `anchor` inside `bounds`.
///
/// The box is centered above the anchor. It flips below when the top edge
/// would be crossed, and shifts sideways just enough to stay inside the
/// horizontal bounds. A box wider than `bounds` is aligned to the left edge.
///
/// When the box fits neither above nor below, it goes on the side with more
/// room. The box never covers the anchor. Non-finite bounds are treated as
/// empty and a non-finite anchor coordinate falls back to the bounds center.
pub fn compute_tooltip_position(
    anchor: Vec2,
    box_size: Vec2,
    bounds: Rect,
    config: &TooltipConfig,
) -> TooltipPosition {
    let bounds = bounds.sanitized();
    let center = bounds.center();
    let anchor = Vec2::new(
        if anchor.x.is_finite() { anchor.x } else { center.x },
        if anchor.y.is_finite() { anchor.y } else { center.y },
    );
    let size = box_size.max(Vec2::ZERO);
    let size = Vec2::new(
        if size.x.is_finite() { size.x } else { 0.0 },
        if size.y.is_finite() { size.y } else { 0.0 },
    );
    let gap = if config.gap.is_finite() {
        config.gap.max(0.0)
    } else {
        0.0
    };

    let centered = anchor.x - size.x / 2.0;
    let x = if size.x >= bounds.width {
        bounds.x
    } else {
        centered.clamp(bounds.x, bounds.right() - size.x)
    };

    let above = anchor.y - gap - size.y;
    let below = anchor.y + gap;

    let placement = if above >= bounds.y {
        TooltipPlacement::Above
    } else if below + size.y <= bounds.bottom() {
        TooltipPlacement::Below
    } else if bounds.bottom() - anchor.y > anchor.y - bounds.y {
        TooltipPlacement::Below
    } else {
        TooltipPlacement::Above
    };

    // Moving away from the anchor is always allowed, so a box whose anchor
    // sits outside the bounds is pulled back in.
    let y = match placement {
        TooltipPlacement::Above => above.min(bounds.bottom() - size.y),
        TooltipPlacement::Below => below.max(bounds.y),
    };

    TooltipPosition {
        position: Vec2::new(x, y),
        placement,
    }
}

/// What a tooltip shows for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub label: String,
    /// Raw value
    pub value: f64,
    /// Share of the chart total, in percent
    pub percentage: f64,
    /// The element's own color, used for the percentage figure
    pub accent: Color,
}

impl TooltipContent {
    pub fn new(label: impl Into<String>, value: f64, percentage: f64, accent: Color) -> Self {
        Self {
            label: label.into(),
            value,
            percentage,
            accent,
        }
    }

    /// Content for a donut or pie segment.
    pub fn from_segment(segment: &Segment) -> Self {
        Self::new(
            segment.label.clone(),
            segment.value,
            segment.percentage,
            segment.color,
        )
    }

    /// Content for the point (or simple bar) at `index` of `series`.
    pub fn from_series(series: &Series, index: usize, palette: &dyn Palette) -> Option<Self> {
        let point = series.get(index)?;
        Some(Self::new(
            point.label.clone(),
            point.value,
            series.percentage(index),
            series.color_at(index, palette),
        ))
    }

    /// Content for one segment of a stacked bar, relative to the bar's total.
    pub fn from_stacked(bar: &StackedBar, segment: usize) -> Option<Self> {
        let entry = bar.segments.get(segment)?;
        Some(Self::new(
            entry.label.clone(),
            entry.value,
            percentage(entry.value, bar.total()),
            entry.color,
        ))
    }

    /// The value formatted for display.
    pub fn formatted_value(&self) -> String {
        format_value(self.value)
    }

    /// The percentage with one decimal and a `%` suffix.
    pub fn formatted_percentage(&self) -> String {
        format_percentage(self.percentage)
    }
}

/// Format a value: integers without decimals, anything else with up to two.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{rounded:.0}");
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').to_string()
}

/// Format a percentage with one decimal: `"33.3%"`.
pub fn format_percentage(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rounded = (value * 10.0).round() / 10.0;
    // Avoid "-0.0%".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SeriesPalette;
    use crate::chart::types::BarSegment;

    fn surface() -> Rect {
        Rect::from_size(200.0, 200.0)
    }

    #[test]
    fn test_centered_above() {
        let placed = compute_tooltip_position(
            Vec2::new(100.0, 100.0),
            Vec2::new(60.0, 30.0),
            surface(),
            &TooltipConfig::default(),
        );
        assert_eq!(placed.placement, TooltipPlacement::Above);
        assert_eq!(placed.position, Vec2::new(70.0, 62.0));
    }

    #[test]
    fn test_flips_below_at_top_edge() {
        let placed = compute_tooltip_position(
            Vec2::new(100.0, 20.0),
            Vec2::new(60.0, 30.0),
            surface(),
            &TooltipConfig::default(),
        );
        assert_eq!(placed.placement, TooltipPlacement::Below);
        assert_eq!(placed.position.y, 28.0);
    }

    #[test]
    fn test_shifts_left_at_right_edge() {
        let placed = compute_tooltip_position(
            Vec2::new(190.0, 120.0),
            Vec2::new(110.0, 40.0),
            surface(),
            &TooltipConfig::default(),
        );
        assert_eq!(placed.position.x, 90.0);
        assert!(placed.position.x + 110.0 <= 200.0);
    }

    #[test]
    fn test_shifts_right_at_left_edge() {
        let placed = compute_tooltip_position(
            Vec2::new(5.0, 120.0),
            Vec2::new(110.0, 40.0),
            surface(),
            &TooltipConfig::default(),
        );
        assert_eq!(placed.position.x, 0.0);
    }

    #[test]
    fn test_wider_than_bounds_aligns_left() {
        let bounds = Rect::new(10.0, 0.0, 100.0, 200.0);
        let placed = compute_tooltip_position(
            Vec2::new(60.0, 120.0),
            Vec2::new(150.0, 40.0),
            bounds,
            &TooltipConfig::default(),
        );
        assert_eq!(placed.position.x, 10.0);
    }

    #[test]
    fn test_no_room_either_side_picks_larger() {
        let bounds = Rect::from_size(200.0, 60.0);
        let placed = compute_tooltip_position(
            Vec2::new(100.0, 40.0),
            Vec2::new(50.0, 50.0),
            bounds,
            &TooltipConfig::default(),
        );
        assert_eq!(placed.placement, TooltipPlacement::Above);
        // Box bottom stays above the anchor.
        assert!(placed.position.y + 50.0 < 40.0);
    }

    #[test]
    fn test_anchor_above_bounds_is_pulled_inside() {
        let placed = compute_tooltip_position(
            Vec2::new(100.0, -30.0),
            Vec2::new(60.0, 30.0),
            surface(),
            &TooltipConfig::default(),
        );
        assert_eq!(placed.placement, TooltipPlacement::Below);
        assert_eq!(placed.position.y, 0.0);
    }

    #[test]
    fn test_anchor_below_bounds_is_pulled_inside() {
        let placed = compute_tooltip_position(
            Vec2::new(100.0, 260.0),
            Vec2::new(60.0, 30.0),
            surface(),
            &TooltipConfig::default(),
        );
        assert_eq!(placed.placement, TooltipPlacement::Above);
        assert_eq!(placed.position.y, 170.0);
    }

    #[test]
    fn test_non_finite_bounds_do_not_panic() {
        let config = TooltipConfig::default();
        let size = Vec2::new(60.0, 30.0);
        let anchor = Vec2::new(100.0, 100.0);

        let placed =
            compute_tooltip_position(anchor, size, Rect::new(f32::NAN, 0.0, 200.0, 200.0), &config);
        assert_eq!(placed.position, Vec2::new(70.0, 62.0));

        let placed =
            compute_tooltip_position(anchor, size, Rect::new(0.0, 0.0, f32::NAN, 200.0), &config);
        assert!(placed.position.x.is_finite() && placed.position.y.is_finite());

        let placed = compute_tooltip_position(
            Vec2::new(f32::NAN, f32::INFINITY),
            size,
            surface(),
            &TooltipConfig { gap: f32::NAN },
        );
        assert_eq!(placed.position, Vec2::new(70.0, 70.0));
    }

    #[test]
    fn test_content_from_series() {
        let series = Series::from_pairs([("a", 1.0), ("b", 2.0)]);
        let content = TooltipContent::from_series(&series, 1, &SeriesPalette).unwrap();
        assert_eq!(content.label, "b");
        assert_eq!(content.formatted_value(), "2");
        assert_eq!(content.formatted_percentage(), "66.7%");
        assert!(TooltipContent::from_series(&series, 5, &SeriesPalette).is_none());
    }

    #[test]
    fn test_content_from_stacked() {
        let bar = StackedBar::new("team")
            .with_segment(BarSegment::new("open", 1.0, Color::BLACK))
            .with_segment(BarSegment::new("closed", 3.0, Color::WHITE));
        let content = TooltipContent::from_stacked(&bar, 0).unwrap();
        assert_eq!(content.percentage, 25.0);
        assert_eq!(content.accent, Color::BLACK);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.0), "12");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.239), "1.24");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(f64::NAN), "0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(100.0 / 3.0), "33.3%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(-0.01), "0.0%");
    }
}
