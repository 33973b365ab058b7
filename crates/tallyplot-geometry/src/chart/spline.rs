//! Smoothed line and area geometry for ordered value series.

use super::rect::{Insets, Rect};
use super::types::Series;
use crate::curve::{DEFAULT_TENSION, cardinal_segments};
use crate::error::{ChartError, ChartResult};
use crate::{Path, PathBuilder, PathCommand};
use glam::Vec2;
use tallyplot_core::profiling::profile_scope;

/// Label every point up to this many points, otherwise only the ends.
pub const DEFAULT_X_LABEL_LIMIT: usize = 12;

/// Layout of a line chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineConfig {
    /// Container width in pixels, as measured by the host
    pub width: f32,
    /// Container height in pixels
    pub height: f32,
    /// Room reserved for axis labels
    pub padding: Insets,
    /// Cardinal spline tension
    pub tension: f32,
    /// Maximum point count that still gets a label per point
    pub x_label_limit: usize,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            padding: Insets::default(),
            tension: DEFAULT_TENSION,
            x_label_limit: DEFAULT_X_LABEL_LIMIT,
        }
    }
}

impl SplineConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_tension(mut self, tension: f32) -> Self {
        self.tension = tension;
        self
    }

    pub fn with_x_label_limit(mut self, limit: usize) -> Self {
        self.x_label_limit = limit;
        self
    }

    /// Check the viewport and tension.
    pub fn validate(&self) -> ChartResult<()> {
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !self.tension.is_finite() || !(0.0..=1.0).contains(&self.tension) {
            return Err(ChartError::InvalidTension(self.tension));
        }
        Ok(())
    }

    /// Copy with negative or non-finite sizes zeroed and tension clamped.
    pub fn sanitized(&self) -> Self {
        let size = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let inset = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: size(self.width),
            height: size(self.height),
            padding: Insets::new(
                inset(self.padding.top),
                inset(self.padding.right),
                inset(self.padding.bottom),
                inset(self.padding.left),
            ),
            tension: if self.tension.is_finite() {
                self.tension.clamp(0.0, 1.0)
            } else {
                DEFAULT_TENSION
            },
            x_label_limit: self.x_label_limit,
        }
    }

    /// The area inside the padding.
    pub fn plot_area(&self) -> Rect {
        Rect::from_size(self.width, self.height).inset_by(self.padding)
    }
}

/// Horizontal gridline for one y tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridline {
    pub value: f64,
    pub y: f32,
}

/// An x-axis label under a point.
#[derive(Debug, Clone, PartialEq)]
pub struct XLabel {
    /// Index of the labelled point
    pub index: usize,
    pub text: String,
    pub x: f32,
}

/// Output of [`build_spline_path`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplineGeometry {
    /// Stroke path through every point
    pub line_path: Path,
    /// Fillable region under the line, closed along the baseline
    pub area_path: Path,
    /// Pixel position of every point, in input order
    pub pixel_points: Vec<Vec2>,
    /// `[0, round(max / 2), max]`
    pub y_ticks: Vec<f64>,
    pub gridlines: Vec<Gridline>,
    pub x_labels: Vec<XLabel>,
    pub plot_area: Rect,
    /// Value mapped to the top of the plot area, never below `1.0`
    pub max_value: f64,
}

impl SplineGeometry {
    pub fn is_empty(&self) -> bool {
        self.pixel_points.is_empty()
    }

    pub fn line_svg(&self) -> String {
        self.line_path.to_svg()
    }

    pub fn area_svg(&self) -> String {
        self.area_path.to_svg()
    }

    /// Tooltip anchor for the point at `index`: its exact pixel position.
    pub fn anchor(&self, index: usize) -> Option<Vec2> {
        self.pixel_points.get(index).copied()
    }

    /// Index of the point horizontally closest to `x`.
    pub fn nearest_index(&self, x: f32) -> Option<usize> {
        self.pixel_points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
            .map(|(index, _)| index)
    }

    /// Pixel y of `value` in this geometry's scale.
    pub fn y_for(&self, value: f64) -> f32 {
        value_to_y(value, self.max_value, self.plot_area)
    }
}

/// Map `series` into a smoothed line, an area fill, ticks and labels.
///
/// Three or more points are joined with cardinal-spline cubics, two with a
/// straight line. A single point yields a lone `MoveTo` and no area, and an
/// empty series yields empty paths.
pub fn build_spline_path(series: &Series, config: &SplineConfig) -> SplineGeometry {
    profile_scope!("build_spline_path");

    let config = config.sanitized();
    let plot = config.plot_area();
    let max_value = series.max_value();
    let n = series.len();
    let step = plot.width / (n.saturating_sub(1).max(1)) as f32;

    let pixel_points: Vec<Vec2> = series
        .iter()
        .enumerate()
        .map(|(i, point)| Vec2::new(plot.x + i as f32 * step, value_to_y(point.value, max_value, plot)))
        .collect();

    let mut line = PathBuilder::new();
    if let Some(&first) = pixel_points.first() {
        line.move_to(first);
        match pixel_points.len() {
            1 => {}
            2 => {
                line.line_to(pixel_points[1]);
            }
            _ => {
                for curve in cardinal_segments(&pixel_points, config.tension) {
                    line.curve(&curve);
                }
            }
        }
    }
    let line_path = line.build();

    let area_path = match (pixel_points.first(), pixel_points.last()) {
        (Some(first), Some(last)) if pixel_points.len() >= 2 => {
            let baseline = plot.bottom();
            let mut commands = line_path.commands().to_vec();
            commands.push(PathCommand::LineTo(Vec2::new(last.x, baseline)));
            commands.push(PathCommand::LineTo(Vec2::new(first.x, baseline)));
            commands.push(PathCommand::Close);
            Path::from_commands(commands)
        }
        _ => Path::new(),
    };

    let y_ticks = vec![0.0, (max_value * 0.5).round(), max_value];
    let gridlines = y_ticks
        .iter()
        .map(|&value| Gridline {
            value,
            y: value_to_y(value, max_value, plot),
        })
        .collect();

    let x_labels = series
        .iter()
        .zip(&pixel_points)
        .enumerate()
        .filter(|(i, _)| n <= config.x_label_limit || *i == 0 || *i == n - 1)
        .map(|(index, (point, pixel))| XLabel {
            index,
            text: point.label.clone(),
            x: pixel.x,
        })
        .collect();

    tracing::trace!("Built spline geometry: {} point(s), max {}", n, max_value);

    SplineGeometry {
        line_path,
        area_path,
        pixel_points,
        y_ticks,
        gridlines,
        x_labels,
        plot_area: plot,
        max_value,
    }
}

fn value_to_y(value: f64, max_value: f64, plot: Rect) -> f32 {
    let ratio = (value / max_value) as f32;
    plot.y + plot.height - ratio * plot.height
}

/// Live container width, re-read whenever a line chart refreshes.
pub trait WidthSource {
    /// Current width of the container in pixels.
    fn measured_width(&self) -> f32;
}

/// A fixed width.
impl WidthSource for f32 {
    fn measured_width(&self) -> f32 {
        *self
    }
}

/// A line chart that rebuilds its geometry when the data or the container
/// width changes.
///
/// The host calls [`LineChart::refresh`] after resize events and after
/// replacing the data; unchanged inputs reuse the previous geometry.
#[derive(Debug)]
pub struct LineChart {
    series: Series,
    config: SplineConfig,
    /// Bumped on every data change
    data_version: u64,
    built: Option<BuiltState>,
}

#[derive(Debug)]
struct BuiltState {
    data_version: u64,
    width: f32,
    geometry: SplineGeometry,
}

impl LineChart {
    /// Create a chart. The width in `config` is replaced by the measured
    /// width on every refresh.
    pub fn new(series: Series, config: SplineConfig) -> Self {
        Self {
            series,
            config,
            data_version: 0,
            built: None,
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn config(&self) -> &SplineConfig {
        &self.config
    }

    /// Replace the data. The next refresh rebuilds.
    pub fn set_series(&mut self, series: Series) {
        self.series = series;
        self.mark_data_changed();
    }

    /// Replace the layout. The next refresh rebuilds.
    pub fn set_config(&mut self, config: SplineConfig) {
        self.config = config;
        self.mark_data_changed();
    }

    /// Increment the data version, forcing a rebuild on next refresh.
    pub fn mark_data_changed(&mut self) {
        self.data_version = self.data_version.wrapping_add(1);
    }

    /// Re-measure the container and rebuild if anything changed.
    ///
    /// Returns `true` if the geometry was rebuilt.
    pub fn refresh(&mut self, width: &dyn WidthSource) -> bool {
        let measured = width.measured_width();
        let measured = if measured.is_finite() {
            measured.max(0.0)
        } else {
            0.0
        };

        if let Some(built) = &self.built
            && built.data_version == self.data_version
            && built.width == measured
        {
            return false;
        }

        tracing::debug!(
            "Rebuilding line chart: width {}, {} point(s)",
            measured,
            self.series.len()
        );

        let config = SplineConfig {
            width: measured,
            ..self.config
        };
        self.built = Some(BuiltState {
            data_version: self.data_version,
            width: measured,
            geometry: build_spline_path(&self.series, &config),
        });
        true
    }

    /// Geometry from the last refresh, if any.
    pub fn geometry(&self) -> Option<&SplineGeometry> {
        self.built.as_ref().map(|b| &b.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> Series {
        Series::from_pairs([("Jan", 0.0), ("Feb", 10.0), ("Mar", 5.0)])
    }

    #[test]
    fn test_point_mapping() {
        let geometry = build_spline_path(&months(), &SplineConfig::new(300.0, 220.0));
        assert_eq!(
            geometry.pixel_points,
            vec![
                Vec2::new(45.0, 185.0),
                Vec2::new(162.5, 20.0),
                Vec2::new(280.0, 102.5),
            ]
        );
        assert_eq!(geometry.y_ticks, vec![0.0, 5.0, 10.0]);
        assert_eq!(geometry.gridlines[2].y, 20.0);
    }

    #[test]
    fn test_three_points_use_cubics() {
        let geometry = build_spline_path(&months(), &SplineConfig::new(300.0, 220.0));
        let commands = geometry.line_path.commands();
        assert!(matches!(commands[0], PathCommand::MoveTo(_)));
        assert_eq!(
            commands
                .iter()
                .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_two_points_straight_line() {
        let series = Series::from_pairs([("a", 1.0), ("b", 2.0)]);
        let geometry = build_spline_path(&series, &SplineConfig::new(300.0, 220.0));
        assert_eq!(geometry.line_svg(), "M45,102.5 L280,20");
    }

    #[test]
    fn test_single_point_degrades() {
        let series = Series::from_pairs([("a", 4.0)]);
        let geometry = build_spline_path(&series, &SplineConfig::new(300.0, 220.0));
        assert_eq!(geometry.line_path.len(), 1);
        assert!(geometry.area_path.is_empty());
        assert_eq!(geometry.pixel_points[0].x, 45.0);
    }

    #[test]
    fn test_empty_series() {
        let geometry = build_spline_path(&Series::default(), &SplineConfig::new(300.0, 220.0));
        assert!(geometry.is_empty());
        assert!(geometry.line_svg().is_empty());
        assert!(geometry.x_labels.is_empty());
        assert_eq!(geometry.max_value, 1.0);
    }

    #[test]
    fn test_area_closes_on_baseline() {
        let geometry = build_spline_path(&months(), &SplineConfig::new(300.0, 220.0));
        let svg = geometry.area_svg();
        assert!(svg.ends_with("L280,185 L45,185 Z"), "{svg}");
    }

    #[test]
    fn test_x_labels_thin_out() {
        let series = Series::from_pairs((0..20).map(|i| (format!("d{i}"), i as f64)));
        let geometry = build_spline_path(&series, &SplineConfig::new(300.0, 220.0));
        let labels: Vec<&str> = geometry.x_labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(labels, vec!["d0", "d19"]);

        let geometry = build_spline_path(&months(), &SplineConfig::new(300.0, 220.0));
        assert_eq!(geometry.x_labels.len(), 3);
    }

    #[test]
    fn test_nearest_index() {
        let geometry = build_spline_path(&months(), &SplineConfig::new(300.0, 220.0));
        assert_eq!(geometry.nearest_index(0.0), Some(0));
        assert_eq!(geometry.nearest_index(170.0), Some(1));
        assert_eq!(geometry.nearest_index(500.0), Some(2));
        assert_eq!(SplineGeometry::default().nearest_index(10.0), None);
    }

    #[test]
    fn test_validate() {
        assert!(SplineConfig::new(300.0, 220.0).validate().is_ok());
        assert!(matches!(
            SplineConfig::new(-1.0, 220.0).validate(),
            Err(ChartError::InvalidViewport { .. })
        ));
        assert!(matches!(
            SplineConfig::new(300.0, 220.0).with_tension(2.0).validate(),
            Err(ChartError::InvalidTension(_))
        ));
    }

    #[test]
    fn test_tiny_container_has_no_nan() {
        let geometry = build_spline_path(&months(), &SplineConfig::new(10.0, f32::NAN));
        assert!(!geometry.line_svg().contains("NaN"));
        assert!(!geometry.area_svg().contains("NaN"));
    }

    #[test]
    fn test_line_chart_refresh_tracks_width_and_data() {
        let mut chart = LineChart::new(months(), SplineConfig::new(0.0, 220.0));
        assert!(chart.geometry().is_none());

        assert!(chart.refresh(&300.0_f32));
        assert_eq!(chart.geometry().unwrap().plot_area.width, 235.0);
        assert!(!chart.refresh(&300.0_f32));

        assert!(chart.refresh(&400.0_f32));
        assert_eq!(chart.geometry().unwrap().plot_area.width, 335.0);

        chart.set_series(Series::from_pairs([("a", 1.0)]));
        assert!(chart.refresh(&400.0_f32));
        assert_eq!(chart.geometry().unwrap().pixel_points.len(), 1);
    }
}
