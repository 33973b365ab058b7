//! Chart engine - shared configuration and collaborators for one dashboard.

use tallyplot_geometry::chart::{
    AggregateOptions, Aggregation, BarLayout, Captions, CenterLabel, ChartId, DefaultCaptions,
    EngineConfig, GradientId, HoverModel, LineChart, NEUTRAL_COLOR, Palette, RadialConfig,
    RadialGeometry, Rect, Series, SeriesPalette, StackedBar, StackedLayout, TooltipPosition,
    aggregate_with_palette, build_bar_layout, build_gauge_geometry, build_radial_geometry,
    build_stacked_layout, compute_tooltip_position,
};
use tallyplot_geometry::{ChartResult, Color, Vec2};

/// Bundles the engine configuration with the palette and caption providers.
///
/// Each method is a thin wrapper over the matching geometry builder that
/// fills in the shared settings. The engine holds no per-chart state; hover
/// models and line charts it creates are owned by the caller.
///
/// # Example
///
/// ```
/// use tallyplot::ChartEngine;
/// use tallyplot::chart::Series;
///
/// let engine = ChartEngine::builder().build().unwrap();
/// let series = Series::from_pairs([("Open", 3.0), ("Closed", 1.0)]);
/// let donut = engine.donut(&series, 80.0, 50.0);
///
/// assert_eq!(engine.center_label(&donut).caption, "Total");
/// ```
pub struct ChartEngine {
    config: EngineConfig,
    palette: Box<dyn Palette>,
    captions: Box<dyn Captions>,
}

impl ChartEngine {
    /// Create a new engine builder.
    pub fn builder() -> ChartEngineBuilder {
        ChartEngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn palette(&self) -> &dyn Palette {
        self.palette.as_ref()
    }

    pub fn captions(&self) -> &dyn Captions {
        self.captions.as_ref()
    }

    /// Aggregation options from the config.
    pub fn aggregate_options(&self) -> AggregateOptions {
        self.config.aggregate_options()
    }

    /// Group records by key, summing the values `value_fn` extracts.
    ///
    /// Groups are colored from the engine palette by their final index.
    pub fn aggregate<R, K, FK, FV>(
        &self,
        records: impl IntoIterator<Item = R>,
        key_fn: FK,
        value_fn: FV,
    ) -> Aggregation
    where
        K: Into<String>,
        FK: FnMut(&R) -> Option<K>,
        FV: FnMut(&R) -> Option<f64>,
    {
        aggregate_with_palette(
            records,
            key_fn,
            value_fn,
            |_| None,
            &self.aggregate_options(),
            self.palette.as_ref(),
        )
    }

    /// Donut geometry; pass `inner_radius = 0` for a pie.
    pub fn donut(&self, series: &Series, outer_radius: f32, inner_radius: f32) -> RadialGeometry {
        let config = self.config.radial_config(outer_radius, inner_radius);
        build_radial_geometry(series, &config, self.palette.as_ref())
    }

    /// Semicircular gauge of `value` out of `max`.
    pub fn gauge(
        &self,
        value: f64,
        max: f64,
        color: Color,
        outer_radius: f32,
        inner_radius: f32,
    ) -> RadialGeometry {
        let config = RadialConfig::gauge(outer_radius, inner_radius)
            .with_anchor_ratio(self.config.tooltip_anchor_ratio);
        build_gauge_geometry(value, max, color, NEUTRAL_COLOR, &config)
    }

    /// Center label of a donut using the engine captions.
    pub fn center_label(&self, geometry: &RadialGeometry) -> CenterLabel {
        geometry.center_label(self.captions.as_ref())
    }

    /// A line chart of fixed `height`; its width comes from the host on
    /// every refresh.
    pub fn line_chart(&self, series: Series, height: f32) -> LineChart {
        LineChart::new(series, self.config.spline_config(0.0, height))
    }

    pub fn bars(&self, series: &Series, available_space: f32) -> BarLayout {
        build_bar_layout(series, &self.config.bar_config(available_space))
    }

    pub fn stacked_bars(&self, bars: &[StackedBar], available_space: f32) -> StackedLayout {
        build_stacked_layout(bars, &self.config.bar_config(available_space))
    }

    /// Place a tooltip box for `anchor` within `bounds`.
    pub fn tooltip(&self, anchor: Vec2, box_size: Vec2, bounds: Rect) -> TooltipPosition {
        compute_tooltip_position(anchor, box_size, bounds, &self.config.tooltip_config())
    }

    /// A fresh hover model for one chart instance.
    pub fn hover_model<K: Copy + PartialEq + std::fmt::Debug>(&self) -> HoverModel<K> {
        self.config.hover_model()
    }

    /// Gradient id for `color` in the chart named `chart`.
    pub fn gradient_id(&self, chart: &str, color: Color) -> GradientId {
        GradientId::new(ChartId::from_name(chart), color)
    }
}

impl Default for ChartEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            palette: Box::new(SeriesPalette),
            captions: Box::new(DefaultCaptions),
        }
    }
}

impl std::fmt::Debug for ChartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`ChartEngine`].
///
/// # Example
///
/// ```
/// use tallyplot::ChartEngine;
/// use tallyplot::chart::EngineConfig;
/// use tallyplot::geometry::Color;
///
/// let engine = ChartEngine::builder()
///     .config(EngineConfig { dimmed_opacity: 0.4, ..Default::default() })
///     .palette(vec![Color::from_hex(0x1F77B4), Color::from_hex(0xFF7F0E)])
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.hover_model::<usize>().dimmed_opacity(), 0.4);
/// ```
pub struct ChartEngineBuilder {
    config: EngineConfig,
    palette: Box<dyn Palette>,
    captions: Box<dyn Captions>,
}

impl ChartEngineBuilder {
    pub fn new() -> Self {
        let ChartEngine {
            config,
            palette,
            captions,
        } = ChartEngine::default();
        Self {
            config,
            palette,
            captions,
        }
    }

    /// Replace the configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the fallback palette.
    pub fn palette(mut self, palette: impl Palette + 'static) -> Self {
        self.palette = Box::new(palette);
        self
    }

    /// Replace the caption provider.
    pub fn captions(mut self, captions: impl Captions + 'static) -> Self {
        self.captions = Box::new(captions);
        self
    }

    /// Load the configuration from a TOML document.
    #[cfg(feature = "serde")]
    pub fn config_toml(self, text: &str) -> ChartResult<Self> {
        let config = EngineConfig::from_toml_str(text)?;
        Ok(self.config(config))
    }

    /// Validate the configuration and build the engine.
    pub fn build(self) -> ChartResult<ChartEngine> {
        self.config.validate()?;
        tracing::debug!("Built chart engine: {:?}", self.config);
        Ok(ChartEngine {
            config: self.config,
            palette: self.palette,
            captions: self.captions,
        })
    }
}

impl Default for ChartEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use tallyplot_geometry::ChartError;
    use tallyplot_geometry::chart::{DEFAULT_DIMMED_OPACITY, TriState};

    struct German;

    impl Captions for German {
        fn total(&self) -> Cow<'_, str> {
            Cow::Borrowed("Gesamt")
        }

        fn no_data(&self) -> Cow<'_, str> {
            Cow::Borrowed("Keine Daten")
        }

        fn category(&self, category: TriState) -> Cow<'_, str> {
            Cow::Borrowed(match category {
                TriState::Pass => "Bestanden",
                TriState::Fail => "Nicht bestanden",
                TriState::NotApplicable => "k. A.",
            })
        }
    }

    #[test]
    fn test_engine_builder() {
        let engine = ChartEngine::builder().build().unwrap();
        assert_eq!(engine.config(), &EngineConfig::default());
        assert_eq!(
            engine.hover_model::<usize>().dimmed_opacity(),
            DEFAULT_DIMMED_OPACITY
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = ChartEngine::builder()
            .config(EngineConfig {
                spline_tension: -1.0,
                ..Default::default()
            })
            .build();
        assert_eq!(result.unwrap_err(), ChartError::InvalidTension(-1.0));
    }

    #[test]
    fn test_custom_captions() {
        let engine = ChartEngine::builder().captions(German).build().unwrap();
        let empty = engine.donut(&Series::default(), 50.0, 30.0);
        assert_eq!(engine.center_label(&empty).caption, "Keine Daten");
        assert_eq!(engine.captions().category(TriState::Fail), "Nicht bestanden");
    }

    #[test]
    fn test_engine_palette_colors_aggregation() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let engine = ChartEngine::builder().palette(vec![red]).build().unwrap();
        let result = engine.aggregate(["a", "b", "a"], |r| Some(*r), |_| Some(1.0));
        assert!(result.series.iter().all(|p| p.color == Some(red)));
    }

    #[test]
    fn test_unlimited_groups_cycle_the_palette() {
        let engine = ChartEngine::builder()
            .config(EngineConfig {
                top_n: None,
                ..Default::default()
            })
            .build()
            .unwrap();
        let keys: Vec<String> = (0..10).map(|i| format!("k{i}")).collect();
        let result = engine.aggregate(
            keys.iter().map(String::as_str),
            |k| Some(*k),
            |_| Some(1.0),
        );

        let colors: Vec<_> = result.series.iter().map(|p| p.color.unwrap()).collect();
        assert_eq!(colors.len(), 10);
        for (i, color) in colors.iter().enumerate() {
            assert_eq!(*color, SeriesPalette.color(i));
        }
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn test_gauge_uses_neutral_track() {
        let engine = ChartEngine::default();
        let gauge = engine.gauge(25.0, 100.0, Color::BLACK, 60.0, 45.0);
        assert_eq!(gauge.segments[1].color, NEUTRAL_COLOR);
        assert_eq!(gauge.config.sweep, 180.0);
    }

    #[test]
    fn test_gradient_ids_are_stable() {
        let engine = ChartEngine::default();
        let color = Color::from_hex(0x5CABED);
        assert_eq!(
            engine.gradient_id("overview", color),
            engine.gradient_id("overview", color)
        );
    }
}
