//! Engine-wide tunables.
//!
//! [`EngineConfig`] collects every default the engines use, so a host can
//! adjust them in one place (or load them from TOML with the `serde`
//! feature) and derive the per-call configs from it.

use super::aggregate::{
    AggregateOptions, DEFAULT_ELLIPSIS, DEFAULT_LABEL_MAX_CHARS, DEFAULT_TOP_N,
};
use super::bar::{BarLayoutConfig, DEFAULT_MIN_BAR_LENGTH};
use super::hover::HoverModel;
use super::radial::{DEFAULT_ANCHOR_RATIO, RadialConfig};
use super::rect::Insets;
use super::spline::{DEFAULT_X_LABEL_LIMIT, SplineConfig};
use super::style::DEFAULT_DIMMED_OPACITY;
use super::tooltip::{DEFAULT_TOOLTIP_GAP, TooltipConfig};
use crate::curve::DEFAULT_TENSION;
use crate::error::{ChartError, ChartResult};
use std::fmt::Debug;

/// Tunable defaults for all engines.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Cardinal spline tension for line charts
    pub spline_tension: f32,
    /// Minimum drawn length of a positive bar, in pixels
    pub min_bar_length: f32,
    /// Opacity of non-hovered elements while something is hovered
    pub dimmed_opacity: f32,
    /// Gap between a tooltip and its anchor, in pixels
    pub tooltip_gap: f32,
    /// Radial tooltip anchor distance as a fraction of the outer radius
    pub tooltip_anchor_ratio: f32,
    /// Longest label kept before truncation, in characters; `0` disables
    pub label_max_chars: usize,
    pub ellipsis: String,
    /// Number of groups kept by aggregation; `0` keeps all
    pub top_n: Option<usize>,
    /// Line charts label every point up to this count
    pub x_label_limit: usize,
    /// Plot padding for line charts
    pub padding: Insets,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spline_tension: DEFAULT_TENSION,
            min_bar_length: DEFAULT_MIN_BAR_LENGTH,
            dimmed_opacity: DEFAULT_DIMMED_OPACITY,
            tooltip_gap: DEFAULT_TOOLTIP_GAP,
            tooltip_anchor_ratio: DEFAULT_ANCHOR_RATIO,
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            top_n: Some(DEFAULT_TOP_N),
            x_label_limit: DEFAULT_X_LABEL_LIMIT,
            padding: Insets::default(),
        }
    }
}

impl EngineConfig {
    /// Check every value for a usable range.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.spline_tension.is_finite() || !(0.0..=1.0).contains(&self.spline_tension) {
            return Err(ChartError::InvalidTension(self.spline_tension));
        }
        if !self.dimmed_opacity.is_finite() || !(0.0..=1.0).contains(&self.dimmed_opacity) {
            return Err(ChartError::InvalidOpacity(self.dimmed_opacity));
        }

        let non_negative = [
            ("min_bar_length", self.min_bar_length),
            ("tooltip_gap", self.tooltip_gap),
            ("padding.top", self.padding.top),
            ("padding.right", self.padding.right),
            ("padding.bottom", self.padding.bottom),
            ("padding.left", self.padding.left),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.tooltip_anchor_ratio) {
            return Err(ChartError::InvalidConfig(format!(
                "tooltip_anchor_ratio must be within 0..=1, got {}",
                self.tooltip_anchor_ratio
            )));
        }
        Ok(())
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    ///
    /// ```
    /// use tallyplot_geometry::chart::EngineConfig;
    ///
    /// let config = EngineConfig::from_toml_str("spline_tension = 0.5").unwrap();
    /// assert_eq!(config.spline_tension, 0.5);
    /// assert_eq!(config.min_bar_length, 4.0);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> ChartResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ChartError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!("Loaded engine config: {:?}", config);
        Ok(config)
    }

    /// Serialize to a TOML document.
    #[cfg(feature = "serde")]
    pub fn to_toml_string(&self) -> ChartResult<String> {
        toml::to_string(self).map_err(|e| ChartError::InvalidConfig(e.to_string()))
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions::default()
            .with_top_n(self.top_n.filter(|&n| n > 0))
            .with_label_max_chars(Some(self.label_max_chars).filter(|&n| n > 0))
            .with_ellipsis(self.ellipsis.clone())
    }

    pub fn radial_config(&self, outer_radius: f32, inner_radius: f32) -> RadialConfig {
        RadialConfig::new(outer_radius, inner_radius).with_anchor_ratio(self.tooltip_anchor_ratio)
    }

    pub fn spline_config(&self, width: f32, height: f32) -> SplineConfig {
        SplineConfig::new(width, height)
            .with_padding(self.padding)
            .with_tension(self.spline_tension)
            .with_x_label_limit(self.x_label_limit)
    }

    pub fn bar_config(&self, available_space: f32) -> BarLayoutConfig {
        BarLayoutConfig::new(available_space).with_min_bar_length(self.min_bar_length)
    }

    pub fn tooltip_config(&self) -> TooltipConfig {
        TooltipConfig {
            gap: self.tooltip_gap,
        }
    }

    pub fn hover_model<K: Copy + PartialEq + Debug>(&self) -> HoverModel<K> {
        HoverModel::new().with_dimmed_opacity(self.dimmed_opacity)
    }
}
