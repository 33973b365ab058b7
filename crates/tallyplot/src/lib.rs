//! Tallyplot - chart geometry for data dashboards
//!
//! Tallyplot turns tallies of domain records into drawable chart geometry.
//! It provides:
//!
//! - **Aggregation**: group records by key, sum or count, keep the top N
//! - **Radial charts**: donut, pie and gauge arcs with tooltip anchors
//! - **Line charts**: cardinal-spline paths with area fills, ticks and labels
//! - **Bar charts**: simple, stacked and pass/fail/n/a rows
//! - **Interaction**: tooltip placement and per-chart hover state
//!
//! Nothing here draws. The host rendering layer takes SVG path data,
//! coordinates and opacities from the engines and renders them.
//!
//! # Quick Start
//!
//! ```
//! use tallyplot::prelude::*;
//!
//! let engine = ChartEngine::default();
//! let records = ["Slip", "Burn", "Slip", "Cut"];
//!
//! let breakdown = engine.aggregate(records, |r| Some(*r), |_| Some(1.0));
//! let donut = engine.donut(&breakdown.series, 80.0, 50.0);
//!
//! let mut hover = engine.hover_model::<usize>();
//! hover.on_enter(0);
//! let tooltip = TooltipContent::from_segment(&donut.segments[0]);
//!
//! assert_eq!(tooltip.label, "Slip");
//! assert_eq!(tooltip.formatted_percentage(), "50.0%");
//! assert_eq!(hover.opacity_for(1), DEFAULT_DIMMED_OPACITY);
//! ```
//!
//! # Logging
//!
//! The engines emit `tracing` events. Call [`init_logging`] (or install any
//! subscriber) to see them.

pub mod engine;

// Re-export core types
pub use tallyplot_core as core;
pub use tallyplot_core::logging::{init as init_logging, try_init as try_init_logging};
pub use tallyplot_core::math;

// Re-export geometry
pub use tallyplot_geometry as geometry;
pub use tallyplot_geometry::chart;

pub use engine::{ChartEngine, ChartEngineBuilder};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{ChartEngine, ChartEngineBuilder};

    // Core math types
    pub use tallyplot_core::math::Vec2;

    // Geometry primitives
    pub use tallyplot_geometry::{
        ChartError, ChartResult, Color, CubicBezier, Path, PathBuilder, PathCommand,
    };

    // Chart engines
    pub use tallyplot_geometry::chart::{
        AggregateOptions, Aggregation, BarLayout, BarOrientation, Captions, CenterLabel, ChartId,
        DEFAULT_DIMMED_OPACITY, DataPoint, DefaultCaptions, EngineConfig, FULL_OPACITY,
        GradientId, HoverModel, HoverState, HoverTransition, Insets, LineChart, Palette,
        RadialConfig, RadialGeometry, Rect, Segment, Series, SeriesPalette, SplineConfig,
        SplineGeometry, StackedBar, StackedKey, StackedLayout, TooltipContent, TooltipPlacement,
        TooltipPosition, TriState, WidthSource,
    };
}
