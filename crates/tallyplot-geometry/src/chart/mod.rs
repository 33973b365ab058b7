//! Chart engines.
//!
//! Turns aggregated data into drawable geometry:
//! - Aggregation of raw records into a labelled series
//! - Donut, pie and gauge arcs
//! - Smoothed line and area paths with ticks and labels
//! - Simple, stacked and tri-state bar layout
//! - Tooltip placement and content
//! - Hover state and opacity rules
//!
//! # Example
//!
//! ```
//! use tallyplot_geometry::chart::*;
//!
//! let series = Series::from_pairs([("Jan", 0.0), ("Feb", 10.0), ("Mar", 5.0)]);
//! let line = build_spline_path(&series, &SplineConfig::new(300.0, 220.0));
//!
//! // Feb is the highest point, so it sits closest to the top.
//! assert!(line.pixel_points[1].y < line.pixel_points[0].y);
//! assert!(line.pixel_points[1].y < line.pixel_points[2].y);
//!
//! let mut hover = HoverModel::new();
//! hover.on_enter(1);
//! assert_eq!(hover.opacity_for(0), DEFAULT_DIMMED_OPACITY);
//! ```

mod aggregate;
mod bar;
mod captions;
mod config;
mod hover;
mod radial;
pub mod rect;
mod spline;
mod style;
mod tooltip;
mod types;

// Re-exports
pub use aggregate::*;
pub use bar::*;
pub use captions::*;
pub use config::*;
pub use hover::*;
pub use radial::*;
pub use rect::{Insets, Rect};
pub use spline::*;
pub use style::*;
pub use tooltip::*;
pub use types::*;
