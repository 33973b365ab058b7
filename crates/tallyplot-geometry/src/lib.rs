//! Tallyplot Geometry - data-to-geometry engine for dashboard charts
//!
//! This crate provides:
//! - Path primitives with SVG path data output
//! - Cardinal-spline smoothing
//! - Colors with hex parsing
//! - Chart engines (optional "chart" feature): aggregation, donut/pie/gauge
//!   arcs, smoothed line and area paths, bar layout, tooltip placement and
//!   hover state
//!
//! The engines are pure functions of their inputs. They never draw; a host
//! rendering layer takes the paths, coordinates and opacities and renders
//! them however it likes.
//!
//! # Example
//!
//! ```
//! use tallyplot_geometry::chart::*;
//!
//! let series = Series::from_pairs([("Open", 3.0), ("Closed", 1.0)]);
//! let donut = build_radial_geometry(&series, &RadialConfig::new(80.0, 50.0), &SeriesPalette);
//!
//! assert_eq!(donut.total, 4.0);
//! assert_eq!(donut.segments[0].percentage, 75.0);
//! let d = donut.segments[0].path_svg();
//! assert!(d.starts_with("M80,0 A80,80 0 1,1"));
//! ```

// Core primitives
mod color;
mod curve;
mod error;
mod path;

// Chart module (optional)
#[cfg(feature = "chart")]
pub mod chart;

// Re-exports
pub use color::*;
pub use curve::*;
pub use error::*;
pub use path::*;

pub use glam::Vec2;
