//! Test utilities for Tallyplot.
//!
//! This crate provides testing infrastructure shared by the Tallyplot
//! crates' integration tests and benchmarks.
//!
//! # Overview
//!
//! - [`assert_approx_eq!`] - float comparison with a tolerance
//! - [`fixtures`] - canned records and series used across tests
//! - [`RecordingWidthSource`] - a container-width provider that can be
//!   resized from a test and counts how often it was measured
//!
//! # Example
//!
//! ```rust
//! use tallyplot_geometry::chart::{LineChart, SplineConfig};
//! use tallyplot_test_utils::{RecordingWidthSource, fixtures};
//!
//! let width = RecordingWidthSource::new(300.0);
//! let mut chart = LineChart::new(fixtures::monthly_series(), SplineConfig::new(0.0, 220.0));
//!
//! assert!(chart.refresh(&width));
//! width.resize(320.0);
//! assert!(chart.refresh(&width));
//! assert_eq!(width.measure_count(), 2);
//! ```

pub mod approx;
pub mod fixtures;
mod width;

pub use width::*;

/// Install a test-writer tracing subscriber. Safe to call from every test.
pub fn init_logging() {
    tallyplot_core::logging::init_for_tests();
}
