//! Errors raised by configuration validation.
//!
//! Data problems (empty series, zero totals, malformed records) never
//! produce an error; the engines degrade to placeholder geometry instead.

/// Errors that can occur when validating chart configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// Radii must be finite with `0 <= inner < outer`.
    #[error("invalid radii: inner {inner}, outer {outer} (need 0 <= inner < outer)")]
    InvalidRadii { inner: f32, outer: f32 },

    /// Viewport dimensions must be finite and non-negative.
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// Spline tension must be finite and within `0..=1`.
    #[error("invalid spline tension {0} (expected 0..=1)")]
    InvalidTension(f32),

    /// Opacity must be within `0..=1`.
    #[error("invalid opacity {0} (expected 0..=1)")]
    InvalidOpacity(f32),

    /// A color string could not be parsed.
    #[error("invalid color {0:?} (expected #RGB, #RRGGBB or #RRGGBBAA)")]
    InvalidColor(String),

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for chart configuration operations.
pub type ChartResult<T> = Result<T, ChartError>;
