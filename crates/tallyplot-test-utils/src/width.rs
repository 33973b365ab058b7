//! Mock container-width provider.

use parking_lot::Mutex;
use tallyplot_geometry::chart::WidthSource;

/// A [`WidthSource`] whose width a test can change between refreshes.
///
/// Every call to [`WidthSource::measured_width`] is recorded, so tests can
/// check that a chart re-measures on refresh.
#[derive(Debug)]
pub struct RecordingWidthSource {
    width: Mutex<f32>,
    /// Widths returned so far, in call order
    measurements: Mutex<Vec<f32>>,
}

impl RecordingWidthSource {
    pub fn new(width: f32) -> Self {
        Self {
            width: Mutex::new(width),
            measurements: Mutex::new(Vec::new()),
        }
    }

    /// Simulate a container resize.
    pub fn resize(&self, width: f32) {
        *self.width.lock() = width;
    }

    /// Number of times the width was measured.
    pub fn measure_count(&self) -> usize {
        self.measurements.lock().len()
    }

    /// Every width handed out so far.
    pub fn measurements(&self) -> Vec<f32> {
        self.measurements.lock().clone()
    }
}

impl WidthSource for RecordingWidthSource {
    fn measured_width(&self) -> f32 {
        let width = *self.width.lock();
        self.measurements.lock().push(width);
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_measurements() {
        let source = RecordingWidthSource::new(100.0);
        assert_eq!(source.measured_width(), 100.0);
        source.resize(150.0);
        assert_eq!(source.measured_width(), 150.0);
        assert_eq!(source.measurements(), vec![100.0, 150.0]);
        assert_eq!(source.measure_count(), 2);
    }
}
