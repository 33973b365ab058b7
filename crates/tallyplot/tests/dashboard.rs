//! A dashboard page built through the facade.

use tallyplot::prelude::*;
use tallyplot_test_utils::{RecordingWidthSource, assert_approx_eq, fixtures, init_logging};

#[test]
fn test_overview_page() {
    init_logging();
    let engine = ChartEngine::builder()
        .config(EngineConfig {
            top_n: Some(3),
            ..Default::default()
        })
        .build()
        .unwrap();

    let breakdown = engine.aggregate(&fixtures::incidents(), |r| r.kind, |r| r.cost);
    assert_eq!(breakdown.series.len(), 3);
    assert_eq!(breakdown.truncated_groups, 1);
    assert_approx_eq!(breakdown.truncated_total, 55.5);

    let donut = engine.donut(&breakdown.series, 90.0, 60.0);
    let swept: f64 = donut.segments.iter().map(Segment::sweep).sum();
    assert_approx_eq!(swept, 360.0);
    assert_approx_eq!(engine.center_label(&donut).value, 1470.0);

    let mut hover = engine.hover_model::<usize>();
    hover.on_enter(2);
    let anchor = donut.anchor(2).unwrap();
    let placed = engine.tooltip(anchor, Vec2::new(110.0, 48.0), Rect::from_size(180.0, 180.0));
    assert!(placed.position.x >= 0.0 && placed.position.x + 110.0 <= 180.0);
}

#[test]
fn test_trend_page_resizes() {
    let engine = ChartEngine::default();
    let width = RecordingWidthSource::new(300.0);
    let mut chart = engine.line_chart(fixtures::monthly_series(), 220.0);

    assert!(chart.refresh(&width));
    let feb = chart.geometry().unwrap().anchor(1).unwrap();
    assert_eq!(feb, Vec2::new(162.5, 20.0));

    width.resize(0.0);
    assert!(chart.refresh(&width));
    let geometry = chart.geometry().unwrap();
    assert!(!geometry.line_svg().contains("NaN"));
}

#[test]
fn test_bar_pages() {
    let engine = ChartEngine::default();
    let bars = engine.bars(&fixtures::zigzag_series(11), 120.0);
    assert_eq!(bars.len(), 11);
    assert!(bars.lengths.iter().all(|&l| l <= 120.0));

    let stacked = engine.stacked_bars(&fixtures::stacked_bars(), 120.0);
    assert_eq!(stacked.segment_percentages()[1], vec![25.0, 75.0]);
}
