//! Canned data shared by tests and benchmarks.

use tallyplot_geometry::Color;
use tallyplot_geometry::chart::{BarSegment, Series, StackedBar};

/// A domain record as a dashboard page would hold it.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    /// Grouping key; `None` models a record with a missing field
    pub kind: Option<&'static str>,
    pub cost: Option<f64>,
}

impl Incident {
    pub const fn new(kind: &'static str, cost: f64) -> Self {
        Self {
            kind: Some(kind),
            cost: Some(cost),
        }
    }
}

/// Eight well-formed incidents over four kinds, plus two malformed ones.
pub fn incidents() -> Vec<Incident> {
    vec![
        Incident::new("Slip", 120.0),
        Incident::new("Burn", 300.0),
        Incident::new("Slip", 80.0),
        Incident::new("Cut", 45.5),
        Incident::new("Fall from height", 900.0),
        Incident::new("Slip", 20.0),
        Incident::new("Cut", 10.0),
        Incident::new("Burn", 50.0),
        Incident {
            kind: None,
            cost: Some(5.0),
        },
        Incident {
            kind: Some("Cut"),
            cost: None,
        },
    ]
}

/// `Jan = 0, Feb = 10, Mar = 5`.
pub fn monthly_series() -> Series {
    Series::from_pairs([("Jan", 0.0), ("Feb", 10.0), ("Mar", 5.0)])
}

/// Three segments for donut tests.
pub fn donut_series() -> Series {
    Series::from_pairs([("Open", 2.0), ("In progress", 1.0), ("Closed", 3.0)])
}

/// A series of `len` points with a deterministic zig-zag shape.
pub fn zigzag_series(len: usize) -> Series {
    Series::from_pairs((0..len).map(|i| (format!("p{i}"), ((i * 7) % 11) as f64)))
}

/// Two stacked bars plus an empty one.
pub fn stacked_bars() -> Vec<StackedBar> {
    let open = Color::from_hex(0x5CABED);
    let closed = Color::from_hex(0x73CCB0);
    vec![
        StackedBar::new("Site A")
            .with_segment(BarSegment::new("Open", 3.0, open))
            .with_segment(BarSegment::new("Closed", 1.0, closed)),
        StackedBar::new("Site B")
            .with_segment(BarSegment::new("Open", 2.0, open))
            .with_segment(BarSegment::new("Closed", 6.0, closed)),
        StackedBar::new("Site C"),
    ]
}
