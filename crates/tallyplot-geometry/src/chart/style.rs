//! Palette and opacity conventions shared by all chart types.

use crate::Color;

/// Opacity of the hovered element, and of every element when nothing is hovered.
pub const FULL_OPACITY: f32 = 1.0;

/// Opacity of non-hovered elements while another element is hovered.
pub const DEFAULT_DIMMED_OPACITY: f32 = 0.6;

/// Neutral color for "no data" placeholders and gauge tracks.
pub const NEUTRAL_COLOR: Color = Color::rgba(0.88, 0.89, 0.91, 1.0);

/// Modern, minimal color palette for series.
pub const SERIES_COLORS: [Color; 8] = [
    Color::rgba(0.36, 0.67, 0.93, 1.0), // Soft blue
    Color::rgba(0.95, 0.55, 0.38, 1.0), // Coral
    Color::rgba(0.45, 0.80, 0.69, 1.0), // Mint/teal
    Color::rgba(0.91, 0.70, 0.41, 1.0), // Warm gold
    Color::rgba(0.70, 0.55, 0.85, 1.0), // Soft purple
    Color::rgba(0.95, 0.60, 0.60, 1.0), // Soft red/pink
    Color::rgba(0.55, 0.75, 0.50, 1.0), // Sage green
    Color::rgba(0.60, 0.60, 0.65, 1.0), // Neutral gray
];

/// Get a color from the default palette by index.
pub fn palette_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Source of fallback colors for points that carry none.
///
/// Implementations cycle by index; an empty palette yields the neutral color.
pub trait Palette {
    /// Color for the element at `index`.
    fn color(&self, index: usize) -> Color;
}

/// The default eight-color palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesPalette;

impl Palette for SeriesPalette {
    fn color(&self, index: usize) -> Color {
        palette_color(index)
    }
}

impl Palette for [Color] {
    fn color(&self, index: usize) -> Color {
        if self.is_empty() {
            NEUTRAL_COLOR
        } else {
            self[index % self.len()]
        }
    }
}

impl Palette for Vec<Color> {
    fn color(&self, index: usize) -> Color {
        self.as_slice().color(index)
    }
}

impl<const N: usize> Palette for [Color; N] {
    fn color(&self, index: usize) -> Color {
        self.as_slice().color(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), palette_color(8));
        assert_eq!(SeriesPalette.color(3), SERIES_COLORS[3]);
    }

    #[test]
    fn test_slice_palette() {
        let colors = vec![Color::BLACK, Color::WHITE];
        assert_eq!(colors.color(0), Color::BLACK);
        assert_eq!(colors.color(3), Color::WHITE);
        let empty: Vec<Color> = Vec::new();
        assert_eq!(empty.color(5), NEUTRAL_COLOR);
    }
}
