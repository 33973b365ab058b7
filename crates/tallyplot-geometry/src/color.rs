//! RGBA colors for chart fills, strokes and tooltip accents.

use crate::error::{ChartError, ChartResult};

/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// Colors can be constructed from floats, `u8` values, numeric hex codes or
/// CSS-style hex strings, and render back to the `#RRGGBB` form SVG expects:
///
/// ```
/// use tallyplot_geometry::Color;
///
/// let coral = Color::from_hex(0xF28C61);
/// assert_eq!(coral.to_hex_string(), "#f28c61");
///
/// let parsed = Color::from_hex_str("#f28c61").unwrap();
/// assert_eq!(parsed, coral);
/// ```
///
/// The struct is `#[repr(C)]` and implements `bytemuck::Pod`, so hosts that
/// upload colors to a GPU buffer can cast slices of it directly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity (alpha = 1.0).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from 8-bit RGB values with full opacity.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb_u8(r, g, b)
    }

    /// Create a color from a 32-bit RGBA hex value (e.g. `0xFF880080`).
    pub fn from_hex_alpha(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as u8;
        let g = ((hex >> 16) & 0xFF) as u8;
        let b = ((hex >> 8) & 0xFF) as u8;
        let a = (hex & 0xFF) as u8;
        Self::from_rgba_u8(r, g, b, a)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex_str(text: &str) -> ChartResult<Self> {
        let digits = text.trim().trim_start_matches('#');
        let invalid = || ChartError::InvalidColor(text.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                let expand = |nibble: u32| ((nibble & 0xF) * 0x11) as u8;
                Ok(Self::from_rgb_u8(
                    expand(value >> 8),
                    expand(value >> 4),
                    expand(value),
                ))
            }
            6 => u32::from_str_radix(digits, 16)
                .map(Self::from_hex)
                .map_err(|_| invalid()),
            8 => u32::from_str_radix(digits, 16)
                .map(Self::from_hex_alpha)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Components quantized to bytes.
    pub fn to_rgba_u8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex_string(self) -> String {
        let [r, g, b, a] = self.to_rgba_u8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Convert to an `[r, g, b, a]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(arr: [f32; 4]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: arr[3],
        }
    }
}

impl From<[f32; 3]> for Color {
    fn from(arr: [f32; 3]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: 1.0,
        }
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl std::str::FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_opaque() {
        let color = Color::from_hex(0x5CABED);
        assert_eq!(color.to_hex_string(), "#5cabed");
    }

    #[test]
    fn test_short_hex() {
        let color = Color::from_hex_str("#f80").unwrap();
        assert_eq!(color.to_rgba_u8(), [0xFF, 0x88, 0x00, 0xFF]);
    }

    #[test]
    fn test_alpha_hex_keeps_alpha() {
        let color = Color::from_hex_str("11223380").unwrap();
        assert_eq!(color.to_hex_string(), "#11223380");
    }

    #[test]
    fn test_invalid_hex_is_error() {
        assert!(matches!(
            Color::from_hex_str("#12345"),
            Err(ChartError::InvalidColor(_))
        ));
        assert!(Color::from_hex_str("#zzzzzz").is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_with_alpha() {
        let color = Color::BLACK.with_alpha(0.6);
        assert_eq!(color.a, 0.6);
        assert_eq!(color.r, 0.0);
    }
}
