//! Rectangles and padding insets for plot layout.

use glam::Vec2;

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left)
    pub x: f32,
    /// Y position (top)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Get the position as a Vec2.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Get the size as a Vec2.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Get the center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Shrink the rect by per-side insets. Size never goes negative.
    pub fn inset_by(&self, insets: Insets) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.horizontal()).max(0.0),
            height: (self.height - insets.vertical()).max(0.0),
        }
    }

    /// Check if a point is inside the rect.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Get the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Replace non-finite coordinates with `0` and non-finite or negative
    /// sizes with an empty extent.
    pub fn sanitized(&self) -> Self {
        let coord = |v: f32| if v.is_finite() { v } else { 0.0 };
        let extent = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            x: coord(self.x),
            y: coord(self.y),
            width: extent(self.width),
            height: extent(self.height),
        }
    }
}

/// Padding reserved around a plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    /// Create insets from per-side values.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same inset on every side.
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Default for Insets {
    /// Room for y tick labels on the left and x labels underneath.
    fn default() -> Self {
        Self::new(20.0, 20.0, 35.0, 45.0)
    }
}
