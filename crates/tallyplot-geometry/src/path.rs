//! Path primitives for chart geometry.
//!
//! A path is a sequence of drawing commands. Engines build paths in pixel
//! space with [`PathBuilder`]; hosts either walk the commands or take the
//! SVG path data from [`Path::to_svg`].

use crate::CubicBezier;
use glam::Vec2;
use std::fmt::{self, Write};

/// A command in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a new position without drawing.
    MoveTo(Vec2),
    /// Draw a line to a position.
    LineTo(Vec2),
    /// Draw a cubic Bezier curve.
    CubicTo {
        /// First control point
        control1: Vec2,
        /// Second control point
        control2: Vec2,
        /// End point
        to: Vec2,
    },
    /// Draw an elliptical arc (SVG `A` semantics).
    ArcTo {
        /// Radii of the ellipse
        radii: Vec2,
        /// X-axis rotation in degrees
        x_rotation: f32,
        /// Use large arc
        large_arc: bool,
        /// Sweep direction (clockwise on screen if true)
        sweep: bool,
        /// End point
        to: Vec2,
    },
    /// Close the current sub-path by drawing a line to the start.
    Close,
}

/// A 2D path consisting of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from a list of commands.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Get the commands in this path.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Get the bounding box of the path.
    ///
    /// Control points and arc radii are included, so the box is conservative.
    /// Returns (min, max) corners.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        if self.commands.is_empty() {
            return None;
        }

        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut current = Vec2::ZERO;

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(to) | PathCommand::LineTo(to) => {
                    min = min.min(*to);
                    max = max.max(*to);
                    current = *to;
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    min = min.min(*control1).min(*control2).min(*to);
                    max = max.max(*control1).max(*control2).max(*to);
                    current = *to;
                }
                PathCommand::ArcTo { to, radii, .. } => {
                    min = min.min(*to).min(current - *radii);
                    max = max.max(*to).max(current + *radii);
                    current = *to;
                }
                PathCommand::Close => {}
            }
        }

        if min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Render the path as SVG path data (the `d` attribute).
    ///
    /// Coordinates are written with at most two decimals and no trailing
    /// zeros. An empty path renders as an empty string.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(self.commands.len() * 16);
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = write_command(&mut out, cmd);
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg())
    }
}

fn write_command(out: &mut String, cmd: &PathCommand) -> fmt::Result {
    match cmd {
        PathCommand::MoveTo(to) => write!(out, "M{}", Coord(*to)),
        PathCommand::LineTo(to) => write!(out, "L{}", Coord(*to)),
        PathCommand::CubicTo {
            control1,
            control2,
            to,
        } => write!(
            out,
            "C{} {} {}",
            Coord(*control1),
            Coord(*control2),
            Coord(*to)
        ),
        PathCommand::ArcTo {
            radii,
            x_rotation,
            large_arc,
            sweep,
            to,
        } => write!(
            out,
            "A{} {} {},{} {}",
            Coord(*radii),
            Num(*x_rotation),
            u8::from(*large_arc),
            u8::from(*sweep),
            Coord(*to)
        ),
        PathCommand::Close => out.write_char('Z'),
    }
}

/// Compact number formatting for path data.
struct Num(f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 100.0).round() / 100.0;
        // Normalizes -0 as well as tiny negatives that round to zero.
        if rounded == 0.0 {
            return f.write_char('0');
        }
        let text = format!("{rounded:.2}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        f.write_str(text)
    }
}

struct Coord(Vec2);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", Num(self.0.x), Num(self.0.y))
    }
}

/// Builder for constructing paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    /// Create a new path builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new position without drawing.
    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    /// Draw a line to a position.
    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    /// Draw a cubic Bezier curve.
    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            to,
        });
        self
    }

    /// Append a cubic segment that starts at the current position.
    pub fn curve(&mut self, curve: &CubicBezier) -> &mut Self {
        self.cubic_to(curve.control1, curve.control2, curve.to)
    }

    /// Draw a circular arc with radius `radius`.
    pub fn arc_to(&mut self, radius: f32, large_arc: bool, sweep: bool, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::ArcTo {
            radii: Vec2::splat(radius),
            x_rotation: 0.0,
            large_arc,
            sweep,
            to,
        });
        self
    }

    /// Close the current sub-path.
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Add a full circle as two half arcs.
    pub fn circle(&mut self, center: Vec2, radius: f32) -> &mut Self {
        self.move_to(center + Vec2::new(radius, 0.0));
        self.arc_to(radius, false, true, center + Vec2::new(-radius, 0.0));
        self.arc_to(radius, false, true, center + Vec2::new(radius, 0.0));
        self.close()
    }

    /// Check whether anything has been added yet.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Build the path.
    pub fn build(self) -> Path {
        Path {
            commands: self.commands,
        }
    }
}
