//! Vector path output.
//!
//! Path data is accumulated as an ordered list of [`PathCommand`]s and only
//! serialised at the end. The textual form uses absolute `M`, `L`, `A` and
//! `Z` commands, is valid SVG path syntax, and parses back into the same
//! command list with [`PathData::from_str`](core::str::FromStr).

use core::fmt;
use core::str::FromStr;

use crate::basics::{round_tenth, PointD};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::graphics::Renderer;

// ============================================================================
// Commands
// ============================================================================

/// One absolute path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    /// Elliptical arc from the current point to `(x, y)`.
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo { x, y } => write!(f, "M{x} {y}"),
            PathCommand::LineTo { x, y } => write!(f, "L{x} {y}"),
            PathCommand::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => write!(
                f,
                "A{rx},{ry} {x_axis_rotation} {},{} {x},{y}",
                large_arc as u8, sweep as u8
            ),
            PathCommand::Close => f.write_str("Z"),
        }
    }
}

// ============================================================================
// PathData
// ============================================================================

/// Ordered path command list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    /// Half-turn style arc: no axis rotation, large-arc flag set.
    pub fn arc_to(&mut self, r: f64, sweep: bool, x: f64, y: f64) {
        self.commands.push(PathCommand::ArcTo {
            rx: r,
            ry: r,
            x_axis_rotation: 0.0,
            large_arc: true,
            sweep,
            x,
            y,
        });
    }

    pub fn close_polygon(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Emit a closed polygon, coordinates rounded to 0.1. An empty slice
    /// emits nothing.
    pub fn add_polygon(&mut self, points: &[PointD]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(round_tenth(first.x), round_tenth(first.y));
        for p in rest {
            self.line_to(round_tenth(p.x), round_tenth(p.y));
        }
        self.close_polygon();
    }

    /// Emit a circle as two half-circle arcs across its horizontal
    /// diameter. The sweep flag follows `counter_clockwise`.
    pub fn add_circle(&mut self, top_left: PointD, diameter: f64, counter_clockwise: bool) {
        let sweep = !counter_clockwise;
        let r = round_tenth(diameter / 2.0);
        let left = round_tenth(top_left.x);
        let right = round_tenth(top_left.x + diameter);
        let cy = round_tenth(top_left.y + diameter / 2.0);
        self.move_to(left, cy);
        self.arc_to(r, sweep, right, cy);
        self.arc_to(r, sweep, left, cy);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

impl FromStr for PathData {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PathParser::new(s).parse()
    }
}

// ============================================================================
// Parser
// ============================================================================

struct PathParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PathParser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::PathSyntax {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn skip_separators(&mut self) {
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_whitespace() || self.bytes[self.pos] == b',')
        {
            self.pos += 1;
        }
    }

    fn at_number(&self) -> bool {
        self.bytes
            .get(self.pos)
            .is_some_and(|&b| b.is_ascii_digit() || b == b'-' || b == b'+' || b == b'.')
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_separators();
        let start = self.pos;
        let digits = |p: &mut Self| {
            while p.pos < p.bytes.len() && p.bytes[p.pos].is_ascii_digit() {
                p.pos += 1;
            }
        };
        if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        digits(self);
        if self.bytes.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            digits(self);
        }
        if matches!(self.bytes.get(self.pos), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
                self.pos += 1;
            }
            digits(self);
        }
        let bytes = self.bytes;
        let parsed = core::str::from_utf8(&bytes[start..self.pos])
            .ok()
            .and_then(|text| text.parse::<f64>().ok());
        match parsed {
            Some(v) => Ok(v),
            None => {
                self.pos = start;
                Err(self.error("expected number"))
            }
        }
    }

    fn flag(&mut self) -> Result<bool> {
        self.skip_separators();
        match self.bytes.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.error("expected arc flag")),
        }
    }

    fn command(&mut self, letter: u8) -> Result<PathCommand> {
        Ok(match letter {
            b'M' => PathCommand::MoveTo {
                x: self.number()?,
                y: self.number()?,
            },
            b'L' => PathCommand::LineTo {
                x: self.number()?,
                y: self.number()?,
            },
            b'A' => PathCommand::ArcTo {
                rx: self.number()?,
                ry: self.number()?,
                x_axis_rotation: self.number()?,
                large_arc: self.flag()?,
                sweep: self.flag()?,
                x: self.number()?,
                y: self.number()?,
            },
            b'Z' | b'z' => PathCommand::Close,
            _ => return Err(self.error("unsupported path command")),
        })
    }

    fn parse(mut self) -> Result<PathData> {
        let mut path = PathData::new();
        let mut last: Option<u8> = None;
        loop {
            self.skip_separators();
            let Some(&b) = self.bytes.get(self.pos) else {
                break;
            };
            let letter = if b.is_ascii_alphabetic() {
                self.pos += 1;
                b
            } else if self.at_number() {
                // Implicit repetition; coordinates after a move are lines.
                match last {
                    Some(b'M') => b'L',
                    Some(l) if l != b'Z' && l != b'z' => l,
                    _ => return Err(self.error("expected command")),
                }
            } else {
                return Err(self.error("unexpected character"));
            };
            path.commands.push(self.command(letter)?);
            last = Some(letter);
        }
        Ok(path)
    }
}

// ============================================================================
// SvgPathRenderer
// ============================================================================

/// [`Renderer`] that records each shape as path data.
#[derive(Debug, Clone, Default)]
pub struct SvgPathRenderer {
    background: Option<Color>,
    shapes: Vec<(Color, PathData)>,
    current: Option<(Color, PathData)>,
}

impl SvgPathRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Finished shapes in drawing order.
    pub fn shapes(&self) -> &[(Color, PathData)] {
        &self.shapes
    }

    /// All shapes' commands concatenated into one path string.
    pub fn to_path_string(&self) -> String {
        self.shapes.iter().map(|(_, d)| d.to_string()).collect()
    }
}

impl Renderer for SvgPathRenderer {
    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn begin_shape(&mut self, color: Color) {
        self.current = Some((color, PathData::new()));
    }

    fn end_shape(&mut self) {
        if let Some((color, data)) = self.current.take() {
            if !data.is_empty() {
                self.shapes.push((color, data));
            }
        }
    }

    fn add_polygon(&mut self, points: &[PointD]) {
        if let Some((_, data)) = self.current.as_mut() {
            data.add_polygon(points);
        }
    }

    fn add_circle(&mut self, top_left: PointD, diameter: f64, counter_clockwise: bool) {
        if let Some((_, data)) = self.current.as_mut() {
            data.add_circle(top_left, diameter, counter_clockwise);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_commands() {
        let mut p = PathData::new();
        p.add_polygon(&[
            PointD::new(0.0, 0.0),
            PointD::new(10.0, 0.0),
            PointD::new(10.0, 10.0),
        ]);
        assert_eq!(p.to_string(), "M0 0L10 0L10 10Z");
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn test_empty_polygon_emits_nothing() {
        let mut p = PathData::new();
        p.add_polygon(&[]);
        assert!(p.is_empty());
        assert_eq!(p.to_string(), "");
    }

    #[test]
    fn test_coordinates_rounded_to_tenth() {
        let mut p = PathData::new();
        p.add_polygon(&[PointD::new(1.04, 2.36)]);
        assert_eq!(p.commands()[0], PathCommand::MoveTo { x: 1.0, y: 2.4 });
    }

    #[test]
    fn test_circle_clockwise() {
        let mut p = PathData::new();
        p.add_circle(PointD::new(10.0, 20.0), 8.0, false);
        assert_eq!(p.to_string(), "M10 24A4,4 0 1,1 18,24A4,4 0 1,1 10,24");
    }

    #[test]
    fn test_circle_counter_clockwise() {
        let mut p = PathData::new();
        p.add_circle(PointD::new(0.0, 0.0), 3.0, true);
        assert_eq!(p.to_string(), "M0 1.5A1.5,1.5 0 1,0 3,1.5A1.5,1.5 0 1,0 0,1.5");
    }

    #[test]
    fn test_parse_round_trip() {
        let mut p = PathData::new();
        p.add_polygon(&[
            PointD::new(1.5, 2.25),
            PointD::new(-3.0, 4.0),
            PointD::new(7.7, 0.1),
        ]);
        p.add_circle(PointD::new(3.3, 4.4), 5.5, true);
        let parsed: PathData = p.to_string().parse().unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn test_parse_svg_spacing() {
        let p: PathData = "M 1,2 L 3 4 5 6 z".parse().unwrap();
        assert_eq!(
            p.commands(),
            &[
                PathCommand::MoveTo { x: 1.0, y: 2.0 },
                PathCommand::LineTo { x: 3.0, y: 4.0 },
                PathCommand::LineTo { x: 5.0, y: 6.0 },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_parse_implicit_line_after_move() {
        let p: PathData = "M0 0 1 1".parse().unwrap();
        assert_eq!(p.commands()[1], PathCommand::LineTo { x: 1.0, y: 1.0 });
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "Q1 2 3 4".parse::<PathData>(),
            Err(Error::PathSyntax { offset: 1, .. })
        ));
        assert!(matches!(
            "M1".parse::<PathData>(),
            Err(Error::PathSyntax { .. })
        ));
        assert!(matches!(
            "1 2".parse::<PathData>(),
            Err(Error::PathSyntax { offset: 0, .. })
        ));
        assert!(matches!(
            "M0 0A1,1 0 2,1 3,3".parse::<PathData>(),
            Err(Error::PathSyntax { .. })
        ));
    }

    #[test]
    fn test_renderer_groups_by_shape() {
        let mut r = SvgPathRenderer::new();
        r.set_background(Color::WHITE);
        r.begin_shape(Color::BLACK);
        r.add_polygon(&[PointD::new(0.0, 0.0), PointD::new(1.0, 0.0), PointD::new(1.0, 1.0)]);
        r.end_shape();
        r.begin_shape(Color::WHITE);
        r.end_shape();
        assert_eq!(r.background(), Some(Color::WHITE));
        assert_eq!(r.shapes().len(), 1);
        assert_eq!(r.shapes()[0].0, Color::BLACK);
        assert_eq!(r.to_path_string(), "M0 0L1 0L1 1Z");
    }

    #[test]
    fn test_draw_outside_shape_is_ignored() {
        let mut r = SvgPathRenderer::new();
        r.add_circle(PointD::new(0.0, 0.0), 2.0, false);
        assert!(r.shapes().is_empty());
    }
}
