//! Stroke model for freehand drawing
//!
//! All stroke coordinates and widths are stored in surface coordinates. The
//! rasterizer maps them to original-image pixels at export time.

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use crate::config::BrushColor;

/// A single path command of a drawn stroke
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadCurveTo { cx: f32, cy: f32, x: f32, y: f32 },
}

impl PathCommand {
    /// End point of the command
    pub fn end(&self) -> Point {
        match *self {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::QuadCurveTo { x, y, .. } => Point::new(x, y),
        }
    }

    /// Apply a point mapping to every coordinate of the command
    pub fn map(&self, f: impl Fn(Point) -> Point) -> PathCommand {
        match *self {
            PathCommand::MoveTo { x, y } => {
                let p = f(Point::new(x, y));
                PathCommand::MoveTo { x: p.x, y: p.y }
            }
            PathCommand::LineTo { x, y } => {
                let p = f(Point::new(x, y));
                PathCommand::LineTo { x: p.x, y: p.y }
            }
            PathCommand::QuadCurveTo { cx, cy, x, y } => {
                let c = f(Point::new(cx, cy));
                let p = f(Point::new(x, y));
                PathCommand::QuadCurveTo {
                    cx: c.x,
                    cy: c.y,
                    x: p.x,
                    y: p.y,
                }
            }
        }
    }
}

/// One continuous drawn gesture, from pointer-down to pointer-up
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub commands: Vec<PathCommand>,
    /// Line width in surface pixels
    pub width: f32,
    pub color: BrushColor,
}

impl Stroke {
    /// Build a smoothed stroke from raw pointer samples
    ///
    /// Samples become `MoveTo(p0)`, one `QuadCurveTo` per consecutive pair
    /// (control at the sample, end at the midpoint to the next sample) and a
    /// closing `LineTo(p_last)`. A single sample produces a dot.
    pub fn from_points(points: &[Point], width: f32, color: BrushColor) -> Option<Self> {
        let (&first, rest) = points.split_first()?;

        let mut commands = Vec::with_capacity(points.len() + 1);
        commands.push(PathCommand::MoveTo {
            x: first.x,
            y: first.y,
        });

        let mut prev = first;
        for &next in rest {
            let mid = prev.midpoint(next);
            commands.push(PathCommand::QuadCurveTo {
                cx: prev.x,
                cy: prev.y,
                x: mid.x,
                y: mid.y,
            });
            prev = next;
        }

        commands.push(PathCommand::LineTo {
            x: prev.x,
            y: prev.y,
        });

        Some(Self {
            commands,
            width,
            color,
        })
    }

    /// Return a copy with every coordinate mapped through `f` and the width scaled
    pub fn transformed(&self, f: impl Fn(Point) -> Point, width: f32) -> Stroke {
        Stroke {
            commands: self.commands.iter().map(|c| c.map(&f)).collect(),
            width,
            color: self.color,
        }
    }

    /// Whether every command lands on the same point (a click without movement)
    pub fn is_dot(&self) -> bool {
        let Some(first) = self.commands.first().map(PathCommand::end) else {
            return false;
        };
        self.commands.iter().all(|c| match *c {
            PathCommand::QuadCurveTo { cx, cy, x, y } => {
                Point::new(cx, cy) == first && Point::new(x, y) == first
            }
            _ => c.end() == first,
        })
    }

    /// First point of the stroke, if any
    pub fn start(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::end)
    }
}

/// Stroke being captured between pointer-down and pointer-up
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeInProgress {
    pub points: Vec<Point>,
    pub width: f32,
    pub color: BrushColor,
}

impl StrokeInProgress {
    pub fn new(start: Point, width: f32, color: BrushColor) -> Self {
        Self {
            points: vec![start],
            width,
            color,
        }
    }

    /// Append a pointer sample, ignoring exact repeats of the previous one
    pub fn push(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    /// Smoothed stroke for the samples captured so far
    pub fn to_stroke(&self) -> Option<Stroke> {
        Stroke::from_points(&self.points, self.width, self.color)
    }
}
