//! Retained draw lists
//!
//! Each visual layer records its primitives for one frame into a `DrawList`.
//! The list is cleared and refilled every frame, then replayed onto whatever
//! `DrawSurface` the host provides. Nothing is diffed between frames.

use super::math::Vec2;
use super::types::{Color, LineStyle};

/// Anything that can put primitives on screen
pub trait DrawSurface {
    fn line(&mut self, from: Vec2, to: Vec2, style: LineStyle);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
}

/// A recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line { from: Vec2, to: Vec2, style: LineStyle },
    FillCircle { center: Vec2, radius: f32, color: Color },
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Color },
}

/// One layer's primitives for the current frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, style: LineStyle) {
        self.commands.push(DrawCommand::Line { from, to, style });
    }

    /// Connect the points in order, optionally closing back to the first
    pub fn polyline(&mut self, points: &[Vec2], closed: bool, style: LineStyle) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], style);
        }
        if closed && points.len() > 1 {
            self.line(points[points.len() - 1], points[0], style);
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    /// Replay everything onto a surface, in recording order
    pub fn replay(&self, surface: &mut dyn DrawSurface) {
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::Line { from, to, style } => surface.line(from, to, style),
                DrawCommand::FillCircle { center, radius, color } => {
                    surface.fill_circle(center, radius, color)
                }
                DrawCommand::FillRect { x, y, w, h, color } => surface.fill_rect(x, y, w, h, color),
            }
        }
    }

    /// Iterate over recorded line segments
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, LineStyle)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Line { from, to, style } => Some((from, to, style)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSurface {
        lines: usize,
        circles: usize,
        rects: usize,
    }

    impl DrawSurface for CountingSurface {
        fn line(&mut self, _: Vec2, _: Vec2, _: LineStyle) {
            self.lines += 1;
        }
        fn fill_circle(&mut self, _: Vec2, _: f32, _: Color) {
            self.circles += 1;
        }
        fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: Color) {
            self.rects += 1;
        }
    }

    #[test]
    fn test_closed_polyline() {
        let mut list = DrawList::new();
        let style = LineStyle::new(1.0, Color::WHITE);
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        list.polyline(&pts, true, style);
        assert_eq!(list.lines().count(), 3);
        let last = list.lines().last().unwrap();
        assert_eq!((last.0, last.1), (pts[2], pts[0]));
    }

    #[test]
    fn test_replay_and_clear() {
        let mut list = DrawList::new();
        list.line(Vec2::default(), Vec2::new(1.0, 1.0), LineStyle::new(2.0, Color::CYAN));
        list.fill_circle(Vec2::default(), 3.0, Color::WHITE);
        list.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);

        let mut surface = CountingSurface { lines: 0, circles: 0, rects: 0 };
        list.replay(&mut surface);
        assert_eq!((surface.lines, surface.circles, surface.rects), (1, 1, 1));

        list.clear();
        assert!(list.is_empty());
    }
}
