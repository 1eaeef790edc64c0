//! macroquad-backed draw surface

use macroquad::prelude as mq;
use super::draw::DrawSurface;
use super::math::Vec2;
use super::types::{Color, LineStyle};

/// Draws straight to the macroquad window
pub struct ScreenSurface;

fn to_mq(color: Color) -> mq::Color {
    mq::Color::from_rgba(color.r(), color.g(), color.b(), (color.alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

impl DrawSurface for ScreenSurface {
    fn line(&mut self, from: Vec2, to: Vec2, style: LineStyle) {
        mq::draw_line(from.x, from.y, to.x, to.y, style.width, to_mq(style.color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        mq::draw_circle(center.x, center.y, radius, to_mq(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        mq::draw_rectangle(x, y, w, h, to_mq(color));
    }
}
