//! Mouse polling (macroquad)
//!
//! Converts macroquad's per-frame mouse state into `PointerEvent`s.

use macroquad::prelude::*;
use super::router::{PointerButton, PointerEvent};

/// Tracks the previous mouse position between frames
pub struct PointerPoller {
    last: Option<(f32, f32)>,
}

impl PointerPoller {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Call once per frame; returns this frame's events in dispatch order
    pub fn poll(&mut self) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let (x, y) = mouse_position();

        let (prev_x, prev_y) = self.last.unwrap_or((x, y));
        if (x, y) != (prev_x, prev_y) {
            events.push(PointerEvent::Move {
                x,
                y,
                prev_x,
                prev_y,
                left_down: is_mouse_button_down(MouseButton::Left),
                middle_down: is_mouse_button_down(MouseButton::Middle),
            });
        }
        self.last = Some((x, y));

        for (button, pointer) in [
            (MouseButton::Left, PointerButton::Left),
            (MouseButton::Middle, PointerButton::Middle),
            (MouseButton::Right, PointerButton::Right),
        ] {
            if is_mouse_button_pressed(button) {
                events.push(PointerEvent::Down { x, y, button: pointer });
            }
        }

        // macroquad reports scroll-up as positive
        let (_, wheel_y) = mouse_wheel();
        if wheel_y != 0.0 {
            events.push(PointerEvent::Wheel { delta_y: -wheel_y });
        }

        events
    }
}

impl Default for PointerPoller {
    fn default() -> Self {
        Self::new()
    }
}
