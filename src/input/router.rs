//! Pointer routing
//!
//! Turns pointer events into camera gestures and hit-region hover/click
//! callbacks. Every gesture first asks the `InteractionLock`; the router
//! never owns that state.

use crate::config::InputConfig;
use crate::map::{MapGraph, MapNode};
use crate::renderer::MapRenderer;
use crate::view::Vec2;

/// Text the generator leaves in descriptions it has not written yet
pub const DESCRIPTION_PLACEHOLDER: &str = "(pending)";

/// "Is interaction currently blocked?", e.g. while a dialog is open
pub trait InteractionLock {
    fn is_blocked(&self) -> bool;
}

impl<F: Fn() -> bool> InteractionLock for F {
    fn is_blocked(&self) -> bool {
        self()
    }
}

/// Lock that never blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlocked;

impl InteractionLock for Unlocked {
    fn is_blocked(&self) -> bool {
        false
    }
}

/// Callbacks into the host UI. The view draws no tooltip chrome itself.
pub trait MapEvents {
    fn node_clicked(&mut self, node: &MapNode);
    fn show_tooltip(&mut self, text: &str, x: f32, y: f32);
    fn hide_tooltip(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved; button flags are the state during the move
    Move {
        x: f32,
        y: f32,
        prev_x: f32,
        prev_y: f32,
        left_down: bool,
        middle_down: bool,
    },
    Down {
        x: f32,
        y: f32,
        button: PointerButton,
    },
    /// Positive is "scroll down" (zoom out)
    Wheel { delta_y: f32 },
}

/// Tooltip body: the name, then the description when it adds something
pub fn tooltip_text(node: &MapNode) -> String {
    let name = node.name.as_deref().unwrap_or("Unknown area");
    match node.description.as_deref() {
        Some(desc) if !desc.is_empty() && desc != DESCRIPTION_PLACEHOLDER && desc != name => {
            format!("{}\n{}", name, desc)
        }
        _ => name.to_string(),
    }
}

pub struct InputRouter {
    pub config: InputConfig,
}

impl InputRouter {
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        renderer: &mut MapRenderer,
        graph: &dyn MapGraph,
        lock: &dyn InteractionLock,
        events: &mut dyn MapEvents,
    ) {
        match event {
            PointerEvent::Move { x, y, prev_x, prev_y, left_down, middle_down } => {
                if !lock.is_blocked() {
                    let (dx, dy) = (x - prev_x, y - prev_y);
                    if left_down && !middle_down {
                        renderer.camera.pan(-dy * self.config.pan_sensitivity);
                    } else if middle_down {
                        renderer.camera.rotate(dx * self.config.rotate_sensitivity);
                    }
                }
                self.update_hover(Vec2::new(x, y), renderer, graph, lock, events);
            }
            PointerEvent::Wheel { delta_y } => {
                if lock.is_blocked() {
                    return;
                }
                if delta_y > 0.0 {
                    renderer.camera.zoom_change(-self.config.zoom_step);
                } else if delta_y < 0.0 {
                    renderer.camera.zoom_change(self.config.zoom_step);
                }
            }
            PointerEvent::Down { x, y, button } => {
                if button != PointerButton::Left || lock.is_blocked() {
                    return;
                }
                let Some(region) = renderer.hit_regions.pick(Vec2::new(x, y)) else {
                    return;
                };
                if let Some(node) = graph.find(&region.node_id) {
                    events.node_clicked(node);
                }
            }
        }
    }

    /// Pointer-over / pointer-out against the visible hit regions.
    /// Leaving a region always hides the tooltip, lock or not.
    fn update_hover(
        &mut self,
        point: Vec2,
        renderer: &mut MapRenderer,
        graph: &dyn MapGraph,
        lock: &dyn InteractionLock,
        events: &mut dyn MapEvents,
    ) {
        let picked = renderer.hit_regions.pick(point).map(|r| r.node_id.clone());
        let previous = renderer.hit_regions.hovered().map(str::to_owned);

        if picked == previous {
            return;
        }

        if previous.is_some() {
            renderer.hit_regions.set_hovered(None);
            events.hide_tooltip();
        }

        let Some(id) = picked else {
            return;
        };
        if lock.is_blocked() {
            return;
        }
        renderer.hit_regions.set_hovered(Some(id.clone()));
        match graph.find(&id) {
            Some(node) if !node.is_locked() => events.show_tooltip(&tooltip_text(node), point.x, point.y),
            _ => events.hide_tooltip(),
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
