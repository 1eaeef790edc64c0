//! Node colors, stroke widths and spin speeds

use crate::map::{MapNode, NodeState, NodeType};
use crate::view::{Color, LineStyle};

/// Faint orbit joining the main nodes of a layer
pub const RING_STYLE: LineStyle = LineStyle::new(1.0, Color::hex(0x4FC3F7).with_alpha(0.15));

/// Successor connectors
pub const CONNECTOR_STYLE: LineStyle = LineStyle::new(2.0, Color::hex(0x4FC3F7).with_alpha(0.3));

/// Branch entrances share the chapter portal model; orchid keeps them apart
pub const BRANCH_PORTAL_COLOR: Color = Color::hex(0xDA70D6);

pub const CURRENT_COLOR: Color = Color::CYAN;

/// Base color by node type
pub fn base_color(node_type: NodeType) -> Color {
    Color::hex(match node_type {
        NodeType::Root => 0xE67E22,
        NodeType::Combat => 0xE74C3C,
        NodeType::EventChoice => 0x9B59B6,
        NodeType::EventInteraction => 0xFF69B4,
        NodeType::EventQuest => 0xF1C40F,
        NodeType::Resource => 0x2ECC71,
        NodeType::Shop => 0xF39C12,
        NodeType::Rest => 0xD35400,
        NodeType::PortalNextFloor => 0x1ABC9C,
        NodeType::PortalNextChapter => 0xFFFFFF,
        NodeType::Location => 0x3498DB,
    })
}

/// Stroke for a node's wireframe before visual scaling.
/// None for locked nodes, which are never drawn.
pub fn node_style(node: &MapNode, time: f32) -> Option<LineStyle> {
    let mut color = base_color(node.node_type);
    if node.node_type == NodeType::PortalNextChapter && node.is_branch() {
        color = BRANCH_PORTAL_COLOR;
    }

    match node.state {
        NodeState::Locked => None,
        // Breathing highlight, width 3.5..6.5
        NodeState::Current => Some(LineStyle::new(5.0 + (time * 8.0).sin() * 1.5, CURRENT_COLOR)),
        NodeState::Visited => Some(LineStyle::new(2.0, Color::WHITE.with_alpha(0.4))),
        NodeState::Revealed => Some(LineStyle::new(2.0, color)),
    }
}

/// Idle spin around the vertical axis (radians per second)
pub fn spin_speed(node: &MapNode) -> f32 {
    let mut speed = match node.node_type {
        NodeType::Combat => 3.0,
        NodeType::Root => 0.2,
        _ => 1.0,
    };
    if node.state == NodeState::Current {
        speed *= 1.5;
    }
    // Landmarks turn slowest of all, current or not
    if node.node_type == NodeType::Location {
        speed = 0.15;
    }
    speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::NodeRole;

    #[test]
    fn test_locked_has_no_style() {
        let node = MapNode::new("n", NodeType::Combat, 0);
        assert!(node_style(&node, 0.0).is_none());
    }

    #[test]
    fn test_branch_portal_tint() {
        let main = MapNode::new("exit", NodeType::PortalNextChapter, 0).with_state(NodeState::Revealed);
        let branch = main.clone().with_role(NodeRole::Branch);
        assert_eq!(node_style(&main, 0.0).unwrap().color, Color::WHITE);
        assert_eq!(node_style(&branch, 0.0).unwrap().color, BRANCH_PORTAL_COLOR);
    }

    #[test]
    fn test_current_pulse_and_visited_fade() {
        let current = MapNode::new("c", NodeType::Shop, 0).with_state(NodeState::Current);
        let style = node_style(&current, 0.0).unwrap();
        assert_eq!(style.color, CURRENT_COLOR);
        assert_eq!(style.width, 5.0);
        let pulsed = node_style(&current, std::f32::consts::PI / 16.0).unwrap();
        assert!((pulsed.width - 6.5).abs() < 1e-4);

        let visited = MapNode::new("v", NodeType::Shop, 0).with_state(NodeState::Visited);
        assert_eq!(node_style(&visited, 0.0).unwrap().color.alpha, 0.4);
    }

    #[test]
    fn test_spin_speeds() {
        let speed = |t, s| spin_speed(&MapNode::new("n", t, 0).with_state(s));
        assert_eq!(speed(NodeType::Combat, NodeState::Revealed), 3.0);
        assert_eq!(speed(NodeType::Combat, NodeState::Current), 4.5);
        assert_eq!(speed(NodeType::Root, NodeState::Revealed), 0.2);
        assert_eq!(speed(NodeType::Location, NodeState::Current), 0.15);
        assert_eq!(speed(NodeType::Shop, NodeState::Revealed), 1.0);
        assert!(speed(NodeType::Location, NodeState::Revealed) < speed(NodeType::Root, NodeState::Revealed));
    }
}
