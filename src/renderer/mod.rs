//! Map renderer
//!
//! Wireframe tower view of the map graph:
//! 1. Layout: nodes get spiral-tower positions once per map load.
//! 2. Frame: camera eases, every visible node is projected, sorted far to
//!    near, then rings, connectors and rotating wireframes are recorded.
//! 3. Interaction: each node's hit region follows its projection.
//!
//! Both draw layers are cleared and rebuilt every frame. Removing a node
//! from the graph is enough to make it disappear on the next frame.

pub mod hitbox;
pub mod style;

use std::collections::{BTreeMap, HashMap};
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::{MapViewConfig, RenderConfig};
use crate::map::{LayoutAnnotations, LayoutEngine, MapGraph, MapNode, NodeLayout, NodeState};
use crate::mesh::GeometryStore;
use crate::view::{DrawList, DrawSurface, MapCamera, Vec2};

pub use hitbox::{HitRegion, HitRegions};
pub use style::{base_color, node_style, spin_speed, CONNECTOR_STYLE, RING_STYLE};

/// A node's projection for the current frame
#[derive(Debug, Clone, Copy)]
pub struct ProjectedNode<'a> {
    pub node: &'a MapNode,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub depth: f32,
    pub z: f32,
}

impl ProjectedNode<'_> {
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

pub struct MapRenderer {
    pub camera: MapCamera,
    pub geometries: GeometryStore,
    pub hit_regions: HitRegions,
    layout: LayoutEngine,
    annotations: LayoutAnnotations,
    config: RenderConfig,
    /// Seconds since creation, drives spin and pulse
    time: f32,
    /// Rings and connectors, drawn first
    line_layer: DrawList,
    /// Wireframes, drawn on top
    node_layer: DrawList,
    rng: StdRng,
}

impl MapRenderer {
    pub fn new(viewport_width: f32, viewport_height: f32, config: &MapViewConfig) -> Self {
        Self::with_rng(viewport_width, viewport_height, config, StdRng::from_entropy())
    }

    /// Deterministic animation phases (tests, replays)
    pub fn with_rng(viewport_width: f32, viewport_height: f32, config: &MapViewConfig, rng: StdRng) -> Self {
        Self {
            camera: MapCamera::new(viewport_width, viewport_height, &config.camera),
            geometries: GeometryStore::new(),
            hit_regions: HitRegions::new(config.render.hit_radius),
            layout: LayoutEngine::new(config.layout.clone()),
            annotations: LayoutAnnotations::new(),
            config: config.render.clone(),
            time: 0.0,
            line_layer: DrawList::new(),
            node_layer: DrawList::new(),
            rng,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn layout_of(&self, node_id: &str) -> Option<&NodeLayout> {
        self.annotations.get(node_id)
    }

    pub fn line_layer(&self) -> &DrawList {
        &self.line_layer
    }

    pub fn node_layer(&self) -> &DrawList {
        &self.node_layer
    }

    /// Replay this frame's layers, lines under wireframes
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        self.line_layer.replay(surface);
        self.node_layer.replay(surface);
    }

    /// Wipe the scene for a map switch: layers, hit regions, layout, camera
    pub fn clear(&mut self) {
        self.line_layer.clear();
        self.node_layer.clear();
        self.hit_regions.clear();
        self.annotations.clear();
        self.camera.reset();
    }

    // ==========================================
    // Layout
    // ==========================================

    /// Lay out the whole map and give every node a hit region.
    /// Safe to call again on the same map.
    pub fn init_3d_layout(&mut self, graph: &dyn MapGraph) {
        let nodes = graph.current_nodes();
        self.layout.layout(nodes, &mut self.annotations, &mut self.rng);

        self.hit_regions.retain(|id| nodes.iter().any(|n| n.id == id));
        for node in nodes {
            self.hit_regions.create(&node.id);
        }
    }

    /// Place a node that joined the graph after layout.
    /// `anchor` is the node it hangs from, if the caller knows it.
    pub fn add_node_to_scene(&mut self, graph: &dyn MapGraph, node: &MapNode, anchor: Option<&MapNode>) {
        if self.hit_regions.contains(&node.id) {
            return;
        }
        let layout = self.layout.attach(node, anchor, graph.current_nodes(), &mut self.annotations, &mut self.rng);
        self.hit_regions.create(&node.id);
        tracing::info!(
            node_id = %node.id,
            layer = node.layer_index,
            angle = layout.angle,
            "attached node to scene"
        );
    }

    /// Forget a node's hit region and layout. Its drawing goes away by
    /// itself once the graph no longer lists it.
    pub fn remove_node_from_scene(&mut self, node_id: &str) {
        self.hit_regions.destroy(node_id);
        self.annotations.remove(node_id);
    }

    // ==========================================
    // Frame
    // ==========================================

    /// Advance one frame. Call every tick with the frame delta in ms.
    pub fn update(&mut self, graph: &dyn MapGraph, delta_ms: f32) {
        self.time += delta_ms * 0.001;

        // Camera first, so projection, drawing and hit regions agree
        self.camera.update();

        self.line_layer.clear();
        self.node_layer.clear();
        self.hit_regions.hide_all();

        let nodes = graph.current_nodes();
        if nodes.is_empty() {
            return;
        }

        let projected = self.project_nodes(nodes);

        self.draw_layer_rings(&projected);
        self.draw_connectors(&projected);

        for p in &projected {
            self.hit_regions.place(&p.node.id, p.x, p.y, p.scale, p.depth);
            self.draw_wireframe(p.node, p.x, p.y, p.scale);
        }
    }

    /// Project every drawable node and sort far to near.
    /// Locked nodes, nodes without layout and culled nodes are left out.
    pub fn project_nodes<'a>(&self, nodes: &'a [MapNode]) -> Vec<ProjectedNode<'a>> {
        let mut projected: Vec<ProjectedNode<'a>> = nodes
            .iter()
            .filter(|node| !node.is_locked())
            .filter_map(|node| {
                let layout = self.annotations.get(&node.id)?;
                let p = self.camera.project_point(layout.pos)?;
                Some(ProjectedNode {
                    node,
                    x: p.x,
                    y: p.y,
                    scale: p.scale,
                    depth: p.depth,
                    z: p.z,
                })
            })
            .collect();

        // Painter's order; sort_by is stable so ties keep graph order
        projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        projected
    }

    /// Closed orbit through each layer's main-ring nodes, by layout angle
    fn draw_layer_rings(&mut self, projected: &[ProjectedNode]) {
        let mut groups: BTreeMap<u32, Vec<&ProjectedNode>> = BTreeMap::new();
        for p in projected {
            if p.node.is_locked() || p.node.is_branch() {
                continue;
            }
            groups.entry(p.node.layer_index).or_default().push(p);
        }

        for group in groups.values_mut() {
            if group.len() < 2 {
                continue;
            }
            let angle = |p: &ProjectedNode| self.annotations.get(&p.node.id).map_or(0.0, |l| l.angle);
            group.sort_by(|a, b| angle(a).total_cmp(&angle(b)));

            let points: Vec<Vec2> = group.iter().map(|p| p.screen()).collect();
            self.line_layer.polyline(&points, true, RING_STYLE);
        }
    }

    /// Straight line from each visible node to each visible successor
    fn draw_connectors(&mut self, projected: &[ProjectedNode]) {
        let by_id: HashMap<&str, &ProjectedNode> =
            projected.iter().map(|p| (p.node.id.as_str(), p)).collect();

        for p in projected {
            if p.node.is_locked() {
                continue;
            }
            for next_id in &p.node.next_nodes {
                let Some(target) = by_id.get(next_id.as_str()) else {
                    continue;
                };
                if target.node.is_locked() {
                    continue;
                }
                self.line_layer.line(p.screen(), target.screen(), CONNECTOR_STYLE);
            }
        }
    }

    /// One node's spinning wireframe, centred on its projection
    fn draw_wireframe(&mut self, node: &MapNode, center_x: f32, center_y: f32, scale: f32) {
        let Some(style) = node_style(node, self.time) else {
            return;
        };

        let geometry = self.geometries.get(node.node_type);
        let visual_scale = scale * self.config.visual_scale;

        let phase = self.annotations.get(&node.id).map_or(0.0, |l| l.anim_phase);
        let (sin_r, cos_r) = (self.time * spin_speed(node) + phase).sin_cos();

        let points: Vec<Vec2> = geometry
            .vertices
            .iter()
            .map(|v| {
                let r = v.rotate_y(cos_r, sin_r);
                Vec2::new(center_x + r.x * visual_scale, center_y + r.y * visual_scale)
            })
            .collect();

        let mut stroke = style;
        stroke.width *= visual_scale;
        for &[a, b] in &geometry.edges {
            self.node_layer.line(points[a], points[b], stroke);
        }

        if node.state == NodeState::Current {
            self.node_layer.fill_circle(
                Vec2::new(center_x, center_y),
                5.0 * visual_scale,
                style.color.with_alpha(0.2),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapData, NodeRole, NodeType};
    use crate::view::{DrawCommand, LineStyle};

    fn renderer() -> MapRenderer {
        MapRenderer::with_rng(800.0, 600.0, &MapViewConfig::default(), StdRng::seed_from_u64(1))
    }

    fn sample_map() -> MapData {
        let mut map = MapData::new("test", vec![
            MapNode::new("root", NodeType::Root, 0).with_state(NodeState::Current).with_next(&["a", "b", "fog"]),
            MapNode::new("a", NodeType::Combat, 1).with_state(NodeState::Revealed).with_next(&["deep"]),
            MapNode::new("b", NodeType::Shop, 1).with_state(NodeState::Visited).with_next(&["fog"]),
            MapNode::new("fog", NodeType::Rest, 1).with_next(&["a"]),
            MapNode::new("deep", NodeType::PortalNextFloor, 2).with_state(NodeState::Revealed),
        ]);
        map.current_node_id = Some("root".to_string());
        map
    }

    fn connector_lines(r: &MapRenderer) -> Vec<(Vec2, Vec2)> {
        r.line_layer()
            .lines()
            .filter(|(_, _, s)| *s == CONNECTOR_STYLE)
            .map(|(a, b, _)| (a, b))
            .collect()
    }

    #[test]
    fn test_layout_creates_regions_for_every_node() {
        let map = sample_map();
        let mut r = renderer();
        r.init_3d_layout(&map);
        assert_eq!(r.hit_regions.len(), 5);
        assert!(map.nodes.iter().all(|n| r.layout_of(&n.id).is_some()));
    }

    #[test]
    fn test_projection_sorted_far_to_near() {
        let map = sample_map();
        let mut r = renderer();
        r.init_3d_layout(&map);
        r.camera.rotate(0.7);
        for _ in 0..30 {
            r.update(&map, 16.0);
        }
        let projected = r.project_nodes(&map.nodes);
        assert!(!projected.is_empty());
        assert!(projected.windows(2).all(|w| w[0].depth >= w[1].depth));
    }

    #[test]
    fn test_equal_depth_keeps_graph_order() {
        let mut map = sample_map();
        let mut r = renderer();
        r.init_3d_layout(&map);

        // Same anchor, same layer: both land on the identical spot
        let anchor = map.find("a").unwrap().clone();
        for id in ["twin_y", "twin_x"] {
            let node = MapNode::new(id, NodeType::PortalNextChapter, 1)
                .with_state(NodeState::Revealed)
                .with_role(NodeRole::Branch);
            map.nodes.push(node.clone());
            r.add_node_to_scene(&map, &node, Some(&anchor));
        }
        assert_eq!(r.layout_of("twin_y").unwrap().pos, r.layout_of("twin_x").unwrap().pos);

        r.update(&map, 16.0);
        let order: Vec<&str> = r
            .project_nodes(&map.nodes)
            .iter()
            .map(|p| p.node.id.as_str())
            .filter(|id| id.starts_with("twin_"))
            .collect();
        assert_eq!(order, vec!["twin_y", "twin_x"]);
    }

    #[test]
    fn test_locked_node_never_projected_or_connected() {
        let map = sample_map();
        let mut r = renderer();
        r.init_3d_layout(&map);
        r.update(&map, 16.0);

        let projected = r.project_nodes(&map.nodes);
        assert!(projected.iter().all(|p| p.node.id != "fog"));
        assert!(!r.hit_regions.get("fog").unwrap().visible);

        let fog_pos = r.layout_of("fog").unwrap().pos;
        let fog_screen = r.camera.project_point(fog_pos).map(|p| Vec2::new(p.x, p.y));
        let lines = connector_lines(&r);
        // root->a, root->b, a->deep; everything touching fog is dropped
        assert_eq!(lines.len(), 3);
        if let Some(fog) = fog_screen {
            assert!(lines.iter().all(|(a, b)| *a != fog && *b != fog));
        }
    }

    #[test]
    fn test_culled_node_hides_region_and_connector() {
        let map = sample_map();
        let mut r = renderer();
        r.init_3d_layout(&map);
        // Put the camera right on top of the deep layer so it falls behind the near plane
        r.camera.focal_length = 100.0;
        r.camera.rotation.x = 0.0;
        r.update(&map, 16.0);

        let projected = r.project_nodes(&map.nodes);
        let visible: Vec<&str> = projected.iter().map(|p| p.node.id.as_str()).collect();
        assert!(visible.contains(&"root"));
        assert!(!visible.contains(&"b"));
        for node in &map.nodes {
            let region = r.hit_regions.get(&node.id).unwrap();
            assert_eq!(region.visible, visible.contains(&node.id.as_str()), "node {}", node.id);
        }
        // Every connector joins two projected points
        let points: Vec<Vec2> = projected.iter().map(|p| p.screen()).collect();
        for (a, b) in connector_lines(&r) {
            assert!(points.contains(&a) && points.contains(&b));
        }
    }

    #[test]
    fn test_ring_closes_over_main_nodes_only() {
        let mut map = sample_map();
        for node in &mut map.nodes {
            if node.id == "fog" {
                node.state = NodeState::Revealed;
            }
        }
        map.nodes.push(
            MapNode::new("side", NodeType::PortalNextChapter, 1)
                .with_state(NodeState::Revealed)
                .with_role(NodeRole::Branch),
        );
        let mut r = renderer();
        r.init_3d_layout(&map);
        r.update(&map, 16.0);

        let rings: Vec<_> = r.line_layer().lines().filter(|(_, _, s)| *s == RING_STYLE).collect();
        // Layer 1 has three main nodes -> closed triangle; layer 0 and 2 have one each
        assert_eq!(rings.len(), 3);
    }

    #[test]
    fn test_wireframe_edges_and_current_disc() {
        let map = sample_map();
        let mut r = renderer();
        r.init_3d_layout(&map);
        r.update(&map, 16.0);

        let lines = r.node_layer().lines().count();
        // root, a, b, deep drawn with the fallback cube
        assert_eq!(lines, 4 * 12);
        let discs: Vec<_> = r
            .node_layer()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .collect();
        assert_eq!(discs.len(), 1);
    }

    #[test]
    fn test_wireframe_width_uses_visual_scale() {
        let map = MapData::new("one", vec![
            MapNode::new("v", NodeType::Shop, 0).with_state(NodeState::Visited),
        ]);
        let mut r = renderer();
        r.init_3d_layout(&map);
        r.update(&map, 16.0);

        let projected = r.project_nodes(&map.nodes);
        let expected = 2.0 * projected[0].scale * 1.5;
        let (_, _, style): (Vec2, Vec2, LineStyle) = r.node_layer().lines().next().unwrap();
        assert!((style.width - expected).abs() < 1e-4);
        assert_eq!(style.color.alpha, 0.4);
    }

    #[test]
    fn test_add_and_remove_dynamic_node() {
        let mut map = sample_map();
        let mut r = renderer();
        r.init_3d_layout(&map);

        map.nodes[1].next_nodes.push("quest".to_string());
        let quest = MapNode::new("quest", NodeType::EventQuest, 2).with_state(NodeState::Revealed);
        map.nodes.push(quest.clone());
        r.add_node_to_scene(&map, &quest, None);
        assert_eq!(r.layout_of("quest").unwrap().angle, r.layout_of("a").unwrap().angle);

        // Second add is a no-op
        let before = *r.layout_of("quest").unwrap();
        r.add_node_to_scene(&map, &quest, None);
        assert_eq!(*r.layout_of("quest").unwrap(), before);

        r.remove_node_from_scene("quest");
        map.nodes.retain(|n| n.id != "quest");
        r.update(&map, 16.0);
        assert!(!r.hit_regions.contains("quest"));
        assert!(r.layout_of("quest").is_none());
    }

    #[test]
    fn test_clock_and_empty_map() {
        let mut r = renderer();
        let empty = MapData::default();
        r.update(&empty, 500.0);
        assert!((r.time() - 0.5).abs() < 1e-6);
        assert!(r.line_layer().is_empty() && r.node_layer().is_empty());
    }

    #[test]
    fn test_clear_resets_scene() {
        let map = sample_map();
        let mut r = renderer();
        r.init_3d_layout(&map);
        r.camera.zoom_change(0.5);
        r.update(&map, 16.0);
        r.clear();
        assert!(r.hit_regions.is_empty());
        assert!(r.layout_of("root").is_none());
        assert_eq!(r.camera.zoom, 1.0);
        assert!(r.node_layer().is_empty());
    }
}
