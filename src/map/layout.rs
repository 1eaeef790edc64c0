//! Spiral tower layout
//!
//! Every layer of the map becomes a horizontal ring, one `layer_height`
//! below the previous. Main nodes are spread evenly around the ring; branch
//! nodes sit on a wider ring at the same angle as the node that leads to
//! them, so a branch reads as a spoke shooting out of its attachment point.
//!
//! Results go into `LayoutAnnotations`, keyed by node id. Running the layout
//! again over the same map overwrites positions and angles but keeps each
//! node's animation phase.

use std::collections::{BTreeMap, HashMap};
use std::f32::consts::{FRAC_PI_2, TAU};
use rand::Rng;
use crate::config::LayoutConfig;
use crate::view::Vec3;
use super::MapNode;

/// Derived placement of one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    /// World-space position
    pub pos: Vec3,
    /// Azimuth on its ring (radians)
    pub angle: f32,
    /// Offset for the node's idle spin
    pub anim_phase: f32,
}

/// Layout results, keyed by node id
pub type LayoutAnnotations = HashMap<String, NodeLayout>;

pub struct LayoutEngine {
    pub config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn layer_y(&self, layer_index: u32) -> f32 {
        layer_index as f32 * self.config.layer_height
    }

    /// Lay out a freshly loaded (or refreshed) map.
    /// Annotations for ids that are no longer in `nodes` are dropped.
    pub fn layout<R: Rng + ?Sized>(
        &self,
        nodes: &[MapNode],
        annotations: &mut LayoutAnnotations,
        rng: &mut R,
    ) {
        annotations.retain(|id, _| nodes.iter().any(|n| &n.id == id));

        let mut layers: BTreeMap<u32, Vec<&MapNode>> = BTreeMap::new();
        for node in nodes {
            layers.entry(node.layer_index).or_default().push(node);
        }

        // Ascending order: a branch's parent on the layer above is placed first
        for (&layer_index, layer_nodes) in &layers {
            let layer_y = self.layer_y(layer_index);
            let (branch_nodes, main_nodes): (Vec<&MapNode>, Vec<&MapNode>) =
                layer_nodes.iter().partition(|n| n.is_branch());

            let count = main_nodes.len();
            for (i, node) in main_nodes.iter().enumerate() {
                // Phase offset puts the first node at a fixed spot on every ring
                let angle = (i as f32 / count as f32) * TAU + FRAC_PI_2;
                place(annotations, node, angle, self.config.radius_main, layer_y, rng);
            }

            let prev_layer = layer_index.checked_sub(1).and_then(|l| layers.get(&l));
            let branch_count = branch_nodes.len();
            for (i, node) in branch_nodes.iter().enumerate() {
                let parent = prev_layer
                    .and_then(|prev| prev.iter().find(|p| p.leads_to(&node.id)))
                    .or_else(|| main_nodes.iter().find(|p| p.leads_to(&node.id)));

                let angle = parent
                    .and_then(|p| annotations.get(&p.id))
                    .map(|l| l.angle)
                    .unwrap_or_else(|| (i as f32 / branch_count as f32) * TAU);

                place(annotations, node, angle, self.config.radius_extend, layer_y, rng);
            }
        }
    }

    /// Place a node that appeared after the initial layout.
    /// Always goes on the extended radius, like a branch.
    pub fn attach<R: Rng + ?Sized>(
        &self,
        node: &MapNode,
        anchor: Option<&MapNode>,
        nodes: &[MapNode],
        annotations: &mut LayoutAnnotations,
        rng: &mut R,
    ) -> NodeLayout {
        let parent = anchor
            .or_else(|| {
                node.layer_index.checked_sub(1).and_then(|prev| {
                    nodes.iter().find(|p| p.layer_index == prev && p.leads_to(&node.id))
                })
            })
            .or_else(|| {
                nodes.iter().find(|p| {
                    p.layer_index == node.layer_index && !p.is_branch() && p.leads_to(&node.id)
                })
            })
            .or_else(|| nodes.iter().find(|p| p.leads_to(&node.id)));

        let angle = match parent.and_then(|p| annotations.get(&p.id)) {
            Some(parent_layout) => parent_layout.angle,
            None => rng.gen_range(0.0..TAU),
        };

        let layout = NodeLayout {
            pos: Vec3::on_ring(angle, self.config.radius_extend, self.layer_y(node.layer_index)),
            angle,
            anim_phase: rng.gen_range(0.0..TAU),
        };
        annotations.insert(node.id.clone(), layout);
        layout
    }
}

fn place<R: Rng + ?Sized>(
    annotations: &mut LayoutAnnotations,
    node: &MapNode,
    angle: f32,
    radius: f32,
    layer_y: f32,
    rng: &mut R,
) {
    let pos = Vec3::on_ring(angle, radius, layer_y);
    annotations
        .entry(node.id.clone())
        .and_modify(|l| {
            l.pos = pos;
            l.angle = angle;
        })
        .or_insert_with(|| NodeLayout {
            pos,
            angle,
            anim_phase: rng.gen_range(0.0..TAU),
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{NodeRole, NodeType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> LayoutEngine {
        LayoutEngine::new(LayoutConfig::default())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn sample_nodes() -> Vec<MapNode> {
        vec![
            MapNode::new("r", NodeType::Root, 0).with_next(&["a", "b", "c"]),
            MapNode::new("a", NodeType::Combat, 1).with_next(&["side"]),
            MapNode::new("b", NodeType::Shop, 1),
            MapNode::new("c", NodeType::Rest, 1).with_next(&["inner"]),
            MapNode::new("side", NodeType::PortalNextChapter, 2).with_role(NodeRole::Branch),
            MapNode::new("inner", NodeType::PortalNextChapter, 1).with_role(NodeRole::Branch),
            MapNode::new("lost", NodeType::PortalNextChapter, 3).with_role(NodeRole::Branch),
        ]
    }

    #[test]
    fn test_main_ring_even_spacing() {
        let nodes = sample_nodes();
        let mut ann = LayoutAnnotations::new();
        engine().layout(&nodes, &mut ann, &mut rng());

        assert!((ann["r"].angle - FRAC_PI_2).abs() < 1e-6);
        assert!((ann["a"].angle - FRAC_PI_2).abs() < 1e-6);
        assert!((ann["b"].angle - (TAU / 3.0 + FRAC_PI_2)).abs() < 1e-5);
        assert!((ann["c"].angle - (2.0 * TAU / 3.0 + FRAC_PI_2)).abs() < 1e-5);

        let b = ann["b"].pos;
        assert!(((b.x * b.x + b.z * b.z).sqrt() - 350.0).abs() < 1e-2);
        assert_eq!(b.y, 250.0);
    }

    #[test]
    fn test_branch_inherits_parent_angle() {
        let nodes = sample_nodes();
        let mut ann = LayoutAnnotations::new();
        engine().layout(&nodes, &mut ann, &mut rng());

        // Parent on the layer above
        assert_eq!(ann["side"].angle, ann["a"].angle);
        // Parent on the same layer's ring
        assert_eq!(ann["inner"].angle, ann["c"].angle);

        let side = ann["side"].pos;
        assert!(((side.x * side.x + side.z * side.z).sqrt() - 550.0).abs() < 1e-2);
        assert_eq!(side.y, 500.0);
    }

    #[test]
    fn test_orphan_branch_falls_back_to_even_angle() {
        let nodes = sample_nodes();
        let mut ann = LayoutAnnotations::new();
        engine().layout(&nodes, &mut ann, &mut rng());
        // Only branch on layer 3, index 0
        assert_eq!(ann["lost"].angle, 0.0);
        assert_eq!(ann["lost"].pos.y, 750.0);
    }

    #[test]
    fn test_relayout_is_idempotent_and_keeps_phase() {
        let nodes = sample_nodes();
        let mut ann = LayoutAnnotations::new();
        let mut r = rng();
        engine().layout(&nodes, &mut ann, &mut r);
        let first = ann.clone();
        engine().layout(&nodes, &mut ann, &mut r);
        assert_eq!(first, ann);
        assert!(ann.values().all(|l| (0.0..TAU).contains(&l.anim_phase)));
    }

    #[test]
    fn test_relayout_prunes_removed_nodes() {
        let mut nodes = sample_nodes();
        let mut ann = LayoutAnnotations::new();
        engine().layout(&nodes, &mut ann, &mut rng());
        nodes.retain(|n| n.id != "b");
        engine().layout(&nodes, &mut ann, &mut rng());
        assert!(!ann.contains_key("b"));
        assert_eq!(ann.len(), nodes.len());
    }

    #[test]
    fn test_attach_inherits_anchor_angle() {
        let mut nodes = sample_nodes();
        let mut ann = LayoutAnnotations::new();
        let eng = engine();
        eng.layout(&nodes, &mut ann, &mut rng());

        nodes[2].next_nodes.push("late".to_string());
        let late = MapNode::new("late", NodeType::EventQuest, 2);
        let layout = eng.attach(&late, None, &nodes, &mut ann, &mut rng());
        assert_eq!(layout.angle, ann["b"].angle);
        assert_eq!(ann["late"], layout);
        let r = (layout.pos.x * layout.pos.x + layout.pos.z * layout.pos.z).sqrt();
        assert!((r - 550.0).abs() < 1e-2);

        let anchor = nodes[0].clone();
        let anchored = eng.attach(&MapNode::new("x", NodeType::Shop, 1), Some(&anchor), &nodes, &mut ann, &mut rng());
        assert_eq!(anchored.angle, ann["r"].angle);
    }

    #[test]
    fn test_attach_without_parent_still_placed() {
        let nodes = sample_nodes();
        let mut ann = LayoutAnnotations::new();
        let layout = engine().attach(&MapNode::new("stray", NodeType::Location, 4), None, &nodes, &mut ann, &mut rng());
        assert!((0.0..TAU).contains(&layout.angle));
        assert_eq!(layout.pos.y, 1000.0);
    }
}
