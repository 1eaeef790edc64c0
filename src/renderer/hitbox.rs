//! Interactive hit regions
//!
//! One invisible circle per laid-out node. The renderer moves and rescales
//! them every frame to match the projection; regions of culled or locked
//! nodes are hidden for that frame.

use std::collections::HashMap;
use crate::view::Vec2;

/// Priority before the first frame places the region
const INITIAL_PRIORITY: f32 = 100.0;

/// Priority is `PRIORITY_BASE - depth`: nearer regions win
const PRIORITY_BASE: f32 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub node_id: String,
    pub center: Vec2,
    pub scale: f32,
    /// Unscaled radius
    pub radius: f32,
    /// Higher wins when regions overlap
    pub priority: f32,
    pub visible: bool,
}

impl HitRegion {
    pub fn contains(&self, point: Vec2) -> bool {
        self.visible && self.center.distance(point) <= self.radius * self.scale
    }
}

#[derive(Debug, Clone)]
pub struct HitRegions {
    regions: HashMap<String, HitRegion>,
    radius: f32,
    hovered: Option<String>,
}

impl HitRegions {
    pub fn new(radius: f32) -> Self {
        Self {
            regions: HashMap::new(),
            radius,
            hovered: None,
        }
    }

    /// Create a region for a node. Returns false if it already had one.
    pub fn create(&mut self, node_id: &str) -> bool {
        if self.regions.contains_key(node_id) {
            return false;
        }
        self.regions.insert(
            node_id.to_string(),
            HitRegion {
                node_id: node_id.to_string(),
                center: Vec2::default(),
                scale: 1.0,
                radius: self.radius,
                priority: INITIAL_PRIORITY,
                visible: false,
            },
        );
        true
    }

    pub fn destroy(&mut self, node_id: &str) -> Option<HitRegion> {
        if self.hovered.as_deref() == Some(node_id) {
            self.hovered = None;
        }
        self.regions.remove(node_id)
    }

    /// Drop regions whose node is gone
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.regions.retain(|id, _| keep(id));
        if let Some(id) = &self.hovered {
            if !self.regions.contains_key(id) {
                self.hovered = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.hovered = None;
    }

    pub fn hide_all(&mut self) {
        for region in self.regions.values_mut() {
            region.visible = false;
        }
    }

    /// Move a region onto its node's projection for this frame
    pub fn place(&mut self, node_id: &str, x: f32, y: f32, scale: f32, depth: f32) {
        if let Some(region) = self.regions.get_mut(node_id) {
            region.visible = true;
            region.center = Vec2::new(x, y);
            region.scale = scale;
            region.priority = PRIORITY_BASE - depth;
        }
    }

    pub fn get(&self, node_id: &str) -> Option<&HitRegion> {
        self.regions.get(node_id)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.regions.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Topmost visible region under a point
    pub fn pick(&self, point: Vec2) -> Option<&HitRegion> {
        self.regions
            .values()
            .filter(|r| r.contains(point))
            .max_by(|a, b| a.priority.total_cmp(&b.priority))
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn set_hovered(&mut self, node_id: Option<String>) {
        self.hovered = node_id;
    }
}
