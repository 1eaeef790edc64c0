//! Geometry store
//!
//! Parsed wireframes keyed by node type. Lookups always succeed: a type with
//! no mesh gets the fallback cube.

use std::collections::HashMap;
use crate::map::NodeType;
use super::obj_import::{ObjImporter, WireMesh};
use super::source::MeshSource;

/// Half-size of the fallback cube
pub const FALLBACK_CUBE_HALF_SIZE: f32 = 10.0;

/// Scale used when none is given
pub const DEFAULT_MESH_SCALE: f32 = 15.0;

pub struct GeometryStore {
    cache: HashMap<NodeType, WireMesh>,
    fallback: WireMesh,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            fallback: WireMesh::cube(FALLBACK_CUBE_HALF_SIZE),
        }
    }

    /// Load every node type's mesh from a source. Missing meshes are
    /// logged and left to the fallback.
    pub fn init_from_source(&mut self, source: &dyn MeshSource, scale: f32) {
        for node_type in NodeType::ALL {
            let key = node_type.mesh_key();
            match source.mesh_text(key) {
                Some(text) => {
                    self.load(node_type, &text, scale);
                    tracing::info!(node_type = node_type.label(), key, "registered mesh");
                }
                None => {
                    tracing::warn!(node_type = node_type.label(), key, "mesh not found, using fallback cube");
                }
            }
        }
    }

    /// Parse OBJ text and store it for a node type
    pub fn load(&mut self, node_type: NodeType, text: &str, scale: f32) {
        self.cache.insert(node_type, ObjImporter::parse_wireframe(text, scale));
    }

    /// Runtime/debug injection; same path as `load`
    pub fn register_manual(&mut self, node_type: NodeType, text: &str, scale: Option<f32>) {
        self.load(node_type, text, scale.unwrap_or(DEFAULT_MESH_SCALE));
    }

    /// Mesh for a node type, or the fallback cube
    pub fn get(&self, node_type: NodeType) -> &WireMesh {
        self.cache.get(&node_type).unwrap_or(&self.fallback)
    }

    pub fn has(&self, node_type: NodeType) -> bool {
        self.cache.contains_key(&node_type)
    }

    pub fn fallback(&self) -> &WireMesh {
        &self.fallback
    }
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self::new()
    }
}
