//! WIREMAP: pseudo-3D wireframe dungeon map
//!
//! Draws a layered node graph as a slowly spinning spiral tower:
//! - Perspective projection with an orbiting, eased camera
//! - Per-type OBJ wireframes with a cube fallback
//! - Screen-space hit regions that follow every visible node
//! - Parallax starfield behind the map
//!
//! The map graph itself is owned by the host; the view only reads it.

pub mod background;
pub mod config;
pub mod input;
pub mod map;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod view;

pub use background::MapBackground;
pub use config::{ConfigError, MapViewConfig};
pub use input::{InputRouter, InteractionLock, MapEvents, PointerButton, PointerEvent, Unlocked};
pub use map::{MapData, MapError, MapGraph, MapNode, NodeRole, NodeState, NodeType};
pub use mesh::{DirMeshSource, GeometryStore, MemoryMeshSource, MeshError, MeshSource};
pub use renderer::MapRenderer;
pub use scene::{hud_label, ExplorationScene};
pub use view::{CameraSnapshot, MapCamera, SnapshotError};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
