//! Wireframe meshes for map nodes

pub mod obj_import;
pub mod source;
pub mod store;

pub use obj_import::{ObjImporter, WireMesh};
pub use source::{DirMeshSource, MemoryMeshSource, MeshError, MeshSource};
pub use store::{GeometryStore, DEFAULT_MESH_SCALE, FALLBACK_CUBE_HALF_SIZE};
