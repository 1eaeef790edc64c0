//! Where mesh text comes from
//!
//! The store asks a `MeshSource` for raw OBJ text by key. A missing key is
//! not an error at this level; the store falls back to its cube.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("mesh directory {path} is not readable: {source}")]
    Directory { path: PathBuf, source: io::Error },
}

/// Provider of raw mesh text keyed by resource name
pub trait MeshSource {
    fn mesh_text(&self, key: &str) -> Option<String>;
}

/// Meshes held in memory (embedded assets, tests, debug injection)
#[derive(Debug, Clone, Default)]
pub struct MemoryMeshSource {
    meshes: HashMap<String, String>,
}

impl MemoryMeshSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.meshes.insert(key.into(), text.into());
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }
}

impl MeshSource for MemoryMeshSource {
    fn mesh_text(&self, key: &str) -> Option<String> {
        self.meshes.get(key).cloned()
    }
}

/// `<dir>/<key>.obj` files on disk
#[derive(Debug, Clone)]
pub struct DirMeshSource {
    root: PathBuf,
}

impl DirMeshSource {
    /// Open a mesh directory; fails only if the directory itself is unusable
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, MeshError> {
        let root = root.as_ref().to_path_buf();
        fs::read_dir(&root).map_err(|source| MeshError::Directory {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Keys of every .obj file in the directory, sorted
    pub fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("obj")))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
            .collect();
        keys.sort();
        keys
    }
}

impl MeshSource for DirMeshSource {
    fn mesh_text(&self, key: &str) -> Option<String> {
        let path = self.root.join(format!("{}.obj", key));
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read mesh file");
                None
            }
        }
    }
}
