//! OBJ import for wireframe meshes
//!
//! Only the subset the map needs: `v` positions and `f` faces. Faces become
//! their cyclic edge loop, and an edge shared by two faces is kept once.
//! Everything else (vt, vn, o, g, s, usemtl...) is ignored.

use std::collections::HashSet;
use crate::view::Vec3;

/// Vertices and unique edges of a wireframe model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireMesh {
    /// Local-space positions, already scaled
    pub vertices: Vec<Vec3>,
    /// Unordered vertex index pairs, each at most once
    pub edges: Vec<[usize; 2]>,
}

impl WireMesh {
    /// Axis-aligned cube with the given half-size: 8 vertices, 12 edges
    pub fn cube(half: f32) -> Self {
        let s = half;
        let vertices = vec![
            Vec3::new(-s, -s, -s), Vec3::new(s, -s, -s), Vec3::new(s, s, -s), Vec3::new(-s, s, -s),
            Vec3::new(-s, -s, s), Vec3::new(s, -s, s), Vec3::new(s, s, s), Vec3::new(-s, s, s),
        ];
        let edges = vec![
            [0, 1], [1, 2], [2, 3], [3, 0],
            [4, 5], [5, 6], [6, 7], [7, 4],
            [0, 4], [1, 5], [2, 6], [3, 7],
        ];
        Self { vertices, edges }
    }
}

/// OBJ wireframe importer
pub struct ObjImporter;

impl ObjImporter {
    /// Parse OBJ text into a wireframe.
    ///
    /// Never fails: bad vertex coordinates read as 0 and face edges that
    /// point outside the vertices read so far are skipped. Y is negated so
    /// "up" in the model is up on a y-down screen.
    pub fn parse_wireframe(contents: &str, scale: f32) -> WireMesh {
        let mut mesh = WireMesh::default();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for line in contents.lines() {
            // Strip trailing comments
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    // Every `v` line takes an index, even a broken one,
                    // so faces further down still line up
                    let mut coord = || parts.next().and_then(|p| p.parse::<f32>().ok()).unwrap_or(0.0);
                    let (x, y, z) = (coord(), coord(), coord());
                    mesh.vertices.push(Vec3::new(x * scale, -y * scale, z * scale));
                }

                Some("f") => {
                    // f v1 v2/vt2 v3/vt3/vn3 ... (1-based)
                    let indices: Vec<Option<usize>> = parts.map(Self::parse_face_index).collect();
                    let n = indices.len();
                    for i in 0..n {
                        let (Some(start), Some(end)) = (indices[i], indices[(i + 1) % n]) else {
                            continue;
                        };
                        if start >= mesh.vertices.len() || end >= mesh.vertices.len() {
                            continue;
                        }
                        let key = (start.min(end), start.max(end));
                        if seen.insert(key) {
                            mesh.edges.push([start, end]);
                        }
                    }
                }

                _ => {}
            }
        }

        mesh
    }

    /// "3", "3/1" or "3//2" -> Some(2); anything unusable -> None
    fn parse_face_index(token: &str) -> Option<usize> {
        let first = token.split('/').next()?;
        let idx: usize = first.parse().ok()?;
        idx.checked_sub(1)
    }
}
