//! Exploration scene
//!
//! Glue around the map view: owns the renderer, the starfield and the
//! pointer router, and drives them in frame order. The map graph, the
//! interaction lock and the UI callbacks stay with the host.

use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::background::MapBackground;
use crate::config::MapViewConfig;
use crate::input::{InputRouter, InteractionLock, MapEvents, PointerEvent};
use crate::map::MapGraph;
use crate::mesh::MeshSource;
use crate::renderer::MapRenderer;
use crate::view::{CameraSnapshot, DrawSurface};

pub struct ExplorationScene {
    pub renderer: MapRenderer,
    pub background: MapBackground,
    pub router: InputRouter,
    /// Milliseconds since the scene started, drives the star twinkle
    clock_ms: f64,
}

impl ExplorationScene {
    pub fn new(width: f32, height: f32, config: &MapViewConfig, meshes: &dyn MeshSource) -> Self {
        Self::with_rng(width, height, config, meshes, StdRng::from_entropy())
    }

    pub fn with_rng(
        width: f32,
        height: f32,
        config: &MapViewConfig,
        meshes: &dyn MeshSource,
        mut rng: StdRng,
    ) -> Self {
        let background = MapBackground::new(width, height, &config.background, &mut rng);
        let mut renderer = MapRenderer::with_rng(width, height, config, rng);
        renderer.geometries.init_from_source(meshes, config.render.mesh_scale);

        Self {
            renderer,
            background,
            router: InputRouter::new(config.input.clone()),
            clock_ms: 0.0,
        }
    }

    /// Rebuild the view for a new or changed map.
    ///
    /// With a snapshot the saved view is restored as-is. Without one the
    /// camera resets and jumps straight to the current node's layer.
    /// Returns whether a snapshot was applied.
    pub fn refresh_map(&mut self, graph: &dyn MapGraph, restore: Option<&CameraSnapshot>) -> bool {
        let restored = match restore {
            Some(snapshot) => {
                self.renderer.camera.deserialize(snapshot);
                true
            }
            None => {
                self.renderer.camera.reset();
                false
            }
        };

        self.renderer.init_3d_layout(graph);
        // Fill draw lists and hit regions before the first real frame
        self.renderer.update(graph, 16.0);

        if !restored {
            let target = graph
                .current_node_id()
                .and_then(|id| self.renderer.layout_of(id))
                .map(|layout| layout.pos.y);
            if let Some(y) = target {
                self.renderer.camera.snap_pan(y);
            }
        }

        tracing::debug!(restored, nodes = graph.current_nodes().len(), "map view refreshed");
        restored
    }

    /// One frame: starfield first, then the map
    pub fn update(&mut self, graph: &dyn MapGraph, delta_ms: f32) {
        self.clock_ms += delta_ms as f64;
        let camera = &self.renderer.camera;
        self.background.update(camera.rotation.y, camera.pan_y, self.clock_ms);
        self.renderer.update(graph, delta_ms);
    }

    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        graph: &dyn MapGraph,
        lock: &dyn InteractionLock,
        events: &mut dyn MapEvents,
    ) {
        self.router.handle(event, &mut self.renderer, graph, lock, events);
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        self.background.draw(surface);
        self.renderer.draw(surface);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.renderer.camera.resize(width, height);
        self.background.resize(width, height);
    }
}

/// Location line for the HUD, e.g. `DEPTH: 3 | LOC: Ember Gate`
pub fn hud_label(graph: &dyn MapGraph) -> String {
    let layer = graph.current_layer().unwrap_or(0);
    let location = graph
        .current_node_id()
        .and_then(|id| graph.find(id))
        .map(|node| node.name.clone().unwrap_or_else(|| node.node_type.label().to_string()))
        .unwrap_or_else(|| "Void".to_string());
    format!("DEPTH: {} | LOC: {}", layer, location)
}
