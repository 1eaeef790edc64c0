//! WIREMAP viewer
//!
//! Opens a map file and lets you walk it:
//! - Left drag: pan between layers
//! - Middle drag: orbit
//! - Wheel: zoom
//! - Click a revealed successor: move there
//! - P: toggle interaction lock, B: sprout a branch portal, S: save the view

use std::cell::Cell;
use std::path::{Path, PathBuf};
use anyhow::Context;
use clap::Parser;
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;
use wiremap::input::PointerPoller;
use wiremap::map::{MapData, MapNode, NodeRole, NodeState, NodeType};
use wiremap::view::ScreenSurface;
use wiremap::{
    hud_label, CameraSnapshot, DirMeshSource, ExplorationScene, MapEvents, MapGraph, MapViewConfig,
    MemoryMeshSource, MeshSource, VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "wiremap", version, about = "Wireframe dungeon map viewer")]
struct Cli {
    /// Map file (RON)
    #[arg(long, default_value = "assets/maps/sample.ron")]
    map: PathBuf,

    /// Directory of `<mesh key>.obj` files
    #[arg(long, default_value = "assets/meshes")]
    meshes: PathBuf,

    /// View configuration (RON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Camera snapshot (JSON) to restore on start
    #[arg(long)]
    camera: Option<PathBuf>,

    /// Where S and exit write the camera snapshot
    #[arg(long)]
    save_camera: Option<PathBuf>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("WIREMAP v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Host side of the view callbacks: remembers clicks, draws the tooltip
#[derive(Default)]
struct ViewerUi {
    clicked: Option<String>,
    tooltip: Option<(String, f32, f32)>,
}

impl MapEvents for ViewerUi {
    fn node_clicked(&mut self, node: &MapNode) {
        self.clicked = Some(node.id.clone());
    }

    fn show_tooltip(&mut self, text: &str, x: f32, y: f32) {
        self.tooltip = Some((text.to_string(), x, y));
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }
}

impl ViewerUi {
    fn draw_tooltip(&self) {
        let Some((text, x, y)) = &self.tooltip else {
            return;
        };
        let lines: Vec<&str> = text.lines().collect();
        let width = lines
            .iter()
            .map(|l| measure_text(l, None, 16, 1.0).width)
            .fold(0.0, f32::max)
            + 16.0;
        let height = lines.len() as f32 * 18.0 + 10.0;
        let (bx, by) = (x + 14.0, y + 14.0);

        draw_rectangle(bx, by, width, height, Color::from_rgba(10, 10, 24, 220));
        draw_rectangle_lines(bx, by, width, height, 1.0, Color::from_rgba(79, 195, 247, 160));
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, bx + 8.0, by + 20.0 + i as f32 * 18.0, 16.0, Color::from_rgba(170, 221, 255, 255));
        }
    }
}

/// Move the player if `target` is a revealed successor of the current node.
/// Returns true when the current node changed.
fn move_to_node(map: &mut MapData, target: &str) -> bool {
    let Some(current_id) = map.current_node_id.clone() else {
        return false;
    };
    let reachable = map.find_mut(&current_id).is_some_and(|n| n.leads_to(target));
    let revealed = map.find_mut(target).is_some_and(|n| !n.is_locked());
    if !reachable || !revealed {
        return false;
    }

    if let Some(old) = map.find_mut(&current_id) {
        old.state = NodeState::Visited;
    }
    let mut newly_seen = Vec::new();
    if let Some(node) = map.find_mut(target) {
        node.state = NodeState::Current;
        newly_seen = node.next_nodes.clone();
    }
    for id in &newly_seen {
        if let Some(next) = map.find_mut(id) {
            if next.is_locked() {
                next.state = NodeState::Revealed;
            }
        }
    }
    map.current_node_id = Some(target.to_string());
    true
}

fn save_view(scene: &ExplorationScene, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    match scene.renderer.camera.serialize().save(path) {
        Ok(()) => tracing::info!(path = %path.display(), "camera view saved"),
        Err(e) => tracing::error!(path = %path.display(), "failed to save camera view: {e}"),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => MapViewConfig::load(path)
            .with_context(|| format!("loading view config {}", path.display()))?,
        None => MapViewConfig::default(),
    };

    let mut map = MapData::load(&cli.map).with_context(|| format!("loading map {}", cli.map.display()))?;

    let meshes: Box<dyn MeshSource> = match DirMeshSource::open(&cli.meshes) {
        Ok(dir) => Box::new(dir),
        Err(e) => {
            tracing::warn!("{e}; every node will use the fallback cube");
            Box::new(MemoryMeshSource::new())
        }
    };

    let restore = match &cli.camera {
        Some(path) => Some(
            CameraSnapshot::load(path).with_context(|| format!("loading camera snapshot {}", path.display()))?,
        ),
        None => None,
    };

    let (mut width, mut height) = (screen_width(), screen_height());
    let mut scene = ExplorationScene::new(width, height, &config, meshes.as_ref());
    scene.refresh_map(&map, restore.as_ref());

    let mut poller = PointerPoller::new();
    let mut ui = ViewerUi::default();
    let paused = Cell::new(false);
    let lock = || paused.get();
    let mut branch_count = 0usize;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::P) {
            paused.set(!paused.get());
        }
        if is_key_pressed(KeyCode::S) {
            save_view(&scene, cli.save_camera.as_deref());
        }

        if (screen_width(), screen_height()) != (width, height) {
            (width, height) = (screen_width(), screen_height());
            scene.resize(width, height);
        }

        for event in poller.poll() {
            scene.handle_pointer(event, &map, &lock, &mut ui);
        }

        if let Some(target) = ui.clicked.take() {
            if move_to_node(&mut map, &target) {
                tracing::info!(node_id = %target, "moved");
            }
        }

        if is_key_pressed(KeyCode::B) && !paused.get() {
            if let Some(anchor) = map.current_node_id.clone().and_then(|id| map.find(&id).cloned()) {
                let node = MapNode::new(format!("branch_{}", branch_count), NodeType::PortalNextChapter, anchor.layer_index)
                    .with_state(NodeState::Revealed)
                    .with_role(NodeRole::Branch)
                    .with_name("Side passage");
                branch_count += 1;
                if let Some(current) = map.find_mut(&anchor.id) {
                    current.next_nodes.push(node.id.clone());
                }
                map.nodes.push(node.clone());
                scene.renderer.add_node_to_scene(&map, &node, Some(&anchor));
            }
        }

        scene.update(&map, get_frame_time() * 1000.0);

        clear_background(BLACK);
        scene.draw(&mut ScreenSurface);

        draw_text(&map.name, 16.0, 28.0, 26.0, WHITE);
        draw_text(&hud_label(&map), 16.0, 52.0, 18.0, Color::from_rgba(170, 221, 255, 255));
        if paused.get() {
            draw_text("LOCKED", 16.0, 74.0, 18.0, ORANGE);
        }
        ui.draw_tooltip();

        next_frame().await;
    }

    save_view(&scene, cli.save_camera.as_deref());
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
