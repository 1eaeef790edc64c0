//! View configuration
//!
//! Every tunable of the map view lives here. Files are RON; any section or
//! field left out falls back to the built-in defaults, so an empty `()` is a
//! valid config.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Camera tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Smaller = stronger perspective, larger = closer to orthographic
    pub focal_length: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Fixed downward tilt (radians)
    pub tilt_x: f32,
    pub rotation_damping: f32,
    pub pan_damping: f32,
    /// Below this the rotation snaps to its target (radians)
    pub rotation_snap: f32,
    /// Below this the pan snaps to its target (world units)
    pub pan_snap: f32,
    /// Points at or nearer than this depth are culled
    pub near_depth: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            focal_length: 800.0,
            min_zoom: 0.5,
            max_zoom: 2.5,
            tilt_x: 0.2,
            rotation_damping: 0.1,
            pan_damping: 0.15,
            rotation_snap: 0.001,
            pan_snap: 0.1,
            near_depth: 10.0,
        }
    }
}

/// Spiral tower layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub radius_main: f32,
    pub radius_extend: f32,
    pub layer_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius_main: 350.0,
            radius_extend: 550.0,
            layer_height: 250.0,
        }
    }
}

/// Per-frame drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Multiplier on top of the perspective scale so icons stay clickable
    pub visual_scale: f32,
    /// Hit-region radius before perspective scaling
    pub hit_radius: f32,
    /// Scale applied to every mesh loaded from the mesh source
    pub mesh_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            visual_scale: 1.5,
            hit_radius: 25.0,
            mesh_scale: 15.0,
        }
    }
}

/// Pointer sensitivities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub pan_sensitivity: f32,
    pub rotate_sensitivity: f32,
    pub zoom_step: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pan_sensitivity: 1.5,
            rotate_sensitivity: 0.01,
            zoom_step: 0.1,
        }
    }
}

/// One parallax star layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarLayerConfig {
    pub name: String,
    /// Parallax factor (bigger moves faster)
    pub factor: f32,
    pub count: usize,
    pub alpha: f32,
    pub size: f32,
}

/// Starfield behind the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub layers: Vec<StarLayerConfig>,
    /// Vertical parallax relative to the camera pan
    pub pan_factor: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        let layer = |name: &str, factor, count, alpha, size| StarLayerConfig {
            name: name.to_string(),
            factor,
            count,
            alpha,
            size,
        };
        Self {
            layers: vec![
                layer("far", 50.0, 200, 0.4, 1.0),
                layer("mid", 120.0, 100, 0.7, 2.0),
                layer("near", 250.0, 40, 1.0, 3.0),
            ],
            pan_factor: 0.5,
        }
    }
}

/// Complete view configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    pub camera: CameraConfig,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub input: InputConfig,
    pub background: BackgroundConfig,
}

impl MapViewConfig {
    /// Load config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse config from a RON string
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Pretty-printed RON (used to dump the defaults)
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        ron::ser::to_string_pretty(self, config)
    }
}
