//! Projection and drawing primitives for the map view
//!
//! # Module Organization
//!
//! - `math` - Vec3, Vec2 and axis rotations
//! - `camera` - perspective camera with eased yaw/pan
//! - `snapshot` - camera snapshot persistence
//! - `types` - Color, LineStyle
//! - `draw` - retained per-layer draw lists and the surface trait
//! - `screen` - macroquad surface

pub mod camera;
pub mod draw;
pub mod math;
pub mod screen;
pub mod snapshot;
pub mod types;

pub use camera::{MapCamera, Projection, Rotation};
pub use draw::{DrawCommand, DrawList, DrawSurface};
pub use math::{Vec2, Vec3};
pub use screen::ScreenSurface;
pub use snapshot::{CameraSnapshot, RotationSnapshot, SnapshotError};
pub use types::{Color, LineStyle};
