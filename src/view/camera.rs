//! Perspective camera for the map view
//!
//! The map stays still and the camera orbits it: yaw is the only user
//! rotation, the pitch is a fixed tilt, and vertical pan walks the tower
//! layer by layer. Projection is a plain pinhole divide, no matrices.

use super::math::Vec3;
use super::snapshot::{CameraSnapshot, RotationSnapshot};
use crate::config::CameraConfig;

/// Camera rotation in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// Pitch (static tilt)
    pub x: f32,
    /// Yaw (user-animatable)
    pub y: f32,
    /// Roll (static)
    pub z: f32,
}

/// Result of projecting a world point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub x: f32,
    pub y: f32,
    /// Perspective scale, zoom included
    pub scale: f32,
    /// Distance-like value used for draw ordering, larger = farther
    pub depth: f32,
    /// Rotated camera-space Z
    pub z: f32,
}

/// Camera state for the map view
#[derive(Clone, Debug)]
pub struct MapCamera {
    pub rotation: Rotation,
    pub pan_y: f32,
    pub zoom: f32,
    pub focal_length: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,

    // Easing targets
    pub target_rotation_y: f32,
    pub target_pan_y: f32,

    pub rotation_damping: f32,
    pub pan_damping: f32,
    rotation_snap: f32,
    pan_snap: f32,
    near_depth: f32,

    pub center_x: f32,
    pub center_y: f32,
}

impl MapCamera {
    /// Create a camera for a viewport of the given size
    pub fn new(viewport_width: f32, viewport_height: f32, config: &CameraConfig) -> Self {
        Self {
            rotation: Rotation {
                x: config.tilt_x,
                y: 0.0,
                z: 0.0,
            },
            pan_y: 0.0,
            zoom: 1.0,
            focal_length: config.focal_length,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            target_rotation_y: 0.0,
            target_pan_y: 0.0,
            rotation_damping: config.rotation_damping,
            pan_damping: config.pan_damping,
            rotation_snap: config.rotation_snap,
            pan_snap: config.pan_snap,
            near_depth: config.near_depth,
            center_x: viewport_width / 2.0,
            center_y: viewport_height / 2.0,
        }
    }

    /// Track a new viewport size
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.center_x = viewport_width / 2.0;
        self.center_y = viewport_height / 2.0;
    }

    /// Ease yaw and pan toward their targets. Call once per frame.
    pub fn update(&mut self) {
        let diff_rot = self.target_rotation_y - self.rotation.y;
        if diff_rot.abs() > self.rotation_snap {
            self.rotation.y += diff_rot * self.rotation_damping;
        } else {
            self.rotation.y = self.target_rotation_y;
        }

        let diff_pan = self.target_pan_y - self.pan_y;
        if diff_pan.abs() > self.pan_snap {
            self.pan_y += diff_pan * self.pan_damping;
        } else {
            self.pan_y = self.target_pan_y;
        }
    }

    /// Project a world point to the screen.
    /// Returns None when the point is at or inside the near depth.
    pub fn project(&self, x: f32, y: f32, z: f32) -> Option<Projection> {
        // The camera moves, the map doesn't: panning down lifts the world up
        let p = Vec3::new(x, y - self.pan_y, z);

        let (sin_y, cos_y) = self.rotation.y.sin_cos();
        let mut r = p.rotate_y(cos_y, sin_y);

        if self.rotation.x != 0.0 {
            let (sin_x, cos_x) = self.rotation.x.sin_cos();
            r = r.rotate_x(cos_x, sin_x);
        }

        // Camera sits at z = -focal_length looking down +Z
        let depth = self.focal_length + r.z;
        if depth <= self.near_depth {
            return None;
        }

        // Zoom scales the image only; depth ordering ignores it
        let scale = (self.focal_length / depth) * self.zoom;

        Some(Projection {
            x: r.x * scale + self.center_x,
            y: r.y * scale + self.center_y,
            scale,
            depth,
            z: r.z,
        })
    }

    /// Project a world point given as a vector
    pub fn project_point(&self, p: Vec3) -> Option<Projection> {
        self.project(p.x, p.y, p.z)
    }

    /// Spin the view horizontally (eased)
    pub fn rotate(&mut self, delta_angle: f32) {
        self.target_rotation_y += delta_angle;
    }

    /// Move the view vertically (eased)
    pub fn pan(&mut self, delta_y: f32) {
        self.target_pan_y += delta_y;
    }

    /// Jump straight to a pan position without easing
    pub fn snap_pan(&mut self, y: f32) {
        self.pan_y = y;
        self.target_pan_y = y;
    }

    /// Change zoom, clamped to [min_zoom, max_zoom]
    pub fn zoom_change(&mut self, delta_zoom: f32) {
        self.zoom = (self.zoom + delta_zoom).clamp(self.min_zoom, self.max_zoom);
    }

    /// Back to the default view. The tilt is left alone.
    pub fn reset(&mut self) {
        self.target_rotation_y = 0.0;
        self.rotation.y = 0.0;
        self.zoom = 1.0;
        self.target_pan_y = 0.0;
        self.pan_y = 0.0;
    }

    /// Capture everything needed to resume this view, easing targets included
    pub fn serialize(&self) -> CameraSnapshot {
        CameraSnapshot {
            zoom: Some(self.zoom),
            pan_y: Some(self.pan_y),
            target_pan_y: Some(self.target_pan_y),
            rotation: Some(RotationSnapshot {
                x: Some(self.rotation.x),
                y: Some(self.rotation.y),
                z: Some(self.rotation.z),
            }),
            target_rotation_y: Some(self.target_rotation_y),
        }
    }

    /// Restore a snapshot. Missing targets are pinned to the restored
    /// current values so nothing moves after the restore. Zoom is clamped
    /// to this camera's range.
    pub fn deserialize(&mut self, data: &CameraSnapshot) {
        if let Some(zoom) = data.zoom {
            // Saved under another config or edited by hand
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
        if let Some(pan_y) = data.pan_y {
            self.pan_y = pan_y;
        }

        if let Some(rotation) = &data.rotation {
            self.rotation.x = rotation.x.unwrap_or(self.rotation.x);
            self.rotation.y = rotation.y.unwrap_or(self.rotation.y);
            self.rotation.z = rotation.z.unwrap_or(self.rotation.z);
        }

        self.target_pan_y = data.target_pan_y.unwrap_or(self.pan_y);
        self.target_rotation_y = data.target_rotation_y.unwrap_or(self.rotation.y);

        tracing::debug!(pan_y = self.pan_y, zoom = self.zoom, "camera view restored");
    }
}

impl Default for MapCamera {
    fn default() -> Self {
        Self::new(1280.0, 720.0, &CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat_camera() -> MapCamera {
        let config = CameraConfig {
            tilt_x: 0.0,
            ..CameraConfig::default()
        };
        MapCamera::new(800.0, 600.0, &config)
    }

    #[test]
    fn test_project_origin_hits_screen_center() {
        let cam = flat_camera();
        let p = cam.project(0.0, 0.0, 0.0).unwrap();
        assert_eq!((p.x, p.y), (400.0, 300.0));
        assert_eq!(p.depth, 800.0);
        assert_eq!(p.scale, 1.0);
    }

    #[test]
    fn test_culling_boundary() {
        let cam = flat_camera();
        // depth = 800 + z
        assert!(cam.project(0.0, 0.0, -790.0).is_none());
        assert!(cam.project(0.0, 0.0, -900.0).is_none());
        assert!(cam.project(0.0, 0.0, -789.999).is_some());
    }

    #[test]
    fn test_zoom_does_not_change_depth() {
        let mut cam = flat_camera();
        let before = cam.project(100.0, 50.0, 200.0).unwrap();
        cam.zoom_change(1.0);
        let after = cam.project(100.0, 50.0, 200.0).unwrap();
        assert_eq!(before.depth, after.depth);
        assert!((after.scale - before.scale * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_pan_lifts_world() {
        let mut cam = flat_camera();
        cam.snap_pan(250.0);
        let p = cam.project(0.0, 250.0, 0.0).unwrap();
        assert_eq!(p.y, 300.0);
    }

    #[test]
    fn test_update_eases_then_snaps() {
        let mut cam = flat_camera();
        cam.pan(100.0);
        cam.update();
        assert!((cam.pan_y - 15.0).abs() < 1e-4);
        for _ in 0..200 {
            cam.update();
        }
        assert_eq!(cam.pan_y, 100.0);

        cam.rotate(1.0);
        cam.update();
        assert!((cam.rotation.y - 0.1).abs() < 1e-6);
        for _ in 0..500 {
            cam.update();
        }
        assert_eq!(cam.rotation.y, 1.0);
    }

    #[test]
    fn test_reset_keeps_tilt() {
        let mut cam = MapCamera::default();
        cam.rotate(2.0);
        cam.pan(300.0);
        cam.zoom_change(0.7);
        cam.update();
        cam.reset();
        assert_eq!(cam.zoom, 1.0);
        assert_eq!(cam.pan_y, 0.0);
        assert_eq!(cam.target_pan_y, 0.0);
        assert_eq!(cam.target_rotation_y, 0.0);
        assert_eq!(cam.rotation.x, 0.2);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut cam = MapCamera::default();
        cam.zoom = 1.8;
        cam.pan_y = 250.0;
        cam.target_pan_y = 250.0;
        cam.rotation = Rotation { x: 0.2, y: 1.1, z: 0.0 };
        cam.target_rotation_y = 1.1;

        let snapshot = cam.serialize();
        let mut restored = MapCamera::default();
        restored.deserialize(&snapshot);

        assert_eq!(restored.zoom, 1.8);
        assert_eq!(restored.pan_y, 250.0);
        assert_eq!(restored.target_pan_y, 250.0);
        assert_eq!(restored.rotation, Rotation { x: 0.2, y: 1.1, z: 0.0 });
        assert_eq!(restored.target_rotation_y, 1.1);
    }

    #[test]
    fn test_snapshot_keeps_pending_targets() {
        let mut cam = MapCamera::default();
        cam.pan(400.0);
        cam.rotate(0.5);
        cam.update();

        let mut restored = MapCamera::default();
        restored.deserialize(&cam.serialize());
        assert_eq!(restored.target_pan_y, 400.0);
        assert_eq!(restored.target_rotation_y, 0.5);
        assert_eq!(restored.pan_y, cam.pan_y);
    }

    #[test]
    fn test_legacy_snapshot_has_no_motion() {
        let legacy = CameraSnapshot {
            zoom: Some(1.2),
            pan_y: Some(500.0),
            target_pan_y: None,
            rotation: Some(RotationSnapshot { x: None, y: Some(0.8), z: None }),
            target_rotation_y: None,
        };
        let mut cam = MapCamera::default();
        cam.deserialize(&legacy);
        assert_eq!(cam.target_pan_y, cam.pan_y);
        assert_eq!(cam.target_rotation_y, cam.rotation.y);
        assert_eq!(cam.rotation.x, 0.2);

        let (pan, rot) = (cam.pan_y, cam.rotation.y);
        cam.update();
        assert_eq!((cam.pan_y, cam.rotation.y), (pan, rot));
    }

    #[test]
    fn test_restore_clamps_zoom() {
        let mut cam = MapCamera::default();
        cam.deserialize(&CameraSnapshot {
            zoom: Some(9.0),
            ..CameraSnapshot::default()
        });
        assert_eq!(cam.zoom, cam.max_zoom);

        cam.deserialize(&CameraSnapshot {
            zoom: Some(0.01),
            ..CameraSnapshot::default()
        });
        assert_eq!(cam.zoom, cam.min_zoom);
    }

    proptest! {
        #[test]
        fn zoom_always_clamped(deltas in prop::collection::vec(-10.0f32..10.0, 0..50)) {
            let mut cam = MapCamera::default();
            for d in deltas {
                cam.zoom_change(d);
                prop_assert!(cam.zoom >= cam.min_zoom && cam.zoom <= cam.max_zoom);
            }
        }

        #[test]
        fn culled_iff_depth_at_most_near(z in -2000.0f32..2000.0) {
            let cam = flat_camera();
            let culled = cam.project(0.0, 0.0, z).is_none();
            prop_assert_eq!(culled, 800.0 + z <= 10.0);
        }
    }
}
