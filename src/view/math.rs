//! Vector math for the map projection

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotate around the vertical (Y) axis given precomputed cos/sin.
    /// Matches the camera's yaw convention: x' = x*cos - z*sin, z' = z*cos + x*sin
    #[inline]
    pub fn rotate_y(self, cos: f32, sin: f32) -> Vec3 {
        Vec3 {
            x: self.x * cos - self.z * sin,
            y: self.y,
            z: self.z * cos + self.x * sin,
        }
    }

    /// Rotate around the X axis (pitch tilt)
    #[inline]
    pub fn rotate_x(self, cos: f32, sin: f32) -> Vec3 {
        Vec3 {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.z * cos + self.y * sin,
        }
    }

    /// Point on a horizontal circle of `radius` at `angle`, lifted to height `y`
    pub fn on_ring(angle: f32, radius: f32, y: f32) -> Vec3 {
        Vec3 {
            x: angle.cos() * radius,
            y,
            z: angle.sin() * radius,
        }
    }
}

/// 2D screen-space point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_y_quarter_turn() {
        let v = Vec3::new(1.0, 5.0, 0.0);
        let r = v.rotate_y(FRAC_PI_2.cos(), FRAC_PI_2.sin());
        assert!(r.x.abs() < 1e-6);
        assert_eq!(r.y, 5.0);
        assert!((r.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_on_ring_radius() {
        let p = Vec3::on_ring(1.234, 350.0, 250.0);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((r - 350.0).abs() < 1e-3);
        assert_eq!(p.y, 250.0);
    }
}
