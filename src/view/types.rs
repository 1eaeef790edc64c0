//! Core drawing types

use serde::{Deserialize, Serialize};

/// RGB color plus alpha.
/// Stored as 0xRRGGBB so palettes can be written as hex literals in config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub rgb: u32,
    pub alpha: f32,
}

impl Color {
    pub const WHITE: Color = Color::hex(0xFFFFFF);
    pub const CYAN: Color = Color::hex(0x00FFFF);

    /// Opaque color from 0xRRGGBB
    pub const fn hex(rgb: u32) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { rgb: self.rgb, alpha }
    }

    pub fn r(&self) -> u8 {
        ((self.rgb >> 16) & 0xFF) as u8
    }

    pub fn g(&self) -> u8 {
        ((self.rgb >> 8) & 0xFF) as u8
    }

    pub fn b(&self) -> u8 {
        (self.rgb & 0xFF) as u8
    }
}

/// Stroke settings for lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
}

impl LineStyle {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let c = Color::hex(0xE67E22);
        assert_eq!((c.r(), c.g(), c.b()), (0xE6, 0x7E, 0x22));
        assert_eq!(c.with_alpha(0.4).alpha, 0.4);
    }
}
