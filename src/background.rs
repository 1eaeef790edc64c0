//! Parallax starfield
//!
//! A radial "deep space" backdrop plus three star layers that drift with the
//! camera: yaw slides them sideways, pan slides them vertically at half
//! speed. Nearer layers move more. Stars wrap around the viewport.

use std::f32::consts::TAU;
use rand::Rng;
use crate::config::{BackgroundConfig, StarLayerConfig};
use crate::view::{Color, DrawList, DrawSurface, Vec2};

/// Backdrop gradient, center to edge: (offset, color)
const BACKDROP_STOPS: [(f32, u32); 3] = [(0.0, 0x1A0B2E), (0.4, 0x0F0518), (1.0, 0x000000)];

/// Concentric discs used to approximate the radial gradient
const BACKDROP_RINGS: usize = 32;

#[derive(Debug, Clone, Copy)]
struct Star {
    x: f32,
    y: f32,
    phase: f32,
}

struct StarLayer {
    config: StarLayerConfig,
    stars: Vec<Star>,
}

pub struct MapBackground {
    width: f32,
    height: f32,
    pan_factor: f32,
    layers: Vec<StarLayer>,
    backdrop: DrawList,
    stars: DrawList,
}

impl MapBackground {
    pub fn new<R: Rng + ?Sized>(width: f32, height: f32, config: &BackgroundConfig, rng: &mut R) -> Self {
        let layers = config
            .layers
            .iter()
            .map(|layer| StarLayer {
                config: layer.clone(),
                stars: (0..layer.count)
                    .map(|_| Star {
                        x: rng.gen_range(0.0..1.0) * width,
                        y: rng.gen_range(0.0..1.0) * height,
                        phase: rng.gen_range(0.0..TAU),
                    })
                    .collect(),
            })
            .collect();

        let mut background = Self {
            width,
            height,
            pan_factor: config.pan_factor,
            layers,
            backdrop: DrawList::new(),
            stars: DrawList::new(),
        };
        background.build_backdrop();
        background
    }

    /// New viewport size; stars keep their positions and wrap into it
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.build_backdrop();
    }

    fn build_backdrop(&mut self) {
        self.backdrop.clear();
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        let outer = self.width * 0.8;

        self.backdrop.fill_rect(0.0, 0.0, self.width, self.height, Color::hex(0x000000));
        // Largest first so smaller discs paint over
        for i in (0..BACKDROP_RINGS).rev() {
            let t = i as f32 / BACKDROP_RINGS as f32;
            self.backdrop.fill_circle(center, outer * (t + 1.0 / BACKDROP_RINGS as f32), gradient_at(t));
        }
    }

    /// Rebuild the star list for this frame
    pub fn update(&mut self, rotation_y: f32, pan_y: f32, now_ms: f64) {
        self.stars.clear();
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }

        let offset_y = -pan_y * self.pan_factor;
        for layer in &self.layers {
            let offset_x = -rotation_y * layer.config.factor;
            for star in &layer.stars {
                let x = wrap(star.x + offset_x, self.width);
                let y = wrap(star.y + offset_y, self.height);

                let twinkle = ((now_ms * 0.005) as f32 + star.phase).sin();
                let alpha = (layer.config.alpha + twinkle * 0.3).clamp(0.1, 1.0);

                self.stars.fill_rect(x, y, layer.config.size, layer.config.size, Color::WHITE.with_alpha(alpha));
            }
        }
    }

    pub fn star_list(&self) -> &DrawList {
        &self.stars
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        self.backdrop.replay(surface);
        self.stars.replay(surface);
    }
}

/// Wrap into [0, size); rem_euclid can round up to `size` itself
fn wrap(v: f32, size: f32) -> f32 {
    let w = v.rem_euclid(size);
    if w >= size { 0.0 } else { w }
}

fn gradient_at(t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let upper = BACKDROP_STOPS.iter().position(|&(o, _)| o >= t).unwrap_or(BACKDROP_STOPS.len() - 1);
    if upper == 0 {
        return Color::hex(BACKDROP_STOPS[0].1);
    }
    let (o0, c0) = BACKDROP_STOPS[upper - 1];
    let (o1, c1) = BACKDROP_STOPS[upper];
    let k = (t - o0) / (o1 - o0);

    let (a, b) = (Color::hex(c0), Color::hex(c1));
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * k).round() as u32;
    Color::hex((mix(a.r(), b.r()) << 16) | (mix(a.g(), b.g()) << 8) | mix(a.b(), b.b()))
}
