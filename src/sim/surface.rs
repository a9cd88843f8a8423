//! Coverage surface - the per-texel "dirt remaining" buffer
//!
//! An RGBA8 grid laid over the floor. The alpha channel is the dirt mask
//! (0 = cleaned, anything else = dirty); RGB carries the decorative noise
//! pattern the renderer displays. Access goes through three narrow
//! interfaces: circular erase, point sample, and strided estimate. A texel
//! is never re-dirtied once cleaned.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{FLOOR_SIZE, TEXTURE_SIZE};

/// One addressable cell of the coverage grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texel {
    pub x: usize,
    pub y: usize,
}

/// Base dirt tone (dark brown)
const DIRT_BASE: [u8; 3] = [0x3a, 0x35, 0x30];
/// Speckle tones scattered over the base
const SPECKLE_DARK: [u8; 3] = [0x29, 0x25, 0x20];
const SPECKLE_LIGHT: [u8; 3] = [0x4a, 0x40, 0x30];
/// Stain tint, blended at half strength
const STAIN: [u8; 3] = [20, 15, 10];

const SPECKLE_COUNT: usize = 5000;
const STAIN_COUNT: usize = 20;

/// Owned dirt buffer plus the renderer's re-upload flag
pub struct CoverageSurface {
    size: usize,
    rgba: Vec<u8>,
    needs_update: bool,
}

impl CoverageSurface {
    /// Build a fully-dirty surface with a seeded noise/stain pattern.
    ///
    /// The pattern only varies RGB; alpha starts at 255 on every texel.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let size = TEXTURE_SIZE;
        let mut rgba = vec![0u8; size * size * 4];

        for px in rgba.chunks_exact_mut(4) {
            px[..3].copy_from_slice(&DIRT_BASE);
            px[3] = 0xff;
        }

        // Speckle pass: small square flecks in two tones
        for _ in 0..SPECKLE_COUNT {
            let tone = if rng.random::<bool>() {
                SPECKLE_DARK
            } else {
                SPECKLE_LIGHT
            };
            let x = rng.random_range(0..size);
            let y = rng.random_range(0..size);
            let fleck = rng.random_range(1..=4);
            for yy in y..(y + fleck).min(size) {
                for xx in x..(x + fleck).min(size) {
                    let i = (yy * size + xx) * 4;
                    rgba[i..i + 3].copy_from_slice(&tone);
                }
            }
        }

        // Stain pass: soft dark circles, alpha untouched
        for _ in 0..STAIN_COUNT {
            let cx = rng.random_range(0..size) as i64;
            let cy = rng.random_range(0..size) as i64;
            let radius: f32 = rng.random_range(10.0..=40.0);
            let r_sq = radius * radius;
            let reach = radius.ceil() as i64;
            for y in (cy - reach).max(0)..=(cy + reach).min(size as i64 - 1) {
                for x in (cx - reach).max(0)..=(cx + reach).min(size as i64 - 1) {
                    let dx = (x - cx) as f32;
                    let dy = (y - cy) as f32;
                    if dx * dx + dy * dy <= r_sq {
                        let i = (y as usize * size + x as usize) * 4;
                        for (c, &tint) in STAIN.iter().enumerate() {
                            rgba[i + c] = ((rgba[i + c] as u16 + tint as u16) / 2) as u8;
                        }
                    }
                }
            }
        }

        log::debug!("coverage surface initialized ({size}x{size}, seed {seed})");

        Self {
            size,
            rgba,
            needs_update: true,
        }
    }

    /// Erase a filled circle of texels around `center`, setting opacity to 0.
    ///
    /// Idempotent: re-erasing clean ground changes nothing. Marks the surface
    /// for re-upload.
    pub fn erase(&mut self, center: Texel, radius: f32) {
        let radius = radius.max(0.0);
        let r_sq = radius * radius;
        let reach = radius.ceil() as i64;
        let (cx, cy) = (center.x as i64, center.y as i64);
        let size = self.size as i64;
        for y in (cy - reach).max(0)..=(cy + reach).min(size - 1) {
            for x in (cx - reach).max(0)..=(cx + reach).min(size - 1) {
                let dx = (x - cx) as f32;
                let dy = (y - cy) as f32;
                if dx * dx + dy * dy <= r_sq {
                    let i = (y as usize * self.size + x as usize) * 4;
                    self.rgba[i..i + 4].fill(0);
                }
            }
        }
        self.needs_update = true;
    }

    /// Opacity of one texel. 0 means cleaned.
    #[inline]
    pub fn sample_opacity(&self, t: Texel) -> u8 {
        self.rgba[(t.y * self.size + t.x) * 4 + 3]
    }

    /// Map a world position onto the grid. `None` outside the arena, so
    /// callers skip erase/sample instead of wrapping.
    pub fn world_to_texel(&self, pos: Vec2) -> Option<Texel> {
        let u = (pos.x + FLOOR_SIZE / 2.0) / FLOOR_SIZE;
        let v = (pos.y + FLOOR_SIZE / 2.0) / FLOOR_SIZE;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        let max = self.size - 1;
        Some(Texel {
            x: ((u * self.size as f32) as usize).min(max),
            y: ((v * self.size as f32) as usize).min(max),
        })
    }

    /// Estimate the cleaned fraction by sampling every `stride`-th texel.
    ///
    /// Deterministic for a given surface state. Accuracy improves as the
    /// stride shrinks; cost grows as size²/stride, which is why callers
    /// resample on a schedule instead of every frame.
    pub fn estimate_cleaned_fraction(&self, stride: usize) -> f32 {
        let stride = stride.max(1);
        let total = self.size * self.size;
        let mut samples = 0u32;
        let mut cleaned = 0u32;
        let mut i = 0;
        while i < total {
            samples += 1;
            if self.rgba[i * 4 + 3] == 0 {
                cleaned += 1;
            }
            i += stride;
        }
        cleaned as f32 / samples as f32
    }

    /// Raw RGBA bytes for the render boundary.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }

    /// Grid side length in texels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when the buffer changed since the renderer last uploaded it.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Cleared by the renderer after consuming `pixels()`.
    pub fn clear_needs_update(&mut self) {
        self.needs_update = false;
    }
}
