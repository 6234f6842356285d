//! CRT post-processing applied to the composed frame.
//!
//! Each stage is a plain function over a [`Frame`]; [`PostPipeline`] owns
//! the per-viewport assets (vignette mask, barrel remap table, scratch
//! buffers) and runs the stages selected by the active [`CrtPreset`].

use norad_core::constants::*;
use norad_core::enums::CrtPreset;
use norad_core::types::{Color, Viewport};
use rand::Rng;

use crate::frame::{blend_channel, BlendMode, Frame};

/// One full-frame effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostStage {
    /// Darken every third row; repeated `passes` times.
    Scanlines { passes: u32 },
    /// Radial darkening from the precomputed mask.
    Vignette,
    /// Random grayscale grain at the given opacity.
    Noise { alpha: u8 },
    /// Red shifted right and blue shifted left by `offset` pixels.
    ChromaticAberration { offset: u32 },
    /// Lens curvature from the precomputed remap table.
    Barrel { strength: f64 },
    /// Blurred copy added back on top.
    Bloom { intensity: f64 },
    /// Time-varying global darkening.
    Flicker { intensity: f64 },
}

/// Ordered stages for a preset. Barrel distortion runs first in the full
/// preset when a curvature strength is configured.
pub fn stages_for(preset: CrtPreset, curvature: Option<f64>) -> Vec<PostStage> {
    match preset {
        CrtPreset::Off => Vec::new(),
        CrtPreset::Light => vec![
            PostStage::Noise { alpha: NOISE_ALPHA },
            PostStage::Scanlines { passes: 1 },
            PostStage::Vignette,
        ],
        CrtPreset::Full => {
            let mut stages = Vec::with_capacity(8);
            if let Some(strength) = curvature {
                stages.push(PostStage::Barrel { strength });
            }
            stages.extend([
                PostStage::Bloom {
                    intensity: BLOOM_INTENSITY,
                },
                PostStage::ChromaticAberration {
                    offset: ABERRATION_OFFSET,
                },
                PostStage::Flicker {
                    intensity: FLICKER_INTENSITY,
                },
                PostStage::Noise {
                    alpha: NOISE_ALPHA * 2,
                },
                PostStage::Scanlines { passes: 2 },
                PostStage::Vignette,
            ]);
            stages
        }
    }
}

// --- Stage functions ---

/// Blend black at `SCANLINE_ALPHA` over rows `0, 3, 6, ...`.
pub fn scanlines(frame: &mut Frame, passes: u32) {
    let w = frame.width() as usize;
    for _ in 0..passes {
        for row in frame
            .pixels_mut()
            .chunks_exact_mut(w)
            .step_by(SCANLINE_SPACING as usize)
        {
            for px in row {
                *px = darken(*px, SCANLINE_ALPHA);
            }
        }
    }
}

/// Blend a fresh random gray value into every pixel.
pub fn noise(frame: &mut Frame, alpha: u8, rng: &mut impl Rng) {
    for px in frame.pixels_mut() {
        let g: u8 = rng.gen();
        let c = Color::from_u32(*px);
        *px = Color::new(
            blend_channel(g, c.r, alpha),
            blend_channel(g, c.g, alpha),
            blend_channel(g, c.b, alpha),
        )
        .to_u32();
    }
}

/// Shift the red channel right and the blue channel left by `offset`.
/// Vacated columns receive zero in the shifted channel.
pub fn chromatic_aberration(frame: &mut Frame, scratch: &mut Frame, offset: u32) {
    if offset == 0 {
        return;
    }
    scratch.copy_from(frame);
    let w = frame.width() as usize;
    let off = offset as usize;
    for (dst, src) in frame
        .pixels_mut()
        .chunks_exact_mut(w)
        .zip(scratch.pixels().chunks_exact(w))
    {
        for x in 0..w {
            let r = if x >= off { src[x - off] & 0x00FF_0000 } else { 0 };
            let b = if x + off < w { src[x + off] & 0x0000_00FF } else { 0 };
            dst[x] = r | (src[x] & 0x0000_FF00) | b;
        }
    }
}

/// Add a 4x box-downscaled, bilinearly upscaled copy at `trunc(60 * intensity)`.
pub fn bloom(frame: &mut Frame, intensity: f64) {
    let alpha = (60.0 * intensity).clamp(0.0, 255.0) as u8;
    if alpha == 0 {
        return;
    }
    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let scale = BLOOM_DOWNSCALE as usize;
    let sw = (w / scale).max(1);
    let sh = (h / scale).max(1);

    // Box downscale.
    let src = frame.pixels();
    let mut small = vec![[0f32; 3]; sw * sh];
    for sy in 0..sh {
        for sx in 0..sw {
            let (x0, x1) = (sx * w / sw, ((sx + 1) * w / sw).max(sx * w / sw + 1));
            let (y0, y1) = (sy * h / sh, ((sy + 1) * h / sh).max(sy * h / sh + 1));
            let mut acc = [0u32; 3];
            for y in y0..y1 {
                for &p in &src[y * w + x0..y * w + x1] {
                    let c = Color::from_u32(p);
                    acc[0] += c.r as u32;
                    acc[1] += c.g as u32;
                    acc[2] += c.b as u32;
                }
            }
            let n = ((x1 - x0) * (y1 - y0)) as f32;
            small[sy * sw + sx] = [acc[0] as f32 / n, acc[1] as f32 / n, acc[2] as f32 / n];
        }
    }

    // Bilinear upscale, added in place.
    let fx = sw as f32 / w as f32;
    let fy = sh as f32 / h as f32;
    let dst = frame.pixels_mut();
    for y in 0..h {
        let v = ((y as f32 + 0.5) * fy - 0.5).clamp(0.0, (sh - 1) as f32);
        let y0 = v.floor() as usize;
        let y1 = (y0 + 1).min(sh - 1);
        let ty = v - y0 as f32;
        for x in 0..w {
            let u = ((x as f32 + 0.5) * fx - 0.5).clamp(0.0, (sw - 1) as f32);
            let x0 = u.floor() as usize;
            let x1 = (x0 + 1).min(sw - 1);
            let tx = u - x0 as f32;

            let mut rgb = [0u8; 3];
            for (ch, out) in rgb.iter_mut().enumerate() {
                let top = small[y0 * sw + x0][ch] * (1.0 - tx) + small[y0 * sw + x1][ch] * tx;
                let bottom = small[y1 * sw + x0][ch] * (1.0 - tx) + small[y1 * sw + x1][ch] * tx;
                *out = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
            }
            let i = y * w + x;
            dst[i] = crate::frame::combine(
                dst[i],
                Color::new(rgb[0], rgb[1], rgb[2]),
                alpha,
                BlendMode::Additive,
            );
        }
    }
}

/// Brightness factor at time `t`.
pub fn flicker_level(t: f64, intensity: f64) -> f64 {
    1.0 + (t * 120.0).sin() * intensity + (t * 67.0).sin() * intensity * 0.5
}

/// Darkening alpha for time `t`, or `None` while brightness stays above
/// the threshold.
pub fn flicker_alpha(t: f64, intensity: f64) -> Option<u8> {
    let f = flicker_level(t, intensity);
    (f < FLICKER_THRESHOLD).then(|| ((1.0 - f) * 50.0).clamp(0.0, 255.0) as u8)
}

/// Darken the whole frame when the flicker dips.
pub fn flicker(frame: &mut Frame, t: f64, intensity: f64) {
    if let Some(alpha) = flicker_alpha(t, intensity) {
        frame.overlay(Color::default(), alpha, BlendMode::Alpha);
    }
}

#[inline]
fn darken(px: u32, alpha: u8) -> u32 {
    let c = Color::from_u32(px);
    Color::new(
        blend_channel(0, c.r, alpha),
        blend_channel(0, c.g, alpha),
        blend_channel(0, c.b, alpha),
    )
    .to_u32()
}

// --- Precomputed assets ---

/// Per-pixel vignette opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Vignette {
    alpha: Vec<u8>,
}

impl Vignette {
    pub fn new(viewport: Viewport) -> Self {
        let w = viewport.width as usize;
        let h = viewport.height as usize;
        let cx = w as f64 / 2.0;
        let cy = h as f64 / 2.0;
        let max_d = cx.hypot(cy);
        let mut alpha = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let d = (x as f64 - cx).hypot(y as f64 - cy) / max_d;
                let a = d.powf(VIGNETTE_EXPONENT) * VIGNETTE_STRENGTH;
                alpha.push(a.clamp(0.0, 255.0) as u8);
            }
        }
        Self { alpha }
    }

    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    pub fn apply(&self, frame: &mut Frame) {
        for (px, &a) in frame.pixels_mut().iter_mut().zip(&self.alpha) {
            if a > 0 {
                *px = darken(*px, a);
            }
        }
    }
}

/// Destination-to-source pixel remap for barrel distortion.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrelMap {
    source: Vec<u32>,
}

impl BarrelMap {
    pub fn new(viewport: Viewport, strength: f64) -> Self {
        let w = viewport.width as usize;
        let h = viewport.height as usize;
        let cx = w as f64 / 2.0;
        let cy = h as f64 / 2.0;
        let mut source = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let nx = (x as f64 - cx) / cx;
                let ny = (y as f64 - cy) / cy;
                let factor = 1.0 + strength * (nx * nx + ny * ny);
                // (n / factor) * c + c, kept exact when factor is 1.
                let sx = ((x as f64 - cx) / factor + cx) as i64;
                let sy = ((y as f64 - cy) / factor + cy) as i64;
                let sx = sx.clamp(0, w as i64 - 1);
                let sy = sy.clamp(0, h as i64 - 1);
                source.push((sy as usize * w + sx as usize) as u32);
            }
        }
        Self { source }
    }

    /// Source pixel index for each destination pixel.
    pub fn source(&self) -> &[u32] {
        &self.source
    }

    pub fn apply(&self, frame: &mut Frame, scratch: &mut Frame) {
        scratch.copy_from(frame);
        let src = scratch.pixels();
        for (px, &i) in frame.pixels_mut().iter_mut().zip(&self.source) {
            *px = src[i as usize];
        }
    }
}

// --- Pipeline ---

/// The active preset's stages plus their per-viewport assets.
#[derive(Debug, Clone)]
pub struct PostPipeline {
    preset: CrtPreset,
    curvature: Option<f64>,
    stages: Vec<PostStage>,
    vignette: Vignette,
    barrel: Option<BarrelMap>,
    scratch: Frame,
}

impl PostPipeline {
    pub fn new(preset: CrtPreset, viewport: Viewport, curvature: Option<f64>) -> Self {
        Self {
            preset,
            curvature,
            stages: stages_for(preset, curvature),
            vignette: Vignette::new(viewport),
            barrel: curvature.map(|s| BarrelMap::new(viewport, s)),
            scratch: Frame::new(viewport),
        }
    }

    pub fn preset(&self) -> CrtPreset {
        self.preset
    }

    pub fn stages(&self) -> &[PostStage] {
        &self.stages
    }

    pub fn set_preset(&mut self, preset: CrtPreset) {
        self.preset = preset;
        self.stages = stages_for(preset, self.curvature);
    }

    /// Rebuild every per-viewport asset.
    pub fn resize(&mut self, viewport: Viewport) {
        *self = Self::new(self.preset, viewport, self.curvature);
    }

    /// Run the active stages in order. `now` drives flicker; `rng` feeds noise.
    pub fn apply(&mut self, frame: &mut Frame, now: f64, rng: &mut impl Rng) {
        if frame.viewport() != self.scratch.viewport() {
            log::debug!("post assets out of date, rebuilding for {:?}", frame.viewport());
            self.resize(frame.viewport());
        }
        for stage in &self.stages {
            match *stage {
                PostStage::Scanlines { passes } => scanlines(frame, passes),
                PostStage::Vignette => self.vignette.apply(frame),
                PostStage::Noise { alpha } => noise(frame, alpha, rng),
                PostStage::ChromaticAberration { offset } => {
                    chromatic_aberration(frame, &mut self.scratch, offset)
                }
                PostStage::Barrel { .. } => {
                    if let Some(map) = &self.barrel {
                        map.apply(frame, &mut self.scratch);
                    }
                }
                PostStage::Bloom { intensity } => bloom(frame, intensity),
                PostStage::Flicker { intensity } => flicker(frame, now, intensity),
            }
        }
    }
}
