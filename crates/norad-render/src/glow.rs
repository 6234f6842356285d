//! Layered phosphor glow: a bright opaque core plus soft additive halos.
//!
//! Shared by every entity and by the static map layer.

use glam::Vec2;
use norad_core::types::Color;

use crate::frame::BlendMode;
use crate::layer::Canvas;
use crate::raster;

/// One halo stroke around a trail: extra width and glow color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowStroke {
    pub extra_width: f32,
    pub color: Color,
}

/// One halo around a point or ring: absolute radius, color and merge alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowRing {
    pub radius: f32,
    pub color: Color,
    pub alpha: u8,
}

impl GlowRing {
    pub const fn new(radius: f32, color: Color, alpha: u8) -> Self {
        Self {
            radius,
            color,
            alpha,
        }
    }
}

/// Merge alpha of glow layer `i` (1 = innermost) out of `layer_count`.
pub fn layer_alpha(i: u32, layer_count: u32) -> u8 {
    if layer_count == 0 {
        return 0;
    }
    let frac = i as f64 / layer_count as f64;
    (40.0 * (1.0 - frac) + 15.0).round() as u8
}

/// Draw a polyline with `layer_count` halos, outer first, then the core.
///
/// Halo `i` is `base_width + 2i` wide and merged additively at
/// [`layer_alpha`].
pub fn draw_glow_line(
    canvas: &mut Canvas,
    segment: &[Vec2],
    core: Color,
    glow: Color,
    base_width: f32,
    layer_count: u32,
) {
    if segment.len() < 2 {
        return;
    }
    for i in (1..=layer_count).rev() {
        let width = base_width + 2.0 * i as f32;
        raster::polyline(&mut canvas.glow, segment, width, glow);
        canvas.merge_glow(BlendMode::Additive, layer_alpha(i, layer_count));
    }
    raster::polyline(&mut canvas.frame, segment, base_width, core);
}

/// Draw a projectile trail: explicit halo strokes at full strength, then the core.
pub fn draw_glow_trail(
    canvas: &mut Canvas,
    segment: &[Vec2],
    core: Color,
    base_width: f32,
    strokes: &[GlowStroke],
) {
    if segment.len() < 2 {
        return;
    }
    for stroke in strokes {
        raster::polyline(&mut canvas.glow, segment, base_width + stroke.extra_width, stroke.color);
        canvas.merge_glow(BlendMode::Additive, 255);
    }
    raster::polyline(&mut canvas.frame, segment, base_width, core);
}

/// Draw a blip: additive glow discs, largest first, then an opaque core disc.
pub fn draw_glow_point(canvas: &mut Canvas, center: Vec2, radius: f32, core: Color, rings: &[GlowRing]) {
    for ring in rings {
        raster::disc(&mut canvas.glow, center, ring.radius, ring.color);
        canvas.merge_glow(BlendMode::Additive, ring.alpha);
    }
    raster::disc(&mut canvas.frame, center, radius, core);
}

/// Draw a circle outline with additive halo outlines of width `halo_width`.
/// The core outline is skipped when `radius <= thickness`.
pub fn draw_glow_ring(
    canvas: &mut Canvas,
    center: Vec2,
    radius: f32,
    thickness: f32,
    core: Color,
    halo_width: f32,
    rings: &[GlowRing],
) {
    for ring in rings {
        raster::ring(&mut canvas.glow, center, ring.radius, halo_width, ring.color);
        canvas.merge_glow(BlendMode::Additive, ring.alpha);
    }
    if radius > thickness {
        raster::ring(&mut canvas.frame, center, radius, thickness, core);
    }
}
