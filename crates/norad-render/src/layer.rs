//! Transparent scratch layer for glow strokes, and the drawing canvas.
//!
//! Glow is stroked into the layer (overwriting, never reading back the
//! frame) and then merged into the frame in one pass. Only the dirty
//! rectangle is visited and cleared.

use norad_core::types::{Color, Viewport};

use crate::frame::{combine, BlendMode, Frame};
use crate::raster::Surface;

const COVERED: u32 = 0xFF00_0000;

/// ARGB scratch buffer; alpha is either 0 (empty) or 255 (covered).
#[derive(Debug, Clone)]
pub struct GlowLayer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    dirty: Option<(i32, i32, i32, i32)>,
}

impl GlowLayer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            pixels: vec![0; viewport.area()],
            dirty: None,
        }
    }

    /// True when nothing has been stroked since the last merge.
    pub fn is_clear(&self) -> bool {
        self.dirty.is_none()
    }

    /// Merge every covered pixel into `frame`, then clear the layer.
    pub fn composite(&mut self, frame: &mut Frame, mode: BlendMode, alpha: u8) {
        let Some((x0, y0, x1, y1)) = self.dirty.take() else {
            return;
        };
        let w = self.width as usize;
        let dst = frame.pixels_mut();
        for y in y0..=y1 {
            let row = y as usize * w;
            for x in x0..=x1 {
                let i = row + x as usize;
                let src = self.pixels[i];
                if src & COVERED == 0 {
                    continue;
                }
                if alpha > 0 {
                    dst[i] = combine(dst[i], Color::from_u32(src), alpha, mode);
                }
                self.pixels[i] = 0;
            }
        }
    }

    fn mark(&mut self, x: i32, y: i32) {
        self.dirty = Some(match self.dirty {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
}

impl Surface for GlowLayer {
    fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn plot(&mut self, x: i32, y: i32, color: Color) {
        let i = y as usize * self.width as usize + x as usize;
        self.pixels[i] = COVERED | color.to_u32();
        self.mark(x, y);
    }
}

/// The frame plus its glow scratch layer. Entities draw through this.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub frame: Frame,
    pub glow: GlowLayer,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            frame: Frame::new(viewport),
            glow: GlowLayer::new(viewport),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.frame.viewport()
    }

    /// Reallocate both buffers for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        *self = Self::new(viewport);
    }

    /// Merge the glow layer into the frame.
    pub fn merge_glow(&mut self, mode: BlendMode, alpha: u8) {
        self.glow.composite(&mut self.frame, mode, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster;
    use glam::Vec2;

    #[test]
    fn test_composite_adds_and_clears() {
        let vp = Viewport::new(16, 16).unwrap();
        let mut canvas = Canvas::new(vp);
        canvas.frame.set(8, 8, Color::new(10, 10, 10));

        raster::disc(&mut canvas.glow, Vec2::new(8.0, 8.0), 2.0, Color::new(0, 100, 120));
        assert!(!canvas.glow.is_clear());

        canvas.merge_glow(BlendMode::Additive, 255);
        assert!(canvas.glow.is_clear());
        assert_eq!(canvas.frame.get(8, 8), Some(Color::new(10, 110, 130)));
        assert_eq!(canvas.frame.get(0, 0), Some(Color::default()));

        // A second merge has nothing left to add.
        canvas.merge_glow(BlendMode::Additive, 255);
        assert_eq!(canvas.frame.get(8, 8), Some(Color::new(10, 110, 130)));
    }

    #[test]
    fn test_overlapping_strokes_do_not_accumulate() {
        let vp = Viewport::new(16, 16).unwrap();
        let mut canvas = Canvas::new(vp);
        let pts = [Vec2::new(2.0, 8.0), Vec2::new(8.0, 8.0), Vec2::new(14.0, 8.0)];
        raster::polyline(&mut canvas.glow, &pts, 3.0, Color::new(0, 50, 0));
        canvas.merge_glow(BlendMode::Additive, 255);
        // The joint at (8, 8) is covered by both segments.
        assert_eq!(canvas.frame.get(8, 8), Some(Color::new(0, 50, 0)));
    }

    #[test]
    fn test_alpha_merge() {
        let vp = Viewport::new(4, 4).unwrap();
        let mut canvas = Canvas::new(vp);
        canvas.frame.clear(Color::new(100, 100, 100));
        raster::disc(&mut canvas.glow, Vec2::new(1.0, 1.0), 1.0, Color::new(0, 0, 0));
        canvas.merge_glow(BlendMode::Alpha, 255);
        assert_eq!(canvas.frame.get(1, 1), Some(Color::new(0, 0, 0)));
        assert_eq!(canvas.frame.get(3, 3), Some(Color::new(100, 100, 100)));
    }
}
