//! The composed frame: a 0RGB `u32` pixel buffer in presentation format.

use norad_core::types::{Color, Viewport};

/// Compositing blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Source-over: dst = lerp(dst, src, alpha)
    Alpha,
    /// Additive: dst += src * alpha / 255, saturating
    Additive,
}

/// Alpha blend a single channel.
#[inline]
pub(crate) fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = alpha as u16;
    let result = src as u16 * a + dst as u16 * (255 - a);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Additively blend a single channel, rounding the scaled source.
#[inline]
pub(crate) fn add_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let add = ((src as u16 * alpha as u16 + 127) / 255) as u8;
    dst.saturating_add(add)
}

/// Combine two 0RGB pixels.
#[inline]
pub(crate) fn combine(dst: u32, src: Color, alpha: u8, mode: BlendMode) -> u32 {
    let d = Color::from_u32(dst);
    let f = match mode {
        BlendMode::Alpha => blend_channel,
        BlendMode::Additive => add_channel,
    };
    Color::new(f(src.r, d.r, alpha), f(src.g, d.g, alpha), f(src.b, d.b, alpha)).to_u32()
}

/// Row-major 0RGB frame buffer, the format `minifb` presents.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Frame {
    /// Create a black frame.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            pixels: vec![0; viewport.area()],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Fill with a solid color.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
    }

    /// Reallocate for a new viewport; contents become black.
    pub fn resize(&mut self, viewport: Viewport) {
        *self = Self::new(viewport);
    }

    /// Copy another frame of the same size. A mismatched source is
    /// skipped with a warning and leaves this frame untouched.
    pub fn copy_from(&mut self, src: &Frame) {
        if self.viewport() != src.viewport() {
            log::warn!(
                "frame copy skipped: source {}x{} into {}x{}",
                src.width(),
                src.height(),
                self.width(),
                self.height()
            );
            return;
        }
        self.pixels.copy_from_slice(&src.pixels);
    }

    /// Read a pixel (bounds checked).
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.in_bounds(x, y)
            .then(|| Color::from_u32(self.pixels[self.index(x, y)]))
    }

    /// Write a pixel (bounds checked).
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            let i = self.index(x, y);
            self.pixels[i] = color.to_u32();
        }
    }

    /// Blend a pixel with the given mode (bounds checked).
    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, color: Color, alpha: u8, mode: BlendMode) {
        if self.in_bounds(x, y) {
            let i = self.index(x, y);
            self.pixels[i] = combine(self.pixels[i], color, alpha, mode);
        }
    }

    /// Blend a solid color over every pixel.
    pub fn overlay(&mut self, color: Color, alpha: u8, mode: BlendMode) {
        for px in &mut self.pixels {
            *px = combine(*px, color, alpha, mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(w: u32, h: u32) -> Frame {
        Frame::new(Viewport::new(w, h).unwrap())
    }

    #[test]
    fn test_set_get_bounds() {
        let mut f = frame(4, 3);
        f.set(3, 2, Color::new(1, 2, 3));
        f.set(4, 0, Color::new(9, 9, 9));
        f.set(-1, 0, Color::new(9, 9, 9));
        assert_eq!(f.get(3, 2), Some(Color::new(1, 2, 3)));
        assert_eq!(f.get(4, 0), None);
        assert_eq!(f.pixels().iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn test_additive_blend_saturates() {
        let mut f = frame(1, 1);
        f.set(0, 0, Color::new(200, 100, 0));
        f.blend(0, 0, Color::new(100, 100, 100), 255, BlendMode::Additive);
        assert_eq!(f.get(0, 0), Some(Color::new(255, 200, 100)));
    }

    #[test]
    fn test_additive_blend_scales_by_alpha() {
        let mut f = frame(1, 1);
        f.blend(0, 0, Color::new(0, 200, 100), 51, BlendMode::Additive);
        // 200 * 51 / 255 = 40, 100 * 51 / 255 = 20
        assert_eq!(f.get(0, 0), Some(Color::new(0, 40, 20)));
    }

    #[test]
    fn test_alpha_blend_extremes() {
        let mut f = frame(1, 1);
        f.set(0, 0, Color::new(10, 20, 30));
        f.blend(0, 0, Color::new(200, 200, 200), 0, BlendMode::Alpha);
        assert_eq!(f.get(0, 0), Some(Color::new(10, 20, 30)));
        f.blend(0, 0, Color::new(200, 200, 200), 255, BlendMode::Alpha);
        assert_eq!(f.get(0, 0), Some(Color::new(200, 200, 200)));
    }

    #[test]
    fn test_resize_clears() {
        let mut f = frame(2, 2);
        f.clear(Color::new(5, 5, 5));
        f.resize(Viewport::new(3, 1).unwrap());
        assert_eq!(f.pixels(), &[0, 0, 0]);
        assert_eq!(f.viewport(), Viewport::new(3, 1).unwrap());
    }

    #[test]
    fn test_copy_requires_matching_size() {
        let mut src = frame(3, 2);
        src.clear(Color::new(7, 7, 7));
        let mut dst = frame(3, 2);
        dst.copy_from(&src);
        assert_eq!(dst.pixels(), src.pixels());

        // Same pixel count, different shape.
        let mut transposed = frame(2, 3);
        transposed.clear(Color::new(1, 1, 1));
        transposed.copy_from(&src);
        assert!(transposed.pixels().iter().all(|&p| p == Color::new(1, 1, 1).to_u32()));

        let mut smaller = frame(1, 1);
        smaller.copy_from(&src);
        assert_eq!(smaller.get(0, 0), Some(Color::new(0, 0, 0)));
    }
}
