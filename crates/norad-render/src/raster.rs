//! Scan conversion of strokes, discs, rings and polygons.
//!
//! Every primitive writes whole pixels through a [`Surface`]; pixel
//! `(x, y)` is sampled at its integer coordinate. A pixel may be written
//! more than once where primitives overlap, so surfaces must treat a plot
//! as an overwrite.

use glam::Vec2;
use norad_core::types::Color;

use crate::frame::Frame;

/// A pixel target for the rasterizer.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (i32, i32);

    /// Overwrite one pixel. Out-of-range coordinates are never passed.
    fn plot(&mut self, x: i32, y: i32, color: Color);
}

impl Surface for Frame {
    fn size(&self) -> (i32, i32) {
        (self.width() as i32, self.height() as i32)
    }

    fn plot(&mut self, x: i32, y: i32, color: Color) {
        self.set(x, y, color);
    }
}

/// Integer pixel bounds of a box, clipped to the surface. `None` if empty.
fn clip_box(surface: &impl Surface, min: Vec2, max: Vec2) -> Option<(i32, i32, i32, i32)> {
    let (w, h) = surface.size();
    let x0 = (min.x.floor() as i32).max(0);
    let y0 = (min.y.floor() as i32).max(0);
    let x1 = (max.x.ceil() as i32).min(w - 1);
    let y1 = (max.y.ceil() as i32).min(h - 1);
    (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
}

/// Squared distance from `p` to the segment `a`-`b`.
fn segment_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance_squared(a + ab * t)
}

/// Stroke a single segment of the given width with round joins.
pub fn segment(surface: &mut impl Surface, a: Vec2, b: Vec2, width: f32, color: Color) {
    let half = (width / 2.0).max(0.5);
    let Some((x0, y0, x1, y1)) = clip_box(surface, a.min(b) - half, a.max(b) + half) else {
        return;
    };
    let limit = half * half;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Vec2::new(x as f32, y as f32);
            if segment_distance_sq(p, a, b) <= limit {
                surface.plot(x, y, color);
            }
        }
    }
}

/// Stroke an open polyline.
pub fn polyline(surface: &mut impl Surface, points: &[Vec2], width: f32, color: Color) {
    match points {
        [] => {}
        [p] => segment(surface, *p, *p, width, color),
        _ => {
            for pair in points.windows(2) {
                segment(surface, pair[0], pair[1], width, color);
            }
        }
    }
}

/// Stroke a closed polygon outline.
pub fn polygon(surface: &mut impl Surface, points: &[Vec2], width: f32, color: Color) {
    polyline(surface, points, width, color);
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if points.len() > 2 {
            segment(surface, last, first, width, color);
        }
    }
}

/// Fill a disc.
pub fn disc(surface: &mut impl Surface, center: Vec2, radius: f32, color: Color) {
    if radius <= 0.0 {
        return;
    }
    let Some((x0, y0, x1, y1)) = clip_box(surface, center - radius, center + radius) else {
        return;
    };
    let r_sq = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if Vec2::new(x as f32, y as f32).distance_squared(center) <= r_sq {
                surface.plot(x, y, color);
            }
        }
    }
}

/// Stroke a circle outline of the given thickness, measured inward from
/// `radius`. A thickness at or above the radius fills the disc.
pub fn ring(surface: &mut impl Surface, center: Vec2, radius: f32, thickness: f32, color: Color) {
    if radius <= 0.0 {
        return;
    }
    if thickness >= radius {
        disc(surface, center, radius, color);
        return;
    }
    let Some((x0, y0, x1, y1)) = clip_box(surface, center - radius, center + radius) else {
        return;
    };
    let outer = radius * radius;
    let inner = (radius - thickness) * (radius - thickness);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = Vec2::new(x as f32, y as f32).distance_squared(center);
            if d > inner && d <= outer {
                surface.plot(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use norad_core::types::Viewport;

    const WHITE: Color = Color::new(255, 255, 255);

    fn frame(w: u32, h: u32) -> Frame {
        Frame::new(Viewport::new(w, h).unwrap())
    }

    fn lit(f: &Frame) -> usize {
        f.pixels().iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn test_horizontal_line_width() {
        let mut f = frame(20, 20);
        segment(&mut f, Vec2::new(2.0, 10.0), Vec2::new(17.0, 10.0), 1.0, WHITE);
        // 16 pixels on row 10, nothing else
        assert_eq!(lit(&f), 16);
        assert_eq!(f.get(2, 10), Some(WHITE));
        assert_eq!(f.get(17, 10), Some(WHITE));
        assert_eq!(f.get(10, 9), Some(Color::default()));

        let mut thick = frame(20, 20);
        segment(&mut thick, Vec2::new(2.0, 10.0), Vec2::new(17.0, 10.0), 3.0, WHITE);
        assert_eq!(thick.get(10, 9), Some(WHITE));
        assert_eq!(thick.get(10, 11), Some(WHITE));
        assert_eq!(thick.get(10, 12), Some(Color::default()));
    }

    #[test]
    fn test_primitives_clip_to_surface() {
        let mut f = frame(10, 10);
        segment(&mut f, Vec2::new(-50.0, 5.0), Vec2::new(50.0, 5.0), 1.0, WHITE);
        assert_eq!(lit(&f), 10);
        disc(&mut f, Vec2::new(-100.0, -100.0), 5.0, WHITE);
        assert_eq!(lit(&f), 10);
    }

    #[test]
    fn test_disc_symmetric() {
        let mut f = frame(21, 21);
        disc(&mut f, Vec2::new(10.0, 10.0), 4.0, WHITE);
        for (dx, dy) in [(4, 0), (-4, 0), (0, 4), (0, -4)] {
            assert_eq!(f.get(10 + dx, 10 + dy), Some(WHITE), "edge ({dx},{dy})");
        }
        assert_eq!(f.get(14, 14), Some(Color::default()));
    }

    #[test]
    fn test_ring_is_hollow() {
        let mut f = frame(41, 41);
        ring(&mut f, Vec2::new(20.0, 20.0), 10.0, 1.0, WHITE);
        assert_eq!(f.get(20, 20), Some(Color::default()));
        assert_eq!(f.get(30, 20), Some(WHITE));
        assert_eq!(f.get(28, 20), Some(Color::default()));

        let mut filled = frame(41, 41);
        ring(&mut filled, Vec2::new(20.0, 20.0), 3.0, 3.0, WHITE);
        assert_eq!(filled.get(20, 20), Some(WHITE));
    }

    #[test]
    fn test_polygon_closes() {
        let mut f = frame(20, 20);
        let square = [
            Vec2::new(5.0, 5.0),
            Vec2::new(15.0, 5.0),
            Vec2::new(15.0, 15.0),
            Vec2::new(5.0, 15.0),
        ];
        polygon(&mut f, &square, 1.0, WHITE);
        // closing edge (5,15) -> (5,5)
        assert_eq!(f.get(5, 10), Some(WHITE));
        assert_eq!(f.get(10, 10), Some(Color::default()));
    }
}
