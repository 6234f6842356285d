//! Pre-rendered world map: country borders, coastlines, the highlighted
//! country and a graticule, baked once per viewport.

use glam::Vec2;
use norad_core::constants::*;
use norad_core::types::{Color, Viewport};
use norad_geo::{split_at_antimeridian, Equirectangular, MapGeometry, Shape};

use crate::frame::{BlendMode, Frame};
use crate::glow::draw_glow_line;
use crate::layer::Canvas;
use crate::raster;

/// Map background, copied into the frame at the start of every tick.
#[derive(Debug, Clone)]
pub struct StaticMapLayer {
    frame: Frame,
}

impl StaticMapLayer {
    /// Render `geometry` at the given viewport.
    ///
    /// Draw order: ordinary borders, coastlines, highlighted country, grid.
    pub fn build(geometry: &MapGeometry, viewport: Viewport) -> Self {
        let projection = Equirectangular::new(viewport);
        let mut canvas = Canvas::new(viewport);

        let (highlighted, ordinary): (Vec<&Shape>, Vec<&Shape>) =
            geometry.countries.iter().partition(|s| s.is_highlighted());

        for shape in ordinary {
            draw_shape(&mut canvas, &projection, shape, BORDER, BORDER_GLOW, BORDER_GLOW_LAYERS);
        }
        for shape in &geometry.coastlines {
            draw_shape(&mut canvas, &projection, shape, CYAN, CYAN_GLOW, COASTLINE_GLOW_LAYERS);
        }
        for shape in highlighted {
            draw_shape(
                &mut canvas,
                &projection,
                shape,
                HIGHLIGHT,
                HIGHLIGHT_GLOW,
                HIGHLIGHT_GLOW_LAYERS,
            );
        }
        draw_graticule(&mut canvas);

        log::debug!(
            "static map layer built at {}x{}",
            viewport.width,
            viewport.height
        );
        Self {
            frame: canvas.frame,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.frame.viewport()
    }

    /// The baked layer.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Replace the frame contents with the map.
    pub fn draw(&self, frame: &mut Frame) {
        frame.copy_from(&self.frame);
    }
}

fn draw_shape(
    canvas: &mut Canvas,
    projection: &Equirectangular,
    shape: &Shape,
    core: Color,
    glow: Color,
    layers: u32,
) {
    for part in &shape.parts {
        for run in split_at_antimeridian(part) {
            if run.len() < 2 {
                continue;
            }
            let points = projection.project_all(&run);
            draw_glow_line(canvas, &points, core, glow, 1.0, layers);
        }
    }
}

/// Latitude lines every 15 degrees and longitude lines every 30 degrees,
/// blended at `GRID_ALPHA`.
fn draw_graticule(canvas: &mut Canvas) {
    let viewport = canvas.viewport();
    let w = viewport.width as f32;
    let h = viewport.height as f32;

    for lat in (-75..=75).step_by(GRID_LAT_STEP as usize) {
        let y = ((90 - lat) as f32 / 180.0 * h).trunc();
        raster::segment(&mut canvas.glow, Vec2::new(0.0, y), Vec2::new(w, y), 1.0, GRID);
    }
    for lon in (-180..=180).step_by(GRID_LON_STEP as usize) {
        let x = ((lon + 180) as f32 / 360.0 * w).trunc();
        raster::segment(&mut canvas.glow, Vec2::new(x, 0.0), Vec2::new(x, h), 1.0, GRID);
    }
    canvas.merge_glow(BlendMode::Alpha, GRID_ALPHA);
}
