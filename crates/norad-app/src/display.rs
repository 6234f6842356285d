//! The presentation surface: a minifb window paced at the target frame rate.

use anyhow::{Context, Result};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use norad_core::constants::TARGET_FPS;
use norad_core::types::Viewport;
use norad_render::Frame;

use crate::cli::AppConfig;

const TITLE: &str = "NORAD";

pub struct Display {
    window: Window,
    fullscreen: bool,
    windowed: Viewport,
    fullscreen_size: Viewport,
    /// Last non-degenerate window size.
    viewport: Viewport,
}

impl Display {
    pub fn open(config: &AppConfig) -> Result<Self> {
        let viewport = config.viewport(config.fullscreen);
        let window = create_window(viewport, config.fullscreen)?;
        Ok(Self {
            window,
            fullscreen: config.fullscreen,
            windowed: config.windowed,
            fullscreen_size: config.fullscreen_size,
            viewport,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Current surface size. A minimized window keeps the last usable size.
    pub fn viewport(&mut self) -> Viewport {
        let (w, h) = self.window.get_size();
        if let Ok(viewport) = Viewport::new(w as u32, h as u32) {
            self.viewport = viewport;
        }
        self.viewport
    }

    /// Keys pressed since the last presented frame.
    pub fn keys_pressed(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }

    /// Switch between the resizable window and the borderless fullscreen
    /// surface. The window is recreated.
    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        let fullscreen = !self.fullscreen;
        let viewport = if fullscreen {
            self.fullscreen_size
        } else {
            self.windowed
        };
        self.window = create_window(viewport, fullscreen)?;
        self.fullscreen = fullscreen;
        self.viewport = viewport;
        log::info!(
            "{} at {}x{}",
            if fullscreen { "fullscreen" } else { "windowed" },
            viewport.width,
            viewport.height
        );
        Ok(())
    }

    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        self.window
            .update_with_buffer(frame.pixels(), frame.width() as usize, frame.height() as usize)
            .context("failed to present frame")
    }
}

fn create_window(viewport: Viewport, fullscreen: bool) -> Result<Window> {
    let options = WindowOptions {
        borderless: fullscreen,
        resize: !fullscreen,
        topmost: fullscreen,
        ..WindowOptions::default()
    };
    let mut window = Window::new(
        TITLE,
        viewport.width as usize,
        viewport.height as usize,
        options,
    )
    .with_context(|| format!("failed to open {}x{} window", viewport.width, viewport.height))?;
    window.set_target_fps(TARGET_FPS as usize);
    Ok(window)
}
