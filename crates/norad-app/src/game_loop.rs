//! Frame loop: input, simulation tick, composition, post-processing, present.
//!
//! Single-threaded. `now` is sampled once per frame from a monotonic clock
//! and handed to every step.

use std::time::Instant;

use anyhow::Result;

use norad_core::commands::ControlCommand;
use norad_core::events::DisplayEvent;
use norad_core::types::Viewport;
use norad_geo::MapGeometry;
use norad_render::{Canvas, PostPipeline, StaticMapLayer};
use norad_sim::SimulationState;

use crate::cli::AppConfig;
use crate::display::Display;
use crate::input;

/// Everything drawn each frame, sized to one viewport.
pub struct Scene {
    pub geometry: MapGeometry,
    pub map: StaticMapLayer,
    pub canvas: Canvas,
    pub post: PostPipeline,
}

impl Scene {
    pub fn new(geometry: MapGeometry, config: &AppConfig, viewport: Viewport) -> Self {
        Self {
            map: StaticMapLayer::build(&geometry, viewport),
            canvas: Canvas::new(viewport),
            post: PostPipeline::new(config.crt_preset, viewport, config.curvature),
            geometry,
        }
    }

    /// Rebuild every viewport-sized asset.
    pub fn resize(&mut self, viewport: Viewport) {
        self.map = StaticMapLayer::build(&self.geometry, viewport);
        self.canvas.resize(viewport);
        self.post.resize(viewport);
    }

    /// Log every drained simulation event and react to the ones that
    /// affect presentation.
    pub fn apply_events(&mut self, events: &[DisplayEvent]) {
        for event in events {
            log::debug!("{event:?}");
            if let DisplayEvent::CrtPresetChanged { preset } = event {
                self.post.set_preset(*preset);
            }
        }
    }

    /// Compose one frame: map, entities, then the CRT stages.
    pub fn render(&mut self, sim: &mut SimulationState, now: f64) {
        self.map.draw(&mut self.canvas.frame);
        sim.draw(&mut self.canvas, now);
        self.post.apply(&mut self.canvas.frame, now, sim.rng_mut());
    }
}

/// Queue simulation commands on `sim` and return the ones the loop itself
/// handles, in input order.
pub fn route_commands(
    commands: impl IntoIterator<Item = ControlCommand>,
    sim: &mut SimulationState,
) -> Vec<ControlCommand> {
    let (presentation, simulation): (Vec<_>, Vec<_>) =
        commands.into_iter().partition(|c| c.is_presentation());
    sim.queue_commands(simulation);
    presentation
}

/// Run until the window closes or a quit key is pressed.
pub fn run(config: AppConfig) -> Result<()> {
    let geometry = MapGeometry::load(&config.coastlines, &config.countries);
    if geometry.is_empty() {
        log::warn!("no map geometry loaded, drawing the grid only");
    }

    let mut display = Display::open(&config)?;
    let viewport = display.viewport();
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "display {}x{} (fullscreen: {}), CRT {}, seed {seed}, {} aircraft",
        viewport.width,
        viewport.height,
        display.is_fullscreen(),
        config.crt_preset.name(),
        config.aircraft_count
    );

    let mut sim = SimulationState::new(config.sim_config(seed, viewport));
    let mut scene = Scene::new(geometry, &config, viewport);
    let start = Instant::now();

    while display.is_open() {
        let now = start.elapsed().as_secs_f64();

        let commands = input::commands_for_keys(&display.keys_pressed());
        for command in route_commands(commands, &mut sim) {
            match command {
                ControlCommand::Quit => {
                    log::info!("quit requested");
                    return Ok(());
                }
                ControlCommand::ToggleFullscreen => display.toggle_fullscreen()?,
                other => log::warn!("unhandled presentation command {other:?}"),
            }
        }

        let viewport = display.viewport();
        if viewport != sim.viewport() {
            log::info!("resize to {}x{}", viewport.width, viewport.height);
            sim.resize(viewport);
            scene.resize(viewport);
        }

        let events = sim.tick(now);
        scene.apply_events(&events);
        scene.render(&mut sim, now);
        display.present(&scene.canvas.frame)?;
    }
    Ok(())
}
