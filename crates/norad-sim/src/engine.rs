//! Simulation state: the heart of the display.
//!
//! `SimulationState` owns every entity collection, the launch timers, the
//! CRT preset, the viewport and the RNG. It processes control commands and
//! runs the systems once per frame. Completely headless (no window
//! dependency), enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use norad_core::commands::ControlCommand;
use norad_core::constants::*;
use norad_core::enums::{CrtPreset, Side};
use norad_core::events::DisplayEvent;
use norad_core::types::{GeoPoint, Viewport};
use norad_geo::Equirectangular;
use norad_render::Canvas;

use crate::entities::{Aircraft, Entity, Explosion, Missile, SubmarineMissile};
use crate::systems;
use crate::systems::spawner::LaunchTimers;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same launches.
    pub seed: u64,
    /// Number of patrol aircraft.
    pub aircraft_count: usize,
    /// Initial drawing surface size.
    pub viewport: Viewport,
    /// Initial CRT preset.
    pub crt_preset: CrtPreset,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            aircraft_count: DEFAULT_AIRCRAFT_COUNT,
            viewport: Viewport::default(),
            crt_preset: CrtPreset::default(),
        }
    }
}

/// All mutable display state.
pub struct SimulationState {
    viewport: Viewport,
    projection: Equirectangular,
    rng: ChaCha8Rng,
    timers: LaunchTimers,
    crt_preset: CrtPreset,
    command_queue: VecDeque<ControlCommand>,
    events: Vec<DisplayEvent>,

    missiles: Vec<Missile>,
    sub_missiles: Vec<SubmarineMissile>,
    explosions: Vec<Explosion>,
    aircraft: Vec<Aircraft>,
}

impl SimulationState {
    pub fn new(config: SimConfig) -> Self {
        let projection = Equirectangular::new(config.viewport);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let aircraft = (0..config.aircraft_count)
            .map(|_| Aircraft::random(&mut rng, 0.0, &projection))
            .collect();

        Self {
            viewport: config.viewport,
            projection,
            rng,
            timers: LaunchTimers::default(),
            crt_preset: config.crt_preset,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            missiles: Vec::new(),
            sub_missiles: Vec::new(),
            explosions: Vec::new(),
            aircraft,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ControlCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ControlCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance to `now` and return the events produced since the last tick.
    ///
    /// Order: commands, spawning, impacts, cleanup.
    pub fn tick(&mut self, now: f64) -> Vec<DisplayEvent> {
        self.process_commands(now);
        self.run_systems(now);
        std::mem::take(&mut self.events)
    }

    /// Draw every live entity onto `canvas`.
    pub fn draw(&self, canvas: &mut Canvas, now: f64) {
        for a in &self.aircraft {
            a.draw(canvas, now);
        }
        for m in &self.missiles {
            m.draw(canvas, now);
        }
        for m in &self.sub_missiles {
            m.draw(canvas, now);
        }
        for e in &self.explosions {
            e.draw(canvas, now);
        }
    }

    /// Switch to a new surface size. Every path is regenerated against the
    /// new projection; launch times are untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.projection = Equirectangular::new(viewport);

        for m in &mut self.missiles {
            m.reproject(&self.projection);
        }
        for m in &mut self.sub_missiles {
            m.reproject(&self.projection);
        }
        for e in &mut self.explosions {
            e.reproject(&self.projection);
        }
        for a in &mut self.aircraft {
            a.reproject(&self.projection);
        }

        self.events.push(DisplayEvent::Resized {
            width: viewport.width,
            height: viewport.height,
        });
    }

    // --- Accessors ---

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn projection(&self) -> &Equirectangular {
        &self.projection
    }

    pub fn crt_preset(&self) -> CrtPreset {
        self.crt_preset
    }

    pub fn land_interval(&self) -> f64 {
        self.timers.land.interval()
    }

    pub fn submarine_interval(&self) -> f64 {
        self.timers.submarine.interval()
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn sub_missiles(&self) -> &[SubmarineMissile] {
        &self.sub_missiles
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    /// The state's RNG, shared with the post-processing noise stage.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    // --- Direct spawning ---

    pub fn spawn_missile(&mut self, start: GeoPoint, end: GeoPoint, t0: f64) {
        self.missiles
            .push(Missile::new(start, end, t0, &self.projection));
    }

    pub fn spawn_submarine_missile(&mut self, start: GeoPoint, end: GeoPoint, t0: f64, side: Side) {
        self.sub_missiles
            .push(SubmarineMissile::new(start, end, t0, side, &self.projection));
    }

    pub fn spawn_explosion(&mut self, site: GeoPoint, t0: f64) {
        self.explosions
            .push(Explosion::new(site, t0, &self.projection));
    }

    /// Process all queued commands.
    fn process_commands(&mut self, now: f64) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now);
        }
    }

    /// Handle a single control command.
    fn handle_command(&mut self, command: ControlCommand, now: f64) {
        match command {
            ControlCommand::IntensityUp => {
                self.timers.scale(INTENSITY_UP_FACTOR);
                self.log_intensity();
            }
            ControlCommand::IntensityDown => {
                self.timers.scale(INTENSITY_DOWN_FACTOR);
                self.log_intensity();
            }
            ControlCommand::IntensityReset => {
                self.timers.reset();
                self.log_intensity();
            }
            ControlCommand::Burst => {
                systems::spawner::burst(
                    &mut self.missiles,
                    &mut self.sub_missiles,
                    &mut self.rng,
                    &self.projection,
                    now,
                    &mut self.events,
                );
            }
            ControlCommand::CycleCrtPreset => {
                self.crt_preset = self.crt_preset.next();
                log::info!("CRT preset: {}", self.crt_preset.name());
                self.events.push(DisplayEvent::CrtPresetChanged {
                    preset: self.crt_preset,
                });
            }
            // Handled by the frame loop.
            ControlCommand::Quit | ControlCommand::ToggleFullscreen => {}
        }
    }

    fn log_intensity(&mut self) {
        log::info!(
            "launch intervals: land {:.2}s, submarine {:.2}s",
            self.timers.land.interval(),
            self.timers.submarine.interval()
        );
        self.events.push(self.timers.intensity_event());
    }

    /// Run all systems in order.
    fn run_systems(&mut self, now: f64) {
        // 1. Launches
        systems::spawner::run(
            &mut self.timers,
            &mut self.missiles,
            &mut self.sub_missiles,
            &mut self.rng,
            &self.projection,
            now,
            &mut self.events,
        );

        // 2. Impacts
        systems::impact::run(
            &mut self.missiles,
            &mut self.explosions,
            &self.projection,
            now,
            &mut self.events,
        );
        systems::impact::run(
            &mut self.sub_missiles,
            &mut self.explosions,
            &self.projection,
            now,
            &mut self.events,
        );

        // 3. Cleanup
        systems::cleanup::run(&mut self.missiles, now);
        systems::cleanup::run(&mut self.sub_missiles, now);
        systems::cleanup::run(&mut self.explosions, now);
    }
}
