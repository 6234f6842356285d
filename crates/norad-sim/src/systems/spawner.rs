//! Launch scheduling: interval timers, endpoint selection and bursts.

use rand::Rng;

use norad_core::constants::*;
use norad_core::enums::{ProjectileKind, Side};
use norad_core::events::DisplayEvent;
use norad_core::types::{GeoPoint, NamedSite};
use norad_geo::Equirectangular;

use crate::entities::{Missile, SubmarineMissile};

/// Fires when more than `interval` seconds have passed since the last shot.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    interval: f64,
    default_interval: f64,
    /// `None` until the first shot, so a fresh timer fires immediately.
    last_spawn: Option<f64>,
}

impl SpawnTimer {
    pub fn new(default_interval: f64) -> Self {
        Self {
            interval: default_interval,
            default_interval,
            last_spawn: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn due(&self, now: f64) -> bool {
        match self.last_spawn {
            None => true,
            Some(last) => now - last > self.interval,
        }
    }

    /// Fire if due, restarting the interval at `now`.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if !self.due(now) {
            return false;
        }
        self.last_spawn = Some(now);
        true
    }

    /// Multiply the interval by `factor`, clamped to the allowed range.
    pub fn scale(&mut self, factor: f64) {
        self.interval = (self.interval * factor).clamp(MIN_LAUNCH_INTERVAL, MAX_LAUNCH_INTERVAL);
    }

    pub fn reset(&mut self) {
        self.interval = self.default_interval;
    }
}

/// The land and submarine launch timers.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchTimers {
    pub land: SpawnTimer,
    pub submarine: SpawnTimer,
}

impl Default for LaunchTimers {
    fn default() -> Self {
        Self {
            land: SpawnTimer::new(DEFAULT_LAUNCH_INTERVAL),
            submarine: SpawnTimer::new(DEFAULT_SUB_LAUNCH_INTERVAL),
        }
    }
}

impl LaunchTimers {
    pub fn scale(&mut self, factor: f64) {
        self.land.scale(factor);
        self.submarine.scale(factor);
    }

    pub fn reset(&mut self) {
        self.land.reset();
        self.submarine.reset();
    }

    pub fn intensity_event(&self) -> DisplayEvent {
        DisplayEvent::IntensityChanged {
            land_interval: self.land.interval(),
            submarine_interval: self.submarine.interval(),
        }
    }
}

/// Random origin over all named sites and a different random destination.
pub fn land_route(rng: &mut impl Rng) -> (GeoPoint, GeoPoint) {
    let sites: Vec<&NamedSite> = land_sites().collect();
    let origin = rng.gen_range(0..sites.len());
    let mut target = rng.gen_range(0..sites.len() - 1);
    if target >= origin {
        target += 1;
    }
    (sites[origin].point, sites[target].point)
}

/// Random ocean launch point and a side chosen by coin flip.
/// Blue targets the eastern sites, Red the western ones.
pub fn submarine_route(rng: &mut impl Rng) -> (GeoPoint, GeoPoint, Side) {
    let origin = SUBMARINE_POINTS[rng.gen_range(0..SUBMARINE_POINTS.len())].point;
    let side = if rng.gen_bool(0.5) { Side::Red } else { Side::Blue };
    let pool: &[NamedSite] = match side {
        Side::Blue => &EASTERN_TARGETS,
        Side::Red => &WESTERN_TARGETS,
    };
    let target = pool[rng.gen_range(0..pool.len())].point;
    (origin, target, side)
}

pub fn launch_land(
    missiles: &mut Vec<Missile>,
    rng: &mut impl Rng,
    projection: &Equirectangular,
    t0: f64,
    events: &mut Vec<DisplayEvent>,
) {
    let (origin, target) = land_route(rng);
    missiles.push(Missile::new(origin, target, t0, projection));
    log::debug!("land launch at t0={t0:.2}");
    events.push(DisplayEvent::Launched {
        kind: ProjectileKind::Land,
        side: Side::Blue,
        origin,
        target,
        t0,
    });
}

pub fn launch_submarine(
    sub_missiles: &mut Vec<SubmarineMissile>,
    rng: &mut impl Rng,
    projection: &Equirectangular,
    t0: f64,
    events: &mut Vec<DisplayEvent>,
) {
    let (origin, target, side) = submarine_route(rng);
    sub_missiles.push(SubmarineMissile::new(origin, target, t0, side, projection));
    log::debug!("{side:?} submarine launch at t0={t0:.2}");
    events.push(DisplayEvent::Launched {
        kind: ProjectileKind::Submarine,
        side,
        origin,
        target,
        t0,
    });
}

/// Fire whichever timers are due.
pub fn run(
    timers: &mut LaunchTimers,
    missiles: &mut Vec<Missile>,
    sub_missiles: &mut Vec<SubmarineMissile>,
    rng: &mut impl Rng,
    projection: &Equirectangular,
    now: f64,
    events: &mut Vec<DisplayEvent>,
) {
    if timers.land.try_fire(now) {
        launch_land(missiles, rng, projection, now, events);
    }
    if timers.submarine.try_fire(now) {
        launch_submarine(sub_missiles, rng, projection, now, events);
    }
}

/// Launch a fixed batch with staggered start times in `[now, now + jitter)`.
pub fn burst(
    missiles: &mut Vec<Missile>,
    sub_missiles: &mut Vec<SubmarineMissile>,
    rng: &mut impl Rng,
    projection: &Equirectangular,
    now: f64,
    events: &mut Vec<DisplayEvent>,
) {
    for _ in 0..BURST_LAND_COUNT {
        let t0 = now + rng.gen::<f64>() * BURST_JITTER_SECS;
        launch_land(missiles, rng, projection, t0, events);
    }
    for _ in 0..BURST_SUB_COUNT {
        let t0 = now + rng.gen::<f64>() * BURST_JITTER_SECS;
        launch_submarine(sub_missiles, rng, projection, t0, events);
    }
    log::info!("burst: {BURST_LAND_COUNT} land, {BURST_SUB_COUNT} submarine");
    events.push(DisplayEvent::Burst {
        land: BURST_LAND_COUNT,
        submarine: BURST_SUB_COUNT,
    });
}
