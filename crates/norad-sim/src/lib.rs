//! Simulation for the NORAD display.
//!
//! Owns the time-parameterized entities, the launch scheduler and the
//! impact/cleanup systems. Advanced once per frame with a wall-clock `now`.

pub mod engine;
pub mod entities;
pub mod systems;

pub use engine::{SimConfig, SimulationState};
pub use norad_core as core;
