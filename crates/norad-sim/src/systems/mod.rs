//! Systems run by the simulation state each tick.
//!
//! Systems are free functions over the collections they touch. They do not
//! own state; everything lives in `SimulationState`.

pub mod cleanup;
pub mod impact;
pub mod spawner;
