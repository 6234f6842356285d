//! Cleanup system: drops entities whose animation has finished.

use crate::entities::Entity;

/// Remove every entity that is no longer alive at `now`. Order is kept.
pub fn run<E: Entity>(entities: &mut Vec<E>, now: f64) {
    entities.retain(|e| e.alive(now));
}
