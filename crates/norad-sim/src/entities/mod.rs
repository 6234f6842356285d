//! Time-parameterized display entities.
//!
//! All visual state is derived from `now` and the entity's `t0`; the only
//! mutable field is a projectile's [`ImpactState`](norad_core::enums::ImpactState).

pub mod aircraft;
pub mod explosion;
pub mod projectile;

pub use aircraft::Aircraft;
pub use explosion::Explosion;
pub use projectile::{Missile, SubmarineMissile, Trajectory};

use norad_core::enums::ProjectileKind;
use norad_geo::Equirectangular;
use norad_render::Canvas;

/// Shared contract of every drawable entity.
pub trait Entity {
    /// Creation time (seconds).
    fn t0(&self) -> f64;

    /// Animation length (seconds).
    fn duration(&self) -> f64;

    /// Normalized elapsed time. Unbounded on both sides.
    fn progress(&self, now: f64) -> f64 {
        (now - self.t0()) / self.duration()
    }

    /// Whether the entity stays in its collection.
    fn alive(&self, now: f64) -> bool;

    fn draw(&self, canvas: &mut Canvas, now: f64);

    /// Recompute screen geometry for a new projection.
    fn reproject(&mut self, projection: &Equirectangular);
}

/// An entity flying along a great-circle trajectory.
pub trait Projectile: Entity {
    fn kind(&self) -> ProjectileKind;

    fn trajectory(&self) -> &Trajectory;

    fn trajectory_mut(&mut self) -> &mut Trajectory;
}
