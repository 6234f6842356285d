//! Impact system: turns arrived projectiles into explosions, once each.

use norad_core::events::DisplayEvent;
use norad_geo::Equirectangular;

use crate::entities::{Explosion, Projectile};

/// Spawn one explosion at the target of every projectile whose flight is
/// complete and whose impact has not been processed yet.
pub fn run<P: Projectile>(
    projectiles: &mut [P],
    explosions: &mut Vec<Explosion>,
    projection: &Equirectangular,
    now: f64,
    events: &mut Vec<DisplayEvent>,
) {
    for projectile in projectiles.iter_mut() {
        if !projectile.trajectory().impact_due(now) {
            continue;
        }
        let target = projectile.trajectory().end;
        explosions.push(Explosion::new(target, now, projection));
        projectile.trajectory_mut().mark_impacted();

        log::debug!(
            "{:?} impact at ({:.2}, {:.2})",
            projectile.kind(),
            target.lat,
            target.lon
        );
        events.push(DisplayEvent::Impact {
            kind: projectile.kind(),
            target,
        });
    }
}
