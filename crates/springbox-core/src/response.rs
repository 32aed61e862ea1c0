use crate::body::Body;
use crate::collision::{CollisionSurface, EntityHandle, Environment};
use crate::config::PhysicsConfig;
use crate::events::{EventSink, Impact, PhysicsEvent};
use crate::math::manhattan_length;

/// Apply the outcome of a collision check to `body`.
///
/// Without a collision the stability counter drops by 2 (floored at 0).
/// With one it rises by 1, an impact is emitted (unless `source` is a body
/// chunk), every particle returns to its pre-substep snapshot, and velocities
/// are damped:
/// - no normal: each component is inverted and scaled, X/Z by the horizontal
///   factor and Y by the vertical factor
/// - normal `n`: `v` is reflected about `n`, then scaled by the same factors
///   without inversion
pub fn respond(
    body: &mut Body,
    collision: Option<&CollisionSurface>,
    source: Option<EntityHandle>,
    env: &Environment<'_>,
    events: &mut dyn EventSink,
    config: &PhysicsConfig,
) {
    let Some(surface) = collision else {
        body.stability = (body.stability - 2).max(0);
        return;
    };
    body.stability += 1;

    let rc = &config.response;
    let strength = body
        .particles()
        .first()
        .map_or(0.0, |p| manhattan_length(p.velocity) * rc.impact_strength_scale);
    let chunk = source.is_some_and(|s| env.entities.is_body_chunk(s));
    if !chunk {
        events.emit(PhysicsEvent::Impact(Impact {
            strength,
            volume: rc.impact_base_volume + strength,
            material: surface.material,
        }));
    }

    log::trace!(
        "collision with {:?} ({:?}), stability {}",
        surface.source,
        surface.material,
        body.stability
    );

    body.restore_snapshot();
    let h = rc.horizontal_restitution;
    let v = rc.vertical_restitution;
    match surface.normal {
        None => {
            for p in body.particles_mut() {
                p.velocity.x *= -h;
                p.velocity.z *= -h;
                p.velocity.y *= -v;
            }
        }
        Some(normal) => {
            for p in body.particles_mut() {
                let t = normal.dot(p.velocity);
                p.velocity -= normal * (2.0 * t);
                p.velocity.x *= h;
                p.velocity.z *= h;
                p.velocity.y *= v;
            }
        }
    }
}
