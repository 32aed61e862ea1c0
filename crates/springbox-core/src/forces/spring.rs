use crate::config::PhysicsConfig;
use crate::particle::Particle;
use glam::Vec3;

/// Damped spring force exerted on `k` by its pairing with `l`.
///
/// The rest length is the distance between the two rest positions. The
/// force on `l` is the exact negation of the returned value.
///
/// ```text
/// stretch   = (|d| - rest) * spring_constant
/// damping   = dot(v_k - v_l, d) * spring_damping / |d|
/// force     = d * -(stretch + damping) / |d|
/// ```
#[inline]
pub fn spring_force(k: &Particle, l: &Particle, config: &PhysicsConfig) -> Vec3 {
    let rest_length = k.rest_position.distance(l.rest_position);
    let delta = k.position - l.position;
    let dist = delta.length().max(config.min_spring_distance);
    let inv_dist = 1.0 / dist;

    let stretch = (dist - rest_length) * config.spring_constant;
    let damping = (k.velocity - l.velocity).dot(delta) * config.spring_damping * inv_dist;
    let magnitude = -(stretch + damping) * inv_dist;

    delta * magnitude
}
