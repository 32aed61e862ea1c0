pub mod spring;

use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::particle::Particle;

pub use spring::spring_force;

/// Compute the net force on every particle of `particles`.
///
/// Each force starts from the particle's external force, then picks up
/// gravity (mass > 0 only, scaled by 1/mass), linear velocity damping, and
/// one spring contribution per unordered pair. Only `force` is written.
pub fn compute_forces(particles: &mut [Particle], config: &PhysicsConfig) {
    // ==== 1. PER-PARTICLE TERMS ====
    for p in particles.iter_mut() {
        p.force = p.external_force;
        if p.mass > 0.0 {
            p.force += config.gravity / p.mass;
        }
        p.force -= p.velocity * config.linear_damping;
    }

    // ==== 2. SPRING NETWORK (all pairs) ====
    let count = particles.len();
    for k in 0..count {
        for l in (k + 1)..count {
            let f = spring_force(&particles[k], &particles[l], config);
            particles[k].force += f;
            particles[l].force -= f;
        }
    }
}

/// [`compute_forces`] over the particles of a body.
pub fn compute_body_forces(body: &mut Body, config: &PhysicsConfig) {
    compute_forces(body.particles_mut(), config);
}
