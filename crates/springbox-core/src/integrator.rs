use bytemuck::Zeroable;
use glam::Vec3;

use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::forces::compute_forces;
use crate::particle::{Particle, MAX_PARTICLES};

/// Velocity and position increments of one RK4 stage over a stage length `h`.
#[derive(Clone, Copy)]
struct Derivative {
    dv: [Vec3; MAX_PARTICLES],
    dp: [Vec3; MAX_PARTICLES],
}

impl Derivative {
    /// Increments implied by the forces and velocities currently stored on `state`.
    ///
    /// The velocity increment is `force * mass * h`.
    fn from_state(state: &[Particle], h: f32) -> Self {
        let mut d = Self {
            dv: [Vec3::ZERO; MAX_PARTICLES],
            dp: [Vec3::ZERO; MAX_PARTICLES],
        };
        for (i, p) in state.iter().enumerate() {
            d.dv[i] = p.force * (p.mass * h);
            d.dp[i] = p.velocity * h;
        }
        d
    }
}

/// Scratch copy of a body's particles used to evaluate an intermediate stage.
struct Stage {
    particles: [Particle; MAX_PARTICLES],
    len: usize,
}

impl Stage {
    /// `base` advanced by the increments in `d`, with forces re-evaluated at
    /// the new state.
    fn offset(base: &[Particle], d: &Derivative, config: &PhysicsConfig) -> Self {
        let mut particles = [Particle::zeroed(); MAX_PARTICLES];
        for (i, (dst, src)) in particles.iter_mut().zip(base).enumerate() {
            *dst = *src;
            dst.velocity = src.velocity + d.dv[i];
            dst.position = src.position + d.dp[i];
        }
        let len = base.len();
        compute_forces(&mut particles[..len], config);
        Self { particles, len }
    }

    #[inline]
    fn particles(&self) -> &[Particle] {
        &self.particles[..self.len]
    }
}

/// Advance `body` by `dt` with a four-stage Runge-Kutta step over
/// position and velocity.
///
/// Stage A is taken from the forces already stored on the particles, so
/// [`compute_forces`] must have run on the current state. Each later stage
/// re-evaluates forces at `base + previous increment`. Stages A, B and C span
/// `dt / 2`, stage D spans `dt`, and the increments combine as
/// `(A + 2(B + C) + D) / 6` with no further `dt` factor. The position
/// increment is scaled by `config.position_overshoot`.
pub fn integrate(body: &mut Body, dt: f32, config: &PhysicsConfig) {
    if body.is_empty() {
        return;
    }

    let half = dt * 0.5;
    let base = body.particles();
    let a = Derivative::from_state(base, half);
    let b = Derivative::from_state(Stage::offset(base, &a, config).particles(), half);
    let c = Derivative::from_state(Stage::offset(base, &b, config).particles(), half);
    let d = Derivative::from_state(Stage::offset(base, &c, config).particles(), dt);

    let sixth = 1.0 / 6.0;
    let overshoot = config.position_overshoot;
    for (i, p) in body.particles_mut().iter_mut().enumerate() {
        let dv = a.dv[i] + (b.dv[i] + c.dv[i]) * 2.0 + d.dv[i];
        p.velocity += dv * sixth;

        let dp = a.dp[i] + (b.dp[i] + c.dp[i]) * 2.0 + d.dp[i];
        p.position += dp * sixth * overshoot;
    }
}
