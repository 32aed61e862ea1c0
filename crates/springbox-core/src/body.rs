use bytemuck::Zeroable;
use glam::Vec3;

use crate::error::BodyError;
use crate::particle::{Particle, MAX_PARTICLES};

/// Whether a body still takes part in stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyState {
    #[default]
    Active,
    /// Terminal until [`Body::wake`] is called.
    Settled,
}

/// A cluster of point masses simulated as one object.
///
/// Every unordered particle pair is an implicit spring; there is no stored
/// topology. Particles live in an inline array so stepping never allocates.
#[derive(Clone, Debug)]
pub struct Body {
    particles: [Particle; MAX_PARTICLES],
    len: usize,
    /// Bounding radius around particle 0, used by the broad phase.
    pub radius: f32,
    /// Grows on colliding substeps, shrinks otherwise.
    pub stability: i32,
    /// Simulation time not yet consumed by a substep.
    pub leftover_time: f32,
    state: BodyState,
}

impl Body {
    /// Build a body from up to [`MAX_PARTICLES`] particles.
    pub fn new(particles: &[Particle], radius: f32) -> Result<Self, BodyError> {
        if particles.len() > MAX_PARTICLES {
            return Err(BodyError::TooManyParticles {
                count: particles.len(),
                max: MAX_PARTICLES,
            });
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(BodyError::InvalidRadius(radius));
        }
        for (index, particle) in particles.iter().enumerate() {
            if !particle.is_finite() {
                return Err(BodyError::NonFinite { index });
            }
            if particle.mass < 0.0 {
                return Err(BodyError::NegativeMass {
                    index,
                    mass: particle.mass,
                });
            }
        }

        let mut storage = [Particle::zeroed(); MAX_PARTICLES];
        storage[..particles.len()].copy_from_slice(particles);
        Ok(Self {
            particles: storage,
            len: particles.len(),
            radius,
            stability: 0,
            leftover_time: 0.0,
            state: BodyState::Active,
        })
    }

    /// Build a body with uniform mass, resting at the given points.
    pub fn from_points(points: &[Vec3], mass: f32, radius: f32) -> Result<Self, BodyError> {
        if points.len() > MAX_PARTICLES {
            return Err(BodyError::TooManyParticles {
                count: points.len(),
                max: MAX_PARTICLES,
            });
        }
        let mut particles = [Particle::zeroed(); MAX_PARTICLES];
        for (slot, &point) in particles.iter_mut().zip(points) {
            *slot = Particle::new(point, mass);
        }
        Self::new(&particles[..points.len()], radius)
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles[..self.len]
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn state(&self) -> BodyState {
        self.state
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.state == BodyState::Settled
    }

    pub(crate) fn settle(&mut self) {
        self.state = BodyState::Settled;
        self.stability = 0;
    }

    /// Put a settled body back into simulation.
    pub fn wake(&mut self) {
        if self.state == BodyState::Settled {
            log::debug!("waking body with {} particles", self.len);
        }
        self.state = BodyState::Active;
        self.stability = 0;
    }

    /// Sphere around particle 0 with the body radius.
    pub fn bounding_sphere(&self) -> Option<(Vec3, f32)> {
        self.particles().first().map(|p| (p.position, self.radius))
    }

    /// Add a force that acts on one particle during the next substep.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn apply_impulse(&mut self, index: usize, force: Vec3) -> bool {
        match self.particles_mut().get_mut(index) {
            Some(particle) => {
                particle.external_force += force;
                true
            }
            None => false,
        }
    }

    /// Blend between the positions at the start of the last frame and now.
    pub fn interpolate(&self, alpha: f32) -> impl Iterator<Item = Vec3> + '_ {
        self.particles()
            .iter()
            .map(move |p| p.frame_start.lerp(p.position, alpha))
    }

    pub(crate) fn save_frame_start(&mut self) {
        for particle in self.particles_mut() {
            particle.frame_start = particle.position;
        }
    }

    pub(crate) fn save_snapshot(&mut self) {
        for particle in self.particles_mut() {
            particle.snapshot = particle.position;
        }
    }

    pub(crate) fn restore_snapshot(&mut self) {
        for particle in self.particles_mut() {
            particle.position = particle.snapshot;
        }
    }
}
